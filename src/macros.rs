//! Descriptor construction from compiler-measured layout.
//!
//! [`layout_of!`] is the declaration-site companion to a `#[repr(C)]`
//! struct: every offset comes from `offset_of!` and every size from
//! `size_of`, so the descriptor can never drift from the layout the
//! compiler actually chose. Hand-written offsets are exactly the failure
//! mode this crate exists to eliminate.

/// Build a [`StructDescriptor`] for a `#[repr(C)]` type from compiler
/// facts.
///
/// Each field is annotated with how consumers must interpret it:
///
/// ```
/// use memlay::layout_of;
/// use std::ffi::{c_char, c_void};
///
/// #[repr(C)]
/// struct Sensor {
///     id: u32,
///     label: *const c_char,
///     readings: [f32; 5],
///     userdata: *const c_void,
/// }
///
/// let descriptor = layout_of! {
///     Sensor {
///         id: u32 => primitive("uint32_t"),
///         label: *const c_char => cstring,
///         readings: [f32; 5] => array("float", 5),
///         userdata: *const c_void => pointer("void*"),
///     }
/// }
/// .unwrap();
///
/// assert_eq!(descriptor.name(), "Sensor");
/// assert_eq!(descriptor.field_count(), 4);
/// ```
///
/// Nested struct fields use `nested("TypeName")`; the nested type's own
/// descriptor must be registered separately for consumers to resolve it.
/// The expansion runs the validating builder, so the macro returns
/// `Result<StructDescriptor, LayoutError>`.
///
/// [`StructDescriptor`]: crate::StructDescriptor
#[macro_export]
macro_rules! layout_of {
    ($ty:ident { $($field:ident : $fty:ty => $kind:ident $(( $($arg:tt)* ))?),+ $(,)? }) => {
        $crate::StructDescriptorBuilder::new(
            stringify!($ty),
            ::core::mem::size_of::<$ty>(),
            ::core::mem::align_of::<$ty>(),
        )
        $(
            .field($crate::layout_of!(@field $ty, $field, $fty, $kind $(( $($arg)* ))?))
        )+
        .finish()
    };

    (@field $ty:ident, $field:ident, $fty:ty, primitive($name:expr)) => {
        $crate::FieldDescriptor::primitive(
            stringify!($field),
            ::core::mem::offset_of!($ty, $field),
            ::core::mem::size_of::<$fty>(),
            $name,
        )
    };
    (@field $ty:ident, $field:ident, $fty:ty, pointer($name:expr)) => {
        $crate::FieldDescriptor::pointer(
            stringify!($field),
            ::core::mem::offset_of!($ty, $field),
            ::core::mem::size_of::<$fty>(),
            $name,
        )
    };
    (@field $ty:ident, $field:ident, $fty:ty, cstring) => {
        $crate::FieldDescriptor::cstring(
            stringify!($field),
            ::core::mem::offset_of!($ty, $field),
            ::core::mem::size_of::<$fty>(),
        )
    };
    (@field $ty:ident, $field:ident, $fty:ty, nested($name:expr)) => {
        $crate::FieldDescriptor::nested(
            stringify!($field),
            ::core::mem::offset_of!($ty, $field),
            ::core::mem::size_of::<$fty>(),
            $name,
        )
    };
    (@field $ty:ident, $field:ident, $fty:ty, array($elem:expr, $count:expr)) => {
        $crate::FieldDescriptor::array(
            stringify!($field),
            ::core::mem::offset_of!($ty, $field),
            ::core::mem::size_of::<$fty>(),
            $elem,
            $count,
        )
    };
}
