//! Value object contract: equality by value, not identity.
//!
//! Every request, response and nested descriptor of the model is a value
//! object. They carry no identity and no behaviour beyond their fields: two
//! values of the same type with the same fields are the same value.
//!
//! Concrete types are declared with [`value_object!`](crate::value_object),
//! which emits the struct, its accessors and the structural trait impls in one
//! place instead of hand-writing them per type.
//!
//! ## Field model
//!
//! Each field is stored as an `Option`. `None` means "never set" and is never
//! replaced by a sentinel. Sequence fields are `Option<Vec<T>>`, so an absent
//! sequence and a present-but-empty one stay distinguishable (and compare
//! unequal).
//!
//! ## Structural hash
//!
//! [`FieldValue::field_hash`] gives a deterministic `i32` that is stable across
//! processes and builds. A value object folds its fields in declaration order:
//!
//! ```text
//! hash = 1
//! for each field: hash = 31 * hash + (field present ? field_hash : 0)
//! ```
//!
//! Scalars follow the classic rules (UTF-16 polynomial for strings,
//! `1231`/`1237` for booleans, high/low folding for 64-bit values), so equal
//! values always hash equal. `std::hash::Hash` is implemented by feeding this
//! number to the hasher.

use core::any::Any;
use core::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Initial accumulator for structural hashes.
pub const HASH_SEED: i32 = 1;

/// Multiplier applied to the accumulator before each field is folded in.
pub const HASH_PRIME: i32 = 31;

/// Contribution of an absent field.
pub const ABSENT_HASH: i32 = 0;

/// Fold one field hash into a running accumulator.
#[inline]
pub fn fold_hash(acc: i32, field_hash: i32) -> i32 {
    acc.wrapping_mul(HASH_PRIME).wrapping_add(field_hash)
}

/// A type that can sit in a value-object field.
///
/// Implemented for the supported scalars, for `Vec<T>` and `Option<T>`, and by
/// [`value_object!`](crate::value_object) for every generated type, which is
/// what allows nesting.
pub trait FieldValue {
    /// Deterministic hash consistent with `PartialEq`.
    fn field_hash(&self) -> i32;

    /// Render the value inside a structural dump.
    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Shared contract of every generated request, response and descriptor.
///
/// Equality is the derived field-wise `PartialEq`; comparing two different
/// types with `==` does not compile. [`ValueObject::equals_any`] covers the
/// dynamically-typed case and answers `false` instead.
pub trait ValueObject:
    FieldValue
    + Clone
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + Default
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Declared type name, e.g. `"DescribeSecurityGroupsRequest"`.
    const TYPE_NAME: &'static str;

    /// Wire names of all declared fields, in declaration order.
    fn field_names() -> &'static [&'static str];

    /// Wire names of the fields currently present, in declaration order.
    fn present_fields(&self) -> Vec<&'static str>;

    /// Structural hash of the whole value.
    fn hash_code(&self) -> i32 {
        self.field_hash()
    }

    /// Equality against a value of unknown type.
    ///
    /// Returns `false` for `None` and for any other type.
    fn equals_any(&self, other: Option<&dyn Any>) -> bool {
        other
            .and_then(|other| other.downcast_ref::<Self>())
            .is_some_and(|other| self == other)
    }
}

/// Hash of a string over its UTF-16 code units.
pub fn string_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |acc, unit| fold_hash(acc, i32::from(unit)))
}

fn wide_hash(bits: u64) -> i32 {
    (bits ^ (bits >> 32)) as i32
}

impl FieldValue for String {
    fn field_hash(&self) -> i32 {
        string_hash(self)
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl FieldValue for bool {
    fn field_hash(&self) -> i32 {
        if *self { 1231 } else { 1237 }
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FieldValue for i32 {
    fn field_hash(&self) -> i32 {
        *self
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FieldValue for i64 {
    fn field_hash(&self) -> i32 {
        wide_hash(*self as u64)
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FieldValue for f32 {
    fn field_hash(&self) -> i32 {
        // -0.0 == 0.0, and every NaN hashes alike.
        let canonical = if *self == 0.0 {
            0.0f32
        } else if self.is_nan() {
            f32::NAN
        } else {
            *self
        };
        canonical.to_bits() as i32
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FieldValue for f64 {
    fn field_hash(&self) -> i32 {
        let canonical = if *self == 0.0 {
            0.0f64
        } else if self.is_nan() {
            f64::NAN
        } else {
            *self
        };
        wide_hash(canonical.to_bits())
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FieldValue for DateTime<Utc> {
    /// Millisecond precision: values that differ below a millisecond hash
    /// alike, which equality allows.
    fn field_hash(&self) -> i32 {
        wide_hash(self.timestamp_millis() as u64)
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn field_hash(&self) -> i32 {
        self.iter()
            .fold(HASH_SEED, |acc, item| fold_hash(acc, item.field_hash()))
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item.fmt_field(f)?;
        }
        f.write_str("]")
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_hash(&self) -> i32 {
        self.as_ref().map_or(ABSENT_HASH, FieldValue::field_hash)
    }

    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.fmt_field(f),
            None => f.write_str("null"),
        }
    }
}

/// Writer for the single-line `{Name: value,Other: value}` dump.
///
/// Absent fields are skipped, so the separator is only written between two
/// present fields.
pub struct FieldWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl<'a, 'b> FieldWriter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Result<Self, fmt::Error> {
        f.write_str("{")?;
        Ok(Self { f, first: true })
    }

    pub fn field<T: FieldValue + ?Sized>(&mut self, name: &str, value: Option<&T>) -> fmt::Result {
        let Some(value) = value else {
            return Ok(());
        };
        if !self.first {
            self.f.write_str(",")?;
        }
        self.first = false;
        self.f.write_str(name)?;
        self.f.write_str(": ")?;
        value.fmt_field(self.f)
    }

    pub fn finish(self) -> fmt::Result {
        self.f.write_str("}")
    }
}

/// Declare a value object.
///
/// Each field is introduced by its kind:
///
/// - `value name: T` - scalar or nested value object, stored as `Option<T>`
/// - `list name: T` - ordered sequence, stored as `Option<Vec<T>>`
/// - `token name: E` - enumerated string, stored as `Option<String>`; `E` is a
///   [`string_enum!`](crate::string_enum) type used for the typed setter and
///   parse-back getter only
///
/// Wire and display names are the PascalCase form of the field name.
///
/// ```ignore
/// value_object! {
///     /// A key/value filter.
///     pub struct Filter {
///         value name: String,
///         list values: String,
///     }
/// }
///
/// let filter = Filter::new().with_name("vpc-id").append_values(["vpc-1"]);
/// assert_eq!(filter.to_string(), "{Name: vpc-id,Values: [vpc-1]}");
/// ```
///
/// Serde is reached through this crate, so callers need no `serde`
/// dependency of their own; the dependency must keep the name
/// `cloudmodel_core`.
#[macro_export]
macro_rules! value_object {
    (@munch $hdr:tt [$($done:tt)*]
        $(#[$fmeta:meta])* list $field:ident : $ty:ty $(, $($rest:tt)*)?
    ) => {
        $crate::value_object!(@munch $hdr [$($done)*
            [[$(#[$fmeta])*] $field (::std::option::Option<::std::vec::Vec<$ty>>) list $ty]
        ] $($($rest)*)?);
    };
    (@munch $hdr:tt [$($done:tt)*]
        $(#[$fmeta:meta])* token $field:ident : $ty:ty $(, $($rest:tt)*)?
    ) => {
        $crate::value_object!(@munch $hdr [$($done)*
            [[$(#[$fmeta])*] $field (::std::option::Option<::std::string::String>) token $ty]
        ] $($($rest)*)?);
    };
    (@munch $hdr:tt [$($done:tt)*]
        $(#[$fmeta:meta])* value $field:ident : $ty:ty $(, $($rest:tt)*)?
    ) => {
        $crate::value_object!(@munch $hdr [$($done)*
            [[$(#[$fmeta])*] $field (::std::option::Option<$ty>) value $ty]
        ] $($($rest)*)?);
    };
    (@munch [$(#[$meta:meta])* $vis:vis struct $name:ident]
        [$([[$(#[$fmeta:meta])*] $field:ident ($storage:ty) $kind:ident $ty:ty])*]
    ) => {
        $crate::macro_support::paste::paste! {
            $(#[$meta])*
            #[derive(
                Debug,
                Clone,
                Default,
                PartialEq,
                $crate::macro_support::serde::Serialize,
                $crate::macro_support::serde::Deserialize,
            )]
            #[serde(crate = "cloudmodel_core::macro_support::serde", rename_all = "PascalCase")]
            $vis struct $name {
                $(
                    $(#[$fmeta])*
                    #[serde(default, skip_serializing_if = "Option::is_none")]
                    $field: $storage,
                )*
            }

            #[allow(dead_code)]
            impl $name {
                /// Create a value with every field absent.
                pub fn new() -> Self {
                    Self::default()
                }

                $( $crate::__value_object_accessors!($kind $field $ty); )*
            }

            impl $crate::ValueObject for $name {
                const TYPE_NAME: &'static str = stringify!($name);

                fn field_names() -> &'static [&'static str] {
                    &[$($crate::__field_label!([<$field:camel>])),*]
                }

                #[allow(unused_mut)]
                fn present_fields(&self) -> ::std::vec::Vec<&'static str> {
                    let mut present = ::std::vec::Vec::new();
                    $(
                        if self.$field.is_some() {
                            present.push($crate::__field_label!([<$field:camel>]));
                        }
                    )*
                    present
                }
            }

            impl $crate::FieldValue for $name {
                #[allow(unused_mut)]
                fn field_hash(&self) -> i32 {
                    let mut hash = $crate::value_object::HASH_SEED;
                    $(
                        hash = $crate::value_object::fold_hash(
                            hash,
                            $crate::FieldValue::field_hash(&self.$field),
                        );
                    )*
                    hash
                }

                fn fmt_field(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    ::std::fmt::Display::fmt(self, f)
                }
            }

            impl ::std::fmt::Display for $name {
                #[allow(unused_mut)]
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    let mut out = $crate::value_object::FieldWriter::new(f)?;
                    $( out.field($crate::__field_label!([<$field:camel>]), self.$field.as_ref())?; )*
                    out.finish()
                }
            }

            impl ::std::hash::Hash for $name {
                fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                    state.write_i32($crate::FieldValue::field_hash(self));
                }
            }

            impl ::std::convert::From<&$name> for $name {
                fn from(value: &$name) -> Self {
                    value.clone()
                }
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($body:tt)* }
    ) => {
        $crate::value_object!(@munch [$(#[$meta])* $vis struct $name] [] $($body)*);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __value_object_accessors {
    (value $field:ident $ty:ty) => {
        $crate::macro_support::paste::paste! {
            pub fn $field(&self) -> ::std::option::Option<&$ty> {
                self.$field.as_ref()
            }

            /// `None` clears the field.
            pub fn [<set_ $field>](&mut self, value: ::std::option::Option<$ty>) {
                self.$field = value;
            }

            pub fn [<with_ $field>](mut self, value: impl ::std::convert::Into<$ty>) -> Self {
                self.$field = ::std::option::Option::Some(value.into());
                self
            }
        }
    };
    (list $field:ident $ty:ty) => {
        $crate::macro_support::paste::paste! {
            /// Borrowed view of the stored sequence; `to_vec()` for an owned copy.
            pub fn $field(&self) -> ::std::option::Option<&[$ty]> {
                self.$field.as_deref()
            }

            /// Copies `values` into a new sequence; `None` makes the field absent.
            pub fn [<set_ $field>]<I>(&mut self, values: ::std::option::Option<I>)
            where
                I: ::std::iter::IntoIterator,
                I::Item: ::std::convert::Into<$ty>,
            {
                self.$field = $crate::sequence::copy_in(values);
            }

            /// Replaces the sequence with a copy of `values`.
            pub fn [<with_ $field>]<I>(mut self, values: I) -> Self
            where
                I: ::std::iter::IntoIterator,
                I::Item: ::std::convert::Into<$ty>,
            {
                self.$field = $crate::sequence::copy_in(::std::option::Option::Some(values));
                self
            }

            /// Appends `values`, creating the sequence first if it is absent.
            pub fn [<append_ $field>]<I>(mut self, values: I) -> Self
            where
                I: ::std::iter::IntoIterator,
                I::Item: ::std::convert::Into<$ty>,
            {
                $crate::sequence::append(&mut self.$field, values);
                self
            }

            pub fn [<push_ $field>](&mut self, value: impl ::std::convert::Into<$ty>) {
                $crate::sequence::append(&mut self.$field, ::std::iter::once(value.into()));
            }
        }
    };
    (token $field:ident $ty:ty) => {
        $crate::macro_support::paste::paste! {
            pub fn $field(&self) -> ::std::option::Option<&str> {
                self.$field.as_deref()
            }

            /// Typed view of the stored string; `None` when absent or unknown.
            pub fn [<$field _token>](&self) -> ::std::option::Option<$ty> {
                $crate::token::parse_known::<$ty>(self.$field.as_deref())
            }

            /// Stores any string, known to this build or not.
            pub fn [<set_ $field>](&mut self, value: ::std::option::Option<::std::string::String>) {
                self.$field = value;
            }

            /// Stores the token's canonical wire string.
            pub fn [<set_ $field _token>](&mut self, token: $ty) {
                self.$field = ::std::option::Option::Some(
                    ::std::string::String::from($crate::EnumToken::as_str(&token)),
                );
            }

            pub fn [<with_ $field>](
                mut self,
                value: impl ::std::convert::Into<::std::string::String>,
            ) -> Self {
                self.$field = ::std::option::Option::Some(value.into());
                self
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_label {
    ($label:ident) => {
        stringify!($label)
    };
}
