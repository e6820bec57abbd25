//! Enumerated-string fields.
//!
//! Many fields take their values from a documented closed set (states,
//! strategies, volume types). The set grows on the service side over time, so
//! the field itself is always a `String`: stored, compared, hashed and sent as
//! a string. A token type declared with [`string_enum!`](crate::string_enum)
//! only names the values this build knows about.
//!
//! Nothing here rejects an unknown string at set time. [`is_known`] exists for
//! documentation and code generation; a value the service added after this
//! build was compiled must still round-trip unchanged.

use core::fmt;
use core::str::FromStr;

use crate::error::ModelError;

/// A closed-set token with a canonical wire string per value.
pub trait EnumToken:
    Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = ModelError> + Into<String> + 'static
{
    /// Name of the token type, used in error messages.
    const KIND: &'static str;

    /// Canonical wire string.
    fn as_str(&self) -> &'static str;

    /// Every value known to this build, in declaration order.
    fn values() -> &'static [Self];
}

/// Whether `value` is one of the wire strings `E` knows about.
pub fn is_known<E: EnumToken>(value: &str) -> bool {
    E::values().iter().any(|token| token.as_str() == value)
}

/// Typed view of an optional stored string.
///
/// `None` when the field is absent or holds a value this build does not know.
pub fn parse_known<E: EnumToken>(value: Option<&str>) -> Option<E> {
    value.and_then(|value| value.parse().ok())
}

/// Declare a closed-set token type.
///
/// ```ignore
/// string_enum! {
///     pub enum VolumeType {
///         Standard => "standard",
///         Gp3 => "gp3",
///     }
/// }
///
/// assert_eq!(VolumeType::Gp3.to_string(), "gp3");
/// assert_eq!("gp3".parse::<VolumeType>(), Ok(VolumeType::Gp3));
/// ```
///
/// Like [`value_object!`](crate::value_object), serde is reached through
/// this crate.
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            $crate::macro_support::serde::Serialize,
            $crate::macro_support::serde::Deserialize,
        )]
        #[serde(crate = "cloudmodel_core::macro_support::serde")]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $crate::EnumToken for $name {
            const KIND: &'static str = stringify!($name);

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            fn values() -> &'static [Self] {
                &[$( $name::$variant ),+]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::EnumToken::as_str(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::ModelError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $( $wire => ::std::result::Result::Ok($name::$variant), )+
                    other => ::std::result::Result::Err($crate::ModelError::unknown_token(
                        <$name as $crate::EnumToken>::KIND,
                        other,
                    )),
                }
            }
        }

        impl ::std::convert::From<$name> for ::std::string::String {
            fn from(token: $name) -> Self {
                ::std::string::String::from($crate::EnumToken::as_str(&token))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::string_enum! {
        enum Tenancy {
            Default => "default",
            Dedicated => "dedicated",
            Host => "host",
        }
    }

    #[test]
    fn tokens_render_their_wire_string() {
        assert_eq!(Tenancy::Dedicated.to_string(), "dedicated");
        assert_eq!(Tenancy::Host.as_str(), "host");
        assert_eq!(String::from(Tenancy::Default), "default");
    }

    #[test]
    fn values_follow_declaration_order() {
        assert_eq!(
            Tenancy::values(),
            &[Tenancy::Default, Tenancy::Dedicated, Tenancy::Host]
        );
        assert_eq!(Tenancy::KIND, "Tenancy");
    }

    #[test]
    fn parse_accepts_known_and_reports_unknown() {
        assert_eq!("host".parse::<Tenancy>(), Ok(Tenancy::Host));
        assert_eq!(
            "Host".parse::<Tenancy>(),
            Err(ModelError::unknown_token("Tenancy", "Host"))
        );
    }

    #[test]
    fn is_known_is_advisory() {
        assert!(is_known::<Tenancy>("dedicated"));
        assert!(!is_known::<Tenancy>("shared-2031"));
    }

    #[test]
    fn parse_known_maps_absent_and_unknown_to_none() {
        assert_eq!(parse_known::<Tenancy>(Some("default")), Some(Tenancy::Default));
        assert_eq!(parse_known::<Tenancy>(Some("shared-2031")), None);
        assert_eq!(parse_known::<Tenancy>(None), None);
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&Tenancy::Dedicated).unwrap();
        assert_eq!(json, "\"dedicated\"");
        let back: Tenancy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Tenancy::Dedicated);
    }

    #[test]
    fn every_token_round_trips_through_its_string() {
        for token in Tenancy::values() {
            assert_eq!(token.as_str().parse::<Tenancy>(), Ok(*token));
        }
    }
}
