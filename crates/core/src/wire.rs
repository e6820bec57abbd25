//! Boundary to the wire marshaller.
//!
//! The marshaller itself (query strings, XML, JSON bodies) lives outside this
//! crate. What it needs from a value object is the set of present fields by
//! wire name, and the reverse: a fresh value with every field the payload
//! carried and nothing else.
//!
//! - absent fields are omitted
//! - a present empty sequence is kept as an empty array
//! - unknown wire fields are ignored, so newer service payloads still load
//! - enumerated strings travel as plain strings, known or not

use serde_json::{Map, Value};

use crate::error::{ModelError, ModelResult};
use crate::value_object::ValueObject;

/// Wire name to wire value, for the present fields of one value object.
pub type WireFields = Map<String, Value>;

/// Read every present field of `value`.
pub fn to_fields<T: ValueObject>(value: &T) -> ModelResult<WireFields> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => {
            tracing::debug!(
                type_name = T::TYPE_NAME,
                fields = fields.len(),
                "read wire fields"
            );
            Ok(fields)
        }
        other => Err(ModelError::wire(format!(
            "{} did not produce a field map: {other}",
            T::TYPE_NAME
        ))),
    }
}

/// Build a value from wire fields, leaving missing fields absent.
pub fn from_fields<T: ValueObject>(fields: WireFields) -> ModelResult<T> {
    let count = fields.len();
    let value: T = serde_json::from_value(Value::Object(fields))?;
    tracing::debug!(
        type_name = T::TYPE_NAME,
        fields = count,
        present = value.present_fields().len(),
        "wrote wire fields"
    );
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    crate::string_enum! {
        #[allow(dead_code)]
        enum Protocol {
            Tcp => "tcp",
            Udp => "udp",
        }
    }

    crate::value_object! {
        struct Rule {
            value port: i32,
            token protocol: Protocol,
            list cidr_blocks: String,
            value egress: bool,
        }
    }

    fn object(value: Value) -> WireFields {
        match value {
            Value::Object(fields) => fields,
            _ => panic!("Expected a JSON object"),
        }
    }

    #[test]
    fn to_fields_omits_absent_and_uses_wire_names() {
        let rule = Rule::new().with_port(443).with_cidr_blocks(["10.0.0.0/8"]);
        let fields = to_fields(&rule).unwrap();
        assert_eq!(
            Value::Object(fields),
            json!({ "Port": 443, "CidrBlocks": ["10.0.0.0/8"] })
        );
    }

    #[test]
    fn to_fields_keeps_empty_sequences() {
        let rule = Rule::new().with_cidr_blocks(Vec::<String>::new());
        let fields = to_fields(&rule).unwrap();
        assert_eq!(Value::Object(fields), json!({ "CidrBlocks": [] }));
    }

    #[test]
    fn from_fields_leaves_missing_fields_absent() {
        let rule: Rule = from_fields(object(json!({ "Egress": true }))).unwrap();
        assert_eq!(rule, Rule::new().with_egress(true));
        assert_eq!(rule.present_fields(), vec!["Egress"]);
    }

    #[test]
    fn from_fields_distinguishes_empty_from_missing() {
        let empty: Rule = from_fields(object(json!({ "CidrBlocks": [] }))).unwrap();
        let missing: Rule = from_fields(object(json!({}))).unwrap();
        assert_eq!(empty.cidr_blocks(), Some(&[][..]));
        assert_eq!(missing.cidr_blocks(), None);
        assert_ne!(empty, missing);
    }

    #[test]
    fn from_fields_ignores_unknown_fields() {
        let rule: Rule = from_fields(object(json!({ "Port": 22, "AddedLater": "x" }))).unwrap();
        assert_eq!(rule, Rule::new().with_port(22));
    }

    #[test]
    fn unknown_token_values_round_trip() {
        let rule = Rule::new().with_protocol("icmpv6");
        let fields = to_fields(&rule).unwrap();
        let back: Rule = from_fields(fields).unwrap();
        assert_eq!(back.protocol(), Some("icmpv6"));
        assert_eq!(back.protocol_token(), None);
        assert_eq!(back, rule);
    }

    #[test]
    fn mistyped_field_is_a_wire_error() {
        let err = from_fields::<Rule>(object(json!({ "Port": "not a number" }))).unwrap_err();
        match err {
            ModelError::Wire(_) => {}
            _ => panic!("Expected Wire error"),
        }
    }
}
