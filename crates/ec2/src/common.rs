//! Descriptors shared across EC2 actions.

use cloudmodel_core::{string_enum, value_object};

string_enum! {
    /// Resource kinds accepted by tag specifications.
    pub enum ResourceType {
        Instance => "instance",
        Volume => "volume",
        Snapshot => "snapshot",
        Image => "image",
        SecurityGroup => "security-group",
        NetworkInterface => "network-interface",
        VpcFlowLog => "vpc-flow-log",
    }
}

value_object! {
    /// Name/values filter for describe calls.
    ///
    /// Values within one filter are OR-ed; separate filters are AND-ed by the
    /// service.
    pub struct Filter {
        value name: String,
        list values: String,
    }
}

value_object! {
    pub struct Tag {
        value key: String,
        value value: String,
    }
}

value_object! {
    /// Tags to apply to a resource while it is created.
    pub struct TagSpecification {
        token resource_type: ResourceType,
        list tags: Tag,
    }
}

value_object! {
    /// Security group reference as embedded in instances and interfaces.
    pub struct GroupIdentifier {
        value group_name: String,
        value group_id: String,
    }
}

impl Filter {
    /// Filter on `name` matching any of `values`.
    pub fn on<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new().with_name(name).with_values(values)
    }
}

impl Tag {
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().with_key(key).with_value(value)
    }
}

#[cfg(test)]
mod tests {
    use cloudmodel_core::ValueObject;

    use super::*;

    #[test]
    fn filter_helper_matches_fluent_chain() {
        let helper = Filter::on("vpc-id", ["vpc-1", "vpc-2"]);
        let chained = Filter::new()
            .with_name("vpc-id")
            .append_values(["vpc-1"])
            .append_values(["vpc-2"]);
        assert_eq!(helper, chained);
        assert_eq!(helper.to_string(), "{Name: vpc-id,Values: [vpc-1, vpc-2]}");
    }

    #[test]
    fn tag_value_field_is_a_plain_field() {
        let tag = Tag::pair("env", "prod");
        assert_eq!(tag.value().map(String::as_str), Some("prod"));
        assert_eq!(Tag::field_names(), &["Key", "Value"]);
        assert_eq!(tag.to_string(), "{Key: env,Value: prod}");
    }

    #[test]
    fn tag_specification_accepts_token_or_string() {
        let typed = TagSpecification::new()
            .with_resource_type(ResourceType::SecurityGroup)
            .with_tags([Tag::pair("team", "net")]);
        let raw = TagSpecification::new()
            .with_resource_type("security-group")
            .with_tags([Tag::pair("team", "net")]);

        assert_eq!(typed, raw);
        assert_eq!(typed.hash_code(), raw.hash_code());
        assert_eq!(typed.resource_type_token(), Some(ResourceType::SecurityGroup));
    }

    #[test]
    fn unknown_resource_type_is_kept_verbatim() {
        let spec = TagSpecification::new().with_resource_type("capacity-block-2031");
        assert_eq!(spec.resource_type(), Some("capacity-block-2031"));
        assert_eq!(spec.resource_type_token(), None);
    }
}
