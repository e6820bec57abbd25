//! Security groups and their rules.

use cloudmodel_core::value_object;
use cloudmodel_service::service_request;

use crate::common::{Filter, Tag, TagSpecification};

value_object! {
    pub struct IpRange {
        value cidr_ip: String,
        value description: String,
    }
}

value_object! {
    pub struct Ipv6Range {
        value cidr_ipv6: String,
        value description: String,
    }
}

value_object! {
    /// Another security group (possibly in a peered VPC or another account)
    /// referenced from a rule.
    pub struct UserIdGroupPair {
        value description: String,
        value group_id: String,
        value group_name: String,
        value user_id: String,
        value vpc_id: String,
        value vpc_peering_connection_id: String,
    }
}

value_object! {
    /// One rule: protocol, port range and the sources/destinations it allows.
    ///
    /// `ip_protocol` is `"-1"` for all protocols, in which case the port range
    /// is ignored by the service.
    pub struct IpPermission {
        value from_port: i32,
        value ip_protocol: String,
        list ip_ranges: IpRange,
        list ipv6_ranges: Ipv6Range,
        value to_port: i32,
        list user_id_group_pairs: UserIdGroupPair,
    }
}

value_object! {
    pub struct SecurityGroup {
        value description: String,
        value group_name: String,
        list ip_permissions: IpPermission,
        value owner_id: String,
        value group_id: String,
        list ip_permissions_egress: IpPermission,
        list tags: Tag,
        value vpc_id: String,
    }
}

value_object! {
    /// Rule as returned by rule-level APIs, with its own identifier.
    pub struct SecurityGroupRule {
        value security_group_rule_id: String,
        value group_id: String,
        value group_owner_id: String,
        value is_egress: bool,
        value ip_protocol: String,
        value from_port: i32,
        value to_port: i32,
        value cidr_ipv4: String,
        value cidr_ipv6: String,
        value description: String,
        list tags: Tag,
    }
}

value_object! {
    pub struct DescribeSecurityGroupsRequest {
        list filters: Filter,
        list group_ids: String,
        list group_names: String,
        value dry_run: bool,
        value next_token: String,
        value max_results: i32,
    }
}

value_object! {
    pub struct DescribeSecurityGroupsResult {
        list security_groups: SecurityGroup,
        value next_token: String,
    }
}

value_object! {
    /// Adds inbound rules to a group.
    ///
    /// Either the flat `cidr_ip`/`ip_protocol`/port fields describe a single
    /// rule, or `ip_permissions` lists several; the service rejects a mix.
    pub struct AuthorizeSecurityGroupIngressRequest {
        value cidr_ip: String,
        value from_port: i32,
        value group_id: String,
        value group_name: String,
        list ip_permissions: IpPermission,
        value ip_protocol: String,
        value source_security_group_name: String,
        value source_security_group_owner_id: String,
        value to_port: i32,
        list tag_specifications: TagSpecification,
        value dry_run: bool,
    }
}

value_object! {
    /// The service's `Return` flag is not modelled; a failed call comes
    /// back as an error instead.
    pub struct AuthorizeSecurityGroupIngressResult {
        list security_group_rules: SecurityGroupRule,
    }
}

service_request!(
    DescribeSecurityGroupsRequest => DescribeSecurityGroupsResult,
    action = "DescribeSecurityGroups",
    dry_run,
);

service_request!(
    AuthorizeSecurityGroupIngressRequest => AuthorizeSecurityGroupIngressResult,
    action = "AuthorizeSecurityGroupIngress",
    dry_run,
);

impl IpPermission {
    /// TCP rule for a single port open to the given CIDR blocks.
    pub fn tcp_port<I>(port: i32, cidrs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new()
            .with_ip_protocol("tcp")
            .with_from_port(port)
            .with_to_port(port)
            .with_ip_ranges(cidrs.into_iter().map(|cidr| IpRange::new().with_cidr_ip(cidr)))
    }
}

impl SecurityGroup {
    /// Every CIDR the group admits inbound, across all rules, in rule order.
    pub fn ingress_cidrs(&self) -> Vec<&str> {
        self.ip_permissions()
            .unwrap_or_default()
            .iter()
            .flat_map(|permission| permission.ip_ranges().unwrap_or_default())
            .filter_map(|range| range.cidr_ip().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use cloudmodel_core::{ValueObject, wire};
    use cloudmodel_service::{DryRunSupported, ServiceRequest};
    use serde_json::{Value, json};

    use super::*;

    fn web_group() -> SecurityGroup {
        SecurityGroup::new()
            .with_group_id("sg-0123")
            .with_group_name("web")
            .with_vpc_id("vpc-1")
            .with_ip_permissions([
                IpPermission::tcp_port(443, ["0.0.0.0/0"]),
                IpPermission::tcp_port(22, ["10.0.0.0/16", "10.1.0.0/16"]),
            ])
    }

    #[test]
    fn describe_request_display_omits_absent_fields() {
        let request = DescribeSecurityGroupsRequest::new()
            .with_group_ids(["sg-0123"])
            .append_filters([Filter::on("vpc-id", ["vpc-1"])])
            .with_max_results(50);

        assert_eq!(
            request.to_string(),
            "{Filters: [{Name: vpc-id,Values: [vpc-1]}],GroupIds: [sg-0123],MaxResults: 50}"
        );
    }

    #[test]
    fn describe_request_is_bound_to_its_result() {
        assert_eq!(DescribeSecurityGroupsRequest::ACTION, "DescribeSecurityGroups");
        let response = <DescribeSecurityGroupsRequest as ServiceRequest>::Response::new();
        assert_eq!(response.security_groups(), None);
    }

    #[test]
    fn ingress_cidrs_flatten_rules_in_order() {
        assert_eq!(
            web_group().ingress_cidrs(),
            vec!["0.0.0.0/0", "10.0.0.0/16", "10.1.0.0/16"]
        );
        assert!(SecurityGroup::new().ingress_cidrs().is_empty());
    }

    #[test]
    fn nested_rules_change_equality_and_hash() {
        let base = web_group();
        let mut widened = base.clone();
        widened.push_ip_permissions(IpPermission::tcp_port(80, ["0.0.0.0/0"]));

        assert_ne!(base, widened);
        assert_ne!(base.hash_code(), widened.hash_code());
    }

    #[test]
    fn group_marshals_to_pascal_case_wire_names() {
        let fields = wire::to_fields(&web_group()).unwrap();
        let permissions = fields.get("IpPermissions").unwrap();
        assert_eq!(
            permissions[1],
            json!({
                "FromPort": 22,
                "IpProtocol": "tcp",
                "IpRanges": [{ "CidrIp": "10.0.0.0/16" }, { "CidrIp": "10.1.0.0/16" }],
                "ToPort": 22
            })
        );
        assert_eq!(fields.get("GroupId"), Some(&Value::String("sg-0123".into())));
        assert!(!fields.contains_key("Tags"));
    }

    #[test]
    fn authorize_result_reads_rules_and_ignores_return_flag() {
        let fields = match json!({
            "Return": true,
            "SecurityGroupRules": [{ "SecurityGroupRuleId": "sgr-1", "IsEgress": false, "CidrIpv4": "10.0.0.0/16" }]
        }) {
            Value::Object(fields) => fields,
            _ => unreachable!(),
        };
        let result: AuthorizeSecurityGroupIngressResult = wire::from_fields(fields).unwrap();

        assert_eq!(result.present_fields(), vec!["SecurityGroupRules"]);
        let rules = result.security_group_rules().unwrap();
        assert_eq!(rules[0].cidr_ipv4().map(String::as_str), Some("10.0.0.0/16"));
        assert_eq!(rules[0].is_egress(), Some(&false));
    }

    #[test]
    fn authorize_dry_run_keeps_rule_fields() {
        let request = AuthorizeSecurityGroupIngressRequest::new()
            .with_group_id("sg-0123")
            .with_ip_permissions([IpPermission::tcp_port(22, ["10.0.0.0/16"])]);

        let fields = request.dry_run_fields().unwrap();
        assert_eq!(fields.get("DryRun"), Some(&Value::Bool(true)));
        assert_eq!(fields.get("GroupId"), Some(&Value::String("sg-0123".into())));
        assert_eq!(request.dry_run(), None);
    }
}
