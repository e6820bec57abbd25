//! Instances and reservations.

use chrono::{DateTime, Utc};

use cloudmodel_core::{string_enum, value_object};
use cloudmodel_service::service_request;

use crate::common::{Filter, GroupIdentifier, Tag};

string_enum! {
    pub enum InstanceStateName {
        Pending => "pending",
        Running => "running",
        ShuttingDown => "shutting-down",
        Terminated => "terminated",
        Stopping => "stopping",
        Stopped => "stopped",
    }
}

string_enum! {
    /// Instance types this build names. The service offers many more; any
    /// string is accepted in the field itself.
    pub enum InstanceType {
        T3Micro => "t3.micro",
        T3Small => "t3.small",
        T3Medium => "t3.medium",
        M5Large => "m5.large",
        M5Xlarge => "m5.xlarge",
        C5Large => "c5.large",
        R5Large => "r5.large",
    }
}

string_enum! {
    pub enum Tenancy {
        Default => "default",
        Dedicated => "dedicated",
        Host => "host",
    }
}

value_object! {
    /// Lifecycle state. `code` is the service's numeric form of `name`
    /// (the low byte: 0 pending, 16 running, 48 terminated, 80 stopped).
    pub struct InstanceState {
        value code: i32,
        token name: InstanceStateName,
    }
}

value_object! {
    pub struct Placement {
        value availability_zone: String,
        value group_name: String,
        token tenancy: Tenancy,
    }
}

value_object! {
    pub struct Instance {
        value ami_launch_index: i32,
        value image_id: String,
        value instance_id: String,
        token instance_type: InstanceType,
        value key_name: String,
        value launch_time: DateTime<Utc>,
        value placement: Placement,
        value private_ip_address: String,
        value public_ip_address: String,
        value state: InstanceState,
        value subnet_id: String,
        value vpc_id: String,
        value ebs_optimized: bool,
        list security_groups: GroupIdentifier,
        list tags: Tag,
    }
}

value_object! {
    /// Instances launched together by one request.
    pub struct Reservation {
        list groups: GroupIdentifier,
        list instances: Instance,
        value owner_id: String,
        value requester_id: String,
        value reservation_id: String,
    }
}

value_object! {
    pub struct DescribeInstancesRequest {
        list filters: Filter,
        list instance_ids: String,
        value dry_run: bool,
        value max_results: i32,
        value next_token: String,
    }
}

value_object! {
    pub struct DescribeInstancesResult {
        list reservations: Reservation,
        value next_token: String,
    }
}

service_request!(
    DescribeInstancesRequest => DescribeInstancesResult,
    action = "DescribeInstances",
    dry_run,
);

impl Instance {
    /// Typed lifecycle state; `None` when absent or not known to this build.
    pub fn state_name(&self) -> Option<InstanceStateName> {
        self.state().and_then(InstanceState::name_token)
    }

    /// Value of the tag with `key`, if present.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags()?
            .iter()
            .find(|tag| tag.key().is_some_and(|k| k == key))
            .and_then(|tag| tag.value().map(String::as_str))
    }
}

impl DescribeInstancesResult {
    /// Instances of every reservation in the page, in payload order.
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.reservations()
            .unwrap_or_default()
            .iter()
            .flat_map(|reservation| reservation.instances().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use cloudmodel_core::{ValueObject, wire};

    use super::*;

    fn payload() -> Value {
        json!({
            "Reservations": [
                {
                    "ReservationId": "r-1",
                    "OwnerId": "123456789012",
                    "Instances": [
                        {
                            "InstanceId": "i-1",
                            "InstanceType": "t3.micro",
                            "LaunchTime": "2024-05-01T12:00:00Z",
                            "State": { "Code": 16, "Name": "running" },
                            "Tags": [{ "Key": "Name", "Value": "web-1" }]
                        },
                        {
                            "InstanceId": "i-2",
                            "InstanceType": "x9.hyper",
                            "State": { "Code": 80, "Name": "stopped" }
                        }
                    ]
                }
            ],
            "NextToken": "page-2"
        })
    }

    fn result() -> DescribeInstancesResult {
        match payload() {
            Value::Object(fields) => wire::from_fields(fields).unwrap(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn response_payload_fills_nested_values() {
        let result = result();
        let instances: Vec<&Instance> = result.instances().collect();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].state_name(), Some(InstanceStateName::Running));
        assert_eq!(instances[0].tag("Name"), Some("web-1"));
        assert_eq!(
            instances[0].launch_time(),
            Some(&Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(result.next_token().map(String::as_str), Some("page-2"));
    }

    #[test]
    fn unknown_instance_type_round_trips() {
        let result = result();
        let second = result.instances().nth(1).unwrap();

        assert_eq!(second.instance_type(), Some("x9.hyper"));
        assert_eq!(second.instance_type_token(), None);

        let fields = wire::to_fields(second).unwrap();
        assert_eq!(fields.get("InstanceType"), Some(&Value::String("x9.hyper".into())));
    }

    #[test]
    fn instance_display_uses_rfc3339_millis() {
        let instance = Instance::new()
            .with_instance_id("i-1")
            .with_launch_time(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
            .with_state(InstanceState::new().with_code(16).with_name(InstanceStateName::Running));

        assert_eq!(
            instance.to_string(),
            "{InstanceId: i-1,LaunchTime: 2024-05-01T12:00:00.000Z,State: {Code: 16,Name: running}}"
        );
    }

    #[test]
    fn missing_tag_and_missing_state_are_none() {
        let instance = Instance::new().with_tags([Tag::pair("env", "dev")]);
        assert_eq!(instance.tag("Name"), None);
        assert_eq!(instance.state_name(), None);
        assert_eq!(Instance::new().tag("env"), None);
    }

    #[test]
    fn empty_result_has_no_instances() {
        assert_eq!(DescribeInstancesResult::new().instances().count(), 0);
        let empty_page = DescribeInstancesResult::new().with_reservations(Vec::<Reservation>::new());
        assert_eq!(empty_page.instances().count(), 0);
        assert_ne!(empty_page, DescribeInstancesResult::new());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: instance ids listed in a request survive the wire boundary in order.
            #[test]
            fn instance_ids_round_trip_in_order(ids in proptest::collection::vec("i-[0-9a-f]{8}", 0..6)) {
                let request = DescribeInstancesRequest::new().with_instance_ids(ids.clone());
                let back: DescribeInstancesRequest =
                    wire::from_fields(wire::to_fields(&request).unwrap()).unwrap();

                prop_assert_eq!(back.instance_ids().map(<[String]>::to_vec), Some(ids));
                prop_assert_eq!(back.hash_code(), request.hash_code());
            }
        }
    }
}
