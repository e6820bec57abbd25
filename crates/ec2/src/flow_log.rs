//! VPC flow logs.

use cloudmodel_core::{string_enum, value_object};
use cloudmodel_service::service_request;

use crate::common::TagSpecification;

string_enum! {
    pub enum FlowLogsResourceType {
        Vpc => "VPC",
        Subnet => "Subnet",
        NetworkInterface => "NetworkInterface",
    }
}

string_enum! {
    pub enum TrafficType {
        Accept => "ACCEPT",
        Reject => "REJECT",
        All => "ALL",
    }
}

string_enum! {
    pub enum LogDestinationType {
        CloudWatchLogs => "cloud-watch-logs",
        S3 => "s3",
        KinesisDataFirehose => "kinesis-data-firehose",
    }
}

value_object! {
    /// Publishes IP traffic records for VPCs, subnets or interfaces.
    ///
    /// `max_aggregation_interval` is in seconds (60 or 600).
    pub struct CreateFlowLogsRequest {
        value dry_run: bool,
        value client_token: String,
        value deliver_logs_permission_arn: String,
        value log_group_name: String,
        list resource_ids: String,
        token resource_type: FlowLogsResourceType,
        token traffic_type: TrafficType,
        token log_destination_type: LogDestinationType,
        value log_destination: String,
        value log_format: String,
        list tag_specifications: TagSpecification,
        value max_aggregation_interval: i32,
    }
}

value_object! {
    pub struct UnsuccessfulItemError {
        value code: String,
        value message: String,
    }
}

value_object! {
    /// A resource the service could not create a flow log for.
    pub struct UnsuccessfulItem {
        value error: UnsuccessfulItemError,
        value resource_id: String,
    }
}

value_object! {
    pub struct CreateFlowLogsResult {
        value client_token: String,
        list flow_log_ids: String,
        list unsuccessful: UnsuccessfulItem,
    }
}

service_request!(
    CreateFlowLogsRequest => CreateFlowLogsResult,
    action = "CreateFlowLogs",
    dry_run,
    client_token,
);

impl CreateFlowLogsResult {
    /// Ids of resources that were rejected, in payload order.
    pub fn failed_resource_ids(&self) -> Vec<&str> {
        self.unsuccessful()
            .unwrap_or_default()
            .iter()
            .filter_map(|item| item.resource_id().map(String::as_str))
            .collect()
    }
}
