//! `cloudmodel-ec2`: EC2 request/response value objects.
//!
//! Every type here is declared with `value_object!` and gets the shared
//! contract from `cloudmodel-core`. Request types are bound to their action
//! and response type with `service_request!`.

pub mod common;
pub mod flow_log;
pub mod instance;
pub mod network_interface;
pub mod security_group;
pub mod volume;

pub use common::{Filter, GroupIdentifier, ResourceType, Tag, TagSpecification};
pub use flow_log::{
    CreateFlowLogsRequest, CreateFlowLogsResult, FlowLogsResourceType, LogDestinationType,
    TrafficType, UnsuccessfulItem, UnsuccessfulItemError,
};
pub use instance::{
    DescribeInstancesRequest, DescribeInstancesResult, Instance, InstanceState,
    InstanceStateName, InstanceType, Placement, Reservation, Tenancy,
};
pub use network_interface::{
    DescribeNetworkInterfacesRequest, DescribeNetworkInterfacesResult, NetworkInterface,
    NetworkInterfacePrivateIpAddress, NetworkInterfaceStatus, NetworkInterfaceType,
};
pub use security_group::{
    AuthorizeSecurityGroupIngressRequest, AuthorizeSecurityGroupIngressResult,
    DescribeSecurityGroupsRequest, DescribeSecurityGroupsResult, IpPermission, IpRange,
    Ipv6Range, SecurityGroup, SecurityGroupRule, UserIdGroupPair,
};
pub use volume::{
    CreateVolumeRequest, Volume, VolumeAttachment, VolumeAttachmentState, VolumeState,
    VolumeType,
};
