//! Elastic network interfaces.

use cloudmodel_core::{string_enum, value_object};
use cloudmodel_service::service_request;

use crate::common::{Filter, GroupIdentifier, Tag};

string_enum! {
    pub enum NetworkInterfaceStatus {
        Available => "available",
        Associated => "associated",
        Attaching => "attaching",
        InUse => "in-use",
        Detaching => "detaching",
    }
}

string_enum! {
    pub enum NetworkInterfaceType {
        Interface => "interface",
        NatGateway => "natGateway",
        Efa => "efa",
        Trunk => "trunk",
        Lambda => "lambda",
    }
}

value_object! {
    pub struct NetworkInterfacePrivateIpAddress {
        value primary: bool,
        value private_dns_name: String,
        value private_ip_address: String,
    }
}

value_object! {
    pub struct NetworkInterface {
        value availability_zone: String,
        value description: String,
        list groups: GroupIdentifier,
        token interface_type: NetworkInterfaceType,
        value mac_address: String,
        value network_interface_id: String,
        value owner_id: String,
        value private_dns_name: String,
        value private_ip_address: String,
        list private_ip_addresses: NetworkInterfacePrivateIpAddress,
        value requester_managed: bool,
        value source_dest_check: bool,
        token status: NetworkInterfaceStatus,
        value subnet_id: String,
        list tag_set: Tag,
        value vpc_id: String,
    }
}

value_object! {
    /// Lists interfaces, optionally narrowed by id or filter.
    ///
    /// `network_interface_ids` and `filters` start absent; an empty list is
    /// still sent as an empty list.
    pub struct DescribeNetworkInterfacesRequest {
        list filters: Filter,
        value dry_run: bool,
        list network_interface_ids: String,
        value next_token: String,
        value max_results: i32,
    }
}

value_object! {
    pub struct DescribeNetworkInterfacesResult {
        list network_interfaces: NetworkInterface,
        value next_token: String,
    }
}

service_request!(
    DescribeNetworkInterfacesRequest => DescribeNetworkInterfacesResult,
    action = "DescribeNetworkInterfaces",
    dry_run,
);

impl NetworkInterface {
    /// Every private address, primary first when the payload marks one.
    pub fn private_addresses(&self) -> Vec<&str> {
        let mut addresses: Vec<&NetworkInterfacePrivateIpAddress> =
            self.private_ip_addresses().unwrap_or_default().iter().collect();
        // Stable: non-primary addresses keep payload order.
        addresses.sort_by_key(|address| address.primary() != Some(&true));
        addresses
            .into_iter()
            .filter_map(|address| address.private_ip_address().map(String::as_str))
            .collect()
    }
}
