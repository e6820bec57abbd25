//! EBS volumes.

use chrono::{DateTime, Utc};

use cloudmodel_core::{string_enum, value_object};
use cloudmodel_service::service_request;

use crate::common::{Tag, TagSpecification};

string_enum! {
    pub enum VolumeType {
        Standard => "standard",
        Io1 => "io1",
        Io2 => "io2",
        Gp2 => "gp2",
        Gp3 => "gp3",
        Sc1 => "sc1",
        St1 => "st1",
    }
}

string_enum! {
    pub enum VolumeState {
        Creating => "creating",
        Available => "available",
        InUse => "in-use",
        Deleting => "deleting",
        Deleted => "deleted",
        Error => "error",
    }
}

string_enum! {
    pub enum VolumeAttachmentState {
        Attaching => "attaching",
        Attached => "attached",
        Detaching => "detaching",
        Detached => "detached",
        Busy => "busy",
    }
}

value_object! {
    pub struct VolumeAttachment {
        value attach_time: DateTime<Utc>,
        value device: String,
        value instance_id: String,
        token state: VolumeAttachmentState,
        value volume_id: String,
        value delete_on_termination: bool,
    }
}

value_object! {
    /// Creates a volume in one availability zone.
    ///
    /// `size` is in GiB. `iops` only applies to `io1`, `io2` and `gp3`;
    /// `throughput` (MiB/s) only to `gp3`.
    pub struct CreateVolumeRequest {
        value availability_zone: String,
        value encrypted: bool,
        value iops: i32,
        value kms_key_id: String,
        value outpost_arn: String,
        value size: i32,
        value snapshot_id: String,
        token volume_type: VolumeType,
        value dry_run: bool,
        list tag_specifications: TagSpecification,
        value multi_attach_enabled: bool,
        value throughput: i32,
        value client_token: String,
    }
}

value_object! {
    pub struct Volume {
        list attachments: VolumeAttachment,
        value availability_zone: String,
        value create_time: DateTime<Utc>,
        value encrypted: bool,
        value kms_key_id: String,
        value size: i32,
        value snapshot_id: String,
        token state: VolumeState,
        value volume_id: String,
        value iops: i32,
        list tags: Tag,
        token volume_type: VolumeType,
        value multi_attach_enabled: bool,
        value throughput: i32,
    }
}

service_request!(
    CreateVolumeRequest => Volume,
    action = "CreateVolume",
    dry_run,
    client_token,
);

impl Volume {
    /// Attached to at least one instance.
    pub fn is_attached(&self) -> bool {
        self.attachments()
            .unwrap_or_default()
            .iter()
            .any(|attachment| {
                attachment.state_token() == Some(VolumeAttachmentState::Attached)
            })
    }
}
