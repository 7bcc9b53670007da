use serde::{Deserialize, Serialize};

use super::ObjectRef;

/// Cabling is a wall jack in a room and where its cable ends up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cabling {
    pub id: Option<i64>,
    pub room: String,
    pub jack: String,
    pub building: Option<String>,
    pub target_room: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Patch connects a netbox interface to a cabling jack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub id: Option<i64>,
    pub interface: ObjectRef,
    pub cabling: ObjectRef,
    pub split: String,
}
