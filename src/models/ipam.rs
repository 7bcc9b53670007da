use serde::{Deserialize, Serialize};

use super::ObjectRef;

/// Network type of a vlan (lan, link, core, ...). Shipped as reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetType {
    pub id: String,
    pub description: Option<String>,
}

/// Usage category of a vlan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub id: String,
    pub description: String,
}

/// Vlan rows are shared between prefixes and are never created twice
/// for the same (vlan, net_type, organization, net_ident, usage, description)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vlan {
    pub id: Option<i64>,
    pub vlan: Option<i32>,
    pub net_type: String,
    pub organization: Option<String>,
    pub net_ident: Option<String>,
    pub usage: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefix {
    pub id: Option<i64>,
    pub net_address: String,
    pub vlan: ObjectRef,
}
