use serde::{Deserialize, Serialize};

use super::ObjectRef;

/// Physical chassis, matched on serial number when one is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<i64>,
    pub serial: Option<String>,
}

/// Netbox is a managed network element (switch, router, server, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Netbox {
    pub id: Option<i64>,
    pub ip: String,
    pub sysname: String,
    pub read_only: Option<String>,
    pub read_write: Option<String>,
    pub snmp_version: i32,
    pub room: String,
    pub organization: String,
    pub category: String,
    pub device: ObjectRef,
}

/// Free-form key/variable/value attached to a netbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetboxInfo {
    pub id: Option<i64>,
    pub netbox: ObjectRef,
    pub key: Option<String>,
    pub variable: String,
    pub value: String,
}

/// Links a netbox to one of its category's subcategories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetboxCategory {
    pub id: Option<i64>,
    pub netbox: ObjectRef,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub optional_1: Option<String>,
    pub optional_2: Option<String>,
    pub optional_3: Option<String>,
    pub optional_4: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub parent: Option<String>,
    pub description: Option<String>,
    pub optional_1: Option<String>,
    pub optional_2: Option<String>,
    pub optional_3: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
}

/// NetboxType identifies a vendor product by its SNMP sysObjectID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetboxType {
    pub id: Option<i64>,
    pub vendor: String,
    pub name: String,
    pub sysobjectid: String,
    pub description: Option<String>,
    pub cdp: bool,
    pub tftp: bool,
}

/// Netbox category (GW, SW, SRV, ...). Shipped as reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub category: String,
    pub description: String,
}

/// Interface on a netbox. Collected from the network, never seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub id: Option<i64>,
    pub netbox: ObjectRef,
    pub ifname: String,
}
