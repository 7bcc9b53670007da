mod cabling;
mod ipam;
mod manage;
mod record;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub use cabling::*;
pub use ipam::*;
pub use manage::*;
pub use record::Record;

/// Every kind of row the inventory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Device,
    Netbox,
    NetboxInfo,
    NetboxCategory,
    Location,
    Room,
    Organization,
    Vendor,
    NetboxType,
    Category,
    Subcategory,
    Interface,
    NetType,
    Usage,
    Vlan,
    Prefix,
    Cabling,
    Patch,
}

impl EntityKind {
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::Device,
        EntityKind::Netbox,
        EntityKind::NetboxInfo,
        EntityKind::NetboxCategory,
        EntityKind::Location,
        EntityKind::Room,
        EntityKind::Organization,
        EntityKind::Vendor,
        EntityKind::NetboxType,
        EntityKind::Category,
        EntityKind::Subcategory,
        EntityKind::Interface,
        EntityKind::NetType,
        EntityKind::Usage,
        EntityKind::Vlan,
        EntityKind::Prefix,
        EntityKind::Cabling,
        EntityKind::Patch,
    ];

    /// Display name used in import error messages
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Device => "Device",
            EntityKind::Netbox => "Netbox",
            EntityKind::NetboxInfo => "NetboxInfo",
            EntityKind::NetboxCategory => "NetboxCategory",
            EntityKind::Location => "Location",
            EntityKind::Room => "Room",
            EntityKind::Organization => "Organization",
            EntityKind::Vendor => "Vendor",
            EntityKind::NetboxType => "NetboxType",
            EntityKind::Category => "Category",
            EntityKind::Subcategory => "Subcategory",
            EntityKind::Interface => "Interface",
            EntityKind::NetType => "NetType",
            EntityKind::Usage => "Usage",
            EntityKind::Vlan => "Vlan",
            EntityKind::Prefix => "Prefix",
            EntityKind::Cabling => "Cabling",
            EntityKind::Patch => "Patch",
        }
    }

    /// Stable tag used as the `kind` column in the database
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Device => "device",
            EntityKind::Netbox => "netbox",
            EntityKind::NetboxInfo => "netbox_info",
            EntityKind::NetboxCategory => "netbox_category",
            EntityKind::Location => "location",
            EntityKind::Room => "room",
            EntityKind::Organization => "organization",
            EntityKind::Vendor => "vendor",
            EntityKind::NetboxType => "netbox_type",
            EntityKind::Category => "category",
            EntityKind::Subcategory => "subcategory",
            EntityKind::Interface => "interface",
            EntityKind::NetType => "net_type",
            EntityKind::Usage => "usage",
            EntityKind::Vlan => "vlan",
            EntityKind::Prefix => "prefix",
            EntityKind::Cabling => "cabling",
            EntityKind::Patch => "patch",
        }
    }

    /// Whether rows of this kind get a store-assigned integer id
    /// (as opposed to a natural string id given in the seed file)
    pub fn has_surrogate_key(self) -> bool {
        !matches!(
            self,
            EntityKind::Location
                | EntityKind::Room
                | EntityKind::Organization
                | EntityKind::Vendor
                | EntityKind::Category
                | EntityKind::Subcategory
                | EntityKind::NetType
                | EntityKind::Usage
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown entity kind: {}", s))
    }
}

/// Reference to a surrogate-keyed row.
///
/// `Pending` points at an earlier object in the same row outcome that has
/// not been saved yet; it is rebound to `Saved` when that object gets its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectRef {
    Saved(i64),
    Pending { pending: usize },
}

impl ObjectRef {
    pub fn pending(index: usize) -> Self {
        ObjectRef::Pending { pending: index }
    }
}

/// Ordered field=value pairs used to look rows up in the inventory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupKeys(Vec<(&'static str, Value)>);

impl LookupKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((field, value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, Value)> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.iter().find(|(name, _)| *name == field).map(|(_, v)| v)
    }
}

impl fmt::Display for LookupKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match value {
                Value::String(s) => write!(f, "{}={}", field, s)?,
                other => write!(f, "{}={}", field, other)?,
            }
        }
        Ok(())
    }
}
