use serde::{Deserialize, Serialize};

use super::*;

/// One inventory row of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Device(Device),
    Netbox(Netbox),
    NetboxInfo(NetboxInfo),
    NetboxCategory(NetboxCategory),
    Location(Location),
    Room(Room),
    Organization(Organization),
    Vendor(Vendor),
    NetboxType(NetboxType),
    Category(Category),
    Subcategory(Subcategory),
    Interface(Interface),
    NetType(NetType),
    Usage(Usage),
    Vlan(Vlan),
    Prefix(Prefix),
    Cabling(Cabling),
    Patch(Patch),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Device(_) => EntityKind::Device,
            Record::Netbox(_) => EntityKind::Netbox,
            Record::NetboxInfo(_) => EntityKind::NetboxInfo,
            Record::NetboxCategory(_) => EntityKind::NetboxCategory,
            Record::Location(_) => EntityKind::Location,
            Record::Room(_) => EntityKind::Room,
            Record::Organization(_) => EntityKind::Organization,
            Record::Vendor(_) => EntityKind::Vendor,
            Record::NetboxType(_) => EntityKind::NetboxType,
            Record::Category(_) => EntityKind::Category,
            Record::Subcategory(_) => EntityKind::Subcategory,
            Record::Interface(_) => EntityKind::Interface,
            Record::NetType(_) => EntityKind::NetType,
            Record::Usage(_) => EntityKind::Usage,
            Record::Vlan(_) => EntityKind::Vlan,
            Record::Prefix(_) => EntityKind::Prefix,
            Record::Cabling(_) => EntityKind::Cabling,
            Record::Patch(_) => EntityKind::Patch,
        }
    }

    fn id_slot(&mut self) -> Option<&mut Option<i64>> {
        match self {
            Record::Device(r) => Some(&mut r.id),
            Record::Netbox(r) => Some(&mut r.id),
            Record::NetboxInfo(r) => Some(&mut r.id),
            Record::NetboxCategory(r) => Some(&mut r.id),
            Record::NetboxType(r) => Some(&mut r.id),
            Record::Interface(r) => Some(&mut r.id),
            Record::Vlan(r) => Some(&mut r.id),
            Record::Prefix(r) => Some(&mut r.id),
            Record::Cabling(r) => Some(&mut r.id),
            Record::Patch(r) => Some(&mut r.id),
            _ => None,
        }
    }

    /// Surrogate id, `None` for natural-key kinds and for unsaved rows
    pub fn id(&self) -> Option<i64> {
        match self {
            Record::Device(r) => r.id,
            Record::Netbox(r) => r.id,
            Record::NetboxInfo(r) => r.id,
            Record::NetboxCategory(r) => r.id,
            Record::NetboxType(r) => r.id,
            Record::Interface(r) => r.id,
            Record::Vlan(r) => r.id,
            Record::Prefix(r) => r.id,
            Record::Cabling(r) => r.id,
            Record::Patch(r) => r.id,
            _ => None,
        }
    }

    /// Assign the surrogate id. Returns false for natural-key kinds.
    pub fn set_id(&mut self, id: i64) -> bool {
        match self.id_slot() {
            Some(slot) => {
                *slot = Some(id);
                true
            }
            None => false,
        }
    }

    /// Primary key as stored: the natural id, or the surrogate id once assigned
    pub fn pk(&self) -> Option<String> {
        match self {
            Record::Location(r) => Some(r.id.clone()),
            Record::Room(r) => Some(r.id.clone()),
            Record::Organization(r) => Some(r.id.clone()),
            Record::Vendor(r) => Some(r.id.clone()),
            Record::Category(r) => Some(r.id.clone()),
            Record::Subcategory(r) => Some(r.id.clone()),
            Record::NetType(r) => Some(r.id.clone()),
            Record::Usage(r) => Some(r.id.clone()),
            other => other.id().map(|id| id.to_string()),
        }
    }

    /// Reference to this record as the `index`-th object of a row outcome
    pub fn reference(&self, index: usize) -> ObjectRef {
        match self.id() {
            Some(id) => ObjectRef::Saved(id),
            None => ObjectRef::pending(index),
        }
    }

    /// Mutable access to every surrogate-key reference this record holds
    pub fn refs_mut(&mut self) -> Vec<&mut ObjectRef> {
        match self {
            Record::Netbox(r) => vec![&mut r.device],
            Record::NetboxInfo(r) => vec![&mut r.netbox],
            Record::NetboxCategory(r) => vec![&mut r.netbox],
            Record::Interface(r) => vec![&mut r.netbox],
            Record::Prefix(r) => vec![&mut r.vlan],
            Record::Patch(r) => vec![&mut r.interface, &mut r.cabling],
            _ => vec![],
        }
    }
}
