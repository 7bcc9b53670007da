//! One builder per seed kind: `(row, inventory) -> objects`.
//!
//! Builders only read the inventory. Every uniqueness check runs before any
//! object is constructed, so a failing row never yields a partial list.

use crate::bulkparse::{ParseError, Row};
use crate::inventory::Inventory;
use crate::models::*;

use super::{ImportError, RowOutcome};

pub(super) fn netbox<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let ip = required(row, "ip")?;
    raise_if_exists(store, EntityKind::Netbox, LookupKeys::new().with("ip", ip))?;
    raise_if_exists(store, EntityKind::Netbox, LookupKeys::new().with("sysname", ip))?;

    let device = device_from_serial(store, row.text("serial"))?;
    let room = resolve_key(store, EntityKind::Room, LookupKeys::new().with("id", required(row, "roomid")?))?;
    let organization = resolve_key(
        store,
        EntityKind::Organization,
        LookupKeys::new().with("id", required(row, "orgid")?),
    )?;
    let category_id = resolve_key(
        store,
        EntityKind::Category,
        LookupKeys::new().with("id", required(row, "catid")?),
    )?;

    let mut subcategories = Vec::new();
    for subcat in row.list("subcat") {
        let keys = LookupKeys::new().with("id", subcat).with("category", category_id.as_str());
        subcategories.push(resolve_key(store, EntityKind::Subcategory, keys)?);
    }

    let netbox = Netbox {
        id: None,
        ip: ip.to_string(),
        sysname: ip.to_string(),
        read_only: owned(row.text("ro")),
        read_write: owned(row.text("rw")),
        snmp_version: 1,
        room,
        organization,
        category: category_id,
        device: device.reference(0),
    };
    let netbox_ref = ObjectRef::pending(1);

    let mut objects = vec![device, Record::Netbox(netbox)];
    if let Some(function) = row.text("function") {
        objects.push(Record::NetboxInfo(NetboxInfo {
            id: None,
            netbox: netbox_ref,
            key: None,
            variable: "function".to_string(),
            value: function.to_string(),
        }));
    }
    objects.extend(subcategories.into_iter().map(|category| {
        Record::NetboxCategory(NetboxCategory {
            id: None,
            netbox: netbox_ref,
            category,
        })
    }));

    Ok(objects)
}

/// Existing device with this serial, or a new one. A blank serial always
/// gives a new device.
fn device_from_serial<S: Inventory + ?Sized>(store: &S, serial: Option<&str>) -> Result<Record, ImportError> {
    let Some(serial) = serial else {
        return Ok(Record::Device(Device { id: None, serial: None }));
    };
    match store.get_exactly_one(EntityKind::Device, &LookupKeys::new().with("serial", serial)) {
        Ok(existing) => Ok(existing.clone()),
        Err(ImportError::DoesNotExist { .. }) => Ok(Record::Device(Device {
            id: None,
            serial: Some(serial.to_string()),
        })),
        Err(e) => Err(e),
    }
}

pub(super) fn location<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let id = required(row, "locationid")?;
    raise_if_exists(store, EntityKind::Location, LookupKeys::new().with("id", id))?;
    Ok(vec![Record::Location(Location {
        id: id.to_string(),
        description: required(row, "descr")?.to_string(),
    })])
}

pub(super) fn room<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let id = required(row, "roomid")?;
    raise_if_exists(store, EntityKind::Room, LookupKeys::new().with("id", id))?;
    let location = match row.text("locationid") {
        Some(locationid) => Some(resolve_key(
            store,
            EntityKind::Location,
            LookupKeys::new().with("id", locationid),
        )?),
        None => None,
    };
    Ok(vec![Record::Room(Room {
        id: id.to_string(),
        location,
        description: owned(row.text("descr")),
        optional_1: owned(row.text("opt1")),
        optional_2: owned(row.text("opt2")),
        optional_3: owned(row.text("opt3")),
        optional_4: owned(row.text("opt4")),
    })])
}

pub(super) fn organization<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let id = required(row, "orgid")?;
    raise_if_exists(store, EntityKind::Organization, LookupKeys::new().with("id", id))?;
    let parent = match row.text("parent") {
        Some(parent) => Some(resolve_key(
            store,
            EntityKind::Organization,
            LookupKeys::new().with("id", parent),
        )?),
        None => None,
    };
    Ok(vec![Record::Organization(Organization {
        id: id.to_string(),
        parent,
        description: owned(row.text("description")),
        optional_1: owned(row.text("opt1")),
        optional_2: owned(row.text("opt2")),
        optional_3: owned(row.text("opt3")),
    })])
}

pub(super) fn prefix<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let net_address = required(row, "netaddr")?;
    raise_if_exists(store, EntityKind::Prefix, LookupKeys::new().with("net_address", net_address))?;

    let net_type = resolve_key(
        store,
        EntityKind::NetType,
        LookupKeys::new().with("id", required(row, "nettype")?),
    )?;
    let organization = match row.text("orgid") {
        Some(orgid) => Some(resolve_key(
            store,
            EntityKind::Organization,
            LookupKeys::new().with("id", orgid),
        )?),
        None => None,
    };
    let usage = match row.text("usage") {
        Some(usage) => Some(resolve_key(
            store,
            EntityKind::Usage,
            LookupKeys::new().with("id", usage),
        )?),
        None => None,
    };
    let vlan_number = match row.text("vlan") {
        Some(v) => Some(v.trim().parse::<i32>().map_err(|_| ParseError::InvalidValue {
            field: "vlan".to_string(),
            value: v.to_string(),
        })?),
        None => None,
    };

    let wanted = Vlan {
        id: None,
        vlan: vlan_number,
        net_type,
        organization,
        net_ident: owned(row.text("netident")),
        usage,
        description: owned(row.text("description")),
    };
    let vlan = get_or_create_vlan(store, wanted)?;

    let prefix = Prefix {
        id: None,
        net_address: net_address.to_string(),
        vlan: vlan.reference(0),
    };
    Ok(vec![vlan, Record::Prefix(prefix)])
}

/// The stored vlan with exactly these attributes, or `wanted` itself (unsaved)
fn get_or_create_vlan<S: Inventory + ?Sized>(store: &S, wanted: Vlan) -> Result<Record, ImportError> {
    let keys = LookupKeys::new()
        .with("vlan", wanted.vlan)
        .with("net_type", wanted.net_type.as_str())
        .with("organization", wanted.organization.clone())
        .with("net_ident", wanted.net_ident.clone())
        .with("usage", wanted.usage.clone())
        .with("description", wanted.description.clone());
    match store.get_exactly_one(EntityKind::Vlan, &keys) {
        Ok(existing) => Ok(existing.clone()),
        Err(ImportError::DoesNotExist { .. }) => Ok(Record::Vlan(wanted)),
        Err(e) => Err(e),
    }
}

pub(super) fn usage<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let id = required(row, "usageid")?;
    raise_if_exists(store, EntityKind::Usage, LookupKeys::new().with("id", id))?;
    Ok(vec![Record::Usage(Usage {
        id: id.to_string(),
        description: required(row, "descr")?.to_string(),
    })])
}

pub(super) fn netbox_type<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let vendor = resolve_key(
        store,
        EntityKind::Vendor,
        LookupKeys::new().with("id", required(row, "vendorid")?),
    )?;
    let name = required(row, "typename")?;
    let sysobjectid = required(row, "sysobjectid")?;
    raise_if_exists(store, EntityKind::NetboxType, LookupKeys::new().with("sysobjectid", sysobjectid))?;
    raise_if_exists(
        store,
        EntityKind::NetboxType,
        LookupKeys::new().with("vendor", vendor.as_str()).with("name", name),
    )?;

    Ok(vec![Record::NetboxType(NetboxType {
        id: None,
        vendor,
        name: name.to_string(),
        sysobjectid: sysobjectid.to_string(),
        description: owned(row.text("description")),
        cdp: flag(row, "cdp")?,
        tftp: flag(row, "tftp")?,
    })])
}

pub(super) fn vendor<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let id = required(row, "vendorid")?;
    raise_if_exists(store, EntityKind::Vendor, LookupKeys::new().with("id", id))?;
    Ok(vec![Record::Vendor(Vendor { id: id.to_string() })])
}

pub(super) fn subcategory<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let id = required(row, "subcatid")?;
    raise_if_exists(store, EntityKind::Subcategory, LookupKeys::new().with("id", id))?;
    let category = resolve_key(
        store,
        EntityKind::Category,
        LookupKeys::new().with("id", required(row, "catid")?),
    )?;
    Ok(vec![Record::Subcategory(Subcategory {
        id: id.to_string(),
        category,
        description: required(row, "description")?.to_string(),
    })])
}

pub(super) fn cabling<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let room = resolve_key(
        store,
        EntityKind::Room,
        LookupKeys::new().with("id", required(row, "roomid")?),
    )?;
    let jack = required(row, "jack")?;
    raise_if_exists(
        store,
        EntityKind::Cabling,
        LookupKeys::new().with("room", room.as_str()).with("jack", jack),
    )?;

    Ok(vec![Record::Cabling(Cabling {
        id: None,
        room,
        jack: jack.to_string(),
        building: owned(row.text("building")),
        target_room: owned(row.text("targetroom")),
        category: owned(row.text("category")),
        description: owned(row.text("descr")),
    })])
}

pub(super) fn patch<S: Inventory + ?Sized>(row: &Row, store: &S) -> RowOutcome {
    let netbox_keys = LookupKeys::new().with("sysname", required(row, "sysname")?);
    let netbox = saved_id(
        get_object_or_fail(store, EntityKind::Netbox, netbox_keys.clone())?,
        netbox_keys,
    )?;
    let interface_keys = LookupKeys::new()
        .with("netbox", netbox)
        .with("ifname", required(row, "port")?);
    let interface = saved_id(
        get_object_or_fail(store, EntityKind::Interface, interface_keys.clone())?,
        interface_keys,
    )?;

    let room = resolve_key(
        store,
        EntityKind::Room,
        LookupKeys::new().with("id", required(row, "roomid")?),
    )?;
    let cabling_keys = LookupKeys::new()
        .with("room", room.as_str())
        .with("jack", required(row, "jack")?);
    let cabling = saved_id(
        get_object_or_fail(store, EntityKind::Cabling, cabling_keys.clone())?,
        cabling_keys,
    )?;

    Ok(vec![Record::Patch(Patch {
        id: None,
        interface: ObjectRef::Saved(interface),
        cabling: ObjectRef::Saved(cabling),
        split: row.text("split").unwrap_or("no").to_string(),
    })])
}

fn raise_if_exists<S: Inventory + ?Sized>(store: &S, kind: EntityKind, keys: LookupKeys) -> Result<(), ImportError> {
    if store.exists(kind, &keys) {
        return Err(ImportError::AlreadyExists { kind, keys });
    }
    Ok(())
}

fn get_object_or_fail<'a, S: Inventory + ?Sized>(
    store: &'a S,
    kind: EntityKind,
    keys: LookupKeys,
) -> Result<&'a Record, ImportError> {
    store.get_exactly_one(kind, &keys)
}

/// Natural key of the single row matching `keys`
fn resolve_key<S: Inventory + ?Sized>(store: &S, kind: EntityKind, keys: LookupKeys) -> Result<String, ImportError> {
    let record = store.get_exactly_one(kind, &keys)?;
    natural_key(record, keys)
}

fn natural_key(record: &Record, keys: LookupKeys) -> Result<String, ImportError> {
    record.pk().ok_or_else(|| ImportError::Unsaved {
        kind: record.kind(),
        keys,
    })
}

fn saved_id(record: &Record, keys: LookupKeys) -> Result<i64, ImportError> {
    record.id().ok_or(ImportError::Unsaved {
        kind: record.kind(),
        keys,
    })
}

fn required<'r>(row: &'r Row, column: &str) -> Result<&'r str, ImportError> {
    row.text(column).ok_or_else(|| {
        ImportError::Parse(ParseError::RequiredFieldMissing {
            field: column.to_string(),
        })
    })
}

fn flag(row: &Row, column: &str) -> Result<bool, ImportError> {
    let value = row.text(column).unwrap_or("");
    crate::utils::parse_bool_word(value).ok_or_else(|| {
        ImportError::Parse(ParseError::InvalidValue {
            field: column.to_string(),
            value: value.to_string(),
        })
    })
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}
