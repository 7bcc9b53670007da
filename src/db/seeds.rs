use crate::models::*;

/// Netbox categories every NAV installation has
pub(super) fn default_categories() -> Vec<Category> {
    [
        ("GW", "Routers (layer 3 device)"),
        ("GSW", "A layer 2 and layer 3 device"),
        ("SW", "Core switches (layer 2), typically with many vlans"),
        ("EDGE", "Edge switch without vlans (layer 2)"),
        ("WLAN", "Wireless equipment"),
        ("SRV", "Server"),
        ("OTHER", "Other equipment"),
        ("ENV", "Environmental probes"),
        ("POWER", "Power distribution equipment"),
    ]
    .into_iter()
    .map(|(id, description)| Category {
        id: id.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// Network types a prefix's vlan can have
pub(super) fn default_net_types() -> Vec<NetType> {
    [
        ("core", "Core network"),
        ("elink", "Link to external network"),
        ("lan", "Local area network"),
        ("link", "Link between routers"),
        ("loopback", "Loopback interface network"),
        ("private", "Private network"),
        ("scope", "Address scope"),
        ("static", "Statically routed network"),
        ("reserved", "Reserved address space"),
        ("unknown", "Unknown network type"),
    ]
    .into_iter()
    .map(|(id, description)| NetType {
        id: id.to_string(),
        description: Some(description.to_string()),
    })
    .collect()
}

/// All reference rows, ready to insert
pub(super) fn seed_reference_records() -> Vec<Record> {
    default_categories()
        .into_iter()
        .map(Record::Category)
        .chain(default_net_types().into_iter().map(Record::NetType))
        .collect()
}
