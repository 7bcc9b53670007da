use std::fmt;
use std::str::FromStr;

use crate::models::EntityKind;

/// The kinds of seed file that can be imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Netbox,
    Location,
    Room,
    Org,
    Prefix,
    Usage,
    NetboxType,
    Vendor,
    Subcat,
    Cabling,
    Patch,
}

/// Column layout of one seed file kind
#[derive(Debug)]
pub struct Layout {
    pub columns: &'static [&'static str],
    /// The first `required` columns must be non-blank
    pub required: usize,
    /// Column collecting any fields beyond `columns`, as a list
    pub rest: Option<&'static str>,
}

impl ImportKind {
    pub const ALL: &'static [ImportKind] = &[
        ImportKind::Netbox,
        ImportKind::Location,
        ImportKind::Room,
        ImportKind::Org,
        ImportKind::Prefix,
        ImportKind::Usage,
        ImportKind::NetboxType,
        ImportKind::Vendor,
        ImportKind::Subcat,
        ImportKind::Cabling,
        ImportKind::Patch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ImportKind::Netbox => "netbox",
            ImportKind::Location => "location",
            ImportKind::Room => "room",
            ImportKind::Org => "org",
            ImportKind::Prefix => "prefix",
            ImportKind::Usage => "usage",
            ImportKind::NetboxType => "type",
            ImportKind::Vendor => "vendor",
            ImportKind::Subcat => "subcat",
            ImportKind::Cabling => "cabling",
            ImportKind::Patch => "patch",
        }
    }

    /// The entity each row of this kind is mainly about
    pub fn entity(self) -> EntityKind {
        match self {
            ImportKind::Netbox => EntityKind::Netbox,
            ImportKind::Location => EntityKind::Location,
            ImportKind::Room => EntityKind::Room,
            ImportKind::Org => EntityKind::Organization,
            ImportKind::Prefix => EntityKind::Prefix,
            ImportKind::Usage => EntityKind::Usage,
            ImportKind::NetboxType => EntityKind::NetboxType,
            ImportKind::Vendor => EntityKind::Vendor,
            ImportKind::Subcat => EntityKind::Subcategory,
            ImportKind::Cabling => EntityKind::Cabling,
            ImportKind::Patch => EntityKind::Patch,
        }
    }

    pub fn layout(self) -> &'static Layout {
        match self {
            ImportKind::Netbox => &NETBOX,
            ImportKind::Location => &LOCATION,
            ImportKind::Room => &ROOM,
            ImportKind::Org => &ORG,
            ImportKind::Prefix => &PREFIX,
            ImportKind::Usage => &USAGE,
            ImportKind::NetboxType => &NETBOX_TYPE,
            ImportKind::Vendor => &VENDOR,
            ImportKind::Subcat => &SUBCAT,
            ImportKind::Cabling => &CABLING,
            ImportKind::Patch => &PATCH,
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        ImportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ImportKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown seed kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

static NETBOX: Layout = Layout {
    columns: &["roomid", "ip", "orgid", "catid", "ro", "serial", "rw", "function"],
    required: 4,
    rest: Some("subcat"),
};

static LOCATION: Layout = Layout {
    columns: &["locationid", "descr"],
    required: 2,
    rest: None,
};

static ROOM: Layout = Layout {
    columns: &["roomid", "locationid", "descr", "opt1", "opt2", "opt3", "opt4"],
    required: 1,
    rest: None,
};

static ORG: Layout = Layout {
    columns: &["orgid", "parent", "description", "opt1", "opt2", "opt3"],
    required: 1,
    rest: None,
};

static PREFIX: Layout = Layout {
    columns: &["netaddr", "nettype", "orgid", "netident", "usage", "description", "vlan"],
    required: 2,
    rest: None,
};

static USAGE: Layout = Layout {
    columns: &["usageid", "descr"],
    required: 2,
    rest: None,
};

static NETBOX_TYPE: Layout = Layout {
    columns: &["vendorid", "typename", "sysobjectid", "cdp", "tftp", "description"],
    required: 3,
    rest: None,
};

static VENDOR: Layout = Layout {
    columns: &["vendorid"],
    required: 1,
    rest: None,
};

static SUBCAT: Layout = Layout {
    columns: &["subcatid", "catid", "description"],
    required: 3,
    rest: None,
};

static CABLING: Layout = Layout {
    columns: &["roomid", "jack", "building", "targetroom", "category", "descr"],
    required: 4,
    rest: None,
};

static PATCH: Layout = Layout {
    columns: &["sysname", "port", "roomid", "jack", "split"],
    required: 4,
    rest: None,
};
