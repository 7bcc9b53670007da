use std::io::Cursor;

use assert_matches::assert_matches;

use super::*;
use crate::bulkparse::BulkParser;
use crate::inventory::MemoryStore;
use crate::models::*;

fn room(id: &str, location: Option<&str>) -> Record {
    Record::Room(Room {
        id: id.to_string(),
        location: location.map(str::to_string),
        description: None,
        optional_1: None,
        optional_2: None,
        optional_3: None,
        optional_4: None,
    })
}

fn organization(id: &str) -> Record {
    Record::Organization(Organization {
        id: id.to_string(),
        parent: None,
        description: None,
        optional_1: None,
        optional_2: None,
        optional_3: None,
    })
}

fn fixtures() -> MemoryStore {
    vec![
        Record::Category(Category {
            id: "SW".to_string(),
            description: "Switch".to_string(),
        }),
        Record::Category(Category {
            id: "GW".to_string(),
            description: "Router".to_string(),
        }),
        Record::Subcategory(Subcategory {
            id: "AD".to_string(),
            category: "SW".to_string(),
            description: "Administrative".to_string(),
        }),
        Record::Subcategory(Subcategory {
            id: "BACKBONE".to_string(),
            category: "GW".to_string(),
            description: "Backbone router".to_string(),
        }),
        Record::NetType(NetType {
            id: "lan".to_string(),
            description: None,
        }),
        Record::Location(Location {
            id: "oslo".to_string(),
            description: "Oslo".to_string(),
        }),
        room("myroom", Some("oslo")),
        organization("myorg"),
        Record::Usage(Usage {
            id: "ansatt".to_string(),
            description: "Employees".to_string(),
        }),
        Record::Vendor(Vendor {
            id: "cisco".to_string(),
        }),
    ]
    .into_iter()
    .collect()
}

/// Run a seed file through the importer, persisting each good row before
/// the next one is read
fn import(kind: ImportKind, input: &str, store: &mut MemoryStore) -> Vec<(usize, RowOutcome)> {
    let parser = BulkParser::new(Cursor::new(input.as_bytes().to_vec()), kind);
    let mut importer = SeedImporter::new(kind, parser, store);
    let mut results = Vec::new();
    while let Some((line, outcome)) = importer.advance() {
        if let Ok(objects) = &outcome {
            importer.store_mut().persist(objects.clone()).unwrap();
        }
        results.push((line, outcome));
    }
    results
}

#[test]
fn test_room_needs_its_location_first() {
    let mut store = fixtures();
    let row = Row::new().with("roomid", "lab").with("locationid", "42");
    assert_matches!(
        build(ImportKind::Room, &row, &store),
        Err(ImportError::DoesNotExist { kind: EntityKind::Location, keys })
            if keys == LookupKeys::new().with("id", "42")
    );

    let results = import(ImportKind::Location, "42:Building 42\n", &mut store);
    assert!(results[0].1.is_ok());

    let objects = build(ImportKind::Room, &row, &store).unwrap();
    assert_matches!(&objects[..], [Record::Room(r)] if r.location.as_deref() == Some("42"));
}

#[test]
fn test_second_netbox_with_same_ip_already_exists() {
    let mut store = fixtures();
    let results = import(
        ImportKind::Netbox,
        "myroom:10.0.0.1:myorg:SW\nmyroom:10.0.0.1:myorg:SW\n",
        &mut store,
    );
    assert_eq!(results.len(), 2);
    assert!(results[0].1.is_ok());
    assert_matches!(
        &results[1].1,
        Err(ImportError::AlreadyExists { kind: EntityKind::Netbox, keys })
            if keys == &LookupKeys::new().with("ip", "10.0.0.1")
    );
    assert_eq!(store.count(EntityKind::Netbox), 1);
}

#[test]
fn test_netbox_ip_may_not_match_an_existing_sysname() {
    let mut store = fixtures();
    store
        .insert(Record::Netbox(Netbox {
            id: None,
            ip: "10.0.0.9".to_string(),
            sysname: "10.0.0.1".to_string(),
            read_only: None,
            read_write: None,
            snmp_version: 2,
            room: "myroom".to_string(),
            organization: "myorg".to_string(),
            category: "SW".to_string(),
            device: ObjectRef::Saved(1),
        }))
        .unwrap();

    let row = Row::new()
        .with("ip", "10.0.0.1")
        .with("roomid", "myroom")
        .with("orgid", "myorg")
        .with("catid", "SW");
    assert_matches!(
        build(ImportKind::Netbox, &row, &store),
        Err(ImportError::AlreadyExists { kind: EntityKind::Netbox, keys })
            if keys.get("sysname") == Some(&serde_json::json!("10.0.0.1"))
    );
}

#[test]
fn test_netbox_builds_device_info_and_subcategories() {
    let store = fixtures();
    let row = Row::new()
        .with("roomid", "myroom")
        .with("ip", "10.0.0.1")
        .with("orgid", "myorg")
        .with("catid", "SW")
        .with("ro", "public")
        .with("serial", "FOC1234")
        .with("rw", "")
        .with("function", "core switch")
        .with("subcat", vec!["AD", ""]);

    let objects = build(ImportKind::Netbox, &row, &store).unwrap();
    assert_eq!(objects.len(), 4);
    assert_matches!(&objects[0], Record::Device(d) if d.id.is_none() && d.serial.as_deref() == Some("FOC1234"));
    assert_matches!(&objects[1], Record::Netbox(nb) => {
        assert_eq!(nb.sysname, "10.0.0.1");
        assert_eq!(nb.read_only.as_deref(), Some("public"));
        assert_eq!(nb.read_write, None);
        assert_eq!(nb.snmp_version, 1);
        assert_eq!(nb.room, "myroom");
        assert_eq!(nb.organization, "myorg");
        assert_eq!(nb.category, "SW");
        assert_eq!(nb.device, ObjectRef::pending(0));
    });
    assert_matches!(&objects[2], Record::NetboxInfo(info) => {
        assert_eq!(info.key, None);
        assert_eq!(info.variable, "function");
        assert_eq!(info.value, "core switch");
        assert_eq!(info.netbox, ObjectRef::pending(1));
    });
    assert_matches!(&objects[3], Record::NetboxCategory(nc) if nc.category == "AD" && nc.netbox == ObjectRef::pending(1));
}

#[test]
fn test_netbox_reuses_device_with_known_serial() {
    let mut store = fixtures();
    store
        .insert(Record::Device(Device {
            id: Some(77),
            serial: Some("FOC1234".to_string()),
        }))
        .unwrap();

    let results = import(ImportKind::Netbox, "myroom:10.0.0.1:myorg:SW::FOC1234\n", &mut store);
    let objects = results[0].1.as_ref().unwrap();
    assert_matches!(&objects[..], [Record::Device(d), Record::Netbox(nb)] => {
        assert_eq!(d.id, Some(77));
        assert_eq!(nb.device, ObjectRef::Saved(77));
    });
    assert_eq!(store.count(EntityKind::Device), 1);
}

#[test]
fn test_netbox_blank_serial_always_gets_a_new_device() {
    let mut store = fixtures();
    import(
        ImportKind::Netbox,
        "myroom:10.0.0.1:myorg:SW\nmyroom:10.0.0.2:myorg:SW\n",
        &mut store,
    );
    assert_eq!(store.count(EntityKind::Device), 2);
    assert_eq!(store.count(EntityKind::NetboxInfo), 0);
}

#[test]
fn test_netbox_subcategory_must_belong_to_its_category() {
    let store = fixtures();
    let row = Row::new()
        .with("roomid", "myroom")
        .with("ip", "10.0.0.1")
        .with("orgid", "myorg")
        .with("catid", "SW")
        .with("subcat", vec!["BACKBONE"]);
    assert_matches!(
        build(ImportKind::Netbox, &row, &store),
        Err(ImportError::DoesNotExist { kind: EntityKind::Subcategory, keys })
            if keys == LookupKeys::new().with("id", "BACKBONE").with("category", "SW")
    );
}

#[test]
fn test_netbox_missing_references() {
    let store = fixtures();
    let row = Row::new()
        .with("roomid", "nowhere")
        .with("ip", "10.0.0.1")
        .with("orgid", "myorg")
        .with("catid", "SW");
    assert_matches!(
        build(ImportKind::Netbox, &row, &store),
        Err(ImportError::DoesNotExist { kind: EntityKind::Room, .. })
    );

    let row = Row::new()
        .with("roomid", "myroom")
        .with("ip", "10.0.0.1")
        .with("orgid", "myorg")
        .with("catid", "XX");
    assert_matches!(
        build(ImportKind::Netbox, &row, &store),
        Err(ImportError::DoesNotExist { kind: EntityKind::Category, .. })
    );
}

#[test]
fn test_persisted_netbox_row_is_fully_linked() {
    let mut store = fixtures();
    import(ImportKind::Netbox, "myroom:10.0.0.1:myorg:SW:::::AD\n", &mut store);

    let netbox = store
        .get_exactly_one(EntityKind::Netbox, &LookupKeys::new().with("ip", "10.0.0.1"))
        .unwrap()
        .clone();
    let netbox_id = netbox.id().unwrap();
    let device_id = match &netbox {
        Record::Netbox(Netbox { device: ObjectRef::Saved(id), .. }) => *id,
        other => panic!("unexpected record {:?}", other),
    };
    assert!(store.exists(EntityKind::Device, &LookupKeys::new().with("id", device_id)));
    assert!(store.exists(
        EntityKind::NetboxCategory,
        &LookupKeys::new().with("netbox", netbox_id).with("category", "AD")
    ));
}

#[test]
fn test_location_and_usage_and_vendor_are_unique() {
    let mut store = fixtures();

    let results = import(ImportKind::Location, "oslo:Oslo again\nbergen:Bergen\n", &mut store);
    assert_matches!(&results[0].1, Err(ImportError::AlreadyExists { kind: EntityKind::Location, .. }));
    assert_matches!(&results[1].1, Ok(objects) if objects.len() == 1);

    let results = import(ImportKind::Usage, "ansatt:Staff\n", &mut store);
    assert_matches!(&results[0].1, Err(ImportError::AlreadyExists { kind: EntityKind::Usage, .. }));

    let results = import(ImportKind::Vendor, "cisco\nhp\nhp\n", &mut store);
    assert_matches!(&results[0].1, Err(ImportError::AlreadyExists { kind: EntityKind::Vendor, .. }));
    assert!(results[1].1.is_ok());
    assert_matches!(&results[2].1, Err(ImportError::AlreadyExists { kind: EntityKind::Vendor, .. }));
}

#[test]
fn test_room_fields() {
    let store = fixtures();
    let row = Row::new()
        .with("roomid", "lab")
        .with("locationid", "")
        .with("descr", "Test lab")
        .with("opt1", "a")
        .with("opt4", "d");
    let objects = build(ImportKind::Room, &row, &store).unwrap();
    assert_matches!(&objects[..], [Record::Room(r)] => {
        assert_eq!(r.location, None);
        assert_eq!(r.description.as_deref(), Some("Test lab"));
        assert_eq!(r.optional_1.as_deref(), Some("a"));
        assert_eq!(r.optional_2, None);
        assert_eq!(r.optional_4.as_deref(), Some("d"));
    });

    let row = Row::new().with("roomid", "myroom");
    assert_matches!(
        build(ImportKind::Room, &row, &store),
        Err(ImportError::AlreadyExists { kind: EntityKind::Room, .. })
    );
}

#[test]
fn test_organization_parent() {
    let mut store = fixtures();
    let results = import(
        ImportKind::Org,
        "sub:ghost:Orphan\nsub:myorg:Department\nsub2:sub\n",
        &mut store,
    );
    assert_matches!(
        &results[0].1,
        Err(ImportError::DoesNotExist { kind: EntityKind::Organization, keys })
            if keys == &LookupKeys::new().with("id", "ghost")
    );
    assert_matches!(&results[1].1, Ok(objects) => {
        assert_matches!(&objects[..], [Record::Organization(o)] if o.parent.as_deref() == Some("myorg"));
    });
    assert_matches!(&results[2].1, Ok(objects) => {
        assert_matches!(&objects[..], [Record::Organization(o)] if o.parent.as_deref() == Some("sub"));
    });
}

#[test]
fn test_prefix_reuses_matching_vlan() {
    let mut store = fixtures();
    store
        .insert(Record::Vlan(Vlan {
            id: None,
            vlan: Some(10),
            net_type: "lan".to_string(),
            organization: Some("myorg".to_string()),
            net_ident: Some("office".to_string()),
            usage: Some("ansatt".to_string()),
            description: Some("Office net".to_string()),
        }))
        .unwrap();
    let before = store.count(EntityKind::Vlan);

    let results = import(
        ImportKind::Prefix,
        "10.0.0.0/24:lan:myorg:office:ansatt:Office net:10\n",
        &mut store,
    );
    let objects = results[0].1.as_ref().unwrap();
    assert_matches!(&objects[..], [Record::Vlan(v), Record::Prefix(p)] => {
        assert_eq!(v.id, Some(1));
        assert_eq!(p.vlan, ObjectRef::Saved(1));
        assert_eq!(p.net_address, "10.0.0.0/24");
    });
    assert_eq!(store.count(EntityKind::Vlan), before);
    assert_eq!(store.count(EntityKind::Prefix), 1);
}

#[test]
fn test_prefix_creates_vlan_when_none_matches() {
    let mut store = fixtures();
    let results = import(
        ImportKind::Prefix,
        "10.0.0.0/24:lan::office:::10\n10.0.1.0/24:lan::office:::10\n10.0.2.0/24:lan::other:::10\n",
        &mut store,
    );
    assert_matches!(&results[0].1, Ok(objects) => {
        assert_matches!(&objects[..], [Record::Vlan(v), Record::Prefix(p)] => {
            assert_eq!(v.id, None);
            assert_eq!(v.organization, None);
            assert_eq!(p.vlan, ObjectRef::pending(0));
        });
    });
    assert!(results.iter().all(|(_, outcome)| outcome.is_ok()));
    assert_eq!(store.count(EntityKind::Vlan), 2);
    assert_eq!(store.count(EntityKind::Prefix), 3);
}

#[test]
fn test_prefix_checks() {
    let mut store = fixtures();
    import(ImportKind::Prefix, "10.0.0.0/24:lan\n", &mut store);

    let results = import(
        ImportKind::Prefix,
        "10.0.0.0/24:lan\n10.0.1.0/24:wan\n10.0.2.0/24:lan:ghost\n10.0.3.0/24:lan:::nope\n",
        &mut store,
    );
    assert_matches!(
        &results[0].1,
        Err(ImportError::AlreadyExists { kind: EntityKind::Prefix, keys })
            if keys == &LookupKeys::new().with("net_address", "10.0.0.0/24")
    );
    assert_matches!(&results[1].1, Err(ImportError::DoesNotExist { kind: EntityKind::NetType, .. }));
    assert_matches!(&results[2].1, Err(ImportError::DoesNotExist { kind: EntityKind::Organization, .. }));
    assert_matches!(&results[3].1, Err(ImportError::DoesNotExist { kind: EntityKind::Usage, .. }));
}

#[test]
fn test_netbox_type() {
    let mut store = fixtures();
    let results = import(
        ImportKind::NetboxType,
        "juniper:mx480:1.3.6.1.4.1.2636.1.1.1.2.25\n\
         cisco:c2960:1.3.6.1.4.1.9.1.716:yes:no:Catalyst 2960\n\
         cisco:c2960x:1.3.6.1.4.1.9.1.716\n\
         cisco:c2960:1.3.6.1.4.1.9.1.1208\n",
        &mut store,
    );
    assert_matches!(&results[0].1, Err(ImportError::DoesNotExist { kind: EntityKind::Vendor, .. }));
    assert_matches!(&results[1].1, Ok(objects) => {
        assert_matches!(&objects[..], [Record::NetboxType(t)] => {
            assert_eq!(t.vendor, "cisco");
            assert!(t.cdp);
            assert!(!t.tftp);
            assert_eq!(t.description.as_deref(), Some("Catalyst 2960"));
        });
    });
    assert_matches!(
        &results[2].1,
        Err(ImportError::AlreadyExists { kind: EntityKind::NetboxType, keys })
            if keys.get("sysobjectid").is_some()
    );
    assert_matches!(
        &results[3].1,
        Err(ImportError::AlreadyExists { kind: EntityKind::NetboxType, keys })
            if keys == &LookupKeys::new().with("vendor", "cisco").with("name", "c2960")
    );
}

#[test]
fn test_subcategory() {
    let mut store = fixtures();
    let results = import(
        ImportKind::Subcat,
        "AD:SW:dup\nEDU:XX:Education\nEDU:SW:Education\n",
        &mut store,
    );
    assert_matches!(&results[0].1, Err(ImportError::AlreadyExists { kind: EntityKind::Subcategory, .. }));
    assert_matches!(&results[1].1, Err(ImportError::DoesNotExist { kind: EntityKind::Category, .. }));
    assert_matches!(&results[2].1, Ok(objects) => {
        assert_matches!(&objects[..], [Record::Subcategory(s)] if s.category == "SW");
    });
}

#[test]
fn test_cabling_is_unique_per_room_and_jack() {
    let mut store = fixtures();
    let results = import(
        ImportKind::Cabling,
        "myroom:A-1:main:myroom2:cat6\nmyroom:A-1:main:elsewhere:cat6\nghost:A-1:main:x:cat6\n",
        &mut store,
    );
    assert_matches!(&results[0].1, Ok(objects) => {
        assert_matches!(&objects[..], [Record::Cabling(c)] => {
            assert_eq!(c.room, "myroom");
            assert_eq!(c.target_room.as_deref(), Some("myroom2"));
            assert_eq!(c.description, None);
        });
    });
    assert_matches!(
        &results[1].1,
        Err(ImportError::AlreadyExists { kind: EntityKind::Cabling, keys })
            if keys == &LookupKeys::new().with("room", "myroom").with("jack", "A-1")
    );
    assert_matches!(&results[2].1, Err(ImportError::DoesNotExist { kind: EntityKind::Room, .. }));
}

#[test]
fn test_patch_links_interface_and_cabling() {
    let mut store = fixtures();
    import(ImportKind::Netbox, "myroom:10.0.0.1:myorg:SW\n", &mut store);
    import(ImportKind::Cabling, "myroom:A-1:main:myroom2:cat6\n", &mut store);
    let netbox_id = store
        .get_exactly_one(EntityKind::Netbox, &LookupKeys::new().with("sysname", "10.0.0.1"))
        .unwrap()
        .id()
        .unwrap();
    store
        .insert(Record::Interface(Interface {
            id: None,
            netbox: ObjectRef::Saved(netbox_id),
            ifname: "Gi0/1".to_string(),
        }))
        .unwrap();

    let results = import(
        ImportKind::Patch,
        "10.0.0.1:Gi0/1:myroom:A-1\n10.0.0.1:Gi0/2:myroom:A-1\n10.0.0.1:Gi0/1:myroom:B-9:yes\n10.0.0.2:Gi0/1:myroom:A-1\n",
        &mut store,
    );
    assert_matches!(&results[0].1, Ok(objects) => {
        assert_matches!(&objects[..], [Record::Patch(p)] => {
            assert_eq!(p.interface, ObjectRef::Saved(1));
            assert_eq!(p.cabling, ObjectRef::Saved(1));
            assert_eq!(p.split, "no");
        });
    });
    assert_matches!(&results[1].1, Err(ImportError::DoesNotExist { kind: EntityKind::Interface, .. }));
    assert_matches!(&results[2].1, Err(ImportError::DoesNotExist { kind: EntityKind::Cabling, .. }));
    assert_matches!(&results[3].1, Err(ImportError::DoesNotExist { kind: EntityKind::Netbox, .. }));
}

#[test]
fn test_patch_keeps_given_split() {
    let mut store = fixtures();
    import(ImportKind::Netbox, "myroom:10.0.0.1:myorg:SW\n", &mut store);
    import(ImportKind::Cabling, "myroom:A-1:main:myroom2:cat6\n", &mut store);
    store
        .insert(Record::Interface(Interface {
            id: None,
            netbox: ObjectRef::Saved(1),
            ifname: "Gi0/1".to_string(),
        }))
        .unwrap();

    let row = Row::new()
        .with("sysname", "10.0.0.1")
        .with("port", "Gi0/1")
        .with("roomid", "myroom")
        .with("jack", "A-1")
        .with("split", "twisted");
    let objects = build(ImportKind::Patch, &row, &store).unwrap();
    assert_matches!(&objects[..], [Record::Patch(p)] if p.split == "twisted");
}

#[test]
fn test_ambiguous_reference_returns_multiple() {
    let mut store = fixtures();
    store.insert(room("myroom", None)).unwrap();
    let row = Row::new().with("roomid", "myroom").with("jack", "A-1");
    assert_matches!(
        build(ImportKind::Cabling, &row, &store),
        Err(ImportError::MultipleObjectsReturned { kind: EntityKind::Room, keys })
            if keys == LookupKeys::new().with("id", "myroom")
    );
}

#[test]
fn test_one_outcome_per_row_in_line_order() {
    let mut store = fixtures();
    let input = "# usages\nstudent:Students\n\nansatt:dup\nbroken\n# end\nguest:Guests\n";
    let results = import(ImportKind::Usage, input, &mut store);

    let lines: Vec<usize> = results.iter().map(|(line, _)| *line).collect();
    assert_eq!(lines, vec![2, 4, 5, 7]);
    assert!(results[0].1.is_ok());
    assert_matches!(&results[1].1, Err(ImportError::AlreadyExists { .. }));
    assert_matches!(&results[2].1, Err(ImportError::Parse(ParseError::RequiredFieldMissing { .. })));
    assert!(results[3].1.is_ok());
}

#[test]
fn test_decode() {
    let row = Row::new()
        .with("vendorid", b"h\xc3\xa5p".to_vec())
        .with("subcat", RawValue::List(vec![RawValue::Bytes(b"AD".to_vec()), RawValue::Empty]))
        .with("descr", "already text");

    let decoded = decode(row).unwrap();
    assert_eq!(decoded.get("vendorid"), Some(&RawValue::Text("håp".to_string())));
    assert_eq!(
        decoded.get("subcat"),
        Some(&RawValue::List(vec![RawValue::Text("AD".to_string()), RawValue::Empty]))
    );
    assert_eq!(decode(decoded.clone()).unwrap(), decoded);
}

#[test]
fn test_invalid_utf8_fails_the_row() {
    let mut store = fixtures();
    let mut input = b"bad\xff:Broken\n".to_vec();
    input.extend_from_slice(b"good:Fine\n");
    let parser = BulkParser::new(Cursor::new(input), ImportKind::Location);
    let results: Vec<_> = SeedImporter::new(ImportKind::Location, parser, &mut store).collect();

    assert_eq!(results.len(), 2);
    assert_matches!(&results[0], (1, Err(ImportError::Decode { column })) if column == "locationid");
    assert_matches!(&results[1], (2, Ok(_)));
}

#[test]
fn test_importer_works_over_plain_row_iterators() {
    let store = fixtures();
    let rows: Vec<(usize, Result<Row, ParseError>)> = vec![
        (1, Ok(Row::new().with("vendorid", "hp"))),
        (2, Err(ParseError::Read("boom".to_string()))),
    ];
    let results: Vec<_> = SeedImporter::new(ImportKind::Vendor, rows.into_iter(), &store).collect();
    assert_matches!(&results[0], (1, Ok(objects)) if objects.len() == 1);
    assert_matches!(&results[1], (2, Err(ImportError::Parse(ParseError::Read(_)))));
}

#[test]
fn test_netbox_import_of_thousands_of_rows() {
    let mut store = fixtures();
    let input: String = (0..3000)
        .map(|i| format!("myroom:10.{}.{}.1:myorg:SW\n", i / 256, i % 256))
        .collect();
    let duplicate = "myroom:10.0.0.1:myorg:SW\n";

    let results = import(ImportKind::Netbox, &(input + duplicate), &mut store);

    assert_eq!(results.len(), 3001);
    assert!(results[..3000].iter().all(|(_, outcome)| outcome.is_ok()));
    assert_matches!(
        &results[3000],
        (3001, Err(ImportError::AlreadyExists { kind: EntityKind::Netbox, .. }))
    );
    assert_eq!(store.count(EntityKind::Netbox), 3000);
    assert_eq!(store.count(EntityKind::Device), 3000);
    let last = LookupKeys::new().with("ip", "10.11.183.1");
    assert!(store.exists(EntityKind::Netbox, &last));
}
