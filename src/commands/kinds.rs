//! Lists the seed file kinds and their column layouts
//!
//! Usage: navseed kinds

use crate::bulkparse::{ImportKind, Layout};

/// Execute kinds command
pub fn execute() {
    for kind in ImportKind::ALL {
        println!("{:<10} {:<14} {}", kind.as_str(), kind.entity(), describe(kind.layout()));
    }
}

/// One-line column summary; required columns are marked with `*`
fn describe(layout: &Layout) -> String {
    let mut columns: Vec<String> = layout
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if i < layout.required {
                format!("{}*", column)
            } else {
                column.to_string()
            }
        })
        .collect();

    if let Some(rest) = layout.rest {
        columns.push(format!("[{}...]", rest));
    }
    columns.join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityKind;

    #[test]
    fn test_describe_marks_required_and_rest_columns() {
        assert_eq!(
            describe(ImportKind::Netbox.layout()),
            "roomid*:ip*:orgid*:catid*:ro:serial:rw:function:[subcat...]"
        );
        assert_eq!(describe(ImportKind::Vendor.layout()), "vendorid*");
    }

    #[test]
    fn test_every_kind_names_its_entity() {
        assert_eq!(ImportKind::Org.entity(), EntityKind::Organization);
        assert_eq!(ImportKind::Subcat.entity(), EntityKind::Subcategory);
        assert_eq!(format!("{:<8}|", ImportKind::NetboxType.entity()), "NetboxType|");
        assert_eq!(format!("{:<8}|", ImportKind::Room.entity()), "Room    |");
    }
}
