//! Tag set algebra tests.

use morphkit::foundation::TagSet;

#[test]
fn subset_drives_processor_matching() {
    let required = TagSet::from_tags(["weight"]);
    let attach = TagSet::from_tags(["driver", "weight"]);

    // A processor requiring `weight` accepts a component attached with
    // any superset of it.
    assert!(required.is_subset(&attach));
    assert!(!attach.is_subset(&required));
}

#[test]
fn empty_requirement_matches_everything() {
    let empty = TagSet::new();
    assert!(empty.is_subset(&TagSet::from_tags(["anything"])));
    assert!(empty.is_subset(&TagSet::new()));
}

#[test]
fn construction_normalizes() {
    let a = TagSet::from_tags(["b", "a", "b"]);
    let mut b = TagSet::new();
    b.insert("a");
    b.insert("b");
    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
}
