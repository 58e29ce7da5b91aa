//! Reference path and collection tests.

use morphkit::foundation::{
    ComponentId, ComponentKind, EntityId, RefPath, Reference, ReferenceCollection, TagSet,
};

#[test]
fn paths_serialize_as_strings() {
    let entity = RefPath::Entity(EntityId(12));
    assert_eq!(entity.to_string(), "entity/12");

    let component = RefPath::Component(ComponentKind::MorphTarget, ComponentId(3));
    assert_eq!(component.to_string(), "component/target/3");

    let parsed: RefPath = "component/target/3".parse().unwrap();
    assert_eq!(parsed, component);
}

#[test]
fn malformed_paths_fail_recoverably() {
    for raw in ["entity", "component/value", "widget/1", "entity/-4"] {
        assert!(raw.parse::<RefPath>().unwrap_err().is_lookup_failure());
    }
}

#[test]
fn collections_filter_by_attach_tags() {
    let mut collection = ReferenceCollection::new();
    collection.push(Reference::with_tags(
        "weight",
        RefPath::Component(ComponentKind::Value, ComponentId(1)),
        TagSet::from_tags(["weight", "driver"]),
    ));
    collection.push(Reference::with_tags(
        "bounds",
        RefPath::Component(ComponentKind::Range, ComponentId(2)),
        TagSet::from_tags(["bounds"]),
    ));

    let required = TagSet::from_tags(["driver"]);
    let matched: Vec<&str> = collection
        .matching(&required)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(matched, vec!["weight"]);
}

#[test]
fn removal_by_path_is_exact() {
    let mut collection = ReferenceCollection::new();
    let path_a = RefPath::Component(ComponentKind::Value, ComponentId(1));
    let path_b = RefPath::Component(ComponentKind::Value, ComponentId(2));
    collection.push(Reference::new("a", path_a));
    collection.push(Reference::new("b", path_b));

    assert!(collection.remove(path_a).is_some());
    assert!(collection.remove(path_a).is_none());
    assert!(collection.contains(path_b));
}
