//! Component capsule behavior.

use morphkit::curves::Curve;
use morphkit::foundation::ComponentKind;
use morphkit::storage::{ComponentData, ComponentStore, PropertyData, RangeData, ValueData};

#[test]
fn capsules_carry_their_kind() {
    let mut store = ComponentStore::new();
    let value = store
        .create(ComponentData::Value(ValueData::new(0.5)), None)
        .unwrap();
    let curve = store
        .create(ComponentData::Curve(Curve::new()), None)
        .unwrap();

    assert_eq!(store.get(value).unwrap().kind(), ComponentKind::Value);
    assert_eq!(store.get(curve).unwrap().kind(), ComponentKind::Curve);
}

#[test]
fn typed_access_is_checked() {
    let mut store = ComponentStore::new();
    let id = store
        .create(ComponentData::Range(RangeData::new(0.0, 2.0)), None)
        .unwrap();

    let component = store.get(id).unwrap();
    assert_eq!(component.range().unwrap().max(), 2.0);
    assert!(component.value().is_err());
    assert!(component.curve().is_err());
}

#[test]
fn range_invariant_maintained_by_clamping() {
    let mut store = ComponentStore::new();
    let id = store
        .create(ComponentData::Range(RangeData::default()), None)
        .unwrap();

    let range = store.get_mut(id).unwrap().range_mut().unwrap();
    range.set_min(0.8);
    range.set_max(0.2);
    // Max cannot cross below min.
    assert!(range.min() <= range.max());
    assert_eq!(range.max(), 0.8);
}

#[test]
fn property_defaults_are_wide_open() {
    let property = PropertyData::default();
    assert_eq!(property.min, -100_000.0);
    assert_eq!(property.max, 100_000.0);
    assert_eq!(property.default, 0.0);
}

#[test]
fn disposal_is_reference_counted_by_the_orchestration() {
    // The store itself disposes unconditionally; the owner-set check
    // lives in the attach/detach orchestration. Double removal is
    // still observable here.
    let mut store = ComponentStore::new();
    let id = store
        .create(ComponentData::Value(ValueData::default()), None)
        .unwrap();
    assert!(store.remove(id).is_ok());
    assert!(store.remove(id).unwrap_err().is_lookup_failure());
}
