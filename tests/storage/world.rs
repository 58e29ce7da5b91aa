//! World-level linking and resolution.

use morphkit::foundation::{RefPath, TagSet};
use morphkit::storage::{ComponentData, ValueData, World};

#[test]
fn attach_detach_round_trip_is_exact() {
    let mut world = World::new();
    let jaw = world.entities_mut().insert("jaw", None, None).unwrap();
    let weight = world
        .components_mut()
        .create(ComponentData::Value(ValueData::default()), None)
        .unwrap();

    let entity_before = world.entities().get(jaw).unwrap().components().clone();
    let owners_before = world.components().get(weight).unwrap().owners().clone();

    world
        .link(jaw, weight, TagSet::from_tags(["weight"]))
        .unwrap();
    world.unlink(jaw, weight).unwrap();

    assert_eq!(
        world.entities().get(jaw).unwrap().components(),
        &entity_before
    );
    assert_eq!(world.components().get(weight).unwrap().owners(), &owners_before);
}

#[test]
fn references_resolve_against_the_stores() {
    let mut world = World::new();
    let jaw = world.entities_mut().insert("jaw", None, None).unwrap();
    let weight = world
        .components_mut()
        .create(ComponentData::Value(ValueData::default()), None)
        .unwrap();
    world.link(jaw, weight, TagSet::new()).unwrap();

    // Follow the entity-side reference back to the component.
    let reference = world
        .entities()
        .get(jaw)
        .unwrap()
        .components()
        .iter()
        .next()
        .unwrap()
        .clone();
    let component = world.resolve_component(&reference).unwrap();
    assert_eq!(component.id(), weight);

    // And the owner-side reference back to the entity.
    let owner = world
        .components()
        .get(weight)
        .unwrap()
        .owners()
        .iter()
        .next()
        .unwrap()
        .clone();
    let entity = world.resolve_entity(&owner).unwrap();
    assert_eq!(entity.id(), jaw);
    assert_eq!(owner.path, RefPath::Entity(jaw));
}

#[test]
fn validation_precedes_mutation() {
    let mut world = World::new();
    let jaw = world.entities_mut().insert("jaw", None, None).unwrap();
    let weight = world
        .components_mut()
        .create(ComponentData::Value(ValueData::default()), None)
        .unwrap();

    world.link(jaw, weight, TagSet::new()).unwrap();
    // A rejected re-link leaves the existing link untouched.
    assert!(world.link(jaw, weight, TagSet::new()).is_err());
    assert_eq!(world.entities().get(jaw).unwrap().components().len(), 1);
    assert_eq!(world.components().get(weight).unwrap().owners().len(), 1);
}
