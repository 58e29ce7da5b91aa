//! Tag dispatch and processor argument maintenance.

use std::cell::RefCell;
use std::rc::Rc;

use morphkit::foundation::{ComponentId, TagSet};
use morphkit::reactive::System;
use morphkit::reactive::host::{BasicTarget, RecordingBroker, RecordingSink};
use morphkit::storage::{ComponentData, ValueData};

type TestSystem = System<RecordingSink, RecordingBroker>;

fn system() -> TestSystem {
    System::new(RecordingSink::new(), RecordingBroker::new())
}

fn value(system: &mut TestSystem, name: &str) -> ComponentId {
    system
        .world_mut()
        .components_mut()
        .create(
            ComponentData::Value(ValueData::default()),
            Some(name.to_string()),
        )
        .unwrap()
}

#[test]
fn arguments_track_attachments_incrementally() {
    let mut system = system();
    let jaw = system
        .create_entity(&BasicTarget::named("jaw"), None, None)
        .unwrap();
    system
        .registry_mut()
        .register("collect", |_, _, _| Ok(()))
        .unwrap();
    system
        .add_processor(jaw, "collect", TagSet::from_tags(["weight"]))
        .unwrap();

    let a = value(&mut system, "a");
    let b = value(&mut system, "b");
    let c = value(&mut system, "c");

    system.attach(jaw, a, TagSet::from_tags(["weight"])).unwrap();
    system
        .attach(jaw, b, TagSet::from_tags(["weight", "driver"]))
        .unwrap();
    system.attach(jaw, c, TagSet::from_tags(["driver"])).unwrap();

    // Exactly the components whose attach tags cover the requirement.
    let names: Vec<&str> = system.processors_of(jaw)[0]
        .arguments()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    system.detach(jaw, a).unwrap();
    let names: Vec<&str> = system.processors_of(jaw)[0]
        .arguments()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["b"]);
}

#[test]
fn handlers_see_the_world_and_their_arguments() {
    let mut system = system();
    let jaw = system
        .create_entity(&BasicTarget::named("jaw"), None, None)
        .unwrap();

    // The handler sums its argument values into the entity influence.
    system
        .registry_mut()
        .register("sum-influence", |world, entity, args| {
            let mut total = 0.0;
            for reference in args {
                total += world.resolve_component(reference)?.value()?.value();
            }
            world.entities_mut().get_mut(entity)?.set_influence(total);
            Ok(())
        })
        .unwrap();
    system
        .add_processor(jaw, "sum-influence", TagSet::from_tags(["weight"]))
        .unwrap();

    let a = value(&mut system, "a");
    let b = value(&mut system, "b");
    system.attach(jaw, a, TagSet::from_tags(["weight"])).unwrap();
    system.attach(jaw, b, TagSet::from_tags(["weight"])).unwrap();

    system.set_value(a, 0.25).unwrap();
    system.set_value(b, 0.5).unwrap();
    assert!((system.world().entities().get(jaw).unwrap().influence() - 0.75).abs() < 1e-12);

    // Detaching re-runs the processor without the component.
    system.detach(jaw, b).unwrap();
    assert!((system.world().entities().get(jaw).unwrap().influence() - 0.25).abs() < 1e-12);
}

#[test]
fn failures_stay_isolated_per_processor() {
    let mut system = system();
    let jaw = system
        .create_entity(&BasicTarget::named("jaw"), None, None)
        .unwrap();
    let brow = system
        .create_entity(&BasicTarget::named("brow"), None, None)
        .unwrap();

    let ran = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&ran);
    system
        .registry_mut()
        .register("fails", |_, _, _| {
            Err(morphkit::foundation::Error::internal("misconfigured node"))
        })
        .unwrap();
    system
        .registry_mut()
        .register("records", move |_, entity, _| {
            seen.borrow_mut().push(entity);
            Ok(())
        })
        .unwrap();

    system.add_processor(jaw, "fails", TagSet::new()).unwrap();
    system.add_processor(jaw, "records", TagSet::new()).unwrap();
    system.add_processor(brow, "records", TagSet::new()).unwrap();
    ran.borrow_mut().clear();

    // One shared component across both entities.
    let shared = value(&mut system, "shared");
    system.attach(jaw, shared, TagSet::new()).unwrap();
    system.attach(brow, shared, TagSet::new()).unwrap();
    system.set_value(shared, 0.4).unwrap();

    // The failing processor on jaw never stopped the healthy ones on
    // jaw or brow.
    assert!(ran.borrow().contains(&jaw));
    assert!(ran.borrow().contains(&brow));
}

#[test]
fn processor_state_survives_entity_queries() {
    let mut system = system();
    let jaw = system
        .create_entity(&BasicTarget::named("jaw"), None, None)
        .unwrap();
    system
        .registry_mut()
        .register("noop", |_, _, _| Ok(()))
        .unwrap();
    system
        .add_processor(jaw, "noop", TagSet::from_tags(["weight"]))
        .unwrap();

    let removed = system.remove_processor(jaw, "noop").unwrap();
    assert_eq!(removed.handler(), "noop");
    assert!(system.remove_processor(jaw, "noop").is_err());
}
