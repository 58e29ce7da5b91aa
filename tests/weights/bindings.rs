//! Compiled weight bindings over a live system.

use morphkit::foundation::ComponentKind;
use morphkit::reactive::System;
use morphkit::reactive::host::{BasicTarget, NullBroker, NullSink};
use morphkit::weights::{AggregatePolicy, WeightGraph};

fn face() -> (System<NullSink, NullBroker>, Vec<morphkit::foundation::EntityId>) {
    let mut system = System::new(NullSink, NullBroker);
    let root = system
        .create_entity(&BasicTarget::named("face"), None, None)
        .unwrap();
    let jaw = system
        .create_entity(&BasicTarget::named("jaw"), Some(root), None)
        .unwrap();
    let lip = system
        .create_entity(&BasicTarget::named("lip"), Some(jaw), None)
        .unwrap();
    (system, vec![root, jaw, lip])
}

#[test]
fn bindings_declare_the_parent_chain() {
    let (system, ids) = face();
    let graph = WeightGraph::new();

    let root = graph.binding(system.world(), ids[0]).unwrap();
    assert_eq!(root.expression, "value");

    let jaw = graph.binding(system.world(), ids[1]).unwrap();
    assert_eq!(jaw.expression, "input*value");
    assert_eq!(jaw.variables[1].1, "channel/face");

    let lip = graph.binding(system.world(), ids[2]).unwrap();
    assert_eq!(lip.variables[1].1, "channel/jaw");
}

#[test]
fn value_variable_targets_the_wired_input_parameter() {
    let (system, ids) = face();
    let graph = WeightGraph::new();

    let binding = graph.binding(system.world(), ids[1]).unwrap();
    let (_, target) = &binding.variables[0];
    // Entities created through the system carry a property parameter.
    let path: morphkit::foundation::RefPath = target.parse().unwrap();
    let (kind, id) = path.as_component().unwrap();
    assert_eq!(kind, ComponentKind::Property);
    assert!(system.world().components().get(id).is_ok());
}

#[test]
fn reparenting_substitutes_the_new_parent_channel() {
    let (mut system, ids) = face();
    let mut graph = WeightGraph::new();
    graph.declare(system.world(), ids[1]).unwrap();
    graph.declare(system.world(), ids[2]).unwrap();

    // Move lip from jaw to directly under face.
    system.move_entity(ids[2], Some(ids[0]), None).unwrap();
    let binding = graph.on_reparented(system.world(), ids[2]).unwrap();
    assert_eq!(binding.variables[1].1, "channel/face");

    // Jaw's expression is untouched: only the direct parent reference
    // of the moved entity changes.
    let jaw = graph.binding(system.world(), ids[1]).unwrap();
    assert_eq!(jaw.variables[1].1, "channel/face");
    assert_eq!(jaw.expression, "input*value");
}

#[test]
fn aggregation_replaces_the_default_expression() {
    let (mut system, ids) = face();
    let mut graph = WeightGraph::new();

    let sibling = system
        .create_entity(&BasicTarget::named("cheek"), Some(ids[0]), None)
        .unwrap();
    graph.add_contributor(system.world(), ids[1], sibling).unwrap();
    let binding = graph
        .add_contributor(system.world(), ids[1], ids[2])
        .unwrap();
    assert_eq!(binding.expression, "v1*v2");

    let binding = graph
        .set_policy(system.world(), ids[1], AggregatePolicy::Average)
        .unwrap();
    assert_eq!(binding.expression, "(v1+v2)/2.0");

    // Dropping back to the default restores the parent chain.
    let binding = graph.clear_policy(system.world(), ids[1]).unwrap();
    assert_eq!(binding.expression, "input*value");
}

#[test]
fn forgetting_removed_entities_clears_declarations() {
    let (mut system, ids) = face();
    let mut graph = WeightGraph::new();
    graph.declare(system.world(), ids[2]).unwrap();

    system.remove_entity(ids[2]).unwrap();
    graph.forget(ids[2]);
    assert!(graph.expr(ids[2]).is_none());
    assert!(graph.binding(system.world(), ids[2]).is_err());
}
