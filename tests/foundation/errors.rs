//! Error taxonomy tests.

use morphkit::foundation::{
    ComponentId, ComponentKind, EntityId, Error, ErrorKind, StructuralKind,
};

#[test]
fn lookup_failures_identify_the_path() {
    let err = Error::lookup_failure("component/curve/9");
    assert!(err.is_lookup_failure());
    assert!(format!("{err}").contains("component/curve/9"));
}

#[test]
fn taxonomy_kinds_are_distinguishable() {
    let errors = [
        Error::lookup_failure("entity/1"),
        Error::type_mismatch(ComponentKind::Curve, ComponentKind::Value),
        Error::duplicate_name("jaw"),
        Error::structural(StructuralKind::PointMinimum),
        Error::processor_binding("sync"),
    ];

    assert!(matches!(errors[0].kind, ErrorKind::LookupFailure { .. }));
    assert!(matches!(errors[1].kind, ErrorKind::TypeMismatch { .. }));
    assert!(matches!(errors[2].kind, ErrorKind::DuplicateName { .. }));
    assert!(matches!(errors[3].kind, ErrorKind::Structural(_)));
    assert!(matches!(errors[4].kind, ErrorKind::ProcessorBinding { .. }));
}

#[test]
fn structural_messages_name_both_parties() {
    let err = Error::structural(StructuralKind::AlreadyAttached {
        entity: EntityId(2),
        component: ComponentId(7),
    });
    let message = format!("{err}");
    assert!(message.contains("Entity(2)"));
    assert!(message.contains("Component(7)"));
}

#[test]
fn context_is_carried_but_not_displayed_in_kind() {
    let err = Error::duplicate_name("brow").with_context("attach");
    assert_eq!(err.context.as_deref(), Some("attach"));
    assert!(format!("{err}").contains("brow"));
}
