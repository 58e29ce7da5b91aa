//! External change intake and re-entrancy behavior.

use morphkit::foundation::TagSet;
use morphkit::reactive::System;
use morphkit::reactive::host::{BasicTarget, RecordingBroker, RecordingSink};
use morphkit::storage::ComponentData;

type TestSystem = System<RecordingSink, RecordingBroker>;

fn system() -> TestSystem {
    System::new(RecordingSink::new(), RecordingBroker::new())
}

#[test]
fn rename_keeps_mirror_and_subscriptions_in_sync() {
    let mut system = system();
    system
        .create_entity(&BasicTarget::named("smile"), None, None)
        .unwrap();

    system.notify_target_renamed("smile", "smile_wide").unwrap();

    // The old key no longer names a binding.
    assert!(system.notify_target_bounds("smile", 0.0, 1.0).is_err());
    // The new key does.
    system.notify_target_bounds("smile_wide", 0.0, 2.0).unwrap();
    assert!(
        system
            .broker()
            .active()
            .iter()
            .all(|(object, _, _)| object == "smile_wide")
    );
}

#[test]
fn repeated_notifications_converge() {
    let mut system = system();
    let jaw = system
        .create_entity(&BasicTarget::named("jaw"), None, None)
        .unwrap();

    // A host that redundantly redelivers the same change must not
    // wedge or loop the core.
    for _ in 0..3 {
        system.notify_target_bounds("jaw", -1.0, 1.0).unwrap();
    }
    assert_eq!(
        system.world().entities().get(jaw).unwrap().value_range(),
        (-1.0, 1.0)
    );
}

#[test]
fn bounds_change_recompiles_the_channel() {
    let mut system = system();
    system
        .create_entity(&BasicTarget::named("jaw"), None, None)
        .unwrap();
    let pushes = system.sink().replaced().len();

    system.notify_target_bounds("jaw", 0.0, 3.0).unwrap();

    assert!(system.sink().replaced().len() > pushes);
    let frames = system.sink().last_for("jaw").unwrap();
    assert!((frames.last().unwrap().position.y - 3.0).abs() < 1e-9);
}

#[test]
fn curve_attachment_drives_the_channel() {
    let mut system = system();
    let jaw = system
        .create_entity(&BasicTarget::named("jaw"), None, None)
        .unwrap();
    let curve = system
        .world_mut()
        .components_mut()
        .create(
            ComponentData::Curve(morphkit::curves::Curve::from_preset(
                morphkit::curves::Interpolation::Sine,
                morphkit::curves::Easing::InOut,
            )),
            Some("jaw.curve".into()),
        )
        .unwrap();

    system.attach(jaw, curve, TagSet::from_tags(["curve"])).unwrap();
    assert_eq!(system.sink().last_for("jaw").unwrap().len(), 4);

    // Detaching falls back to the implicit linear curve.
    system.detach(jaw, curve).unwrap();
    assert_eq!(system.sink().last_for("jaw").unwrap().len(), 2);
}
