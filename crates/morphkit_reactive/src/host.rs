//! Traits for the host-owned collaborators.
//!
//! The core never evaluates compiled keyframes or delivers change
//! notifications itself; those live with the host. The traits here are
//! the seams: morph targets describe the externally animated state,
//! the keyframe sink consumes full-replacement compiles, and the
//! change broker records which notifications the core wants.
//! Notifications flow back in through the
//! [`System::notify_*`](crate::System) methods.

use morphkit_curves::Keyframe;
use morphkit_foundation::ComponentId;

/// An externally owned morph target: a deformation target with a
/// scalar blend weight, renameable and re-boundable by the host.
pub trait MorphTarget {
    /// The target's current unique name.
    fn name(&self) -> &str;
    /// Lower slider bound.
    fn slider_min(&self) -> f64;
    /// Upper slider bound.
    fn slider_max(&self) -> f64;
    /// The externally animated value.
    fn value(&self) -> f64;
}

/// A plain morph-target description, useful for hosts that already
/// copied the fields out of their own structures.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicTarget {
    /// Unique target name.
    pub name: String,
    /// Lower slider bound.
    pub slider_min: f64,
    /// Upper slider bound.
    pub slider_max: f64,
    /// Current animated value.
    pub value: f64,
}

impl BasicTarget {
    /// Creates a target with `[0, 1]` bounds and a zero value.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slider_min: 0.0,
            slider_max: 1.0,
            value: 0.0,
        }
    }
}

impl MorphTarget for BasicTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn slider_min(&self) -> f64 {
        self.slider_min
    }

    fn slider_max(&self) -> f64 {
        self.slider_max
    }

    fn value(&self) -> f64 {
        self.value
    }
}

/// Consumes compiled keyframe lists, one named scalar channel per
/// entity. Every compile replaces the channel wholesale; there is no
/// incremental diff interface.
pub trait KeyframeSink {
    /// Replaces the named channel's keyframes.
    fn replace(&mut self, channel: &str, keyframes: &[Keyframe]);
}

/// A sink that drops everything, for hosts that only read declared
/// state.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl KeyframeSink for NullSink {
    fn replace(&mut self, _channel: &str, _keyframes: &[Keyframe]) {}
}

/// A sink that records every replacement, newest last.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    replaced: Vec<(String, Vec<Keyframe>)>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded replacements in order.
    #[must_use]
    pub fn replaced(&self) -> &[(String, Vec<Keyframe>)] {
        &self.replaced
    }

    /// The most recent keyframes pushed for a channel.
    #[must_use]
    pub fn last_for(&self, channel: &str) -> Option<&[Keyframe]> {
        self.replaced
            .iter()
            .rev()
            .find(|(name, _)| name == channel)
            .map(|(_, frames)| frames.as_slice())
    }
}

impl KeyframeSink for RecordingSink {
    fn replace(&mut self, channel: &str, keyframes: &[Keyframe]) {
        self.replaced.push((channel.to_string(), keyframes.to_vec()));
    }
}

/// The host's change-notification broker.
///
/// The core registers interest per component on creation and clears it
/// on disposal; the host delivers the actual notifications by calling
/// back into [`System::notify_target_renamed`] and
/// [`System::notify_target_bounds`](crate::System::notify_target_bounds).
///
/// [`System::notify_target_renamed`]: crate::System::notify_target_renamed
pub trait ChangeBroker {
    /// Registers interest in `attribute` changes of `object`, owned by
    /// the given component.
    fn subscribe(&mut self, object: &str, attribute: &str, owner: ComponentId);
    /// Clears every subscription held by the owner.
    fn unsubscribe(&mut self, owner: ComponentId);
}

/// A broker that ignores all registrations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBroker;

impl ChangeBroker for NullBroker {
    fn subscribe(&mut self, _object: &str, _attribute: &str, _owner: ComponentId) {}

    fn unsubscribe(&mut self, _owner: ComponentId) {}
}

/// A broker that tracks live subscriptions, for pairing checks.
#[derive(Clone, Debug, Default)]
pub struct RecordingBroker {
    active: Vec<(String, String, ComponentId)>,
}

impl RecordingBroker {
    /// Creates an empty recording broker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently live `(object, attribute, owner)` registrations.
    #[must_use]
    pub fn active(&self) -> &[(String, String, ComponentId)] {
        &self.active
    }

    /// Live registrations held by one owner.
    #[must_use]
    pub fn owned_by(&self, owner: ComponentId) -> usize {
        self.active.iter().filter(|(_, _, o)| *o == owner).count()
    }
}

impl ChangeBroker for RecordingBroker {
    fn subscribe(&mut self, object: &str, attribute: &str, owner: ComponentId) {
        self.active
            .push((object.to_string(), attribute.to_string(), owner));
    }

    fn unsubscribe(&mut self, owner: ComponentId) {
        self.active.retain(|(_, _, o)| *o != owner);
    }
}
