//! The reactive orchestration facade.
//!
//! [`System`] owns the world, the per-entity processor lists, and the
//! handler registry, and drives every reactive path: attach/detach
//! with hooks and incremental argument maintenance, scalar writes with
//! mirror propagation, curve edits with keyframe recompilation, and
//! synchronous change intake from the host.
//!
//! Execution is single-threaded and run-to-completion. The only
//! locking anywhere is the per-component in-progress guard that breaks
//! notification loops: a guarded entry point that observes its own
//! component already in progress returns without re-running, and the
//! guard is cleared on every exit path.

use std::collections::{BTreeMap, HashSet};

use morphkit_curves::{Curve, CurvePoint, Easing, Extend, HandleType, Interpolation};
use morphkit_foundation::{
    ComponentId, ComponentKind, EntityId, Error, Reference, Result, StructuralKind, TagSet,
};
use morphkit_storage::{Component, ComponentData, MorphTargetData, PropertyData, World};

use crate::host::{ChangeBroker, KeyframeSink, MorphTarget};
use crate::processor::Processor;
use crate::registry::ProcessorRegistry;

/// The reactive runtime: world state plus processors, hooks, and host
/// collaborators.
pub struct System<S: KeyframeSink, B: ChangeBroker> {
    world: World,
    processors: BTreeMap<EntityId, Vec<Processor>>,
    registry: ProcessorRegistry,
    sink: S,
    broker: B,
    in_progress: HashSet<ComponentId>,
}

impl<S: KeyframeSink, B: ChangeBroker> System<S, B> {
    /// Creates an empty system around the host collaborators.
    pub fn new(sink: S, broker: B) -> Self {
        Self {
            world: World::new(),
            processors: BTreeMap::new(),
            registry: ProcessorRegistry::new(),
            sink,
            broker,
            in_progress: HashSet::new(),
        }
    }

    /// Reassembles a system from previously serialized state.
    ///
    /// The registry is rebuilt by the host's bootstrap; processors
    /// whose handler ids are missing surface as isolated dispatch
    /// warnings, not load failures.
    pub fn from_parts(
        world: World,
        processors: BTreeMap<EntityId, Vec<Processor>>,
        registry: ProcessorRegistry,
        sink: S,
        broker: B,
    ) -> Self {
        Self {
            world,
            processors,
            registry,
            sink,
            broker,
            in_progress: HashSet::new(),
        }
    }

    /// The world state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world state, mutable. Structural invariants are maintained
    /// by the stores themselves; reactive re-dispatch stays with the
    /// system's own methods.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The handler registry.
    #[must_use]
    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// The handler registry, mutable (bootstrap registration).
    pub fn registry_mut(&mut self) -> &mut ProcessorRegistry {
        &mut self.registry
    }

    /// The keyframe sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The change broker.
    #[must_use]
    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// All processor lists, keyed by entity.
    #[must_use]
    pub fn processors(&self) -> &BTreeMap<EntityId, Vec<Processor>> {
        &self.processors
    }

    /// The processors bound to one entity.
    #[must_use]
    pub fn processors_of(&self, entity: EntityId) -> &[Processor] {
        self.processors.get(&entity).map_or(&[], Vec::as_slice)
    }

    // --- Entity lifecycle ---

    /// Creates an entity bound to a morph target, wiring its binding
    /// component, input parameter, and initial keyframe push.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown parent and a
    /// duplicate-name error when the target name (or a derived
    /// component name) is taken. Nothing is mutated on failure.
    pub fn create_entity(
        &mut self,
        target: &dyn MorphTarget,
        parent: Option<EntityId>,
        position: Option<usize>,
    ) -> Result<EntityId> {
        let name = target.name().to_string();
        let binding_name = format!("{name}.target");
        let input_name = format!("{name}.input");
        if self.world.components().find_by_name(&binding_name).is_some() {
            return Err(Error::duplicate_name(binding_name));
        }
        if self.world.components().find_by_name(&input_name).is_some() {
            return Err(Error::duplicate_name(input_name));
        }
        let input_range = match parent {
            Some(parent_id) => self.world.entities().get(parent_id)?.value_range(),
            None => (0.0, 1.0),
        };

        let entity = self
            .world
            .entities_mut()
            .insert(name.clone(), parent, position)?;
        {
            let e = self.world.entities_mut().get_mut(entity)?;
            e.set_value_range(target.slider_min(), target.slider_max());
            e.set_input_range(input_range.0, input_range.1);
        }

        let binding = self.world.components_mut().create(
            ComponentData::MorphTarget(MorphTargetData::new(
                name.clone(),
                target.slider_min(),
                target.slider_max(),
            )),
            Some(binding_name),
        )?;
        {
            let c = self.world.components_mut().get_mut(binding)?;
            c.set_disposable(true);
            c.set_hide(true);
            c.set_label("Name");
        }
        self.world.bind_morph(entity, binding)?;
        self.broker.subscribe(&name, "name", binding);
        self.broker.subscribe(&name, "bounds", binding);

        let input = self.world.components_mut().create(
            ComponentData::Property(PropertyData::unit()),
            Some(input_name),
        )?;
        {
            let c = self.world.components_mut().get_mut(input)?;
            c.set_disposable(true);
            c.set_hide(true);
        }
        self.world.bind_parameter(entity, input)?;

        self.refresh_channel(entity)?;
        Ok(entity)
    }

    /// Removes an entity and its whole subtree: severs every link,
    /// unsubscribes and disposes the orphaned disposables, drops the
    /// subtree's processors, and removes the entities from the tree.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Vec<EntityId>> {
        let subtree = self.world.entities().subtree_of(id)?;
        for &member in &subtree {
            let purged = self.world.purge_entity_links(member)?;
            for component in purged {
                let Ok(capsule) = self.world.components().get(component) else {
                    continue;
                };
                let kind = capsule.kind();
                let dispose = capsule.disposable() && capsule.owners().is_empty();
                if kind == ComponentKind::MorphTarget {
                    self.broker.unsubscribe(component);
                }
                if dispose {
                    self.world.components_mut().remove(component)?;
                }
            }
            self.processors.remove(&member);
        }
        self.world.entities_mut().remove(id)
    }

    /// Moves an entity under a new parent, updating the input remap to
    /// the new parent's value range and re-pushing the channel.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown ids and a structural
    /// error for a move into the entity's own subtree.
    pub fn move_entity(
        &mut self,
        id: EntityId,
        new_parent: Option<EntityId>,
        position: Option<usize>,
    ) -> Result<()> {
        self.world.entities_mut().move_to(id, new_parent, position)?;
        let input_range = match self.world.entities().parent_of(id)? {
            Some(parent_id) => self.world.entities().get(parent_id)?.value_range(),
            None => (0.0, 1.0),
        };
        self.world
            .entities_mut()
            .get_mut(id)?
            .set_input_range(input_range.0, input_range.1);
        self.refresh_channel(id)
    }

    // --- Attachment ---

    /// Attaches a component to an entity with the given capability
    /// tags: links both sides, runs the component's on-attach hook,
    /// appends the component to every matching processor's argument
    /// list, and re-runs exactly those processors.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown ids and a structural
    /// error when already attached. Nothing is mutated on failure.
    pub fn attach(
        &mut self,
        entity: EntityId,
        component: ComponentId,
        tags: TagSet,
    ) -> Result<()> {
        self.world.link(entity, component, tags.clone())?;

        let reference = {
            let c = self.world.components().get(component)?;
            Reference::new(c.name().to_string(), c.path())
        };
        let mut touched = Vec::new();
        if let Some(list) = self.processors.get_mut(&entity) {
            for (index, processor) in list.iter_mut().enumerate() {
                if processor.matches(&tags) {
                    processor.push_argument(reference.clone());
                    touched.push(index);
                }
            }
        }

        self.on_attached(entity, component)?;
        self.run_processors(entity, &touched);
        Ok(())
    }

    /// Detaches a component from an entity: removes it from every
    /// processor argument list it satisfied, unlinks both sides, runs
    /// the on-detach hook, disposes a disposable component whose owner
    /// set emptied, and re-runs the affected processors.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown ids (a second detach of
    /// an already-disposed component lands here) and a structural
    /// error when not attached.
    pub fn detach(&mut self, entity: EntityId, component: ComponentId) -> Result<()> {
        if !self.world.is_attached(entity, component)? {
            return Err(Error::structural(StructuralKind::NotAttached {
                entity,
                component,
            }));
        }

        let path = self.world.components().get(component)?.path();
        let mut touched = Vec::new();
        if let Some(list) = self.processors.get_mut(&entity) {
            for (index, processor) in list.iter_mut().enumerate() {
                if processor.remove_argument(path) {
                    touched.push(index);
                }
            }
        }

        self.world.unlink(entity, component)?;
        self.on_detached(entity, component)?;

        let dispose = {
            let c = self.world.components().get(component)?;
            c.disposable() && c.owners().is_empty()
        };
        if dispose {
            self.world.components_mut().remove(component)?;
        }

        self.run_processors(entity, &touched);
        Ok(())
    }

    // --- Processors ---

    /// Binds a registered handler to an entity with a required tag
    /// set. The argument list is seeded from the currently attached
    /// matching components and the processor runs once immediately.
    ///
    /// # Errors
    ///
    /// Fails with a processor-binding error for an unregistered
    /// handler id and a lookup failure for an unknown entity.
    pub fn add_processor(&mut self, entity: EntityId, handler: &str, tags: TagSet) -> Result<()> {
        if !self.registry.contains(handler) {
            return Err(Error::processor_binding(handler));
        }
        let (entity_ref, arguments) = {
            let e = self.world.entities().get(entity)?;
            let entity_ref = Reference::to_entity(e.name().to_string(), entity);
            let arguments: Vec<Reference> = e
                .components()
                .matching(&tags)
                .map(|r| Reference::new(r.name.clone(), r.path))
                .collect();
            (entity_ref, arguments)
        };

        let list = self.processors.entry(entity).or_default();
        list.push(Processor::new(entity_ref, handler, tags, arguments));
        let index = list.len() - 1;
        self.run_processors(entity, &[index]);
        Ok(())
    }

    /// Removes the first processor with the given handler id from an
    /// entity.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure when no such processor exists.
    pub fn remove_processor(&mut self, entity: EntityId, handler: &str) -> Result<Processor> {
        let missing = || Error::lookup_failure(format!("processor {handler} on entity/{}", entity.0));
        let list = self.processors.get_mut(&entity).ok_or_else(missing)?;
        let position = list
            .iter()
            .position(|p| p.handler() == handler)
            .ok_or_else(missing)?;
        Ok(list.remove(position))
    }

    // --- Scalar writes ---

    /// Writes a value component, re-running the processors that carry
    /// it and propagating the write to its mirror (one hop, never
    /// recursive).
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown component and a type
    /// mismatch for a non-value component.
    pub fn set_value(&mut self, component: ComponentId, value: f64) -> Result<()> {
        self.world.components().get(component)?.value()?;
        if !self.in_progress.insert(component) {
            return Ok(());
        }
        let result = self.set_value_guarded(component, value);
        self.in_progress.remove(&component);
        result
    }

    fn set_value_guarded(&mut self, component: ComponentId, value: f64) -> Result<()> {
        self.world
            .components_mut()
            .get_mut(component)?
            .value_mut()?
            .set_value(value);
        self.run_component_processors(component)?;

        if let Some(mirror) = self.resolve_mirror(component, ComponentKind::Value) {
            self.world
                .components_mut()
                .get_mut(mirror)?
                .value_mut()?
                .set_value(value);
            self.run_component_processors(mirror)?;
        }
        Ok(())
    }

    /// Writes a range component's lower bound (clamped against the
    /// upper), re-running its processors when the stored value changed
    /// and propagating to the mirror.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown component and a type
    /// mismatch for a non-range component.
    pub fn set_range_min(&mut self, component: ComponentId, value: f64) -> Result<()> {
        self.world.components().get(component)?.range()?;
        if !self.in_progress.insert(component) {
            return Ok(());
        }
        let result = self.set_range_guarded(component, value, true);
        self.in_progress.remove(&component);
        result
    }

    /// Writes a range component's upper bound (clamped against the
    /// lower); otherwise identical to [`System::set_range_min`].
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown component and a type
    /// mismatch for a non-range component.
    pub fn set_range_max(&mut self, component: ComponentId, value: f64) -> Result<()> {
        self.world.components().get(component)?.range()?;
        if !self.in_progress.insert(component) {
            return Ok(());
        }
        let result = self.set_range_guarded(component, value, false);
        self.in_progress.remove(&component);
        result
    }

    fn set_range_guarded(&mut self, component: ComponentId, value: f64, lower: bool) -> Result<()> {
        let changed = {
            let range = self.world.components_mut().get_mut(component)?.range_mut()?;
            if lower {
                range.set_min(value)
            } else {
                range.set_max(value)
            }
        };
        if changed {
            self.run_component_processors(component)?;
        }

        if let Some(mirror) = self.resolve_mirror(component, ComponentKind::Range) {
            let changed = {
                let range = self.world.components_mut().get_mut(mirror)?.range_mut()?;
                if lower {
                    range.set_min(value)
                } else {
                    range.set_max(value)
                }
            };
            if changed {
                self.run_component_processors(mirror)?;
            }
        }
        Ok(())
    }

    /// Resolves a component's mirror link to a same-kind component id.
    /// An unresolvable or wrong-kind mirror is reported and skipped.
    fn resolve_mirror(&self, component: ComponentId, kind: ComponentKind) -> Option<ComponentId> {
        let capsule = self.world.components().get(component).ok()?;
        let mirror = capsule.mirror()?.clone();
        match self.world.components().resolve(mirror.path) {
            Ok(counterpart) if counterpart.kind() == kind => Some(counterpart.id()),
            Ok(counterpart) => {
                log::warn!(
                    "mirror of {component} has kind {}, expected {kind}",
                    counterpart.kind()
                );
                None
            }
            Err(err) => {
                log::warn!("mirror {mirror} of {component} did not resolve: {err}");
                None
            }
        }
    }

    // --- Curve editing ---

    /// Selects a curve component's interpolation preset.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure or type mismatch on a bad target.
    pub fn curve_set_interpolation(
        &mut self,
        component: ComponentId,
        interpolation: Interpolation,
    ) -> Result<()> {
        self.touch_curve(component, |curve| {
            curve.set_interpolation(interpolation);
            Ok(())
        })
    }

    /// Changes a curve component's easing direction.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure or type mismatch on a bad target.
    pub fn curve_set_easing(&mut self, component: ComponentId, easing: Easing) -> Result<()> {
        self.touch_curve(component, |curve| {
            curve.set_easing(easing);
            Ok(())
        })
    }

    /// Changes a curve component's extend policy.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure or type mismatch on a bad target.
    pub fn curve_set_extend(&mut self, component: ComponentId, extend: Extend) -> Result<()> {
        self.touch_curve(component, |curve| {
            curve.set_extend(extend);
            Ok(())
        })
    }

    /// Adds a control point to a curve component.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure or type mismatch on a bad target.
    pub fn curve_add_point(
        &mut self,
        component: ComponentId,
        location: (f64, f64),
    ) -> Result<usize> {
        self.touch_curve(component, |curve| Ok(curve.add_point(location)))
    }

    /// Removes a control point from a curve component.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for a bad index, a structural error
    /// below the two-point minimum, or a type mismatch on a bad target.
    pub fn curve_remove_point(
        &mut self,
        component: ComponentId,
        index: usize,
    ) -> Result<CurvePoint> {
        self.touch_curve(component, |curve| curve.remove_point(index))
    }

    /// Moves a control point of a curve component.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for a bad index or target, or a
    /// type mismatch on a non-curve component.
    pub fn curve_set_point_location(
        &mut self,
        component: ComponentId,
        index: usize,
        location: (f64, f64),
    ) -> Result<()> {
        self.touch_curve(component, |curve| curve.set_location(index, location))
    }

    /// Changes a control point's handle policy.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for a bad index or target, or a
    /// type mismatch on a non-curve component.
    pub fn curve_set_point_handle(
        &mut self,
        component: ComponentId,
        index: usize,
        handle: HandleType,
    ) -> Result<()> {
        self.touch_curve(component, |curve| curve.set_handle(index, handle))
    }

    fn touch_curve<R>(
        &mut self,
        component: ComponentId,
        edit: impl FnOnce(&mut Curve) -> Result<R>,
    ) -> Result<R> {
        let result = edit(self.world.components_mut().get_mut(component)?.curve_mut()?)?;
        self.run_component_processors(component)?;
        let owners: Vec<EntityId> = self
            .world
            .components()
            .get(component)?
            .owners()
            .iter()
            .filter_map(|r| r.path.as_entity())
            .collect();
        for owner in owners {
            self.refresh_channel(owner)?;
        }
        Ok(result)
    }

    // --- Channels ---

    /// Sets the lower bound of an entity's input remap (kept below the
    /// upper bound) and re-pushes the channel.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn set_input_range_min(&mut self, entity: EntityId, value: f64) -> Result<()> {
        self.world
            .entities_mut()
            .get_mut(entity)?
            .set_input_range_min(value);
        self.refresh_channel(entity)
    }

    /// Sets the upper bound of an entity's input remap (kept above the
    /// lower bound) and re-pushes the channel.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn set_input_range_max(&mut self, entity: EntityId, value: f64) -> Result<()> {
        self.world
            .entities_mut()
            .get_mut(entity)?
            .set_input_range_max(value);
        self.refresh_channel(entity)
    }

    /// Sets the lower bound of an entity's value remap and re-pushes
    /// the channel.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn set_value_range_min(&mut self, entity: EntityId, value: f64) -> Result<()> {
        self.world
            .entities_mut()
            .get_mut(entity)?
            .set_value_range_min(value);
        self.refresh_channel(entity)
    }

    /// Sets the upper bound of an entity's value remap and re-pushes
    /// the channel.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn set_value_range_max(&mut self, entity: EntityId, value: f64) -> Result<()> {
        self.world
            .entities_mut()
            .get_mut(entity)?
            .set_value_range_max(value);
        self.refresh_channel(entity)
    }

    /// Recompiles an entity's curve into its keyframe channel and
    /// pushes the full replacement to the sink. The curve is the
    /// entity's first attached curve component; entities without one
    /// compile an implicit linear curve. The domain remap is the
    /// entity's input range and the range remap its value range.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn refresh_channel(&mut self, entity: EntityId) -> Result<()> {
        let (name, input_range, value_range, curve_id) = {
            let e = self.world.entities().get(entity)?;
            let curve_id = e.components().iter().find_map(|r| {
                r.path
                    .as_component()
                    .and_then(|(kind, id)| (kind == ComponentKind::Curve).then_some(id))
            });
            (
                e.name().to_string(),
                e.input_range(),
                e.value_range(),
                curve_id,
            )
        };
        let curve = match curve_id {
            Some(id) => self.world.components().get(id)?.curve()?.clone(),
            None => Curve::new(),
        };
        let keyframes = curve.compile(Some(input_range), Some(value_range))?;
        self.sink.replace(&name, &keyframes);
        Ok(())
    }

    // --- Change intake ---

    /// Delivers a morph-target rename from the host: updates the
    /// binding mirror and the entity name, re-registers the broker
    /// subscriptions under the new key, re-runs the binding's
    /// processors, and re-pushes the channel.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure when no binding mirrors `old`.
    pub fn notify_target_renamed(&mut self, old: &str, new: &str) -> Result<()> {
        let component = self.find_binding(old)?;
        if !self.in_progress.insert(component) {
            return Ok(());
        }
        let result = self.renamed_guarded(component, old, new);
        self.in_progress.remove(&component);
        result
    }

    fn renamed_guarded(&mut self, component: ComponentId, old: &str, new: &str) -> Result<()> {
        self.world
            .components_mut()
            .get_mut(component)?
            .morph_target_mut()?
            .target = new.to_string();

        if let Some(entity) = self.world.entities().find_by_name(old) {
            self.world.entities_mut().get_mut(entity)?.set_name(new);
            self.broker.unsubscribe(component);
            self.broker.subscribe(new, "name", component);
            self.broker.subscribe(new, "bounds", component);
            self.run_component_processors(component)?;
            self.refresh_channel(entity)?;
        }
        Ok(())
    }

    /// Delivers a morph-target bounds change from the host: updates
    /// the binding mirror and the entity's value range, re-runs the
    /// binding's processors, and re-pushes the channel.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure when no binding mirrors `name`.
    pub fn notify_target_bounds(&mut self, name: &str, min: f64, max: f64) -> Result<()> {
        let component = self.find_binding(name)?;
        if !self.in_progress.insert(component) {
            return Ok(());
        }
        let result = self.bounds_guarded(component, name, min, max);
        self.in_progress.remove(&component);
        result
    }

    fn bounds_guarded(
        &mut self,
        component: ComponentId,
        name: &str,
        min: f64,
        max: f64,
    ) -> Result<()> {
        {
            let data = self
                .world
                .components_mut()
                .get_mut(component)?
                .morph_target_mut()?;
            data.slider_min = min;
            data.slider_max = max;
        }

        if let Some(entity) = self.world.entities().find_by_name(name) {
            self.world
                .entities_mut()
                .get_mut(entity)?
                .set_value_range(min, max);
            self.run_component_processors(component)?;
            self.refresh_channel(entity)?;
        }
        Ok(())
    }

    fn find_binding(&self, target: &str) -> Result<ComponentId> {
        self.world
            .components()
            .of_kind(ComponentKind::MorphTarget)
            .find(|c| c.morph_target().map(|d| d.target == target).unwrap_or(false))
            .map(Component::id)
            .ok_or_else(|| Error::lookup_failure(target))
    }

    // --- Hooks and dispatch ---

    fn on_attached(&mut self, entity: EntityId, component: ComponentId) -> Result<()> {
        match self.world.components().get(component)?.kind() {
            ComponentKind::MorphTarget => {
                let target = self
                    .world
                    .components()
                    .get(component)?
                    .morph_target()?
                    .target
                    .clone();
                self.broker.subscribe(&target, "name", component);
                self.broker.subscribe(&target, "bounds", component);
            }
            ComponentKind::Curve => self.refresh_channel(entity)?,
            _ => {}
        }
        Ok(())
    }

    fn on_detached(&mut self, entity: EntityId, component: ComponentId) -> Result<()> {
        match self.world.components().get(component)?.kind() {
            ComponentKind::MorphTarget => self.broker.unsubscribe(component),
            ComponentKind::Curve => self.refresh_channel(entity)?,
            _ => {}
        }
        Ok(())
    }

    fn run_processors(&mut self, entity: EntityId, indices: &[usize]) {
        for &index in indices {
            self.run_processor_at(entity, index);
        }
    }

    /// Runs every processor whose arguments carry the component, on
    /// every owner entity.
    fn run_component_processors(&mut self, component: ComponentId) -> Result<()> {
        let (path, owners) = {
            let c = self.world.components().get(component)?;
            let owners: Vec<EntityId> = c
                .owners()
                .iter()
                .filter_map(|r| r.path.as_entity())
                .collect();
            (c.path(), owners)
        };

        let mut jobs = Vec::new();
        for owner in owners {
            if let Some(list) = self.processors.get(&owner) {
                for (index, processor) in list.iter().enumerate() {
                    if processor.has_argument(path) {
                        jobs.push((owner, index));
                    }
                }
            }
        }
        for (owner, index) in jobs {
            self.run_processor_at(owner, index);
        }
        Ok(())
    }

    /// Runs one processor, isolating any failure: a failed handler is
    /// logged and must never prevent sibling processors from running.
    fn run_processor_at(&mut self, entity: EntityId, index: usize) {
        let Some((handler_id, arguments)) = self
            .processors
            .get(&entity)
            .and_then(|list| list.get(index))
            .map(|p| (p.handler().to_string(), p.arguments().to_vec()))
        else {
            return;
        };

        match self.registry.get(&handler_id) {
            Ok(handler) => {
                if let Err(err) = handler(&mut self.world, entity, &arguments) {
                    log::warn!("processor '{handler_id}' on {entity} failed: {err}");
                }
            }
            Err(err) => {
                log::warn!("processor '{handler_id}' on {entity} could not be dispatched: {err}");
            }
        }
    }
}
