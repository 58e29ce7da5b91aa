//! The declared weight-propagation topology.

use std::collections::BTreeMap;

use morphkit_foundation::{ComponentKind, EntityId, Error, Reference, Result};
use morphkit_storage::World;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::expression::{AggregatePolicy, WeightBinding, WeightExpr};

/// The per-entity weight expressions, with the rebuild triggers the
/// runtime fires on re-parenting and contributor edits.
///
/// The graph holds declarations only; compiled [`WeightBinding`]s are
/// produced on demand against the current world. Entities without an
/// explicit declaration compile their default form (stored value for
/// roots, parent-scaled otherwise).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightGraph {
    exprs: BTreeMap<EntityId, WeightExpr>,
}

impl WeightGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The declared expression for an entity, if any.
    #[must_use]
    pub fn expr(&self, entity: EntityId) -> Option<&WeightExpr> {
        self.exprs.get(&entity)
    }

    /// Declares the default expression for an entity from its current
    /// tree position and returns the compiled binding.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn declare(&mut self, world: &World, entity: EntityId) -> Result<WeightBinding> {
        let expr = default_expr(world, entity)?;
        self.exprs.insert(entity, expr);
        self.binding(world, entity)
    }

    /// Switches an entity to an aggregation policy, keeping any
    /// previously curated contributor set, and returns the rebuilt
    /// binding.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn set_policy(
        &mut self,
        world: &World,
        entity: EntityId,
        policy: AggregatePolicy,
    ) -> Result<WeightBinding> {
        world.entities().get(entity)?;
        let contributors = match self.exprs.get(&entity) {
            Some(WeightExpr::Combine { contributors, .. }) => contributors.clone(),
            _ => Vec::new(),
        };
        self.exprs.insert(
            entity,
            WeightExpr::Combine {
                policy,
                contributors,
            },
        );
        self.binding(world, entity)
    }

    /// Restores an entity's default parent-chain expression and
    /// returns the rebuilt binding.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn clear_policy(&mut self, world: &World, entity: EntityId) -> Result<WeightBinding> {
        self.declare(world, entity)
    }

    /// Adds a contributor to an entity's aggregation set, converting
    /// the entity to the multiply policy first if it still used the
    /// default expression. Returns the rebuilt binding.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure if either entity is unknown.
    pub fn add_contributor(
        &mut self,
        world: &World,
        entity: EntityId,
        contributor: EntityId,
    ) -> Result<WeightBinding> {
        world.entities().get(entity)?;
        let reference = entity_reference(world, contributor)?;

        let expr = self
            .exprs
            .entry(entity)
            .or_insert_with(|| WeightExpr::Combine {
                policy: AggregatePolicy::default(),
                contributors: Vec::new(),
            });
        match expr {
            WeightExpr::Combine { contributors, .. } => {
                if !contributors.iter().any(|r| r.path == reference.path) {
                    contributors.push(reference);
                }
            }
            other => {
                *other = WeightExpr::Combine {
                    policy: AggregatePolicy::default(),
                    contributors: vec![reference],
                };
            }
        }
        self.binding(world, entity)
    }

    /// Removes a contributor from an entity's aggregation set and
    /// returns the rebuilt binding.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure if the entity is unknown, not using
    /// an aggregation policy, or the contributor is not in the set.
    pub fn remove_contributor(
        &mut self,
        world: &World,
        entity: EntityId,
        contributor: EntityId,
    ) -> Result<WeightBinding> {
        world.entities().get(entity)?;
        let missing =
            || Error::lookup_failure(format!("contributor entity/{}", contributor.0));

        match self.exprs.get_mut(&entity) {
            Some(WeightExpr::Combine { contributors, .. }) => {
                let position = contributors
                    .iter()
                    .position(|r| r.path.as_entity() == Some(contributor))
                    .ok_or_else(missing)?;
                contributors.remove(position);
            }
            _ => return Err(missing()),
        }
        self.binding(world, entity)
    }

    /// Rebuilds an entity's expression after a re-parenting: the
    /// default family picks up the new parent; an aggregation policy
    /// keeps its explicit contributor set untouched. Descendants are
    /// deliberately not visited, since every expression depends only
    /// on its immediate parent.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn on_reparented(&mut self, world: &World, entity: EntityId) -> Result<WeightBinding> {
        match self.exprs.get(&entity) {
            Some(WeightExpr::Combine { .. }) => self.binding(world, entity),
            _ => self.declare(world, entity),
        }
    }

    /// Drops an entity's declaration (after entity removal).
    pub fn forget(&mut self, entity: EntityId) {
        self.exprs.remove(&entity);
    }

    /// Compiles the binding for one entity against the current world.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown entities or dangling
    /// parent/contributor references.
    pub fn binding(&self, world: &World, entity: EntityId) -> Result<WeightBinding> {
        let expr = match self.exprs.get(&entity) {
            Some(expr) => expr.clone(),
            None => default_expr(world, entity)?,
        };
        compile(world, entity, &expr)
    }

    /// Compiles the bindings for every entity in the world, preorder.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure on the first dangling reference.
    pub fn bindings(&self, world: &World) -> Result<Vec<WeightBinding>> {
        world
            .entities()
            .iter()
            .map(|e| self.binding(world, e.id()))
            .collect()
    }
}

/// The default expression for an entity's current tree position.
fn default_expr(world: &World, entity: EntityId) -> Result<WeightExpr> {
    match world.entities().parent_of(entity)? {
        Some(parent) => Ok(WeightExpr::ParentScaled {
            parent: entity_reference(world, parent)?,
        }),
        None => Ok(WeightExpr::Stored),
    }
}

fn entity_reference(world: &World, entity: EntityId) -> Result<Reference> {
    let e = world.entities().get(entity)?;
    Ok(Reference::to_entity(e.name().to_string(), entity))
}

/// The path the `value` variable binds to: the entity's wired input
/// parameter when present, the entity itself otherwise.
fn value_target(world: &World, entity: EntityId) -> Result<String> {
    let e = world.entities().get(entity)?;
    let parameter = e.parameters().iter().find(|r| {
        matches!(
            r.path.as_component(),
            Some((ComponentKind::Property, _))
        )
    });
    Ok(match parameter {
        Some(reference) => reference.path.to_string(),
        None => e.path().to_string(),
    })
}

fn channel_target(world: &World, reference: &Reference) -> Result<String> {
    let entity = world.resolve_entity(reference)?;
    Ok(format!("channel/{}", entity.name()))
}

fn compile(world: &World, entity: EntityId, expr: &WeightExpr) -> Result<WeightBinding> {
    let channel = world.entities().get(entity)?.name().to_string();
    match expr {
        WeightExpr::Stored => Ok(WeightBinding {
            channel,
            expression: "value".to_string(),
            variables: vec![("value".to_string(), value_target(world, entity)?)],
        }),
        WeightExpr::ParentScaled { parent } => Ok(WeightBinding {
            channel,
            expression: "input*value".to_string(),
            variables: vec![
                ("value".to_string(), value_target(world, entity)?),
                ("input".to_string(), channel_target(world, parent)?),
            ],
        }),
        WeightExpr::Combine {
            policy,
            contributors,
        } => {
            let variables: Vec<(String, String)> = contributors
                .iter()
                .enumerate()
                .map(|(i, reference)| {
                    Ok((format!("v{}", i + 1), channel_target(world, reference)?))
                })
                .collect::<Result<_>>()?;
            let names: Vec<&str> = variables.iter().map(|(name, _)| name.as_str()).collect();
            let expression = if names.is_empty() {
                "0.0".to_string()
            } else {
                match policy {
                    AggregatePolicy::Multiply => names.join("*"),
                    AggregatePolicy::Min => format!("min({})", names.join(",")),
                    AggregatePolicy::Max => format!("max({})", names.join(",")),
                    AggregatePolicy::Average => {
                        format!("({})/{:.1}", names.join("+"), names.len() as f64)
                    }
                }
            };
            Ok(WeightBinding {
                channel,
                expression,
                variables,
            })
        }
    }
}
