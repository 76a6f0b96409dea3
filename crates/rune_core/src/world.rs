// world.rs - Native entity storage and liveness
//
// The world is the only owner of entity state. Ids are handed out
// monotonically and never reused, so a handle to a despawned entity can
// never silently start pointing at a newer one.

use std::collections::{btree_map::Entry, BTreeMap};

use thiserror::Error;

use crate::entity::EntityId;
use crate::math::Vector3;
use crate::transform::Transform;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("entity id 0 is reserved for \"no entity\"")]
    NullEntity,

    #[error("entity {0} is not alive")]
    NotAlive(EntityId),

    #[error("entity id {0} is unavailable; ids are allocated monotonically and never reused")]
    IdUnavailable(EntityId),

    #[error("entity id space exhausted")]
    IdSpaceExhausted,
}

#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub name: String,
    pub transform: Transform,
}

/// The native world containing all entities and their transforms.
#[derive(Debug)]
pub struct World {
    /// `None` once `u64::MAX` has been handed out.
    next_entity_id: Option<u64>,
    entities: BTreeMap<EntityId, EntityRecord>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            next_entity_id: Some(1),
            entities: BTreeMap::new(),
        }
    }

    /// Spawn an entity with an identity transform.
    ///
    /// An empty name is replaced by `"Entity <id>"`. Fails with
    /// [`WorldError::IdSpaceExhausted`] once id `u64::MAX` has been used.
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<EntityId, WorldError> {
        let id = EntityId::from_bits(self.next_entity_id.ok_or(WorldError::IdSpaceExhausted)?);
        self.insert(id, name.into())?;
        tracing::trace!(entity = %id, "spawned");
        Ok(id)
    }

    /// Spawn an entity under a caller-chosen id, e.g. one restored from a
    /// scene file.
    ///
    /// Fails for id 0 and for any id below the next id the allocator would
    /// hand out, which covers every despawned id.
    pub fn spawn_with_id(&mut self, id: EntityId, name: impl Into<String>) -> Result<EntityId, WorldError> {
        if id.is_none() {
            return Err(WorldError::NullEntity);
        }
        match self.next_entity_id {
            Some(next) if id.to_bits() >= next => {}
            _ => return Err(WorldError::IdUnavailable(id)),
        }
        self.insert(id, name.into())?;
        tracing::trace!(entity = %id, "spawned with explicit id");
        Ok(id)
    }

    /// Despawn an entity. Returns `false` if it was not alive.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let removed = self.entities.remove(&id).is_some();
        if removed {
            tracing::trace!(entity = %id, "despawned");
        }
        removed
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn name(&self, id: EntityId) -> Result<&str, WorldError> {
        self.entity(id).map(|r| r.name.as_str())
    }

    pub fn transform(&self, id: EntityId) -> Result<&Transform, WorldError> {
        self.entity(id).map(|r| &r.transform)
    }

    pub fn transform_mut(&mut self, id: EntityId) -> Result<&mut Transform, WorldError> {
        if id.is_none() {
            return Err(WorldError::NullEntity);
        }
        self.entities
            .get_mut(&id)
            .map(|r| &mut r.transform)
            .ok_or(WorldError::NotAlive(id))
    }

    pub fn translation(&self, id: EntityId) -> Result<Vector3, WorldError> {
        self.transform(id).map(|t| t.translation)
    }

    pub fn set_translation(&mut self, id: EntityId, translation: Vector3) -> Result<(), WorldError> {
        self.transform_mut(id)?.translation = translation;
        Ok(())
    }

    pub fn scale(&self, id: EntityId) -> Result<Vector3, WorldError> {
        self.transform(id).map(|t| t.scale)
    }

    pub fn set_scale(&mut self, id: EntityId, scale: Vector3) -> Result<(), WorldError> {
        self.transform_mut(id)?.scale = scale;
        Ok(())
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &EntityRecord)> {
        self.entities.iter().map(|(&id, r)| (id, r))
    }

    /// Store a new record and move the allocator past `id`. Never replaces a
    /// live entity.
    fn insert(&mut self, id: EntityId, name: String) -> Result<(), WorldError> {
        match self.entities.entry(id) {
            Entry::Occupied(_) => Err(WorldError::IdUnavailable(id)),
            Entry::Vacant(v) => {
                v.insert(record(id, name));
                self.next_entity_id = id.to_bits().checked_add(1);
                Ok(())
            }
        }
    }

    fn entity(&self, id: EntityId) -> Result<&EntityRecord, WorldError> {
        if id.is_none() {
            return Err(WorldError::NullEntity);
        }
        self.entities.get(&id).ok_or(WorldError::NotAlive(id))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn record(id: EntityId, name: String) -> EntityRecord {
    // Unnamed entities get a generated name
    let name = if name.is_empty() {
        format!("Entity {}", id.to_bits())
    } else {
        name
    };
    EntityRecord {
        name,
        transform: Transform::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_assigns_nonzero_increasing_ids() {
        let mut world = World::new();
        let a = world.spawn("a").unwrap();
        let b = world.spawn("").unwrap();
        assert_eq!(a.to_bits(), 1);
        assert_eq!(b.to_bits(), 2);
        assert_eq!(world.name(b), Ok("Entity 2"));
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn translation_round_trip() {
        let mut world = World::new();
        let e = world.spawn("e").unwrap();
        let v = Vector3::new(0.1, -2.0, 1e9);
        world.set_translation(e, v).unwrap();
        assert_eq!(world.translation(e), Ok(v));
    }

    #[test]
    fn despawned_ids_are_dead_forever() {
        let mut world = World::new();
        let e = world.spawn("e").unwrap();
        assert!(world.despawn(e));
        assert!(!world.despawn(e));
        assert_eq!(world.translation(e), Err(WorldError::NotAlive(e)));
        assert_eq!(world.set_translation(e, Vector3::ONE), Err(WorldError::NotAlive(e)));
        assert_eq!(world.spawn_with_id(e, "again"), Err(WorldError::IdUnavailable(e)));
        assert_ne!(world.spawn("next").unwrap(), e);
    }

    #[test]
    fn null_id_is_rejected() {
        let mut world = World::new();
        assert_eq!(world.translation(EntityId::NONE), Err(WorldError::NullEntity));
        assert_eq!(
            world.set_scale(EntityId::NONE, Vector3::ONE),
            Err(WorldError::NullEntity)
        );
        assert_eq!(
            world.spawn_with_id(EntityId::NONE, "zero"),
            Err(WorldError::NullEntity)
        );
    }

    #[test]
    fn explicit_ids_advance_the_allocator() {
        let mut world = World::new();
        let e = world.spawn_with_id(EntityId::from_bits(42), "player").unwrap();
        assert_eq!(world.transform(e).unwrap(), &Transform::IDENTITY);
        assert_eq!(world.spawn("").unwrap(), EntityId::from_bits(43));
        assert_eq!(
            world.spawn_with_id(EntityId::from_bits(10), "late"),
            Err(WorldError::IdUnavailable(EntityId::from_bits(10)))
        );
        let ids: Vec<_> = world.iter().map(|(id, _)| id.to_bits()).collect();
        assert_eq!(ids, vec![42, 43]);
    }

    #[test]
    fn last_id_exhausts_the_allocator() {
        let mut world = World::new();
        let max = world.spawn_with_id(EntityId::from_bits(u64::MAX), "last").unwrap();
        world.set_translation(max, Vector3::new(7.0, 7.0, 7.0)).unwrap();

        assert_eq!(world.spawn("next"), Err(WorldError::IdSpaceExhausted));
        assert_eq!(world.spawn("again"), Err(WorldError::IdSpaceExhausted));
        assert_eq!(world.spawn_with_id(max, "dup"), Err(WorldError::IdUnavailable(max)));

        assert_eq!(world.len(), 1);
        assert_eq!(world.name(max), Ok("last"));
        assert_eq!(world.translation(max), Ok(Vector3::new(7.0, 7.0, 7.0)));
        assert!(world.iter().all(|(id, _)| !id.is_none()));
    }

    #[test]
    fn exhausted_allocator_survives_despawn() {
        let mut world = World::new();
        let max = world.spawn_with_id(EntityId::from_bits(u64::MAX), "last").unwrap();
        assert!(world.despawn(max));
        assert_eq!(world.spawn_with_id(max, "back"), Err(WorldError::IdUnavailable(max)));
        assert_eq!(world.spawn("next"), Err(WorldError::IdSpaceExhausted));
        assert!(world.is_empty());
    }
}
