//! Authoritative entity storage keyed by monotonically allocated identifiers.

use std::{collections::BTreeMap, time::Duration};

use bastion_core::{EnemyCategory, EnemyId, PickupId, PowerUpKind, Vec2};

/// Identifier types that the registry can mint from a sequence number.
pub(crate) trait SequentialId: Copy + Ord {
    /// Wraps a raw sequence number.
    fn from_raw(value: u32) -> Self;
}

impl SequentialId for EnemyId {
    fn from_raw(value: u32) -> Self {
        EnemyId::new(value)
    }
}

impl SequentialId for PickupId {
    fn from_raw(value: u32) -> Self {
        PickupId::new(value)
    }
}

/// Live enemy stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    pub(crate) id: EnemyId,
    pub(crate) category: EnemyCategory,
    pub(crate) position: Vec2,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) speed: f32,
    pub(crate) attack_damage: u32,
    pub(crate) reward: u32,
    pub(crate) upgrade_points: u32,
}

/// Pending pickup stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct PickupState {
    pub(crate) id: PickupId,
    pub(crate) kind: PowerUpKind,
    pub(crate) position: Vec2,
    pub(crate) spawned_at: Duration,
}

/// Registry that stores entities and manages identifier allocation.
///
/// Identifiers are never reused, so iterating in key order is iterating in
/// insertion order.
#[derive(Debug)]
pub(crate) struct Registry<K, V> {
    entries: BTreeMap<K, V>,
    next_id: u32,
}

impl<K: SequentialId, V> Registry<K, V> {
    /// Creates an empty registry whose first identifier is one.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Allocates the next identifier and stores the entity built for it.
    pub(crate) fn insert_with<F>(&mut self, build: F) -> K
    where
        F: FnOnce(K) -> V,
    {
        let id = K::from_raw(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self.entries.insert(id, build(id));
        id
    }

    pub(crate) fn remove(&mut self, id: K) -> Option<V> {
        self.entries.remove(&id)
    }

    pub(crate) fn get_mut(&mut self, id: K) -> Option<&mut V> {
        self.entries.get_mut(&id)
    }

    /// Iterates entities in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
