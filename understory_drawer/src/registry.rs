// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational drawer registry.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::error::DrawerError;

/// Handle of a registered drawer.
///
/// This is a small, copyable handle that stays stable while the drawer is registered
/// and becomes stale when it is unregistered. It consists of a slot index and a
/// generation counter.
///
/// - On register, a fresh slot is allocated with generation `1`.
/// - On unregister, the slot is freed; any existing `DrawerId` for it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new,
///   distinct `DrawerId`.
///
/// Stale handles never alias a different live drawer because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DrawerId(u32, u32);

impl DrawerId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Generation of this handle.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

#[derive(Clone, Debug)]
struct Slot<K, V> {
    generation: u32,
    entry: Option<(K, V)>,
}

/// Maps drawer surfaces to their per-drawer records.
///
/// Each surface key can be registered once. Records are addressed through
/// [`DrawerId`] handles; iteration order is unspecified.
#[derive(Clone, Debug)]
pub struct DrawerRegistry<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<u32>,
    by_surface: HashMap<K, DrawerId>,
}

impl<K, V> Default for DrawerRegistry<K, V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            by_surface: HashMap::default(),
        }
    }
}

impl<K: Clone + Eq + Hash, V> DrawerRegistry<K, V> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` for `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::DuplicateDrawer`] if `surface` is already registered;
    /// the registry is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slots would be allocated.
    pub fn register(&mut self, surface: K, value: V) -> Result<DrawerId, DrawerError> {
        if let Some(&existing) = self.by_surface.get(&surface) {
            return Err(DrawerError::DuplicateDrawer { existing });
        }
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = Some((surface.clone(), value));
            DrawerId::new(idx, slot.generation)
        } else {
            assert!(
                self.slots.len() < u32::MAX as usize,
                "Too many drawers registered (max {})",
                u32::MAX
            );
            #[expect(clippy::cast_possible_truncation, reason = "checked above")]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                entry: Some((surface.clone(), value)),
            });
            DrawerId::new(idx, 1)
        };
        self.by_surface.insert(surface, id);
        Ok(id)
    }

    /// Removes a drawer, returning its surface and record.
    ///
    /// Returns `None` (and does nothing) for stale or unknown handles.
    pub fn unregister(&mut self, id: DrawerId) -> Option<(K, V)> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        let (surface, value) = slot.entry.take()?;
        self.by_surface.remove(&surface);
        self.free.push(id.index());
        Some((surface, value))
    }

    /// Returns `true` if `id` refers to a registered drawer.
    #[must_use]
    pub fn is_alive(&self, id: DrawerId) -> bool {
        self.get(id).is_some()
    }

    /// Looks up the drawer registered for `surface`.
    #[must_use]
    pub fn id_of(&self, surface: &K) -> Option<DrawerId> {
        self.by_surface.get(surface).copied()
    }

    /// Returns the surface a drawer was registered with.
    #[must_use]
    pub fn surface(&self, id: DrawerId) -> Option<&K> {
        self.entry(id).map(|(k, _)| k)
    }

    /// Returns a drawer's record.
    #[must_use]
    pub fn get(&self, id: DrawerId) -> Option<&V> {
        self.entry(id).map(|(_, v)| v)
    }

    /// Returns a drawer's record mutably.
    pub fn get_mut(&mut self, id: DrawerId) -> Option<&mut V> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entry.as_mut().map(|(_, v)| v)
    }

    /// Number of registered drawers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_surface.len()
    }

    /// Returns `true` if no drawers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_surface.is_empty()
    }

    /// Handles of all registered drawers.
    #[must_use]
    pub fn ids(&self) -> Vec<DrawerId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Iterates over registered drawers.
    pub fn iter(&self) -> impl Iterator<Item = (DrawerId, &V)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let (_, v) = slot.entry.as_ref()?;
            #[expect(clippy::cast_possible_truncation, reason = "slot count fits in u32")]
            let id = DrawerId::new(idx as u32, slot.generation);
            Some((id, v))
        })
    }

    /// Iterates mutably over registered drawers.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (DrawerId, &mut V)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(idx, slot)| {
            let generation = slot.generation;
            let (_, v) = slot.entry.as_mut()?;
            #[expect(clippy::cast_possible_truncation, reason = "slot count fits in u32")]
            let id = DrawerId::new(idx as u32, generation);
            Some((id, v))
        })
    }

    /// Calls `f` for every registered drawer. Order is unspecified.
    pub fn for_each(&mut self, mut f: impl FnMut(DrawerId, &mut V)) {
        for (id, v) in self.iter_mut() {
            f(id, v);
        }
    }

    fn entry(&self, id: DrawerId) -> Option<&(K, V)> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entry.as_ref()
    }
}
