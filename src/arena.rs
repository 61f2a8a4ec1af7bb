//! A slot arena owning every node of a [`Forest`][crate::parented::Forest].
//!
//! Slots are reused after a node is deleted. Each slot carries a generation that is bumped when
//! its element is taken, so a [`NodeId`] handed out before the deletion no longer resolves once
//! the slot is reused.

use std::fmt;

/// A handle to a node in a [`Forest`][crate::parented::Forest].
///
/// Handles are cheap to copy and never keep a node alive. Once the node is deleted every copy of
/// its handle becomes stale and all lookups through it come back empty.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    fn to_index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    element: Option<T>,
}

#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.element = Some(element);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = u32::try_from(self.slots.len())
                .expect("`Arena::alloc()` - arena is at maximum capacity");
            self.slots.push(Slot {
                generation: 0,
                element: Some(element),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.slots
            .get(id.to_index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots
            .get_mut(id.to_index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    /// Like [`Arena::get`] for handles the caller knows to be live, e.g. ones just read out of a
    /// live node's links.
    ///
    /// ## Panics
    ///
    /// When `id` is stale.
    pub(crate) fn live(&self, id: NodeId) -> &T {
        self.get(id).expect("`Arena::live()` - `id` is stale!")
    }

    /// Mutable version of [`Arena::live`].
    ///
    /// ## Panics
    ///
    /// When `id` is stale.
    pub(crate) fn live_mut(&mut self, id: NodeId) -> &mut T {
        self.get_mut(id).expect("`Arena::live_mut()` - `id` is stale!")
    }

    /// Removes the element behind `id` and frees its slot, invalidating every copy of `id`.
    pub(crate) fn take(&mut self, id: NodeId) -> Option<T> {
        let slot = self
            .slots
            .get_mut(id.to_index())
            .filter(|slot| slot.generation == id.generation)?;
        let element = slot.element.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(element)
    }

    /// Drops every element. Handles issued before the call stay stale even after their slots
    /// are reused.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.element = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index as u32);
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.element.as_ref().map(|element| {
                (
                    NodeId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    element,
                )
            })
        })
    }
}
