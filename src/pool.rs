//! Fixed-capacity actor arena.
//!
//! Slots are allocated up front.  `acquire` hands out the lowest inactive
//! slot, `destroy` clears its active bit, and nothing is ever freed, so a
//! full pool simply refuses new actors.

/// Index of a slot inside a `Pool`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

#[derive(Clone, Debug)]
struct Slot<T> {
    active: bool,
    item: T,
}

#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Default + Clone> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![
                Slot {
                    active: false,
                    item: T::default(),
                };
                capacity
            ],
        }
    }

    /// Activate an inactive slot, reusing its storage.  Returns `None` when
    /// every slot is in use.
    pub fn acquire(&mut self, item: T) -> Option<SlotId> {
        let index = self.slots.iter().position(|s| !s.active)?;
        self.slots[index] = Slot { active: true, item };
        Some(SlotId(index))
    }
}

impl<T> Pool<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn is_active(&self, id: SlotId) -> bool {
        self.slots.get(id.0).map(|s| s.active).unwrap_or(false)
    }

    /// Borrow an active actor.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.0)
            .filter(|s| s.active)
            .map(|s| &s.item)
    }

    /// Deactivate a slot.  Returns whether it was active.
    pub fn destroy(&mut self, id: SlotId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) if slot.active => {
                slot.active = false;
                true
            }
            _ => false,
        }
    }

    /// Active actors in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (SlotId(i), &s.item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (SlotId(i), &mut s.item))
    }

    /// Deactivate every active actor matching `pred`; returns how many went.
    pub fn destroy_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        for slot in &mut self.slots {
            if slot.active && pred(&slot.item) {
                slot.active = false;
                removed += 1;
            }
        }
        removed
    }
}
