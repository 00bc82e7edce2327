//! Fixed-capacity recycling store for transient actors.
//!
//! A [`Pool`] preallocates every slot up front and never grows. Acquiring
//! from a full pool returns `None`, which callers treat as deliberate
//! backpressure rather than an error: the spawn or fire request is simply
//! dropped for this tick.

use lastlight_core::PoolUtilization;

/// Transient actor state that can be wiped for slot reuse.
pub trait Recyclable {
    /// Resets all transient state ahead of the slot being handed out again.
    fn reset(&mut self);
}

#[derive(Clone, Debug)]
struct Slot<T> {
    item: T,
    live: bool,
}

/// Fixed-capacity recycling container for transient actors.
#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    live: usize,
}

impl<T: Default + Recyclable> Pool<T> {
    /// Preallocates a pool holding exactly `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(Slot {
                item: T::default(),
                live: false,
            });
        }
        Self { slots, live: 0 }
    }

    /// Marks the first inactive slot live and returns it, or `None` when
    /// every slot is active. Never grows.
    pub fn acquire(&mut self) -> Option<(usize, &mut T)> {
        let index = self.slots.iter().position(|slot| !slot.live)?;
        let slot = &mut self.slots[index];
        slot.live = true;
        self.live += 1;
        Some((index, &mut slot.item))
    }

    /// Resets the slot's transient state and marks it inactive. Returns
    /// whether the slot was live.
    pub fn release(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.live => {
                slot.item.reset();
                slot.live = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// Releases every live slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.live {
                slot.item.reset();
                slot.live = false;
            }
        }
        self.live = 0;
    }

    /// Returns the live slot at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots
            .get(index)
            .filter(|slot| slot.live)
            .map(|slot| &slot.item)
    }

    /// Returns the live slot at `index` mutably, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots
            .get_mut(index)
            .filter(|slot| slot.live)
            .map(|slot| &mut slot.item)
    }

    /// Iterates over live slots only, yielding slot indices alongside items.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.live)
            .map(|(index, slot)| (index, &slot.item))
    }

    /// Iterates mutably over live slots only.
    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.live)
            .map(|(index, slot)| (index, &mut slot.item))
    }

    /// Number of slots currently live.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Total preallocated slot count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupancy gauge for presentation collaborators.
    #[must_use]
    pub fn utilization(&self) -> PoolUtilization {
        PoolUtilization {
            active: self.live,
            capacity: self.slots.len(),
        }
    }
}
