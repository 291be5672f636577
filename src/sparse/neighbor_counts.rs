//! Reusable neighbor-count table for the recompute strategy.
//!
//! This is an open-addressed linear-probing map from packed keys to counts.
//! Slots are lazily cleared with an epoch stamp, so each step can start from
//! an empty table without touching the full backing array. Slots written in
//! the current epoch are also recorded in `touched`, which keeps iteration
//! proportional to the number of candidates rather than to capacity.

use crate::packing::PackedKey;

const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

#[derive(Clone, Copy)]
struct Slot {
    key: PackedKey,
    count: u8,
    stamp: u32,
}

impl Slot {
    const EMPTY: Self = Self {
        key: 0,
        count: 0,
        stamp: 0,
    };
}

#[inline(always)]
fn key_hash(key: PackedKey) -> u64 {
    const M: u64 = 0x517c_c1b7_2722_0a95;
    let h = (key as u64).wrapping_mul(M);
    h ^ (h >> 29)
}

#[inline]
fn slots_for(keys: usize) -> usize {
    keys.saturating_mul(LOAD_DEN)
        .div_ceil(LOAD_NUM)
        .next_power_of_two()
        .max(16)
}

pub struct NeighborCounts {
    slots: Vec<Slot>,
    touched: Vec<u32>,
    mask: usize,
    stamp: u32,
}

impl Default for NeighborCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborCounts {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let slots = slots_for(cap);
        Self {
            slots: vec![Slot::EMPTY; slots],
            touched: Vec::with_capacity(cap),
            mask: slots - 1,
            stamp: 1,
        }
    }

    /// Start a fresh, empty table for the next step.
    #[inline]
    pub fn begin_step(&mut self) {
        self.touched.clear();
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.stamp = 1;
            for slot in &mut self.slots {
                slot.stamp = 0;
            }
        }
    }

    /// Grow ahead of time so `keys` insertions do not rehash mid-step.
    #[inline]
    pub fn reserve_for(&mut self, keys: usize) {
        if keys == 0 {
            return;
        }
        let needed = slots_for(keys);
        if needed > self.slots.len() {
            self.resize(needed);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.touched.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    #[inline(always)]
    fn needs_grow(&self) -> bool {
        self.touched.len() * LOAD_DEN >= self.slots.len() * LOAD_NUM
    }

    fn resize(&mut self, new_slots: usize) {
        debug_assert!(new_slots.is_power_of_two());
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::EMPTY; new_slots]);
        let old_touched = std::mem::take(&mut self.touched);
        self.mask = new_slots - 1;
        self.touched.reserve(old_touched.len());

        for pos in old_touched {
            let slot = old_slots[pos as usize];
            let new_pos = self.probe(slot.key);
            self.slots[new_pos] = slot;
            self.touched.push(new_pos as u32);
        }
    }

    /// Position of `key` in the current epoch, or of the free slot where it
    /// would be inserted.
    #[inline(always)]
    fn probe(&self, key: PackedKey) -> usize {
        let mut pos = key_hash(key) as usize & self.mask;
        loop {
            let slot = &self.slots[pos];
            if slot.stamp != self.stamp || slot.key == key {
                return pos;
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Add one to the count for `key`, inserting it at zero first if absent.
    /// Returns the updated count.
    #[inline]
    pub fn increment(&mut self, key: PackedKey) -> u8 {
        if self.needs_grow() {
            self.resize((self.slots.len() * 2).max(16));
        }

        let pos = self.probe(key);
        let stamp = self.stamp;
        let slot = &mut self.slots[pos];
        if slot.stamp != stamp {
            *slot = Slot {
                key,
                count: 0,
                stamp,
            };
            self.touched.push(pos as u32);
        }
        slot.count += 1;
        slot.count
    }

    #[inline]
    pub fn get(&self, key: PackedKey) -> Option<u8> {
        let slot = &self.slots[self.probe(key)];
        (slot.stamp == self.stamp).then_some(slot.count)
    }

    /// Keys counted in the current step with their counts, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PackedKey, u8)> + '_ {
        self.touched.iter().map(move |&pos| {
            let slot = &self.slots[pos as usize];
            (slot.key, slot.count)
        })
    }
}
