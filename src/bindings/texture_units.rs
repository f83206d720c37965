// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Texture unit slots and the active unit.

use crate::targets::TextureTarget;

#[derive(Debug, Clone, Default)]
struct Unit {
    known: [u32; TextureTarget::KNOWN.len()],
    //targets without a fixed slot; only non-zero bindings are kept
    other: Vec<(u32, u32)>,
}

impl Unit {
    fn get(&self, target: TextureTarget) -> u32 {
        match target.slot() {
            Some(slot) => self.known[slot],
            None => self
                .other
                .iter()
                .find(|(raw, _)| *raw == target.raw())
                .map(|(_, id)| *id)
                .unwrap_or(0),
        }
    }

    fn set(&mut self, target: TextureTarget, id: u32) {
        match target.slot() {
            Some(slot) => self.known[slot] = id,
            None => {
                let raw = target.raw();
                self.other.retain(|(r, _)| *r != raw);
                if id != 0 {
                    self.other.push((raw, id));
                }
            }
        }
    }
}

/// `[unit][target]` texture slots plus the active unit.
#[derive(Debug, Clone)]
pub(crate) struct TextureUnits {
    active: u32,
    units: Box<[Unit]>,
}

impl TextureUnits {
    pub fn new(count: u32) -> Self {
        TextureUnits {
            active: 0,
            units: vec![Unit::default(); count as usize].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> u32 {
        self.units.len() as u32
    }

    pub fn active(&self) -> u32 {
        self.active
    }

    /// Returns whether the active unit changed.
    pub fn set_active(&mut self, unit: u32) -> bool {
        if self.active == unit {
            false
        } else {
            self.active = unit;
            true
        }
    }

    /// # Panics
    /// `unit` must be below [`Self::len`].
    pub fn get(&self, unit: u32, target: TextureTarget) -> u32 {
        self.units[unit as usize].get(target)
    }

    /// Returns whether the slot changed.  Does not touch the active unit.
    ///
    /// # Panics
    /// `unit` must be below [`Self::len`].
    pub fn set(&mut self, unit: u32, target: TextureTarget, id: u32) -> bool {
        let slot = &mut self.units[unit as usize];
        if slot.get(target) == id {
            return false;
        }
        slot.set(target, id);
        true
    }

    pub fn reset(&mut self) {
        self.active = 0;
        self.units.fill_with(Unit::default);
    }
}
