// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Scalar and indexed binding slots.

use crate::limits::Limits;
use crate::targets::{BufferTarget, FrameTarget, IndexedBufferTarget};
use std::collections::HashMap;

/// Contents of one indexed buffer binding point.
///
/// `range` is `None` for a whole-buffer bind and `Some((offset, size))` for a
/// range bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexedBinding {
    pub id: u32,
    pub range: Option<(isize, isize)>,
}

impl IndexedBinding {
    pub const NONE: IndexedBinding = IndexedBinding { id: 0, range: None };

    pub const fn whole(id: u32) -> Self {
        IndexedBinding { id, range: None }
    }
}

/// Writes `id` into `slot`, returning whether the slot changed.
#[inline]
fn replace(slot: &mut u32, id: u32) -> bool {
    if *slot == id {
        false
    } else {
        *slot = id;
        true
    }
}

/// Every binding point except texture units.
///
/// The element array binding belongs to the bound vertex array, so binding a
/// vertex array also replaces it.  The shadow remembers the element buffer it last
/// saw bound under each vertex array.  After switching to a vertex array it has no
/// record for, the slot reads 0 but is unknown, and the next element array bind is
/// always issued.
#[derive(Debug, Clone)]
pub(crate) struct Shadow {
    buffers: [u32; BufferTarget::ALL.len()],
    indexed: [Box<[IndexedBinding]>; IndexedBufferTarget::ALL.len()],
    read_framebuffer: u32,
    draw_framebuffer: u32,
    renderbuffer: u32,
    vertex_array: u32,
    //vertex array -> element array buffer
    element_arrays: HashMap<u32, u32>,
    element_array_known: bool,
    program: u32,
}

impl Shadow {
    pub fn new(limits: &Limits) -> Self {
        Shadow {
            buffers: [0; BufferTarget::ALL.len()],
            indexed: IndexedBufferTarget::ALL
                .map(|t| vec![IndexedBinding::NONE; limits.indexed(t) as usize].into_boxed_slice()),
            read_framebuffer: 0,
            draw_framebuffer: 0,
            renderbuffer: 0,
            vertex_array: 0,
            element_arrays: HashMap::from([(0, 0)]),
            element_array_known: true,
            program: 0,
        }
    }

    /// Forgets everything, as if the driver had just been created.
    pub fn reset(&mut self) {
        self.buffers = [0; BufferTarget::ALL.len()];
        for slots in &mut self.indexed {
            slots.fill(IndexedBinding::NONE);
        }
        self.read_framebuffer = 0;
        self.draw_framebuffer = 0;
        self.renderbuffer = 0;
        self.vertex_array = 0;
        self.element_arrays.clear();
        self.element_arrays.insert(0, 0);
        self.element_array_known = true;
        self.program = 0;
    }

    pub fn buffer(&self, target: BufferTarget) -> u32 {
        self.buffers[target.slot()]
    }

    pub fn set_buffer(&mut self, target: BufferTarget, id: u32) -> bool {
        let changed = replace(&mut self.buffers[target.slot()], id);
        if target != BufferTarget::ElementArray {
            return changed;
        }
        let changed = changed || !self.element_array_known;
        self.element_array_known = true;
        self.element_arrays.insert(self.vertex_array, id);
        changed
    }

    pub fn indexed_len(&self, target: IndexedBufferTarget) -> usize {
        self.indexed[target as usize].len()
    }

    /// # Panics
    /// `index` must be below the limit for `target`.
    pub fn indexed(&self, target: IndexedBufferTarget, index: u32) -> IndexedBinding {
        self.indexed[target as usize][index as usize]
    }

    /// Stores an indexed binding.
    ///
    /// An indexed bind also binds the generic target, so the bind only counts as
    /// unchanged when both the indexed slot and the generic slot already hold it.
    ///
    /// # Panics
    /// `index` must be below the limit for `target`.
    pub fn set_indexed(
        &mut self,
        target: IndexedBufferTarget,
        index: u32,
        binding: IndexedBinding,
    ) -> bool {
        let slot = &mut self.indexed[target as usize][index as usize];
        let generic = &mut self.buffers[target.generic().slot()];
        if *slot == binding && *generic == binding.id {
            return false;
        }
        *slot = binding;
        *generic = binding.id;
        true
    }

    /// The combined target reports the draw binding.
    pub fn framebuffer(&self, target: FrameTarget) -> u32 {
        match target {
            FrameTarget::Read => self.read_framebuffer,
            FrameTarget::Draw | FrameTarget::Framebuffer => self.draw_framebuffer,
        }
    }

    /// The combined target writes both slots and is unchanged only when both hold `id`.
    pub fn set_framebuffer(&mut self, target: FrameTarget, id: u32) -> bool {
        match target {
            FrameTarget::Read => replace(&mut self.read_framebuffer, id),
            FrameTarget::Draw => replace(&mut self.draw_framebuffer, id),
            FrameTarget::Framebuffer => {
                //non-short-circuiting: both slots must be written
                replace(&mut self.read_framebuffer, id) | replace(&mut self.draw_framebuffer, id)
            }
        }
    }

    pub fn renderbuffer(&self) -> u32 {
        self.renderbuffer
    }

    pub fn set_renderbuffer(&mut self, id: u32) -> bool {
        replace(&mut self.renderbuffer, id)
    }

    pub fn vertex_array(&self) -> u32 {
        self.vertex_array
    }

    /// Also swaps in the element array binding remembered for `id`, if any.
    pub fn set_vertex_array(&mut self, id: u32) -> bool {
        if !replace(&mut self.vertex_array, id) {
            return false;
        }
        let known = self.element_arrays.get(&id).copied();
        self.buffers[BufferTarget::ElementArray.slot()] = known.unwrap_or(0);
        self.element_array_known = known.is_some();
        true
    }

    pub fn program(&self) -> u32 {
        self.program
    }

    pub fn set_program(&mut self, id: u32) -> bool {
        replace(&mut self.program, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits {
            uniform_buffer_bindings: 4,
            ..Limits::FALLBACK
        }
    }

    #[test]
    fn indexed_arrays_follow_limits() {
        let shadow = Shadow::new(&limits());
        assert_eq!(shadow.indexed_len(IndexedBufferTarget::Uniform), 4);
        assert_eq!(shadow.indexed_len(IndexedBufferTarget::ShaderStorage), 1);
    }

    #[test]
    fn combined_framebuffer_is_unchanged_only_when_both_match() {
        let mut shadow = Shadow::new(&limits());
        assert!(shadow.set_framebuffer(FrameTarget::Read, 5));
        assert!(shadow.set_framebuffer(FrameTarget::Framebuffer, 5));
        assert_eq!(shadow.framebuffer(FrameTarget::Draw), 5);
        assert!(!shadow.set_framebuffer(FrameTarget::Framebuffer, 5));
    }

    #[test]
    fn indexed_bind_is_stale_once_generic_moves() {
        let mut shadow = Shadow::new(&limits());
        let b = IndexedBinding::whole(8);
        assert!(shadow.set_indexed(IndexedBufferTarget::Uniform, 1, b));
        assert_eq!(shadow.buffer(BufferTarget::Uniform), 8);
        assert!(!shadow.set_indexed(IndexedBufferTarget::Uniform, 1, b));
        shadow.set_buffer(BufferTarget::Uniform, 2);
        assert!(shadow.set_indexed(IndexedBufferTarget::Uniform, 1, b));
    }

    #[test]
    fn range_is_part_of_the_binding() {
        let mut shadow = Shadow::new(&limits());
        let whole = IndexedBinding::whole(3);
        let ranged = IndexedBinding {
            id: 3,
            range: Some((0, 64)),
        };
        assert!(shadow.set_indexed(IndexedBufferTarget::Uniform, 0, whole));
        assert!(shadow.set_indexed(IndexedBufferTarget::Uniform, 0, ranged));
        assert!(!shadow.set_indexed(IndexedBufferTarget::Uniform, 0, ranged));
    }

    #[test]
    fn element_array_follows_the_vertex_array() {
        let mut shadow = Shadow::new(&limits());
        assert!(shadow.set_vertex_array(1));
        //never seen under vertex array 1, so even 0 is issued
        assert!(shadow.set_buffer(BufferTarget::ElementArray, 0));
        assert!(shadow.set_buffer(BufferTarget::ElementArray, 30));
        assert!(!shadow.set_buffer(BufferTarget::ElementArray, 30));

        assert!(shadow.set_vertex_array(2));
        assert_eq!(shadow.buffer(BufferTarget::ElementArray), 0);
        assert!(shadow.set_buffer(BufferTarget::ElementArray, 30));

        shadow.set_buffer(BufferTarget::ElementArray, 31);
        assert!(shadow.set_vertex_array(1));
        assert_eq!(shadow.buffer(BufferTarget::ElementArray), 30);
        assert!(!shadow.set_buffer(BufferTarget::ElementArray, 30));

        assert!(shadow.set_vertex_array(0));
        assert_eq!(shadow.buffer(BufferTarget::ElementArray), 0);
        assert!(!shadow.set_buffer(BufferTarget::ElementArray, 0));
    }

    #[test]
    fn other_buffers_ignore_the_vertex_array() {
        let mut shadow = Shadow::new(&limits());
        shadow.set_buffer(BufferTarget::Array, 5);
        shadow.set_vertex_array(3);
        assert_eq!(shadow.buffer(BufferTarget::Array), 5);
        assert!(!shadow.set_buffer(BufferTarget::Array, 5));
    }

    #[test]
    fn reset_clears_everything() {
        let mut shadow = Shadow::new(&limits());
        shadow.set_program(4);
        shadow.set_indexed(IndexedBufferTarget::Uniform, 3, IndexedBinding::whole(1));
        shadow.reset();
        assert_eq!(shadow.program(), 0);
        assert_eq!(shadow.indexed(IndexedBufferTarget::Uniform, 3), IndexedBinding::NONE);
        assert_eq!(shadow.buffer(BufferTarget::Uniform), 0);
    }
}
