// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Capabilities, rectangles, clear values and per-fragment state.

use crate::state::{BlendFunc, Capability, CompareFunc, Face, FrontFace, Rect};

#[inline]
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Compares bitwise, so a repeated NaN is unchanged and `-0.0` differs from `0.0`.
#[inline]
fn replace_bits(slot: &mut [f32; 4], value: [f32; 4]) -> bool {
    if slot.map(f32::to_bits) == value.map(f32::to_bits) {
        false
    } else {
        *slot = value;
        true
    }
}

/// Mirror of the render state a driver context starts with and what has been set since.
///
/// The initial viewport and scissor box cover the default framebuffer, whose size
/// the context is told when it is built.
#[derive(Debug, Clone)]
pub(crate) struct RenderShadow {
    //one bit per Capability
    capabilities: u32,
    framebuffer: Rect,
    viewport: Rect,
    scissor: Rect,
    clear_color: [f32; 4],
    clear_depth: f64,
    clear_stencil: i32,
    depth_func: CompareFunc,
    depth_mask: bool,
    cull_face: Face,
    front_face: FrontFace,
    blend_func: BlendFunc,
}

impl RenderShadow {
    pub fn new(framebuffer: Rect) -> Self {
        let capabilities = Capability::ALL
            .into_iter()
            .filter(|c| c.enabled_by_default())
            .fold(0, |bits, c| bits | c.bit());
        RenderShadow {
            capabilities,
            framebuffer,
            viewport: framebuffer,
            scissor: framebuffer,
            clear_color: [0.0; 4],
            clear_depth: 1.0,
            clear_stencil: 0,
            depth_func: CompareFunc::Less,
            depth_mask: true,
            cull_face: Face::Back,
            front_face: FrontFace::Ccw,
            blend_func: BlendFunc::REPLACE,
        }
    }

    /// Back to the initial state, keeping the framebuffer size.
    pub fn reset(&mut self) {
        *self = RenderShadow::new(self.framebuffer);
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.capabilities & capability.bit() != 0
    }

    pub fn set_capability(&mut self, capability: Capability, enabled: bool) -> bool {
        let bits = if enabled {
            self.capabilities | capability.bit()
        } else {
            self.capabilities & !capability.bit()
        };
        replace(&mut self.capabilities, bits)
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, rect: Rect) -> bool {
        replace(&mut self.viewport, rect)
    }

    pub fn scissor(&self) -> Rect {
        self.scissor
    }

    pub fn set_scissor(&mut self, rect: Rect) -> bool {
        replace(&mut self.scissor, rect)
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) -> bool {
        replace_bits(&mut self.clear_color, color)
    }

    pub fn clear_depth(&self) -> f64 {
        self.clear_depth
    }

    /// `depth` is already clamped to `[0, 1]`.
    pub fn set_clear_depth(&mut self, depth: f64) -> bool {
        if self.clear_depth.to_bits() == depth.to_bits() {
            return false;
        }
        self.clear_depth = depth;
        true
    }

    pub fn clear_stencil(&self) -> i32 {
        self.clear_stencil
    }

    pub fn set_clear_stencil(&mut self, stencil: i32) -> bool {
        replace(&mut self.clear_stencil, stencil)
    }

    pub fn depth_func(&self) -> CompareFunc {
        self.depth_func
    }

    pub fn set_depth_func(&mut self, func: CompareFunc) -> bool {
        replace(&mut self.depth_func, func)
    }

    pub fn depth_mask(&self) -> bool {
        self.depth_mask
    }

    pub fn set_depth_mask(&mut self, mask: bool) -> bool {
        replace(&mut self.depth_mask, mask)
    }

    pub fn cull_face(&self) -> Face {
        self.cull_face
    }

    pub fn set_cull_face(&mut self, face: Face) -> bool {
        replace(&mut self.cull_face, face)
    }

    pub fn front_face(&self) -> FrontFace {
        self.front_face
    }

    pub fn set_front_face(&mut self, winding: FrontFace) -> bool {
        replace(&mut self.front_face, winding)
    }

    pub fn blend_func(&self) -> BlendFunc {
        self.blend_func
    }

    pub fn set_blend_func(&mut self, func: BlendFunc) -> bool {
        replace(&mut self.blend_func, func)
    }
}
