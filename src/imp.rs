// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The native driver boundary.
//!
//! Everything above this module speaks in typed targets and shadow slots; everything
//! below it speaks raw enumerants from [`crate::sys::gl`].  A [`Driver`] is a thin
//! forwarding layer over one real driver context and never caches anything itself.

/// Location and size of one image of a texture.
///
/// `width`, `height` and `depth` are interpreted by the target's dimensionality: a
/// 1D image ignores `height` and `depth`, a 2D image ignores `depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRegion {
    /// Target enumerant.  For cube maps this is the face target.
    pub target: u32,
    pub level: i32,
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

/// Forwarding layer over one driver context.
///
/// All ids are raw object names; 0 means "nothing".  Methods are called only from
/// the thread that owns the context.
pub trait Driver {
    /// Selects texture unit `unit` (an index, not `TEXTURE0 + unit`).
    fn active_texture(&mut self, unit: u32);
    fn bind_texture(&mut self, target: u32, id: u32);
    fn bind_buffer(&mut self, target: u32, id: u32);
    fn bind_buffer_base(&mut self, target: u32, index: u32, id: u32);
    fn bind_buffer_range(&mut self, target: u32, index: u32, id: u32, offset: isize, size: isize);
    fn bind_framebuffer(&mut self, target: u32, id: u32);
    fn bind_renderbuffer(&mut self, id: u32);
    fn bind_vertex_array(&mut self, id: u32);
    fn use_program(&mut self, id: u32);

    /// Pops one value off the sticky error flag.  `NO_ERROR` when clear.
    fn get_error(&mut self) -> u32;
    fn get_integer(&mut self, pname: u32) -> i32;

    /// Requests that queued work completes in finite time.  Returns immediately.
    fn flush(&mut self);
    /// Blocks until all submitted work has completed.
    fn finish(&mut self);

    /// Queries a parameter of one level of the texture bound to `target` on the active unit.
    fn tex_level_parameter(&mut self, target: u32, level: i32, pname: u32) -> i32;

    /// Defines an uncompressed image of the texture bound to `region.target`.
    ///
    /// `pixels` is in bottom-up row order; `None` allocates without initializing.
    fn tex_image(
        &mut self,
        region: ImageRegion,
        internal_format: u32,
        format: u32,
        data_type: u32,
        pixels: Option<&[u8]>,
    );
    fn compressed_tex_image(&mut self, region: ImageRegion, internal_format: u32, data: &[u8]);
    fn tex_image_multisample(
        &mut self,
        region: ImageRegion,
        samples: i32,
        internal_format: u32,
        fixed_sample_locations: bool,
    );
    /// Reads one level of the texture bound to `target` into `out`.
    fn get_tex_image(&mut self, target: u32, level: i32, format: u32, data_type: u32, out: &mut [u8]);

    fn enable(&mut self, capability: u32);
    fn disable(&mut self, capability: u32);
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32);
    /// The driver clamps `depth` to `[0, 1]`.
    fn clear_depth(&mut self, depth: f64);
    fn clear_stencil(&mut self, stencil: i32);
    fn depth_func(&mut self, func: u32);
    fn depth_mask(&mut self, enabled: bool);
    fn cull_face(&mut self, face: u32);
    fn front_face(&mut self, winding: u32);
    fn blend_func(&mut self, src: u32, dst: u32);
}

mod recording;
pub use recording::{Call, RecordingDriver};

#[cfg(all(feature = "backend_glow", not(target_arch = "wasm32")))]
mod glow;
#[cfg(all(feature = "backend_glow", not(target_arch = "wasm32")))]
pub use self::glow::GlowDriver;
