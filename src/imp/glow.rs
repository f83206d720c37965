// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Driver backed by a [`glow`] context.

use crate::imp::{Driver, ImageRegion};
use crate::sys::gl;
use crate::targets::TextureTarget;
use glow::HasContext;
use std::collections::VecDeque;
use std::ffi::{CStr, c_void};
use std::num::NonZeroU32;

//glow 0.16 has no wrapper for this entry point
type GetTexLevelParameteriv = unsafe extern "system" fn(u32, i32, u32, *mut i32);

/// A [`Driver`] forwarding to a native OpenGL context through `glow`.
///
/// Construct it with [`GlowDriver::from_loader_function_cstr`] so that every entry
/// point is resolved through the same loader.  [`GlowDriver::new`] wraps an existing
/// `glow::Context`, but then texture level queries are unavailable.
pub struct GlowDriver {
    gl: glow::Context,
    tex_level_parameter_iv: Option<GetTexLevelParameteriv>,
    //errors detected on our side of the boundary, reported before the driver's own
    local_errors: VecDeque<u32>,
}

impl std::fmt::Debug for GlowDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowDriver")
            .field("tex_level_parameter_iv", &self.tex_level_parameter_iv.is_some())
            .field("local_errors", &self.local_errors)
            .finish_non_exhaustive()
    }
}

impl GlowDriver {
    /// Loads the driver's entry points, including the ones glow does not wrap.
    ///
    /// # Safety
    /// A context must be current on the calling thread for as long as this driver is
    /// used, and `loader` must return its entry points (or null).
    pub unsafe fn from_loader_function_cstr<F>(mut loader: F) -> Self
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        let proc = loader(c"glGetTexLevelParameteriv");
        let tex_level_parameter_iv = if proc.is_null() {
            None
        } else {
            Some(unsafe { std::mem::transmute::<*const c_void, GetTexLevelParameteriv>(proc) })
        };
        let gl = unsafe { glow::Context::from_loader_function_cstr(loader) };
        GlowDriver {
            gl,
            tex_level_parameter_iv,
            local_errors: VecDeque::new(),
        }
    }

    /// Wraps an existing context.  Texture level queries report `INVALID_OPERATION`.
    ///
    /// # Safety
    /// `gl` must be current on the calling thread for as long as this driver is used.
    pub unsafe fn new(gl: glow::Context) -> Self {
        GlowDriver {
            gl,
            tex_level_parameter_iv: None,
            local_errors: VecDeque::new(),
        }
    }

    /// Whether texture level queries reach the driver.
    pub fn has_tex_level_parameter(&self) -> bool {
        self.tex_level_parameter_iv.is_some()
    }

    pub fn context(&self) -> &glow::Context {
        &self.gl
    }

    pub fn into_context(self) -> glow::Context {
        self.gl
    }
}

fn name<T>(id: u32, wrap: fn(NonZeroU32) -> T) -> Option<T> {
    NonZeroU32::new(id).map(wrap)
}

enum Dimensions {
    One,
    Two,
    Three,
}

fn dimensions(target: u32) -> Dimensions {
    if (gl::TEXTURE_CUBE_MAP_POSITIVE_X..gl::TEXTURE_CUBE_MAP_POSITIVE_X + 6).contains(&target) {
        return Dimensions::Two;
    }
    let target = TextureTarget::from_raw(target);
    if target.is_1d() {
        Dimensions::One
    } else if target.is_3d() {
        Dimensions::Three
    } else {
        Dimensions::Two
    }
}

impl Driver for GlowDriver {
    fn active_texture(&mut self, unit: u32) {
        unsafe { self.gl.active_texture(gl::TEXTURE0 + unit) }
    }

    fn bind_texture(&mut self, target: u32, id: u32) {
        unsafe { self.gl.bind_texture(target, name(id, glow::NativeTexture)) }
    }

    fn bind_buffer(&mut self, target: u32, id: u32) {
        unsafe { self.gl.bind_buffer(target, name(id, glow::NativeBuffer)) }
    }

    fn bind_buffer_base(&mut self, target: u32, index: u32, id: u32) {
        unsafe {
            self.gl
                .bind_buffer_base(target, index, name(id, glow::NativeBuffer))
        }
    }

    fn bind_buffer_range(&mut self, target: u32, index: u32, id: u32, offset: isize, size: isize) {
        let (Ok(offset), Ok(size)) = (i32::try_from(offset), i32::try_from(size)) else {
            self.local_errors.push_back(gl::INVALID_VALUE);
            return;
        };
        unsafe {
            self.gl
                .bind_buffer_range(target, index, name(id, glow::NativeBuffer), offset, size)
        }
    }

    fn bind_framebuffer(&mut self, target: u32, id: u32) {
        unsafe {
            self.gl
                .bind_framebuffer(target, name(id, glow::NativeFramebuffer))
        }
    }

    fn bind_renderbuffer(&mut self, id: u32) {
        unsafe {
            self.gl
                .bind_renderbuffer(gl::RENDERBUFFER, name(id, glow::NativeRenderbuffer))
        }
    }

    fn bind_vertex_array(&mut self, id: u32) {
        unsafe { self.gl.bind_vertex_array(name(id, glow::NativeVertexArray)) }
    }

    fn use_program(&mut self, id: u32) {
        unsafe { self.gl.use_program(name(id, glow::NativeProgram)) }
    }

    fn get_error(&mut self) -> u32 {
        match self.local_errors.pop_front() {
            Some(e) => e,
            None => unsafe { self.gl.get_error() },
        }
    }

    fn get_integer(&mut self, pname: u32) -> i32 {
        unsafe { self.gl.get_parameter_i32(pname) }
    }

    fn flush(&mut self) {
        unsafe { self.gl.flush() }
    }

    fn finish(&mut self) {
        unsafe { self.gl.finish() }
    }

    fn tex_level_parameter(&mut self, target: u32, level: i32, pname: u32) -> i32 {
        let Some(get) = self.tex_level_parameter_iv else {
            logwise::warn_sync!(
                "texture level parameter {pname} queried without a loaded entry point",
                pname = pname
            );
            self.local_errors.push_back(gl::INVALID_OPERATION);
            return 0;
        };
        let mut value = 0;
        unsafe { get(target, level, pname, &mut value) };
        value
    }

    fn tex_image(
        &mut self,
        region: ImageRegion,
        internal_format: u32,
        format: u32,
        data_type: u32,
        pixels: Option<&[u8]>,
    ) {
        let data = glow::PixelUnpackData::Slice(pixels);
        let ifmt = internal_format as i32;
        unsafe {
            match dimensions(region.target) {
                Dimensions::One => self.gl.tex_image_1d(
                    region.target,
                    region.level,
                    ifmt,
                    region.width,
                    0,
                    format,
                    data_type,
                    data,
                ),
                Dimensions::Two => self.gl.tex_image_2d(
                    region.target,
                    region.level,
                    ifmt,
                    region.width,
                    region.height,
                    0,
                    format,
                    data_type,
                    data,
                ),
                Dimensions::Three => self.gl.tex_image_3d(
                    region.target,
                    region.level,
                    ifmt,
                    region.width,
                    region.height,
                    region.depth,
                    0,
                    format,
                    data_type,
                    data,
                ),
            }
        }
    }

    fn compressed_tex_image(&mut self, region: ImageRegion, internal_format: u32, data: &[u8]) {
        let Ok(image_size) = i32::try_from(data.len()) else {
            self.local_errors.push_back(gl::INVALID_VALUE);
            return;
        };
        let ifmt = internal_format as i32;
        unsafe {
            match dimensions(region.target) {
                Dimensions::One => self.gl.compressed_tex_image_1d(
                    region.target,
                    region.level,
                    ifmt,
                    region.width,
                    0,
                    image_size,
                    data,
                ),
                Dimensions::Two => self.gl.compressed_tex_image_2d(
                    region.target,
                    region.level,
                    ifmt,
                    region.width,
                    region.height,
                    0,
                    image_size,
                    data,
                ),
                Dimensions::Three => self.gl.compressed_tex_image_3d(
                    region.target,
                    region.level,
                    ifmt,
                    region.width,
                    region.height,
                    region.depth,
                    0,
                    image_size,
                    data,
                ),
            }
        }
    }

    fn tex_image_multisample(
        &mut self,
        region: ImageRegion,
        samples: i32,
        internal_format: u32,
        fixed_sample_locations: bool,
    ) {
        if region.target != gl::TEXTURE_2D_MULTISAMPLE {
            //glow only exposes the 2D entry point
            logwise::warn_sync!(
                "multisample storage for target {target} is not available through glow",
                target = region.target
            );
            self.local_errors.push_back(gl::INVALID_ENUM);
            return;
        }
        unsafe {
            self.gl.tex_image_2d_multisample(
                region.target,
                samples,
                internal_format as i32,
                region.width,
                region.height,
                fixed_sample_locations,
            )
        }
    }

    fn get_tex_image(&mut self, target: u32, level: i32, format: u32, data_type: u32, out: &mut [u8]) {
        unsafe {
            self.gl.get_tex_image(
                target,
                level,
                format,
                data_type,
                glow::PixelPackData::Slice(Some(out)),
            )
        }
    }

    fn enable(&mut self, capability: u32) {
        unsafe { self.gl.enable(capability) }
    }

    fn disable(&mut self, capability: u32) {
        unsafe { self.gl.disable(capability) }
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.scissor(x, y, width, height) }
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.clear_color(red, green, blue, alpha) }
    }

    fn clear_depth(&mut self, depth: f64) {
        unsafe { self.gl.clear_depth_f64(depth) }
    }

    fn clear_stencil(&mut self, stencil: i32) {
        unsafe { self.gl.clear_stencil(stencil) }
    }

    fn depth_func(&mut self, func: u32) {
        unsafe { self.gl.depth_func(func) }
    }

    fn depth_mask(&mut self, enabled: bool) {
        unsafe { self.gl.depth_mask(enabled) }
    }

    fn cull_face(&mut self, face: u32) {
        unsafe { self.gl.cull_face(face) }
    }

    fn front_face(&mut self, winding: u32) {
        unsafe { self.gl.front_face(winding) }
    }

    fn blend_func(&mut self, src: u32, dst: u32) {
        unsafe { self.gl.blend_func(src, dst) }
    }
}
