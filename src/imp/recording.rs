// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! An in-memory driver.

[`RecordingDriver`] models the binding state of a real driver context closely enough
to act as a reference model: every call is applied unconditionally to its own state,
and every call is appended to a log.  Tests compare the context's shadow against the
driver's state and count the calls that actually crossed the boundary.

It also keeps uploaded images, so texel data can be read back exactly as it was
handed over, and the render state (capabilities, rectangles, clear values) with the
same validation a driver applies.
*/

use crate::imp::{Driver, ImageRegion};
use crate::pixel_formats::TextureFormat;
use crate::state::{Capability, Rect};
use crate::sys::gl;
use crate::targets::{BufferTarget, FrameTarget, IndexedBufferTarget, TextureTarget};
use std::collections::{HashMap, HashSet, VecDeque};

/// One call that crossed the driver boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ActiveTexture(u32),
    BindTexture {
        target: u32,
        id: u32,
    },
    BindBuffer {
        target: u32,
        id: u32,
    },
    BindBufferBase {
        target: u32,
        index: u32,
        id: u32,
    },
    BindBufferRange {
        target: u32,
        index: u32,
        id: u32,
        offset: isize,
        size: isize,
    },
    BindFramebuffer {
        target: u32,
        id: u32,
    },
    BindRenderbuffer(u32),
    BindVertexArray(u32),
    UseProgram(u32),
    GetInteger(u32),
    Flush,
    Finish,
    TexLevelParameter {
        target: u32,
        level: i32,
        pname: u32,
    },
    TexImage {
        region: ImageRegion,
        internal_format: u32,
        format: u32,
        data_type: u32,
        byte_len: Option<usize>,
    },
    CompressedTexImage {
        region: ImageRegion,
        internal_format: u32,
        byte_len: usize,
    },
    TexImageMultisample {
        region: ImageRegion,
        samples: i32,
        internal_format: u32,
        fixed_sample_locations: bool,
    },
    GetTexImage {
        target: u32,
        level: i32,
        format: u32,
        data_type: u32,
    },
    Enable(u32),
    Disable(u32),
    Viewport(Rect),
    Scissor(Rect),
    ClearColor([f32; 4]),
    ClearDepth(f64),
    ClearStencil(i32),
    DepthFunc(u32),
    DepthMask(bool),
    CullFace(u32),
    FrontFace(u32),
    BlendFunc {
        src: u32,
        dst: u32,
    },
}

impl Call {
    /// Whether this call changes a binding point (including the active unit).
    pub fn is_binding(&self) -> bool {
        matches!(
            self,
            Call::ActiveTexture(_)
                | Call::BindTexture { .. }
                | Call::BindBuffer { .. }
                | Call::BindBufferBase { .. }
                | Call::BindBufferRange { .. }
                | Call::BindFramebuffer { .. }
                | Call::BindRenderbuffer(_)
                | Call::BindVertexArray(_)
                | Call::UseProgram(_)
        )
    }

    /// Whether this call changes render state: a capability, a rectangle, a clear
    /// value or a per-fragment setting.
    pub fn is_render_state(&self) -> bool {
        matches!(
            self,
            Call::Enable(_)
                | Call::Disable(_)
                | Call::Viewport(_)
                | Call::Scissor(_)
                | Call::ClearColor(_)
                | Call::ClearDepth(_)
                | Call::ClearStencil(_)
                | Call::DepthFunc(_)
                | Call::DepthMask(_)
                | Call::CullFace(_)
                | Call::FrontFace(_)
                | Call::BlendFunc { .. }
        )
    }
}

/// Render state as a driver context keeps it, in raw enumerants.
#[derive(Debug, Clone, PartialEq)]
struct RenderState {
    enabled: HashSet<u32>,
    viewport: Rect,
    scissor: Rect,
    clear_color: [f32; 4],
    clear_depth: f64,
    clear_stencil: i32,
    depth_func: u32,
    depth_mask: bool,
    cull_face: u32,
    front_face: u32,
    blend_func: (u32, u32),
}

impl RenderState {
    fn new(framebuffer: Rect) -> Self {
        RenderState {
            enabled: HashSet::from([gl::DITHER, gl::MULTISAMPLE]),
            viewport: framebuffer,
            scissor: framebuffer,
            clear_color: [0.0; 4],
            clear_depth: 1.0,
            clear_stencil: 0,
            depth_func: gl::LESS,
            depth_mask: true,
            cull_face: gl::BACK,
            front_face: gl::CCW,
            blend_func: (gl::ONE, gl::ZERO),
        }
    }
}

fn is_capability(raw: u32) -> bool {
    Capability::ALL.iter().any(|c| c.raw() == raw)
}

fn is_compare_func(raw: u32) -> bool {
    (gl::NEVER..=gl::ALWAYS).contains(&raw)
}

fn is_blend_factor(raw: u32) -> bool {
    matches!(raw, gl::ZERO | gl::ONE)
        || (gl::SRC_COLOR..=gl::SRC_ALPHA_SATURATE).contains(&raw)
        || (gl::CONSTANT_COLOR..=gl::ONE_MINUS_CONSTANT_ALPHA).contains(&raw)
}

#[derive(Debug, Clone)]
struct StoredImage {
    internal_format: u32,
    width: i32,
    height: i32,
    depth: i32,
    bytes: Vec<u8>,
}

/// A driver that records calls and simulates binding state.
///
/// # Examples
///
/// ```
/// use bindshadow::{Driver, RecordingDriver};
/// use bindshadow::sys::gl;
///
/// let mut driver = RecordingDriver::new().with_limit(gl::MAX_TEXTURE_IMAGE_UNITS, 4);
/// assert_eq!(driver.get_integer(gl::MAX_TEXTURE_IMAGE_UNITS), 4);
/// driver.bind_texture(gl::TEXTURE_2D, 7);
/// assert_eq!(driver.calls().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingDriver {
    calls: Vec<Call>,
    limits: HashMap<u32, i32>,
    errors: VecDeque<u32>,
    active_unit: u32,
    textures: HashMap<(u32, u32), u32>,
    buffers: HashMap<u32, u32>,
    indexed: HashMap<(u32, u32), u32>,
    read_framebuffer: u32,
    draw_framebuffer: u32,
    renderbuffer: u32,
    vertex_array: u32,
    //element array buffer bound under each vertex array
    vertex_array_elements: HashMap<u32, u32>,
    program: u32,
    images: HashMap<(u32, u32, i32), StoredImage>,
    render: RenderState,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDriver {
    /// A driver reporting the limits of a typical desktop 4.6 context.
    pub fn new() -> Self {
        let limits = [
            (gl::MAX_TEXTURE_IMAGE_UNITS, 16),
            (gl::MAX_TRANSFORM_FEEDBACK_BUFFERS, 4),
            (gl::MAX_UNIFORM_BUFFER_BINDINGS, 36),
            (gl::MAX_ATOMIC_COUNTER_BUFFER_BINDINGS, 8),
            (gl::MAX_SHADER_STORAGE_BUFFER_BINDINGS, 8),
            (gl::MAX_COLOR_ATTACHMENTS, 8),
            (gl::MAX_DRAW_BUFFERS, 8),
        ]
        .into_iter()
        .collect();
        RecordingDriver {
            calls: Vec::new(),
            limits,
            errors: VecDeque::new(),
            active_unit: 0,
            textures: HashMap::new(),
            buffers: HashMap::new(),
            indexed: HashMap::new(),
            read_framebuffer: 0,
            draw_framebuffer: 0,
            renderbuffer: 0,
            vertex_array: 0,
            vertex_array_elements: HashMap::new(),
            program: 0,
            images: HashMap::new(),
            render: RenderState::new(Rect::default()),
        }
    }

    /// Sets the size of the default framebuffer, which is also the initial
    /// viewport and scissor box.
    pub fn with_framebuffer_size(mut self, width: i32, height: i32) -> Self {
        self.render.viewport = Rect::sized(width, height);
        self.render.scissor = Rect::sized(width, height);
        self
    }

    /// Overrides the value reported for `pname`.
    pub fn with_limit(mut self, pname: u32, value: i32) -> Self {
        self.limits.insert(pname, value);
        self
    }

    /// Queues an error that the next [`Driver::get_error`] will report.
    pub fn push_error(&mut self, raw: u32) {
        self.errors.push_back(raw);
    }

    /// Pretends that `id` already exists with a level-0 image, as if some other
    /// code had created it.
    pub fn define_texture(
        &mut self,
        id: u32,
        target: TextureTarget,
        format: TextureFormat,
        width: i32,
        height: i32,
        depth: i32,
    ) {
        self.images.insert(
            (id, image_target(target.raw()), 0),
            StoredImage {
                internal_format: format.raw(),
                width,
                height,
                depth,
                bytes: Vec::new(),
            },
        );
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn active_unit(&self) -> u32 {
        self.active_unit
    }

    pub fn bound_texture(&self, unit: u32, target: TextureTarget) -> u32 {
        self.textures.get(&(unit, target.raw())).copied().unwrap_or(0)
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> u32 {
        self.buffers.get(&target.raw()).copied().unwrap_or(0)
    }

    pub fn bound_indexed_buffer(&self, target: IndexedBufferTarget, index: u32) -> u32 {
        self.indexed.get(&(target.raw(), index)).copied().unwrap_or(0)
    }

    /// The combined target reports the draw binding.
    pub fn bound_framebuffer(&self, target: FrameTarget) -> u32 {
        match target {
            FrameTarget::Read => self.read_framebuffer,
            FrameTarget::Draw | FrameTarget::Framebuffer => self.draw_framebuffer,
        }
    }

    pub fn bound_renderbuffer(&self) -> u32 {
        self.renderbuffer
    }

    pub fn bound_vertex_array(&self) -> u32 {
        self.vertex_array
    }

    pub fn bound_program(&self) -> u32 {
        self.program
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.render.enabled.contains(&capability.raw())
    }

    pub fn current_viewport(&self) -> Rect {
        self.render.viewport
    }

    pub fn current_scissor(&self) -> Rect {
        self.render.scissor
    }

    pub fn current_clear_color(&self) -> [f32; 4] {
        self.render.clear_color
    }

    pub fn current_clear_depth(&self) -> f64 {
        self.render.clear_depth
    }

    pub fn current_clear_stencil(&self) -> i32 {
        self.render.clear_stencil
    }

    pub fn current_depth_func(&self) -> u32 {
        self.render.depth_func
    }

    pub fn current_depth_mask(&self) -> bool {
        self.render.depth_mask
    }

    pub fn current_cull_face(&self) -> u32 {
        self.render.cull_face
    }

    pub fn current_front_face(&self) -> u32 {
        self.render.front_face
    }

    /// `(src, dst)`
    pub fn current_blend_func(&self) -> (u32, u32) {
        self.render.blend_func
    }

    /// Bytes most recently uploaded to one image of texture `id`.
    pub fn image(&self, id: u32, target: u32, level: i32) -> Option<&[u8]> {
        self.images.get(&(id, target, level)).map(|i| i.bytes.as_slice())
    }

    fn limit(&self, pname: u32) -> i32 {
        self.limits.get(&pname).copied().unwrap_or(0)
    }

    fn bound_on_active(&self, target: u32) -> u32 {
        let binding = match target {
            t if is_cube_face(t) => gl::TEXTURE_CUBE_MAP,
            t => t,
        };
        self.textures
            .get(&(self.active_unit, binding))
            .copied()
            .unwrap_or(0)
    }

    fn store(&mut self, region: ImageRegion, internal_format: u32, bytes: Vec<u8>) {
        let id = self.bound_on_active(region.target);
        if id == 0 {
            self.errors.push_back(gl::INVALID_OPERATION);
            return;
        }
        self.images.insert(
            (id, region.target, region.level),
            StoredImage {
                internal_format,
                width: region.width,
                height: region.height,
                depth: region.depth,
                bytes,
            },
        );
    }
}

fn is_cube_face(target: u32) -> bool {
    (gl::TEXTURE_CUBE_MAP_POSITIVE_X..gl::TEXTURE_CUBE_MAP_POSITIVE_X + 6).contains(&target)
}

/// Cube maps keep their images per face; the first face stands in for the whole map.
fn image_target(target: u32) -> u32 {
    if target == gl::TEXTURE_CUBE_MAP {
        gl::TEXTURE_CUBE_MAP_POSITIVE_X
    } else {
        target
    }
}

impl Driver for RecordingDriver {
    fn active_texture(&mut self, unit: u32) {
        self.calls.push(Call::ActiveTexture(unit));
        if unit as i64 >= self.limit(gl::MAX_TEXTURE_IMAGE_UNITS) as i64 {
            self.errors.push_back(gl::INVALID_ENUM);
            return;
        }
        self.active_unit = unit;
    }

    fn bind_texture(&mut self, target: u32, id: u32) {
        self.calls.push(Call::BindTexture { target, id });
        self.textures.insert((self.active_unit, target), id);
    }

    fn bind_buffer(&mut self, target: u32, id: u32) {
        self.calls.push(Call::BindBuffer { target, id });
        self.buffers.insert(target, id);
        if target == gl::ELEMENT_ARRAY_BUFFER {
            self.vertex_array_elements.insert(self.vertex_array, id);
        }
    }

    fn bind_buffer_base(&mut self, target: u32, index: u32, id: u32) {
        self.calls.push(Call::BindBufferBase { target, index, id });
        self.indexed.insert((target, index), id);
        self.buffers.insert(target, id);
    }

    fn bind_buffer_range(&mut self, target: u32, index: u32, id: u32, offset: isize, size: isize) {
        self.calls.push(Call::BindBufferRange {
            target,
            index,
            id,
            offset,
            size,
        });
        if id != 0 && (offset < 0 || size <= 0) {
            self.errors.push_back(gl::INVALID_VALUE);
            return;
        }
        self.indexed.insert((target, index), id);
        self.buffers.insert(target, id);
    }

    fn bind_framebuffer(&mut self, target: u32, id: u32) {
        self.calls.push(Call::BindFramebuffer { target, id });
        match target {
            gl::READ_FRAMEBUFFER => self.read_framebuffer = id,
            gl::DRAW_FRAMEBUFFER => self.draw_framebuffer = id,
            gl::FRAMEBUFFER => {
                self.read_framebuffer = id;
                self.draw_framebuffer = id;
            }
            _ => self.errors.push_back(gl::INVALID_ENUM),
        }
    }

    fn bind_renderbuffer(&mut self, id: u32) {
        self.calls.push(Call::BindRenderbuffer(id));
        self.renderbuffer = id;
    }

    fn bind_vertex_array(&mut self, id: u32) {
        self.calls.push(Call::BindVertexArray(id));
        self.vertex_array = id;
        //a vertex array never bound before has no element buffer
        let element = self.vertex_array_elements.get(&id).copied().unwrap_or(0);
        self.buffers.insert(gl::ELEMENT_ARRAY_BUFFER, element);
    }

    fn use_program(&mut self, id: u32) {
        self.calls.push(Call::UseProgram(id));
        self.program = id;
    }

    fn get_error(&mut self) -> u32 {
        self.errors.pop_front().unwrap_or(gl::NO_ERROR)
    }

    fn get_integer(&mut self, pname: u32) -> i32 {
        self.calls.push(Call::GetInteger(pname));
        self.limit(pname)
    }

    fn flush(&mut self) {
        self.calls.push(Call::Flush);
    }

    fn finish(&mut self) {
        self.calls.push(Call::Finish);
    }

    fn tex_level_parameter(&mut self, target: u32, level: i32, pname: u32) -> i32 {
        self.calls.push(Call::TexLevelParameter {
            target,
            level,
            pname,
        });
        let id = self.bound_on_active(target);
        let Some(image) = self.images.get(&(id, image_target(target), level)) else {
            return 0;
        };
        match pname {
            gl::TEXTURE_INTERNAL_FORMAT => image.internal_format as i32,
            gl::TEXTURE_WIDTH => image.width,
            gl::TEXTURE_HEIGHT => image.height,
            gl::TEXTURE_DEPTH => image.depth,
            _ => {
                self.errors.push_back(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn tex_image(
        &mut self,
        region: ImageRegion,
        internal_format: u32,
        format: u32,
        data_type: u32,
        pixels: Option<&[u8]>,
    ) {
        self.calls.push(Call::TexImage {
            region,
            internal_format,
            format,
            data_type,
            byte_len: pixels.map(<[u8]>::len),
        });
        self.store(region, internal_format, pixels.map(<[u8]>::to_vec).unwrap_or_default());
    }

    fn compressed_tex_image(&mut self, region: ImageRegion, internal_format: u32, data: &[u8]) {
        self.calls.push(Call::CompressedTexImage {
            region,
            internal_format,
            byte_len: data.len(),
        });
        self.store(region, internal_format, data.to_vec());
    }

    fn tex_image_multisample(
        &mut self,
        region: ImageRegion,
        samples: i32,
        internal_format: u32,
        fixed_sample_locations: bool,
    ) {
        self.calls.push(Call::TexImageMultisample {
            region,
            samples,
            internal_format,
            fixed_sample_locations,
        });
        if samples < 1 {
            self.errors.push_back(gl::INVALID_VALUE);
            return;
        }
        self.store(region, internal_format, Vec::new());
    }

    fn get_tex_image(&mut self, target: u32, level: i32, format: u32, data_type: u32, out: &mut [u8]) {
        self.calls.push(Call::GetTexImage {
            target,
            level,
            format,
            data_type,
        });
        let id = self.bound_on_active(target);
        match self.images.get(&(id, target, level)) {
            Some(image) => {
                let n = image.bytes.len().min(out.len());
                out[..n].copy_from_slice(&image.bytes[..n]);
            }
            None => self.errors.push_back(gl::INVALID_OPERATION),
        }
    }

    fn enable(&mut self, capability: u32) {
        self.calls.push(Call::Enable(capability));
        if !is_capability(capability) {
            self.errors.push_back(gl::INVALID_ENUM);
            return;
        }
        self.render.enabled.insert(capability);
    }

    fn disable(&mut self, capability: u32) {
        self.calls.push(Call::Disable(capability));
        if !is_capability(capability) {
            self.errors.push_back(gl::INVALID_ENUM);
            return;
        }
        self.render.enabled.remove(&capability);
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let rect = Rect::new(x, y, width, height);
        self.calls.push(Call::Viewport(rect));
        if !rect.is_valid() {
            self.errors.push_back(gl::INVALID_VALUE);
            return;
        }
        self.render.viewport = rect;
    }

    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let rect = Rect::new(x, y, width, height);
        self.calls.push(Call::Scissor(rect));
        if !rect.is_valid() {
            self.errors.push_back(gl::INVALID_VALUE);
            return;
        }
        self.render.scissor = rect;
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        let color = [red, green, blue, alpha];
        self.calls.push(Call::ClearColor(color));
        self.render.clear_color = color;
    }

    fn clear_depth(&mut self, depth: f64) {
        self.calls.push(Call::ClearDepth(depth));
        self.render.clear_depth = depth.clamp(0.0, 1.0);
    }

    fn clear_stencil(&mut self, stencil: i32) {
        self.calls.push(Call::ClearStencil(stencil));
        self.render.clear_stencil = stencil;
    }

    fn depth_func(&mut self, func: u32) {
        self.calls.push(Call::DepthFunc(func));
        if !is_compare_func(func) {
            self.errors.push_back(gl::INVALID_ENUM);
            return;
        }
        self.render.depth_func = func;
    }

    fn depth_mask(&mut self, enabled: bool) {
        self.calls.push(Call::DepthMask(enabled));
        self.render.depth_mask = enabled;
    }

    fn cull_face(&mut self, face: u32) {
        self.calls.push(Call::CullFace(face));
        if !matches!(face, gl::FRONT | gl::BACK | gl::FRONT_AND_BACK) {
            self.errors.push_back(gl::INVALID_ENUM);
            return;
        }
        self.render.cull_face = face;
    }

    fn front_face(&mut self, winding: u32) {
        self.calls.push(Call::FrontFace(winding));
        if !matches!(winding, gl::CW | gl::CCW) {
            self.errors.push_back(gl::INVALID_ENUM);
            return;
        }
        self.render.front_face = winding;
    }

    fn blend_func(&mut self, src: u32, dst: u32) {
        self.calls.push(Call::BlendFunc { src, dst });
        if !is_blend_factor(src) || !is_blend_factor(dst) {
            self.errors.push_back(gl::INVALID_ENUM);
            return;
        }
        self.render.blend_func = (src, dst);
    }
}
