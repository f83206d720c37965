// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The context: one driver plus the shadow of everything it has bound.

Every bind goes through a [`Context`].  The context compares the request against its
shadow and only calls the driver when the shadow would change, so

```text
context.bind_texture(2, Texture2D, 7);   // ActiveTexture(2), BindTexture(7)
context.bind_texture(2, Texture2D, 7);   // nothing
context.bind_texture(2, Texture2D, 9);   // BindTexture(9)
```

Render state (capabilities, viewport and scissor rectangles, clear values, depth,
culling and blending) is elided the same way:

```text
context.enable(Capability::Blend);        // Enable(BLEND)
context.set_capability(Blend, true);      // nothing
```

The shadow is written only by these methods.  Code that talks to the driver behind
the context's back must call [`Context::reset_shadow`] afterwards.

# Threading

A context is used from one thread at a time.  [`Context::thread_change`] declares
that the calling thread now owns it; moving the driver context itself between
threads is the caller's business.  Other threads hand work to the owner through
[`Context::actions`].
*/

mod actions;

pub use actions::ActionQueue;

use crate::bindings::{IndexedBinding, RenderShadow, Shadow, TextureUnits};
use crate::error::{DriverError, Error, Result};
use crate::imp::Driver;
use crate::limits::{GlVersion, Limits};
use crate::state::{BlendFunc, Capability, CompareFunc, Face, FrontFace, Rect};
use crate::targets::{BufferTarget, FrameTarget, IndexedBufferTarget, Target, TextureTarget};
use logwise::privacy::LogIt;

/// Builder for a [`Context`].
///
/// ```
/// use bindshadow::{ContextBuilder, GlVersion, Limits, RecordingDriver};
///
/// let context = ContextBuilder::new(RecordingDriver::new())
///     .with_version(GlVersion::new(3, 3))
///     .with_debug_name("offscreen")
///     .build();
/// assert_eq!(context.limits().shader_storage_buffer_bindings, 1);
/// assert_eq!(context.debug_name(), "offscreen");
/// ```
pub struct ContextBuilder<D> {
    driver: D,
    version: GlVersion,
    debug_name: String,
    limits: Option<Limits>,
    framebuffer: Rect,
}

impl<D: Driver> ContextBuilder<D> {
    pub fn new(driver: D) -> Self {
        ContextBuilder {
            driver,
            version: GlVersion::default(),
            debug_name: String::from("context"),
            limits: None,
            framebuffer: Rect::default(),
        }
    }

    /// The API version of the driver context.  Decides which limits are queried.
    pub fn with_version(mut self, version: GlVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_debug_name(mut self, debug_name: impl Into<String>) -> Self {
        self.debug_name = debug_name.into();
        self
    }

    /// Uses `limits` instead of asking the driver.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Size of the default framebuffer.  The driver starts with a viewport and
    /// scissor box covering it; without this both are assumed empty.
    pub fn with_framebuffer_size(mut self, width: i32, height: i32) -> Self {
        self.framebuffer = Rect::sized(width, height);
        self
    }

    pub fn build(self) -> Context<D> {
        let ContextBuilder {
            mut driver,
            version,
            debug_name,
            limits,
            framebuffer,
        } = self;
        let limits = limits.unwrap_or_else(|| Limits::query(&mut driver, version));
        logwise::info_sync!(
            "context {name} created for version {version} with limits {limits}",
            name = LogIt(&debug_name),
            version = LogIt(&version),
            limits = LogIt(&limits)
        );
        Context {
            driver,
            version,
            debug_name,
            units: TextureUnits::new(limits.texture_units),
            shadow: Shadow::new(&limits),
            render: RenderShadow::new(framebuffer),
            limits,
            actions: ActionQueue::new(),
        }
    }
}

/// One driver context and its shadow binding state.
pub struct Context<D: Driver> {
    driver: D,
    version: GlVersion,
    debug_name: String,
    limits: Limits,
    units: TextureUnits,
    shadow: Shadow,
    render: RenderShadow,
    actions: ActionQueue<D>,
}

impl<D: Driver + std::fmt::Debug> std::fmt::Debug for Context<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("debug_name", &self.debug_name)
            .field("version", &self.version)
            .field("limits", &self.limits)
            .field("active_unit", &self.units.active())
            .field("driver", &self.driver)
            .finish_non_exhaustive()
    }
}

impl<D: Driver> Context<D> {
    /// Creates a context for `driver`, querying its limits.
    pub fn new(driver: D, version: GlVersion) -> Self {
        ContextBuilder::new(driver).with_version(version).build()
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn version(&self) -> GlVersion {
        self.version
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Direct access to the driver.
    ///
    /// Binding through this bypasses the shadow; call [`Self::reset_shadow`] afterwards.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Forgets all mirrored state.  Issues nothing.
    ///
    /// Afterwards the shadow reports every slot unbound, unit 0 active and the
    /// render state a new driver context starts with, so the next bind of any
    /// non-zero id reaches the driver.
    pub fn reset_shadow(&mut self) {
        logwise::trace_sync!("reset_shadow");
        self.units.reset();
        self.shadow.reset();
        self.render.reset();
    }

    //texture units

    fn check_unit(&self, unit: u32) {
        assert!(
            unit < self.units.len(),
            "texture unit {unit} is beyond the {} available",
            self.units.len()
        );
    }

    /// Number of texture units.
    pub fn texture_units(&self) -> u32 {
        self.units.len()
    }

    pub fn active_unit(&self) -> u32 {
        self.units.active()
    }

    /// # Panics
    /// `unit` must be below [`Self::texture_units`].
    pub fn set_active_unit(&mut self, unit: u32) {
        self.check_unit(unit);
        if self.units.set_active(unit) {
            logwise::trace_sync!("active unit <- {unit}", unit = unit);
            self.driver.active_texture(unit);
        }
    }

    /// Binds `id` to `target` on `unit`.
    ///
    /// Nothing happens if the slot already holds `id`; in particular the active
    /// unit is left alone.  Otherwise the active unit is switched (if needed) and the
    /// bind is issued.
    ///
    /// # Panics
    /// `unit` must be below [`Self::texture_units`].
    pub fn bind_texture(&mut self, unit: u32, target: TextureTarget, id: u32) {
        self.check_unit(unit);
        if !self.units.set(unit, target, id) {
            logwise::trace_sync!(
                "elided texture bind {id} on unit {unit} {target}",
                id = id,
                unit = unit,
                target = LogIt(&target)
            );
            return;
        }
        self.set_active_unit(unit);
        logwise::trace_sync!(
            "texture bind {id} on unit {unit} {target}",
            id = id,
            unit = unit,
            target = LogIt(&target)
        );
        self.driver.bind_texture(target.raw(), id);
    }

    /// Binds `id` to `target` on `unit` and leaves `unit` active.
    ///
    /// Use this before a unit-relative driver call (upload, readback, parameters) so
    /// the call acts on `id`.
    pub fn use_texture(&mut self, unit: u32, target: TextureTarget, id: u32) {
        self.bind_texture(unit, target, id);
        self.set_active_unit(unit);
    }

    /// Unbinds `target` on the active unit.
    pub fn unbind_texture(&mut self, target: TextureTarget) {
        self.unbind_texture_at(self.units.active(), target);
    }

    /// Unbinds `target` on `unit`.
    ///
    /// Unbinding [`TextureTarget::Buffer`] also unbinds the [`BufferTarget::Texture`]
    /// buffer binding.
    pub fn unbind_texture_at(&mut self, unit: u32, target: TextureTarget) {
        self.bind_texture(unit, target, 0);
        if target.canonical() == TextureTarget::Buffer {
            self.unbind_buffer(BufferTarget::Texture);
        }
    }

    /// # Panics
    /// `unit` must be below [`Self::texture_units`].
    pub fn bound_texture(&self, unit: u32, target: TextureTarget) -> u32 {
        self.check_unit(unit);
        self.units.get(unit, target)
    }

    //buffers

    pub fn bind_buffer(&mut self, target: BufferTarget, id: u32) {
        if self.shadow.set_buffer(target, id) {
            logwise::trace_sync!(
                "buffer bind {id} {target}",
                id = id,
                target = LogIt(&target)
            );
            self.driver.bind_buffer(target.raw(), id);
        }
    }

    pub fn unbind_buffer(&mut self, target: BufferTarget) {
        self.bind_buffer(target, 0);
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> u32 {
        self.shadow.buffer(target)
    }

    /// Number of indexed binding points for `target`.
    pub fn indexed_bindings(&self, target: IndexedBufferTarget) -> u32 {
        self.shadow.indexed_len(target) as u32
    }

    /// Binds the whole of buffer `id` to binding point `index` of `target`.
    ///
    /// # Panics
    /// `index` must be below [`Self::indexed_bindings`].
    pub fn bind_buffer_base(&mut self, target: IndexedBufferTarget, index: u32, id: u32) {
        if self
            .shadow
            .set_indexed(target, index, IndexedBinding::whole(id))
        {
            logwise::trace_sync!(
                "indexed buffer bind {id} at {target}[{index}]",
                id = id,
                target = LogIt(&target),
                index = index
            );
            self.driver.bind_buffer_base(target.raw(), index, id);
        }
    }

    /// Binds `size` bytes of buffer `id`, starting at `offset`, to binding point `index`.
    ///
    /// # Panics
    /// `index` must be below [`Self::indexed_bindings`].
    pub fn bind_buffer_range(
        &mut self,
        target: IndexedBufferTarget,
        index: u32,
        id: u32,
        offset: isize,
        size: isize,
    ) {
        let binding = IndexedBinding {
            id,
            range: Some((offset, size)),
        };
        if self.shadow.set_indexed(target, index, binding) {
            logwise::trace_sync!(
                "indexed buffer range bind {id} at {target}[{index}] {offset}+{size}",
                id = id,
                target = LogIt(&target),
                index = index,
                offset = LogIt(&offset),
                size = LogIt(&size)
            );
            self.driver
                .bind_buffer_range(target.raw(), index, id, offset, size);
        }
    }

    pub fn unbind_buffer_base(&mut self, target: IndexedBufferTarget, index: u32) {
        self.bind_buffer_base(target, index, 0);
    }

    /// The buffer id at binding point `index` of `target`.
    pub fn bound_indexed_buffer(&self, target: IndexedBufferTarget, index: u32) -> u32 {
        self.shadow.indexed(target, index).id
    }

    /// The full binding, including any range, at binding point `index` of `target`.
    pub fn bound_indexed_binding(&self, target: IndexedBufferTarget, index: u32) -> IndexedBinding {
        self.shadow.indexed(target, index)
    }

    //framebuffers and friends

    /// Binds framebuffer `id`.  [`FrameTarget::Framebuffer`] binds both read and draw.
    pub fn bind_framebuffer(&mut self, target: FrameTarget, id: u32) {
        if self.shadow.set_framebuffer(target, id) {
            logwise::trace_sync!(
                "framebuffer bind {id} {target}",
                id = id,
                target = LogIt(&target)
            );
            self.driver.bind_framebuffer(target.raw(), id);
        }
    }

    /// Binds the default framebuffer.
    pub fn unbind_framebuffer(&mut self, target: FrameTarget) {
        self.bind_framebuffer(target, 0);
    }

    /// The combined target reports the draw binding.
    pub fn bound_framebuffer(&self, target: FrameTarget) -> u32 {
        self.shadow.framebuffer(target)
    }

    pub fn bind_renderbuffer(&mut self, id: u32) {
        if self.shadow.set_renderbuffer(id) {
            logwise::trace_sync!("renderbuffer bind {id}", id = id);
            self.driver.bind_renderbuffer(id);
        }
    }

    pub fn unbind_renderbuffer(&mut self) {
        self.bind_renderbuffer(0);
    }

    pub fn bound_renderbuffer(&self) -> u32 {
        self.shadow.renderbuffer()
    }

    /// Binds vertex array `id`.
    ///
    /// The element array buffer binding is vertex array state, so an issued bind
    /// also changes what [`BufferTarget::ElementArray`] reports: the buffer last
    /// bound under `id` through this context, or 0 (and unknown, so the next element
    /// array bind is always issued) for a vertex array it has not seen.
    pub fn bind_vertex_array(&mut self, id: u32) {
        if self.shadow.set_vertex_array(id) {
            logwise::trace_sync!("vertex array bind {id}", id = id);
            self.driver.bind_vertex_array(id);
        }
    }

    pub fn unbind_vertex_array(&mut self) {
        self.bind_vertex_array(0);
    }

    pub fn bound_vertex_array(&self) -> u32 {
        self.shadow.vertex_array()
    }

    pub fn bind_program(&mut self, id: u32) {
        if self.shadow.set_program(id) {
            logwise::trace_sync!("program bind {id}", id = id);
            self.driver.use_program(id);
        }
    }

    pub fn unbind_program(&mut self) {
        self.bind_program(0);
    }

    pub fn bound_program(&self) -> u32 {
        self.shadow.program()
    }

    /// Binds nothing to `target`.  Texture targets are unbound on the active unit.
    pub fn null_bind(&mut self, target: impl Into<Target>) {
        match target.into() {
            Target::Texture(t) => self.unbind_texture(t),
            Target::Buffer(b) => self.unbind_buffer(b),
            Target::Frame(f) => self.unbind_framebuffer(f),
            Target::Renderbuffer => self.unbind_renderbuffer(),
        }
    }

    //render state

    /// Enables or disables `capability`.
    pub fn set_capability(&mut self, capability: Capability, enabled: bool) {
        if !self.render.set_capability(capability, enabled) {
            return;
        }
        logwise::trace_sync!(
            "capability {capability} <- {enabled}",
            capability = LogIt(&capability),
            enabled = enabled
        );
        if enabled {
            self.driver.enable(capability.raw());
        } else {
            self.driver.disable(capability.raw());
        }
    }

    pub fn enable(&mut self, capability: Capability) {
        self.set_capability(capability, true);
    }

    pub fn disable(&mut self, capability: Capability) {
        self.set_capability(capability, false);
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.render.is_enabled(capability)
    }

    /// Sets the viewport.
    ///
    /// A rectangle with a negative size is passed to the driver, which rejects it
    /// through the error flag; the shadow keeps the previous viewport.
    pub fn set_viewport(&mut self, rect: Rect) {
        if !rect.is_valid() {
            logwise::warn_sync!("invalid viewport {rect}", rect = LogIt(&rect));
        } else if !self.render.set_viewport(rect) {
            return;
        }
        logwise::trace_sync!("viewport <- {rect}", rect = LogIt(&rect));
        self.driver.viewport(rect.x, rect.y, rect.width, rect.height);
    }

    pub fn viewport(&self) -> Rect {
        self.render.viewport()
    }

    /// Sets the scissor box.  Negative sizes are handled as for [`Self::set_viewport`].
    pub fn set_scissor(&mut self, rect: Rect) {
        if !rect.is_valid() {
            logwise::warn_sync!("invalid scissor box {rect}", rect = LogIt(&rect));
        } else if !self.render.set_scissor(rect) {
            return;
        }
        logwise::trace_sync!("scissor <- {rect}", rect = LogIt(&rect));
        self.driver.scissor(rect.x, rect.y, rect.width, rect.height);
    }

    pub fn scissor(&self) -> Rect {
        self.render.scissor()
    }

    /// Sets the colour used to clear colour buffers, as `[r, g, b, a]`.
    ///
    /// Values compare bitwise, so `-0.0` and `0.0` are different colours.
    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        if self.render.set_clear_color(color) {
            logwise::trace_sync!("clear color <- {color}", color = LogIt(&color));
            let [r, g, b, a] = color;
            self.driver.clear_color(r, g, b, a);
        }
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.render.clear_color()
    }

    /// Sets the value used to clear the depth buffer, clamped to `[0, 1]`.
    pub fn set_clear_depth(&mut self, depth: f64) {
        let depth = depth.clamp(0.0, 1.0);
        if self.render.set_clear_depth(depth) {
            logwise::trace_sync!("clear depth <- {depth}", depth = LogIt(&depth));
            self.driver.clear_depth(depth);
        }
    }

    pub fn clear_depth(&self) -> f64 {
        self.render.clear_depth()
    }

    pub fn set_clear_stencil(&mut self, stencil: i32) {
        if self.render.set_clear_stencil(stencil) {
            logwise::trace_sync!("clear stencil <- {stencil}", stencil = stencil);
            self.driver.clear_stencil(stencil);
        }
    }

    pub fn clear_stencil(&self) -> i32 {
        self.render.clear_stencil()
    }

    pub fn set_depth_func(&mut self, func: CompareFunc) {
        if self.render.set_depth_func(func) {
            logwise::trace_sync!("depth func <- {func}", func = LogIt(&func));
            self.driver.depth_func(func.raw());
        }
    }

    pub fn depth_func(&self) -> CompareFunc {
        self.render.depth_func()
    }

    /// Enables or disables writing to the depth buffer.
    pub fn set_depth_mask(&mut self, enabled: bool) {
        if self.render.set_depth_mask(enabled) {
            logwise::trace_sync!("depth mask <- {enabled}", enabled = enabled);
            self.driver.depth_mask(enabled);
        }
    }

    pub fn depth_mask(&self) -> bool {
        self.render.depth_mask()
    }

    /// Which faces are culled while [`Capability::CullFace`] is enabled.
    pub fn set_cull_face(&mut self, face: Face) {
        if self.render.set_cull_face(face) {
            logwise::trace_sync!("cull face <- {face}", face = LogIt(&face));
            self.driver.cull_face(face.raw());
        }
    }

    pub fn cull_face(&self) -> Face {
        self.render.cull_face()
    }

    pub fn set_front_face(&mut self, winding: FrontFace) {
        if self.render.set_front_face(winding) {
            logwise::trace_sync!("front face <- {winding}", winding = LogIt(&winding));
            self.driver.front_face(winding.raw());
        }
    }

    pub fn front_face(&self) -> FrontFace {
        self.render.front_face()
    }

    pub fn set_blend_func(&mut self, func: BlendFunc) {
        if self.render.set_blend_func(func) {
            logwise::trace_sync!("blend func <- {func}", func = LogIt(&func));
            self.driver.blend_func(func.src.raw(), func.dst.raw());
        }
    }

    pub fn blend_func(&self) -> BlendFunc {
        self.render.blend_func()
    }

    //errors and synchronization

    /// Polls the driver's error flag once.
    pub fn get_error(&mut self) -> Option<DriverError> {
        DriverError::from_raw(self.driver.get_error())
    }

    /// Polls the error flag once and turns a set flag into an [`Error`].
    pub fn check_error(&mut self) -> Result<()> {
        match self.get_error() {
            Some(e) => Err(Error::Driver(e)),
            None => Ok(()),
        }
    }

    /// Polls the error flag until it is clear.  Returns how many errors were discarded.
    pub fn clear_errors(&mut self) -> usize {
        let mut discarded = 0;
        while let Some(e) = self.get_error() {
            logwise::warn_sync!(
                "discarding driver error {error} on {name}",
                error = LogIt(&e),
                name = LogIt(&self.debug_name)
            );
            discarded += 1;
        }
        discarded
    }

    /// Asks the driver to finish queued work in finite time.  Does not block.
    pub fn flush(&mut self) {
        self.driver.flush();
    }

    /// Blocks until the driver has finished all submitted work.
    pub fn finish(&mut self) {
        self.driver.finish();
    }

    //threading

    /// The queue other threads use to run work on this context.
    pub fn actions(&self) -> &ActionQueue<D> {
        &self.actions
    }

    /// Declares that the calling thread now owns this context.
    ///
    /// Actions queued for the previous owner are discarded.  The driver context
    /// itself is not moved.
    pub fn thread_change(&mut self) {
        let dropped = self.actions.thread_change();
        if dropped > 0 {
            logwise::warn_sync!(
                "thread change on {name} dropped {dropped} queued actions",
                name = LogIt(&self.debug_name),
                dropped = dropped
            );
        }
    }

    /// Runs every queued action in order.  Returns how many ran.
    ///
    /// Actions queued while running are left for the next call.
    pub fn run_pending_actions(&mut self) -> usize {
        debug_assert!(
            self.actions.is_owner_thread(),
            "actions must run on the owning thread; call thread_change first"
        );
        let actions = self.actions.take();
        let count = actions.len();
        for action in actions {
            action(self);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::{Call, RecordingDriver};
    use crate::sys::gl;

    fn context() -> Context<RecordingDriver> {
        let driver = RecordingDriver::new().with_limit(gl::MAX_TEXTURE_IMAGE_UNITS, 4);
        let mut c = Context::new(driver, GlVersion::default());
        c.driver_mut().clear_calls();
        c
    }

    #[test]
    fn bind_on_active_unit_skips_unit_switch() {
        let mut c = context();
        c.bind_texture(0, TextureTarget::Texture2D, 3);
        assert_eq!(
            c.driver().calls(),
            &[Call::BindTexture {
                target: gl::TEXTURE_2D,
                id: 3
            }]
        );
    }

    #[test]
    fn elided_bind_leaves_active_unit() {
        let mut c = context();
        c.bind_texture(2, TextureTarget::Texture2D, 3);
        c.set_active_unit(0);
        c.driver_mut().clear_calls();
        c.bind_texture(2, TextureTarget::Texture2D, 3);
        assert!(c.driver().calls().is_empty());
        assert_eq!(c.active_unit(), 0);
    }

    #[test]
    fn use_texture_makes_unit_active_even_when_elided() {
        let mut c = context();
        c.bind_texture(1, TextureTarget::Texture3D, 8);
        c.set_active_unit(3);
        c.driver_mut().clear_calls();
        c.use_texture(1, TextureTarget::Texture3D, 8);
        assert_eq!(c.driver().calls(), &[Call::ActiveTexture(1)]);
    }

    #[test]
    #[should_panic]
    fn out_of_range_unit_panics() {
        let mut c = context();
        c.set_active_unit(4);
    }

    #[test]
    fn null_bind_of_default_framebuffer_is_elided() {
        let mut c = context();
        c.null_bind(FrameTarget::Framebuffer);
        assert!(c.driver().calls().is_empty());
        c.bind_framebuffer(FrameTarget::Read, 2);
        c.null_bind(FrameTarget::Framebuffer);
        assert_eq!(
            c.driver().calls().last(),
            Some(&Call::BindFramebuffer {
                target: gl::FRAMEBUFFER,
                id: 0
            })
        );
    }

    #[test]
    fn reset_shadow_reissues_binds() {
        let mut c = context();
        c.bind_program(6);
        c.reset_shadow();
        assert_eq!(c.bound_program(), 0);
        c.bind_program(6);
        assert_eq!(c.driver().count(|call| *call == Call::UseProgram(6)), 2);
    }

    #[test]
    fn check_error_reports_driver_errors() {
        let mut c = context();
        c.driver_mut().push_error(gl::INVALID_VALUE);
        assert_eq!(
            c.check_error(),
            Err(Error::Driver(DriverError::InvalidValue))
        );
        assert_eq!(c.check_error(), Ok(()));
    }

    #[test]
    fn capability_toggles_are_elided() {
        let mut c = context();
        c.enable(Capability::Blend);
        c.set_capability(Capability::Blend, true);
        //enabled from the start
        c.enable(Capability::Dither);
        c.disable(Capability::Blend);
        assert_eq!(
            c.driver().calls(),
            &[Call::Enable(gl::BLEND), Call::Disable(gl::BLEND)]
        );
        assert!(!c.is_enabled(Capability::Blend));
    }

    #[test]
    fn invalid_viewport_keeps_the_previous_one() {
        let mut c = context();
        c.set_viewport(Rect::sized(16, 16));
        c.set_viewport(Rect::new(0, 0, -2, 16));
        assert_eq!(c.viewport(), Rect::sized(16, 16));
        assert_eq!(c.driver().current_viewport(), Rect::sized(16, 16));
        assert_eq!(c.get_error(), Some(DriverError::InvalidValue));
        assert_eq!(c.driver().calls().len(), 2);
    }

    #[test]
    fn clear_depth_is_clamped_before_comparing() {
        let mut c = context();
        //1.0 is the initial value
        c.set_clear_depth(3.0);
        assert!(c.driver().calls().is_empty());
        c.set_clear_depth(0.25);
        c.set_clear_depth(0.25);
        assert_eq!(c.driver().calls(), &[Call::ClearDepth(0.25)]);
    }

    #[test]
    fn reset_shadow_restores_render_defaults() {
        let mut c = context();
        c.set_depth_func(CompareFunc::Always);
        c.enable(Capability::DepthTest);
        c.reset_shadow();
        assert_eq!(c.depth_func(), CompareFunc::Less);
        assert!(!c.is_enabled(Capability::DepthTest));
    }

    #[test]
    fn flush_and_finish_reach_the_driver() {
        let mut c = context();
        c.flush();
        c.finish();
        assert_eq!(c.driver().calls(), &[Call::Flush, Call::Finish]);
    }
}
