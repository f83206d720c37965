// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Render state elision against a recording driver.

use bindshadow::sys::gl;
use bindshadow::{
    BlendFactor, BlendFunc, Call, Capability, CompareFunc, Context, ContextBuilder, Driver,
    DriverError, Face, FrontFace, RecordingDriver, Rect,
};
use proptest::prelude::*;

const WIDTH: i32 = 800;
const HEIGHT: i32 = 600;

fn driver() -> RecordingDriver {
    RecordingDriver::new().with_framebuffer_size(WIDTH, HEIGHT)
}

fn context() -> Context<RecordingDriver> {
    let mut context = ContextBuilder::new(driver())
        .with_framebuffer_size(WIDTH, HEIGHT)
        .build();
    context.driver_mut().clear_calls();
    context
}

#[test]
fn initial_rectangles_cover_the_framebuffer() {
    let mut context = context();
    assert_eq!(context.viewport(), Rect::sized(WIDTH, HEIGHT));
    assert_eq!(context.scissor(), context.driver().current_scissor());
    context.set_viewport(Rect::sized(WIDTH, HEIGHT));
    context.set_scissor(Rect::sized(WIDTH, HEIGHT));
    assert!(context.driver().calls().is_empty());
}

#[test]
fn without_a_size_the_rectangles_start_empty() {
    let context = Context::new(RecordingDriver::new(), Default::default());
    assert_eq!(context.viewport(), Rect::default());
    assert_eq!(context.driver().current_viewport(), Rect::default());
}

#[test]
fn every_setting_issues_once() {
    let mut context = context();
    for _ in 0..3 {
        context.enable(Capability::DepthTest);
        context.set_viewport(Rect::new(10, 10, 100, 100));
        context.set_scissor(Rect::new(0, 0, 50, 50));
        context.set_clear_color([0.1, 0.2, 0.3, 1.0]);
        context.set_clear_depth(0.5);
        context.set_clear_stencil(7);
        context.set_depth_func(CompareFunc::LessEqual);
        context.set_depth_mask(false);
        context.set_cull_face(Face::Front);
        context.set_front_face(FrontFace::Cw);
        context.set_blend_func(BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha));
    }
    assert_eq!(context.driver().calls().len(), 11);
    assert!(context.driver().calls().iter().all(Call::is_render_state));
    assert_eq!(context.driver().current_depth_func(), gl::LEQUAL);
    assert_eq!(
        context.driver().current_blend_func(),
        (gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA)
    );
}

#[test]
fn default_values_are_elided() {
    let mut context = context();
    context.enable(Capability::Dither);
    context.enable(Capability::Multisample);
    context.disable(Capability::Blend);
    context.set_clear_color([0.0; 4]);
    context.set_clear_depth(1.0);
    context.set_clear_stencil(0);
    context.set_depth_func(CompareFunc::Less);
    context.set_depth_mask(true);
    context.set_cull_face(Face::Back);
    context.set_front_face(FrontFace::Ccw);
    context.set_blend_func(BlendFunc::REPLACE);
    assert!(context.driver().calls().is_empty());
}

#[test]
fn scissor_test_and_box_are_separate_state() {
    let mut context = context();
    context.set_scissor(Rect::new(4, 4, 8, 8));
    context.enable(Capability::ScissorTest);
    context.disable(Capability::ScissorTest);
    assert_eq!(context.scissor(), Rect::new(4, 4, 8, 8));
    assert_eq!(
        context.driver().calls(),
        &[
            Call::Scissor(Rect::new(4, 4, 8, 8)),
            Call::Enable(gl::SCISSOR_TEST),
            Call::Disable(gl::SCISSOR_TEST),
        ]
    );
}

#[test]
fn invalid_scissor_reaches_the_error_flag() {
    let mut context = context();
    context.set_scissor(Rect::new(0, 0, 4, -4));
    context.set_scissor(Rect::new(0, 0, 4, -4));
    assert_eq!(context.scissor(), Rect::sized(WIDTH, HEIGHT));
    assert_eq!(context.driver().calls().len(), 2);
    assert_eq!(context.clear_errors(), 2);
    assert_eq!(context.get_error(), None::<DriverError>);
}

#[test]
fn capabilities_do_not_disturb_bindings() {
    let mut context = context();
    context.bind_program(3);
    context.enable(Capability::Blend);
    context.bind_program(3);
    assert_eq!(context.driver().count(|c| c.is_binding()), 1);
    assert_eq!(context.driver().count(|c| c.is_render_state()), 1);
}

// Elision against a reference that issues every call.

#[derive(Debug, Clone)]
enum Op {
    Capability(Capability, bool),
    Viewport(Rect),
    Scissor(Rect),
    ClearColor([f32; 4]),
    ClearDepth(f64),
    ClearStencil(i32),
    DepthFunc(CompareFunc),
    DepthMask(bool),
    CullFace(Face),
    FrontFace(FrontFace),
    BlendFunc(BlendFunc),
}

fn rect(min_size: i32) -> impl Strategy<Value = Rect> {
    (0i32..2, 0i32..2, min_size..3, min_size..3).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn op_with(min_size: i32) -> impl Strategy<Value = Op> {
    let capability = prop::sample::select(Capability::ALL.to_vec());
    let channel = prop::sample::select(vec![0.0f32, 0.5, 1.0]);
    let factor = prop::sample::select(BlendFactor::ALL.to_vec());
    prop_oneof![
        (capability, any::<bool>()).prop_map(|(c, e)| Op::Capability(c, e)),
        rect(min_size).prop_map(Op::Viewport),
        rect(min_size).prop_map(Op::Scissor),
        prop::array::uniform4(channel).prop_map(Op::ClearColor),
        prop::sample::select(vec![-1.0f64, 0.0, 0.5, 1.0, 2.0]).prop_map(Op::ClearDepth),
        (-1i32..2).prop_map(Op::ClearStencil),
        prop::sample::select(CompareFunc::ALL.to_vec()).prop_map(Op::DepthFunc),
        any::<bool>().prop_map(Op::DepthMask),
        prop::sample::select(Face::ALL.to_vec()).prop_map(Op::CullFace),
        prop::sample::select(vec![FrontFace::Cw, FrontFace::Ccw]).prop_map(Op::FrontFace),
        (factor.clone(), factor).prop_map(|(s, d)| Op::BlendFunc(BlendFunc::new(s, d))),
    ]
}

fn apply(context: &mut Context<RecordingDriver>, op: &Op) {
    match *op {
        Op::Capability(c, e) => context.set_capability(c, e),
        Op::Viewport(r) => context.set_viewport(r),
        Op::Scissor(r) => context.set_scissor(r),
        Op::ClearColor(c) => context.set_clear_color(c),
        Op::ClearDepth(d) => context.set_clear_depth(d),
        Op::ClearStencil(s) => context.set_clear_stencil(s),
        Op::DepthFunc(f) => context.set_depth_func(f),
        Op::DepthMask(m) => context.set_depth_mask(m),
        Op::CullFace(f) => context.set_cull_face(f),
        Op::FrontFace(w) => context.set_front_face(w),
        Op::BlendFunc(f) => context.set_blend_func(f),
    }
}

/// Issues `op` with no elision at all.
fn apply_unconditionally(driver: &mut RecordingDriver, op: &Op) {
    match *op {
        Op::Capability(c, true) => driver.enable(c.raw()),
        Op::Capability(c, false) => driver.disable(c.raw()),
        Op::Viewport(r) => driver.viewport(r.x, r.y, r.width, r.height),
        Op::Scissor(r) => driver.scissor(r.x, r.y, r.width, r.height),
        Op::ClearColor([r, g, b, a]) => driver.clear_color(r, g, b, a),
        Op::ClearDepth(d) => driver.clear_depth(d),
        Op::ClearStencil(s) => driver.clear_stencil(s),
        Op::DepthFunc(f) => driver.depth_func(f.raw()),
        Op::DepthMask(m) => driver.depth_mask(m),
        Op::CullFace(f) => driver.cull_face(f.raw()),
        Op::FrontFace(w) => driver.front_face(w.raw()),
        Op::BlendFunc(f) => driver.blend_func(f.src.raw(), f.dst.raw()),
    }
}

#[derive(Debug, PartialEq)]
struct Snapshot {
    enabled: Vec<bool>,
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

fn snapshot_of(driver: &RecordingDriver) -> Snapshot {
    Snapshot {
        enabled: Capability::ALL.iter().map(|&c| driver.is_enabled(c)).collect(),
        viewport: driver.current_viewport(),
        scissor: driver.current_scissor(),
        clear_color: driver.current_clear_color(),
        clear_depth: driver.current_clear_depth(),
        clear_stencil: driver.current_clear_stencil(),
        depth_func: driver.current_depth_func(),
        depth_mask: driver.current_depth_mask(),
        cull_face: driver.current_cull_face(),
        front_face: driver.current_front_face(),
        blend_func: driver.current_blend_func(),
    }
}

fn shadow_snapshot(context: &Context<RecordingDriver>) -> Snapshot {
    let blend = context.blend_func();
    Snapshot {
        enabled: Capability::ALL.iter().map(|&c| context.is_enabled(c)).collect(),
        viewport: context.viewport(),
        scissor: context.scissor(),
        clear_color: context.clear_color(),
        clear_depth: context.clear_depth(),
        clear_stencil: context.clear_stencil(),
        depth_func: context.depth_func().raw(),
        depth_mask: context.depth_mask(),
        cull_face: context.cull_face().raw(),
        front_face: context.front_face().raw(),
        blend_func: (blend.src.raw(), blend.dst.raw()),
    }
}

proptest! {
    #[test]
    fn elision_matches_unconditional_reference(ops in prop::collection::vec(op_with(-1), 0..64)) {
        let mut context = context();
        let mut reference = driver();
        for op in &ops {
            apply(&mut context, op);
            apply_unconditionally(&mut reference, op);
        }
        let shadow = shadow_snapshot(&context);
        prop_assert_eq!(&shadow, &snapshot_of(context.driver()));
        prop_assert_eq!(&shadow, &snapshot_of(&reference));
        prop_assert!(context.driver().calls().len() <= reference.calls().len());
        //both rejected the same invalid rectangles
        prop_assert_eq!(context.clear_errors(), {
            let mut n = 0;
            while reference.get_error() != gl::NO_ERROR {
                n += 1;
            }
            n
        });
    }

    #[test]
    fn repeating_any_valid_setting_issues_nothing(op in op_with(0)) {
        let mut context = context();
        apply(&mut context, &op);
        let before = context.driver().calls().len();
        apply(&mut context, &op);
        prop_assert_eq!(context.driver().calls().len(), before);
    }
}
