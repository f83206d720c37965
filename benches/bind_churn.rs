// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//
// Measures how many driver calls the shadow removes from a typical per-draw binding
// pattern, and what the comparisons cost.

use bindshadow::sys::gl;
use bindshadow::{BufferTarget, Context, FrameTarget, GlVersion, IndexedBufferTarget, RecordingDriver, TextureTarget};
use std::time::Instant;

const DRAWS: u32 = 100_000;

fn one_draw(context: &mut Context<RecordingDriver>, draw: u32) {
    //a handful of materials share most state
    let material = draw % 4;
    context.bind_framebuffer(FrameTarget::Framebuffer, 1);
    context.bind_program(10 + material % 2);
    context.bind_vertex_array(20);
    context.bind_buffer(BufferTarget::ElementArray, 30);
    context.bind_buffer_base(IndexedBufferTarget::Uniform, 0, 40);
    context.bind_buffer_range(IndexedBufferTarget::Uniform, 1, 41, (material * 256) as isize, 256);
    context.bind_texture(0, TextureTarget::Texture2D, 50 + material);
    context.bind_texture(1, TextureTarget::Texture2D, 60);
    context.bind_texture(2, TextureTarget::CubeMap, 70);
}

fn main() {
    let driver = RecordingDriver::new().with_limit(gl::MAX_TEXTURE_IMAGE_UNITS, 16);
    let mut context = Context::new(driver, GlVersion::default());
    context.driver_mut().clear_calls();

    let start = Instant::now();
    for draw in 0..DRAWS {
        one_draw(&mut context, draw);
        if draw % 1024 == 0 {
            context.driver_mut().clear_calls();
        }
    }
    let elapsed = start.elapsed();

    context.driver_mut().clear_calls();
    for draw in 0..64 {
        one_draw(&mut context, draw);
    }
    let issued = context.driver().calls().len();
    let requested = 64 * 9;
    logwise::info_sync!(
        "bind_churn: {draws} draws in {elapsed}, {issued} of {requested} binds issued",
        draws = DRAWS,
        elapsed = logwise::privacy::LogIt(&elapsed),
        issued = issued,
        requested = requested
    );
    println!(
        "bind_churn: {:?} per draw, {issued}/{requested} binds issued",
        elapsed / DRAWS
    );
}
