// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! bindshadow is a shadow binding-state cache and typed texture layer for stateful,
handle-based graphics drivers (OpenGL and friends).

Binding calls are expensive to issue redundantly, and asking the driver what is
currently bound costs a round trip.  bindshadow keeps a local mirror of every
binding point and only lets a bind through when the mirror would change.

| Piece                 | Type                           | Job                                                   |
|-----------------------|--------------------------------|-------------------------------------------------------|
| Shadow binding cache  | [`Context`]                    | Mirror texture units, buffers, framebuffers, program |
| Render state          | [`state::Capability`], [`state::Rect`] | Elide capability toggles, viewport, clear values |
| Native boundary       | [`Driver`]                     | Forward to the real driver                            |
| Typed handles         | [`textures::Texture`]          | Capability-correct operations per texture kind        |
| Reification           | [`reify`], [`AnyTexture`]      | Typed handles from bare ids                           |
| Packed texel buffer   | [`TexelBuffer`]                | Texel data in the driver's bottom-up layout           |

# Example

```
use bindshadow::{Call, Context, GlVersion, RecordingDriver, TextureTarget};
use bindshadow::sys::gl;

let driver = RecordingDriver::new().with_limit(gl::MAX_TEXTURE_IMAGE_UNITS, 4);
let mut context = Context::new(driver, GlVersion::new(4, 6));
context.driver_mut().clear_calls();

context.bind_texture(2, TextureTarget::Texture2D, 7);
context.bind_texture(2, TextureTarget::Texture2D, 7);
context.bind_texture(2, TextureTarget::Texture2D, 9);

let binds = context.driver().count(|c| matches!(c, Call::BindTexture { .. }));
assert_eq!(binds, 2);
assert_eq!(context.bound_texture(2, TextureTarget::Texture2D), 9);
```

# Backends

[`RecordingDriver`] is always available.  It simulates binding state, records every
call, and is what the tests run against.  With the `backend_glow` feature,
`GlowDriver` forwards to a native context through [glow](https://docs.rs/glow).

# Threading

A [`Context`] belongs to one thread at a time.  See [`Context::thread_change`] and
[`ActionQueue`].
*/

mod bindings;
pub mod context;
pub mod error;
mod imp;
pub mod limits;
pub mod pixel_formats;
pub mod state;
pub mod sys;
pub mod targets;
pub mod texel_buffer;
pub mod textures;

pub use bindings::IndexedBinding;
pub use context::{ActionQueue, Context, ContextBuilder};
pub use error::{DriverError, Error, Result, TexelBufferError};
#[cfg(all(feature = "backend_glow", not(target_arch = "wasm32")))]
pub use imp::GlowDriver;
pub use imp::{Call, Driver, ImageRegion, RecordingDriver};
pub use limits::{GlVersion, Limits};
pub use state::{BlendFactor, BlendFunc, Capability, CompareFunc, Face, FrontFace, Rect};
pub use targets::{BufferTarget, FrameTarget, IndexedBufferTarget, Target, TextureTarget};
pub use texel_buffer::{Texel, TexelBuffer};
pub use textures::reify::{AnyTexture, TexturePasser, mip_size, reify};
