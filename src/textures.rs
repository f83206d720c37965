// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Typed texture handles.

Every handle is the same record, a [`TextureInfo`], tagged with a kind from
[`kinds`].  The kind decides which operations are available:

```
use bindshadow::textures::{kinds, Texture};
use bindshadow::pixel_formats::{TextureFormat, Unorm4};
use bindshadow::{Context, GlVersion, RecordingDriver, TexelBuffer};

let mut context = Context::new(RecordingDriver::new(), GlVersion::default());
let texture = Texture::<kinds::Texture2D>::new(1, TextureFormat::Rgba8, None);
let pixels = TexelBuffer::<Unorm4>::new_2d(4, 4).unwrap();
texture.upload(&mut context, 0, 0, &pixels).unwrap();
```

A compressed texture has no `upload`; this does not compile:

```compile_fail
use bindshadow::textures::{kinds, Texture};
use bindshadow::pixel_formats::{TextureFormat, Unorm4};
use bindshadow::{Context, GlVersion, RecordingDriver, TexelBuffer};

let mut context = Context::new(RecordingDriver::new(), GlVersion::default());
let texture = Texture::<kinds::Compressed2D>::new(1, TextureFormat::CompressedRgbaS3tcDxt5, None);
let pixels = TexelBuffer::<Unorm4>::new_2d(4, 4).unwrap();
texture.upload(&mut context, 0, 0, &pixels).unwrap();
```

Handles don't own the driver object and do no reference counting.  Binding a
handle goes through the same [`Context`] cache as binding a bare id.
*/

pub mod kinds;
pub mod reify;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::imp::{Driver, ImageRegion};
use crate::pixel_formats::{CPixel, TextureData, TextureFormat};
use crate::sys::gl;
use crate::targets::TextureTarget;
use crate::texel_buffer::TexelBuffer;
use kinds::{CompressedUpload, MultisampleStorage, PixelUpload, TextureKind};
use std::marker::PhantomData;
use std::ops::Range;

/// The operation families a handle exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities {
    pub pixel_upload: bool,
    pub compressed_upload: bool,
    pub multisample_storage: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        pixel_upload: false,
        compressed_upload: false,
        multisample_storage: false,
    };
}

/// Width, height and depth of one texture image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent3D {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent3D {
    pub const ZERO: Extent3D = Extent3D {
        width: 0,
        height: 0,
        depth: 0,
    };

    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Extent3D {
            width,
            height,
            depth,
        }
    }
}

/// What every handle knows about its texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureInfo {
    pub target: TextureTarget,
    pub id: u32,
    pub format: TextureFormat,
    /// Client data type the texture was declared with, if any.
    pub data_type: Option<TextureData>,
}

/// A texture handle of kind `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture<K: TextureKind> {
    info: TextureInfo,
    kind: PhantomData<K>,
}

/// One driver image of a texture, and which layers of the client data feed it.
struct Image {
    region: ImageRegion,
    layers: Range<usize>,
}

fn dimension(value: usize, target: TextureTarget) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::Unsupported {
        operation: "image dimension beyond i32",
        target,
    })
}

impl<K: TextureKind> Texture<K> {
    /// A handle for texture `id` on the kind's default target.
    pub fn new(id: u32, format: TextureFormat, data_type: Option<TextureData>) -> Self {
        Texture {
            info: TextureInfo {
                target: K::DEFAULT_TARGET,
                id,
                format,
                data_type,
            },
            kind: PhantomData,
        }
    }

    /// A handle for texture `id` on `target`.  A raw spelling of a known target is
    /// stored as the named target.
    ///
    /// # Errors
    /// Fails if the kind can't live on `target`.
    pub fn with_target(
        target: TextureTarget,
        id: u32,
        format: TextureFormat,
        data_type: Option<TextureData>,
    ) -> Result<Self> {
        let target = target.canonical();
        if !K::accepts(target) {
            return Err(Error::Unsupported {
                operation: std::any::type_name::<K>(),
                target,
            });
        }
        Ok(Texture {
            info: TextureInfo {
                target,
                id,
                format,
                data_type,
            },
            kind: PhantomData,
        })
    }

    pub fn info(&self) -> &TextureInfo {
        &self.info
    }
    pub fn id(&self) -> u32 {
        self.info.id
    }
    pub fn target(&self) -> TextureTarget {
        self.info.target
    }
    pub fn format(&self) -> TextureFormat {
        self.info.format
    }
    pub fn data_type(&self) -> Option<TextureData> {
        self.info.data_type
    }
    pub fn is_compressed(&self) -> bool {
        K::COMPRESSED
    }
    pub fn capabilities(&self) -> Capabilities {
        K::CAPABILITIES
    }

    /// Binds this texture to `unit`.
    pub fn bind<D: Driver>(&self, context: &mut Context<D>, unit: u32) {
        context.bind_texture(unit, self.info.target, self.info.id);
    }

    /// Unbinds this texture's target on `unit`, whatever is bound there.
    pub fn unbind<D: Driver>(&self, context: &mut Context<D>, unit: u32) {
        context.unbind_texture_at(unit, self.info.target);
    }

    /// Whether the shadow has this texture bound on `unit`.
    pub fn is_bound<D: Driver>(&self, context: &Context<D>, unit: u32) -> bool {
        context.bound_texture(unit, self.info.target) == self.info.id
    }

    /// Size of mip `level` as reported by the driver.  Binds the texture to `unit`.
    pub fn extent<D: Driver>(&self, context: &mut Context<D>, unit: u32, level: i32) -> Extent3D {
        context.use_texture(unit, self.info.target, self.info.id);
        let query = image_query_target(self.info.target);
        let driver = context.driver_mut();
        let mut get = |pname| driver.tex_level_parameter(query, level, pname).max(0) as u32;
        Extent3D {
            width: get(gl::TEXTURE_WIDTH),
            height: get(gl::TEXTURE_HEIGHT),
            depth: get(gl::TEXTURE_DEPTH),
        }
    }

    /// Forgets the kind.
    pub fn into_any(self) -> reify::AnyTexture {
        K::upcast(self)
    }

    /// Splits client data of the given shape into the driver images it defines.
    fn images(&self, level: i32, width: usize, height: usize, depth: usize) -> Result<Vec<Image>> {
        let target = self.info.target;
        let w = dimension(width, target)?;
        let h = dimension(height, target)?;
        let d = dimension(depth, target)?;
        let whole = |region_h: i32, region_d: i32| {
            vec![Image {
                region: ImageRegion {
                    target: target.raw(),
                    level,
                    width: w,
                    height: region_h,
                    depth: region_d,
                },
                layers: 0..depth,
            }]
        };
        match target {
            TextureTarget::Texture1D if height == 1 && depth == 1 => Ok(whole(1, 1)),
            TextureTarget::Texture1D => Err(Error::Unsupported {
                operation: "1D image from multi-row data",
                target,
            }),
            TextureTarget::CubeMap if depth == 6 => Ok((0..6)
                .map(|face| Image {
                    region: ImageRegion {
                        target: gl::TEXTURE_CUBE_MAP_POSITIVE_X + face as u32,
                        level,
                        width: w,
                        height: h,
                        depth: 1,
                    },
                    layers: face..face + 1,
                })
                .collect()),
            TextureTarget::CubeMap => Err(Error::Unsupported {
                operation: "cube map image without six faces",
                target,
            }),
            TextureTarget::CubeMapArray if depth % 6 != 0 => Err(Error::Unsupported {
                operation: "cube map array image with partial cubes",
                target,
            }),
            t if t.is_2d() && depth == 1 => Ok(whole(h, 1)),
            t if t.is_2d() => Err(Error::Unsupported {
                operation: "2D image from layered data",
                target,
            }),
            _ => Ok(whole(h, d)),
        }
    }
}

/// The target whose level parameters describe `target`'s images.
pub(crate) fn image_query_target(target: TextureTarget) -> u32 {
    match target.canonical() {
        TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP_POSITIVE_X,
        other => other.raw(),
    }
}

impl<K: PixelUpload> Texture<K> {
    /// Defines mip `level` from `pixels`.  Binds the texture to `unit`.
    ///
    /// The buffer's shape must fit the target: one row for 1D, one layer for 2D,
    /// six layers (one per face) for a cube map.
    pub fn upload<T: CPixel, D: Driver>(
        &self,
        context: &mut Context<D>,
        unit: u32,
        level: i32,
        pixels: &TexelBuffer<T>,
    ) -> Result<()> {
        let images = self.images(level, pixels.width(), pixels.height(), pixels.depth())?;
        let layout = T::layout();
        let layer_bytes = pixels.width() * pixels.height() * std::mem::size_of::<T>();
        let bytes = pixels.as_bytes();
        context.use_texture(unit, self.info.target, self.info.id);
        logwise::trace_sync!(
            "uploading {len} bytes to texture {id}",
            len = bytes.len(),
            id = self.info.id
        );
        for image in images {
            let range = image.layers.start * layer_bytes..image.layers.end * layer_bytes;
            context.driver_mut().tex_image(
                image.region,
                self.info.format.raw(),
                layout.format.raw(),
                layout.data_type.raw(),
                Some(&bytes[range]),
            );
        }
        Ok(())
    }

    /// Allocates mip `level` without defining its contents.
    pub fn allocate<D: Driver>(
        &self,
        context: &mut Context<D>,
        unit: u32,
        level: i32,
        extent: Extent3D,
    ) -> Result<()> {
        let images = self.images(
            level,
            extent.width as usize,
            extent.height as usize,
            extent.depth as usize,
        )?;
        let format = self.info.format.base_format();
        let data_type = self.info.data_type.unwrap_or(match format {
            crate::pixel_formats::BaseFormat::DepthStencil => TextureData::UnsignedInt248,
            crate::pixel_formats::BaseFormat::RedInteger => TextureData::Int,
            _ => TextureData::UnsignedByte,
        });
        context.use_texture(unit, self.info.target, self.info.id);
        for image in images {
            context.driver_mut().tex_image(
                image.region,
                self.info.format.raw(),
                format.raw(),
                data_type.raw(),
                None,
            );
        }
        Ok(())
    }

    /// Reads mip `level` into `pixels`, whose shape selects the images read.
    pub fn read<T: CPixel, D: Driver>(
        &self,
        context: &mut Context<D>,
        unit: u32,
        level: i32,
        pixels: &mut TexelBuffer<T>,
    ) -> Result<()> {
        let images = self.images(level, pixels.width(), pixels.height(), pixels.depth())?;
        let layout = T::layout();
        let layer_bytes = pixels.width() * pixels.height() * std::mem::size_of::<T>();
        context.use_texture(unit, self.info.target, self.info.id);
        let bytes = pixels.as_bytes_mut();
        for image in images {
            let range = image.layers.start * layer_bytes..image.layers.end * layer_bytes;
            context.driver_mut().get_tex_image(
                image.region.target,
                level,
                layout.format.raw(),
                layout.data_type.raw(),
                &mut bytes[range],
            );
        }
        Ok(())
    }
}

impl<K: CompressedUpload> Texture<K> {
    /// Defines mip `level` from block-compressed `data`.
    ///
    /// For a cube map `extent.depth` is 6 and `data` holds the faces back to back.
    pub fn upload_compressed<D: Driver>(
        &self,
        context: &mut Context<D>,
        unit: u32,
        level: i32,
        extent: Extent3D,
        data: &[u8],
    ) -> Result<()> {
        let images = self.images(
            level,
            extent.width as usize,
            extent.height as usize,
            extent.depth as usize,
        )?;
        let layers = extent.depth.max(1) as usize;
        if data.len() % layers != 0 {
            return Err(Error::Unsupported {
                operation: "compressed data not divisible into layers",
                target: self.info.target,
            });
        }
        let layer_bytes = data.len() / layers;
        context.use_texture(unit, self.info.target, self.info.id);
        for image in images {
            let range = image.layers.start * layer_bytes..image.layers.end * layer_bytes;
            context
                .driver_mut()
                .compressed_tex_image(image.region, self.info.format.raw(), &data[range]);
        }
        Ok(())
    }
}

impl<K: MultisampleStorage> Texture<K> {
    /// Allocates multisampled storage.  `extent.depth` is the layer count of an array.
    pub fn allocate_multisample<D: Driver>(
        &self,
        context: &mut Context<D>,
        unit: u32,
        extent: Extent3D,
        samples: u32,
        fixed_sample_locations: bool,
    ) -> Result<()> {
        let target = self.info.target;
        if target == TextureTarget::Multisample2D && extent.depth > 1 {
            return Err(Error::Unsupported {
                operation: "layered storage on a non-array target",
                target,
            });
        }
        let region = ImageRegion {
            target: target.raw(),
            level: 0,
            width: dimension(extent.width as usize, target)?,
            height: dimension(extent.height as usize, target)?,
            depth: dimension(extent.depth as usize, target)?,
        };
        let samples = dimension(samples as usize, target)?;
        context.use_texture(unit, target, self.info.id);
        context.driver_mut().tex_image_multisample(
            region,
            samples,
            self.info.format.raw(),
            fixed_sample_locations,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::{Call, RecordingDriver};
    use crate::limits::GlVersion;

    fn context() -> Context<RecordingDriver> {
        Context::new(RecordingDriver::new(), GlVersion::default())
    }

    #[test]
    fn cube_map_upload_writes_each_face() {
        let mut c = context();
        let cube = Texture::<kinds::CubeMap>::new(4, TextureFormat::R8, None);
        let pixels = TexelBuffer::new_with(1, 1, 6, |t| t.z as u8).unwrap();
        cube.upload(&mut c, 0, 0, &pixels).unwrap();
        for face in 0..6u32 {
            let target = gl::TEXTURE_CUBE_MAP_POSITIVE_X + face;
            assert_eq!(c.driver().image(4, target, 0), Some(&[face as u8][..]));
        }
    }

    #[test]
    fn cube_map_needs_six_layers() {
        let mut c = context();
        let cube = Texture::<kinds::CubeMap>::new(4, TextureFormat::R8, None);
        let pixels = TexelBuffer::<u8>::new_3d(1, 1, 5).unwrap();
        let err = cube.upload(&mut c, 0, 0, &pixels).unwrap_err();
        assert!(matches!(err, Error::Unsupported { target: TextureTarget::CubeMap, .. }));
        //validation happens before any binding
        assert!(!c.driver().calls().iter().any(|call| matches!(call, Call::BindTexture { .. })));
    }

    #[test]
    fn one_d_rejects_rows() {
        let mut c = context();
        let tex = Texture::<kinds::Texture1D>::new(2, TextureFormat::R8, None);
        let pixels = TexelBuffer::<u8>::new_2d(4, 2).unwrap();
        assert!(tex.upload(&mut c, 0, 0, &pixels).is_err());
    }

    #[test]
    fn kind_rejects_foreign_target() {
        let err = Texture::<kinds::Compressed3D>::with_target(
            TextureTarget::Texture2D,
            1,
            TextureFormat::CompressedRgbaBptcUnorm,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unsupported { target: TextureTarget::Texture2D, .. }));
    }

    #[test]
    fn extent_reads_level_parameters() {
        let mut c = context();
        c.driver_mut()
            .define_texture(9, TextureTarget::Texture3D, TextureFormat::Rgba8, 8, 4, 2);
        let tex = Texture::<kinds::Texture3D>::new(9, TextureFormat::Rgba8, None);
        assert_eq!(tex.extent(&mut c, 1, 0), Extent3D::new(8, 4, 2));
        assert!(tex.is_bound(&c, 1));
    }

    #[test]
    fn multisample_allocation_reaches_driver() {
        let mut c = context();
        let tex = Texture::<kinds::Multisample2D>::new(3, TextureFormat::Rgba8, None);
        tex.allocate_multisample(&mut c, 0, Extent3D::new(16, 16, 1), 4, true)
            .unwrap();
        assert!(c.driver().calls().iter().any(|call| matches!(
            call,
            Call::TexImageMultisample { samples: 4, fixed_sample_locations: true, .. }
        )));
    }
}
