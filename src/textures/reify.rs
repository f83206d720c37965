// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Reification: typed handles from bare ids.

When all you have is an id, a target and an internal format (a foreign texture, an
attachment found by enumeration) [`reify`] builds the matching typed handle:

1. A compressed format selects [`kinds::Compressed1D`], [`kinds::Compressed2D`] or
   [`kinds::Compressed3D`] by the target's dimensionality.
2. Any other format selects the variant for the target.
3. Anything left over becomes a [`TexturePasser`], which can still be bound.

Reification never fails.  Unknown targets degrade to a pass-through handle.

```
use bindshadow::{reify, AnyTexture, TextureTarget};
use bindshadow::pixel_formats::TextureFormat;

let texture = reify(TextureTarget::Texture2D, 3, TextureFormat::CompressedRgbaS3tcDxt1, None);
assert!(matches!(texture, AnyTexture::Compressed2D(_)));
assert!(!texture.capabilities().pixel_upload);
```
*/

use crate::context::Context;
use crate::error::{Error, Result};
use crate::imp::Driver;
use crate::pixel_formats::{CPixel, TextureData, TextureFormat};
use crate::sys::gl;
use crate::targets::TextureTarget;
use crate::texel_buffer::TexelBuffer;
use crate::textures::kinds::{self, TextureKind};
use crate::textures::{Capabilities, Extent3D, Texture, TextureInfo, image_query_target};
use logwise::privacy::LogIt;

/// A texture handle whose kind is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyTexture {
    Texture1D(Texture<kinds::Texture1D>),
    Texture1DArray(Texture<kinds::Texture1DArray>),
    Texture2D(Texture<kinds::Texture2D>),
    Texture2DArray(Texture<kinds::Texture2DArray>),
    Texture3D(Texture<kinds::Texture3D>),
    Multisample2D(Texture<kinds::Multisample2D>),
    Multisample2DArray(Texture<kinds::Multisample2DArray>),
    CubeMap(Texture<kinds::CubeMap>),
    CubeMapArray(Texture<kinds::CubeMapArray>),
    Rectangle(Texture<kinds::Rectangle>),
    BufferTexture(Texture<kinds::BufferTexture>),
    Compressed1D(Texture<kinds::Compressed1D>),
    Compressed2D(Texture<kinds::Compressed2D>),
    Compressed3D(Texture<kinds::Compressed3D>),
    Passer(TexturePasser),
}

/// Applies `$body` to the handle inside any typed variant, binding it to `$t`.
macro_rules! each_typed {
    ($any:expr, $t:ident => $body:expr, $passer:ident => $fallback:expr) => {
        match $any {
            AnyTexture::Texture1D($t) => $body,
            AnyTexture::Texture1DArray($t) => $body,
            AnyTexture::Texture2D($t) => $body,
            AnyTexture::Texture2DArray($t) => $body,
            AnyTexture::Texture3D($t) => $body,
            AnyTexture::Multisample2D($t) => $body,
            AnyTexture::Multisample2DArray($t) => $body,
            AnyTexture::CubeMap($t) => $body,
            AnyTexture::CubeMapArray($t) => $body,
            AnyTexture::Rectangle($t) => $body,
            AnyTexture::BufferTexture($t) => $body,
            AnyTexture::Compressed1D($t) => $body,
            AnyTexture::Compressed2D($t) => $body,
            AnyTexture::Compressed3D($t) => $body,
            AnyTexture::Passer($passer) => $fallback,
        }
    };
}

impl AnyTexture {
    pub fn info(&self) -> &TextureInfo {
        each_typed!(self, t => t.info(), p => &p.info)
    }
    pub fn id(&self) -> u32 {
        self.info().id
    }
    pub fn target(&self) -> TextureTarget {
        self.info().target
    }
    pub fn format(&self) -> TextureFormat {
        self.info().format
    }
    pub fn data_type(&self) -> Option<TextureData> {
        self.info().data_type
    }

    /// Whether this handle's storage is block-compressed.
    ///
    /// A pass-through handle reports what its format says.
    pub fn is_compressed(&self) -> bool {
        each_typed!(self, t => t.is_compressed(), p => p.info.format.is_compressed())
    }

    pub fn capabilities(&self) -> Capabilities {
        each_typed!(self, t => t.capabilities(), _p => Capabilities::NONE)
    }

    pub fn is_passer(&self) -> bool {
        matches!(self, AnyTexture::Passer(_))
    }

    /// The typed handle, if this is a texture of kind `K`.
    ///
    /// ```
    /// use bindshadow::{reify, TextureTarget};
    /// use bindshadow::textures::kinds;
    /// use bindshadow::pixel_formats::TextureFormat;
    ///
    /// let any = reify(TextureTarget::Rectangle, 2, TextureFormat::Rgba8, None);
    /// assert!(any.downcast::<kinds::Rectangle>().is_some());
    /// assert!(any.downcast::<kinds::Texture2D>().is_none());
    /// ```
    pub fn downcast<K: TextureKind>(&self) -> Option<&Texture<K>> {
        K::downcast(self)
    }

    pub fn bind<D: Driver>(&self, context: &mut Context<D>, unit: u32) {
        context.bind_texture(unit, self.target(), self.id());
    }

    pub fn unbind<D: Driver>(&self, context: &mut Context<D>, unit: u32) {
        context.unbind_texture_at(unit, self.target());
    }

    /// Uploads pixel data if this handle supports it.
    ///
    /// # Errors
    /// [`Error::Unsupported`] for compressed, multisample, buffer and pass-through
    /// handles, or when the buffer's shape doesn't fit the target.
    pub fn upload<T: CPixel, D: Driver>(
        &self,
        context: &mut Context<D>,
        unit: u32,
        level: i32,
        pixels: &TexelBuffer<T>,
    ) -> Result<()> {
        match self {
            AnyTexture::Texture1D(t) => t.upload(context, unit, level, pixels),
            AnyTexture::Texture1DArray(t) => t.upload(context, unit, level, pixels),
            AnyTexture::Texture2D(t) => t.upload(context, unit, level, pixels),
            AnyTexture::Texture2DArray(t) => t.upload(context, unit, level, pixels),
            AnyTexture::Texture3D(t) => t.upload(context, unit, level, pixels),
            AnyTexture::CubeMap(t) => t.upload(context, unit, level, pixels),
            AnyTexture::CubeMapArray(t) => t.upload(context, unit, level, pixels),
            AnyTexture::Rectangle(t) => t.upload(context, unit, level, pixels),
            other => Err(Error::Unsupported {
                operation: "pixel upload",
                target: other.target(),
            }),
        }
    }

    /// Uploads block-compressed data if this handle supports it.
    pub fn upload_compressed<D: Driver>(
        &self,
        context: &mut Context<D>,
        unit: u32,
        level: i32,
        extent: Extent3D,
        data: &[u8],
    ) -> Result<()> {
        match self {
            AnyTexture::Compressed1D(t) => t.upload_compressed(context, unit, level, extent, data),
            AnyTexture::Compressed2D(t) => t.upload_compressed(context, unit, level, extent, data),
            AnyTexture::Compressed3D(t) => t.upload_compressed(context, unit, level, extent, data),
            other => Err(Error::Unsupported {
                operation: "compressed upload",
                target: other.target(),
            }),
        }
    }
}

impl<K: TextureKind> From<Texture<K>> for AnyTexture {
    fn from(value: Texture<K>) -> Self {
        value.into_any()
    }
}

/// A minimal handle: id, target and format, and nothing but binding.
///
/// Used for targets with no specialized support, and to hand a texture to code
/// that will decide its kind later with [`TexturePasser::pass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TexturePasser {
    info: TextureInfo,
}

impl TexturePasser {
    pub fn new(target: TextureTarget, id: u32, format: TextureFormat, data_type: Option<TextureData>) -> Self {
        TexturePasser {
            info: TextureInfo {
                target,
                id,
                format,
                data_type,
            },
        }
    }

    pub fn info(&self) -> &TextureInfo {
        &self.info
    }

    pub fn bind<D: Driver>(&self, context: &mut Context<D>, unit: u32) {
        context.bind_texture(unit, self.info.target, self.info.id);
    }

    pub fn unbind<D: Driver>(&self, context: &mut Context<D>, unit: u32) {
        context.unbind_texture_at(unit, self.info.target);
    }

    /// Builds the most specific handle for this texture.
    pub fn pass(&self) -> AnyTexture {
        reify(
            self.info.target,
            self.info.id,
            self.info.format,
            self.info.data_type,
        )
    }
}

impl<K: TextureKind> From<Texture<K>> for TexturePasser {
    fn from(value: Texture<K>) -> Self {
        TexturePasser { info: *value.info() }
    }
}

fn typed<K: TextureKind>(info: TextureInfo) -> AnyTexture {
    Texture::<K>::with_target(info.target, info.id, info.format, info.data_type)
        .map(K::upcast)
        //the dispatch below only picks kinds that accept the target
        .unwrap_or(AnyTexture::Passer(TexturePasser { info }))
}

/// Builds a typed handle from an id, its target and its internal format.
pub fn reify(
    target: TextureTarget,
    id: u32,
    format: TextureFormat,
    data_type: Option<TextureData>,
) -> AnyTexture {
    let target = target.canonical();
    let info = TextureInfo {
        target,
        id,
        format,
        data_type,
    };
    if format.is_compressed() {
        return if target.is_1d() {
            typed::<kinds::Compressed1D>(info)
        } else if target.is_2d() {
            typed::<kinds::Compressed2D>(info)
        } else if target.is_3d() {
            typed::<kinds::Compressed3D>(info)
        } else {
            logwise::warn_sync!(
                "compressed format {format} on {target} has no typed handle",
                format = LogIt(&format),
                target = LogIt(&target)
            );
            AnyTexture::Passer(TexturePasser { info })
        };
    }
    match target {
        TextureTarget::Texture1D => typed::<kinds::Texture1D>(info),
        TextureTarget::Texture1DArray => typed::<kinds::Texture1DArray>(info),
        TextureTarget::Texture2D => typed::<kinds::Texture2D>(info),
        TextureTarget::Texture2DArray => typed::<kinds::Texture2DArray>(info),
        TextureTarget::Texture3D => typed::<kinds::Texture3D>(info),
        TextureTarget::Multisample2D => typed::<kinds::Multisample2D>(info),
        TextureTarget::Multisample2DArray => typed::<kinds::Multisample2DArray>(info),
        TextureTarget::CubeMap => typed::<kinds::CubeMap>(info),
        TextureTarget::CubeMapArray => typed::<kinds::CubeMapArray>(info),
        TextureTarget::Rectangle => typed::<kinds::Rectangle>(info),
        TextureTarget::Buffer => typed::<kinds::BufferTexture>(info),
        TextureTarget::Other(_) => {
            logwise::warn_sync!(
                "target {target} has no typed handle",
                target = LogIt(&target)
            );
            AnyTexture::Passer(TexturePasser { info })
        }
    }
}

/// Size of mip `level` of a texture whose `base_level` image is `base`.
///
/// Arrays and cube maps keep their layer count, 3D textures halve every axis, and
/// 1D and buffer textures are one texel tall and deep.  Levels below the base level,
/// levels that shrink an axis to nothing, and unknown targets give
/// [`Extent3D::ZERO`].
///
/// ```
/// use bindshadow::{mip_size, TextureTarget};
/// use bindshadow::textures::Extent3D;
///
/// let base = Extent3D::new(64, 32, 6);
/// assert_eq!(mip_size(TextureTarget::CubeMap, base, 0, 2), Extent3D::new(16, 8, 6));
/// assert_eq!(mip_size(TextureTarget::Texture2D, base, 0, 6), Extent3D::ZERO);
/// ```
pub fn mip_size(target: TextureTarget, base: Extent3D, base_level: u32, level: u32) -> Extent3D {
    let Some(steps) = level.checked_sub(base_level) else {
        return Extent3D::ZERO;
    };
    let shrink = |v: u32| v.checked_shr(steps).unwrap_or(0);
    let size = match target.canonical() {
        TextureTarget::Texture1D | TextureTarget::Buffer => Extent3D::new(shrink(base.width), 1, 1),
        TextureTarget::Texture1DArray => Extent3D::new(shrink(base.width), base.height, 1),
        TextureTarget::Texture2D | TextureTarget::Multisample2D | TextureTarget::Rectangle => {
            Extent3D::new(shrink(base.width), shrink(base.height), 1)
        }
        TextureTarget::CubeMap
        | TextureTarget::CubeMapArray
        | TextureTarget::Multisample2DArray
        | TextureTarget::Texture2DArray => {
            Extent3D::new(shrink(base.width), shrink(base.height), base.depth)
        }
        TextureTarget::Texture3D => {
            Extent3D::new(shrink(base.width), shrink(base.height), shrink(base.depth))
        }
        TextureTarget::Other(_) => return Extent3D::ZERO,
    };
    if size.width < 1 || size.height < 1 || size.depth < 1 {
        return Extent3D::ZERO;
    }
    size
}

impl<D: Driver> Context<D> {
    /// Reifies texture `id`, reading its internal format from the driver.
    ///
    /// The texture is bound to `unit` (through the cache) to query it and stays
    /// bound.  The data type is left undeclared.
    pub fn discover_texture(&mut self, unit: u32, target: TextureTarget, id: u32) -> AnyTexture {
        self.use_texture(unit, target, id);
        let raw = self.driver_mut().tex_level_parameter(
            image_query_target(target),
            0,
            gl::TEXTURE_INTERNAL_FORMAT,
        );
        let format = TextureFormat::from_raw(raw as u32);
        logwise::trace_sync!(
            "discovered texture {id} with format {format}",
            id = id,
            format = LogIt(&format)
        );
        reify(target, id, format, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_target_gets_a_typed_uncompressed_handle() {
        for target in TextureTarget::KNOWN {
            let any = reify(target, 1, TextureFormat::Rgba8, Some(TextureData::UnsignedByte));
            assert!(!any.is_passer(), "{target:?}");
            assert_eq!(any.target(), target);
            assert!(!any.is_compressed());
            assert_eq!(any.data_type(), Some(TextureData::UnsignedByte));
        }
    }

    #[test]
    fn cube_map_array_keeps_its_own_variant() {
        let any = reify(TextureTarget::CubeMapArray, 1, TextureFormat::Rgba8, None);
        assert!(matches!(any, AnyTexture::CubeMapArray(_)));
    }

    #[test]
    fn compressed_dispatch_follows_dimensionality() {
        let f = TextureFormat::CompressedRgRgtc2;
        assert!(matches!(reify(TextureTarget::Texture1D, 1, f, None), AnyTexture::Compressed1D(_)));
        assert!(matches!(reify(TextureTarget::CubeMap, 1, f, None), AnyTexture::Compressed2D(_)));
        assert!(matches!(
            reify(TextureTarget::Texture2DArray, 1, f, None),
            AnyTexture::Compressed3D(_)
        ));
        let ms = reify(TextureTarget::Multisample2D, 1, f, None);
        assert!(ms.is_passer());
        assert!(ms.is_compressed());
    }

    #[test]
    fn unknown_target_degrades_to_passer() {
        let any = reify(TextureTarget::Other(0x8D65), 4, TextureFormat::Rgba8, None);
        assert!(any.is_passer());
        assert_eq!(any.id(), 4);
        assert_eq!(any.capabilities(), Capabilities::NONE);
    }

    #[test]
    fn passer_round_trips_to_the_typed_handle() {
        let typed = Texture::<kinds::Texture2DArray>::new(6, TextureFormat::R32F, None);
        let passer = TexturePasser::from(typed);
        assert_eq!(passer.pass(), AnyTexture::Texture2DArray(typed));
    }

    #[test]
    fn mip_sizes_per_target() {
        let base = Extent3D::new(16, 8, 4);
        assert_eq!(mip_size(TextureTarget::Texture3D, base, 0, 1), Extent3D::new(8, 4, 2));
        assert_eq!(mip_size(TextureTarget::Texture3D, base, 0, 3), Extent3D::ZERO);
        assert_eq!(mip_size(TextureTarget::Texture1DArray, base, 0, 2), Extent3D::new(4, 8, 1));
        assert_eq!(mip_size(TextureTarget::Buffer, base, 0, 0), Extent3D::new(16, 1, 1));
        assert_eq!(mip_size(TextureTarget::Texture2D, base, 2, 3), Extent3D::new(8, 4, 1));
        assert_eq!(mip_size(TextureTarget::Texture2D, base, 2, 1), Extent3D::ZERO);
        assert_eq!(mip_size(TextureTarget::Other(1), base, 0, 0), Extent3D::ZERO);
        assert_eq!(mip_size(TextureTarget::Texture2D, base, 0, 40), Extent3D::ZERO);
    }
}
