// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Texture kinds.

A kind is a zero-sized type naming one capability variant of a texture.  It fixes
which targets a [`Texture`] may have and, through the capability traits, which
operations it exposes:

| Trait                  | Kinds                                                         |
|------------------------|---------------------------------------------------------------|
| [`PixelUpload`]        | 1D, 1D array, 2D, 2D array, 3D, cube map, cube map array, rectangle |
| [`CompressedUpload`]   | compressed 1D, 2D, 3D                                         |
| [`MultisampleStorage`] | 2D multisample, 2D multisample array                         |

Buffer textures have none of these; their storage is a buffer object.
*/

use crate::targets::TextureTarget;
use crate::textures::reify::AnyTexture;
use crate::textures::{Capabilities, Texture};
use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// A capability variant of a texture.  Sealed.
pub trait TextureKind: sealed::Sealed + Copy + Debug + Send + Sync + 'static {
    /// Target used when a texture of this kind is created without naming one.
    const DEFAULT_TARGET: TextureTarget;
    const COMPRESSED: bool;
    const CAPABILITIES: Capabilities;

    /// Whether a texture of this kind can live on `target`.
    fn accepts(target: TextureTarget) -> bool;

    #[doc(hidden)]
    fn downcast(any: &AnyTexture) -> Option<&Texture<Self>>;
    #[doc(hidden)]
    fn upcast(texture: Texture<Self>) -> AnyTexture;
}

/// Kinds that accept uncompressed pixel data from a [`crate::TexelBuffer`].
pub trait PixelUpload: TextureKind {}
/// Kinds whose storage is block-compressed.
pub trait CompressedUpload: TextureKind {}
/// Kinds whose storage is multisampled and allocated without data.
pub trait MultisampleStorage: TextureKind {}

const PIXELS: Capabilities = Capabilities {
    pixel_upload: true,
    compressed_upload: false,
    multisample_storage: false,
};
const COMPRESSED: Capabilities = Capabilities {
    pixel_upload: false,
    compressed_upload: true,
    multisample_storage: false,
};
const MULTISAMPLE: Capabilities = Capabilities {
    pixel_upload: false,
    compressed_upload: false,
    multisample_storage: true,
};

macro_rules! kind {
    ($(#[$doc:meta])* $name:ident, $target:expr, $caps:expr, compressed: $compressed:expr, accepts: $accepts:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;
        impl sealed::Sealed for $name {}
        impl TextureKind for $name {
            const DEFAULT_TARGET: TextureTarget = $target;
            const COMPRESSED: bool = $compressed;
            const CAPABILITIES: Capabilities = $caps;
            fn accepts(target: TextureTarget) -> bool {
                let accepts: fn(TextureTarget) -> bool = $accepts;
                accepts(target)
            }
            fn downcast(any: &AnyTexture) -> Option<&Texture<Self>> {
                match any {
                    AnyTexture::$name(t) => Some(t),
                    _ => None,
                }
            }
            fn upcast(texture: Texture<Self>) -> AnyTexture {
                AnyTexture::$name(texture)
            }
        }
    };
    ($(#[$doc:meta])* $name:ident, $target:expr, $caps:expr) => {
        kind!($(#[$doc])* $name, $target, $caps, compressed: false, accepts: |t| t == $target);
    };
}

kind!(Texture1D, TextureTarget::Texture1D, PIXELS);
kind!(Texture1DArray, TextureTarget::Texture1DArray, PIXELS);
kind!(Texture2D, TextureTarget::Texture2D, PIXELS);
kind!(Texture2DArray, TextureTarget::Texture2DArray, PIXELS);
kind!(Texture3D, TextureTarget::Texture3D, PIXELS);
kind!(Multisample2D, TextureTarget::Multisample2D, MULTISAMPLE);
kind!(Multisample2DArray, TextureTarget::Multisample2DArray, MULTISAMPLE);
kind!(
    /// Six square faces.  Pixel uploads take a buffer six layers deep, one layer per face.
    CubeMap,
    TextureTarget::CubeMap,
    PIXELS
);
kind!(
    /// Layers of cube faces.  Depth counts faces, so it is a multiple of six.
    CubeMapArray,
    TextureTarget::CubeMapArray,
    PIXELS
);
kind!(Rectangle, TextureTarget::Rectangle, PIXELS);
kind!(
    /// A texture whose storage is the buffer bound to [`crate::BufferTarget::Texture`].
    BufferTexture,
    TextureTarget::Buffer,
    Capabilities::NONE
);
kind!(
    /// Block-compressed 1D storage.
    Compressed1D,
    TextureTarget::Texture1D,
    COMPRESSED,
    compressed: true,
    accepts: TextureTarget::is_1d
);
kind!(
    /// Block-compressed 2D storage: 2D, 1D array, cube map or rectangle.
    Compressed2D,
    TextureTarget::Texture2D,
    COMPRESSED,
    compressed: true,
    accepts: TextureTarget::is_2d
);
kind!(
    /// Block-compressed 3D storage: 3D, 2D array or cube map array.
    Compressed3D,
    TextureTarget::Texture3D,
    COMPRESSED,
    compressed: true,
    accepts: TextureTarget::is_3d
);

impl PixelUpload for Texture1D {}
impl PixelUpload for Texture1DArray {}
impl PixelUpload for Texture2D {}
impl PixelUpload for Texture2DArray {}
impl PixelUpload for Texture3D {}
impl PixelUpload for CubeMap {}
impl PixelUpload for CubeMapArray {}
impl PixelUpload for Rectangle {}

impl CompressedUpload for Compressed1D {}
impl CompressedUpload for Compressed2D {}
impl CompressedUpload for Compressed3D {}

impl MultisampleStorage for Multisample2D {}
impl MultisampleStorage for Multisample2DArray {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_kinds_accept_their_dimensionality() {
        assert!(Compressed2D::accepts(TextureTarget::CubeMap));
        assert!(Compressed2D::accepts(TextureTarget::Texture1DArray));
        assert!(!Compressed2D::accepts(TextureTarget::Texture3D));
        assert!(Compressed3D::accepts(TextureTarget::CubeMapArray));
        assert!(!Compressed1D::accepts(TextureTarget::Multisample2D));
    }

    #[test]
    fn uncompressed_kinds_accept_exactly_one_target() {
        assert!(Texture2D::accepts(TextureTarget::Texture2D));
        assert!(!Texture2D::accepts(TextureTarget::Rectangle));
        assert!(BufferTexture::accepts(TextureTarget::Buffer));
    }

    #[test]
    fn capabilities_are_exclusive() {
        assert_eq!(BufferTexture::CAPABILITIES, Capabilities::NONE);
        assert!(Multisample2DArray::CAPABILITIES.multisample_storage);
        assert!(!Compressed2D::CAPABILITIES.pixel_upload);
    }
}
