// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Binding points.
//!
//! Every slot the shadow cache mirrors is named by one of the enums in this module.
//! Each enum converts to the raw enumerant the driver expects via `raw()`.

use crate::sys::gl;

/// A texture binding target.
///
/// [`TextureTarget::Other`] carries targets this crate has no specialized support
/// for (extension-only targets, for example).  Those still bind and unbind through
/// the cache like any other target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture3D,
    Multisample2D,
    Multisample2DArray,
    CubeMap,
    CubeMapArray,
    Rectangle,
    /// A texture whose storage is a buffer object.
    Buffer,
    Other(u32),
}

impl TextureTarget {
    /// The targets with a dedicated slot in each texture unit.
    pub const KNOWN: [TextureTarget; 11] = [
        TextureTarget::Texture1D,
        TextureTarget::Texture1DArray,
        TextureTarget::Texture2D,
        TextureTarget::Texture2DArray,
        TextureTarget::Texture3D,
        TextureTarget::Multisample2D,
        TextureTarget::Multisample2DArray,
        TextureTarget::CubeMap,
        TextureTarget::CubeMapArray,
        TextureTarget::Rectangle,
        TextureTarget::Buffer,
    ];

    pub const fn raw(self) -> u32 {
        match self {
            TextureTarget::Texture1D => gl::TEXTURE_1D,
            TextureTarget::Texture1DArray => gl::TEXTURE_1D_ARRAY,
            TextureTarget::Texture2D => gl::TEXTURE_2D,
            TextureTarget::Texture2DArray => gl::TEXTURE_2D_ARRAY,
            TextureTarget::Texture3D => gl::TEXTURE_3D,
            TextureTarget::Multisample2D => gl::TEXTURE_2D_MULTISAMPLE,
            TextureTarget::Multisample2DArray => gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
            TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP,
            TextureTarget::CubeMapArray => gl::TEXTURE_CUBE_MAP_ARRAY,
            TextureTarget::Rectangle => gl::TEXTURE_RECTANGLE,
            TextureTarget::Buffer => gl::TEXTURE_BUFFER,
            TextureTarget::Other(raw) => raw,
        }
    }

    /// Maps a raw enumerant back to a target.  Unrecognized values become [`TextureTarget::Other`].
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            gl::TEXTURE_1D => TextureTarget::Texture1D,
            gl::TEXTURE_1D_ARRAY => TextureTarget::Texture1DArray,
            gl::TEXTURE_2D => TextureTarget::Texture2D,
            gl::TEXTURE_2D_ARRAY => TextureTarget::Texture2DArray,
            gl::TEXTURE_3D => TextureTarget::Texture3D,
            gl::TEXTURE_2D_MULTISAMPLE => TextureTarget::Multisample2D,
            gl::TEXTURE_2D_MULTISAMPLE_ARRAY => TextureTarget::Multisample2DArray,
            gl::TEXTURE_CUBE_MAP => TextureTarget::CubeMap,
            gl::TEXTURE_CUBE_MAP_ARRAY => TextureTarget::CubeMapArray,
            gl::TEXTURE_RECTANGLE => TextureTarget::Rectangle,
            gl::TEXTURE_BUFFER => TextureTarget::Buffer,
            other => TextureTarget::Other(other),
        }
    }

    /// The same binding point with known raw values spelled as their named variant.
    ///
    /// `Other(gl::TEXTURE_2D)` and `Texture2D` name one driver binding point; this
    /// maps the former to the latter.
    ///
    /// ```
    /// use bindshadow::TextureTarget;
    /// use bindshadow::sys::gl;
    ///
    /// assert_eq!(TextureTarget::Other(gl::TEXTURE_2D).canonical(), TextureTarget::Texture2D);
    /// assert_eq!(TextureTarget::Other(0x8D65).canonical(), TextureTarget::Other(0x8D65));
    /// ```
    pub const fn canonical(self) -> Self {
        Self::from_raw(self.raw())
    }

    /// Position of this target in a unit's fixed slot array, if it has one.
    pub(crate) const fn slot(self) -> Option<usize> {
        match self.canonical() {
            TextureTarget::Texture1D => Some(0),
            TextureTarget::Texture1DArray => Some(1),
            TextureTarget::Texture2D => Some(2),
            TextureTarget::Texture2DArray => Some(3),
            TextureTarget::Texture3D => Some(4),
            TextureTarget::Multisample2D => Some(5),
            TextureTarget::Multisample2DArray => Some(6),
            TextureTarget::CubeMap => Some(7),
            TextureTarget::CubeMapArray => Some(8),
            TextureTarget::Rectangle => Some(9),
            TextureTarget::Buffer => Some(10),
            TextureTarget::Other(_) => None,
        }
    }

    /// Targets addressed with a single coordinate.
    pub const fn is_1d(self) -> bool {
        matches!(self.canonical(), TextureTarget::Texture1D)
    }

    /// Targets whose images are addressed with two coordinates.
    ///
    /// A 1D array is a stack of rows and a cube map is six square faces, so both
    /// upload as 2D images.
    pub const fn is_2d(self) -> bool {
        matches!(
            self.canonical(),
            TextureTarget::Texture2D
                | TextureTarget::Texture1DArray
                | TextureTarget::CubeMap
                | TextureTarget::Rectangle
        )
    }

    /// Targets whose images are addressed with three coordinates.
    pub const fn is_3d(self) -> bool {
        matches!(
            self.canonical(),
            TextureTarget::Texture3D | TextureTarget::Texture2DArray | TextureTarget::CubeMapArray
        )
    }

    pub const fn is_multisample(self) -> bool {
        matches!(
            self.canonical(),
            TextureTarget::Multisample2D | TextureTarget::Multisample2DArray
        )
    }
}

/// A non-indexed buffer binding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
    AtomicCounter,
    CopyRead,
    CopyWrite,
    DispatchIndirect,
    DrawIndirect,
    ElementArray,
    PixelPack,
    PixelUnpack,
    Query,
    ShaderStorage,
    /// The buffer backing a [`TextureTarget::Buffer`] texture.
    Texture,
    TransformFeedback,
    Uniform,
}

impl BufferTarget {
    pub const ALL: [BufferTarget; 14] = [
        BufferTarget::Array,
        BufferTarget::AtomicCounter,
        BufferTarget::CopyRead,
        BufferTarget::CopyWrite,
        BufferTarget::DispatchIndirect,
        BufferTarget::DrawIndirect,
        BufferTarget::ElementArray,
        BufferTarget::PixelPack,
        BufferTarget::PixelUnpack,
        BufferTarget::Query,
        BufferTarget::ShaderStorage,
        BufferTarget::Texture,
        BufferTarget::TransformFeedback,
        BufferTarget::Uniform,
    ];

    pub const fn raw(self) -> u32 {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::AtomicCounter => gl::ATOMIC_COUNTER_BUFFER,
            BufferTarget::CopyRead => gl::COPY_READ_BUFFER,
            BufferTarget::CopyWrite => gl::COPY_WRITE_BUFFER,
            BufferTarget::DispatchIndirect => gl::DISPATCH_INDIRECT_BUFFER,
            BufferTarget::DrawIndirect => gl::DRAW_INDIRECT_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
            BufferTarget::PixelPack => gl::PIXEL_PACK_BUFFER,
            BufferTarget::PixelUnpack => gl::PIXEL_UNPACK_BUFFER,
            BufferTarget::Query => gl::QUERY_BUFFER,
            BufferTarget::ShaderStorage => gl::SHADER_STORAGE_BUFFER,
            BufferTarget::Texture => gl::TEXTURE_BUFFER,
            BufferTarget::TransformFeedback => gl::TRANSFORM_FEEDBACK_BUFFER,
            BufferTarget::Uniform => gl::UNIFORM_BUFFER,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

/// A buffer target that also has an array of indexed binding points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedBufferTarget {
    Uniform,
    ShaderStorage,
    AtomicCounter,
    TransformFeedback,
}

impl IndexedBufferTarget {
    pub const ALL: [IndexedBufferTarget; 4] = [
        IndexedBufferTarget::Uniform,
        IndexedBufferTarget::ShaderStorage,
        IndexedBufferTarget::AtomicCounter,
        IndexedBufferTarget::TransformFeedback,
    ];

    /// The generic binding point the driver also updates on an indexed bind.
    pub const fn generic(self) -> BufferTarget {
        match self {
            IndexedBufferTarget::Uniform => BufferTarget::Uniform,
            IndexedBufferTarget::ShaderStorage => BufferTarget::ShaderStorage,
            IndexedBufferTarget::AtomicCounter => BufferTarget::AtomicCounter,
            IndexedBufferTarget::TransformFeedback => BufferTarget::TransformFeedback,
        }
    }

    pub const fn raw(self) -> u32 {
        self.generic().raw()
    }
}

/// A framebuffer binding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTarget {
    /// Both the read and the draw binding at once.
    Framebuffer,
    Read,
    Draw,
}

impl FrameTarget {
    pub const fn raw(self) -> u32 {
        match self {
            FrameTarget::Framebuffer => gl::FRAMEBUFFER,
            FrameTarget::Read => gl::READ_FRAMEBUFFER,
            FrameTarget::Draw => gl::DRAW_FRAMEBUFFER,
        }
    }
}

/// Any binding point that can be reset with [`crate::Context::null_bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Texture(TextureTarget),
    Buffer(BufferTarget),
    Frame(FrameTarget),
    Renderbuffer,
}

impl From<TextureTarget> for Target {
    fn from(value: TextureTarget) -> Self {
        Target::Texture(value)
    }
}
impl From<BufferTarget> for Target {
    fn from(value: BufferTarget) -> Self {
        Target::Buffer(value)
    }
}
impl From<FrameTarget> for Target {
    fn from(value: FrameTarget) -> Self {
        Target::Frame(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_targets_round_trip_through_raw() {
        for target in TextureTarget::KNOWN {
            assert_eq!(TextureTarget::from_raw(target.raw()), target);
        }
        assert_eq!(TextureTarget::from_raw(0x1234), TextureTarget::Other(0x1234));
    }

    #[test]
    fn known_targets_have_distinct_slots() {
        let mut seen = [false; 11];
        for target in TextureTarget::KNOWN {
            let slot = target.slot().unwrap();
            assert!(!seen[slot], "slot {slot} reused by {target:?}");
            seen[slot] = true;
        }
        assert_eq!(TextureTarget::Other(7).slot(), None);
    }

    #[test]
    fn raw_spellings_of_known_targets_share_their_slot() {
        for target in TextureTarget::KNOWN {
            let spelled = TextureTarget::Other(target.raw());
            assert_eq!(spelled.canonical(), target);
            assert_eq!(spelled.slot(), target.slot());
            assert_eq!(spelled.is_2d(), target.is_2d());
        }
    }

    #[test]
    fn dimensionality_classes_are_disjoint() {
        for target in TextureTarget::KNOWN {
            let classes = [target.is_1d(), target.is_2d(), target.is_3d()]
                .iter()
                .filter(|b| **b)
                .count();
            assert!(classes <= 1, "{target:?} is in {classes} classes");
        }
        assert!(TextureTarget::CubeMap.is_2d());
        assert!(TextureTarget::CubeMapArray.is_3d());
        assert!(!TextureTarget::Multisample2D.is_2d());
    }

    #[test]
    fn buffer_slots_match_all_ordering() {
        for (i, target) in BufferTarget::ALL.iter().enumerate() {
            assert_eq!(target.slot(), i);
        }
    }

    #[test]
    fn indexed_targets_share_raw_with_generic() {
        assert_eq!(IndexedBufferTarget::Uniform.raw(), gl::UNIFORM_BUFFER);
        assert_eq!(
            IndexedBufferTarget::TransformFeedback.generic(),
            BufferTarget::TransformFeedback
        );
    }
}
