// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Texture formats and texel element types.
//!
//! This module describes data on both sides of the driver boundary:
//!
//! - [`TextureFormat`] is the *internal* format a texture is stored in on the GPU.
//!   It decides whether a texture is block-compressed, which in turn decides which
//!   typed handle [`crate::reify`] builds for it.
//! - [`BaseFormat`] and [`TextureData`] describe the *client* layout of pixel data
//!   handed to or read back from the driver.
//! - [`CPixel`] is implemented by every element type a [`crate::TexelBuffer`] may hold.
//!   Each element type knows its own client layout, so uploads never need to be told
//!   twice.
//!
//! # Examples
//!
//! ```
//! use bindshadow::pixel_formats::{TextureFormat, Unorm4, CPixel, TextureData};
//!
//! assert!(!TextureFormat::Rgba8.is_compressed());
//! assert!(TextureFormat::CompressedRgbaS3tcDxt5.is_compressed());
//!
//! let red = Unorm4 { r: 255, g: 0, b: 0, a: 255 };
//! assert_eq!(Unorm4::DATA_TYPE, TextureData::UnsignedByte);
//! # let _ = red;
//! ```

/*
Quick note on type design.  Internal formats are an enum rather than zero-sized types
because reification learns them at runtime: a discovered texture reports whatever
the driver says it is, including formats we have never heard of.  Element types, on
the other hand, are known at compile time (you hold a `TexelBuffer<Unorm4>`), so they
are modeled as types and carry their layout as associated constants.
 */
pub mod png_support;

pub use png_support::PngPixel;

use crate::sys::gl;
use std::fmt::Debug;

pub use half::f16;

/// Internal storage format of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    R8,
    Rg8,
    Rgb8,
    Rgba8,
    Srgb8Alpha8,
    Rgba16,
    R16F,
    R32F,
    Rg32F,
    Rgba16F,
    Rgba32F,
    R32I,
    R32UI,
    DepthComponent24,
    DepthComponent32F,
    Depth24Stencil8,

    CompressedRed,
    CompressedRg,
    CompressedRgb,
    CompressedRgba,
    CompressedSrgb,
    CompressedSrgbAlpha,
    CompressedRedRgtc1,
    CompressedSignedRedRgtc1,
    CompressedRgRgtc2,
    CompressedSignedRgRgtc2,
    CompressedRgbaBptcUnorm,
    CompressedSrgbAlphaBptcUnorm,
    CompressedRgbBptcSignedFloat,
    CompressedRgbBptcUnsignedFloat,
    CompressedRgb8Etc2,
    CompressedSrgb8Etc2,
    CompressedRgba8Etc2Eac,
    CompressedR11Eac,
    CompressedRgbS3tcDxt1,
    CompressedRgbaS3tcDxt1,
    CompressedRgbaS3tcDxt3,
    CompressedRgbaS3tcDxt5,

    /// A format this crate does not name.  Treated as uncompressed.
    Other(u32),
}

impl TextureFormat {
    pub const fn raw(self) -> u32 {
        match self {
            TextureFormat::R8 => gl::R8,
            TextureFormat::Rg8 => gl::RG8,
            TextureFormat::Rgb8 => gl::RGB8,
            TextureFormat::Rgba8 => gl::RGBA8,
            TextureFormat::Srgb8Alpha8 => gl::SRGB8_ALPHA8,
            TextureFormat::Rgba16 => gl::RGBA16,
            TextureFormat::R16F => gl::R16F,
            TextureFormat::R32F => gl::R32F,
            TextureFormat::Rg32F => gl::RG32F,
            TextureFormat::Rgba16F => gl::RGBA16F,
            TextureFormat::Rgba32F => gl::RGBA32F,
            TextureFormat::R32I => gl::R32I,
            TextureFormat::R32UI => gl::R32UI,
            TextureFormat::DepthComponent24 => gl::DEPTH_COMPONENT24,
            TextureFormat::DepthComponent32F => gl::DEPTH_COMPONENT32F,
            TextureFormat::Depth24Stencil8 => gl::DEPTH24_STENCIL8,
            TextureFormat::CompressedRed => gl::COMPRESSED_RED,
            TextureFormat::CompressedRg => gl::COMPRESSED_RG,
            TextureFormat::CompressedRgb => gl::COMPRESSED_RGB,
            TextureFormat::CompressedRgba => gl::COMPRESSED_RGBA,
            TextureFormat::CompressedSrgb => gl::COMPRESSED_SRGB,
            TextureFormat::CompressedSrgbAlpha => gl::COMPRESSED_SRGB_ALPHA,
            TextureFormat::CompressedRedRgtc1 => gl::COMPRESSED_RED_RGTC1,
            TextureFormat::CompressedSignedRedRgtc1 => gl::COMPRESSED_SIGNED_RED_RGTC1,
            TextureFormat::CompressedRgRgtc2 => gl::COMPRESSED_RG_RGTC2,
            TextureFormat::CompressedSignedRgRgtc2 => gl::COMPRESSED_SIGNED_RG_RGTC2,
            TextureFormat::CompressedRgbaBptcUnorm => gl::COMPRESSED_RGBA_BPTC_UNORM,
            TextureFormat::CompressedSrgbAlphaBptcUnorm => gl::COMPRESSED_SRGB_ALPHA_BPTC_UNORM,
            TextureFormat::CompressedRgbBptcSignedFloat => gl::COMPRESSED_RGB_BPTC_SIGNED_FLOAT,
            TextureFormat::CompressedRgbBptcUnsignedFloat => {
                gl::COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT
            }
            TextureFormat::CompressedRgb8Etc2 => gl::COMPRESSED_RGB8_ETC2,
            TextureFormat::CompressedSrgb8Etc2 => gl::COMPRESSED_SRGB8_ETC2,
            TextureFormat::CompressedRgba8Etc2Eac => gl::COMPRESSED_RGBA8_ETC2_EAC,
            TextureFormat::CompressedR11Eac => gl::COMPRESSED_R11_EAC,
            TextureFormat::CompressedRgbS3tcDxt1 => gl::COMPRESSED_RGB_S3TC_DXT1_EXT,
            TextureFormat::CompressedRgbaS3tcDxt1 => gl::COMPRESSED_RGBA_S3TC_DXT1_EXT,
            TextureFormat::CompressedRgbaS3tcDxt3 => gl::COMPRESSED_RGBA_S3TC_DXT3_EXT,
            TextureFormat::CompressedRgbaS3tcDxt5 => gl::COMPRESSED_RGBA_S3TC_DXT5_EXT,
            TextureFormat::Other(raw) => raw,
        }
    }

    /// Maps a raw internal format, as reported by the driver, to a format.
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            gl::R8 => TextureFormat::R8,
            gl::RG8 => TextureFormat::Rg8,
            gl::RGB8 => TextureFormat::Rgb8,
            gl::RGBA8 => TextureFormat::Rgba8,
            gl::SRGB8_ALPHA8 => TextureFormat::Srgb8Alpha8,
            gl::RGBA16 => TextureFormat::Rgba16,
            gl::R16F => TextureFormat::R16F,
            gl::R32F => TextureFormat::R32F,
            gl::RG32F => TextureFormat::Rg32F,
            gl::RGBA16F => TextureFormat::Rgba16F,
            gl::RGBA32F => TextureFormat::Rgba32F,
            gl::R32I => TextureFormat::R32I,
            gl::R32UI => TextureFormat::R32UI,
            gl::DEPTH_COMPONENT24 => TextureFormat::DepthComponent24,
            gl::DEPTH_COMPONENT32F => TextureFormat::DepthComponent32F,
            gl::DEPTH24_STENCIL8 => TextureFormat::Depth24Stencil8,
            gl::COMPRESSED_RED => TextureFormat::CompressedRed,
            gl::COMPRESSED_RG => TextureFormat::CompressedRg,
            gl::COMPRESSED_RGB => TextureFormat::CompressedRgb,
            gl::COMPRESSED_RGBA => TextureFormat::CompressedRgba,
            gl::COMPRESSED_SRGB => TextureFormat::CompressedSrgb,
            gl::COMPRESSED_SRGB_ALPHA => TextureFormat::CompressedSrgbAlpha,
            gl::COMPRESSED_RED_RGTC1 => TextureFormat::CompressedRedRgtc1,
            gl::COMPRESSED_SIGNED_RED_RGTC1 => TextureFormat::CompressedSignedRedRgtc1,
            gl::COMPRESSED_RG_RGTC2 => TextureFormat::CompressedRgRgtc2,
            gl::COMPRESSED_SIGNED_RG_RGTC2 => TextureFormat::CompressedSignedRgRgtc2,
            gl::COMPRESSED_RGBA_BPTC_UNORM => TextureFormat::CompressedRgbaBptcUnorm,
            gl::COMPRESSED_SRGB_ALPHA_BPTC_UNORM => TextureFormat::CompressedSrgbAlphaBptcUnorm,
            gl::COMPRESSED_RGB_BPTC_SIGNED_FLOAT => TextureFormat::CompressedRgbBptcSignedFloat,
            gl::COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT => {
                TextureFormat::CompressedRgbBptcUnsignedFloat
            }
            gl::COMPRESSED_RGB8_ETC2 => TextureFormat::CompressedRgb8Etc2,
            gl::COMPRESSED_SRGB8_ETC2 => TextureFormat::CompressedSrgb8Etc2,
            gl::COMPRESSED_RGBA8_ETC2_EAC => TextureFormat::CompressedRgba8Etc2Eac,
            gl::COMPRESSED_R11_EAC => TextureFormat::CompressedR11Eac,
            gl::COMPRESSED_RGB_S3TC_DXT1_EXT => TextureFormat::CompressedRgbS3tcDxt1,
            gl::COMPRESSED_RGBA_S3TC_DXT1_EXT => TextureFormat::CompressedRgbaS3tcDxt1,
            gl::COMPRESSED_RGBA_S3TC_DXT3_EXT => TextureFormat::CompressedRgbaS3tcDxt3,
            gl::COMPRESSED_RGBA_S3TC_DXT5_EXT => TextureFormat::CompressedRgbaS3tcDxt5,
            other => TextureFormat::Other(other),
        }
    }

    /// Client channel layout that matches this format when no data is supplied.
    ///
    /// Used when storage is allocated without pixels, where the driver still wants a
    /// compatible client format.
    pub const fn base_format(self) -> BaseFormat {
        match self {
            TextureFormat::R8 | TextureFormat::R16F | TextureFormat::R32F => BaseFormat::Red,
            TextureFormat::Rg8 | TextureFormat::Rg32F => BaseFormat::Rg,
            TextureFormat::Rgb8 => BaseFormat::Rgb,
            TextureFormat::R32I | TextureFormat::R32UI => BaseFormat::RedInteger,
            TextureFormat::DepthComponent24 | TextureFormat::DepthComponent32F => {
                BaseFormat::DepthComponent
            }
            TextureFormat::Depth24Stencil8 => BaseFormat::DepthStencil,
            _ => BaseFormat::Rgba,
        }
    }

    /// Whether texels of this format are stored in fixed-size compressed blocks.
    ///
    /// Block-compressed storage cannot be written one pixel at a time and has no
    /// multisample variants.
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            TextureFormat::CompressedRed
                | TextureFormat::CompressedRg
                | TextureFormat::CompressedRgb
                | TextureFormat::CompressedRgba
                | TextureFormat::CompressedSrgb
                | TextureFormat::CompressedSrgbAlpha
                | TextureFormat::CompressedRedRgtc1
                | TextureFormat::CompressedSignedRedRgtc1
                | TextureFormat::CompressedRgRgtc2
                | TextureFormat::CompressedSignedRgRgtc2
                | TextureFormat::CompressedRgbaBptcUnorm
                | TextureFormat::CompressedSrgbAlphaBptcUnorm
                | TextureFormat::CompressedRgbBptcSignedFloat
                | TextureFormat::CompressedRgbBptcUnsignedFloat
                | TextureFormat::CompressedRgb8Etc2
                | TextureFormat::CompressedSrgb8Etc2
                | TextureFormat::CompressedRgba8Etc2Eac
                | TextureFormat::CompressedR11Eac
                | TextureFormat::CompressedRgbS3tcDxt1
                | TextureFormat::CompressedRgbaS3tcDxt1
                | TextureFormat::CompressedRgbaS3tcDxt3
                | TextureFormat::CompressedRgbaS3tcDxt5
        )
    }
}

/// Channel layout of client pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseFormat {
    Red,
    Rg,
    Rgb,
    Rgba,
    Bgra,
    RedInteger,
    DepthComponent,
    DepthStencil,
}

impl BaseFormat {
    pub const fn raw(self) -> u32 {
        match self {
            BaseFormat::Red => gl::RED,
            BaseFormat::Rg => gl::RG,
            BaseFormat::Rgb => gl::RGB,
            BaseFormat::Rgba => gl::RGBA,
            BaseFormat::Bgra => gl::BGRA,
            BaseFormat::RedInteger => gl::RED_INTEGER,
            BaseFormat::DepthComponent => gl::DEPTH_COMPONENT,
            BaseFormat::DepthStencil => gl::DEPTH_STENCIL,
        }
    }
}

/// Per-component data type of client pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureData {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    HalfFloat,
    Float,
    UnsignedInt248,
}

impl TextureData {
    pub const fn raw(self) -> u32 {
        match self {
            TextureData::Byte => gl::BYTE,
            TextureData::UnsignedByte => gl::UNSIGNED_BYTE,
            TextureData::Short => gl::SHORT,
            TextureData::UnsignedShort => gl::UNSIGNED_SHORT,
            TextureData::Int => gl::INT,
            TextureData::UnsignedInt => gl::UNSIGNED_INT,
            TextureData::HalfFloat => gl::HALF_FLOAT,
            TextureData::Float => gl::FLOAT,
            TextureData::UnsignedInt248 => gl::UNSIGNED_INT_24_8,
        }
    }
}

/// Client layout of one texel element: channels plus component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelLayout {
    pub format: BaseFormat,
    pub data_type: TextureData,
}

/// A texel element with C-compatible memory layout.
///
/// # Safety
///
/// Implementors must be `repr(C)` (or primitive) with no padding and no
/// uninitialized bytes, since texel buffers are handed to the driver as raw bytes.
pub unsafe trait CPixel: Copy + Default + Debug + Send + Sync + 'static {
    /// Channel layout of one element.
    const BASE_FORMAT: BaseFormat;
    /// Component data type of one element.
    const DATA_TYPE: TextureData;

    fn layout() -> PixelLayout {
        PixelLayout {
            format: Self::BASE_FORMAT,
            data_type: Self::DATA_TYPE,
        }
    }
}

/// Convert a slice of C-compatible pixels to raw bytes.
pub(crate) fn pixel_as_bytes<T: CPixel>(t: &[T]) -> &[u8] {
    //safe because we know that T is repr(C)
    //(we offloaded the safety check to the CPixel trait)
    unsafe { std::slice::from_raw_parts(t.as_ptr() as *const u8, std::mem::size_of_val(t)) }
}

/// Mutable variant of [`pixel_as_bytes`], used when the driver writes readback data.
pub(crate) fn pixel_as_bytes_mut<T: CPixel>(t: &mut [T]) -> &mut [u8] {
    //every bit pattern is a valid CPixel, so letting the driver write any bytes is fine
    unsafe { std::slice::from_raw_parts_mut(t.as_mut_ptr() as *mut u8, std::mem::size_of_val(t)) }
}

unsafe impl CPixel for u8 {
    const BASE_FORMAT: BaseFormat = BaseFormat::Red;
    const DATA_TYPE: TextureData = TextureData::UnsignedByte;
}
unsafe impl CPixel for i8 {
    const BASE_FORMAT: BaseFormat = BaseFormat::Red;
    const DATA_TYPE: TextureData = TextureData::Byte;
}
unsafe impl CPixel for u16 {
    const BASE_FORMAT: BaseFormat = BaseFormat::Red;
    const DATA_TYPE: TextureData = TextureData::UnsignedShort;
}
unsafe impl CPixel for i16 {
    const BASE_FORMAT: BaseFormat = BaseFormat::Red;
    const DATA_TYPE: TextureData = TextureData::Short;
}
unsafe impl CPixel for u32 {
    const BASE_FORMAT: BaseFormat = BaseFormat::RedInteger;
    const DATA_TYPE: TextureData = TextureData::UnsignedInt;
}
unsafe impl CPixel for i32 {
    const BASE_FORMAT: BaseFormat = BaseFormat::RedInteger;
    const DATA_TYPE: TextureData = TextureData::Int;
}
unsafe impl CPixel for f16 {
    const BASE_FORMAT: BaseFormat = BaseFormat::Red;
    const DATA_TYPE: TextureData = TextureData::HalfFloat;
}
unsafe impl CPixel for f32 {
    const BASE_FORMAT: BaseFormat = BaseFormat::Red;
    const DATA_TYPE: TextureData = TextureData::Float;
}

/// C-compatible RGBA pixel with 8-bit normalized unsigned values.
///
/// Values range from 0-255 and are interpreted as 0.0-1.0 when sampled.
///
/// # Examples
///
/// ```
/// use bindshadow::pixel_formats::{Unorm4, Float4};
///
/// // Create from individual channels
/// let opaque_red = Unorm4 { r: 255, g: 0, b: 0, a: 255 };
///
/// // Convert from normalized floats
/// let float_color = Float4 { r: 1.0, g: 0.5, b: 0.0, a: 1.0 };
/// let unorm_color = Unorm4::from_floats(float_color);
/// assert_eq!(unorm_color.g, 128);
/// # let _ = opaque_red;
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Unorm4 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
unsafe impl CPixel for Unorm4 {
    const BASE_FORMAT: BaseFormat = BaseFormat::Rgba;
    const DATA_TYPE: TextureData = TextureData::UnsignedByte;
}
impl Unorm4 {
    /// Convert from normalized float values (0.0-1.0) to 8-bit values (0-255).
    ///
    /// Values are clamped to the valid range and rounded to nearest integer.
    pub fn from_floats(float4: Float4) -> Self {
        Unorm4 {
            r: (float4.r * 255.0).round().clamp(0.0, 255.0) as u8,
            g: (float4.g * 255.0).round().clamp(0.0, 255.0) as u8,
            b: (float4.b * 255.0).round().clamp(0.0, 255.0) as u8,
            a: (float4.a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

/// C-compatible RGBA pixel with 32-bit float channels.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Float4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}
unsafe impl CPixel for Float4 {
    const BASE_FORMAT: BaseFormat = BaseFormat::Rgba;
    const DATA_TYPE: TextureData = TextureData::Float;
}
impl From<Unorm4> for Float4 {
    fn from(c: Unorm4) -> Self {
        Float4 {
            r: c.r as f32 / 255.0,
            g: c.g as f32 / 255.0,
            b: c.b as f32 / 255.0,
            a: c.a as f32 / 255.0,
        }
    }
}

/// Two-channel 32-bit float pixel.  Commonly UV coordinates or 2D vector fields.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RGFloatPixel {
    pub r: f32,
    pub g: f32,
}
unsafe impl CPixel for RGFloatPixel {
    const BASE_FORMAT: BaseFormat = BaseFormat::Rg;
    const DATA_TYPE: TextureData = TextureData::Float;
}

/// Four-channel 16-bit normalized pixel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RGBA16Pixel {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}
unsafe impl CPixel for RGBA16Pixel {
    const BASE_FORMAT: BaseFormat = BaseFormat::Rgba;
    const DATA_TYPE: TextureData = TextureData::UnsignedShort;
}
