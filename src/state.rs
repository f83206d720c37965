// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Fixed-function render state.
//!
//! Capabilities, rectangles and the small enums that configure depth testing,
//! culling and blending.  Like the binding targets, each converts to the raw
//! enumerant the driver expects via `raw()`.

use crate::sys::gl;

/// A server-side capability toggled with enable and disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Blend,
    ColorLogicOp,
    CullFace,
    DebugOutput,
    DebugOutputSynchronous,
    DepthClamp,
    DepthTest,
    Dither,
    FramebufferSrgb,
    LineSmooth,
    Multisample,
    PolygonOffsetFill,
    PolygonOffsetLine,
    PolygonOffsetPoint,
    PolygonSmooth,
    PrimitiveRestart,
    PrimitiveRestartFixedIndex,
    RasterizerDiscard,
    SampleAlphaToCoverage,
    SampleAlphaToOne,
    SampleCoverage,
    SampleShading,
    ScissorTest,
    StencilTest,
    TextureCubeMapSeamless,
    ProgramPointSize,
}

impl Capability {
    pub const ALL: [Capability; 26] = [
        Capability::Blend,
        Capability::ColorLogicOp,
        Capability::CullFace,
        Capability::DebugOutput,
        Capability::DebugOutputSynchronous,
        Capability::DepthClamp,
        Capability::DepthTest,
        Capability::Dither,
        Capability::FramebufferSrgb,
        Capability::LineSmooth,
        Capability::Multisample,
        Capability::PolygonOffsetFill,
        Capability::PolygonOffsetLine,
        Capability::PolygonOffsetPoint,
        Capability::PolygonSmooth,
        Capability::PrimitiveRestart,
        Capability::PrimitiveRestartFixedIndex,
        Capability::RasterizerDiscard,
        Capability::SampleAlphaToCoverage,
        Capability::SampleAlphaToOne,
        Capability::SampleCoverage,
        Capability::SampleShading,
        Capability::ScissorTest,
        Capability::StencilTest,
        Capability::TextureCubeMapSeamless,
        Capability::ProgramPointSize,
    ];

    pub const fn raw(self) -> u32 {
        match self {
            Capability::Blend => gl::BLEND,
            Capability::ColorLogicOp => gl::COLOR_LOGIC_OP,
            Capability::CullFace => gl::CULL_FACE,
            Capability::DebugOutput => gl::DEBUG_OUTPUT,
            Capability::DebugOutputSynchronous => gl::DEBUG_OUTPUT_SYNCHRONOUS,
            Capability::DepthClamp => gl::DEPTH_CLAMP,
            Capability::DepthTest => gl::DEPTH_TEST,
            Capability::Dither => gl::DITHER,
            Capability::FramebufferSrgb => gl::FRAMEBUFFER_SRGB,
            Capability::LineSmooth => gl::LINE_SMOOTH,
            Capability::Multisample => gl::MULTISAMPLE,
            Capability::PolygonOffsetFill => gl::POLYGON_OFFSET_FILL,
            Capability::PolygonOffsetLine => gl::POLYGON_OFFSET_LINE,
            Capability::PolygonOffsetPoint => gl::POLYGON_OFFSET_POINT,
            Capability::PolygonSmooth => gl::POLYGON_SMOOTH,
            Capability::PrimitiveRestart => gl::PRIMITIVE_RESTART,
            Capability::PrimitiveRestartFixedIndex => gl::PRIMITIVE_RESTART_FIXED_INDEX,
            Capability::RasterizerDiscard => gl::RASTERIZER_DISCARD,
            Capability::SampleAlphaToCoverage => gl::SAMPLE_ALPHA_TO_COVERAGE,
            Capability::SampleAlphaToOne => gl::SAMPLE_ALPHA_TO_ONE,
            Capability::SampleCoverage => gl::SAMPLE_COVERAGE,
            Capability::SampleShading => gl::SAMPLE_SHADING,
            Capability::ScissorTest => gl::SCISSOR_TEST,
            Capability::StencilTest => gl::STENCIL_TEST,
            Capability::TextureCubeMapSeamless => gl::TEXTURE_CUBE_MAP_SEAMLESS,
            Capability::ProgramPointSize => gl::PROGRAM_POINT_SIZE,
        }
    }

    /// Whether a freshly created context has this capability enabled.
    pub const fn enabled_by_default(self) -> bool {
        matches!(self, Capability::Dither | Capability::Multisample)
    }

    /// One bit per variant, in [`Self::ALL`] order.
    pub(crate) const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// A window-space rectangle, as used by the viewport and the scissor box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin.
    pub const fn sized(width: i32, height: i32) -> Self {
        Rect::new(0, 0, width, height)
    }

    /// Negative sizes are rejected by the driver.
    pub const fn is_valid(self) -> bool {
        self.width >= 0 && self.height >= 0
    }
}

/// Comparison function for the depth test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunc {
    Never,
    #[default]
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

impl CompareFunc {
    pub const ALL: [CompareFunc; 8] = [
        CompareFunc::Never,
        CompareFunc::Less,
        CompareFunc::Equal,
        CompareFunc::LessEqual,
        CompareFunc::Greater,
        CompareFunc::NotEqual,
        CompareFunc::GreaterEqual,
        CompareFunc::Always,
    ];

    pub const fn raw(self) -> u32 {
        match self {
            CompareFunc::Never => gl::NEVER,
            CompareFunc::Less => gl::LESS,
            CompareFunc::Equal => gl::EQUAL,
            CompareFunc::LessEqual => gl::LEQUAL,
            CompareFunc::Greater => gl::GREATER,
            CompareFunc::NotEqual => gl::NOTEQUAL,
            CompareFunc::GreaterEqual => gl::GEQUAL,
            CompareFunc::Always => gl::ALWAYS,
        }
    }
}

/// Which polygon faces are culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Face {
    Front,
    #[default]
    Back,
    FrontAndBack,
}

impl Face {
    pub const ALL: [Face; 3] = [Face::Front, Face::Back, Face::FrontAndBack];

    pub const fn raw(self) -> u32 {
        match self {
            Face::Front => gl::FRONT,
            Face::Back => gl::BACK,
            Face::FrontAndBack => gl::FRONT_AND_BACK,
        }
    }
}

/// Winding order of front-facing polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrontFace {
    Cw,
    #[default]
    Ccw,
}

impl FrontFace {
    pub const fn raw(self) -> u32 {
        match self {
            FrontFace::Cw => gl::CW,
            FrontFace::Ccw => gl::CCW,
        }
    }
}

/// Source or destination factor of the blend function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    DstColor,
    OneMinusDstColor,
    /// Only meaningful as a source factor.
    SrcAlphaSaturate,
    ConstantColor,
    OneMinusConstantColor,
    ConstantAlpha,
    OneMinusConstantAlpha,
}

impl BlendFactor {
    pub const ALL: [BlendFactor; 15] = [
        BlendFactor::Zero,
        BlendFactor::One,
        BlendFactor::SrcColor,
        BlendFactor::OneMinusSrcColor,
        BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha,
        BlendFactor::DstAlpha,
        BlendFactor::OneMinusDstAlpha,
        BlendFactor::DstColor,
        BlendFactor::OneMinusDstColor,
        BlendFactor::SrcAlphaSaturate,
        BlendFactor::ConstantColor,
        BlendFactor::OneMinusConstantColor,
        BlendFactor::ConstantAlpha,
        BlendFactor::OneMinusConstantAlpha,
    ];

    pub const fn raw(self) -> u32 {
        match self {
            BlendFactor::Zero => gl::ZERO,
            BlendFactor::One => gl::ONE,
            BlendFactor::SrcColor => gl::SRC_COLOR,
            BlendFactor::OneMinusSrcColor => gl::ONE_MINUS_SRC_COLOR,
            BlendFactor::SrcAlpha => gl::SRC_ALPHA,
            BlendFactor::OneMinusSrcAlpha => gl::ONE_MINUS_SRC_ALPHA,
            BlendFactor::DstAlpha => gl::DST_ALPHA,
            BlendFactor::OneMinusDstAlpha => gl::ONE_MINUS_DST_ALPHA,
            BlendFactor::DstColor => gl::DST_COLOR,
            BlendFactor::OneMinusDstColor => gl::ONE_MINUS_DST_COLOR,
            BlendFactor::SrcAlphaSaturate => gl::SRC_ALPHA_SATURATE,
            BlendFactor::ConstantColor => gl::CONSTANT_COLOR,
            BlendFactor::OneMinusConstantColor => gl::ONE_MINUS_CONSTANT_COLOR,
            BlendFactor::ConstantAlpha => gl::CONSTANT_ALPHA,
            BlendFactor::OneMinusConstantAlpha => gl::ONE_MINUS_CONSTANT_ALPHA,
        }
    }
}

/// Source and destination factors of the blend function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFunc {
    /// Writes the source unchanged.
    pub const REPLACE: BlendFunc = BlendFunc {
        src: BlendFactor::One,
        dst: BlendFactor::Zero,
    };

    pub const fn new(src: BlendFactor, dst: BlendFactor) -> Self {
        BlendFunc { src, dst }
    }
}

impl Default for BlendFunc {
    fn default() -> Self {
        BlendFunc::REPLACE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn capability_bits_are_distinct() {
        let bits: HashSet<u32> = Capability::ALL.iter().map(|c| c.bit()).collect();
        assert_eq!(bits.len(), Capability::ALL.len());
        for (i, c) in Capability::ALL.iter().enumerate() {
            assert_eq!(c.bit(), 1 << i);
        }
    }

    #[test]
    fn capability_raw_values_are_distinct() {
        let raw: HashSet<u32> = Capability::ALL.iter().map(|c| c.raw()).collect();
        assert_eq!(raw.len(), Capability::ALL.len());
    }

    #[test]
    fn only_dither_and_multisample_start_enabled() {
        let enabled: Vec<Capability> = Capability::ALL
            .into_iter()
            .filter(|c| c.enabled_by_default())
            .collect();
        assert_eq!(enabled, [Capability::Dither, Capability::Multisample]);
    }

    #[test]
    fn compare_funcs_are_contiguous() {
        for (i, f) in CompareFunc::ALL.iter().enumerate() {
            assert_eq!(f.raw(), gl::NEVER + i as u32);
        }
    }

    #[test]
    fn negative_sizes_are_invalid() {
        assert!(Rect::sized(0, 0).is_valid());
        assert!(!Rect::new(4, 4, -1, 2).is_valid());
    }
}
