// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Hardware limits discovered when a [`crate::Context`] is created.
//!
//! The limits size the shadow arrays and are read-only afterwards.  Limits the
//! context's API version does not know about are not queried at all; their binding
//! arrays get a single slot instead.

use crate::imp::Driver;
use crate::sys::gl;
use crate::targets::IndexedBufferTarget;
use std::fmt::Display;

/// An API version, compared lexicographically.
///
/// ```
/// use bindshadow::GlVersion;
/// assert!(GlVersion::new(4, 3) > GlVersion::new(3, 1));
/// assert_eq!(GlVersion::new(4, 6).to_string(), "4.6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl GlVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        GlVersion { major, minor }
    }

    /// Whether a context of this version has everything introduced in `major.minor`.
    pub const fn at_least(self, major: u8, minor: u8) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

impl Default for GlVersion {
    fn default() -> Self {
        GlVersion::new(4, 6)
    }
}

impl Display for GlVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Sizes of the driver's binding arrays and a few related maxima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    pub texture_units: u32,
    pub transform_feedback_buffers: u32,
    pub uniform_buffer_bindings: u32,
    pub atomic_counter_buffer_bindings: u32,
    pub shader_storage_buffer_bindings: u32,
    pub color_attachments: u32,
    pub draw_buffers: u32,
}

impl Limits {
    /// The values a context is assumed to have when nothing is queried.
    pub const FALLBACK: Limits = Limits {
        texture_units: 1,
        transform_feedback_buffers: 1,
        uniform_buffer_bindings: 1,
        atomic_counter_buffer_bindings: 1,
        shader_storage_buffer_bindings: 1,
        color_attachments: 8,
        draw_buffers: 1,
    };

    /// Asks `driver` for every limit `version` supports.
    pub fn query<D: Driver + ?Sized>(driver: &mut D, version: GlVersion) -> Limits {
        let mut get = |pname: u32, since: (u8, u8), fallback: u32| {
            if version.at_least(since.0, since.1) {
                //a driver reporting nothing still gets one slot
                driver.get_integer(pname).max(1) as u32
            } else {
                fallback
            }
        };
        Limits {
            texture_units: get(gl::MAX_TEXTURE_IMAGE_UNITS, (0, 0), 1),
            transform_feedback_buffers: get(gl::MAX_TRANSFORM_FEEDBACK_BUFFERS, (3, 0), 1),
            uniform_buffer_bindings: get(gl::MAX_UNIFORM_BUFFER_BINDINGS, (3, 1), 1),
            atomic_counter_buffer_bindings: get(gl::MAX_ATOMIC_COUNTER_BUFFER_BINDINGS, (4, 2), 1),
            shader_storage_buffer_bindings: get(gl::MAX_SHADER_STORAGE_BUFFER_BINDINGS, (4, 3), 1),
            color_attachments: get(gl::MAX_COLOR_ATTACHMENTS, (3, 0), Self::FALLBACK.color_attachments),
            draw_buffers: get(gl::MAX_DRAW_BUFFERS, (2, 0), Self::FALLBACK.draw_buffers),
        }
    }

    /// Number of indexed binding points for `target`.
    pub const fn indexed(&self, target: IndexedBufferTarget) -> u32 {
        match target {
            IndexedBufferTarget::Uniform => self.uniform_buffer_bindings,
            IndexedBufferTarget::ShaderStorage => self.shader_storage_buffer_bindings,
            IndexedBufferTarget::AtomicCounter => self.atomic_counter_buffer_bindings,
            IndexedBufferTarget::TransformFeedback => self.transform_feedback_buffers,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::{Call, RecordingDriver};

    #[test]
    fn modern_context_queries_everything() {
        let mut driver = RecordingDriver::new()
            .with_limit(gl::MAX_TEXTURE_IMAGE_UNITS, 32)
            .with_limit(gl::MAX_SHADER_STORAGE_BUFFER_BINDINGS, 12);
        let limits = Limits::query(&mut driver, GlVersion::new(4, 6));
        assert_eq!(limits.texture_units, 32);
        assert_eq!(limits.indexed(IndexedBufferTarget::ShaderStorage), 12);
        assert_eq!(driver.count(|c| matches!(c, Call::GetInteger(_))), 7);
    }

    #[test]
    fn old_context_falls_back_without_querying() {
        let mut driver = RecordingDriver::new();
        let limits = Limits::query(&mut driver, GlVersion::new(3, 0));
        assert_eq!(limits.transform_feedback_buffers, 4);
        assert_eq!(limits.uniform_buffer_bindings, 1);
        assert_eq!(limits.atomic_counter_buffer_bindings, 1);
        assert_eq!(limits.shader_storage_buffer_bindings, 1);
        assert!(
            !driver
                .calls()
                .contains(&Call::GetInteger(gl::MAX_UNIFORM_BUFFER_BINDINGS))
        );
    }

    #[test]
    fn version_boundaries_are_inclusive() {
        assert!(GlVersion::new(3, 1).at_least(3, 1));
        assert!(!GlVersion::new(3, 0).at_least(3, 1));
        assert!(GlVersion::new(4, 0).at_least(3, 1));
        assert!(!GlVersion::new(2, 1).at_least(3, 0));
    }

    #[test]
    fn zero_reported_limit_still_gets_a_slot() {
        let mut driver = RecordingDriver::new().with_limit(gl::MAX_TEXTURE_IMAGE_UNITS, 0);
        assert_eq!(Limits::query(&mut driver, GlVersion::default()).texture_units, 1);
    }
}
