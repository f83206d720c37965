// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Error types.
//!
//! Binding operations never return errors: they either issue a driver call or they
//! don't, and anything the driver objects to lands in its sticky error flag, which
//! is read with [`crate::Context::get_error`].  The errors here cover the remaining
//! failure modes: building a [`crate::TexelBuffer`] from inconsistent input, and
//! asking a typed handle for an operation its target cannot perform.

use crate::sys::gl;
use crate::targets::TextureTarget;

/// Failure to construct a [`crate::TexelBuffer`].
///
/// Returned before any buffer exists; no partially-built buffer is ever observable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TexelBufferError {
    #[error("texel data holds {actual} values but the dimensions require {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("dimensions {width}x{height}x{depth} must all be at least 1")]
    ZeroDimension {
        width: usize,
        height: usize,
        depth: usize,
    },
    #[error("dimensions {width}x{height}x{depth} exceed the addressable size")]
    TooLarge {
        width: usize,
        height: usize,
        depth: usize,
    },
    #[error("row {row} holds {actual} values but the first row holds {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("can't decode png: {0}")]
    Png(String),
}

/// A value read from the driver's sticky error flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DriverError {
    #[error("invalid enum")]
    InvalidEnum,
    #[error("invalid value")]
    InvalidValue,
    #[error("invalid operation")]
    InvalidOperation,
    #[error("stack overflow")]
    StackOverflow,
    #[error("stack underflow")]
    StackUnderflow,
    #[error("out of memory")]
    OutOfMemory,
    #[error("invalid framebuffer operation")]
    InvalidFramebufferOperation,
    #[error("context lost")]
    ContextLost,
    #[error("unknown driver error {0:#06x}")]
    Other(u32),
}

impl DriverError {
    /// Interprets a raw error code.  The "no error" code maps to `None`.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            gl::NO_ERROR => None,
            gl::INVALID_ENUM => Some(DriverError::InvalidEnum),
            gl::INVALID_VALUE => Some(DriverError::InvalidValue),
            gl::INVALID_OPERATION => Some(DriverError::InvalidOperation),
            gl::STACK_OVERFLOW => Some(DriverError::StackOverflow),
            gl::STACK_UNDERFLOW => Some(DriverError::StackUnderflow),
            gl::OUT_OF_MEMORY => Some(DriverError::OutOfMemory),
            gl::INVALID_FRAMEBUFFER_OPERATION => Some(DriverError::InvalidFramebufferOperation),
            gl::CONTEXT_LOST => Some(DriverError::ContextLost),
            other => Some(DriverError::Other(other)),
        }
    }

    pub const fn raw(self) -> u32 {
        match self {
            DriverError::InvalidEnum => gl::INVALID_ENUM,
            DriverError::InvalidValue => gl::INVALID_VALUE,
            DriverError::InvalidOperation => gl::INVALID_OPERATION,
            DriverError::StackOverflow => gl::STACK_OVERFLOW,
            DriverError::StackUnderflow => gl::STACK_UNDERFLOW,
            DriverError::OutOfMemory => gl::OUT_OF_MEMORY,
            DriverError::InvalidFramebufferOperation => gl::INVALID_FRAMEBUFFER_OPERATION,
            DriverError::ContextLost => gl::CONTEXT_LOST,
            DriverError::Other(raw) => raw,
        }
    }
}

/// Crate-wide error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    TexelBuffer(#[from] TexelBufferError),
    #[error("driver reported {0}")]
    Driver(#[from] DriverError),
    #[error("{operation} is not supported for {target:?} textures")]
    Unsupported {
        operation: &'static str,
        target: TextureTarget,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_error_is_none() {
        assert_eq!(DriverError::from_raw(gl::NO_ERROR), None);
        assert_eq!(
            DriverError::from_raw(gl::INVALID_OPERATION),
            Some(DriverError::InvalidOperation)
        );
        assert_eq!(DriverError::from_raw(0x9999), Some(DriverError::Other(0x9999)));
    }

    #[test]
    fn length_mismatch_message_names_both_sizes() {
        let msg = TexelBufferError::LengthMismatch {
            expected: 6,
            actual: 5,
        }
        .to_string();
        assert!(msg.contains('6') && msg.contains('5'), "{msg}");
    }

    #[test]
    fn texel_errors_convert_into_crate_error() {
        let e: Error = TexelBufferError::Png("bad".into()).into();
        assert!(matches!(e, Error::TexelBuffer(TexelBufferError::Png(_))));
    }
}
