//! Error types for the firefly pool.
//!
//! Only configuration problems are surfaced to callers. Signals coming from
//! the scene are loosely typed, so their parse errors are logged and dropped
//! by [`Simulator::handle_json`](crate::Simulator::handle_json) instead of
//! propagating.

use thiserror::Error;

/// Errors that can occur while building or loading a [`GlowConfig`](crate::GlowConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The pool must hold at least one slot.
    #[error("pool capacity must be at least 1")]
    ZeroCapacity,
    /// A sampling range has `start > end` or a non-finite bound.
    #[error("invalid range for `{field}`: {start}..{end}")]
    InvalidRange {
        field: &'static str,
        start: f32,
        end: f32,
    },
    /// A scalar setting falls outside its allowed domain.
    #[error("`{field}` must be {expected}, got {value}")]
    OutOfBounds {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
    /// A colour string was not `#rrggbb`.
    #[error("invalid hex colour `{0}`, expected #rrggbb")]
    InvalidColor(String),
    /// Failed to read or write a config file.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The config file was not valid JSON for [`GlowConfig`](crate::GlowConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors produced when decoding a [`SceneSignal`](crate::SceneSignal).
#[derive(Debug, Error)]
pub enum SignalError {
    /// Missing fields, wrong types, or unknown signal kind.
    #[error("malformed scene signal: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The click position contained NaN or infinity.
    #[error("scene signal position is not finite: {0:?}")]
    NonFinitePosition([f32; 3]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ConfigError::InvalidRange {
            field: "burst.lifespan",
            start: 5.0,
            end: 2.0,
        };
        assert_eq!(err.to_string(), "invalid range for `burst.lifespan`: 5..2");

        let err = SignalError::NonFinitePosition([f32::NAN, 0.0, 0.0]);
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
