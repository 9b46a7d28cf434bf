//! Scene signals.
//!
//! Clicks reach the pool as loosely typed events from the host scene. They
//! are decoded here into [`SceneSignal`] values; anything that does not
//! decode is a [`SignalError`] that the simulator logs and drops.
//!
//! Wire form (JSON):
//!
//! ```json
//! { "kind": "object-clicked", "position": [0.4, 1.2, -0.3] }
//! { "kind": "object-clicked", "position": [0.4, 1.2, -0.3], "count": 5 }
//! { "kind": "particle-clicked", "index": 17 }
//! ```

use crate::error::SignalError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An input event for the particle pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SceneSignal {
    /// Something in the scene was clicked at a world position.
    ObjectClicked {
        position: [f32; 3],
        /// Burst size; the configured default when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count: Option<usize>,
    },
    /// The pointer hit the particle in slot `index`.
    ParticleClicked { index: usize },
}

impl SceneSignal {
    /// Convenience constructor for an object click with the default burst size.
    pub fn object_clicked(position: Vec3) -> Self {
        SceneSignal::ObjectClicked {
            position: position.to_array(),
            count: None,
        }
    }

    /// Decode and validate a JSON signal.
    pub fn from_json(json: &str) -> Result<Self, SignalError> {
        let signal: Self = serde_json::from_str(json)?;
        signal.validate()?;
        Ok(signal)
    }

    /// Decode and validate an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SignalError> {
        let signal: Self = serde_json::from_value(value)?;
        signal.validate()?;
        Ok(signal)
    }

    /// Reject signals that decode but cannot be acted on.
    pub(crate) fn validate(&self) -> Result<(), SignalError> {
        if let SceneSignal::ObjectClicked { position, .. } = self {
            if !position.iter().all(|c| c.is_finite()) {
                return Err(SignalError::NonFinitePosition(*position));
            }
        }
        Ok(())
    }
}
