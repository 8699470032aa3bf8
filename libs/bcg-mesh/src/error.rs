//! # Mesh Errors
//!
//! Error types for mesh generation and host capabilities.

use thiserror::Error;

/// Errors that can occur during mesh generation or composition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MeshError {
    /// Malformed revolution profile (too few points, decreasing z, ...)
    #[error("Invalid profile: {message}")]
    InvalidProfile { message: String },

    /// Degenerate geometry parameters
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Invalid mesh topology
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Boolean operation failed
    #[error("Boolean operation failed: {message}")]
    BooleanFailed { message: String },

    /// Convex hull computation failed
    #[error("Convex hull failed: {message}")]
    HullFailed { message: String },
}

impl MeshError {
    /// Creates an invalid profile error.
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            message: message.into(),
        }
    }

    /// Creates a convex hull failed error.
    pub fn hull_failed(message: impl Into<String>) -> Self {
        Self::HullFailed {
            message: message.into(),
        }
    }
}
