//! # Scene Errors
//!
//! Error types for scene construction and passes.

use bcg_mesh::MeshError;
use thiserror::Error;

/// Errors that can occur while building or rendering a scene.
///
/// Contract violations (`NoActiveGraph`, `ScopeUnderflow`,
/// `UnbalancedScopes`, `InvalidArgument`) are authoring-script bugs. Host
/// failures arrive as `Mesh`. None of them are retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SceneError {
    /// The scene graph was already finished.
    #[error("No active scene graph")]
    NoActiveGraph,

    /// `end_group` without a matching `begin_group`.
    #[error("Scope underflow: end_group without matching begin_group")]
    ScopeUnderflow,

    /// Scopes still open when the graph was finished.
    #[error("Unbalanced scopes: {open} scope(s) still open")]
    UnbalancedScopes { open: usize },

    /// Invalid argument passed to an authoring helper.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Mesh generation or host capability failure.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// A pass aborted.
    #[error("Pass {pass} failed: {source}")]
    PassFailed {
        pass: String,
        #[source]
        source: Box<SceneError>,
    },
}

impl SceneError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Strips `PassFailed` wrappers.
    pub fn root_cause(&self) -> &SceneError {
        match self {
            SceneError::PassFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SceneError::UnbalancedScopes { open: 2 };
        assert!(err.to_string().contains("2 scope(s)"));
    }

    #[test]
    fn test_mesh_error_is_transparent() {
        let err: SceneError = MeshError::hull_failed("coplanar").into();
        assert_eq!(err.to_string(), "Convex hull failed: coplanar");
    }

    #[test]
    fn test_pass_failed_chain() {
        use std::error::Error;

        let err = SceneError::PassFailed {
            pass: "Part.Hi".to_string(),
            source: Box::new(SceneError::ScopeUnderflow),
        };
        assert!(err.to_string().starts_with("Pass Part.Hi failed"));
        assert!(err.source().is_some());
        assert_eq!(err.root_cause(), &SceneError::ScopeUnderflow);
    }
}
