//! # Configuration Constants
//!
//! Centralized constants for the geometry kernel. Tessellation parameters,
//! precision values and output naming are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Facet counts for primitives and per-pass presets
//! - **Decomposition**: Convex profile decomposition nudge
//! - **Naming**: Output artifact suffixes
//! - **Limits**: Stack sizes for deep recursion

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Minimum face area below which a face is considered degenerate.
///
/// Used by mesh validation to reject zero-area faces produced by collapsed
/// rings or coincident profile points.
pub const AREA_EPSILON: f64 = 1e-12;

/// Plane classification tolerance for the fast boolean solver.
///
/// Points closer than this to a BSP splitting plane are treated as coplanar.
/// Coarse enough to absorb rounding noise from transformed meshes.
pub const BSP_FAST_EPSILON: f64 = 1e-5;

/// Plane classification tolerance for the exact boolean solver.
///
/// Much tighter than [`BSP_FAST_EPSILON`]; only bit-identical or nearly
/// bit-identical geometry is merged onto a plane.
pub const BSP_EXACT_EPSILON: f64 = 1e-9;

/// Distance a point must lie outside a hull face to extend the hull.
pub const HULL_EPSILON: f64 = 1e-9;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Minimum number of facets around a surface of revolution.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_FACETS;
///
/// let requested = 2;
/// assert!(requested < MIN_FACETS); // rejected by the generators
/// ```
pub const MIN_FACETS: u32 = 3;

/// Facet count supplied to scripts during the low-detail pass.
pub const LOW_DETAIL_FACETS: u32 = 16;

/// Sphere latitude bands supplied to scripts during the low-detail pass.
pub const LOW_DETAIL_STACKS: u32 = 8;

/// Facet count supplied to scripts during the high-detail pass.
pub const HIGH_DETAIL_FACETS: u32 = 64;

/// Sphere latitude bands supplied to scripts during the high-detail pass.
pub const HIGH_DETAIL_STACKS: u32 = 32;

// =============================================================================
// DECOMPOSITION CONSTANTS
// =============================================================================

/// Default z offset of the synthetic points inserted at group boundaries by
/// the convex profile decomposition.
///
/// The nudge makes neighbouring convex groups overlap slightly so their union
/// has no coplanar seams. It has no derivation beyond being small relative to
/// typical model units; builds may override it.
///
/// # Example
///
/// ```rust
/// use config::constants::{BSP_FAST_EPSILON, DEFAULT_DECOMPOSE_EPSILON};
///
/// assert!(DEFAULT_DECOMPOSE_EPSILON > BSP_FAST_EPSILON);
/// ```
pub const DEFAULT_DECOMPOSE_EPSILON: f64 = 1e-3;

// =============================================================================
// NAMING CONSTANTS
// =============================================================================

/// Suffix appended to an object name for the low-detail pass output.
pub const LOW_DETAIL_SUFFIX: &str = ".Lo";

/// Suffix appended to an object name for the high-detail pass output.
pub const HIGH_DETAIL_SUFFIX: &str = ".Hi";

/// Suffix appended to a pass output name for debug snapshots.
pub const DEBUG_SUFFIX: &str = ".Debug";

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Remaining stack below which recursive tree walks grow the stack.
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Bytes of stack space allocated when growing recursion limits using the
/// `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_STACK_SIZE_BYTES > STACKER_RED_ZONE_BYTES);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 4 * 1024 * 1024;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of kernel-wide settings that can be shared between
/// crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.high_detail_facets > config.low_detail_facets);
/// assert!(config.decompose_epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Nudge distance used by the convex profile decomposition.
    pub decompose_epsilon: f64,
    /// Facet count supplied to scripts during the low-detail pass.
    pub low_detail_facets: u32,
    /// Facet count supplied to scripts during the high-detail pass.
    pub high_detail_facets: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-2, 12, 48).expect("valid config");
    /// assert_eq!(cfg.low_detail_facets, 12);
    /// ```
    pub fn new(
        decompose_epsilon: f64,
        low_detail_facets: u32,
        high_detail_facets: u32,
    ) -> Result<Self, ConfigError> {
        if decompose_epsilon.is_nan() || decompose_epsilon <= 0.0 {
            return Err(ConfigError::InvalidDecomposeEpsilon(decompose_epsilon));
        }
        for facets in [low_detail_facets, high_detail_facets] {
            if facets < MIN_FACETS {
                return Err(ConfigError::InvalidFacets(facets));
            }
        }
        Ok(Self {
            decompose_epsilon,
            low_detail_facets,
            high_detail_facets,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            decompose_epsilon: DEFAULT_DECOMPOSE_EPSILON,
            low_detail_facets: LOW_DETAIL_FACETS,
            high_detail_facets: HIGH_DETAIL_FACETS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the decomposition nudge is zero or negative.
    InvalidDecomposeEpsilon(f64),
    /// Raised when the requested facet count is too small to form a polygon.
    InvalidFacets(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDecomposeEpsilon(value) => {
                write!(f, "decompose_epsilon must be positive: {value}")
            }
            ConfigError::InvalidFacets(value) => {
                write!(f, "pass facets must be >= {MIN_FACETS}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
