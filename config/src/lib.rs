//! # Config Crate
//!
//! Centralized configuration constants for the bcg geometry kernel.
//! All magic numbers and tunable parameters are defined here so the mesh
//! generators, the boolean/hull backends and the pass orchestrator agree on
//! tolerances and resolutions.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{BSP_EXACT_EPSILON, BSP_FAST_EPSILON, HIGH_DETAIL_FACETS, LOW_DETAIL_FACETS};
//!
//! // The exact solver classifies against a thinner plane than the fast one
//! assert!(BSP_EXACT_EPSILON < BSP_FAST_EPSILON);
//!
//! // The high-detail pass always tessellates finer than the low-detail pass
//! assert!(HIGH_DETAIL_FACETS > LOW_DETAIL_FACETS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain constants plus one validated snapshot struct
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
