//! lbm path engine library
//!
//! Computes output file paths from brace templates and canonicalizes paths
//! across slash-rooted and drive-lettered conventions, purely on strings.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod vars;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use engine::Engine;
pub use engine::output::{OutputArgs, derive_basename, resolve_output_path};
pub use engine::path::{PathStyle, canonicalize_path};
pub use engine::template::{DEFAULT_MAX_DEPTH, Interpolator, Modifiers, interpolate};
pub use error::{LbmError, Result};
pub use vars::VariableTable;
