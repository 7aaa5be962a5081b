//! # Utilities
//!
//! Text helpers shared across the grader:
//! - [`code_normalization`]: comment stripping and the lexical token scan for source code.
//! - [`line_normalization`]: canonical form of program output for comparison.
//! - [`file_loader`]: size-checked JSON loading for on-disk collaborators.

pub mod code_normalization;
pub mod file_loader;
pub mod line_normalization;
