//! Compatibility checking layer
//!
//! A check run resolves the current game version, evaluates the installed
//! mods against it, and renders at most one diagnostic:
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Version   │────▶│  Evaluator  │────▶│ Diagnostics │
//! │  (resolve)  │     │  (verdict)  │     │  (message)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │    State    │
//!                     │ (mods, ver) │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`evaluator`]: the verdict algorithm
//! - [`diagnostics`]: verdict-to-message rendering
//! - [`runner`]: orchestration around persisted state

pub mod diagnostics;
pub mod evaluator;
pub mod runner;

pub use diagnostics::{Diagnostic, Severity};
pub use evaluator::Verdict;
pub use runner::{CompatibilityCheck, Trigger};
