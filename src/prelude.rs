//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use dirsig::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{DirsigError, Result};

// Engine
pub use crate::engine::accumulator::Accumulator;
pub use crate::engine::gate::DuplicateGate;
pub use crate::engine::registry::PathRegistry;
pub use crate::engine::{EngineEvent, FingerprintEngine, RunReport};

// Progress
pub use crate::progress::{ProgressBar, format_clock};
