//! Configuration schema types for the card stack.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the stack's stock defaults.

mod animation;
mod stack;
mod system;

pub use animation::*;
pub use stack::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CardStackConfig {
    pub stack: StackConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
