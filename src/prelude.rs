//! Commonly used imports
//!
//! Use `use gbye::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Channels, Controls, Either, Unwind};

// Execution
pub use crate::{run, run_async, run_either};
