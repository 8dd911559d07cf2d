//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `reelquest-server`.
//! The handlers are split into logical sub-modules based on their functionality.

pub mod general;
pub mod questions;
pub mod search;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use general::*;
pub use questions::*;
pub use search::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
