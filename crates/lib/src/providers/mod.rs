//! # Remote Service Providers
//!
//! Thin request/response wrappers around the language-model service and the
//! media catalog service. Neither keeps any state between calls.

pub mod ai;
pub mod catalog;
