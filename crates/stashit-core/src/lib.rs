//! Core domain + application logic for the StashIt relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram / object
//! storage / the StashIt API live behind ports (traits) implemented in
//! adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod ports;

pub use errors::{Error, Result};
