//! PDFSign Settings Crate
//!
//! Handles configuration loading, validation and persistence.

pub mod config;
pub mod error;

pub use config::{Config, InteractionSettings, ViewerSettings};
pub use error::{SettingsError, SettingsResult};
