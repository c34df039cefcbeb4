//! Configuration Module
//!
//! Client settings and file/environment loading.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{ClientConfig, API_KEY_ENV};
