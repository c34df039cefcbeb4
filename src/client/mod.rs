//! Client Module
//!
//! HTTP transport plumbing.

pub mod http;

pub use http::{ByteStream, HttpClient};
