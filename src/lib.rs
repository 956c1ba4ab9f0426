//! Browser chat relay for the Gemini generation API
//!
//! Serves a small chat UI and forwards text and image input from it to
//! Gemini's `generateContent`, keeping the API credential on the server.

pub mod ai;
pub mod app;
pub mod error;
pub mod models;
pub mod prompt;
pub mod templates;

pub use error::{Error, Result};
