//! Resume builder: profile import from an uploaded PDF, markdown generation
//! from a structured profile, and rendering to a downloadable PDF.

pub mod builder;
pub mod handlers;
pub mod prompts;
