//! Client for the remote generation services.
//!
//! [`ServiceRegistry`] maps (media type, model) pairs to service endpoints,
//! [`InferenceClient`] submits generation jobs over HTTP, and [`payload`]
//! normalizes the loosely-shaped results those services return down to raw
//! media bytes.

pub mod client;
pub mod error;
pub mod payload;
pub mod registry;

pub use client::{GenerationOutput, InferenceClient};
pub use error::InferenceError;
pub use registry::ServiceRegistry;
