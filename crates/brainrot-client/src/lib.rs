//! Client for the Brainrot video-generation backend.
//!
//! The backend owns everything heavy (file storage, the generation pipeline,
//! job processing). This crate wraps its small HTTP surface under `/api`:
//! health, submit materials, poll job status, cleanup and the video list.
//!
//! [`BackendApi`] is the seam the application core is written against, so
//! flows can run against the real [`ApiClient`] or a scripted backend.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::BackendApi;
pub use client::{ApiClient, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use types::MaterialsUpload;
