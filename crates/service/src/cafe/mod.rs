//! Cafe directory: form parsing, the delete secret, and the service itself.

pub mod api_key;
pub mod form;
pub mod samples;
pub mod service;

pub use api_key::ApiKey;
pub use service::CafeService;
