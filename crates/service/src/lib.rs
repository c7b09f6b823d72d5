//! Service layer over the `models` entities.
//! - `record::RecordStore` is the one generic repository; each entity service wraps it.
//! - Validation runs here before the store is touched.
//! - All operations return `errors::ServiceError`.

pub mod errors;
pub mod record;
pub mod video_service;
pub mod task_service;
pub mod cafe;
pub mod people;
#[cfg(test)]
pub mod test_support;
