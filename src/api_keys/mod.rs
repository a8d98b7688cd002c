//! Per-user exchange credentials.

mod model;
mod repository;
mod service;

pub use model::{ApiKey, ApiKeyDefaults, ApiKeyLookup, NewApiKey};
pub use repository::ApiKeyRepository;
pub use service::ApiKeyService;
