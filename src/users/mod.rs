//! User identity records.

mod model;
mod repository;
mod service;

pub use model::{NewUser, User, UserDefaults, UserLookup};
pub use repository::UserRepository;
pub use service::UserService;
