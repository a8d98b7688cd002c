//! Tradable-venue reference records.

mod model;
mod repository;
mod service;

pub use model::{Exchange, ExchangeDefaults, ExchangeLookup, NewExchange};
pub use repository::ExchangeRepository;
pub use service::ExchangeService;
