//! Append-only log of exchange-reported activity.

mod model;
mod repository;
mod service;

pub use model::{ExchangeData, NewExchangeData};
pub use repository::ExchangeDataRepository;
pub use service::ExchangeDataService;
