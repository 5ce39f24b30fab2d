//! Historical 6/45 lottery results scraped from a public results site, with
//! naive per-number frequency statistics, served over HTTP.

pub mod aggregator;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parse;
pub mod remote;
pub mod server;
pub mod wire;

pub use config::Config;
pub use error::{ApiError, FetchError};
pub use model::{DrawResult, FrequencyTable};
pub use remote::DrawSource;
