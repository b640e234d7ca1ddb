pub mod args;
mod backup;
pub mod chart;
pub mod commands;
mod config;
mod error;
pub mod model;
#[cfg(test)]
mod test;
mod utils;

pub use config::Config;
pub use error::{Error, ErrorType, Result};
