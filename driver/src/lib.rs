use crate::error::DriverError;

pub mod config;
pub mod database;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod logging;

pub(crate) fn env(key: &str) -> Result<String, DriverError> {
    dotenvy::var(key).map_err(DriverError::from)
}
