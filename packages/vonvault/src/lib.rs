#![no_std]

pub mod config;
pub mod constants;
pub mod error;
pub mod fees;
pub mod portfolio;
pub mod stake;
pub mod tiers;
pub mod ttl;
pub mod types;
pub mod utils;
pub mod yields;

pub use config::EngineConfig;
pub use error::EngineError;
