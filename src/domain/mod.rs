//! Core domain types and logic.

pub mod analysis_config;
pub mod candle;
pub mod config_validation;
pub mod currency_strength;
pub mod error;
pub mod indicator;
pub mod indicator_helpers;
pub mod position_size;
pub mod session;
pub mod strategy;
pub mod timeframe;
