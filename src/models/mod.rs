//! Display-layer models

pub mod display;
