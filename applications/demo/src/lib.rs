//! Duet Demo - headless page hosting independent players

pub mod config;
pub mod error;
pub mod page;
pub mod script;
