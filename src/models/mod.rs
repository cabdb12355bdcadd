//! Models loaded from external sources by the print shell.

pub mod config;
