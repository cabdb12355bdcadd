//! Block model, render context and stored template records.

pub mod block;
pub mod context;
pub mod print_template;
pub mod structure;
pub mod types;
