//! Print-template block model and renderer for surgery notes.
//!
//! A template is a versioned tree of typed blocks
//! ([`domain::structure::TemplateStructure`]). [`render::render_template`]
//! evaluates that tree against a [`domain::context::TemplateContext`] and
//! returns an HTML fragment for the live preview or the print pipeline.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod errors;
#[cfg(feature = "data")]
pub mod render;

#[cfg(feature = "print")]
pub mod document;
#[cfg(feature = "print")]
pub mod models;
#[cfg(feature = "print")]
pub mod repository;
#[cfg(feature = "print")]
pub mod services;

#[cfg(feature = "data")]
pub use render::{render_template, render_template_with};
