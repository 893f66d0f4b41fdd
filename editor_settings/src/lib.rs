//! # Editor Settings
//!
//! The settings table of the text editor widget, built on `settings_core`.
//!
//! ## Design
//!
//! The crate provides:
//! - keys: Property names the editor answers to
//! - enums: Choice domains (brace matching, edge mode, line endings, folding,
//!   whitespace, wrapping, language)
//! - schema: The declared settings and their groups, loaded once per process
//! - EditorProperties: The editor-side configuration target
//!
//! Presentation layers render [`groups`] and call `stage` on the session
//! returned by [`session`].

pub mod enums;
pub mod keys;
pub mod properties;
pub mod schema;

pub use properties::EditorProperties;
pub use schema::{build_schema, groups, schema, session};
