//! Core library for view2lua: converts a game editor's `entry_data.ini` UI
//! descriptions into the Lua page templates the game runtime consumes, and
//! validates generated output against existing files.
//!
//! The pipeline is linear: [`entry`] parses the editor config, [`widget`]
//! rebuilds the section hierarchy, [`flatten`] turns it into the runtime's
//! depth-annotated control list, and [`gen`] renders deterministic Lua text.
//! For validation, [`template`] reads a previously generated file back and
//! [`compare`] diffs the two control lists structurally, tolerating cosmetic
//! differences while catching semantic drift.

pub mod compare;
pub mod consts;
pub mod convert;
pub mod entry;
pub mod error;
pub mod flatten;
pub mod r#gen;
pub mod project;
pub mod template;
pub mod value;
pub mod widget;

pub use error::{Error, Result};
