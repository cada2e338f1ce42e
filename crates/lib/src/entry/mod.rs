//! Reader for the editor's `entry_data.ini` files.
//!
//! One file describes one UI component as a flat list of sections, each a
//! widget node, in a Lua-flavored INI dialect:
//!
//! ```ini
//! [#CONFIG]
//! 'Version' = 1
//!
//! ['template']
//! 'NodeType' = '$$.gui_ctrl.UIScene'
//! 'Data' = {
//!     'Game' = {
//!         'Name' = 'main',
//!         'children' = {
//!             1 = 'panel_bg',
//!         },
//!     },
//! }
//! ```
//!
//! Section headers are bracketed (`[#CONFIG]` keeps component settings,
//! `['name']` opens a widget section); fields are `'key' = value` lines whose
//! values may be brace-delimited tables spanning multiple lines. This is a
//! narrow reader for that one schema, not a general INI or Lua parser.

mod parser;

pub use parser::parse;

use crate::value::Table;

/// A parsed `entry_data.ini`: component settings plus widget sections in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryData {
  /// Fields of the `#CONFIG` section, if present.
  pub config: Table,
  /// Widget sections in declaration order.
  pub sections: Vec<Section>,
  /// Fields whose raw value matched none of the recognized literal forms.
  pub warnings: Vec<FieldWarning>,
}

/// One named block of fields, corresponding to one widget node.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
  pub name: String,
  pub fields: Table,
}

/// A field kept as a raw string because classification was ambiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWarning {
  pub section: String,
  /// Dotted path of the field within the section (e.g. `Data.Game.mode`).
  pub field: String,
  pub raw: String,
}

impl EntryData {
  /// Look up a widget section by name.
  pub fn section(&self, name: &str) -> Option<&Section> {
    self.sections.iter().find(|s| s.name == name)
  }

  /// Section names in declaration order.
  pub fn section_names(&self) -> impl Iterator<Item = &str> {
    self.sections.iter().map(|s| s.name.as_str())
  }
}
