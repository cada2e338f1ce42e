//! Widget tree reconstruction.
//!
//! Sections are flat in the entry data; the hierarchy lives in each section's
//! `Data.Game.children` table, a numeric-index map naming child sections.
//! The root is the section named `template` (or `root`).

use tracing::warn;

use crate::consts::ROOT_SECTIONS;
use crate::entry::EntryData;
use crate::error::{Error, Result};
use crate::value::{Key, Table, Value};

/// One node of the reconstructed hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetNode {
  pub name: String,
  /// Editor node type, e.g. `$$.gui_ctrl.panel`. May be empty.
  pub node_type: String,
  /// The section's `Data.Game` table.
  pub game: Table,
  /// The section's `Data.Editor` table.
  pub editor: Table,
  pub children: Vec<WidgetNode>,
}

/// The single-rooted hierarchy of a component's sections.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetTree {
  pub root: WidgetNode,
}

/// Build the widget tree from parsed entry data.
///
/// Children are ordered by their numeric index in the `children` table; `#NIL`
/// entries are skipped, and names that resolve to no section are dropped with
/// a warning. Fails with [`Error::MissingRoot`] when no root section exists
/// and [`Error::DuplicateChild`] when a section is claimed by two parents
/// (which would otherwise duplicate a subtree).
pub fn build_tree(entry: &EntryData) -> Result<WidgetTree> {
  let root_name = entry
    .section_names()
    .find(|name| ROOT_SECTIONS.contains(name))
    .ok_or(Error::MissingRoot)?
    .to_string();

  let mut claimed: Vec<String> = vec![root_name.clone()];
  let root = build_node(entry, &root_name, &mut claimed)?;
  Ok(WidgetTree { root })
}

fn build_node(entry: &EntryData, name: &str, claimed: &mut Vec<String>) -> Result<WidgetNode> {
  let section = entry.section(name).expect("section resolved by caller");

  let data = section.fields.get_table("Data");
  let game = data
    .and_then(|d| d.get_table("Game"))
    .cloned()
    .unwrap_or_default();
  let editor = data
    .and_then(|d| d.get_table("Editor"))
    .cloned()
    .unwrap_or_default();
  let node_type = section
    .fields
    .get_str("NodeType")
    .unwrap_or_default()
    .to_string();

  let mut children = Vec::new();
  for child_name in child_names(&game) {
    if entry.section(&child_name).is_none() {
      warn!(section = %name, child = %child_name, "children entry names a missing section");
      continue;
    }
    if claimed.iter().any(|c| c == &child_name) {
      return Err(Error::DuplicateChild(child_name));
    }
    claimed.push(child_name.clone());
    children.push(build_node(entry, &child_name, claimed)?);
  }

  Ok(WidgetNode {
    name: name.to_string(),
    node_type,
    game,
    editor,
    children,
  })
}

/// Extract child section names from a `Game` table, ordered by numeric index.
fn child_names(game: &Table) -> Vec<String> {
  let Some(children) = game.get_table("children") else {
    return Vec::new();
  };

  let mut indexed: Vec<(i64, String)> = children
    .iter()
    .filter_map(|(key, value)| {
      let index = match key {
        Key::Index(i) => *i,
        Key::Name(n) => n.parse().unwrap_or(0),
      };
      match value {
        Value::Str(name) => Some((index, name.clone())),
        // `#NIL` marks a removed child slot.
        _ => None,
      }
    })
    .collect();

  indexed.sort_by_key(|(index, _)| *index);
  indexed.into_iter().map(|(_, name)| name).collect()
}
