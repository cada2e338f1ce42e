//! Flattening of the widget tree into the control list the runtime consumes.
//!
//! The generated `flatten_template` is not nested: each control appears once,
//! depth-first, annotated with its depth number. Both the generator and the
//! comparator work on this flattened form.

use crate::value::{Key, Table, Value};
use crate::widget::{WidgetNode, WidgetTree};

/// Node-type prefix → wrapper module variable.
pub const WRAPPER_MAP: &[(&str, &str)] = &[
  ("$$.gui_ctrl", "ctrl_wrapper"),
  ("$$gameui.gui_ctrl", "gameui"),
  ("$$lib_control.gui_ctrl", "lib_control"),
  ("$$smallcard_inventory.gui_ctrl", "smallcard_inventory"),
  ("$$smallcard_mail.gui_ctrl", "smallcard_mail"),
];

/// `Data.Game` source key → output property key.
const PROP_MAP: &[(&str, &str)] = &[
  ("Name", "name"),
  ("layout", "layout"),
  ("color", "color"),
  ("z_index", "z_index"),
  ("show", "show"),
  ("visible", "visible"),
  ("disabled", "disabled"),
  ("image", "image"),
  ("text", "text"),
  ("font", "font"),
  ("font_size", "font_size"),
  ("font_color", "font_color"),
  ("font_family", "font_family"),
  ("placeholder", "placeholder"),
  ("text_input", "text_input"),
  ("progress", "progress"),
  ("round_corner_radius", "round_corner_radius"),
  ("loop", "loop"),
  ("play", "play"),
  ("view_mode", "view_mode"),
  ("particle_size", "particle_size"),
  ("particle_scale", "particle_scale"),
  ("offset_percent", "offset_percent"),
  ("auto_scale", "auto_scale"),
  ("RenderPath", "RenderPath"),
  ("UseShadow", "UseShadow"),
  ("CustomString", "CustomString"),
];

/// Control types that carry a default `disabled = false`.
const DISABLED_DEFAULT_TYPES: &[&str] = &["panel", "UIScene", "input_paste"];

/// One emitted control: wrapper call, properties, and its depth annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
  pub wrapper: String,
  pub ctrl_type: String,
  pub props: Table,
  pub depth: i64,
}

impl Control {
  /// The control's `name` property, used to pair controls across trees.
  pub fn name(&self) -> Option<&str> {
    self.props.get_str("name")
  }
}

/// Flatten a widget tree depth-first into its control list.
///
/// Nodes with no recognized node type contribute no control of their own but
/// their children are still visited. Depth numbering follows the editor: the
/// root sits at 0, and a node's children sit at `depth + 2` when the node has
/// siblings and is not the root, otherwise at `depth + 1`.
pub fn flatten(tree: &WidgetTree) -> Vec<Control> {
  let mut controls = Vec::new();
  flatten_node(&tree.root, 0, false, &mut controls);
  controls
}

fn flatten_node(node: &WidgetNode, depth: i64, has_siblings: bool, out: &mut Vec<Control>) {
  if let Some(control) = convert_node(node, depth) {
    out.push(control);
  }

  let child_has_siblings = node.children.len() > 1;
  for child in &node.children {
    let child_depth = if has_siblings && depth > 0 {
      depth + 2
    } else {
      depth + 1
    };
    flatten_node(child, child_depth, child_has_siblings, out);
  }
}

fn convert_node(node: &WidgetNode, depth: i64) -> Option<Control> {
  if node.node_type.is_empty() {
    return None;
  }
  let (wrapper, ctrl_type) = parse_node_type(&node.node_type)?;
  let props = build_props(&node.game, &node.editor, &ctrl_type);
  Some(Control {
    wrapper,
    ctrl_type,
    props,
    depth,
  })
}

/// Split an editor node type into its wrapper module and control type.
///
/// Exact prefixes from [`WRAPPER_MAP`] are tried first; other forms carrying
/// `.gui_ctrl.` fall back to a prefix match on the part before it.
pub fn parse_node_type(node_type: &str) -> Option<(String, String)> {
  for (prefix, wrapper) in WRAPPER_MAP {
    if let Some(rest) = node_type.strip_prefix(prefix) {
      if let Some(ctrl_type) = rest.strip_prefix('.') {
        return Some((wrapper.to_string(), ctrl_type.to_string()));
      }
    }
  }

  if let Some((head, ctrl_type)) = node_type.split_once(".gui_ctrl.") {
    for (prefix, wrapper) in WRAPPER_MAP {
      let bare = prefix.trim_end_matches(".gui_ctrl");
      if head.starts_with(bare) {
        return Some((wrapper.to_string(), ctrl_type.to_string()));
      }
    }
  }

  None
}

/// Assemble a control's properties from its game and editor data.
fn build_props(game: &Table, editor: &Table, ctrl_type: &str) -> Table {
  let mut props = Table::new();

  if let Some(edit_time) = editor.get("__EDIT_TIME") {
    props.push(Key::Name("__EDIT_TIME".to_string()), edit_time.clone());
  }

  for (src, dst) in PROP_MAP {
    match game.get(src) {
      Some(Value::Nil) | None => {}
      Some(value) => props.push(Key::Name(dst.to_string()), value.clone()),
    }
  }

  if props.get("show").is_none() {
    props.push(Key::Name("show".to_string()), Value::Bool(true));
  }

  if DISABLED_DEFAULT_TYPES.contains(&ctrl_type) && props.get("disabled").is_none() {
    props.push(Key::Name("disabled".to_string()), Value::Bool(false));
  }

  props
}
