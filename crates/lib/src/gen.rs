//! Lua source generation.
//!
//! Output is deterministic: property ordering, table-key ordering, and
//! whitespace are all fixed, so an identical tree always yields byte-identical
//! text and diffs across runs stay meaningful.

use crate::consts::{LOGIC_HEADER, TEMPLATE_HEADER};
use crate::flatten::{Control, flatten};
use crate::value::{Key, Table, Value, fmt_float};
use crate::widget::WidgetTree;

/// The fixed require block present in every generated template.
const BASE_REQUIRES: &[&str] = &[
  "local component = require '@common.base.gui.component'",
  "local bind = component.bind",
  "local call = component.call",
  "local gui_pkg = require '@common.base.gui.package'",
  "local get_text = gui_pkg.get_text() or get_text",
  "local on_player_prop = require '@common.base.gui.on_player_prop'",
  "local on_unit_prop = require '@common.base.gui.on_unit_prop'",
  "local ctrl_wrapper = require '@common.base.gui.ctrl_wrapper'",
];

/// Wrapper-module requires, in the order the editor emits them.
const MODULE_REQUIRES: &[(&str, &str)] = &[
  ("lib_game_options", "@lib_game_options.component"),
  ("smallcard_inventory", "@smallcard_inventory.component"),
  ("lib_control", "@lib_control.component"),
  ("gameui", "@gameui.component"),
];

/// Properties pinned to the head of every control block.
const PROPS_FIRST: &[&str] = &["CustomString", "__EDIT_TIME"];

/// Properties emitted between `name` and `show` (alphabetical).
const PROPS_AFTER_NAME: &[&str] = &[
  "offset_percent",
  "particle_scale",
  "particle_size",
  "placeholder",
  "play",
  "progress",
  "round_corner_radius",
];

/// Properties emitted between `show` and `z_index` (alphabetical).
const PROPS_AFTER_SHOW: &[&str] = &["text_input", "view_mode"];

/// Fixed key order of the `layout` table.
const LAYOUT_ORDER: &[&str] = &[
  "col_self",
  "grow_height",
  "grow_width",
  "height",
  "position",
  "relative",
  "row_self",
  "width",
];

/// Generate the full `template.lua` text for a widget tree.
pub fn generate(tree: &WidgetTree) -> String {
  render(&flatten(tree))
}

/// Render an already-flattened control list to `template.lua` text.
pub fn render(controls: &[Control]) -> String {
  let mut lines: Vec<String> = Vec::new();

  lines.push(TEMPLATE_HEADER.to_string());
  lines.extend(BASE_REQUIRES.iter().map(|s| s.to_string()));
  lines.push(String::new());
  lines.push(String::new());
  for (var, module) in MODULE_REQUIRES {
    lines.push(format!("local {} = require '{}'", var, module));
  }
  lines.push(String::new());

  lines.push("return gui_pkg.page_template {".to_string());
  lines.push("    flatten_template = {".to_string());
  for control in controls {
    lines.push(render_control(control));
  }
  lines.push("    }".to_string());
  lines.push("}".to_string());

  lines.join("\n")
}

/// The static boilerplate logic file created beside a new template.
pub fn logic_boilerplate(name: &str) -> String {
  format!(
    r#"{header}
local pkg = require '@common.base.gui.package'
local component = require '@common.base.gui.component'

return component '{name}' {{
    pkg.require_template(lib_env, '{name}'),

    event = {{

    }},

    prop = {{

    }},

    method = {{

    }},

    state = {{

    }},
}}
"#,
    header = LOGIC_HEADER,
    name = name
  )
}

fn render_control(control: &Control) -> String {
  let mut lines = Vec::new();
  lines.push(format!("        {}.{} {{", control.wrapper, control.ctrl_type));

  for key in ordered_prop_keys(&control.props) {
    let value = control.props.get(&key).expect("key taken from props");
    if let Some(line) = render_prop(&key, value, 12) {
      lines.push(line);
    }
  }

  lines.push(format!("        }},{},", control.depth));
  lines.join("\n")
}

/// The fixed property order of a control block: pinned head keys, ordinary
/// keys alphabetically, then `name`, the after-name group, `show`, the
/// after-show group, and `z_index` last.
fn ordered_prop_keys(props: &Table) -> Vec<String> {
  let mut ordered = Vec::new();

  for key in PROPS_FIRST {
    if props.get(key).is_some() {
      ordered.push(key.to_string());
    }
  }

  let mut normal: Vec<String> = props
    .iter()
    .filter_map(|(k, _)| match k {
      Key::Name(n) => Some(n.clone()),
      Key::Index(_) => None,
    })
    .filter(|n| {
      n != "name"
        && n != "show"
        && n != "z_index"
        && !PROPS_FIRST.contains(&n.as_str())
        && !PROPS_AFTER_NAME.contains(&n.as_str())
        && !PROPS_AFTER_SHOW.contains(&n.as_str())
    })
    .collect();
  normal.sort();
  ordered.extend(normal);

  if props.get("name").is_some() {
    ordered.push("name".to_string());
  }
  for key in PROPS_AFTER_NAME {
    if props.get(key).is_some() {
      ordered.push(key.to_string());
    }
  }
  if props.get("show").is_some() {
    ordered.push("show".to_string());
  }
  for key in PROPS_AFTER_SHOW {
    if props.get(key).is_some() {
      ordered.push(key.to_string());
    }
  }
  if props.get("z_index").is_some() {
    ordered.push("z_index".to_string());
  }

  ordered
}

/// Render one property line (or block, for tables). Nil renders nothing.
fn render_prop(key: &str, value: &Value, indent: usize) -> Option<String> {
  let pad = " ".repeat(indent);
  match value {
    Value::Nil => None,
    Value::Bool(b) => Some(format!("{}{} = {},", pad, key, b)),
    Value::Str(s) => Some(format!("{}{} = '{}',", pad, key, s)),
    Value::Int(i) => Some(format!("{}{} = {},", pad, key, i)),
    Value::Float(f) => Some(format!("{}{} = {},", pad, key, fmt_float(*f))),
    Value::Table(t) if t.is_empty() => Some(format!("{}{} = {{}},", pad, key)),
    Value::Table(t) => Some(render_table(key, t, indent)),
  }
}

/// Render a non-empty table block with stable key ordering: `layout` uses its
/// fixed key order; everywhere else string keys sort alphabetically ahead of
/// numeric keys.
fn render_table(key: &str, table: &Table, indent: usize) -> String {
  let pad = " ".repeat(indent);
  let inner = " ".repeat(indent + 4);
  let mut lines = vec![format!("{}{} = {{", pad, key)];

  for entry_key in ordered_table_keys(key, table) {
    let value = table
      .iter()
      .find(|(k, _)| *k == entry_key)
      .map(|(_, v)| v)
      .expect("key taken from table");

    match (&entry_key, value) {
      (Key::Index(i), Value::Bool(b)) => lines.push(format!("{}[{}] = {},", inner, i, b)),
      (Key::Index(i), Value::Int(n)) => lines.push(format!("{}[{}] = {},", inner, i, n)),
      (Key::Index(i), Value::Float(f)) => {
        lines.push(format!("{}[{}] = {},", inner, i, fmt_float(*f)));
      }
      (Key::Index(i), Value::Str(s)) => lines.push(format!("{}[{}] = '{}',", inner, i, s)),
      (Key::Index(_), _) => {}
      (Key::Name(n), Value::Bool(b)) => lines.push(format!("{}{} = {},", inner, n, b)),
      (Key::Name(n), Value::Int(v)) => lines.push(format!("{}{} = {},", inner, n, v)),
      (Key::Name(n), Value::Float(f)) => {
        lines.push(format!("{}{} = {},", inner, n, fmt_float(*f)));
      }
      (Key::Name(n), Value::Str(s)) => lines.push(format!("{}{} = '{}',", inner, n, s)),
      (Key::Name(n), Value::Table(t)) if t.is_empty() => {
        lines.push(format!("{}{} = {{}},", inner, n));
      }
      (Key::Name(n), Value::Table(t)) => lines.push(render_table(n, t, indent + 4)),
      (Key::Name(_), Value::Nil) => {}
    }
  }

  lines.push(format!("{}}},", pad));
  lines.join("\n")
}

fn ordered_table_keys(table_key: &str, table: &Table) -> Vec<Key> {
  let mut keys: Vec<Key> = table.iter().map(|(k, _)| k.clone()).collect();

  if table_key == "layout" {
    let mut ordered = Vec::new();
    for name in LAYOUT_ORDER {
      if let Some(k) = keys
        .iter()
        .find(|k| matches!(k, Key::Name(n) if n.as_str() == *name))
      {
        ordered.push(k.clone());
      }
    }
    let mut rest: Vec<Key> = keys
      .iter()
      .filter(|k| !ordered.contains(k))
      .cloned()
      .collect();
    rest.sort();
    ordered.extend(rest);
    return ordered;
  }

  // Key derives Ord with names ahead of indices.
  keys.sort();
  keys
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entry;
  use crate::widget::build_tree;

  const SAMPLE: &str = r#"
['template']
'NodeType' = '$$.gui_ctrl.UIScene'
'Data' = {
    'Game' = {
        'Name' = 'main',
        'children' = {
            1 = 'panel_bg',
            2 = 'btn_close',
        },
    },
}

['panel_bg']
'NodeType' = '$$.gui_ctrl.panel'
'Data' = {
    'Game' = {
        'Name' = 'panel_bg',
        'layout' = {
            'width' = 100,
            'height' = 50.5,
        },
        'z_index' = 1,
    },
}

['btn_close']
'NodeType' = '$$.gui_ctrl.button'
'Data' = {
    'Game' = {
        'Name' = 'btn_close',
        'visible' = 1,
        'text' = 'X',
    },
}
"#;

  const EXPECTED: &str = "\
-- THIS FILE IS AUTO-GENERATED, WOULD BE OVERWRITTEN BY GUI-EDITOR
local component = require '@common.base.gui.component'
local bind = component.bind
local call = component.call
local gui_pkg = require '@common.base.gui.package'
local get_text = gui_pkg.get_text() or get_text
local on_player_prop = require '@common.base.gui.on_player_prop'
local on_unit_prop = require '@common.base.gui.on_unit_prop'
local ctrl_wrapper = require '@common.base.gui.ctrl_wrapper'


local lib_game_options = require '@lib_game_options.component'
local smallcard_inventory = require '@smallcard_inventory.component'
local lib_control = require '@lib_control.component'
local gameui = require '@gameui.component'

return gui_pkg.page_template {
    flatten_template = {
        ctrl_wrapper.UIScene {
            disabled = false,
            name = 'main',
            show = true,
        },0,
        ctrl_wrapper.panel {
            disabled = false,
            layout = {
                height = 50.5,
                width = 100,
            },
            name = 'panel_bg',
            show = true,
            z_index = 1,
        },1,
        ctrl_wrapper.button {
            text = 'X',
            visible = 1,
            name = 'btn_close',
            show = true,
        },1,
    }
}";

  fn sample_tree() -> WidgetTree {
    build_tree(&entry::parse(SAMPLE).unwrap()).unwrap()
  }

  #[test]
  fn generates_expected_text() {
    assert_eq!(generate(&sample_tree()), EXPECTED);
  }

  #[test]
  fn generation_is_deterministic() {
    let tree = sample_tree();
    assert_eq!(generate(&tree), generate(&tree));
  }

  #[test]
  fn integer_flags_stay_integers() {
    let text = generate(&sample_tree());
    assert!(text.contains("visible = 1,"));
    assert!(!text.contains("visible = true"));
  }

  #[test]
  fn floats_keep_decimal_point() {
    let text = generate(&sample_tree());
    assert!(text.contains("height = 50.5,"));
  }

  #[test]
  fn empty_table_rendered_inline() {
    let tree = build_tree(
      &entry::parse("['template']\n'NodeType' = '$$.gui_ctrl.panel'\n'Data' = {\n    'Game' = {\n        'color' = {},\n    },\n}\n").unwrap(),
    )
    .unwrap();
    assert!(generate(&tree).contains("            color = {},"));
  }

  #[test]
  fn layout_keys_follow_fixed_order() {
    let text = r#"
['template']
'NodeType' = '$$.gui_ctrl.panel'
'Data' = {
    'Game' = {
        'layout' = {
            'width' = 10,
            'col_self' = 'center',
            'position' = 'absolute',
            'height' = 20,
            'extra' = 1,
        },
    },
}
"#;
    let tree = build_tree(&entry::parse(text).unwrap()).unwrap();
    let lua = generate(&tree);
    let col = lua.find("col_self").unwrap();
    let height = lua.find("height").unwrap();
    let position = lua.find("position").unwrap();
    let width = lua.find("width").unwrap();
    let extra = lua.find("extra").unwrap();
    assert!(col < height && height < position && position < width && width < extra);
  }

  #[test]
  fn special_props_ordered_around_name_and_show() {
    let text = r#"
['template']
'NodeType' = '$$.gui_ctrl.input'
'Data' = {
    'Game' = {
        'Name' = 'field',
        'z_index' = 9,
        'placeholder' = 'type here',
        'text_input' = true,
        'CustomString' = 'tag',
        'font_size' = 14,
    },
}
"#;
    let tree = build_tree(&entry::parse(text).unwrap()).unwrap();
    let lua = generate(&tree);
    let custom = lua.find("CustomString = 'tag'").unwrap();
    let font = lua.find("font_size = 14").unwrap();
    let name = lua.find("name = 'field'").unwrap();
    let placeholder = lua.find("placeholder = 'type here'").unwrap();
    let show = lua.find("show = true").unwrap();
    let text_input = lua.find("text_input = true").unwrap();
    let z_index = lua.find("z_index = 9").unwrap();
    assert!(custom < font && font < name && name < placeholder);
    assert!(placeholder < show && show < text_input && text_input < z_index);
  }

  #[test]
  fn logic_boilerplate_names_component() {
    let lua = logic_boilerplate("ChatMainView");
    assert!(lua.starts_with("-- THIS FILE IS AUTO-GENERATED"));
    assert!(lua.contains("return component 'ChatMainView' {"));
    assert!(lua.contains("pkg.require_template(lib_env, 'ChatMainView'),"));
  }
}
