/// Header comment marking a generated template as editor-owned.
pub const TEMPLATE_HEADER: &str = "-- THIS FILE IS AUTO-GENERATED, WOULD BE OVERWRITTEN BY GUI-EDITOR";

/// Header comment for the sibling logic file, which the editor may regenerate.
pub const LOGIC_HEADER: &str = "-- THIS FILE IS AUTO-GENERATED, MIGHT BE OVERWRITTEN BY GUI-EDITOR";

/// Name of the per-component config file under the editor directory.
pub const ENTRY_DATA_FILE: &str = "entry_data.ini";

/// Name of the generated page template file.
pub const TEMPLATE_FILE: &str = "template.lua";

/// Name of the sibling logic file created from boilerplate when absent.
pub const LOGIC_FILE: &str = "component.lua";

/// Extension given to the backup copy of an overwritten template.
pub const BACKUP_EXTENSION: &str = "lua.bak";

/// Section holding component-level settings rather than a widget node.
pub const CONFIG_SECTION: &str = "#CONFIG";

/// Section names that mark the root of the widget tree.
pub const ROOT_SECTIONS: &[&str] = &["template", "root"];

/// Directory-name prefix reserved for internal components, excluded from conversion.
pub const INTERNAL_PREFIX: &str = "$$";
