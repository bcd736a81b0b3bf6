//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.menuform/config.toml` unless `--config` points
//! elsewhere. If the default file is missing on first run, a commented-out
//! default is generated so users can discover all options.
//!
//! Besides the look of the form, the file can describe the whole menu: its
//! entries and the attributes of the object that bound entries write into.
//! Without entries the built-in demo menu is used.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::command::Keymap;
use crate::core::entry::{Editable, Entry};
use crate::core::error::FormError;
use crate::core::form::{DEFAULT_FOOTER, MenuForm};
use crate::core::target::{AttributeMap, share};
use crate::core::value::Value;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    /// Attributes of the object bound entries write into.
    #[serde(default)]
    pub target: Option<AttributeMap>,
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FormConfig {
    pub title: Option<String>,
    pub footer: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeysConfig {
    pub up: Option<String>,
    pub down: Option<String>,
    pub select: Option<String>,
    pub quit: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditableKind {
    #[default]
    None,
    Local,
    Bound,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntryConfig {
    pub field: String,
    pub label: String,
    pub value: Option<Value>,
    #[serde(rename = "type")]
    pub expected_type: Option<String>,
    pub visible: Option<bool>,
    pub shortcut: Option<char>,
    #[serde(default)]
    pub editable: EditableKind,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "Main Menu";
pub const DEFAULT_LOG_FILE: &str = "menuform.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub title: String,
    pub footer: String,
    pub keymap: Keymap,
    pub target: AttributeMap,
    pub entries: Vec<EntryConfig>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.menuform/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".menuform").join("config.toml"))
}

/// Load config from `explicit` if given, else from `~/.menuform/config.toml`.
///
/// A missing explicit file is an error. A missing default file is generated
/// commented-out and `MenuConfig::default()` is returned.
pub fn load_config(explicit: Option<&Path>) -> Result<MenuConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MenuConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MenuConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<MenuConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MenuConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# menuform configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [form]
# title = "Main Menu"                # Or set MENUFORM_TITLE env var
# footer = "Press the arrow keys to make a selection."

# [keys]
# up = "u"
# down = "d"
# select = "s"
# quit = "q"

# Attributes of the object that `editable = "bound"` entries write into.
# [target]
# name = "Name of Object"

# [[entries]]
# field = "One"
# label = "Menu Field One"
# value = "input value 1"
# visible = true
# type = "str"                       # "str", "int", "float" or "bool"
# editable = "none"                  # "none", "local" or "bound"

# [[entries]]
# field = "name"
# label = "Example Object field"
# visible = true
# editable = "bound"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_title` is from the `--title` flag (None = not specified).
pub fn resolve(config: &MenuConfig, cli_title: Option<&str>) -> ResolvedConfig {
    // Title: CLI → env → config → default
    let title = cli_title
        .map(|s| s.to_string())
        .or_else(|| std::env::var("MENUFORM_TITLE").ok())
        .or_else(|| config.form.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let footer = config
        .form
        .footer
        .clone()
        .unwrap_or_else(|| DEFAULT_FOOTER.to_string());

    let defaults = Keymap::default();
    let keys = &config.keys;
    let keymap = Keymap {
        up: keys.up.clone().unwrap_or(defaults.up),
        down: keys.down.clone().unwrap_or(defaults.down),
        select: keys.select.clone().unwrap_or(defaults.select),
        quit: keys.quit.clone().unwrap_or(defaults.quit),
    };

    // Entries and target come as a pair: custom entries, or the demo menu.
    let (target, entries) = if config.entries.is_empty() {
        (demo_target(), demo_entries())
    } else {
        (config.target.clone().unwrap_or_default(), config.entries.clone())
    };

    ResolvedConfig {
        title,
        footer,
        keymap,
        target,
        entries,
    }
}

/// Build the form described by `config`.
///
/// Returns the shared target as well so the caller can inspect it after the
/// session ends.
pub fn build_form(
    config: &ResolvedConfig,
) -> Result<(MenuForm, Rc<RefCell<AttributeMap>>), FormError> {
    let target = share(config.target.clone());

    let entries = config
        .entries
        .iter()
        .map(|entry| {
            let editable = match entry.editable {
                EditableKind::None => Editable::None,
                EditableKind::Local => Editable::Local,
                EditableKind::Bound => Editable::Bound(target.clone()),
            };
            let mut builder = Entry::builder(&entry.field, &entry.label)
                .value_visible(entry.visible.unwrap_or(false))
                .expected_type(entry.expected_type.as_deref().unwrap_or("str"))
                .editable(editable);
            if let Some(value) = &entry.value {
                builder = builder.value(value.clone());
            }
            if let Some(key) = entry.shortcut {
                builder = builder.shortcut(key);
            }
            builder.build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let form = MenuForm::new(&config.title, entries)?.with_footer(&config.footer);
    Ok((form, target))
}

fn demo_target() -> AttributeMap {
    AttributeMap::new().with("name", "Name of Object")
}

fn demo_entries() -> Vec<EntryConfig> {
    let row = |field: &str, label: &str, value: Option<&str>, editable| EntryConfig {
        field: field.to_string(),
        label: label.to_string(),
        value: value.map(Value::from),
        expected_type: None,
        visible: Some(true),
        shortcut: None,
        editable,
    };
    vec![
        row("One", "Menu Field One", Some("input value 1"), EditableKind::None),
        row("Two", "Menu Field Two", Some("input value 2"), EditableKind::Local),
        row("Three", "Another Menu Item", Some("input value 3"), EditableKind::None),
        row("name", "Example Object field", None, EditableKind::Bound),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::EditMode;
    use crate::core::target::BoundTarget;

    #[test]
    fn test_default_config_parses() {
        let config = MenuConfig::default();
        assert!(config.entries.is_empty());
        assert!(config.form.title.is_none());
    }

    #[test]
    fn test_resolve_uses_demo_menu_when_empty() {
        let config = MenuConfig {
            form: FormConfig {
                title: Some("Configured".to_string()),
                footer: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("From CLI"));
        assert_eq!(resolved.title, "From CLI");
        assert_eq!(resolved.footer, DEFAULT_FOOTER);
        assert_eq!(resolved.keymap, Keymap::default());
        assert_eq!(resolved.entries.len(), 4);
        assert_eq!(resolved.target.get("name"), Some(Value::from("Name of Object")));
    }

    #[test]
    fn test_demo_menu_builds() {
        let resolved = resolve(&MenuConfig::default(), Some("Demo"));
        let (form, target) = build_form(&resolved).unwrap();
        let modes: Vec<_> = form.entries().iter().map(|e| e.edit_mode()).collect();
        assert_eq!(
            modes,
            vec![EditMode::None, EditMode::Local, EditMode::None, EditMode::Bound]
        );
        assert_eq!(
            form.entry("name").unwrap().input_value(),
            Some(&Value::from("Name of Object"))
        );
        assert_eq!(target.borrow().get("name"), Some(Value::from("Name of Object")));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[form]
title = "Settings"
footer = "j/k to move"

[keys]
up = "k"
down = "j"

[target]
port = 8080
host = "localhost"

[[entries]]
field = "host"
label = "Host"
visible = true
editable = "bound"

[[entries]]
field = "port"
label = "Port"
type = "int"
visible = true
editable = "bound"

[[entries]]
field = "verbose"
label = "Verbose"
type = "bool"
value = false
editable = "local"
shortcut = "v"

[[entries]]
field = "done"
label = "Done"
"#;
        let config: MenuConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.entries.len(), 4);
        assert_eq!(config.entries[2].shortcut, Some('v'));
        assert_eq!(config.entries[3].editable, EditableKind::None);

        let resolved = resolve(&config, Some("Settings"));
        assert_eq!(resolved.keymap.up, "k");
        assert_eq!(resolved.keymap.select, "s");
        assert_eq!(resolved.footer, "j/k to move");

        let (form, _) = build_form(&resolved).unwrap();
        assert_eq!(form.entry("port").unwrap().input_value(), Some(&Value::Integer(8080)));
        assert_eq!(form.entry("verbose").unwrap().shortcut(), Some('v'));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[form]
title = "Only a title"
"#;
        let config: MenuConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.form.title.as_deref(), Some("Only a title"));
        assert!(config.keys.up.is_none());
        assert!(config.target.is_none());
    }

    #[test]
    fn test_bound_entry_missing_from_target_fails_to_build() {
        let toml_str = r#"
[[entries]]
field = "name"
label = "Name"
editable = "bound"
"#;
        let config: MenuConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config, Some("T"));
        assert!(matches!(
            build_form(&resolved),
            Err(FormError::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_type_fails_to_build() {
        let toml_str = r#"
[[entries]]
field = "x"
label = "X"
type = "list"
"#;
        let config: MenuConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config, Some("T"));
        assert!(matches!(
            build_form(&resolved),
            Err(FormError::Configuration(_))
        ));
    }
}
