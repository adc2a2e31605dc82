use crate::builder::BuildOptions;
use crate::collapse::CollapseOptions;
use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_DIR: &str = ".xtools/xtree";
pub const DEFAULT_CONFIG_FILENAME: &str = "xtree.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub collapse: CollapseConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(default = "default_true")]
    pub use_gitignore: bool,
    #[serde(default = "default_false")]
    pub show_hidden: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub expand: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CollapseConfig {
    #[serde(default = "default_true")]
    pub repeats: bool,
    #[serde(default = "default_true")]
    pub patterns: bool,
    #[serde(default = "default_true")]
    pub leaves: bool,
    #[serde(default)]
    pub named: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub json_minify: bool,
}

fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_format() -> String {
    "text".to_string()
}

fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            use_gitignore: default_true(),
            show_hidden: default_false(),
        }
    }
}
impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            repeats: default_true(),
            patterns: default_true(),
            leaves: default_true(),
            named: Vec::new(),
        }
    }
}
impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            json_minify: default_true(),
        }
    }
}

impl Config {
    /// `--path`, else `PROJECT_ROOT`, else the working directory; `~` expanded.
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let candidate = match cli_project_root {
            Some(path) => expand_tilde(&path.to_string_lossy()),
            None => match env::var("PROJECT_ROOT") {
                Ok(value) if !value.is_empty() => expand_tilde(&value),
                _ => env::current_dir()?,
            },
        };
        match candidate.canonicalize() {
            Ok(root) => Ok(root),
            Err(source) => Err(AppError::ProjectRoot {
                path: candidate,
                source,
            }),
        }
    }

    /// The config file to load, if any. An explicit file must exist; the
    /// default location is used only when present.
    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&String>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }
        if let Some(given) = cli_config_file {
            let path = expand_tilde(given);
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            log::debug!("Using config file from CLI: {}", path.display());
            return Ok(Some(path));
        }
        let default_path = Self::default_config_path(project_root);
        if default_path.is_file() {
            log::debug!("Using default config file: {}", default_path.display());
            Ok(Some(default_path))
        } else {
            log::debug!("No config file at {}", default_path.display());
            Ok(None)
        }
    }

    pub fn default_config_path(project_root: &Path) -> PathBuf {
        project_root
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILENAME)
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                e
            ))
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Config>(content).map_err(|e| AppError::TomlParse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            max_depth: self.tree.max_depth,
            max_entries: self.tree.max_entries,
            include: self.tree.include.clone(),
            exclude: self.tree.exclude.clone(),
            expand: self.tree.expand.clone(),
            use_gitignore: self.general.use_gitignore,
            show_hidden: self.general.show_hidden,
        }
    }

    pub fn collapse_options(&self) -> CollapseOptions {
        CollapseOptions {
            repeats: self.collapse.repeats,
            patterns: self.collapse.patterns,
            leaves: self.collapse.leaves,
            named: self.collapse.named.clone(),
        }
    }
}
