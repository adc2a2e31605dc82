use crate::error::{AppError, Result};
use crate::node::Node;
use crate::printer::{print_compact, print_tree};
#[cfg(feature = "serde_support")]
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Text,
    Compact,
    Json,
    Yaml,
}

impl FromStr for TreeFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(TreeFormat::Text),
            "compact" => Ok(TreeFormat::Compact),
            "json" => Ok(TreeFormat::Json),
            "yaml" | "yml" => Ok(TreeFormat::Yaml),
            other => Err(AppError::InvalidArgument(format!(
                "Unknown tree format \"{}\" (expected text, compact, json or yaml)",
                other
            ))),
        }
    }
}

impl fmt::Display for TreeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TreeFormat::Text => "text",
            TreeFormat::Compact => "compact",
            TreeFormat::Json => "json",
            TreeFormat::Yaml => "yaml",
        };
        f.write_str(name)
    }
}

pub fn render_tree(root: &Node, format: TreeFormat, pretty_json: bool) -> Result<String> {
    match format {
        TreeFormat::Text => Ok(print_tree(root)),
        TreeFormat::Compact => Ok(print_compact(root)),
        #[cfg(feature = "serde_support")]
        TreeFormat::Json => serialize_to_json(root, pretty_json),
        #[cfg(feature = "serde_support")]
        TreeFormat::Yaml => serialize_to_yaml(root),
        #[cfg(not(feature = "serde_support"))]
        TreeFormat::Json | TreeFormat::Yaml => {
            let _ = pretty_json;
            Err(AppError::InvalidArgument(format!(
                "Format {} requires the serde_support feature",
                format
            )))
        }
    }
}

/// Writes rendered output to `path`, creating missing parent directories.
pub fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::DirCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let write_error = |source| AppError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(write_error)?;
    file.write_all(content).map_err(write_error)?;
    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(feature = "serde_support")]
pub fn serialize_to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).map_err(AppError::JsonSerialize)
    } else {
        serde_json::to_string(value).map_err(AppError::JsonSerialize)
    }
}

#[cfg(feature = "serde_support")]
pub fn serialize_to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yml::to_string(value).map_err(AppError::YamlError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_names() {
        assert_eq!("TEXT".parse::<TreeFormat>().unwrap(), TreeFormat::Text);
        assert_eq!("yml".parse::<TreeFormat>().unwrap(), TreeFormat::Yaml);
        assert!(matches!(
            "xml".parse::<TreeFormat>(),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn write_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("saved/trees/out.txt");
        write_output(&target, b"root\n").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "root\n");
    }

    #[test]
    fn write_output_reports_uncreatable_parent() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let err = write_output(&blocker.join("nested/out.txt"), b"x").unwrap_err();
        assert!(
            matches!(&err, AppError::DirCreation { path, .. } if path == &blocker.join("nested")),
            "{err:?}"
        );
    }

    #[test]
    fn write_output_reports_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_output(dir.path(), b"x").unwrap_err();
        assert!(matches!(err, AppError::FileWrite { .. }), "{err:?}");
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn json_skips_default_fields() {
        let mut child = Node::new("2_b");
        child.subsequent_repeated = 1;
        let root = Node::directory("a").with_children(vec![child]);
        let json = render_tree(&root, TreeFormat::Json, false).unwrap();
        assert_eq!(
            json,
            r#"{"name":"a","isDirectory":true,"children":[{"name":"b","orderIndex":2,"hasOrderIndex":true,"subsequentRepeated":1}]}"#
        );
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
    }
}
