use crate::error::{AppError, Result};
use crate::node::Node;
use ignore::WalkBuilder;
use log;
use regex::RegexSet;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Deepest level whose directories are still descended (root is 0).
    pub max_depth: Option<usize>,
    pub max_entries: Option<usize>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Directories matching these are listed in full regardless of limits.
    pub expand: Vec<String>,
    pub use_gitignore: bool,
    pub show_hidden: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_entries: None,
            include: Vec::new(),
            exclude: Vec::new(),
            expand: Vec::new(),
            use_gitignore: true,
            show_hidden: false,
        }
    }
}

/// Compiled include/exclude/expand patterns, matched against the
/// `/`-separated path relative to the walk root.
#[derive(Debug)]
pub struct FilterSet {
    include: RegexSet,
    exclude: RegexSet,
    expand: RegexSet,
}

fn compile(kind: &str, patterns: &[String]) -> Result<RegexSet> {
    let set = RegexSet::new(patterns)
        .inspect_err(|e| log::error!("Invalid {} pattern in {:?}: {}", kind, patterns, e))?;
    Ok(set)
}

impl FilterSet {
    pub fn new(include: &[String], exclude: &[String], expand: &[String]) -> Result<Self> {
        log::trace!("Compiling filter patterns...");
        Ok(Self {
            include: compile("include", include)?,
            exclude: compile("exclude", exclude)?,
            expand: compile("expand", expand)?,
        })
    }

    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.is_match(relative)
    }

    /// True when no include patterns were given or one of them matches.
    pub fn is_included(&self, relative: &str) -> bool {
        self.include.is_empty() || self.include.is_match(relative)
    }

    pub fn has_includes(&self) -> bool {
        !self.include.is_empty()
    }

    pub fn is_expanded(&self, relative: &str) -> bool {
        self.expand.is_match(relative)
    }
}

fn relative_key(path: &Path, root: &Path) -> String {
    let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

struct Entry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

struct TreeBuilder<'a> {
    root: &'a Path,
    options: &'a BuildOptions,
    filters: FilterSet,
}

impl TreeBuilder<'_> {
    /// Immediate entries of `dir` that survive ignore files and exclude patterns.
    fn list_dir(&self, dir: &Path) -> Vec<Entry> {
        let use_gitignore = self.options.use_gitignore;
        let mut walk = WalkBuilder::new(dir);
        walk.max_depth(Some(1))
            .hidden(!self.options.show_hidden)
            .ignore(use_gitignore)
            .git_ignore(use_gitignore)
            .git_global(use_gitignore)
            .git_exclude(use_gitignore)
            .parents(use_gitignore)
            .require_git(false);

        let mut entries = Vec::new();
        for result in walk.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Error listing {}: {}", dir.display(), e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == ".git" {
                log::trace!("Skipping .git under {}", dir.display());
                continue;
            }
            let relative = relative_key(entry.path(), self.root);
            if self.filters.is_excluded(&relative) {
                log::trace!("Excluded by pattern: {}", relative);
                continue;
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            entries.push(Entry {
                path: entry.into_path(),
                name,
                is_dir,
            });
        }
        entries
    }

    /// Builds the node for a directory at `depth`, or `None` when include
    /// filtering left it with nothing to show.
    fn build_dir(&self, path: &Path, name: &str, depth: usize) -> Option<Node> {
        let relative = relative_key(path, self.root);
        let expanded = depth > 0 && self.filters.is_expanded(&relative);
        let mut node = Node::directory(name);
        let entries = self.list_dir(path);

        let depth_limited = self.options.max_depth.is_some_and(|max| depth >= max);
        if depth_limited && !expanded {
            log::trace!("Depth limit reached at {} ({} entries)", relative, entries.len());
            node.collapsed_pattern_children = entries.len();
            return Some(node);
        }

        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.is_dir {
                if let Some(child) = self.build_dir(&entry.path, &entry.name, depth + 1) {
                    children.push(child);
                }
            } else {
                let entry_relative = relative_key(&entry.path, self.root);
                if self.filters.is_included(&entry_relative) {
                    children.push(Node::new(&entry.name));
                } else {
                    log::trace!("Not included: {}", entry_relative);
                }
            }
        }
        children.sort_by(Node::display_order);

        if depth > 0
            && children.is_empty()
            && self.filters.has_includes()
            && !self.filters.is_included(&relative)
        {
            log::trace!("Pruning directory with no included entries: {}", relative);
            return None;
        }

        if let Some(max) = self.options.max_entries {
            if !expanded && children.len() > max {
                log::trace!("Capping {} at {} of {} entries", relative, max, children.len());
                node.collapsed_leaf_children += children.len() - max;
                children.truncate(max);
            }
        }
        node.children = children;
        Some(node)
    }
}

/// Walks `root` into a sorted node tree. Patterns are validated before any
/// directory is read.
pub fn build_tree(root: &Path, options: &BuildOptions) -> Result<Node> {
    let filters = FilterSet::new(&options.include, &options.exclude, &options.expand)?;
    if !root.is_dir() {
        return Err(AppError::InvalidArgument(format!(
            "Tree root is not a directory: {}",
            root.display()
        )));
    }
    log::info!("Building tree for {}", root.display());
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let builder = TreeBuilder {
        root,
        options,
        filters,
    };
    let tree = builder
        .build_dir(root, &root_name, 0)
        .unwrap_or_else(|| Node::directory(&root_name));
    log::debug!("Built tree with {} nodes.", tree.node_count());
    Ok(tree)
}
