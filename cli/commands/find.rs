use anyhow::{Context, Result};
use colored::*;
use xtree_core::{AppError, Config, build_tree, find_paths, parse_tree, split_query};

use crate::cli_args::FindArgs;
use crate::commands::parse::read_tree_text;
use crate::output::write_to_stdout;
use crate::{apply_filter_overrides, apply_ignore_overrides, load_config_for_command};

pub fn handle_find_command(args: FindArgs, quiet: bool) -> Result<()> {
    let query: Vec<&str> = args
        .segments
        .iter()
        .flat_map(|s| split_query(s))
        .collect();
    if query.is_empty() {
        anyhow::bail!(AppError::InvalidArgument(
            "Find needs at least one non-empty path segment".to_string()
        ));
    }
    log::debug!("Find query segments: {:?}", query);

    let tree = match args.input.as_deref() {
        Some(input) => parse_tree(&read_tree_text(Some(input))?)?,
        None => {
            let project_root = Config::determine_project_root(args.project_config.path.as_ref())
                .context("Failed to determine project root")?;
            let mut config = load_config_for_command(&project_root, &args.project_config)?;
            apply_filter_overrides(&mut config, &args.filters);
            apply_ignore_overrides(&mut config, &args.ignore_toggles);
            build_tree(&project_root, &config.build_options())?
        }
    };

    let matches = find_paths(&tree, &query);
    log::info!("Found {} matching path(s).", matches.len());

    if matches.is_empty() {
        if !quiet {
            eprintln!("{} No matching path found", "ℹ".yellow());
        }
        return Ok(());
    }

    let mut content = String::new();
    for path in &matches {
        content.push_str(&path.join("/"));
        content.push('\n');
    }
    write_to_stdout(&content)
}
