use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use xtree_core::{AppError, Config, compact, parse_tree};

use crate::apply_collapse_overrides;
use crate::cli_args::ParseArgs;
use crate::output::print_tree_or_save;

pub fn read_tree_text(input: Option<&std::path::Path>) -> Result<String> {
    match input {
        Some(path) => {
            log::info!("Reading tree text from {}", path.display());
            let text = fs::read_to_string(path).map_err(|e| AppError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(text)
        }
        None => {
            log::info!("Reading tree text from stdin");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(AppError::Io)
                .context("Failed to read tree text from stdin")?;
            Ok(text)
        }
    }
}

pub fn handle_parse_command(args: ParseArgs, quiet: bool) -> Result<()> {
    let text = read_tree_text(args.input.as_deref())?;
    let tree = parse_tree(&text)?;
    log::info!("Parsed tree '{}' with {} nodes.", tree.name, tree.node_count());

    // Parsing stands alone, so only built-in defaults and flags apply.
    let mut config = Config::default();
    apply_collapse_overrides(&mut config, &args.collapse);

    let tree = if args.compact {
        compact(tree, &config.collapse_options())
    } else {
        tree
    };

    print_tree_or_save(&tree, &config, &args.format_output, quiet)
}
