use anyhow::{Context, Result};
use xtree_core::{CompactionStats, Config, build_tree, compact};

use crate::cli_args::TreeArgs;
use crate::output::{print_stats_table, print_tree_or_save};
use crate::{
    apply_collapse_overrides, apply_filter_overrides, apply_ignore_overrides,
    load_config_for_command,
};

pub fn handle_tree_command(args: TreeArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.path.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root: {}", project_root.display());

    let mut config = load_config_for_command(&project_root, &args.project_config)?;
    apply_filter_overrides(&mut config, &args.filters);
    apply_ignore_overrides(&mut config, &args.ignore_toggles);
    apply_collapse_overrides(&mut config, &args.collapse);
    log::debug!("Effective config: {:?}", config);

    let tree = build_tree(&project_root, &config.build_options())?;
    let before = tree.node_count();
    log::info!("Built tree with {} nodes.", before);

    let tree = if args.no_compact {
        log::debug!("Skipping collapse passes (--no-compact).");
        tree
    } else {
        compact(tree, &config.collapse_options())
    };

    print_tree_or_save(&tree, &config, &args.format_output, quiet)?;

    if args.stats && !quiet {
        print_stats_table(before, &CompactionStats::of(&tree));
    }
    Ok(())
}
