use anyhow::{Context, Result};
use colored::*;
use xtree_core::Config;

use crate::cli_args::ConfigArgs;
use crate::output::{confirm_overwrite, write_to_file, write_to_stdout};

pub fn handle_config_command(args: &ConfigArgs, quiet: bool) -> Result<()> {
    let content = Config::default()
        .to_toml_string()
        .context("Failed to serialize default configuration")?;

    if !args.save {
        return write_to_stdout(&content);
    }

    let project_root = Config::determine_project_root(args.project_config.path.as_ref())
        .context("Failed to determine project root")?;
    let save_path = Config::default_config_path(&project_root);
    log::debug!("Default config path: {}", save_path.display());

    if !confirm_overwrite(&save_path, "Config file", quiet)? {
        return Ok(());
    }

    write_to_file(&save_path, &content)?;
    if !quiet {
        println!(
            "{} Default config saved to: {}",
            "✅".green(),
            save_path.display().to_string().blue()
        );
    }
    Ok(())
}
