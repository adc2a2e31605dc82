mod cli_args;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use log;
use std::path::Path;
use std::process;

use cli_args::{Cli, CollapseGroup, Commands, FilterGroup, IgnoreTogglesGroup, ProjectConfigOpts};
use xtree_core::{AppError, Config};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let core_err = e.downcast_ref::<AppError>();
            let exit_code = match core_err {
                Some(AppError::Config(_)) => 1,
                Some(AppError::TomlParse(_)) => 1,
                Some(AppError::TomlSerialize(_)) => 1,
                Some(AppError::Io(_)) => 2,
                Some(AppError::ProjectRoot { .. }) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::DirCreation { .. }) => 2,
                Some(AppError::EmptyTree) => 3,
                Some(AppError::TreeParse { .. }) => 3,
                Some(AppError::InvalidPattern(_)) => 5,
                Some(AppError::InvalidArgument(_)) => 5,
                Some(AppError::JsonSerialize(_)) => 6,
                Some(AppError::YamlError(_)) => 6,
                Some(_) => 1,
                None => 1,
            };

            // Parse, pattern and argument errors are always worth showing.
            if !quiet || matches!(exit_code, 1 | 3 | 5) {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            } else {
                log::error!("Application failed: {:#}", e);
            }

            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<()> {
    match cli.command {
        None => {
            Cli::command().print_help()?;
        }
        Some(command) => match command {
            Commands::Tree(args) => {
                log::debug!("Executing 'tree' command...");
                commands::tree::handle_tree_command(args, quiet)?;
            }
            Commands::Parse(args) => {
                log::debug!("Executing 'parse' command...");
                commands::parse::handle_parse_command(args, quiet)?;
            }
            Commands::Find(args) => {
                log::debug!("Executing 'find' command...");
                commands::find::handle_find_command(args, quiet)?;
            }
            Commands::Config(args) => {
                log::debug!("Executing 'config' command...");
                commands::config::handle_config_command(&args, quiet)?;
            }
            Commands::Completion(args) => {
                log::debug!("Executing 'completion' command...");
                commands::completion::handle_completion_command(&args, quiet)?;
            }
        },
    }
    Ok(())
}

pub fn apply_filter_overrides(config: &mut Config, filters: &FilterGroup) {
    if !filters.include.is_empty() {
        config.tree.include = filters.include.clone();
    }
    if !filters.exclude.is_empty() {
        config.tree.exclude = filters.exclude.clone();
    }
    if !filters.expand.is_empty() {
        config.tree.expand = filters.expand.clone();
    }
    if filters.max_depth.is_some() {
        config.tree.max_depth = filters.max_depth;
    }
    if filters.max_entries.is_some() {
        config.tree.max_entries = filters.max_entries;
    }
}

pub fn apply_ignore_overrides(config: &mut Config, toggles: &IgnoreTogglesGroup) {
    if toggles.disable_gitignore {
        config.general.use_gitignore = false;
    }
    if toggles.enable_gitignore {
        config.general.use_gitignore = true;
    }
    if toggles.hidden {
        config.general.show_hidden = true;
    }
}

pub fn apply_collapse_overrides(config: &mut Config, collapse: &CollapseGroup) {
    if collapse.no_repeats {
        config.collapse.repeats = false;
    }
    if collapse.no_patterns {
        config.collapse.patterns = false;
    }
    if collapse.no_leaves {
        config.collapse.leaves = false;
    }
    if !collapse.collapse.is_empty() {
        config.collapse.named.extend(collapse.collapse.iter().cloned());
    }
}

pub fn load_config_for_command(project_root: &Path, project_opts: &ProjectConfigOpts) -> Result<Config> {
    let config_path = Config::resolve_config_path(
        project_root,
        project_opts.config_file.as_ref(),
        project_opts.disable_config,
    )
    .context("Failed to resolve configuration path")?;

    let config = match &config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    log::trace!("Loaded config: {:?}", config);
    Ok(config)
}
