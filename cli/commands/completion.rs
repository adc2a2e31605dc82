use anyhow::Result;
use clap::{Command, CommandFactory};
use clap_complete::{Shell, generate};
use colored::*;
use std::io;
use std::path::PathBuf;
use xtree_core::{AppError, write_output};

use crate::cli_args::{Cli, CompletionArgs};
use crate::output::confirm_overwrite;

fn parse_shell(name: &str) -> Result<Shell> {
    match name.to_lowercase().as_str() {
        "fish" => Ok(Shell::Fish),
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        _ => anyhow::bail!(AppError::InvalidArgument(format!(
            "Unsupported shell for completion: {}",
            name
        ))),
    }
}

fn completion_target(shell: Shell, bin_name: &str) -> Result<PathBuf> {
    let (dir, filename) = match shell {
        Shell::Fish => (
            dirs::config_dir().map(|p| p.join("fish").join("completions")),
            format!("{}.fish", bin_name),
        ),
        Shell::Bash => (
            dirs::data_local_dir().map(|p| p.join("bash-completion").join("completions")),
            bin_name.to_string(),
        ),
        Shell::Zsh => (
            dirs::data_local_dir().map(|p| p.join("zsh").join("site-functions")),
            format!("_{}", bin_name),
        ),
        other => anyhow::bail!(AppError::InvalidArgument(format!(
            "Default save location not known for shell: {}",
            other
        ))),
    };
    let dir = dir.ok_or_else(|| anyhow::anyhow!("Could not determine standard completion directory."))?;
    Ok(dir.join(filename))
}

fn save_completions(shell: Shell, command: &mut Command, bin_name: String, quiet: bool) -> Result<()> {
    let save_path = completion_target(shell, &bin_name)?;
    log::debug!("Completion target: {}", save_path.display());

    if !confirm_overwrite(&save_path, "Completion file", quiet)? {
        return Ok(());
    }
    let mut script = Vec::new();
    generate(shell, command, bin_name, &mut script);
    write_output(&save_path, &script)?;

    if !quiet {
        println!(
            "{} {} completions saved to: {}",
            "✅".green(),
            shell.to_string().cyan(),
            save_path.display().to_string().blue()
        );
    }
    Ok(())
}

pub fn handle_completion_command(args: &CompletionArgs, quiet: bool) -> Result<()> {
    let shell = parse_shell(args.shell.as_deref().unwrap_or("fish"))?;
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    if args.save {
        save_completions(shell, &mut command, bin_name, quiet)
    } else {
        log::debug!("Writing {} completions for '{}' to stdout", shell, bin_name);
        generate(shell, &mut command, bin_name, &mut io::stdout());
        Ok(())
    }
}
