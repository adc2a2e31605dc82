use anyhow::{Context, Result};
use colored::*;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL};
use std::io::{self, Write};
use std::path::Path;
use xtree_core::{CompactionStats, Config, Node, TreeFormat, render_tree, write_output};

use crate::cli_args::FormatOutputOpts;

pub fn resolve_format(config: &Config, format_opts: &FormatOutputOpts) -> Result<TreeFormat> {
    let name = format_opts
        .format
        .as_deref()
        .unwrap_or(&config.output.format);
    Ok(name.parse::<TreeFormat>()?)
}

pub fn print_tree_or_save(
    root: &Node,
    config: &Config,
    format_opts: &FormatOutputOpts,
    quiet: bool,
) -> Result<()> {
    let format = resolve_format(config, format_opts)?;
    let pretty_json = format_opts.pretty_json || !config.output.json_minify;
    log::debug!("Rendering tree as {} (pretty json: {})", format, pretty_json);

    let content = render_tree(root, format, pretty_json)?;

    match format_opts.save.as_deref() {
        Some(path) => {
            write_to_file(path, &content)?;
            if !quiet {
                println!(
                    "{} Tree saved to: {}",
                    "✅".green(),
                    path.display().to_string().blue()
                );
            }
        }
        None => write_to_stdout(&content)?,
    }
    Ok(())
}

pub fn write_to_file(path: &Path, content: &str) -> Result<()> {
    Ok(write_output(path, content.as_bytes())?)
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Summary goes to stderr so it never mixes with a piped tree.
pub fn print_stats_table(before: usize, stats: &CompactionStats) {
    eprintln!();
    eprintln!("{}", " Compaction Summary ".green().bold().underline());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Measure").fg(Color::Green),
        Cell::new("Count").fg(Color::Green),
    ]);
    let rows = [
        ("Nodes before", before),
        ("Nodes shown", stats.visible_nodes),
        ("Folded repeats", stats.folded_repeats),
        ("Elided subtrees", stats.pattern_elided),
        ("Dropped leaves", stats.leaf_elided),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label).fg(Color::Cyan),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    eprintln!("{table}");
}

/// Asks before replacing `path`. Quiet mode never prompts and refuses instead.
pub fn confirm_overwrite(path: &Path, what: &str, quiet: bool) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if quiet {
        anyhow::bail!(
            "Target file '{}' exists. Overwrite prevented in quiet mode.",
            path.display()
        );
    }
    print!(
        "{} {} already exists at '{}'. Overwrite? [{}/{}] ",
        "⚠️".yellow(),
        what,
        path.display().to_string().cyan(),
        "y".green(),
        "N".red()
    );
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut response = String::new();
    io::stdin()
        .read_line(&mut response)
        .context("Failed to read user input")?;
    if response.trim().eq_ignore_ascii_case("y") {
        Ok(true)
    } else {
        println!("Save cancelled.");
        Ok(false)
    }
}
