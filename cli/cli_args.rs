use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        long,
        help = "Directory to render (default: PROJECT_ROOT or current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        long,
        help = "Path of the TOML config file (default: .xtools/xtree/xtree.toml under the project root).",
        value_name = "CONFIG_FILE",
        conflicts_with = "disable_config",
        help_heading = "Project Setup"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Project Setup"
    )]
    pub disable_config: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FormatOutputOpts {
    #[arg(short = 'f', long, help = "Set the output format.", value_name = "FORMAT", value_parser = ["text", "compact", "json", "yaml"], help_heading = "Output Formatting")]
    pub format: Option<String>,

    #[arg(
        long,
        help = "Pretty-print JSON output.",
        help_heading = "Output Formatting"
    )]
    pub pretty_json: bool,

    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        help = "Write output to FILE instead of stdout.",
        help_heading = "Output Formatting"
    )]
    pub save: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    name = "xtree",
    about = "Render directory trees compactly for humans and AI models.",
    long_about = "xtree renders a directory (or any tree given as text) with box-drawing \nconnectors, folding repeated runs, duplicate subtrees and duplicate leaves \nso large generated or repetitive trees stay readable. It can also parse \nthat text back into structured data.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  xtree tree --path . --max-depth 3\n  xtree tree -f json --pretty-json\n  xtree parse trace.txt --compact\n  xtree find src lib.rs",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "t",
        about = "Build, compact and print the tree of a directory."
    )]
    Tree(TreeArgs),

    #[command(
        visible_alias = "p",
        about = "Parse tree text (file or stdin) and print it again."
    )]
    Parse(ParseArgs),

    #[command(
        visible_alias = "f",
        about = "List every tree path ending with the given segments."
    )]
    Find(FindArgs),

    #[command(about = "Show or save the default configuration file structure.")]
    Config(ConfigArgs),

    #[command(about = "Generate or save shell completion scripts.")]
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub format_output: FormatOutputOpts,
    #[clap(flatten)]
    pub filters: FilterGroup,
    #[clap(flatten)]
    pub ignore_toggles: IgnoreTogglesGroup,
    #[clap(flatten)]
    pub collapse: CollapseGroup,

    #[arg(
        long,
        help = "Print the raw tree without any collapsing.",
        help_heading = "Collapsing"
    )]
    pub no_compact: bool,

    #[arg(long, help = "Print a compaction summary to stderr.")]
    pub stats: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(value_name = "FILE", help = "Tree text to parse (default: stdin).")]
    pub input: Option<PathBuf>,
    #[clap(flatten)]
    pub format_output: FormatOutputOpts,
    #[clap(flatten)]
    pub collapse: CollapseGroup,

    #[arg(
        long,
        help = "Run the collapse passes on the parsed tree.",
        help_heading = "Collapsing"
    )]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    #[arg(
        required = true,
        value_name = "SEGMENT",
        help = "Trailing path segments, e.g. 'src lib.rs' or 'src/lib.rs'."
    )]
    pub segments: Vec<String>,
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub filters: FilterGroup,
    #[clap(flatten)]
    pub ignore_toggles: IgnoreTogglesGroup,

    #[arg(
        long,
        value_name = "FILE",
        help = "Search a tree text file instead of a directory.",
        conflicts_with = "path"
    )]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: fish]"
    )]
    pub shell: Option<String>,
    #[arg(
        long,
        help = "Save completion script to default location (prompts overwrite)."
    )]
    pub save: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[arg(
        long,
        help = "Save default config structure to default path (prompts overwrite)."
    )]
    pub save: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterGroup {
    #[arg(long = "include", value_name = "REGEX", action = clap::ArgAction::Append, help = "Only list files whose relative path matches.", help_heading = "Content Filtering")]
    pub include: Vec<String>,
    #[arg(long = "exclude", value_name = "REGEX", action = clap::ArgAction::Append, help = "Skip files and directories whose relative path matches.", help_heading = "Content Filtering")]
    pub exclude: Vec<String>,
    #[arg(long = "expand", value_name = "REGEX", action = clap::ArgAction::Append, help = "Always list matching directories in full.", help_heading = "Content Filtering")]
    pub expand: Vec<String>,
    #[arg(
        long,
        value_name = "DEPTH",
        help = "Do not descend below DEPTH levels.",
        help_heading = "Content Filtering"
    )]
    pub max_depth: Option<usize>,
    #[arg(
        long,
        value_name = "COUNT",
        help = "Show at most COUNT entries per directory.",
        help_heading = "Content Filtering"
    )]
    pub max_entries: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct IgnoreTogglesGroup {
    #[arg(
        long,
        help = "Respect .gitignore and .ignore files [default: enabled].",
        overrides_with = "disable_gitignore",
        help_heading = "Ignore Rules"
    )]
    pub enable_gitignore: bool,
    #[arg(
        long,
        help = "Do not respect .gitignore and .ignore files.",
        overrides_with = "enable_gitignore",
        help_heading = "Ignore Rules"
    )]
    pub disable_gitignore: bool,
    #[arg(
        long,
        help = "Include hidden files and directories.",
        help_heading = "Ignore Rules"
    )]
    pub hidden: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CollapseGroup {
    #[arg(
        long,
        help = "Do not fold repeated sibling runs.",
        help_heading = "Collapsing"
    )]
    pub no_repeats: bool,
    #[arg(
        long,
        help = "Do not elide subtrees already shown earlier.",
        help_heading = "Collapsing"
    )]
    pub no_patterns: bool,
    #[arg(
        long,
        help = "Do not drop duplicate leaf siblings.",
        help_heading = "Collapsing"
    )]
    pub no_leaves: bool,
    #[arg(long = "collapse", value_name = "NAME", action = clap::ArgAction::Append, help = "Always hide the children of nodes named NAME.", help_heading = "Collapsing")]
    pub collapse: Vec<String>,
}
