pub mod builder;
pub mod collapse;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod lookup;
pub mod node;
pub mod output_formats;
pub mod parser;
pub mod printer;

pub use builder::{BuildOptions, FilterSet, build_tree};
pub use collapse::{CollapseOptions, CompactionStats, compact};
pub use config::{CollapseConfig, Config, GeneralConfig, OutputConfig, TreeConfig};
pub use error::{AppError, Result};
pub use fingerprint::{Signature, fingerprint};
pub use lookup::{find_paths, split_query};
pub use node::Node;
pub use output_formats::{TreeFormat, render_tree, write_output};
pub use parser::parse_tree;
pub use printer::{node_label, print_compact, print_tree};
