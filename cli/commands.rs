pub mod completion;
pub mod config;
pub mod find;
pub mod parse;
pub mod tree;
