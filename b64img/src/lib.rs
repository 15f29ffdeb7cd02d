//! Shared pieces of the `encode` and `decode` command-line tools.

pub mod cli;
pub mod output;
