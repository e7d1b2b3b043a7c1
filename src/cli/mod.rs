//! CLI module for retrojob - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
