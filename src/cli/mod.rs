//! CLI module - Command-line interface for finedefense
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};

/// finedefense - read-only query service for traffic fines and their defenses
#[derive(Parser)]
#[command(name = "finedefense")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    #[command(alias = "web")]
    Serve,

    /// Connect, apply migrations and print table sizes
    #[command(alias = "-c", alias = "--check")]
    Check,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Run one query operation and report how many statements it issued
    Inspect {
        operation: Operation,

        /// Fine, defense or user ID, depending on the operation
        id: Option<i32>,

        /// Comma separated type filter (documents, analytics-events)
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,

        /// Row cap for analytics-events
        #[arg(long)]
        limit: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    DefensesByFine,
    FinesWithDefenses,
    DefensesByUser,
    DefenseWithFine,
    FineWithUser,
    AnalyticsEvents,
    Documents,
    Subscriptions,
    Payments,
}

impl Operation {
    #[must_use]
    pub const fn needs_id(self) -> bool {
        !matches!(self, Self::AnalyticsEvents | Self::Documents)
    }
}

pub use commands::*;
