//! Command-line argument definitions for the glitch-level CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The subcommand selects what to do with a level; the global
//! options control configuration file selection and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Stereo Glitch level tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse and validate a level file
    Check {
        /// Path to the level file
        input: String,

        /// Print the machine readable report instead of diagnostics
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a level file in canonical form
    Fmt {
        /// Path to the level file
        input: String,

        /// Write the result back to the file instead of printing it
        #[arg(short, long, conflicts_with = "check")]
        write: bool,

        /// Fail if the file is not canonically formatted
        #[arg(long)]
        check: bool,
    },

    /// Print a shareable link for a level file
    Share {
        /// Path to the level file
        input: String,
    },

    /// Decode a shared link back into level text
    Open {
        /// Link token, or a full link starting with the configured base URL
        token: String,

        /// Write the level to this file instead of printing it
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Summarise a level: size, player start and triggers
    Inspect {
        /// Path to the level file
        input: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
