//! CLI module for the model store API
//!
//! Currently a single subcommand: `serve`, which runs the HTTP server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Model Store API - authenticated metadata store for ML models
#[derive(Parser)]
#[command(name = "model-store-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
