// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analyze;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Vision Gateway CLI
#[derive(Parser, Debug)]
#[command(name = "vision-gateway-cli")]
#[command(version)]
#[command(about = "Client tools for the Vision Gateway", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload an image to a running gateway and print the analysis
    Analyze(analyze::AnalyzeArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => analyze::analyze_image(args).await,
    }
}
