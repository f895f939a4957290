//! CLI logic for the Stratum layout tool.
//!
//! This module contains the core CLI logic: it reads a graph document, lays
//! it out and writes the document consumed by the rendering widget.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use stratum::{LayoutBuilder, StratumError};

/// Run the Stratum CLI application
///
/// This function processes the input file through the Stratum pipeline
/// and writes the resulting JSON to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StratumError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - JSON parsing errors
/// - Layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), StratumError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process graph using LayoutBuilder API
    let builder = LayoutBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let flow = builder.layout(&document)?;
    let json = builder.render_json(&flow)?;

    // Write output file
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
