//! Command line arguments for the demo binary

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// command line arguments for the demo host and preference storage
#[derive(Parser, Debug, Resource)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// text shown in the demo editing tab
    #[arg(long = "text", default_value = "hamburgefonstiv")]
    pub text: String,

    /// preference file path (defaults to the user config directory)
    #[arg(long = "prefs-file")]
    pub prefs_file: Option<PathBuf>,

    /// display debug information
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
