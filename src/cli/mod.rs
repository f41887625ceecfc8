//! CLI definitions and command implementations for aws-upload.

pub mod commands;
pub mod editor;
pub mod messages;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aws-upload - Upload a local folder to a remote host with rsync
#[derive(Parser)]
#[command(name = "aws-upload")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output more verbose information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Folder holding the setting files (default: $AWS_UPLOAD_HOME or ~/.aws-upload)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload the local folder of a profile
    #[command(visible_alias = "up")]
    Upload {
        /// Project name, or the full <proj>.<env> key
        proj: String,

        /// Environment name
        env: Option<String>,

        /// Print the rsync command without uploading anything
        #[arg(long)]
        simulate: bool,
    },

    /// Print all the projects' keys
    Keys,

    /// Print all the projects
    Projs,

    /// Print all the environments of a project
    Envs {
        /// Project name
        proj: String,
    },

    /// Create a new setting file
    New {
        /// Key in the <proj>.<env> format, e.g. landing.test
        key: String,
    },

    /// Edit a setting file
    Edit {
        /// Key in the <proj>.<env> format, e.g. landing.test
        key: String,
    },

    /// Copy a setting file
    #[command(visible_alias = "cp")]
    Copy {
        /// Existing key, <proj>.<env>
        src: String,

        /// New key, <proj>.<env>
        dest: String,
    },

    /// Check a setting file for debug
    Check {
        /// Key in the <proj>.<env> format, e.g. landing.test
        key: String,
    },
}
