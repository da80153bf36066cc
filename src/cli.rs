//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio portfolio site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Render the public page into the output directory
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,
    },

    /// Serve the public page and the admin editor
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep admin edits in memory; storage is left untouched
        #[arg(long)]
        scratch: bool,
    },

    /// Print the resolved site document as JSON
    Export,

    /// Replace the stored site document with a JSON file
    Import {
        /// JSON file holding a complete document
        file: PathBuf,
    },

    /// Manage hero slides
    #[command(subcommand)]
    Slide(SlideCommand),

    /// Manage the about photo
    #[command(subcommand)]
    Photo(PhotoCommand),

    /// Manage work experience entries
    #[command(subcommand)]
    Experience(ExperienceCommand),

    /// Manage gallery projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage client logos
    #[command(subcommand)]
    Client(ClientCommand),
}

/// Delete arguments shared by every collection
#[derive(clap::Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Zero-based position in the list
    pub index: usize,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SlideCommand {
    /// Append a slide
    Add {
        /// Absolute URI of the image or video
        src: String,

        /// `image` or `video`; inferred from the extension when omitted
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// List slides
    List,
    /// Delete a slide
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum PhotoCommand {
    /// Replace the profile photo; empty input reverts to the default
    Set {
        #[arg(default_value = "")]
        uri: String,
    },
    /// Revert to the default profile photo
    Reset,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExperienceCommand {
    /// Append an entry
    Add {
        /// Four-digit year or `Present`
        #[arg(long)]
        start: String,

        /// Four-digit year or `Present`
        #[arg(long)]
        end: String,

        #[arg(long)]
        company: String,

        #[arg(long)]
        role: String,
    },
    /// List entries
    List,
    /// Delete an entry
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// Append a project
    Add {
        /// Absolute URI of the tile image
        #[arg(long)]
        img: String,

        /// Absolute URI of the full project
        #[arg(long)]
        link: String,

        /// Category token used by the gallery filter
        #[arg(long)]
        category: String,
    },
    /// List projects
    List,
    /// Delete a project
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum ClientCommand {
    /// Append a client logo
    Add {
        /// Absolute URI of the logo
        uri: String,
    },
    /// List client logos
    List,
    /// Delete a client logo
    Delete(DeleteArgs),
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}
