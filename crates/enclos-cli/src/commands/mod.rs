pub mod export;
pub mod show;
pub mod track;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Trace a command and lock the executables it runs (flags after the
    /// command are passed to it untouched)
    Track(track::TrackArgs),
    /// List the dependencies recorded in the manifest
    Show,
    /// Export the manifest to a deployment format
    Export(export::ExportArgs),
}
