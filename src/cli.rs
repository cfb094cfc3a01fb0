//! Command-line surface: `prontuario render` prints the assembled layout
//! view as JSON, `prontuario export` writes the PDF document.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::assemble::render_response;
use crate::export::{
    export_document, write_artifact, write_to_exports, ExportError, ExportKind, ExportOptions,
};
use crate::layout::GridOptions;
use crate::models::{Response, ResponseError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "prontuario", version)]
#[command(about = "Render and export structured clinical summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the section layout view of a summary as JSON
    Render {
        /// Summary JSON file (`-` for stdin)
        input: PathBuf,
        /// Column tracks in the multi-card grid
        #[arg(long, default_value_t = 3)]
        tracks: usize,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Export a summary as a paginated PDF
    Export {
        /// Summary JSON file (`-` for stdin)
        input: PathBuf,
        /// View the document comes from; names the default file
        #[arg(long, value_enum, default_value_t = KindArg::Prontuario)]
        kind: KindArg,
        /// Output directory (defaults to ~/Prontuario/exports)
        #[arg(long)]
        output: Option<PathBuf>,
        /// File name override
        #[arg(long)]
        filename: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Prontuario,
    Insights,
    ResumoGeral,
}

impl From<KindArg> for ExportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Prontuario => ExportKind::Prontuario,
            KindArg::Insights => ExportKind::Insights,
            KindArg::ResumoGeral => ExportKind::ResumoGeral,
        }
    }
}

fn read_response(input: &Path) -> Result<Response, CliError> {
    let text = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(Response::from_json(&text)?)
}

/// Run one command; returns what should be printed on stdout.
pub fn execute(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Commands::Render {
            input,
            tracks,
            pretty,
        } => {
            let response = read_response(&input)?;
            let view = render_response(&response, GridOptions { tracks });
            let json = if pretty {
                serde_json::to_string_pretty(&view)?
            } else {
                serde_json::to_string(&view)?
            };
            Ok(json)
        }
        Commands::Export {
            input,
            kind,
            output,
            filename,
        } => {
            let response = read_response(&input)?;
            let mut options = ExportOptions::new(kind.into());
            if let Some(filename) = filename {
                options = options.with_filename(filename);
            }
            let artifact = export_document(&response, &options)?;
            let path = match output {
                Some(dir) => write_artifact(&artifact, &dir)?,
                None => write_to_exports(&artifact)?,
            };
            Ok(path.display().to_string())
        }
    }
}
