//! mdlift - upload local markdown images and rewrite the links
//!
//! Two commands:
//! - `rewrite` uploads every local image a markdown document references
//!   and points the references at the returned URLs, working on a
//!   duplicated copy by default or in place with `--in-place`.
//! - `upload` pushes explicit image files and prints markdown links.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use mdlift_core::{
    constants, HttpUploader, RewriteError, Rewriter, Settings, TextDocument, Uploader,
};

mod console;
mod duplicate;

use console::ConsoleNotifier;

/// mdlift - markdown image uploader
#[derive(Parser)]
#[command(name = "mdlift")]
#[command(about = "Upload local images referenced in markdown and rewrite the links", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Upload endpoint (overrides the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Bearer token for the upload endpoint (overrides the config file)
    #[arg(long)]
    auth_token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document's local images and rewrite the references
    Rewrite {
        /// Markdown document to process
        file: PathBuf,

        /// Rewrite the document itself instead of a duplicated copy
        #[arg(long)]
        in_place: bool,
    },

    /// Upload image files and print one markdown link per file
    Upload {
        /// Image files to upload
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(endpoint) = cli.endpoint {
        settings.uploader.endpoint = endpoint;
    }
    if let Some(token) = cli.auth_token {
        settings.uploader.auth_token = Some(token);
    }
    if settings.uploader.endpoint.is_empty() {
        anyhow::bail!(
            "no upload endpoint configured; set uploader.endpoint in {} or pass --endpoint",
            Settings::config_path().display()
        );
    }

    match cli.command {
        Commands::Rewrite { file, in_place } => rewrite_command(&settings, &file, in_place).await,
        Commands::Upload { paths } => upload_command(&settings, &paths).await,
    }
}

async fn rewrite_command(settings: &Settings, file: &Path, in_place: bool) -> Result<()> {
    if !file.is_file() {
        return Err(RewriteError::NoActiveDocument.into());
    }

    let target = if in_place {
        file.to_path_buf()
    } else {
        duplicate::duplicate_document(file, settings.use_upload_version_folder)?
    };

    // Relative references resolve against the source document's
    // directory even when the copy lives in uploadVersion/.
    let document_dir = file
        .parent()
        .ok_or(RewriteError::NoActiveDocument)?
        .to_path_buf();

    let mut document = TextDocument::new(std::fs::read_to_string(&target)?);

    let uploader = HttpUploader::new(
        settings.uploader.endpoint.clone(),
        settings.uploader.auth_token.clone(),
    );
    let notifier = ConsoleNotifier;
    let rewriter = Rewriter::new(&uploader, &notifier, settings);

    let outcome = rewriter.rewrite(&mut document, &document_dir).await?;

    if outcome.replacements > 0 {
        std::fs::write(&target, document.content())?;
    }
    info!(
        "{}: {} scanned, {} uploaded, {} replaced",
        target.display(),
        outcome.scanned,
        outcome.uploads,
        outcome.replacements
    );
    if !in_place {
        println!("{}", target.display());
    }
    Ok(())
}

async fn upload_command(settings: &Settings, paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        anyhow::bail!("no image files given");
    }

    let cwd = std::env::current_dir()?;
    let mut resolved = Vec::with_capacity(paths.len());
    for path in paths {
        let absolute = if path.is_absolute() {
            path.clone()
        } else {
            cwd.join(path)
        };
        if !constants::is_image_path(&absolute) || !absolute.is_file() {
            anyhow::bail!("no such image: {}", path.display());
        }
        resolved.push(absolute);
    }

    let uploader = HttpUploader::new(
        settings.uploader.endpoint.clone(),
        settings.uploader.auth_token.clone(),
    );
    let urls = uploader.upload(&resolved).await?;
    for url in urls {
        println!("![]({})", url);
    }
    Ok(())
}
