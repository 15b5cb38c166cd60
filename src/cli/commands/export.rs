use super::{load_config, read_source};
use crate::decoder::output::OutputManager;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::session::SessionStore;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Decode a feed response and render one export format
#[derive(Args)]
pub struct ExportCommand {
    /// Feed response XML file
    file: PathBuf,

    /// Export document to produce
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Output directory; files land in <output>/exports (overrides config.toml)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the documents to stdout instead of writing files
    #[arg(long)]
    stdout: bool,
}

impl ExportCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Feed Decoder - Export ({}) ===", self.format);

        let app_config = load_config()?;
        let source = read_source(&self.file)?;

        let mut store = SessionStore::new(app_config.decoding.decode_options());
        let decoded = store.decode(&source).map(|_| ());
        if let Err(e) = decoded {
            self.report(&store);
            return Err(e);
        }

        let artifacts = store.export(&source, self.format, Utc::now());
        self.report(&store);
        let artifacts = artifacts?;

        if self.stdout {
            for artifact in &artifacts {
                print!("{}", artifact.contents);
            }
            return Ok(());
        }

        let output = OutputManager::new(
            self.output
                .clone()
                .unwrap_or(app_config.paths.output_dir.clone()),
        )?;
        for artifact in &artifacts {
            let path = output.write_export(&artifact.file_name, &artifact.contents)?;
            println!("  {}", path.display());
        }

        Ok(())
    }

    /// Status goes to stderr when stdout carries the document
    fn report(&self, store: &SessionStore) {
        if self.stdout {
            eprintln!("{}", store.status());
        } else {
            println!("{}", store.status());
        }
    }
}
