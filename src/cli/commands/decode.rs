use super::{load_config, print_items, read_source};
use crate::decoder::output::OutputManager;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::session::SessionStore;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Decode a feed response and optionally write payloads and CSV exports
#[derive(Args)]
pub struct DecodeCommand {
    /// Feed response XML file
    file: PathBuf,

    /// Write raw and decoded payload bytes under <output-dir>/raw and <output-dir>/decoded
    #[arg(long)]
    write_files: bool,

    /// Write long-form and per-station wide CSV exports
    #[arg(long)]
    csv: bool,

    /// Output directory (overrides config.toml and FEED_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl DecodeCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Feed Decoder - Decode ===");

        let app_config = load_config()?;
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or(app_config.paths.output_dir.clone());

        let source = read_source(&self.file)?;
        info!("Input: {} ({} bytes)", self.file.display(), source.len());

        let mut store = SessionStore::new(app_config.decoding.decode_options());
        let decoded = store.decode(&source).map(|_| ());
        println!("{}", store.status());
        decoded?;
        let session = store.session_for_export(&source)?;

        print_items(session);

        let output = OutputManager::new(output_dir)?;

        if self.write_files {
            let mut written = 0;
            for item in session.items() {
                if let Some(paths) = output.write_item(item)? {
                    info!("Wrote {} and {}", paths.raw.display(), paths.decoded.display());
                    written += 1;
                }
            }
            println!(
                "Wrote {} payload(s) to {}",
                written,
                output.output_dir().display()
            );
        }

        let records = store.extract_records(&source)?;
        println!("{}", store.status());

        if self.csv {
            let generated_at = Utc::now();
            for format in [
                ExportFormat::FuelCsv,
                ExportFormat::OverrideCsv,
                ExportFormat::WideCsv,
            ] {
                let artifacts = store.export(&source, format, generated_at)?;
                for artifact in &artifacts {
                    let path = output.write_export(&artifact.file_name, &artifact.contents)?;
                    println!("  {}", path.display());
                }
                println!("{}", store.status());
            }
        } else if !records.is_empty() {
            println!("Use --csv to write the extracted rows");
        }

        Ok(())
    }
}
