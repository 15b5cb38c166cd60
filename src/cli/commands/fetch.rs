use super::{load_config, print_items};
use crate::errors::AppResult;
use crate::fetch::{load_p12_base64, FetchRequest, ProxyClient};
use crate::session::SessionStore;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Fetch a feed response through the mutual-TLS proxy
#[derive(Args)]
pub struct FetchCommand {
    /// Feed endpoint (https only)
    #[arg(long)]
    endpoint: String,

    /// PKCS#12 client certificate forwarded to the proxy
    #[arg(long)]
    p12: Option<PathBuf>,

    /// Passphrase for the client certificate
    #[arg(long, default_value = "")]
    passphrase: String,

    /// Proxy URL (overrides config.toml and FEED_PROXY_URL)
    #[arg(long)]
    proxy_url: Option<String>,

    /// Save the response text to this file instead of printing it
    #[arg(long)]
    output: Option<PathBuf>,

    /// Decode the fetched response and print a summary
    #[arg(long)]
    decode: bool,
}

impl FetchCommand {
    pub async fn run(&self) -> AppResult<()> {
        info!("=== Feed Decoder - Fetch ===");

        let mut app_config = load_config()?;
        if let Some(url) = &self.proxy_url {
            app_config.proxy.url = url.clone();
        }

        let p12_base64 = match &self.p12 {
            Some(path) => load_p12_base64(path)?,
            None => String::new(),
        };

        let client = ProxyClient::new(&app_config.proxy)?;
        info!("  Proxy: {}", client.proxy_url());
        info!("  Client certificate: {}", self.p12.is_some());

        let text = client
            .fetch(&FetchRequest {
                endpoint: self.endpoint.clone(),
                p12_base64,
                passphrase: self.passphrase.clone(),
            })
            .await?;

        match &self.output {
            Some(path) => {
                fs::write(path, &text)?;
                println!("Saved {} chars to {}", text.len(), path.display());
            }
            None if !self.decode => println!("{}", text),
            None => {}
        }

        if self.decode {
            let mut store = SessionStore::new(app_config.decoding.decode_options());
            let decoded = store.decode(&text).map(|_| ());
            println!("{}", store.status());
            decoded?;
            if let Some(session) = store.current() {
                print_items(session);
            }
        }

        Ok(())
    }
}
