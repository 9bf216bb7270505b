use crate::error::{ProcessingError, Result};
use crate::sources::ReferenceSource;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use tracing::info;

/// Downloads a reference file over HTTP to a local path
pub struct HttpReferenceDownloader {
    client: Client,
    url: String,
}

impl HttpReferenceDownloader {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }
}

impl ReferenceSource for HttpReferenceDownloader {
    fn fetch(&self, dest: &Path) -> Result<()> {
        info!(url = %self.url, dest = %dest.display(), "Downloading station inventory");

        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProcessingError::Download {
                url: self.url.clone(),
                reason: format!("HTTP status {}", status),
            });
        }
        let bytes = response.bytes()?;

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(dest, &bytes)?;

        info!(bytes = bytes.len(), "Station inventory saved");
        Ok(())
    }
}
