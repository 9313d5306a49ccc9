//! File-backed persistence
//!
//! Access codes live in a single JSON file, generated horoscopes and PDF
//! files in subdirectories of the data directory. The layout mirrors the
//! logical collections: `access_codes.json`, `horoscopes/`, `horoscopes_pdf/`.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::WebServerResult;
use crate::traits::DocumentStore;
use crate::types::{AccessCode, HoroscopeDocument};

pub struct FileStore {
    base_dir: PathBuf,
    // serializes read-modify-write cycles on the access code file
    codes_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            codes_lock: Mutex::new(()),
        }
    }

    fn access_codes_path(&self) -> PathBuf {
        self.base_dir.join("access_codes.json")
    }

    fn documents_dir(&self) -> PathBuf {
        self.base_dir.join("horoscopes")
    }

    fn pdfs_dir(&self) -> PathBuf {
        self.base_dir.join("horoscopes_pdf")
    }

    /// Create the directory layout if it does not exist yet.
    pub async fn ensure_layout(&self) -> WebServerResult<()> {
        fs::create_dir_all(self.documents_dir()).await?;
        fs::create_dir_all(self.pdfs_dir()).await?;
        Ok(())
    }

    async fn load_access_codes(&self) -> WebServerResult<Vec<AccessCode>> {
        let path = self.access_codes_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn consume_access_code(&self, code: &str) -> WebServerResult<Option<AccessCode>> {
        let _guard = self.codes_lock.lock().await;

        let mut codes = self.load_access_codes().await?;
        let Some(entry) = codes.iter_mut().find(|c| c.code == code) else {
            return Ok(None);
        };

        entry.last_used = Some(Utc::now());
        let consumed = entry.clone();

        let content = serde_json::to_string_pretty(&codes)?;
        fs::write(self.access_codes_path(), content).await?;

        Ok(Some(consumed))
    }

    async fn store_pdf(&self, filename: &str, content: &[u8]) -> WebServerResult<String> {
        // the name must stay a bare file name inside the PDF directory
        if filename.contains(['/', '\\']) || filename == ".." || filename == "." {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path-like PDF filename: {filename}"),
            )
            .into());
        }

        let path = self.pdfs_dir().join(filename);
        fs::write(&path, content).await?;
        debug!("💾 Stored PDF at {}", path.display());
        Ok(format!("horoscopes_pdf/{filename}"))
    }

    async fn store_document(&self, document: &HoroscopeDocument) -> WebServerResult<String> {
        let id = Uuid::new_v4().to_string();
        let path = self.documents_dir().join(format!("{id}.json"));
        let content = serde_json::to_string_pretty(document)?;
        fs::write(&path, content).await?;
        debug!("💾 Stored horoscope document at {}", path.display());
        Ok(id)
    }

    async fn check_connection(&self) -> bool {
        fs::metadata(&self.base_dir).await.is_ok()
    }
}
