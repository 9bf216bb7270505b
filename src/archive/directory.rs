use crate::archive::ArchiveGateway;
use crate::error::{ProcessingError, Result};
use crate::models::Table;
use crate::readers::TableReader;
use crate::writers::write_csv;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Archive backed by a local directory laid out as `{root}/{bucket}/{key}.csv`
pub struct DirectoryArchive {
    bucket_dir: PathBuf,
}

impl DirectoryArchive {
    pub fn new(root: &Path, bucket: &str) -> Result<Self> {
        if bucket.is_empty() || bucket.contains(|c: char| c == '/' || c == '\\') {
            return Err(ProcessingError::Config(format!(
                "Invalid bucket name: '{}'",
                bucket
            )));
        }
        let bucket_dir = root.join(bucket);
        fs::create_dir_all(&bucket_dir)?;
        Ok(Self { bucket_dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.bucket_dir.join(format!("{}.csv", key))
    }
}

impl ArchiveGateway for DirectoryArchive {
    fn put(&self, key: &str, table: &Table) -> Result<()> {
        // Write next to the target and rename so readers never see a partial file
        let temp = NamedTempFile::new_in(&self.bucket_dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            write_csv(table, &mut writer)?;
            writer.flush()?;
        }

        let path = self.path_for(key);
        temp.persist(&path).map_err(|e| ProcessingError::Io(e.error))?;

        debug!(key, path = %path.display(), rows = table.len(), "Stored archive");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Table> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Err(ProcessingError::ArchiveNotFound {
                key: key.to_string(),
            });
        }
        TableReader::new().read_path(&path)
    }
}
