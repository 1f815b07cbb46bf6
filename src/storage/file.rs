use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::CartStorage;
use crate::cart_actor::StorageError;

/// Directory-backed storage: one file per key.
///
/// Keys are mapped to file names by escaping every byte outside
/// `[A-Za-z0-9.-]` as `_XX` (uppercase hex), so `@Desafio8:products` lands in
/// `_40Desafio8_3Aproducts.json`. The mapping is reversible, so distinct keys
/// never share a file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl CartStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        fs::write(&path, value).await?;
        debug!(path = %path.display(), "Stored value");
        Ok(())
    }
}
