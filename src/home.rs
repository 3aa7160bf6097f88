use crate::storage::FileStorage;
use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;

/// The `Home` object represents the `$FARM_LEDGER_HOME` directory: the root that holds
/// everything the program persists, with the record data files in a `data` subdirectory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Home {
    root: PathBuf,
    data: PathBuf,
}

impl Home {
    /// This will create the home directory and its `data` subdirectory, if they do not
    /// exist, and canonicalize itself.
    pub async fn new(farm_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = farm_home.into();
        make_dir(&maybe_relative)
            .await
            .context("Unable to create farm ledger home directory")?;
        let root = fs::canonicalize(&maybe_relative).await.with_context(|| {
            format!(
                "Unable to canonicalize the path {}",
                maybe_relative.to_string_lossy()
            )
        })?;
        let home = Self {
            root: root.clone(),
            data: root.join("data"),
        };
        make_dir(&home.data).await?;
        Ok(home)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data(&self) -> &Path {
        &self.data
    }

    /// A `FileStorage` rooted at the data directory.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data)
    }
}

async fn make_dir(p: &Path) -> Result<()> {
    fs::create_dir_all(p)
        .await
        .with_context(|| format!("Unable to create directory at {}", p.to_string_lossy()))
}

#[tokio::test]
async fn test_home() {
    use tempfile::TempDir;
    let dir = TempDir::new().unwrap();
    let home_dir = dir.path().to_owned();
    let home = Home::new(home_dir).await.unwrap();
    assert!(fs::read_dir(home.data()).await.is_ok());
    assert_eq!(home.storage().root(), home.data());
}
