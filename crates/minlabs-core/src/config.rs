//! Widget configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minlabs_interaction::PageLayout;
use minlabs_quotes::DEFAULT_STORAGE_KEY;
use minlabs_storage::{Database, MemoryStorage, SharedStorage};

use crate::error::CoreError;
use crate::Result;

/// Host page used when no `page_path` is configured.
pub const DEFAULT_PAGE: &str = include_str!("../assets/index.html");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file holding the local storage table
    Sqlite { path: PathBuf },
    /// Process memory, nothing survives a restart
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where local storage lives
    pub storage: StorageBackend,
    /// Key holding the serialized quote list
    pub storage_key: String,
    /// Host page markup; the built-in page when unset
    pub page_path: Option<PathBuf>,
    /// Element ids inside the host page
    #[serde(default)]
    pub layout: PageLayout,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            storage: StorageBackend::Sqlite {
                path: data_dir.join("minlabs.db"),
            },
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            page_path: None,
            layout: PageLayout::default(),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            ..Self::new(PathBuf::new())
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("MinLabs"))
            .unwrap_or_else(|| PathBuf::from(".minlabs"))
    }

    /// Read a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;
        if config.storage_key.trim().is_empty() {
            return Err(CoreError::Config("storage_key cannot be empty".to_string()));
        }
        Ok(config)
    }

    pub fn open_storage(&self) -> Result<SharedStorage> {
        let storage: SharedStorage = match &self.storage {
            StorageBackend::Sqlite { path } => Arc::new(Database::open(path)?),
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        };
        Ok(storage)
    }

    pub fn page_markup(&self) -> Result<String> {
        match &self.page_path {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => Ok(DEFAULT_PAGE.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/minlabs-test"));
        assert_eq!(config.storage_key, "minlabs_presupuestos");
        assert_eq!(
            config.storage,
            StorageBackend::Sqlite {
                path: PathBuf::from("/tmp/minlabs-test/minlabs.db")
            }
        );
        assert_eq!(config.layout.quote_list, "lista-presupuestos");
        assert!(Config::data_dir().ends_with("MinLabs") || Config::data_dir().ends_with(".minlabs"));
    }

    #[test]
    fn test_config_from_json() {
        let raw = r#"{
            "storage": { "kind": "memory" },
            "storage_key": "custom_key",
            "page_path": null
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.storage_key, "custom_key");
        assert_eq!(config.layout, PageLayout::default());
    }

    #[test]
    fn test_load_rejects_empty_key() {
        let path = std::env::temp_dir().join(format!(
            "minlabs-config-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"storage":{"kind":"memory"},"storage_key":" ","page_path":null}"#,
        )
        .unwrap();

        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_builtin_page_markup() {
        let markup = Config::in_memory().page_markup().unwrap();
        assert!(markup.contains("id=\"lista-presupuestos\""));
    }
}
