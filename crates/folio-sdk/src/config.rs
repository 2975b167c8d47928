//! Session configuration loaded from TOML.
//!
//! ```toml
//! data_dir = "/var/lib/folio"
//! owner = "alice"
//! blob_base_url = "https://cdn.example.com/files"
//! pretty = true
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_store::file::file_stem;
use folio_types::OwnerId;
use serde::{Deserialize, Serialize};

use crate::blob::UrlTemplateResolver;
use crate::error::{SdkError, SdkResult};

/// Directory name for version documents under `data_dir`.
const VERSIONS_DIR: &str = "versions";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Where working trees and version documents live.
    pub data_dir: PathBuf,
    /// Owner used when none is given on the command line.
    pub owner: Option<String>,
    /// Base URL for resolving blob references.
    pub blob_base_url: Option<String>,
    /// Write JSON documents indented.
    pub pretty: bool,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".folio"),
            owner: None,
            blob_base_url: None,
            pretty: true,
        }
    }
}

impl FolioConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> SdkResult<Self> {
        toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Load from `path`; the file must exist.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load from `path`, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> SdkResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// The configured owner, validated.
    pub fn owner_id(&self) -> SdkResult<OwnerId> {
        let raw = self
            .owner
            .as_deref()
            .ok_or_else(|| SdkError::Config("no owner configured".into()))?;
        Ok(OwnerId::new(raw)?)
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.data_dir.join(VERSIONS_DIR)
    }

    /// File holding `owner`'s uncommitted working tree.
    pub fn work_path(&self, owner: &OwnerId) -> PathBuf {
        self.data_dir.join(format!("{}.work.json", file_stem(owner)))
    }

    /// A URL resolver, if a base URL is configured.
    pub fn blob_resolver(&self) -> SdkResult<Option<UrlTemplateResolver>> {
        self.blob_base_url
            .as_deref()
            .map(UrlTemplateResolver::new)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = FolioConfig::default();
        assert_eq!(c.data_dir, PathBuf::from(".folio"));
        assert!(c.owner.is_none());
        assert!(c.blob_base_url.is_none());
        assert!(c.pretty);
        assert_eq!(c.versions_dir(), PathBuf::from(".folio/versions"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = FolioConfig::from_toml("owner = \"alice\"\npretty = false\n").unwrap();
        assert_eq!(c.owner.as_deref(), Some("alice"));
        assert!(!c.pretty);
        assert_eq!(c.data_dir, PathBuf::from(".folio"));
        assert_eq!(c.owner_id().unwrap().as_str(), "alice");
    }

    #[test]
    fn bad_toml_is_config_error() {
        assert!(matches!(
            FolioConfig::from_toml("pretty = \"yes\""),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn missing_owner_is_config_error() {
        assert!(matches!(
            FolioConfig::default().owner_id(),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let c = FolioConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(c, FolioConfig::default());
        assert!(FolioConfig::load(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "data_dir = \"/srv/folio\"\nblob_base_url = \"https://cdn.test\"\n")
            .unwrap();
        let c = FolioConfig::load(&path).unwrap();
        assert_eq!(c.data_dir, PathBuf::from("/srv/folio"));
        assert!(c.blob_resolver().unwrap().is_some());
    }

    #[test]
    fn work_path_escapes_owner() {
        let c = FolioConfig::default();
        let owner = OwnerId::new("a/b").unwrap();
        assert_eq!(c.work_path(&owner), PathBuf::from(".folio/a%2Fb.work.json"));
    }
}
