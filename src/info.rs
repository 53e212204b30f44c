//! Build Information Record
//!
//! One run's worth of provider answers, gathered in query order.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::InfoError;
use crate::provider::BuildInfoProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub version: String,
    #[serde(default)]
    pub version_number: usize,
    pub release_date: String,
    pub quantum_range: String,
    #[serde(default)]
    pub quantum_range_value: usize,
    pub quantum_depth: String,
    #[serde(default)]
    pub quantum_depth_value: usize,
    pub package_name: String,
    pub license: String,
    pub home_url: String,
    pub features: String,
    pub delegates: String,
    pub copyright: String,
}

impl BuildInfo {
    /// Query the provider once per property, in report order.
    pub fn collect(provider: &dyn BuildInfoProvider) -> Self {
        let (version, version_number) = provider.version();
        debug!(%version, version_number, "queried version");
        let release_date = provider.release_date();
        debug!(%release_date, "queried release date");
        let (quantum_range, quantum_range_value) = provider.quantum_range();
        debug!(%quantum_range, quantum_range_value, "queried quantum range");
        let (quantum_depth, quantum_depth_value) = provider.quantum_depth();
        debug!(%quantum_depth, quantum_depth_value, "queried quantum depth");
        let package_name = provider.package_name();
        debug!(%package_name, "queried package name");
        let license = provider.license();
        debug!(%license, "queried license");
        let home_url = provider.home_url();
        debug!(%home_url, "queried home URL");
        let features = provider.features();
        debug!(%features, "queried features");
        let delegates = provider.delegates();
        debug!(%delegates, "queried delegates");
        let copyright = provider.copyright();
        debug!(%copyright, "queried copyright");

        Self {
            version,
            version_number,
            release_date,
            quantum_range,
            quantum_range_value,
            quantum_depth,
            quantum_depth_value,
            package_name,
            license,
            home_url,
            features,
            delegates,
            copyright,
        }
    }

    /// Load a report previously captured with `--json`.
    ///
    /// Extra fields such as `fingerprint` or `profile` are ignored.
    pub fn load_snapshot(path: &Path) -> Result<Self, InfoError> {
        let content = fs::read_to_string(path).map_err(|source| InfoError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        let info = serde_json::from_str(&content).map_err(|source| InfoError::SnapshotFormat {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded snapshot");
        Ok(info)
    }

    pub fn feature_tokens(&self) -> impl Iterator<Item = &str> + Clone {
        self.features.split_whitespace()
    }

    pub fn delegate_tokens(&self) -> impl Iterator<Item = &str> + Clone {
        self.delegates.split_whitespace()
    }
}

/// A captured record replays its answers verbatim.
impl BuildInfoProvider for BuildInfo {
    fn version(&self) -> (String, usize) {
        (self.version.clone(), self.version_number)
    }

    fn release_date(&self) -> String {
        self.release_date.clone()
    }

    fn quantum_range(&self) -> (String, usize) {
        (self.quantum_range.clone(), self.quantum_range_value)
    }

    fn quantum_depth(&self) -> (String, usize) {
        (self.quantum_depth.clone(), self.quantum_depth_value)
    }

    fn package_name(&self) -> String {
        self.package_name.clone()
    }

    fn license(&self) -> String {
        self.license.clone()
    }

    fn home_url(&self) -> String {
        self.home_url.clone()
    }

    fn features(&self) -> String {
        self.features.clone()
    }

    fn delegates(&self) -> String {
        self.delegates.clone()
    }

    fn copyright(&self) -> String {
        self.copyright.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> BuildInfo {
        BuildInfo {
            version: "ImageMagick 7.0.8-10 Q16 x86_64 2018-08-12".to_string(),
            version_number: 0x708,
            release_date: "2018-08-12".to_string(),
            quantum_range: "65535".to_string(),
            quantum_range_value: 65535,
            quantum_depth: "Q16".to_string(),
            quantum_depth_value: 16,
            package_name: "ImageMagick".to_string(),
            license: "https://imagemagick.org/script/license.php".to_string(),
            home_url: "https://imagemagick.org".to_string(),
            features: "Cipher DPC HDRI OpenMP(4.5)".to_string(),
            delegates: "bzlib jpeg png zlib".to_string(),
            copyright: "Copyright (C) 1999-2018 ImageMagick Studio LLC".to_string(),
        }
    }

    #[test]
    fn test_collect_replays_snapshot() {
        let info = sample();
        assert_eq!(BuildInfo::collect(&info), info);
    }

    #[test]
    fn test_tokens_split_on_whitespace() {
        let info = sample();
        let delegates: Vec<_> = info.delegate_tokens().collect();
        assert_eq!(delegates, vec!["bzlib", "jpeg", "png", "zlib"]);
        assert!(info.feature_tokens().any(|t| t == "HDRI"));
    }

    #[test]
    fn test_snapshot_numeric_fields_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": "7.1.0", "release_date": "2023-01-01",
                "quantum_range": "65535", "quantum_depth": "16",
                "package_name": "ImageMagick", "license": "Apache-2.0",
                "home_url": "https://imagemagick.org", "features": "HDRI",
                "delegates": "zlib", "copyright": "Copyright 1999",
                "fingerprint": "ignored"}}"#
        )
        .unwrap();

        let info = BuildInfo::load_snapshot(file.path()).unwrap();
        assert_eq!(info.version, "7.1.0");
        assert_eq!(info.version_number, 0);
        assert_eq!(info.quantum_depth_value, 0);
    }

    #[test]
    fn test_missing_snapshot_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BuildInfo::load_snapshot(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, InfoError::Snapshot { .. }));
    }

    #[test]
    fn test_malformed_snapshot_is_format_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"version": 7}}"#).unwrap();
        let err = BuildInfo::load_snapshot(file.path()).unwrap_err();
        assert!(matches!(err, InfoError::SnapshotFormat { .. }));
    }
}
