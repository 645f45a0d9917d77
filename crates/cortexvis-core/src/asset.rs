//! Asset references coming from the mesh/texture listing.
//!
//! Listings carry either bare paths or `{name, path}` objects; both are
//! normalized into an [`AssetRecord`] before anything else looks at them.

use serde::{Deserialize, Serialize};

/// An asset as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Asset {
    Path(String),
    Named {
        #[serde(default, alias = "label")]
        name: Option<String>,
        path: String,
    },
}

/// Canonical asset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub name: String,
    pub path: String,
}

impl Asset {
    pub fn path(&self) -> &str {
        match self {
            Self::Path(path) | Self::Named { path, .. } => path,
        }
    }

    /// Display label: the explicit name when non-empty, else the basename.
    pub fn label(&self) -> &str {
        match self {
            Self::Named {
                name: Some(name), ..
            } if !name.is_empty() => name.as_str(),
            _ => basename(self.path()),
        }
    }

    pub fn normalize(&self) -> AssetRecord {
        AssetRecord {
            name: self.label().to_string(),
            path: self.path().to_string(),
        }
    }
}

impl From<Asset> for AssetRecord {
    fn from(asset: Asset) -> Self {
        asset.normalize()
    }
}

/// Last path component, accepting both `/` and `\` separators.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Normalizes a whole listing.
pub fn normalize_all(assets: &[Asset]) -> Vec<AssetRecord> {
    assets.iter().map(Asset::normalize).collect()
}
