use std::path::{Path, PathBuf};

/// Result of looking for the optional banner image.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetStatus {
    Present(PathBuf),
    Missing(PathBuf),
}

impl AssetStatus {
    /// Warning to show when the image is absent. Scoring is unaffected.
    pub fn warning(&self) -> Option<String> {
        match self {
            AssetStatus::Present(_) => None,
            AssetStatus::Missing(path) => Some(format!(
                "Loan default image not found at {}",
                path.display()
            )),
        }
    }
}

pub fn probe_banner(path: &Path) -> AssetStatus {
    if path.is_file() {
        AssetStatus::Present(path.to_path_buf())
    } else {
        AssetStatus::Missing(path.to_path_buf())
    }
}
