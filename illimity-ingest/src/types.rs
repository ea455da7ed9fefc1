use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// RFC 822 message as exported by a mail client
    Eml,
    /// Plain-text body copied out of a message
    Text,
}

impl SourceFormat {
    /// Detect from the file extension. Other files are not notifications.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "eml" => Some(SourceFormat::Eml),
            "txt" => Some(SourceFormat::Text),
            _ => None,
        }
    }
}

/// A file holding exactly one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFile {
    pub path: PathBuf,
    pub format: SourceFormat,
}
