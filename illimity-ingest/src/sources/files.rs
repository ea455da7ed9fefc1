use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use illimity_core::{NotificationSource, RawNotification};

use crate::sources::eml::extract_plain_body;
use crate::types::{NotificationFile, SourceFormat};

/// Read a single notification file into a newline-collapsed body.
pub fn read_notification(file: &NotificationFile) -> Result<RawNotification> {
    let body = match file.format {
        SourceFormat::Eml => {
            let bytes = fs::read(&file.path).with_context(|| format!("read {}", file.path.display()))?;
            extract_plain_body(&bytes).with_context(|| format!("parsing {}", file.path.display()))?
        }
        SourceFormat::Text => fs::read_to_string(&file.path)
            .with_context(|| format!("read {}", file.path.display()))?,
    };
    Ok(RawNotification::from_multiline(&body))
}

/// Collect `.eml` / `.txt` files from a file or a directory (non-recursive),
/// sorted by path so runs are reproducible.
pub fn collect_notification_files(input: &Path) -> Result<Vec<NotificationFile>> {
    if !input.exists() {
        bail!("input not found: {}", input.display());
    }

    if input.is_file() {
        let format = SourceFormat::from_path(input).unwrap_or(SourceFormat::Text);
        return Ok(vec![NotificationFile {
            path: input.to_path_buf(),
            format,
        }]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input).with_context(|| format!("list {}", input.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match SourceFormat::from_path(&path) {
            Some(format) => files.push(NotificationFile { path, format }),
            None => debug!(path = %path.display(), "ignoring non-notification file"),
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Notifications stored as files. Acknowledging moves them into `archive`,
/// the on-disk counterpart of marking a mail read and trashing it.
#[derive(Debug, Clone)]
pub struct FileSource {
    input: PathBuf,
    archive: Option<PathBuf>,
    fetched: Vec<NotificationFile>,
}

impl FileSource {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            archive: None,
            fetched: Vec::new(),
        }
    }

    pub fn with_archive(mut self, archive: impl Into<PathBuf>) -> Self {
        self.archive = Some(archive.into());
        self
    }
}

impl NotificationSource for FileSource {
    /// Files that cannot be read are logged and left in place; they are not
    /// archived either, so they show up again on the next run.
    fn fetch(&mut self) -> Result<Vec<RawNotification>> {
        let files = collect_notification_files(&self.input)?;
        info!(count = files.len(), input = %self.input.display(), "collected notification files");

        self.fetched.clear();
        let mut notifications = Vec::with_capacity(files.len());
        for file in files {
            match read_notification(&file) {
                Ok(raw) => {
                    notifications.push(raw);
                    self.fetched.push(file);
                }
                Err(e) => warn!(
                    path = %file.path.display(),
                    error = %format!("{e:#}"),
                    "skipping unreadable notification"
                ),
            }
        }
        Ok(notifications)
    }

    fn acknowledge(&mut self) -> Result<()> {
        let Some(archive) = &self.archive else {
            return Ok(());
        };
        fs::create_dir_all(archive).with_context(|| format!("create {}", archive.display()))?;

        for file in self.fetched.drain(..) {
            let Some(name) = file.path.file_name() else {
                continue;
            };
            let target = archive.join(name);
            fs::rename(&file.path, &target).with_context(|| {
                format!("move {} -> {}", file.path.display(), target.display())
            })?;
            debug!(from = %file.path.display(), to = %target.display(), "archived notification");
        }
        Ok(())
    }
}
