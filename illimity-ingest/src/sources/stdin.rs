use anyhow::{Context, Result};
use std::io::Read;

use illimity_core::{NotificationSource, RawNotification};

use crate::sources::eml::extract_plain_body;

/// One notification piped in on standard input, either a bare body or a full
/// message when `eml` is set.
pub struct StdinSource<R> {
    reader: R,
    eml: bool,
}

impl StdinSource<std::io::Stdin> {
    pub fn new(eml: bool) -> Self {
        Self::from_reader(std::io::stdin(), eml)
    }
}

impl<R: Read> StdinSource<R> {
    pub fn from_reader(reader: R, eml: bool) -> Self {
        Self { reader, eml }
    }
}

impl<R: Read> NotificationSource for StdinSource<R> {
    fn fetch(&mut self) -> Result<Vec<RawNotification>> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes).context("read stdin")?;
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        let body = if self.eml {
            extract_plain_body(&bytes)?
        } else {
            String::from_utf8(bytes).context("stdin is not valid UTF-8")?
        };
        Ok(vec![RawNotification::from_multiline(&body)])
    }
}
