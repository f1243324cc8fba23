//! Component GUID supply.
//!
//! Each new component consumes exactly one token. Tokens are written in the
//! registry form `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`.

use crate::error::{MsiError, Result};
use std::collections::VecDeque;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// Sequential source of unique component tokens.
pub trait UuidSource {
    fn next_uuid(&mut self) -> Result<String>;
}

fn registry_form(uuid: &Uuid) -> String {
    format!("{{{}}}", uuid.hyphenated().to_string().to_uppercase())
}

/// Pre-generated tokens read from a text file, one per line.
#[derive(Debug, Clone)]
pub struct FileUuidSource {
    source_name: String,
    tokens: VecDeque<String>,
    consumed: usize,
}

impl FileUuidSource {
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MsiError::Resource(format!("Could not open file: {}: {}", path.display(), e))
        })?;
        Self::from_text(&path.display().to_string(), &text)
    }

    /// Parse tokens from `text`; blank lines are skipped, braces are optional.
    pub fn from_text(source_name: &str, text: &str) -> Result<Self> {
        let mut tokens = VecDeque::new();
        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let bare = trimmed.trim_start_matches('{').trim_end_matches('}');
            let uuid = Uuid::parse_str(bare).map_err(|e| {
                MsiError::Resource(format!(
                    "{}:{}: malformed UUID {:?}: {}",
                    source_name,
                    line_no + 1,
                    trimmed,
                    e
                ))
            })?;
            tokens.push_back(registry_form(&uuid));
        }
        debug!(source = source_name, count = tokens.len(), "Loaded UUIDs");
        Ok(Self {
            source_name: source_name.to_string(),
            tokens,
            consumed: 0,
        })
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl UuidSource for FileUuidSource {
    fn next_uuid(&mut self) -> Result<String> {
        let token = self.tokens.pop_front().ok_or_else(|| {
            MsiError::Resource(format!(
                "Ran out of UUIDs in {} after {} components",
                self.source_name, self.consumed
            ))
        })?;
        self.consumed += 1;
        Ok(token)
    }
}

/// Random version 4 tokens, for runs without a UUID file.
#[derive(Debug, Clone, Default)]
pub struct GeneratedUuidSource;

impl UuidSource for GeneratedUuidSource {
    fn next_uuid(&mut self) -> Result<String> {
        Ok(registry_form(&Uuid::new_v4()))
    }
}

impl<T: UuidSource + ?Sized> UuidSource for Box<T> {
    fn next_uuid(&mut self) -> Result<String> {
        (**self).next_uuid()
    }
}
