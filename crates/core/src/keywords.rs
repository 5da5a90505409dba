//! Keyword list loading.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("Keyword file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read keyword file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered keywords; earlier keywords take priority when matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Reads one keyword per line from `path`.
    ///
    /// A missing file is an error: a run without keywords has nothing to do.
    pub async fn load(path: &Path) -> Result<Self, KeywordError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KeywordError::NotFound(path.to_path_buf())
            } else {
                KeywordError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Ok(Self::from_text(&text))
    }

    /// Parses newline-delimited keywords, trimming each and dropping blanks.
    pub fn from_text(text: &str) -> Self {
        Self {
            keywords: text
                .lines()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keywords: iter
                .into_iter()
                .map(|k| Into::<String>::into(k).trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }
}
