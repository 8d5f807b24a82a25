//! Outgoing Replies
//!
//! What the dialog hands back to the transport: text messages with an
//! optional keyboard or link button, and chart images backed by scoped
//! temp files.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::menu::BACK;
use crate::params::SortCriteria;

/// Fixed grid of button labels
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    pub fn from_rows(rows: Vec<Vec<&str>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<&str>) {
        self.rows.push(row.into_iter().map(String::from).collect());
    }

    /// All labels, row by row
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }

    /// Top-holder sort fields, two per row, then Back
    pub fn sort_criteria() -> Self {
        let mut rows: Vec<Vec<&str>> = SortCriteria::ALL
            .chunks(2)
            .map(|pair| pair.iter().map(SortCriteria::as_str).collect())
            .collect();
        rows.push(vec![BACK]);
        Self::from_rows(rows)
    }

    pub fn sort_order() -> Self {
        Self::from_rows(vec![vec!["asc", "desc"], vec![BACK]])
    }
}

/// Inline URL button attached to a message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkButton {
    pub text: String,
    pub url: String,
}

impl LinkButton {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// A text message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextReply {
    pub body: String,

    /// Body uses lightweight markdown (`*bold*`, `` `code` ``)
    pub markdown: bool,

    /// Keyboard to present with the message; `None` keeps the current one
    pub keyboard: Option<Keyboard>,

    pub link: Option<LinkButton>,
}

/// One outgoing message
#[derive(Debug)]
pub enum Reply {
    Text(TextReply),
    Photo {
        artifact: ChartArtifact,
        caption: Option<String>,
    },
}

impl Reply {
    pub fn text(body: impl Into<String>) -> Self {
        Reply::Text(TextReply {
            body: body.into(),
            markdown: true,
            keyboard: None,
            link: None,
        })
    }

    pub fn with_keyboard(body: impl Into<String>, keyboard: Keyboard) -> Self {
        Reply::Text(TextReply {
            body: body.into(),
            markdown: true,
            keyboard: Some(keyboard),
            link: None,
        })
    }

    pub fn with_link(body: impl Into<String>, link: LinkButton) -> Self {
        Reply::Text(TextReply {
            body: body.into(),
            markdown: true,
            keyboard: None,
            link: Some(link),
        })
    }

    /// Text body, if this is a text message
    pub fn body(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(&text.body),
            Reply::Photo { .. } => None,
        }
    }

    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Reply::Text(text) => text.keyboard.as_ref(),
            Reply::Photo { .. } => None,
        }
    }
}

/// A rendered chart on disk, removed when dropped.
///
/// Files are named `vybe-<user>-<uuid>.png` so concurrent sessions never
/// collide. Dropping the artifact deletes the file on every path, including
/// a failed send.
#[derive(Debug)]
pub struct ChartArtifact {
    file: NamedTempFile,
}

impl ChartArtifact {
    /// Write `bytes` to a fresh file in `dir`
    pub fn create(dir: &Path, user: &str, bytes: &[u8]) -> crate::Result<Self> {
        let prefix = format!("vybe-{}-{}", sanitize(user), Uuid::new_v4());
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".png")
            .rand_bytes(0)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the image back for delivery
    pub async fn read(&self) -> crate::Result<Vec<u8>> {
        Ok(tokio::fs::read(self.path()).await?)
    }
}

fn sanitize(user: &str) -> String {
    let cleaned: String = user
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(32)
        .collect();
    if cleaned.is_empty() { "anon".into() } else { cleaned }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_artifact_is_deleted_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ChartArtifact::create(dir.path(), "42", b"\x89PNG").unwrap();
        let path = artifact.path().to_path_buf();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("vybe-42-"));
        assert!(name.ends_with(".png"));
        assert_eq!(artifact.read().await.unwrap(), b"\x89PNG");

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_artifact_names_are_unique_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let a = ChartArtifact::create(dir.path(), "7", b"a").unwrap();
        let b = ChartArtifact::create(dir.path(), "7", b"b").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_user_id_cannot_escape_dir() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ChartArtifact::create(dir.path(), "../../etc", b"x").unwrap();
        assert_eq!(artifact.path().parent().unwrap(), dir.path());
    }

    #[test]
    fn test_sort_keyboards() {
        let criteria = Keyboard::sort_criteria();
        assert_eq!(criteria.labels().count(), 7);
        assert_eq!(criteria.rows.last().unwrap(), &vec![BACK.to_string()]);
        assert!(Keyboard::sort_order().labels().any(|l| l == "desc"));
    }
}
