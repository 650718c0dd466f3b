//! Local-file retrieval of wiki articles

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::FetchError;
use super::ContentSource;

/// Fetches article HTML from `.html` files in a directory.
///
/// A phrase maps to `{dir}/{phrase}.html`; filenames with literal spaces and
/// with underscore-substituted spaces are both accepted, the literal form
/// taking precedence.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn candidates(&self, phrase: &str) -> [PathBuf; 2] {
        [
            self.dir.join(format!("{phrase}.html")),
            self.dir.join(format!("{}.html", phrase.replace(' ', "_"))),
        ]
    }
}

#[async_trait]
impl ContentSource for FileSource {
    async fn fetch_html(&self, phrase: &str) -> Result<String, FetchError> {
        for path in self.candidates(phrase) {
            match fs::read_to_string(&path).await {
                Ok(html) => {
                    debug!("Read article '{}' from {}", phrase, path.display());
                    return Ok(html);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(FetchError::FileRead { path, source }),
            }
        }

        Err(FetchError::MissingLocalFile {
            phrase: phrase.to_string(),
            dir: self.dir.clone(),
        })
    }

    fn locate(&self, phrase: &str) -> String {
        let [literal, _] = self.candidates(phrase);
        literal.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_literal_space_filename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Team Rocket.html"), "<p>blast off</p>").unwrap();

        let source = FileSource::new(dir.path());
        let html = source.fetch_html("Team Rocket").await.unwrap();
        assert_eq!(html, "<p>blast off</p>");
    }

    #[tokio::test]
    async fn falls_back_to_underscored_filename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Team_Rocket.html"), "<p>again</p>").unwrap();

        let source = FileSource::new(dir.path());
        let html = source.fetch_html("Team Rocket").await.unwrap();
        assert_eq!(html, "<p>again</p>");
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();

        let source = FileSource::new(dir.path());
        let err = source.fetch_html("Missingno").await.unwrap_err();
        assert!(matches!(err, FetchError::MissingLocalFile { .. }));
    }
}
