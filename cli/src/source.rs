#![deny(missing_docs)]

//! # Document Sources
//!
//! Reads the input document from a local file or, with the `client` feature,
//! from an `http(s)` URL.

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Where the input document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A path on the local filesystem.
    File(PathBuf),
    /// An `http` or `https` URL.
    Remote(Url),
}

impl Source {
    /// Classifies a locator. Anything that is not an `http(s)` URL is a path,
    /// including Windows drive letters that parse as a URL scheme.
    pub fn parse(locator: &str) -> Self {
        match Url::parse(locator) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Remote(url),
            _ => Source::File(PathBuf::from(locator)),
        }
    }

    /// Reads the document text.
    pub fn read(&self) -> CliResult<String> {
        match self {
            Source::File(path) => {
                tracing::debug!(path = %path.display(), "reading document");
                Ok(fs::read_to_string(path)?)
            }
            Source::Remote(url) => fetch(url),
        }
    }
}

#[cfg(feature = "client")]
fn fetch(url: &Url) -> CliResult<String> {
    tracing::debug!(url = %url, "fetching document");
    let mut response = ureq::get(url.as_str())
        .call()
        .map_err(|e| CliError::Fetch(format!("{}: {}", url, e)))?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|e| CliError::Fetch(format!("{}: {}", url, e)))
}

#[cfg(not(feature = "client"))]
fn fetch(url: &Url) -> CliResult<String> {
    Err(CliError::Fetch(format!(
        "{}: built without the `client` feature",
        url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locators() {
        assert!(matches!(
            Source::parse("https://example.com/swagger.json"),
            Source::Remote(_)
        ));
        assert_eq!(
            Source::parse("specs/petstore.yaml"),
            Source::File(PathBuf::from("specs/petstore.yaml"))
        );
        assert_eq!(
            Source::parse("C:\\specs\\api.json"),
            Source::File(PathBuf::from("C:\\specs\\api.json"))
        );
        assert!(matches!(Source::parse("file:///tmp/api.json"), Source::File(_)));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.yaml");
        fs::write(&path, "swagger: '2.0'\n").unwrap();

        let text = Source::File(path).read().unwrap();
        assert_eq!(text, "swagger: '2.0'\n");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let res = Source::parse("/definitely/not/here.json").read();
        assert!(matches!(res, Err(CliError::Io(_))));
    }
}
