// Data document client
//
// Wraps `reqwest::Client` for the one GET the viewer ever makes, plus a
// local-file path for offline use. There is no retry and no timeout: the
// caller issues `fetch` once and lives with the outcome.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::RawDocument;

/// Relative location of the data document under the source base.
pub const DEFAULT_DATA_PATH: &str = "data/data.json";

/// Keep at most this much of a malformed body in `Error::Deserialization`.
const BODY_PREVIEW_LEN: usize = 512;

/// Where the data document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Served over HTTP(S).
    Remote(Url),
    /// Read from the local filesystem.
    Local(PathBuf),
}

impl DataSource {
    /// Resolve `relative` against a base that is either an `http(s)://` URL
    /// or a directory (optionally written as `file://...`).
    ///
    /// URL bases are treated as directories: `https://host/viewer` and
    /// `https://host/viewer/` both resolve to `https://host/viewer/<relative>`.
    pub fn resolve(base: &str, relative: &str) -> Result<Self, Error> {
        if base.starts_with("http://") || base.starts_with("https://") {
            let mut url = Url::parse(base)?;
            if !url.path().ends_with('/') {
                let dir = format!("{}/", url.path());
                url.set_path(&dir);
            }
            return Ok(Self::Remote(url.join(relative)?));
        }

        let dir = base.strip_prefix("file://").unwrap_or(base);
        Ok(Self::Local(Path::new(dir).join(relative)))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One-shot client for the crafting data document.
pub struct DataClient {
    http: reqwest::Client,
    source: DataSource,
}

impl DataClient {
    /// Create a client with a default `reqwest::Client`.
    pub fn new(source: DataSource) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("astrodex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, source })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, source: DataSource) -> Self {
        Self { http, source }
    }

    /// Where this client reads from.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch and decode the data document.
    pub async fn fetch(&self) -> Result<RawDocument, Error> {
        let body = match &self.source {
            DataSource::Remote(url) => self.get_text(url).await?,
            DataSource::Local(path) => read_local(path).await?,
        };
        parse_document(&body)
    }

    async fn get_text(&self, url: &Url) -> Result<String, Error> {
        debug!(%url, "GET data document");
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = resp.text().await?;
        trace!(bytes = body.len(), "data document received");
        Ok(body)
    }
}

async fn read_local(path: &Path) -> Result<String, Error> {
    debug!(path = %path.display(), "reading data document");
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode a document body, keeping a preview of the body on failure.
pub fn parse_document(body: &str) -> Result<RawDocument, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.chars().take(BODY_PREVIEW_LEN).collect(),
    })
}
