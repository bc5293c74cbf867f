//! Media locator resolution.
//!
//! The backend returns video URLs relative to its own origin
//! (`/videos/intro.mp4`); media elements need absolute URLs.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum MediaOriginError {
    #[error("Invalid media origin: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Media origin must be http(s): {0}")]
    UnsupportedScheme(String),
}

/// Scheme, host and port of the server that serves generated media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaOrigin(Url);

impl MediaOrigin {
    /// Parse an origin such as `http://localhost:8000`. Any path is dropped.
    pub fn parse(origin: &str) -> Result<Self, MediaOriginError> {
        let url = Url::parse(origin)?;
        Self::from_url(&url)
    }

    /// Derive the origin from any URL on the same server, e.g. the API base.
    pub fn from_url(url: &Url) -> Result<Self, MediaOriginError> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(MediaOriginError::UnsupportedScheme(url.scheme().to_string()));
        }
        let mut origin = url.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);
        Ok(Self(origin))
    }

    /// Origin without trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Turn a video locator into an absolute URL.
    ///
    /// Absolute locators are returned unchanged.
    pub fn resolve(&self, locator: &str) -> String {
        if Url::parse(locator).is_ok() {
            return locator.to_string();
        }
        match self.0.join(locator) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}/{}", self.as_str(), locator.trim_start_matches('/')),
        }
    }
}

impl Default for MediaOrigin {
    fn default() -> Self {
        Self(Url::parse("http://localhost:8000/").expect("static origin is valid"))
    }
}
