use std::fmt;

use serde::{Deserialize, Serialize};

/// Key identifying a piece of content in the progress store
///
/// Catalog ids arrive as integers from the metadata API and as strings from
/// routes, so both convert into the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Create a content id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ContentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for ContentId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

/// What the caller hands the player for one title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSource {
    /// Direct media URL
    pub media_url: String,

    /// Title shown in the controls and the overlay
    pub title: String,

    /// Poster shown before playback starts
    pub poster_url: Option<String>,

    /// Backdrop image behind the resume prompt
    pub backdrop_url: Option<String>,
}

impl MediaSource {
    /// Create a source with just a URL and title
    pub fn new(media_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
            title: title.into(),
            poster_url: None,
            backdrop_url: None,
        }
    }

    /// Attach a poster image
    #[must_use]
    pub fn with_poster(mut self, url: impl Into<String>) -> Self {
        self.poster_url = Some(url.into());
        self
    }

    /// Attach a backdrop image
    #[must_use]
    pub fn with_backdrop(mut self, url: impl Into<String>) -> Self {
        self.backdrop_url = Some(url.into());
        self
    }
}
