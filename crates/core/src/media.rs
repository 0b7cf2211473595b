use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::mime;

/// Broad class of a media artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME content type. Returns `None` for anything that is
    /// neither an accepted image nor an accepted video type.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if mime::is_image(content_type) {
            Some(Self::Image)
        } else if mime::is_video(content_type) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// Where the bytes of a publish request come from.
#[derive(Clone)]
pub enum MediaSource {
    /// Media already reachable at a public URL.
    PublicUrl(String),
    /// Media already on local disk.
    LocalFile(PathBuf),
    /// Media held in memory, e.g. a just-received upload.
    InMemory {
        data: Bytes,
        filename: String,
        content_type: Option<String>,
    },
}

impl fmt::Debug for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicUrl(url) => f.debug_tuple("PublicUrl").field(url).finish(),
            Self::LocalFile(path) => f.debug_tuple("LocalFile").field(path).finish(),
            Self::InMemory {
                data,
                filename,
                content_type,
            } => f
                .debug_struct("InMemory")
                .field("len", &data.len())
                .field("filename", filename)
                .field("content_type", content_type)
                .finish(),
        }
    }
}

/// What a publisher's wire protocol needs in order to consume media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRequirement {
    /// The platform fetches the media itself from a public URL.
    PublicUrl,
    /// The publisher uploads raw bytes read from a local file.
    LocalBytes,
}

/// A resolved media location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MediaLocation {
    PublicUrl(String),
    LocalPath(PathBuf),
}

impl MediaLocation {
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::PublicUrl(url) => Some(url),
            Self::LocalPath(_) => None,
        }
    }
}

impl fmt::Display for MediaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicUrl(url) => f.write_str(url),
            Self::LocalPath(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Media placed where a publisher protocol can consume it.
///
/// Short-lived: created right before a publish call and released right
/// after it. Whoever created a temporary backing file owns its deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedMedia {
    pub kind: MediaKind,
    pub location: MediaLocation,
    /// Content type when known (from the upload or a download response).
    pub content_type: Option<String>,
}

impl StagedMedia {
    pub fn url(kind: MediaKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            location: MediaLocation::PublicUrl(url.into()),
            content_type: None,
        }
    }

    pub fn local(kind: MediaKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            location: MediaLocation::LocalPath(path.into()),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
