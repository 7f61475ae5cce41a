use std::fmt::{Display, Formatter};

use crate::ids::MediaId;

/// Whether an item is a still image or a playable video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    #[default]
    Photo,
    Video,
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "Photo"),
            MediaKind::Video => write!(f, "Video"),
        }
    }
}

/// A feed entry as handed to the preloader by the feed view.
///
/// `base_url` is the service's base content reference; sized and
/// quality-specific variants are derived from it by a resolver owned by the
/// caller. Items added locally carry `is_local = true` and have no remote
/// variant to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaItem {
    pub id: MediaId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_local: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn photo(id: MediaId, base_url: impl Into<String>) -> Self {
        Self {
            id,
            base_url: Some(base_url.into()),
            is_local: false,
            kind: MediaKind::Photo,
        }
    }

    pub fn video(id: MediaId, base_url: impl Into<String>) -> Self {
        Self {
            id,
            base_url: Some(base_url.into()),
            is_local: false,
            kind: MediaKind::Video,
        }
    }

    /// Mark the item as locally added.
    pub fn local(mut self) -> Self {
        self.is_local = true;
        self
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// Base reference, treating an empty string the same as a missing one.
    pub fn base_reference(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|base| !base.is_empty())
    }

    /// True when there is a remote variant that could be prefetched.
    pub fn is_prefetchable(&self) -> bool {
        !self.is_local && self.base_reference().is_some()
    }
}
