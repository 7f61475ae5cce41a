use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Upper bound on the resolution of a prefetched video variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VideoResolution {
    #[cfg_attr(feature = "serde", serde(rename = "360p"))]
    P360,
    #[cfg_attr(feature = "serde", serde(rename = "480p"))]
    P480,
    #[cfg_attr(feature = "serde", serde(rename = "720p"))]
    P720,
    #[cfg_attr(feature = "serde", serde(rename = "1080p"))]
    P1080,
}

impl VideoResolution {
    pub fn height(self) -> u32 {
        match self {
            VideoResolution::P360 => 360,
            VideoResolution::P480 => 480,
            VideoResolution::P720 => 720,
            VideoResolution::P1080 => 1080,
        }
    }

    /// Nominal 16:9 width for this resolution.
    pub fn width(self) -> u32 {
        match self {
            VideoResolution::P360 => 640,
            VideoResolution::P480 => 854,
            VideoResolution::P720 => 1280,
            VideoResolution::P1080 => 1920,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoResolution::P360 => "360p",
            VideoResolution::P480 => "480p",
            VideoResolution::P720 => "720p",
            VideoResolution::P1080 => "1080p",
        }
    }
}

impl Display for VideoResolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoResolution {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "360p" | "360" => Ok(VideoResolution::P360),
            "480p" | "480" => Ok(VideoResolution::P480),
            "720p" | "720" => Ok(VideoResolution::P720),
            "1080p" | "1080" => Ok(VideoResolution::P1080),
            other => Err(ModelError::UnknownResolution(other.to_string())),
        }
    }
}

/// How eagerly a hidden playable handle buffers once attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VideoPreload {
    /// Fetch only enough to learn duration and dimensions.
    Metadata,
    /// Let the runtime buffer as much as it sees fit.
    Auto,
}

impl VideoPreload {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoPreload::Metadata => "metadata",
            VideoPreload::Auto => "auto",
        }
    }
}

impl Display for VideoPreload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoPreload {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metadata" => Ok(VideoPreload::Metadata),
            "auto" => Ok(VideoPreload::Auto),
            other => Err(ModelError::UnknownPreload(other.to_string())),
        }
    }
}
