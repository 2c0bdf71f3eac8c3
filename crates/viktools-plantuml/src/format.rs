//! Output formats.

use std::fmt;
use std::str::FromStr;

/// Image format produced by a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramFormat {
    /// Raster image.
    #[default]
    Png,
    /// Vector image as UTF-8 markup.
    Svg,
}

impl DiagramFormat {
    /// Format name as used in engine endpoints, CLI flags and file extensions.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// MIME type of the rendered output.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, thiserror::Error)]
#[error("unsupported diagram format '{0}' (expected 'png' or 'svg')")]
pub struct UnknownFormat(String);

impl FromStr for DiagramFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}
