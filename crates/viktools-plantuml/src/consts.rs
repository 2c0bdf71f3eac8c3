//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default HTTP timeout for Kroki requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Start marker prepended when the source has none.
pub(crate) const DEFAULT_START_MARKER: &str = "@startuml";

/// Prefix shared by every `PlantUML` start marker.
pub(crate) const START_PREFIX: &str = "@start";

/// Prefix shared by every `PlantUML` end marker.
pub(crate) const END_PREFIX: &str = "@end";

/// Diagram kind assumed when the start marker doesn't name one.
pub(crate) const DEFAULT_KIND: &str = "uml";

/// PNG file signature.
pub(crate) const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
