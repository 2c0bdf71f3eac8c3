//! `PlantUML` source normalization.
//!
//! Rendering engines expect a document framed by a start marker
//! (`@startuml`, `@startmindmap`, ...) and the matching end marker. Users
//! usually paste just the diagram body, so the markers are added when
//! missing. Syntax is left to the engine.

use crate::consts::{DEFAULT_KIND, DEFAULT_START_MARKER, END_PREFIX, START_PREFIX};
use crate::error::RenderError;

/// Frame `source` with start/end markers.
///
/// Surrounding whitespace is trimmed. A missing start marker becomes
/// `@startuml`; a missing end marker is the one matching the start marker
/// (`@startmindmap` ends with `@endmindmap`).
///
/// # Errors
///
/// Returns [`RenderError::EmptySource`] if `source` is blank.
///
/// # Example
///
/// ```
/// use viktools_plantuml::normalize_source;
///
/// let framed = normalize_source("  A -> B\n").unwrap();
/// assert_eq!(framed, "@startuml\nA -> B\n@enduml");
/// assert_eq!(normalize_source(&framed).unwrap(), framed);
/// ```
pub fn normalize_source(source: &str) -> Result<String, RenderError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(RenderError::EmptySource);
    }

    let (mut normalized, kind) = match diagram_kind(trimmed) {
        Some(kind) => (trimmed.to_owned(), kind),
        None => (format!("{DEFAULT_START_MARKER}\n{trimmed}"), DEFAULT_KIND),
    };

    let end_marker = format!("{END_PREFIX}{kind}");
    if !normalized.ends_with(&end_marker) {
        normalized.push('\n');
        normalized.push_str(&end_marker);
    }

    Ok(normalized)
}

/// Diagram kind named by the leading start marker, if there is one.
///
/// `@startuml` gives `uml`, `@startuml(id=x)` gives `uml`, and a bare
/// `@start` falls back to `uml`.
fn diagram_kind(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(START_PREFIX)?;
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(rest.len());
    let kind = &rest[..end];
    Some(if kind.is_empty() { DEFAULT_KIND } else { kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wraps_bare_body() {
        assert_eq!(
            normalize_source("Alice -> Bob: hello").unwrap(),
            "@startuml\nAlice -> Bob: hello\n@enduml"
        );
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(
            normalize_source("\n\n  A -> B  \n\t").unwrap(),
            "@startuml\nA -> B\n@enduml"
        );
    }

    #[test]
    fn test_framed_source_unchanged() {
        let source = "@startuml\nAlice -> Bob\nBob -> Alice\n@enduml";
        assert_eq!(normalize_source(source).unwrap(), source);
    }

    #[test]
    fn test_idempotent() {
        for source in [
            "A -> B",
            "@startuml\nA -> B",
            "A -> B\n@enduml",
            "@startmindmap\n* root\n** child",
            "  @startuml\nA -> B\n@enduml  ",
        ] {
            let once = normalize_source(source).unwrap();
            let twice = normalize_source(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {source:?}");
        }
    }

    #[test]
    fn test_missing_end_marker_added() {
        assert_eq!(
            normalize_source("@startuml\nA -> B").unwrap(),
            "@startuml\nA -> B\n@enduml"
        );
    }

    #[test]
    fn test_missing_start_marker_added() {
        assert_eq!(
            normalize_source("A -> B\n@enduml").unwrap(),
            "@startuml\nA -> B\n@enduml"
        );
    }

    #[test]
    fn test_matching_end_marker_for_other_kinds() {
        assert_eq!(
            normalize_source("@startmindmap\n* root").unwrap(),
            "@startmindmap\n* root\n@endmindmap"
        );
        let gantt = "@startgantt\n[Task] lasts 5 days\n@endgantt";
        assert_eq!(normalize_source(gantt).unwrap(), gantt);
    }

    #[test]
    fn test_start_marker_with_id() {
        assert_eq!(
            normalize_source("@startuml(id=seq)\nA -> B").unwrap(),
            "@startuml(id=seq)\nA -> B\n@enduml"
        );
    }

    #[test]
    fn test_content_preserved_between_markers() {
        let body = "class Foo {\n  +bar(): int\n}\n\nFoo <|-- Baz";
        let normalized = normalize_source(body).unwrap();
        assert!(normalized.starts_with("@startuml\n"));
        assert!(normalized.ends_with("\n@enduml"));
        assert_eq!(
            &normalized["@startuml\n".len()..normalized.len() - "\n@enduml".len()],
            body
        );
    }

    #[test]
    fn test_blank_source_rejected() {
        for source in ["", "   ", "\n\t\n"] {
            let err = normalize_source(source).unwrap_err();
            assert!(matches!(err, RenderError::EmptySource));
            assert!(err.is_invalid_input());
        }
    }

    #[test]
    fn test_diagram_kind() {
        assert_eq!(diagram_kind("@startuml\nA"), Some("uml"));
        assert_eq!(diagram_kind("@startwbs\n* a"), Some("wbs"));
        assert_eq!(diagram_kind("@start\nA"), Some("uml"));
        assert_eq!(diagram_kind("A -> B"), None);
    }
}
