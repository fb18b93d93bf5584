//! The `enclave.lock` manifest format.
//!
//! ```text
//! # generated by enclos 0.1.0
//! dependencies:
//!   -/bin/ls
//!   -/usr/bin/git
//! ```
//!
//! The `  -<path>` entry layout (two spaces, dash, no separator) is the
//! compatibility contract with existing lock files. Paths are written
//! verbatim; a path containing a newline cannot be represented.

mod reader;
mod writer;

use std::path::Path;

use crate::error::CoreError;
use crate::model::DependencySet;

pub use reader::{load_manifest, read_manifest};
pub use writer::write_manifest;

/// Manifest location used when neither config nor flags name one.
pub const DEFAULT_MANIFEST_PATH: &str = "enclave.lock";

pub(crate) const DEPENDENCIES_HEADER: &str = "dependencies:";
pub(crate) const ENTRY_PREFIX: &str = "  -";

/// A parsed or about-to-be-written manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Text of the leading provenance comment, without the `#`.
    pub generator: Option<String>,
    pub dependencies: DependencySet,
}

impl Manifest {
    /// A manifest stamped with this build's generator marker.
    pub fn new(dependencies: DependencySet) -> Self {
        Self {
            generator: Some(generator_marker()),
            dependencies,
        }
    }

    pub fn render(&self) -> String {
        render(self.generator.as_deref(), &self.dependencies)
    }

    /// Parse manifest text. `source` only labels errors.
    pub fn parse(text: &str, source: &Path) -> Result<Self, CoreError> {
        let parse_error = |line: usize, reason: &str| CoreError::ManifestParse {
            path: source.to_path_buf(),
            line,
            reason: reason.to_string(),
        };

        let mut generator = None;
        let mut dependencies = DependencySet::new();
        let mut seen_header = false;
        let mut line_count = 0;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            line_count = line_no;

            if let Some(entry) = line.strip_prefix(ENTRY_PREFIX) {
                if !seen_header {
                    return Err(parse_error(line_no, "dependency entry before `dependencies:` header"));
                }
                if entry.is_empty() {
                    return Err(parse_error(line_no, "empty dependency entry"));
                }
                dependencies.insert(entry);
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                if generator.is_none() && !seen_header {
                    generator = Some(comment.trim().to_string());
                }
                continue;
            }
            if trimmed == DEPENDENCIES_HEADER {
                if seen_header {
                    return Err(parse_error(line_no, "duplicate `dependencies:` header"));
                }
                seen_header = true;
                continue;
            }

            return Err(parse_error(
                line_no,
                &format!("unexpected line {trimmed:?} (entries must start with `{ENTRY_PREFIX}`)"),
            ));
        }

        if !seen_header {
            return Err(parse_error(line_count.max(1), "missing `dependencies:` header"));
        }

        Ok(Self {
            generator,
            dependencies,
        })
    }
}

pub(crate) fn generator_marker() -> String {
    format!("generated by enclos {}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn render(generator: Option<&str>, dependencies: &DependencySet) -> String {
    let mut out = String::new();
    if let Some(generator) = generator {
        out.push_str(&format!("# {generator}\n"));
    }
    out.push_str(DEPENDENCIES_HEADER);
    out.push('\n');
    for path in dependencies.iter() {
        out.push_str(ENTRY_PREFIX);
        out.push_str(path);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Manifest, CoreError> {
        Manifest::parse(text, Path::new("enclave.lock"))
    }

    #[test]
    fn test_render_layout() {
        let set: DependencySet = ["/bin/sh", "/bin/ls"].into_iter().collect();
        let manifest = Manifest::new(set);
        let text = manifest.render();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], format!("# generated by enclos {}", env!("CARGO_PKG_VERSION")));
        assert_eq!(lines[1], "dependencies:");
        assert_eq!(lines[2], "  -/bin/ls");
        assert_eq!(lines[3], "  -/bin/sh");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_set_renders_header_only() {
        let text = Manifest::new(DependencySet::new()).render();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("dependencies:\n"));
    }

    #[test]
    fn test_parse_roundtrip() {
        let set: DependencySet = ["/usr/bin/env", "/opt/tool with space/bin/run"]
            .into_iter()
            .collect();
        let manifest = Manifest::new(set.clone());
        let parsed = parse(&manifest.render()).unwrap();
        assert_eq!(parsed.dependencies, set);
        assert_eq!(parsed.generator, manifest.generator);
    }

    #[test]
    fn test_parse_hand_written_without_comment() {
        let parsed = parse("dependencies:\n  -/bin/ls\n\n  -/bin/ls\n").unwrap();
        assert_eq!(parsed.generator, None);
        assert_eq!(parsed.dependencies.len(), 1);
    }

    #[test]
    fn test_parse_crlf() {
        let parsed = parse("#gen\r\ndependencies:\r\n  -/bin/ls\r\n").unwrap();
        assert!(parsed.dependencies.contains("/bin/ls"));
    }

    #[test]
    fn test_parse_missing_header() {
        let err = parse("# generated by enclos\n").unwrap_err();
        assert!(matches!(err, CoreError::ManifestParse { line: 1, .. }));
    }

    #[test]
    fn test_parse_empty_file_reports_first_line() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, CoreError::ManifestParse { line: 1, .. }), "{err}");
    }

    #[test]
    fn test_parse_entry_before_header() {
        let err = parse("  -/bin/ls\ndependencies:\n").unwrap_err();
        assert!(matches!(err, CoreError::ManifestParse { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_foreign_list_item() {
        let err = parse("dependencies:\n  -/bin/ls\n- /bin/sh\n").unwrap_err();
        match err {
            CoreError::ManifestParse { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("unexpected line"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_empty_entry_and_duplicate_header() {
        assert!(matches!(
            parse("dependencies:\n  -\n").unwrap_err(),
            CoreError::ManifestParse { line: 2, .. }
        ));
        assert!(matches!(
            parse("dependencies:\ndependencies:\n").unwrap_err(),
            CoreError::ManifestParse { line: 2, .. }
        ));
    }
}
