use std::path::Path;

use enclos_capture::TraceOutcome;
use enclos_core::Manifest;

use super::OutputFormat;

pub fn format_dependency_list(
    path: &Path,
    manifest: &Manifest,
    fmt: OutputFormat,
) -> serde_json::Result<String> {
    match fmt {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "manifest": path.display().to_string(),
                "generator": manifest.generator,
                "dependencies": manifest.dependencies,
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&value)?))
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for dep in manifest.dependencies.iter() {
                out.push_str(dep);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

pub fn format_trace_summary(outcome: &TraceOutcome, manifest: &Path) -> String {
    let mut out = String::new();
    let deps = &outcome.dependencies;
    let result = &outcome.result;

    out.push_str(&format!("Dependencies ({}, no duplicates):\n", deps.len()));
    for dep in deps.iter() {
        out.push_str(&format!("  - {dep}\n"));
    }
    out.push('\n');
    out.push_str(&format!("  Exit status: {}\n", result.status));
    out.push_str(&format!(
        "  Duration:    {:.1}s\n",
        result.duration().num_milliseconds() as f64 / 1000.0
    ));
    out.push_str(&format!("  Manifest:    {}\n", manifest.display()));
    if let Some(failure) = result.tracee_failure() {
        out.push_str(&format!(
            "\nWarning: {failure}; the manifest lists what ran before it stopped.\n"
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use enclos_capture::{TraceResult, TraceeStatus};
    use enclos_core::DependencySet;

    fn outcome(status: TraceeStatus) -> TraceOutcome {
        let started_at = Utc::now();
        TraceOutcome {
            dependencies: ["/bin/sh", "/bin/ls"].into_iter().collect(),
            result: TraceResult {
                status,
                started_at,
                finished_at: started_at + Duration::milliseconds(2500),
            },
        }
    }

    #[test]
    fn test_trace_summary_success() {
        let text = format_trace_summary(&outcome(TraceeStatus::Exited(0)), Path::new("enclave.lock"));
        assert!(text.contains("Dependencies (2, no duplicates):\n  - /bin/ls\n  - /bin/sh\n"));
        assert!(text.contains("Exit status: exit 0"));
        assert!(text.contains("Duration:    2.5s"));
        assert!(text.contains("Manifest:    enclave.lock"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_trace_summary_reports_failure() {
        let text = format_trace_summary(&outcome(TraceeStatus::Exited(2)), Path::new("enclave.lock"));
        assert!(text.contains("Warning: traced command exited with status 2"));
    }

    #[test]
    fn test_dependency_list_text_and_json() {
        let manifest = Manifest::new(["/usr/bin/git", "/bin/sh"].into_iter().collect::<DependencySet>());

        let text = format_dependency_list(Path::new("enclave.lock"), &manifest, OutputFormat::Text).unwrap();
        assert_eq!(text, "/bin/sh\n/usr/bin/git\n");

        let json = format_dependency_list(Path::new("enclave.lock"), &manifest, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["manifest"], "enclave.lock");
        assert_eq!(value["dependencies"], serde_json::json!(["/bin/sh", "/usr/bin/git"]));
        assert!(value["generator"].as_str().unwrap().starts_with("generated by enclos"));
    }
}
