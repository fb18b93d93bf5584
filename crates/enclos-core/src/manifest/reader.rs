use std::fs;
use std::io::{ErrorKind, Read as _};
use std::path::Path;

use crate::error::CoreError;
use crate::model::DependencySet;

use super::Manifest;

/// Load and validate the manifest at `path`, returning its dependency set.
pub fn load_manifest(path: &Path) -> Result<DependencySet, CoreError> {
    read_manifest(path).map(|m| m.dependencies)
}

/// Load the full manifest, provenance comment included.
pub fn read_manifest(path: &Path) -> Result<Manifest, CoreError> {
    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CoreError::ManifestNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(CoreError::Io(e)),
    };

    fs2::FileExt::lock_shared(&file)?;
    let mut bytes = Vec::new();
    let read = (&file).read_to_end(&mut bytes);
    fs2::FileExt::unlock(&file).ok();
    read?;

    let text = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        CoreError::ManifestParse {
            path: path.to_path_buf(),
            line: valid.iter().filter(|b| **b == b'\n').count() + 1,
            reason: "manifest is not valid UTF-8".to_string(),
        }
    })?;

    let manifest = Manifest::parse(&text, path)?;
    tracing::debug!(
        path = %path.display(),
        dependencies = manifest.dependencies.len(),
        "manifest loaded"
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::write_manifest;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("enclave.lock");
        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, CoreError::ManifestNotFound(p) if p == path));
    }

    #[test]
    fn test_write_then_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("enclave.lock");
        let set: DependencySet = ["/usr/bin/make", "/usr/bin/cc", "/bin/sh"]
            .into_iter()
            .collect();

        write_manifest(&set, &path).unwrap();

        assert_eq!(load_manifest(&path).unwrap(), set);
        let full = read_manifest(&path).unwrap();
        assert!(full.generator.unwrap().starts_with("generated by enclos"));
    }

    #[test]
    fn test_load_invalid_utf8_reports_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("enclave.lock");
        fs::write(&path, b"dependencies:\n  -/bin/\xff\n").unwrap();

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, CoreError::ManifestParse { line: 2, .. }));
    }

    #[test]
    fn test_load_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("enclave.lock");
        fs::write(&path, "{\"dependencies\": []}\n").unwrap();

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, CoreError::ManifestParse { line: 1, .. }));
        assert!(err.to_string().contains("enclave.lock"));
    }
}
