use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The distinct executable paths observed during one trace run.
///
/// Paths are stored verbatim and iterate in sorted order so that two runs
/// observing the same executables produce byte-identical manifests, however
/// the traced processes were scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySet(BTreeSet<String>);

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path. Returns `false` if it was already present.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.0.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DependencySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for DependencySet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = DependencySet::new();
        assert!(set.insert("/bin/ls"));
        assert!(!set.insert("/bin/ls"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("/bin/ls"));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let set: DependencySet = ["/usr/bin/git", "/bin/sh", "/bin/ls"].into_iter().collect();
        let paths: Vec<_> = set.iter().collect();
        assert_eq!(paths, vec!["/bin/ls", "/bin/sh", "/usr/bin/git"]);
    }

    #[test]
    fn test_serializes_as_list() {
        let set: DependencySet = ["/bin/sh", "/bin/ls"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["/bin/ls","/bin/sh"]"#);
        let parsed: DependencySet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, parsed);
    }
}
