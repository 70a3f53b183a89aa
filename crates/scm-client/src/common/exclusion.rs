//! Exact-match and exclusion post-processing
//!
//! Runs after client-side filters, in a fixed order: exact scope match, then
//! folder, snippet and device exclusions. Objects whose container field is
//! unset are never removed by an exclusion list.

use crate::common::scope::{Scope, ScopeKind, Scoped};

/// Post-filter options for a `list` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionOptions {
    /// Keep only objects whose container equals the requested scope value
    pub exact_match: bool,
    pub exclude_folders: Vec<String>,
    pub exclude_snippets: Vec<String>,
    pub exclude_devices: Vec<String>,
}

impl ExclusionOptions {
    pub fn is_noop(&self) -> bool {
        !self.exact_match
            && self.exclude_folders.is_empty()
            && self.exclude_snippets.is_empty()
            && self.exclude_devices.is_empty()
    }
}

pub fn apply_exclusions<T: Scoped>(
    objects: Vec<T>,
    scope: &Scope,
    options: &ExclusionOptions,
) -> Vec<T> {
    if options.is_noop() {
        return objects;
    }

    let mut result = objects;
    if options.exact_match {
        result.retain(|object| scope.contains(object));
    }
    exclude(&mut result, ScopeKind::Folder, &options.exclude_folders);
    exclude(&mut result, ScopeKind::Snippet, &options.exclude_snippets);
    exclude(&mut result, ScopeKind::Device, &options.exclude_devices);
    result
}

fn exclude<T: Scoped>(objects: &mut Vec<T>, kind: ScopeKind, excluded: &[String]) {
    if excluded.is_empty() {
        return;
    }
    objects.retain(|object| {
        object
            .container(kind)
            .is_none_or(|value| !excluded.iter().any(|e| e == value))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Obj {
        name: &'static str,
        folder: Option<&'static str>,
        snippet: Option<&'static str>,
        device: Option<&'static str>,
    }

    impl Scoped for Obj {
        fn folder(&self) -> Option<&str> {
            self.folder
        }
        fn snippet(&self) -> Option<&str> {
            self.snippet
        }
        fn device(&self) -> Option<&str> {
            self.device
        }
    }

    fn obj(
        name: &'static str,
        folder: Option<&'static str>,
        snippet: Option<&'static str>,
        device: Option<&'static str>,
    ) -> Obj {
        Obj {
            name,
            folder,
            snippet,
            device,
        }
    }

    fn objects() -> Vec<Obj> {
        vec![
            obj("a", Some("Texas"), None, None),
            obj("b", Some("All"), None, None),
            obj("c", Some("Texas"), Some("shared"), None),
            obj("d", None, Some("predefined"), None),
            obj("e", Some("Austin"), None, Some("fw-01")),
        ]
    }

    fn names(objects: &[Obj]) -> Vec<&'static str> {
        objects.iter().map(|o| o.name).collect()
    }

    fn texas() -> Scope {
        Scope::Folder("Texas".to_string())
    }

    #[test]
    fn test_noop_keeps_everything() {
        let result = apply_exclusions(objects(), &texas(), &ExclusionOptions::default());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_exact_match() {
        let options = ExclusionOptions {
            exact_match: true,
            ..Default::default()
        };
        let result = apply_exclusions(objects(), &texas(), &options);
        assert_eq!(names(&result), vec!["a", "c"]);
    }

    #[test]
    fn test_exclude_folders_keeps_unset_folders() {
        let options = ExclusionOptions {
            exclude_folders: vec!["All".to_string(), "Austin".to_string()],
            ..Default::default()
        };
        let result = apply_exclusions(objects(), &texas(), &options);
        assert_eq!(names(&result), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_exclude_snippets_and_devices() {
        let options = ExclusionOptions {
            exclude_snippets: vec!["predefined".to_string()],
            exclude_devices: vec!["fw-01".to_string()],
            ..Default::default()
        };
        let result = apply_exclusions(objects(), &texas(), &options);
        assert_eq!(names(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exact_match_then_exclusions() {
        let options = ExclusionOptions {
            exact_match: true,
            exclude_snippets: vec!["shared".to_string()],
            ..Default::default()
        };
        let result = apply_exclusions(objects(), &texas(), &options);
        assert_eq!(names(&result), vec!["a"]);
    }
}
