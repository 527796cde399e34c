// ── Host filter predicates ──
//
// Used by the selection session to narrow the authorized universe into
// the rows currently on screen. Filtering is pure: same hosts and same
// criteria always give the same, order-preserving subsequence.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::model::Host;
use crate::tree::{self, PATH_SEPARATOR, PathMatch};

/// User-supplied filter input. Every criterion is optional and an absent
/// criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, alias = "category")]
    pub category_prefix: Option<String>,
    #[serde(default, alias = "name")]
    pub name_pattern: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, path: impl Into<String>) -> Self {
        self.category_prefix = Some(path.into());
        self
    }

    /// Category from the picker's chain of selected values.
    pub fn with_category_segments<I, S>(mut self, segments: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parts = Vec::new();
        for segment in segments {
            let segment = segment.as_ref().trim();
            if segment.is_empty() || segment.contains(PATH_SEPARATOR) {
                return Err(CoreError::InvalidCriteria {
                    field: "category".into(),
                    reason: format!("'{segment}' is not a single category name"),
                });
            }
            parts.push(segment.to_owned());
        }
        self.category_prefix = (!parts.is_empty()).then(|| parts.join("/"));
        Ok(self)
    }

    pub fn with_name(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// True when no criterion narrows anything.
    pub fn is_empty(&self) -> bool {
        self.category_prefix.as_deref().is_none_or(str::is_empty)
            && self.name_pattern.as_deref().is_none_or(str::is_empty)
            && self.tags.is_empty()
    }

    /// Boundary validation and normalization.
    ///
    /// Rejects a category with an empty inner segment (`a//b`) and blank
    /// tags. Strips stray separators and whitespace from the category and
    /// drops an empty name pattern. Other name patterns are kept verbatim.
    pub fn validated(self) -> Result<Self, CoreError> {
        let category_prefix = match self.category_prefix {
            Some(raw) => {
                let trimmed = raw.trim().trim_matches(PATH_SEPARATOR);
                if !trimmed.is_empty() && trimmed.split(PATH_SEPARATOR).any(|s| s.trim().is_empty())
                {
                    return Err(CoreError::InvalidCriteria {
                        field: "category".into(),
                        reason: format!("'{raw}' contains an empty segment"),
                    });
                }
                let normalized = tree::normalize_path(trimmed);
                (!normalized.is_empty()).then_some(normalized)
            }
            None => None,
        };

        let name_pattern = self.name_pattern.filter(|p| !p.is_empty());

        let mut tags = BTreeSet::new();
        for tag in self.tags {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(CoreError::InvalidCriteria {
                    field: "tags".into(),
                    reason: "tags must not be blank".into(),
                });
            }
            tags.insert(tag.to_owned());
        }

        Ok(Self {
            category_prefix,
            name_pattern,
            tags,
        })
    }

    /// The active criteria as individual predicates.
    pub fn predicates(&self) -> Vec<HostPredicate> {
        let mut predicates = Vec::with_capacity(3);
        if let Some(prefix) = self.category_prefix.as_deref().filter(|p| !p.is_empty()) {
            predicates.push(HostPredicate::Category(prefix.to_owned()));
        }
        if let Some(pattern) = self.name_pattern.as_deref().filter(|p| !p.is_empty()) {
            predicates.push(HostPredicate::Name(pattern.to_lowercase()));
        }
        if !self.tags.is_empty() {
            predicates.push(HostPredicate::Tags(self.tags.clone()));
        }
        predicates
    }
}

/// Filter predicate for host collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPredicate {
    /// Host lies at or under this category path.
    Category(String),
    /// Name contains this (already lowercased) substring.
    Name(String),
    /// Host carries every one of these tags.
    Tags(BTreeSet<String>),
}

impl HostPredicate {
    pub fn matches(&self, host: &Host, path_match: PathMatch) -> bool {
        match self {
            Self::Category(prefix) => path_match.matches(&host.category, prefix),
            Self::Name(needle) => host.name.to_lowercase().contains(needle.as_str()),
            Self::Tags(required) => required.iter().all(|tag| host.has_tag(tag)),
        }
    }
}

/// Applies [`FilterCriteria`] to host sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterEngine {
    path_match: PathMatch,
}

impl FilterEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            path_match: config.path_match,
        }
    }

    pub fn path_match(&self) -> PathMatch {
        self.path_match
    }

    /// Keep the hosts matching every active criterion, in input order.
    ///
    /// Works over anything that borrows a [`Host`]: owned records,
    /// `Arc<Host>` snapshots or plain references.
    pub fn apply<H>(&self, hosts: &[H], criteria: &FilterCriteria) -> Vec<H>
    where
        H: Borrow<Host> + Clone,
    {
        let predicates = criteria.predicates();
        hosts
            .iter()
            .filter(|host| self.matches_all(&predicates, Borrow::<Host>::borrow(*host)))
            .cloned()
            .collect()
    }

    pub fn matches(&self, host: &Host, criteria: &FilterCriteria) -> bool {
        self.matches_all(&criteria.predicates(), host)
    }

    fn matches_all(&self, predicates: &[HostPredicate], host: &Host) -> bool {
        predicates.iter().all(|p| p.matches(host, self.path_match))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::HostId;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn host(id: u64, name: &str, category: &str, tags: &[&str]) -> Host {
        Host {
            id: HostId(id),
            category: category.into(),
            name: name.into(),
            hostname: format!("10.0.0.{id}"),
            port: 22,
            desc: None,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    fn ids(hosts: &[Host]) -> Vec<u64> {
        hosts.iter().map(|h| h.id.get()).collect()
    }

    fn fleet() -> Vec<Host> {
        vec![
            host(1, "Web-Frontend", "prod/web", &["nginx", "edge"]),
            host(2, "db-primary", "prod/db", &["postgres"]),
            host(3, "web-canary", "prod/webx", &["nginx"]),
            host(4, "lab-box", "lab", &[]),
        ]
    }

    #[test]
    fn empty_criteria_keep_everything_in_order() {
        let engine = FilterEngine::default();
        let out = engine.apply(&fleet(), &FilterCriteria::new());
        assert_eq!(ids(&out), vec![1, 2, 3, 4]);
    }

    #[test]
    fn category_filter_is_segment_wise_by_default() {
        let engine = FilterEngine::default();
        let out = engine.apply(&fleet(), &FilterCriteria::new().with_category("prod/web"));
        assert_eq!(ids(&out), vec![1]);

        let out = engine.apply(&fleet(), &FilterCriteria::new().with_category("prod"));
        assert_eq!(ids(&out), vec![1, 2, 3]);
    }

    #[test]
    fn string_prefix_mode_reproduces_legacy_matching() {
        let engine = FilterEngine::new(&EngineConfig {
            path_match: PathMatch::StringPrefix,
        });
        let out = engine.apply(&fleet(), &FilterCriteria::new().with_category("prod/web"));
        assert_eq!(ids(&out), vec![1, 3]);
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let engine = FilterEngine::default();
        let out = engine.apply(&fleet(), &FilterCriteria::new().with_name("WEB"));
        assert_eq!(ids(&out), vec![1, 3]);

        let out = engine.apply(&fleet(), &FilterCriteria::new().with_name(""));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn tags_require_every_selected_tag() {
        let engine = FilterEngine::default();
        let tagged = host(9, "x", "", &["t1", "t2", "t3"]);
        let untagged = host(10, "y", "", &[]);

        let both = FilterCriteria::new().with_tags(["t1", "t2"]);
        let mixed = FilterCriteria::new().with_tags(["t1", "t4"]);
        let none = FilterCriteria::new();

        assert!(engine.matches(&tagged, &both));
        assert!(!engine.matches(&tagged, &mixed));
        assert!(engine.matches(&untagged, &none));
        assert!(!engine.matches(&untagged, &FilterCriteria::new().with_tag("t1")));
    }

    #[test]
    fn criteria_combine_with_and() {
        let engine = FilterEngine::default();
        let criteria = FilterCriteria::new()
            .with_category("prod")
            .with_name("web")
            .with_tag("edge");
        let out = engine.apply(&fleet(), &criteria);
        assert_eq!(ids(&out), vec![1]);
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let engine = FilterEngine::default();
        let criteria = FilterCriteria::new().with_category("prod").with_tag("nginx");
        let once = engine.apply(&fleet(), &criteria);
        let twice = engine.apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn works_over_shared_records() {
        let engine = FilterEngine::default();
        let shared: Vec<Arc<Host>> = fleet().into_iter().map(Arc::new).collect();
        let out = engine.apply(&shared, &FilterCriteria::new().with_tag("postgres"));
        assert_eq!(out.len(), 1);
        assert!(Arc::ptr_eq(&out[0], &shared[1]));
    }

    #[test]
    fn category_segments_from_picker() {
        let criteria = FilterCriteria::new()
            .with_category_segments(["prod", "web"])
            .unwrap();
        assert_eq!(criteria.category_prefix.as_deref(), Some("prod/web"));

        let cleared = FilterCriteria::new()
            .with_category_segments(Vec::<String>::new())
            .unwrap();
        assert!(cleared.category_prefix.is_none());

        assert!(FilterCriteria::new().with_category_segments(["a/b"]).is_err());
        assert!(FilterCriteria::new().with_category_segments([" "]).is_err());
    }

    #[test]
    fn validation_normalizes_and_rejects() {
        let criteria = FilterCriteria::new()
            .with_category(" /prod/web/ ")
            .with_name("")
            .with_tag(" nginx ")
            .validated()
            .unwrap();
        assert_eq!(criteria.category_prefix.as_deref(), Some("prod/web"));
        assert!(criteria.name_pattern.is_none());
        assert!(criteria.tags.contains("nginx"));

        let root = FilterCriteria::new().with_category("/").validated().unwrap();
        assert!(root.category_prefix.is_none());
        assert!(root.is_empty());

        let err = FilterCriteria::new().with_category("a//b").validated().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCriteria { .. }));

        let err = FilterCriteria::new().with_tag(" ").validated().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCriteria { .. }));
    }

    #[test]
    fn whitespace_name_pattern_still_filters() {
        let engine = FilterEngine::default();
        let hosts = vec![
            host(1, "web one", "prod", &[]),
            host(2, "webtwo", "prod", &[]),
        ];
        let criteria = FilterCriteria::new().with_name(" ");
        let validated = criteria.clone().validated().unwrap();
        assert_eq!(validated.name_pattern.as_deref(), Some(" "));

        for criteria in [criteria, validated] {
            let out = engine.apply(&hosts, &criteria);
            assert_eq!(out.iter().map(|h| h.id).collect::<Vec<_>>(), vec![HostId(1)]);
        }
    }

    #[test]
    fn criteria_deserialize_with_short_aliases() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"category": "prod", "name": "db", "tags": ["postgres"]}"#)
                .unwrap();
        assert_eq!(criteria.category_prefix.as_deref(), Some("prod"));
        assert_eq!(criteria.name_pattern.as_deref(), Some("db"));
        assert_eq!(criteria.tags.len(), 1);
    }
}
