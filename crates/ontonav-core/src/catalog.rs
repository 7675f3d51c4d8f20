//! Caller-owned catalog of discovered schemes and concepts. Built once per
//! run by discovery, then handed by reference into every later stage; there
//! is no process-wide registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Concept, ConceptScheme};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    schemes: BTreeMap<String, ConceptScheme>,
    concepts: BTreeMap<String, Concept>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_scheme(&mut self, uri: &str) -> &mut ConceptScheme {
        self.schemes.entry(uri.to_string()).or_insert_with(|| ConceptScheme {
            uri: uri.to_string(),
            ..ConceptScheme::default()
        })
    }

    /// Concepts are keyed by URI: rediscovering the same URI merges into the
    /// existing record instead of duplicating it.
    pub fn upsert_concept(&mut self, uri: &str) -> &mut Concept {
        self.concepts.entry(uri.to_string()).or_insert_with(|| Concept {
            uri: uri.to_string(),
            ..Concept::default()
        })
    }

    /// Record scheme membership on both sides when the scheme is known. A
    /// concept pointing at an undiscovered scheme keeps its own linkage, but
    /// nothing is recorded on the (absent) scheme side.
    pub fn link_membership(&mut self, concept_uri: &str, scheme_uri: &str) {
        self.upsert_concept(concept_uri).scheme = scheme_uri.to_string();
        if let Some(scheme) = self.schemes.get_mut(scheme_uri) {
            scheme.concepts.insert(concept_uri.to_string());
        }
    }

    #[must_use]
    pub fn scheme(&self, uri: &str) -> Option<&ConceptScheme> {
        self.schemes.get(uri)
    }

    #[must_use]
    pub fn concept(&self, uri: &str) -> Option<&Concept> {
        self.concepts.get(uri)
    }

    #[must_use]
    pub fn has_concept(&self, uri: &str) -> bool {
        self.concepts.contains_key(uri)
    }

    pub fn schemes(&self) -> impl Iterator<Item = &ConceptScheme> {
        self.schemes.values()
    }

    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    #[must_use]
    pub fn scheme_count(&self) -> usize {
        self.schemes.len()
    }

    #[must_use]
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty() && self.concepts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_concept_merges_by_uri() {
        let mut catalog = Catalog::new();
        catalog.upsert_concept("urn:c").label = "First".to_string();
        catalog.upsert_concept("urn:c").broader.insert("urn:p".to_string());
        assert_eq!(catalog.concept_count(), 1);
        let concept = catalog.concept("urn:c").unwrap();
        assert_eq!(concept.label, "First");
        assert!(concept.broader.contains("urn:p"));
    }

    #[test]
    fn membership_links_both_sides_when_scheme_exists() {
        let mut catalog = Catalog::new();
        catalog.upsert_scheme("urn:scheme");
        catalog.link_membership("urn:c", "urn:scheme");
        assert_eq!(catalog.concept("urn:c").unwrap().scheme, "urn:scheme");
        assert!(catalog.scheme("urn:scheme").unwrap().concepts.contains("urn:c"));
    }

    #[test]
    fn membership_to_unknown_scheme_is_one_sided() {
        let mut catalog = Catalog::new();
        catalog.link_membership("urn:c", "urn:missing");
        assert_eq!(catalog.concept("urn:c").unwrap().scheme, "urn:missing");
        assert!(catalog.scheme("urn:missing").is_none());
    }
}
