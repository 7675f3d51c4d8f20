//! Graph store collaborator: the pattern-query contract the pipeline runs
//! against, plus a bundled in-memory reference store.
//!
//! The store is deliberately not a query language. A [`PatternQuery`] is a
//! fixed conjunction of triple patterns joined through shared variables,
//! which is all the discovery passes and the scenario catalog need.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OntoNavError, Result};

/// Object position of a triple: a URI reference or a literal value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Uri(String),
    Literal(String),
}

impl Node {
    #[must_use]
    pub fn lexical(&self) -> &str {
        match self {
            Self::Uri(value) | Self::Literal(value) => value,
        }
    }

    #[must_use]
    pub const fn is_uri(&self) -> bool {
        matches!(self, Self::Uri(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Node,
}

/// One position of a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Uri(String),
    Literal(String),
    Var(String),
    Any,
}

impl Term {
    #[must_use]
    pub fn var(name: &str) -> Self {
        Self::Var(name.to_string())
    }

    #[must_use]
    pub fn uri(value: &str) -> Self {
        Self::Uri(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    #[must_use]
    pub const fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// A conjunction of triple patterns. Shared variable names join patterns;
/// `distinct` pairs additionally require two variables to bind to different
/// values (used by cross-ontology traversals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternQuery {
    pub patterns: Vec<TriplePattern>,
    #[serde(default)]
    pub distinct: Vec<(String, String)>,
}

impl PatternQuery {
    #[must_use]
    pub fn new(patterns: Vec<TriplePattern>) -> Self {
        Self {
            patterns,
            distinct: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_distinct(mut self, left: &str, right: &str) -> Self {
        self.distinct.push((left.to_string(), right.to_string()));
        self
    }
}

/// One solution: variable name to bound lexical value, in stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Row {
    pub bindings: BTreeMap<String, String>,
}

impl Row {
    #[must_use]
    pub fn get(&self, var: &str) -> Option<&str> {
        self.bindings.get(var).map(String::as_str)
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (var, value) in &self.bindings {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "?{var}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// Read-only pattern-query access to a loaded graph. Shared by reference
/// across the whole run; nothing in the pipeline mutates it.
pub trait GraphStore {
    fn query(&self, query: &PatternQuery) -> Result<Vec<Row>>;

    fn triple_count(&self) -> usize;
}

/// Bundled reference store: triples held in memory with a predicate index,
/// loaded from an N-Triples-style line format.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    triples: Vec<Triple>,
    by_predicate: BTreeMap<String, Vec<usize>>,
}

impl MemoryGraphStore {
    /// Load every source file into one shared graph. Any missing file or
    /// malformed line is fatal: there is no catalog to build from half a
    /// graph.
    pub fn load<P: AsRef<Path>>(sources: &[P]) -> Result<Self> {
        let mut store = Self::default();
        for source in sources {
            let path = source.as_ref();
            let text = fs::read_to_string(path).map_err(|err| {
                OntoNavError::Load(format!("cannot read {}: {err}", path.display()))
            })?;
            store.load_text(&text, &path.display().to_string())?;
        }
        Ok(store)
    }

    /// Parse a document in the line format `<s> <p> <o> .` /
    /// `<s> <p> "literal" .` with `#` comments and blank lines.
    pub fn load_text(&mut self, text: &str, origin: &str) -> Result<()> {
        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let triple = parse_triple_line(line).ok_or_else(|| {
                OntoNavError::Load(format!("{origin}:{}: malformed triple: {line}", number + 1))
            })?;
            self.insert(triple);
        }
        Ok(())
    }

    pub fn insert(&mut self, triple: Triple) {
        let index = self.triples.len();
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(index);
        self.triples.push(triple);
    }

    fn candidates(&self, predicate: &Term) -> Vec<usize> {
        match predicate {
            Term::Uri(uri) => self.by_predicate.get(uri).cloned().unwrap_or_default(),
            _ => (0..self.triples.len()).collect(),
        }
    }
}

impl GraphStore for MemoryGraphStore {
    fn query(&self, query: &PatternQuery) -> Result<Vec<Row>> {
        if query.patterns.is_empty() {
            return Err(OntoNavError::Query("empty pattern query".to_string()));
        }
        let mut rows: Vec<BTreeMap<String, String>> = vec![BTreeMap::new()];
        for pattern in &query.patterns {
            let mut next = Vec::new();
            for bound in &rows {
                for index in self.candidates(&pattern.predicate) {
                    let triple = &self.triples[index];
                    if let Some(extended) = unify(pattern, triple, bound) {
                        next.push(extended);
                    }
                }
            }
            rows = next;
            if rows.is_empty() {
                break;
            }
        }

        for (left, right) in &query.distinct {
            rows.retain(|bindings| match (bindings.get(left), bindings.get(right)) {
                (Some(a), Some(b)) => a != b,
                _ => false,
            });
        }

        let unique: BTreeSet<Row> = rows.into_iter().map(|bindings| Row { bindings }).collect();
        Ok(unique.into_iter().collect())
    }

    fn triple_count(&self) -> usize {
        self.triples.len()
    }
}

fn unify(
    pattern: &TriplePattern,
    triple: &Triple,
    bound: &BTreeMap<String, String>,
) -> Option<BTreeMap<String, String>> {
    let mut bindings = bound.clone();
    bind_term(&pattern.subject, &triple.subject, true, &mut bindings)?;
    bind_term(&pattern.predicate, &triple.predicate, true, &mut bindings)?;
    match &triple.object {
        Node::Uri(value) => bind_term(&pattern.object, value, true, &mut bindings)?,
        Node::Literal(value) => bind_term(&pattern.object, value, false, &mut bindings)?,
    }
    Some(bindings)
}

fn bind_term(
    term: &Term,
    value: &str,
    value_is_uri: bool,
    bindings: &mut BTreeMap<String, String>,
) -> Option<()> {
    match term {
        Term::Any => Some(()),
        Term::Uri(expected) => (value_is_uri && expected == value).then_some(()),
        Term::Literal(expected) => (!value_is_uri && expected == value).then_some(()),
        Term::Var(name) => match bindings.get(name) {
            Some(existing) => (existing == value).then_some(()),
            None => {
                bindings.insert(name.clone(), value.to_string());
                Some(())
            }
        },
    }
}

fn parse_triple_line(line: &str) -> Option<Triple> {
    let body = line.strip_suffix('.')?.trim_end();
    let (subject, rest) = parse_uri_token(body)?;
    let (predicate, rest) = parse_uri_token(rest)?;
    let rest = rest.trim_start();
    let object = if rest.starts_with('<') {
        let (uri, tail) = parse_uri_token(rest)?;
        if !tail.trim().is_empty() {
            return None;
        }
        Node::Uri(uri)
    } else if rest.starts_with('"') {
        let inner = rest.strip_prefix('"')?.strip_suffix('"')?;
        Node::Literal(inner.replace("\\\"", "\""))
    } else {
        return None;
    };
    Some(Triple {
        subject,
        predicate,
        object,
    })
}

fn parse_uri_token(text: &str) -> Option<(String, &str)> {
    let trimmed = text.trim_start();
    let tail = trimmed.strip_prefix('<')?;
    let end = tail.find('>')?;
    Some((tail[..end].to_string(), &tail[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab;

    fn sample_store() -> MemoryGraphStore {
        let mut store = MemoryGraphStore::default();
        store.load_text(
            &format!(
                "# fixture\n\
                 <urn:a> <{broader}> <urn:b> .\n\
                 <urn:b> <{broader}> <urn:c> .\n\
                 <urn:a> <{label}> \"Alpha\" .\n",
                broader = vocab::SKOS_BROADER,
                label = vocab::RDFS_LABEL,
            ),
            "fixture",
        )
        .expect("load fixture");
        store
    }

    #[test]
    fn load_text_rejects_malformed_lines() {
        let mut store = MemoryGraphStore::default();
        let err = store
            .load_text("<urn:a> <urn:p> banana .", "fixture")
            .expect_err("must fail");
        assert!(matches!(err, OntoNavError::Load(_)));
        assert!(err.to_string().contains("fixture:1"));
    }

    #[test]
    fn literal_objects_keep_escaped_quotes() {
        let triple = parse_triple_line(r#"<urn:a> <urn:p> "say \"hi\"" ."#).expect("parse");
        assert_eq!(triple.object, Node::Literal("say \"hi\"".to_string()));
    }

    #[test]
    fn single_pattern_query_binds_variables() {
        let store = sample_store();
        let rows = store
            .query(&PatternQuery::new(vec![TriplePattern::new(
                Term::var("child"),
                Term::uri(vocab::SKOS_BROADER),
                Term::var("parent"),
            )]))
            .expect("query");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("child"), Some("urn:a"));
        assert_eq!(rows[0].get("parent"), Some("urn:b"));
    }

    #[test]
    fn chained_patterns_join_on_shared_variables() {
        let store = sample_store();
        let rows = store
            .query(&PatternQuery::new(vec![
                TriplePattern::new(
                    Term::var("a"),
                    Term::uri(vocab::SKOS_BROADER),
                    Term::var("b"),
                ),
                TriplePattern::new(
                    Term::var("b"),
                    Term::uri(vocab::SKOS_BROADER),
                    Term::var("c"),
                ),
            ]))
            .expect("query");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("a"), Some("urn:a"));
        assert_eq!(rows[0].get("c"), Some("urn:c"));
    }

    #[test]
    fn distinct_constraint_drops_equal_bindings() {
        let store = sample_store();
        let query = PatternQuery::new(vec![
            TriplePattern::new(
                Term::var("x"),
                Term::uri(vocab::SKOS_BROADER),
                Term::Any,
            ),
            TriplePattern::new(
                Term::var("y"),
                Term::uri(vocab::SKOS_BROADER),
                Term::Any,
            ),
        ])
        .with_distinct("x", "y");
        let rows = store.query(&query).expect("query");
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_ne!(row.get("x"), row.get("y"));
        }
    }

    #[test]
    fn empty_query_is_a_query_error() {
        let store = sample_store();
        let err = store
            .query(&PatternQuery::new(Vec::new()))
            .expect_err("must fail");
        assert!(matches!(err, OntoNavError::Query(_)));
    }

    #[test]
    fn uri_pattern_does_not_match_literal_object() {
        let store = sample_store();
        let rows = store
            .query(&PatternQuery::new(vec![TriplePattern::new(
                Term::uri("urn:a"),
                Term::uri(vocab::RDFS_LABEL),
                Term::uri("Alpha"),
            )]))
            .expect("query");
        assert!(rows.is_empty());
    }
}
