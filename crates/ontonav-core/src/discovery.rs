//! Taxonomy discovery: pattern passes over the graph store that build the
//! run's catalog. Read-only against the graph, idempotent, and tolerant of
//! missing optional attributes.

use tracing::warn;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::graph::{GraphStore, PatternQuery, Row, Term, TriplePattern};
use crate::vocab;

/// Extract every scheme and concept reachable through the membership,
/// labelling, relationship, scope-note, and example patterns.
///
/// Concepts enter the catalog only through a `skos:inScheme` declaration;
/// relationship targets that never declare membership stay as bare URIs in
/// the edge sets. A malformed row is logged and skipped, never fatal.
pub fn discover(graph: &dyn GraphStore) -> Result<Catalog> {
    let mut catalog = Catalog::new();

    for row in pass(graph, "schemes", &scheme_type_query()) {
        if let Some(uri) = row.get("scheme") {
            catalog.upsert_scheme(uri);
        }
    }

    for row in pass(graph, "membership", &forward_query(vocab::SKOS_IN_SCHEME)) {
        if let (Some(concept), Some(scheme)) = (row.get("subject"), row.get("object")) {
            let concept = concept.to_string();
            let scheme = scheme.to_string();
            catalog.link_membership(&concept, &scheme);
        }
    }

    apply_text_pass(graph, &mut catalog, "labels", vocab::RDFS_LABEL, TextField::Label);
    apply_text_pass(
        graph,
        &mut catalog,
        "pref_labels",
        vocab::SKOS_PREF_LABEL,
        TextField::Label,
    );
    apply_text_pass(
        graph,
        &mut catalog,
        "comments",
        vocab::RDFS_COMMENT,
        TextField::Comment,
    );
    apply_text_pass(
        graph,
        &mut catalog,
        "descriptions",
        vocab::DCT_DESCRIPTION,
        TextField::Description,
    );

    apply_edge_pass(graph, &mut catalog, "broader", vocab::SKOS_BROADER, EdgeKind::Broader);
    apply_edge_pass(
        graph,
        &mut catalog,
        "narrower",
        vocab::SKOS_NARROWER,
        EdgeKind::Narrower,
    );
    apply_edge_pass(graph, &mut catalog, "related", vocab::SKOS_RELATED, EdgeKind::Related);

    for row in pass(graph, "scope_notes", &forward_query(vocab::SKOS_SCOPE_NOTE)) {
        if let (Some(subject), Some(note)) = (row.get("subject"), row.get("object")) {
            let subject = subject.to_string();
            let note = note.to_string();
            if !catalog.has_concept(&subject) {
                continue;
            }
            let concept = catalog.upsert_concept(&subject);
            // Merge semantics: the longest note wins, so rediscovery never
            // downgrades a record.
            if note.len() > concept.scope_note.len() {
                concept.scope_note = note;
            }
        }
    }

    for row in pass(graph, "examples", &forward_query(vocab::SKOS_EXAMPLE)) {
        if let (Some(subject), Some(example)) = (row.get("subject"), row.get("object")) {
            let subject = subject.to_string();
            let example = example.to_string();
            if catalog.has_concept(&subject) {
                catalog.upsert_concept(&subject).examples.insert(example);
            }
        }
    }

    for row in pass(graph, "cross_references", &forward_query(vocab::RDFS_SEE_ALSO)) {
        if let (Some(subject), Some(target)) = (row.get("subject"), row.get("object")) {
            let subject = subject.to_string();
            let target = target.to_string();
            if catalog.scheme(&subject).is_some() {
                catalog.upsert_scheme(&subject).cross_references.insert(target);
            }
        }
    }

    Ok(catalog)
}

#[derive(Debug, Clone, Copy)]
enum TextField {
    Label,
    Comment,
    Description,
}

#[derive(Debug, Clone, Copy)]
enum EdgeKind {
    Broader,
    Narrower,
    Related,
}

fn apply_text_pass(
    graph: &dyn GraphStore,
    catalog: &mut Catalog,
    pass_name: &str,
    predicate: &str,
    field: TextField,
) {
    for row in pass(graph, pass_name, &forward_query(predicate)) {
        let (Some(subject), Some(value)) = (row.get("subject"), row.get("object")) else {
            continue;
        };
        let subject = subject.to_string();
        let value = value.to_string();
        if value.is_empty() {
            continue;
        }
        if catalog.scheme(&subject).is_some() {
            let scheme = catalog.upsert_scheme(&subject);
            match field {
                TextField::Label => scheme.label = value,
                TextField::Comment => scheme.comment = value,
                TextField::Description => scheme.description = value,
            }
        } else if catalog.has_concept(&subject) {
            let concept = catalog.upsert_concept(&subject);
            match field {
                TextField::Label => concept.label = value,
                TextField::Comment => concept.comment = value,
                // Concepts carry no separate description field; a
                // description row on a concept is ignored.
                TextField::Description => {}
            }
        }
    }
}

fn apply_edge_pass(
    graph: &dyn GraphStore,
    catalog: &mut Catalog,
    pass_name: &str,
    predicate: &str,
    kind: EdgeKind,
) {
    for row in pass(graph, pass_name, &uri_edge_query(predicate)) {
        let (Some(subject), Some(target)) = (row.get("subject"), row.get("target")) else {
            continue;
        };
        let subject = subject.to_string();
        let target = target.to_string();
        if !catalog.has_concept(&subject) {
            warn!(pass = pass_name, subject = %subject, "edge on undeclared concept skipped");
            continue;
        }
        let concept = catalog.upsert_concept(&subject);
        match kind {
            EdgeKind::Broader => concept.broader.insert(target),
            EdgeKind::Narrower => concept.narrower.insert(target),
            EdgeKind::Related => concept.related.insert(target),
        };
    }
}

/// Run one pattern pass; a failing query is a discovery error for that pass
/// only, logged and skipped so the remaining passes still run.
fn pass(graph: &dyn GraphStore, pass_name: &str, query: &PatternQuery) -> Vec<Row> {
    match graph.query(query) {
        Ok(rows) => rows,
        Err(err) => {
            warn!(pass = pass_name, error = %err, "discovery pass skipped");
            Vec::new()
        }
    }
}

fn scheme_type_query() -> PatternQuery {
    PatternQuery::new(vec![TriplePattern::new(
        Term::var("scheme"),
        Term::uri(vocab::RDF_TYPE),
        Term::uri(vocab::SKOS_CONCEPT_SCHEME),
    )])
}

fn forward_query(predicate: &str) -> PatternQuery {
    PatternQuery::new(vec![TriplePattern::new(
        Term::var("subject"),
        Term::uri(predicate),
        Term::var("object"),
    )])
}

fn uri_edge_query(predicate: &str) -> PatternQuery {
    PatternQuery::new(vec![TriplePattern::new(
        Term::var("subject"),
        Term::uri(predicate),
        Term::var("target"),
    )])
}
