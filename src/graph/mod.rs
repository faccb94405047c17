use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

pub mod vocab;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid IRI in {position}: {value}")]
    InvalidIri { position: &'static str, value: String },
    #[error("empty language tag on literal: {value}")]
    EmptyLanguageTag { value: String },
}

/// An RDF object term: either a resource IRI or a literal with an
/// optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    Uri(String),
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
}

impl Term {
    pub fn uri(value: impl Into<String>) -> Self {
        Term::Uri(value.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            lang: None,
        }
    }

    pub fn literal_with_lang(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            lang: Some(lang.into()),
        }
    }

    /// The lexical value of the term, IRI or literal alike.
    pub fn as_str(&self) -> &str {
        match self {
            Term::Uri(value) => value,
            Term::Literal { value, .. } => value,
        }
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Term::Uri(_))
    }

    pub fn lang(&self) -> Option<&str> {
        match self {
            Term::Literal { lang, .. } => lang.as_deref(),
            Term::Uri(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfTriple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl RdfTriple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }

    pub fn uri_object(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self::new(subject, predicate, Term::uri(object))
    }

    pub fn literal_object(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        value: impl Into<String>,
        lang: Option<&str>,
    ) -> Self {
        let object = match lang {
            Some(tag) => Term::literal_with_lang(value, tag),
            None => Term::literal(value),
        };
        Self::new(subject, predicate, object)
    }

    pub fn to_ntriple(&self) -> String {
        let object = match &self.object {
            Term::Uri(value) => format!("<{}>", value),
            Term::Literal { value, lang: None } => {
                format!("\"{}\"", value.replace('"', "\\\""))
            }
            Term::Literal {
                value,
                lang: Some(tag),
            } => format!("\"{}\"@{}", value.replace('"', "\\\""), tag),
        };
        format!("<{}> <{}> {} .", self.subject, self.predicate, object)
    }

    fn validate(&self) -> Result<(), GraphError> {
        if Url::parse(&self.subject).is_err() {
            return Err(GraphError::InvalidIri {
                position: "subject",
                value: self.subject.clone(),
            });
        }
        if Url::parse(&self.predicate).is_err() {
            return Err(GraphError::InvalidIri {
                position: "predicate",
                value: self.predicate.clone(),
            });
        }
        match &self.object {
            Term::Uri(value) if Url::parse(value).is_err() => Err(GraphError::InvalidIri {
                position: "object",
                value: value.clone(),
            }),
            Term::Literal {
                value,
                lang: Some(tag),
            } if tag.is_empty() => Err(GraphError::EmptyLanguageTag {
                value: value.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// An in-memory RDF graph describing a dataset and the controlled
/// vocabularies it references. Triples are validated and deduplicated
/// on insert; queries never mutate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    triples: Vec<RdfTriple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triples(triples: Vec<RdfTriple>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        graph.add_triples(triples)?;
        Ok(graph)
    }

    /// Insert a single triple. Returns false if an equal triple was
    /// already present.
    pub fn insert(&mut self, triple: RdfTriple) -> Result<bool, GraphError> {
        triple.validate()?;

        if self.triples.contains(&triple) {
            return Ok(false);
        }

        debug!("Added triple: {}", triple.to_ntriple());
        self.triples.push(triple);
        Ok(true)
    }

    pub fn add_triples(&mut self, triples: Vec<RdfTriple>) -> Result<usize, GraphError> {
        let mut added_count = 0;

        for triple in triples {
            if self.insert(triple)? {
                added_count += 1;
            }
        }

        info!("Added {} triples to graph", added_count);
        Ok(added_count)
    }

    /// All object terms linked from `subject` via `predicate`, in
    /// insertion order.
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> {
        self.triples
            .iter()
            .filter(move |t| t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// First object value for subject+predicate as a string. Empty
    /// values map to None.
    pub fn object_value(&self, subject: &str, predicate: &str) -> Option<String> {
        self.objects(subject, predicate)
            .map(|term| term.as_str())
            .find(|value| !value.is_empty())
            .map(|value| value.to_string())
    }

    /// All object values for subject+predicate as strings.
    pub fn object_value_list(&self, subject: &str, predicate: &str) -> Vec<String> {
        self.objects(subject, predicate)
            .map(|term| term.as_str().to_string())
            .collect()
    }

    /// Preferred human-readable label of a concept in the given
    /// language: the first skos:prefLabel literal whose tag matches,
    /// then the first matching rdfs:label. Tags compare
    /// case-insensitively.
    pub fn preferred_label(&self, uri: &str, lang: &str) -> Option<String> {
        for property in vocab::LABEL_PROPERTIES {
            let label = self.objects(uri, property).find_map(|term| match term {
                Term::Literal {
                    value,
                    lang: Some(tag),
                } if tag.eq_ignore_ascii_case(lang) => Some(value.clone()),
                _ => None,
            });

            if label.is_some() {
                return label;
            }
        }

        None
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        let mut unique_subjects = std::collections::HashSet::new();
        let mut unique_predicates = std::collections::HashSet::new();

        for triple in &self.triples {
            unique_subjects.insert(&triple.subject);
            unique_predicates.insert(&triple.predicate);
        }

        GraphStats {
            total_triples: self.triples.len(),
            unique_subjects: unique_subjects.len(),
            unique_predicates: unique_predicates.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_triples: usize,
    pub unique_subjects: usize,
    pub unique_predicates: usize,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph Statistics:\n\
             Total Triples: {}\n\
             Unique Subjects: {}\n\
             Unique Predicates: {}",
            self.total_triples, self.unique_subjects, self.unique_predicates
        )
    }
}
