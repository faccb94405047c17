use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Configuration;
use crate::core::profiles::{LabeledConceptsProfile, Profile, ThemeGroupsProfile};
use crate::core::record::DatasetRecord;
use crate::graph::Graph;

/// What a normalization run did to one dataset record. Warnings collect
/// everything recoverable; a run itself never fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationOutcome {
    pub id: String,
    pub dataset_uri: String,
    pub normalized_at: DateTime<Utc>,
    pub labels_resolved: usize,
    pub groups_derived: usize,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub config_name: String,
}

impl NormalizationOutcome {
    pub fn new(dataset_uri: String, config_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            dataset_uri,
            normalized_at: Utc::now(),
            labels_resolved: 0,
            groups_derived: 0,
            warnings: Vec::new(),
            metadata: HashMap::new(),
            config_name,
        }
    }

    pub fn with_warning(mut self, warning: String) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Runs the configured profile sequence over dataset records. Holds no
/// state between calls; each record/graph pair is independent.
pub struct MetadataNormalizer {
    config: Configuration,
    profiles: Vec<Box<dyn Profile>>,
}

impl MetadataNormalizer {
    pub fn new(config: Configuration) -> Self {
        let mut profiles: Vec<Box<dyn Profile>> =
            vec![Box::new(LabeledConceptsProfile::new(&config))];

        if config.derive_groups {
            profiles.push(Box::new(ThemeGroupsProfile::new(&config)));
        }

        Self { config, profiles }
    }

    /// Replace the default profile sequence, e.g. to run a single
    /// profile or to append a host-defined one.
    pub fn with_profiles(config: Configuration, profiles: Vec<Box<dyn Profile>>) -> Self {
        Self { config, profiles }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Apply every profile to the record in order, mutating it in
    /// place. Profile errors are absorbed into the outcome's warnings;
    /// the record keeps whatever state the failing profile left behind.
    pub fn normalize(
        &self,
        graph: &Graph,
        record: &mut DatasetRecord,
        dataset_uri: &str,
    ) -> NormalizationOutcome {
        info!(
            "Normalizing dataset <{}> with {} profile(s)",
            dataset_uri,
            self.profiles.len()
        );

        let mut outcome =
            NormalizationOutcome::new(dataset_uri.to_string(), self.config.name.clone());

        for profile in &self.profiles {
            if let Err(e) = profile.parse_dataset(graph, record, dataset_uri, &mut outcome) {
                let message = format!("Profile '{}' failed: {:#}", profile.name(), e);
                warn!("{}", message);
                outcome.warnings.push(message);
            }
        }

        let profile_names: Vec<&str> = self.profiles.iter().map(|p| p.name()).collect();
        outcome
            .metadata
            .insert("profiles".to_string(), profile_names.join(","));
        outcome
            .metadata
            .insert("locale".to_string(), self.config.locale.clone());

        info!(
            "Normalization finished: {} label(s) resolved, {} group(s) derived, {} warning(s)",
            outcome.labels_resolved,
            outcome.groups_derived,
            outcome.warnings.len()
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::GroupRef;
    use crate::graph::{vocab, RdfTriple};

    const DS: &str = "http://example.org/dataset/1";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn dataset_graph() -> Graph {
        Graph::from_triples(vec![
            RdfTriple::uri_object(DS, vocab::DCAT_THEME, "http://example.org/t1"),
            RdfTriple::uri_object(
                "http://example.org/t1",
                vocab::SKOS_IN_SCHEME,
                "http://eurovoc.europa.eu/100141",
            ),
            RdfTriple::literal_object(
                "http://example.org/t1",
                vocab::SKOS_PREF_LABEL,
                "Energy",
                Some("en"),
            ),
            RdfTriple::literal_object(
                "http://example.org/pub",
                vocab::SKOS_PREF_LABEL,
                "National authority",
                Some("en"),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_normalize_runs_both_profiles() {
        init_tracing();
        let normalizer = MetadataNormalizer::new(Configuration::example());
        let graph = dataset_graph();
        let mut record = DatasetRecord::new()
            .with_extra("theme", "[\"http://example.org/t1\"]")
            .with_extra("publisher_type", "http://example.org/pub");
        record.groups.push(GroupRef::new("stale"));

        let outcome = normalizer.normalize(&graph, &mut record, DS);

        assert_eq!(outcome.labels_resolved, 2);
        assert_eq!(outcome.groups_derived, 1);
        assert_eq!(record.extra_value("theme"), Some("[\"Energy\"]"));
        assert_eq!(record.extra_value("publisher_type"), Some("National authority"));
        // Prior groups are fully replaced, not appended to.
        assert_eq!(record.groups, vec![GroupRef::new("http://eurovoc.europa.eu/100141")]);
    }

    #[test]
    fn test_normalize_without_group_derivation() {
        let mut config = Configuration::example();
        config.derive_groups = false;
        let normalizer = MetadataNormalizer::new(config);
        let graph = dataset_graph();
        let mut record = DatasetRecord::new();
        record.groups.push(GroupRef::new("kept"));

        let outcome = normalizer.normalize(&graph, &mut record, DS);

        assert_eq!(outcome.groups_derived, 0);
        assert_eq!(record.groups, vec![GroupRef::new("kept")]);
    }

    #[test]
    fn test_normalize_collects_scheme_warnings() {
        let graph = Graph::from_triples(vec![RdfTriple::uri_object(
            DS,
            vocab::DCAT_THEME,
            "http://example.org/orphan",
        )])
        .unwrap();
        let normalizer = MetadataNormalizer::new(Configuration::example());
        let mut record = DatasetRecord::new();

        let outcome = normalizer.normalize(&graph, &mut record, DS);

        assert_eq!(outcome.groups_derived, 0);
        assert!(record.groups.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_scheme_prefix_filters_groups() {
        let graph = Graph::from_triples(vec![
            RdfTriple::uri_object(DS, vocab::DCAT_THEME, "http://example.org/t1"),
            RdfTriple::uri_object(
                "http://example.org/t1",
                vocab::SKOS_IN_SCHEME,
                "http://other.example.org/scheme",
            ),
        ])
        .unwrap();

        let mut config = Configuration::example();
        config.group_scheme_prefix = Some("http://eurovoc.europa.eu".to_string());
        let normalizer = MetadataNormalizer::new(config);
        let mut record = DatasetRecord::new();

        let outcome = normalizer.normalize(&graph, &mut record, DS);

        assert!(record.groups.is_empty());
        assert_eq!(outcome.groups_derived, 0);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_outcome_metadata_names_profiles() {
        let normalizer = MetadataNormalizer::new(Configuration::example());
        let mut record = DatasetRecord::new();

        let outcome = normalizer.normalize(&Graph::new(), &mut record, DS);

        assert_eq!(
            outcome.metadata.get("profiles").map(String::as_str),
            Some("labeled_concepts,theme_groups")
        );
        assert_eq!(outcome.config_name, normalizer.config().name);
    }
}
