use anyhow::{Context, Result};
use tracing::{debug, warn};
use url::Url;

use crate::config::Configuration;
use crate::core::normalizer::NormalizationOutcome;
use crate::core::record::{DatasetRecord, GroupRef};
use crate::graph::{vocab, Graph};
use crate::utils::serialization::ConceptValue;

/// A single normalization pass over a dataset record. Profiles are run
/// in sequence by the normalizer and must stay best-effort: anything
/// recoverable goes into the outcome's warnings, not into an Err.
pub trait Profile: Send + Sync {
    fn name(&self) -> &'static str;

    fn parse_dataset(
        &self,
        graph: &Graph,
        record: &mut DatasetRecord,
        dataset_uri: &str,
        outcome: &mut NormalizationOutcome,
    ) -> Result<()>;
}

/// Replace concept URIs stored under `field_key` with their preferred
/// labels in `locale`. The extra's value keeps its shape (bare string or
/// JSON list); URIs without a label in the graph stay as they are.
/// Returns the number of substitutions made.
///
/// A dataset without the extra is left untouched.
pub fn resolve_concept_labels(
    graph: &Graph,
    record: &mut DatasetRecord,
    field_key: &str,
    locale: &str,
) -> Result<usize> {
    let raw = match record.extra_value(field_key) {
        Some(value) => value.to_string(),
        None => {
            debug!("No '{}' extra on dataset, nothing to resolve", field_key);
            return Ok(0);
        }
    };

    let mut resolved = 0;
    let rewritten = match ConceptValue::parse(&raw) {
        ConceptValue::Scalar(value) => match lookup_label(graph, &value, locale) {
            Some(label) => {
                resolved = 1;
                ConceptValue::Scalar(label)
            }
            None => ConceptValue::Scalar(value),
        },
        ConceptValue::List(uris) => {
            let mut working = uris.clone();
            // Iterate the snapshot; mutate the working copy.
            for uri in &uris {
                if let Some(label) = lookup_label(graph, uri, locale) {
                    if let Some(pos) = working.iter().position(|v| v == uri) {
                        working.remove(pos);
                        working.push(label);
                        resolved += 1;
                    }
                }
            }
            ConceptValue::List(working)
        }
    };

    let serialized = rewritten
        .serialize()
        .with_context(|| format!("Failed to rewrite '{}' extra", field_key))?;
    record.set_extra_value(field_key, serialized);

    debug!("Resolved {} concept label(s) for '{}'", resolved, field_key);
    Ok(resolved)
}

fn lookup_label(graph: &Graph, value: &str, locale: &str) -> Option<String> {
    // Non-URI values (including already-resolved labels) never match a
    // concept, so skip the graph lookup entirely.
    if Url::parse(value).is_err() {
        return None;
    }
    graph.preferred_label(value, locale)
}

/// Derive group references from the dataset's themes: one reference per
/// dcat:theme object, carrying the theme's skos:inScheme URI. Duplicates
/// are preserved when several themes share a scheme. Themes without a
/// scheme yield no reference and are recorded in `warnings`.
pub fn derive_theme_groups(
    graph: &Graph,
    dataset_uri: &str,
    warnings: &mut Vec<String>,
) -> Vec<GroupRef> {
    let mut groups = Vec::new();

    for theme_uri in graph.object_value_list(dataset_uri, vocab::DCAT_THEME) {
        match graph.object_value(&theme_uri, vocab::SKOS_IN_SCHEME) {
            Some(scheme_uri) => groups.push(GroupRef::new(scheme_uri)),
            None => {
                warn!("Theme <{}> has no skos:inScheme, no group derived", theme_uri);
                warnings.push(format!("theme <{}> has no skos:inScheme", theme_uri));
            }
        }
    }

    groups
}

/// Rewrites the configured concept-bearing extras (by default `theme`
/// and `publisher_type`) from URIs to preferred labels.
pub struct LabeledConceptsProfile {
    concept_fields: Vec<String>,
    locale: String,
}

impl LabeledConceptsProfile {
    pub fn new(config: &Configuration) -> Self {
        Self {
            concept_fields: config.concept_fields.clone(),
            locale: config.locale.clone(),
        }
    }
}

impl Profile for LabeledConceptsProfile {
    fn name(&self) -> &'static str {
        "labeled_concepts"
    }

    fn parse_dataset(
        &self,
        graph: &Graph,
        record: &mut DatasetRecord,
        _dataset_uri: &str,
        outcome: &mut NormalizationOutcome,
    ) -> Result<()> {
        for field_key in &self.concept_fields {
            outcome.labels_resolved += resolve_concept_labels(graph, record, field_key, &self.locale)?;
        }
        Ok(())
    }
}

/// Replaces the record's group list with references derived from theme
/// schemes. With a scheme prefix configured, schemes outside it are
/// dropped with a warning.
pub struct ThemeGroupsProfile {
    scheme_prefix: Option<String>,
}

impl ThemeGroupsProfile {
    pub fn new(config: &Configuration) -> Self {
        Self {
            scheme_prefix: config.group_scheme_prefix.clone(),
        }
    }
}

impl Profile for ThemeGroupsProfile {
    fn name(&self) -> &'static str {
        "theme_groups"
    }

    fn parse_dataset(
        &self,
        graph: &Graph,
        record: &mut DatasetRecord,
        dataset_uri: &str,
        outcome: &mut NormalizationOutcome,
    ) -> Result<()> {
        let mut groups = derive_theme_groups(graph, dataset_uri, &mut outcome.warnings);

        if let Some(prefix) = &self.scheme_prefix {
            let before = groups.len();
            groups.retain(|group| group.id.starts_with(prefix.as_str()));
            let dropped = before - groups.len();
            if dropped > 0 {
                warn!("Dropped {} group(s) outside scheme prefix {}", dropped, prefix);
                outcome
                    .warnings
                    .push(format!("{} group(s) outside scheme prefix {}", dropped, prefix));
            }
        }

        outcome.groups_derived += groups.len();
        record.groups = groups;
        Ok(())
    }
}
