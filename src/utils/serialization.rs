use anyhow::{Context, Result};

/// Shape of a concept-bearing extra value. Hosts store either one bare
/// URI string or a JSON-encoded list of URI strings under a single
/// extra; which shape applies is only known by looking at the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptValue {
    Scalar(String),
    List(Vec<String>),
}

impl ConceptValue {
    /// Detect the shape of a raw extra value. Only a JSON array of
    /// strings becomes List; everything else (malformed JSON, non-array
    /// JSON, arrays holding non-strings) is kept whole as a Scalar.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(values) => ConceptValue::List(values),
            Err(_) => ConceptValue::Scalar(raw.to_string()),
        }
    }

    /// Serialize back to an extra value, preserving the input shape.
    /// Lists become JSON with non-ASCII characters intact; scalars are
    /// written bare so an untouched value round-trips unchanged.
    pub fn serialize(&self) -> Result<String> {
        match self {
            ConceptValue::List(values) => {
                serde_json::to_string(values).context("Failed to serialize concept list")
            }
            ConceptValue::Scalar(value) => Ok(value.clone()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ConceptValue::List(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_list() {
        let value = ConceptValue::parse("[\"http://example.org/c1\", \"http://example.org/c2\"]");
        assert_eq!(
            value,
            ConceptValue::List(vec![
                "http://example.org/c1".to_string(),
                "http://example.org/c2".to_string(),
            ])
        );
    }

    #[test]
    fn test_parse_bare_uri_is_scalar() {
        let value = ConceptValue::parse("http://eurovoc.europa.eu/100");
        assert_eq!(
            value,
            ConceptValue::Scalar("http://eurovoc.europa.eu/100".to_string())
        );
    }

    #[test]
    fn test_parse_non_array_json_is_scalar() {
        // Values that happen to be valid JSON but not a string array
        // must not be iterated element-wise.
        assert!(!ConceptValue::parse("\"quoted\"").is_list());
        assert!(!ConceptValue::parse("42").is_list());
        assert!(!ConceptValue::parse("{\"a\": 1}").is_list());
        assert!(!ConceptValue::parse("[1, 2]").is_list());
    }

    #[test]
    fn test_scalar_serializes_bare() {
        let value = ConceptValue::Scalar("http://eurovoc.europa.eu/100".to_string());
        assert_eq!(value.serialize().unwrap(), "http://eurovoc.europa.eu/100");
    }

    #[test]
    fn test_list_serializes_without_escaping_non_ascii() {
        let value = ConceptValue::List(vec!["Énergie".to_string()]);
        assert_eq!(value.serialize().unwrap(), "[\"Énergie\"]");
    }

    #[test]
    fn test_list_round_trip() {
        let raw = "[\"alpha\",\"beta\"]";
        let value = ConceptValue::parse(raw);
        assert_eq!(value.serialize().unwrap(), raw);
    }
}
