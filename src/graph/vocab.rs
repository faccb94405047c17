/// DCAT vocabulary namespace IRI prefix.
pub const DCAT_NS: &str = "http://www.w3.org/ns/dcat#";
/// SKOS core vocabulary namespace IRI prefix.
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";
/// RDF Schema namespace IRI prefix.
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

// Properties
pub const DCAT_THEME: &str = "http://www.w3.org/ns/dcat#theme";
pub const SKOS_IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// Label properties consulted by preferred-label lookup, in priority order.
pub const LABEL_PROPERTIES: [&str; 2] = [SKOS_PREF_LABEL, RDFS_LABEL];
