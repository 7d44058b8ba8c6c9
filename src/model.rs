use std::collections::HashMap;
use std::fmt;

/// 1本の樹木を囲む要素名
pub const RECORD_ELEMENT: &str = "belfasttrees";

pub mod fields {
    pub const SPECIES_TYPE: &str = "speciestype";
    pub const AGE: &str = "age";
    pub const DIAMETER_CM: &str = "diameterincentimetres";
    pub const SPREAD_RADIUS_M: &str = "spreadradiusinmetres";
    pub const LONGITUDE: &str = "longitude";
    pub const LATITUDE: &str = "latitude";
    pub const LOCATION_X: &str = "treelocationx";
    pub const LOCATION_Y: &str = "treelocationy";
    pub const TREE_TAG: &str = "treetag";
    pub const HEIGHT_M: &str = "treeheightinmetres";
    pub const SPECIES: &str = "species";
    pub const SURROUND: &str = "treesurround";

    /// Fields stored verbatim.
    pub const VERBATIM: &[&str] = &[
        SPECIES_TYPE,
        AGE,
        DIAMETER_CM,
        SPREAD_RADIUS_M,
        LONGITUDE,
        LATITUDE,
        LOCATION_X,
        LOCATION_Y,
        TREE_TAG,
        HEIGHT_M,
    ];
}

/// Advisory markers recorded for human review.
pub mod fixme {
    pub const DENOTATION: &str = "Denotation";
    pub const SPECIES: &str = "Species, genus and English name";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denotation {
    Avenue,
    Urban,
    Cluster,
}

impl Denotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Denotation::Avenue => "avenue",
            Denotation::Urban => "urban",
            Denotation::Cluster => "cluster",
        }
    }
}

impl fmt::Display for Denotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafType {
    Conifer,
    BroadLeaved,
    /// Genus missing from both lookup tables. Rendered as `unknown:<genus>`.
    Unresolved(String),
}

impl LeafType {
    pub fn needs_review(&self) -> bool {
        matches!(self, LeafType::Unresolved(_))
    }
}

impl fmt::Display for LeafType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafType::Conifer => f.write_str("conifer"),
            LeafType::BroadLeaved => f.write_str("broad_leaved"),
            LeafType::Unresolved(genus) => write!(f, "unknown:{}", genus),
        }
    }
}

/// Field values collected while scanning one `<belfasttrees>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub fields: HashMap<String, String>,
    /// Species after substitution.
    pub species: Option<String>,
    /// Denotation derived from the surround description.
    pub denotation: Option<Denotation>,
    pub fixme: Vec<&'static str>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), value.into());
    }
}

/// A classified tree ready for output.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTree {
    pub lat: f64,
    pub lon: f64,
    /// English genus name from `speciestype`.
    pub genus_en: Option<String>,
    pub species: Option<String>,
    pub genus: Option<String>,
    pub leaf_type: Option<LeafType>,
    pub denotation: Option<Denotation>,
    /// Trunk circumference tag value (diameter in cm / 100).
    pub circumference: Option<f64>,
    pub crown_diameter: Option<String>,
    /// Whole metres, only set when greater than zero.
    pub height: Option<i64>,
    pub fixme: Vec<&'static str>,
    pub tree_tag: Option<String>,
}

impl NormalizedTree {
    pub fn needs_review(&self) -> bool {
        !self.fixme.is_empty() || self.leaf_type.as_ref().is_some_and(LeafType::needs_review)
    }
}

/// One `<node>` of the output document.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub tags: Vec<(&'static str, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_type_display() {
        assert_eq!(LeafType::Conifer.to_string(), "conifer");
        assert_eq!(LeafType::BroadLeaved.to_string(), "broad_leaved");
        assert_eq!(
            LeafType::Unresolved("arbutus".to_string()).to_string(),
            "unknown:arbutus"
        );
    }

    #[test]
    fn test_unresolved_leaf_type_needs_review() {
        assert!(LeafType::Unresolved("x".to_string()).needs_review());
        assert!(!LeafType::Conifer.needs_review());
    }

    #[test]
    fn test_denotation_as_str() {
        assert_eq!(Denotation::Avenue.as_str(), "avenue");
        assert_eq!(Denotation::Urban.as_str(), "urban");
        assert_eq!(Denotation::Cluster.to_string(), "cluster");
    }
}
