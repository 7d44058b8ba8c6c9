//! Species normalisation: substitution, genus extraction, leaf type lookup
//! and the special cases for mixed plantings and genus-level records.

use crate::model::{Denotation, LeafType};
use tracing::debug;

/// Colloquial or malformed names found in the inventory.
const SPECIES_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("Lawson Cypress", "Chamaecyparis lawsoniana"),
    ("Lawson cypress (type)", "Chamaecyparis lawsoniana"),
    ("Lodgepole Pine", "Pinus contorta"),
    ("Field maple", "Acer campestre"),
    ("Beech (type)", "Fagus (type)"),
];

/// Values meaning "not recorded".
pub const SENTINELS: &[&str] = &["N/A", "Not known"];

/// Labels like "Fagus (type)" identify a genus, not a species.
const GENUS_LEVEL_SUFFIX: &str = "(type)";

const CONIFERS: &[&str] = &[
    "abies",
    "araucaria",
    "calocedrus",
    "cedrus",
    "chamaecyparis",
    "cryptomeria",
    "cupressocyparis",
    "cupressus",
    "juniperus",
    "metasequoia",
    "picea",
    "pinus",
    "platycladus",
    "pseudotsuga",
    "sequoiadendron",
    "taxus",
    "thuja",
    "thujopsis",
    "tsuga",
];

const BROAD_LEAVED: &[&str] = &[
    "acer",
    "aesculus",
    "ailanthus",
    "albizia",
    "alnus",
    "amelanchier",
    "betula",
    "broussonetia",
    "buxus",
    "caragana",
    "carpinus",
    "castanea",
    "catalpa",
    "celtis",
    "cercidiphyllum",
    "cercis",
    "cladrastis",
    "cornus",
    "corylus",
    "cotinus",
    "cotoneaster",
    "crataegus",
    "cydonia",
    "davidia",
    "elaeagnus",
    "eucalyptus",
    "eucommia",
    "exochorda",
    "fagus",
    "fontanesia",
    "frangula",
    "fraxinus",
    "gingko",
    "ginkgo",
    "gleditsia",
    "gymnocladus",
    "hibiscus",
    "ilex",
    "juglans",
    "koelreuteria",
    "laburnum",
    "larix",
    "liquidambar",
    "liriodendron",
    "maclura",
    "magnolia",
    "malus",
    "morus",
    "nothofagus",
    "ostrya",
    "parrotia",
    "paulownia",
    "phellodendron",
    "photinia",
    "platanus",
    "populus",
    "prunus",
    "pterocarya",
    "pyrus",
    "quercus",
    "rhamnus",
    "rhus",
    "robinia",
    "salix",
    "sambucus",
    "sophora",
    "sorbus",
    "tamarix",
    "tetradium",
    "tilia",
    "tilla",
    "toona",
    "ulmus",
    "zelkova",
];

/// Species, genus, leaf type and denotation for one record.
///
/// Every field is `None` when the corresponding tag must not be emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesClass {
    pub species: Option<String>,
    pub genus: Option<String>,
    pub leaf_type: Option<LeafType>,
    pub denotation: Option<Denotation>,
}

pub fn substitute(raw: &str) -> String {
    SPECIES_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| {
            debug!("Substituted species '{}' -> '{}'", raw, to);
            to.to_string()
        })
        .unwrap_or_else(|| raw.to_string())
}

pub fn is_sentinel(value: &str) -> bool {
    SENTINELS.contains(&value)
}

/// Lower-cased first word of the species, empty for a blank species.
pub fn detect_genus(species: &str) -> String {
    species
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default()
}

pub fn leaf_type_for(genus: &str) -> LeafType {
    let genus = genus.to_lowercase();
    if CONIFERS.contains(&genus.as_str()) {
        LeafType::Conifer
    } else if BROAD_LEAVED.contains(&genus.as_str()) {
        LeafType::BroadLeaved
    } else {
        debug!("Unknown genus '{}', leaf type unresolved", genus);
        LeafType::Unresolved(genus)
    }
}

/// Classifies an already substituted, non-sentinel species.
///
/// `denotation` is the value derived from the surround description; the mixed
/// planting cases replace it with `cluster`.
pub fn classify(species: &str, denotation: Option<Denotation>) -> SpeciesClass {
    match species {
        "Mixed broadleaf" => SpeciesClass {
            species: None,
            genus: None,
            leaf_type: Some(LeafType::BroadLeaved),
            denotation: Some(Denotation::Cluster),
        },
        "Mixed coniferous" => SpeciesClass {
            species: None,
            genus: None,
            leaf_type: Some(LeafType::Conifer),
            denotation: Some(Denotation::Cluster),
        },
        "Mixed" | "Mixed broadleaf and coniferous" => SpeciesClass {
            species: None,
            genus: None,
            leaf_type: None,
            denotation: Some(Denotation::Cluster),
        },
        _ => {
            // 空の属名も unknown: として残す
            let genus = detect_genus(species);
            SpeciesClass {
                species: (!species.is_empty() && !species.ends_with(GENUS_LEVEL_SUFFIX))
                    .then(|| species.to_string()),
                leaf_type: Some(leaf_type_for(&genus)),
                genus: (!genus.is_empty()).then_some(genus),
                denotation,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution_table() {
        assert_eq!(substitute("Lawson Cypress"), "Chamaecyparis lawsoniana");
        assert_eq!(substitute("Lawson cypress (type)"), "Chamaecyparis lawsoniana");
        assert_eq!(substitute("Lodgepole Pine"), "Pinus contorta");
        assert_eq!(substitute("Field maple"), "Acer campestre");
        assert_eq!(substitute("Beech (type)"), "Fagus (type)");
        assert_eq!(substitute("Quercus robur"), "Quercus robur");
        // 完全一致のみ
        assert_eq!(substitute("lawson cypress"), "lawson cypress");
    }

    #[test]
    fn test_sentinels() {
        assert!(is_sentinel("N/A"));
        assert!(is_sentinel("Not known"));
        assert!(!is_sentinel("n/a"));
        assert!(!is_sentinel(""));
    }

    #[test]
    fn test_detect_genus() {
        assert_eq!(detect_genus("Chamaecyparis lawsoniana"), "chamaecyparis");
        assert_eq!(detect_genus("Acer"), "acer");
        assert_eq!(detect_genus(""), "");
        assert_eq!(detect_genus(" "), "");
    }

    #[test]
    fn test_leaf_type_lookup() {
        assert_eq!(leaf_type_for("pinus"), LeafType::Conifer);
        assert_eq!(leaf_type_for("Taxus"), LeafType::Conifer);
        assert_eq!(leaf_type_for("quercus"), LeafType::BroadLeaved);
        assert_eq!(leaf_type_for("TILIA"), LeafType::BroadLeaved);
        assert_eq!(
            leaf_type_for("arbutus"),
            LeafType::Unresolved("arbutus".to_string())
        );
    }

    #[test]
    fn test_every_listed_genus_resolves() {
        for genus in CONIFERS {
            assert_eq!(leaf_type_for(genus), LeafType::Conifer, "{}", genus);
        }
        for genus in BROAD_LEAVED {
            assert_eq!(leaf_type_for(genus), LeafType::BroadLeaved, "{}", genus);
        }
    }

    #[test]
    fn test_classify_regular_species() {
        let class = classify("Chamaecyparis lawsoniana", Some(Denotation::Urban));
        assert_eq!(class.species.as_deref(), Some("Chamaecyparis lawsoniana"));
        assert_eq!(class.genus.as_deref(), Some("chamaecyparis"));
        assert_eq!(class.leaf_type, Some(LeafType::Conifer));
        assert_eq!(class.denotation, Some(Denotation::Urban));
    }

    #[test]
    fn test_classify_mixed_plantings() {
        let broadleaf = classify("Mixed broadleaf", Some(Denotation::Avenue));
        assert_eq!(broadleaf.species, None);
        assert_eq!(broadleaf.genus, None);
        assert_eq!(broadleaf.leaf_type, Some(LeafType::BroadLeaved));
        assert_eq!(broadleaf.denotation, Some(Denotation::Cluster));

        let coniferous = classify("Mixed coniferous", None);
        assert_eq!(coniferous.leaf_type, Some(LeafType::Conifer));
        assert_eq!(coniferous.denotation, Some(Denotation::Cluster));

        for species in ["Mixed", "Mixed broadleaf and coniferous"] {
            let class = classify(species, Some(Denotation::Urban));
            assert_eq!(class.species, None);
            assert_eq!(class.genus, None);
            assert_eq!(class.leaf_type, None);
            assert_eq!(class.denotation, Some(Denotation::Cluster));
        }
    }

    #[test]
    fn test_classify_genus_level_record() {
        let class = classify("Fagus (type)", None);
        assert_eq!(class.species, None);
        assert_eq!(class.genus.as_deref(), Some("fagus"));
        assert_eq!(class.leaf_type, Some(LeafType::BroadLeaved));
    }

    #[test]
    fn test_classify_blank_species() {
        let class = classify(" ", Some(Denotation::Avenue));
        assert_eq!(class.species.as_deref(), Some(" "));
        assert_eq!(class.genus, None);
        assert_eq!(class.leaf_type, Some(LeafType::Unresolved(String::new())));
        assert_eq!(class.denotation, Some(Denotation::Avenue));

        let class = classify("", None);
        assert_eq!(class.species, None);
        assert_eq!(class.genus, None);
        assert_eq!(
            class.leaf_type.map(|leaf| leaf.to_string()).as_deref(),
            Some("unknown:")
        );
    }

    #[test]
    fn test_classify_unknown_genus_keeps_signal() {
        let class = classify("Arbutus unedo", None);
        assert_eq!(class.species.as_deref(), Some("Arbutus unedo"));
        assert_eq!(
            class.leaf_type,
            Some(LeafType::Unresolved("arbutus".to_string()))
        );
    }
}
