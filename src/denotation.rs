use crate::model::Denotation;

/// Hard or paved surrounds: street trees.
const AVENUE_SURROUNDS: &[&str] = &["Concrete", "Flower Bed", "Paved Brick Paviour", "Tarmac"];

/// Soft or natural surrounds.
const URBAN_SURROUNDS: &[&str] = &[
    "Bare Ground",
    "Bramble/Briars",
    "Grass",
    "Shrubs",
    "Water",
    "Woodland",
];

/// Maps a `treesurround` description to a denotation; `None` for anything unlisted.
pub fn classify_surround(surround: &str) -> Option<Denotation> {
    if AVENUE_SURROUNDS.contains(&surround) {
        Some(Denotation::Avenue)
    } else if URBAN_SURROUNDS.contains(&surround) {
        Some(Denotation::Urban)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paved_surrounds_are_avenue() {
        for surround in AVENUE_SURROUNDS {
            assert_eq!(classify_surround(surround), Some(Denotation::Avenue));
        }
    }

    #[test]
    fn test_soft_surrounds_are_urban() {
        for surround in URBAN_SURROUNDS {
            assert_eq!(classify_surround(surround), Some(Denotation::Urban));
        }
    }

    #[test]
    fn test_unknown_surround() {
        assert_eq!(classify_surround("Gravel"), None);
        assert_eq!(classify_surround("grass"), None);
        assert_eq!(classify_surround(""), None);
    }
}
