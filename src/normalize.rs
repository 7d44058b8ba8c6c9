use tracing::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::model::{fields, fixme, NormalizedTree, RawRecord};
use crate::reproject::irish_grid_to_wgs84;
use crate::species::{classify, is_sentinel, SpeciesClass};

/// Reprojects and classifies one record.
pub fn normalize(record: RawRecord) -> Result<NormalizedTree> {
    let (lat, lon) = locate(&record)?;

    let mut markers = record.fixme;
    let class = match record.species.as_deref() {
        Some(species) if is_sentinel(species) => {
            debug!("Species not recorded ('{}')", species);
            markers.push(fixme::SPECIES);
            SpeciesClass::default()
        }
        Some(species) => classify(species, record.denotation),
        // denotation は樹種ブロックの一部
        None => SpeciesClass::default(),
    };

    let genus_en = record
        .fields
        .get(fields::SPECIES_TYPE)
        .filter(|value| !is_sentinel(value.as_str()))
        .cloned();

    let circumference = record
        .fields
        .get(fields::DIAMETER_CM)
        .map(|value| parse_f64(fields::DIAMETER_CM, value).map(|cm| cm / 100.0))
        .transpose()?;

    let height = record
        .fields
        .get(fields::HEIGHT_M)
        .map(|value| parse_height(value))
        .transpose()?
        .filter(|metres| *metres > 0);

    let tree = NormalizedTree {
        lat,
        lon,
        genus_en,
        species: class.species,
        genus: class.genus,
        leaf_type: class.leaf_type,
        denotation: class.denotation,
        circumference,
        crown_diameter: record.fields.get(fields::SPREAD_RADIUS_M).cloned(),
        height,
        fixme: markers,
        tree_tag: record.fields.get(fields::TREE_TAG).cloned(),
    };

    if tree.needs_review() {
        warn!(
            "Tree {} needs review: fixme={:?} leaf_type={:?}",
            tree.tree_tag.as_deref().unwrap_or("?"),
            tree.fixme,
            tree.leaf_type
        );
    }
    Ok(tree)
}

fn locate(record: &RawRecord) -> Result<(f64, f64)> {
    let x = record
        .get(fields::LOCATION_X)
        .ok_or(ConvertError::MissingCoordinate {
            field: fields::LOCATION_X,
        })?;
    let y = record
        .get(fields::LOCATION_Y)
        .ok_or(ConvertError::MissingCoordinate {
            field: fields::LOCATION_Y,
        })?;

    irish_grid_to_wgs84(
        parse_f64(fields::LOCATION_X, x)?,
        parse_f64(fields::LOCATION_Y, y)?,
    )
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| ConvertError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Integer part of a decimal height such as "12.5".
fn parse_height(value: &str) -> Result<i64> {
    let whole = value.split('.').next().unwrap_or_default();
    whole
        .trim()
        .parse()
        .map_err(|_| ConvertError::InvalidNumber {
            field: fields::HEIGHT_M,
            value: value.to_string(),
        })
}
