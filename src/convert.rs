use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::config::ConvertConfig;
use crate::error::Result;
use crate::normalize::normalize;
use crate::parser::TreeReader;
use crate::writer::OsmWriter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub nodes_written: usize,
    /// Trees with fixme markers or an unresolved leaf type.
    pub needs_review: usize,
    pub first_id: Option<i64>,
    pub last_id: Option<i64>,
}

/// Streams the whole inventory from `input` to an OSM document on `output`.
///
/// Any fatal error aborts the run; output already written is not valid.
pub fn convert<R: BufRead, W: Write>(
    input: R,
    output: W,
    config: &ConvertConfig,
) -> Result<ConversionSummary> {
    let mut reader = TreeReader::new(input);
    let mut writer = OsmWriter::new(output, config.clone());
    let mut summary = ConversionSummary::default();

    writer.write_header()?;
    while let Some(record) = reader.next_record()? {
        let tree = normalize(record)?;
        if tree.needs_review() {
            summary.needs_review += 1;
        }
        let id = writer.write_node(&tree)?;
        debug!("Written node {}", id);

        summary.first_id.get_or_insert(id);
        summary.last_id = Some(id);
        summary.nodes_written += 1;
    }
    writer.write_footer()?;

    info!(
        "Converted {} trees ({} need review)",
        summary.nodes_written, summary.needs_review
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    const TWO_TREES: &str = r#"<data>
  <belfasttrees>
    <species>Lawson Cypress</species>
    <treelocationx>335000</treelocationx>
    <treelocationy>375000</treelocationy>
  </belfasttrees>
  <belfasttrees>
    <species>N/A</species>
    <treelocationx>334000</treelocationx>
    <treelocationy>374000</treelocationy>
  </belfasttrees>
</data>"#;

    #[test]
    fn test_convert_summary() {
        let mut out = Vec::new();
        let summary = convert(TWO_TREES.as_bytes(), &mut out, &ConvertConfig::default()).unwrap();

        assert_eq!(summary.nodes_written, 2);
        assert_eq!(summary.needs_review, 1);
        assert_eq!(summary.first_id, Some(-31337));
        assert_eq!(summary.last_id, Some(-31338));

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("</osm>\n"));
        assert_eq!(text.matches("<node ").count(), 2);
    }

    #[test]
    fn test_empty_inventory() {
        let mut out = Vec::new();
        let summary = convert("<data/>".as_bytes(), &mut out, &ConvertConfig::default()).unwrap();
        assert_eq!(summary, ConversionSummary::default());
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_missing_coordinate_aborts() {
        let xml = "<data><belfasttrees><treelocationx>1</treelocationx></belfasttrees></data>";
        let result = convert(xml.as_bytes(), Vec::new(), &ConvertConfig::default());
        assert!(matches!(
            result,
            Err(ConvertError::MissingCoordinate { .. })
        ));
    }
}
