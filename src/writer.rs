use std::io::Write;

use quick_xml::escape::escape;

use crate::config::ConvertConfig;
use crate::error::Result;
use crate::model::{NormalizedTree, OutputNode};

/// OSM XML 0.6 の書き出し
pub struct OsmWriter<W: Write> {
    inner: W,
    config: ConvertConfig,
    next_id: i64,
}

impl<W: Write> OsmWriter<W> {
    pub fn new(inner: W, config: ConvertConfig) -> Self {
        let next_id = i64::from(config.first_node_id);
        Self {
            inner,
            config,
            next_id,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        writeln!(self.inner, "<?xml version='1.0' encoding='UTF-8'?>")?;
        writeln!(
            self.inner,
            "<osm version='0.6' upload='false' generator='{}'>",
            escape(self.config.generator.as_str())
        )?;
        Ok(())
    }

    /// Writes one `<node>` and returns its id.
    pub fn write_node(&mut self, tree: &NormalizedTree) -> Result<i64> {
        let node = self.build_node(tree);

        writeln!(
            self.inner,
            "    <node id='{}' timestamp='{}' visible='true' lat='{}' lon='{}'>",
            node.id,
            escape(self.config.timestamp.as_str()),
            format_coordinate(node.lat),
            format_coordinate(node.lon)
        )?;
        for (key, value) in &node.tags {
            writeln!(
                self.inner,
                "        <tag k='{}' v='{}' />",
                key,
                escape(value.as_str())
            )?;
        }
        writeln!(self.inner, "    </node>")?;

        Ok(node.id)
    }

    pub fn write_footer(&mut self) -> Result<()> {
        writeln!(self.inner, "</osm>")?;
        self.inner.flush()?;
        Ok(())
    }

    /// Assigns the next id and lays out tags in their fixed order.
    pub fn build_node(&mut self, tree: &NormalizedTree) -> OutputNode {
        let id = -self.next_id;
        self.next_id += 1;

        let mut tags: Vec<(&'static str, String)> = vec![("natural", "tree".to_string())];
        if let Some(genus_en) = &tree.genus_en {
            tags.push(("genus:en", genus_en.clone()));
        }
        if let Some(species) = &tree.species {
            tags.push(("species", species.clone()));
        }
        if let Some(genus) = &tree.genus {
            tags.push(("genus", genus.clone()));
        }
        if let Some(leaf_type) = &tree.leaf_type {
            tags.push(("leaf_type", leaf_type.to_string()));
        }
        if let Some(denotation) = tree.denotation {
            tags.push(("denotation", denotation.to_string()));
        }
        if let Some(circumference) = tree.circumference {
            tags.push(("circumference", format_decimal(circumference)));
        }
        if let Some(crown) = &tree.crown_diameter {
            tags.push(("diameter_crown", crown.clone()));
        }
        if let Some(height) = tree.height {
            tags.push(("height", height.to_string()));
        }
        if self.config.emit_fixme && !tree.fixme.is_empty() {
            tags.push(("fixme", tree.fixme.join(", ")));
        }
        tags.push(("source", self.config.source.clone()));

        OutputNode {
            id,
            lat: tree.lat,
            lon: tree.lon,
            tags,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Always keeps a fractional part: `1` -> `1.0`, `0.55` -> `0.55`.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// 12 significant digits with trailing zeros trimmed: `54.60518028682191` -> `54.6051802868`.
pub fn format_coordinate(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format_decimal(value);
    }
    let int_digits = (value.abs().log10().floor() as i32 + 1).max(1);
    let decimals = (12 - int_digits).max(1) as usize;
    let text = format!("{:.*}", decimals, value);
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
