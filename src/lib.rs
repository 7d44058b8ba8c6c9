pub mod config;
pub mod convert;
pub mod denotation;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod reproject;
pub mod species;
pub mod writer;

pub use config::ConvertConfig;
pub use convert::{convert, ConversionSummary};
pub use error::{ConvertError, Result};
pub use model::{Denotation, LeafType, NormalizedTree, OutputNode, RawRecord};
pub use writer::OsmWriter;
