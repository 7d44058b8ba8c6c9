use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tree record without {field}")]
    MissingCoordinate { field: &'static str },

    #[error("Invalid number in <{field}>: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Grid coordinate ({x}, {y}) cannot be reprojected")]
    OutOfRange { x: f64, y: f64 },

    #[error("Input ended inside an unterminated tree record")]
    UnterminatedRecord,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
