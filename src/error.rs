use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Image loading error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata extraction error: {0}")]
    MetadataError(String),

    #[error("Report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No metadata or GPS location to save")]
    EmptyReport,
}

pub type Result<T> = std::result::Result<T, InspectError>;
