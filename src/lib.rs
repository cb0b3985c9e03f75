use std::{fs, io::Cursor, path::Path};

use image::DynamicImage;
use log::{debug, warn};

use crate::error::Result;
use crate::geo::GeoFix;
use crate::metadata::decoder::{GpsOutcome, GpsReport, MetadataDecoder, MetadataOutcome};
use crate::metadata::tagset::ExifTagSet;
use crate::thumbnail::ThumbnailRenderer;

pub mod error;
pub mod geo;
pub mod metadata;
pub mod report;
pub mod thumbnail;

#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Bounding square for generated thumbnails, in pixels.
    pub thumbnail_size: u32,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: 200,
        }
    }
}

/// Reads one image and exposes metadata, GPS and thumbnail operations over
/// it. The file is read once; every operation works on the held bytes.
pub struct ImageInspector {
    bytes: Vec<u8>,
    config: InspectorConfig,
}

impl ImageInspector {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_bytes(fs::read(path)?))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            config: InspectorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Decode and resolve all EXIF tags. Codec failures become a
    /// descriptive outcome, never a panic or a raw error.
    pub fn metadata(&self) -> MetadataOutcome {
        match self.read_tags() {
            Ok(tags) => MetadataDecoder::decode_metadata(tags.as_ref()),
            Err(details) => MetadataOutcome::ReadError(details),
        }
    }

    /// Decode the GPS sub-directory into a report and optional fix.
    pub fn gps(&self) -> GpsReport {
        match self.read_tags() {
            Ok(tags) => MetadataDecoder::decode_gps(tags.as_ref()),
            Err(details) => GpsReport {
                tags: Vec::new(),
                outcome: GpsOutcome::ReadError(details),
            },
        }
    }

    /// Run both decodes over a single EXIF read.
    pub fn inspect(&self) -> InspectionReport {
        match self.read_tags() {
            Ok(tags) => InspectionReport {
                metadata: MetadataDecoder::decode_metadata(tags.as_ref()),
                gps: MetadataDecoder::decode_gps(tags.as_ref()),
            },
            Err(details) => InspectionReport {
                metadata: MetadataOutcome::ReadError(details.clone()),
                gps: GpsReport {
                    tags: Vec::new(),
                    outcome: GpsOutcome::ReadError(details),
                },
            },
        }
    }

    /// Decode the image and downscale it to the configured bounding square.
    /// Independent of metadata decoding; a corrupt EXIF block does not
    /// prevent a thumbnail and vice versa.
    pub fn thumbnail(&self) -> Result<DynamicImage> {
        ThumbnailRenderer::new(self.config.thumbnail_size).render(&self.bytes)
    }

    // A missing EXIF block is Ok(None); anything else the codec refuses is
    // a decode failure carried as a display string.
    fn read_tags(&self) -> std::result::Result<Option<ExifTagSet>, String> {
        let mut cursor = Cursor::new(self.bytes.as_slice());
        match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(data) => {
                let tags = ExifTagSet::from_exif(&data);
                debug!("extracted {} EXIF tags", tags.len());
                Ok(if tags.is_empty() { None } else { Some(tags) })
            }
            Err(exif::Error::NotFound(_)) => Ok(None),
            Err(e) => {
                warn!("EXIF extraction failed: {}", e);
                Err(e.to_string())
            }
        }
    }
}

/// Everything decoded from one image, carried as an explicit value so
/// follow-up actions (open URL, copy URL, save) need no shared state.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionReport {
    pub metadata: MetadataOutcome,
    pub gps: GpsReport,
}

impl InspectionReport {
    pub fn metadata_text(&self) -> String {
        self.metadata.render()
    }

    pub fn location_text(&self) -> String {
        self.gps.render()
    }

    pub fn fix(&self) -> Option<&GeoFix> {
        self.gps.fix()
    }

    pub fn map_url(&self) -> Option<&str> {
        self.gps.map_url()
    }

    /// Persist the report as the two-section text layout.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        report::save_report(path, &self.metadata_text(), &self.location_text())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(report::JsonReport::from(self).to_json()?)
    }
}
