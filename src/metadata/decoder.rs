use log::debug;
use serde::Serialize;

use crate::geo::{DmsCoordinate, GeoFix};
use crate::metadata::tags::{
    GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF, TAG_GPS_INFO, exif_tag_name,
    gps_tag_name,
};
use crate::metadata::tagset::{ExifTagSet, TagValue};

/// A tag id resolved to its display name, paired with the rendered value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedTag {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataOutcome {
    Tags(Vec<NamedTag>),
    Empty,
    ReadError(String),
}

impl MetadataOutcome {
    pub fn tags(&self) -> &[NamedTag] {
        match self {
            MetadataOutcome::Tags(tags) => tags,
            _ => &[],
        }
    }

    pub fn render(&self) -> String {
        match self {
            MetadataOutcome::Tags(tags) => {
                let mut text = String::from("Image Metadata:\n");
                for tag in tags {
                    text.push_str(&format!("{}: {}\n", tag.name, tag.value));
                }
                text
            }
            MetadataOutcome::Empty => "No metadata found in the image.".to_string(),
            MetadataOutcome::ReadError(details) => {
                format!("Error reading metadata: {}", details)
            }
        }
    }
}

/// Outcome of the GPS decode. "No block at all", "block present but
/// unusable" and "codec failure" are distinct informational states, not
/// errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsOutcome {
    Fix(GeoFix),
    NoData,
    Incomplete,
    ReadError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpsReport {
    /// Resolved GPS sub-tags, in source order; empty unless the GPS
    /// sub-directory was found.
    pub tags: Vec<NamedTag>,
    pub outcome: GpsOutcome,
}

impl GpsReport {
    fn without_tags(outcome: GpsOutcome) -> Self {
        Self {
            tags: Vec::new(),
            outcome,
        }
    }

    pub fn fix(&self) -> Option<&GeoFix> {
        match &self.outcome {
            GpsOutcome::Fix(fix) => Some(fix),
            _ => None,
        }
    }

    pub fn map_url(&self) -> Option<&str> {
        self.fix().map(|fix| fix.map_url.as_str())
    }

    pub fn render(&self) -> String {
        match &self.outcome {
            GpsOutcome::NoData => "\nNo GPS data found in the image.".to_string(),
            GpsOutcome::ReadError(details) => {
                format!("Error reading EXIF data: {}", details)
            }
            GpsOutcome::Incomplete => {
                let mut text = self.render_tag_block();
                text.push_str("\nIncomplete GPS data found in the image.");
                text
            }
            GpsOutcome::Fix(fix) => {
                let mut text = self.render_tag_block();
                text.push_str(&format!(
                    "\nImage Location (GPS):\nLatitude: {}, Longitude: {}",
                    fix.latitude, fix.longitude
                ));
                text.push_str(&format!("\n\nGoogle Maps URL: {}", fix.map_url));
                text
            }
        }
    }

    fn render_tag_block(&self) -> String {
        let mut text = String::from("\nGPS Info:\n");
        for tag in &self.tags {
            text.push_str(&format!("{}: {}\n", tag.name, tag.value));
        }
        text
    }
}

/// Pure transformation from a decoded tag set to display-ready metadata and
/// an optional GPS fix. Carries no state; safe to call from anywhere.
pub struct MetadataDecoder;

impl MetadataDecoder {
    /// Resolve every tag in the set to a (name, value) pair, preserving the
    /// source order. Values pass through exactly as decoded by the codec.
    pub fn decode_metadata(tags: Option<&ExifTagSet>) -> MetadataOutcome {
        match tags {
            Some(set) if !set.is_empty() => {
                let named = set
                    .iter()
                    .map(|(id, value)| NamedTag {
                        name: exif_tag_name(*id),
                        value: value.to_string(),
                    })
                    .collect::<Vec<_>>();
                debug!("resolved {} metadata tags", named.len());
                MetadataOutcome::Tags(named)
            }
            _ => MetadataOutcome::Empty,
        }
    }

    /// Locate the GPS sub-directory and decode a location fix from it.
    ///
    /// The fix requires all four of latitude, latitude ref, longitude and
    /// longitude ref; a partially populated directory still gets its tags
    /// reported but yields no fix.
    pub fn decode_gps(tags: Option<&ExifTagSet>) -> GpsReport {
        let Some(set) = tags else {
            return GpsReport::without_tags(GpsOutcome::NoData);
        };
        let Some(TagValue::Directory(gps)) = set.get(TAG_GPS_INFO) else {
            return GpsReport::without_tags(GpsOutcome::NoData);
        };
        if gps.is_empty() {
            return GpsReport::without_tags(GpsOutcome::NoData);
        }

        let named = gps
            .iter()
            .map(|(id, value)| NamedTag {
                name: gps_tag_name(*id),
                value: value.to_string(),
            })
            .collect::<Vec<_>>();

        let lat = Self::dms_components(gps, GPS_LATITUDE);
        let lat_ref = Self::reference(gps, GPS_LATITUDE_REF);
        let lon = Self::dms_components(gps, GPS_LONGITUDE);
        let lon_ref = Self::reference(gps, GPS_LONGITUDE_REF);

        let outcome = match (lat, lat_ref, lon, lon_ref) {
            (Some(lat), Some(lat_ref), Some(lon), Some(lon_ref)) => {
                let lat = DmsCoordinate::new(lat.0, lat.1, lat.2, lat_ref);
                let lon = DmsCoordinate::new(lon.0, lon.1, lon.2, lon_ref);
                GpsOutcome::Fix(GeoFix::from_dms(lat, lon))
            }
            _ => GpsOutcome::Incomplete,
        };

        GpsReport {
            tags: named,
            outcome,
        }
    }

    // DMS values are nominally three rationals, but cameras in the wild also
    // write plain integers or floats; components outside [0, 60) pass
    // through unvalidated.
    fn dms_components(gps: &ExifTagSet, id: u16) -> Option<(f64, f64, f64)> {
        match gps.get(id)? {
            TagValue::Rational(r) if r.len() >= 3 => Some((
                f64::from(r[0].0) / f64::from(r[0].1),
                f64::from(r[1].0) / f64::from(r[1].1),
                f64::from(r[2].0) / f64::from(r[2].1),
            )),
            TagValue::Float(v) if v.len() >= 3 => Some((v[0], v[1], v[2])),
            TagValue::UInt(v) if v.len() >= 3 => {
                Some((f64::from(v[0]), f64::from(v[1]), f64::from(v[2])))
            }
            _ => None,
        }
    }

    fn reference(gps: &ExifTagSet, id: u16) -> Option<char> {
        match gps.get(id)? {
            TagValue::Text(s) => s.trim().chars().next(),
            _ => None,
        }
    }
}
