use serde::Serialize;

pub const MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// A sexagesimal coordinate as stored in EXIF: degrees, minutes, seconds
/// plus a hemisphere reference ('N', 'S', 'E' or 'W').
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsCoordinate {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub reference: char,
}

impl DmsCoordinate {
    pub fn new(degrees: f64, minutes: f64, seconds: f64, reference: char) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
            reference,
        }
    }
}

/// Convert degrees/minutes/seconds to signed decimal degrees.
///
/// Out-of-range minutes or seconds are accepted as-is; EXIF data in the
/// wild is permissive and clamping here would mask malformed source files.
pub fn dms_to_decimal(dms: DmsCoordinate) -> f64 {
    let decimal = dms.degrees + dms.minutes / 60.0 + dms.seconds / 3600.0;

    match dms.reference {
        'S' | 'W' => -decimal,
        _ => decimal,
    }
}

pub fn build_map_url(lat: f64, lon: f64) -> String {
    format!("{}?q={},{}", MAPS_BASE_URL, lat, lon)
}

/// A decoded GPS position in signed decimal degrees, with the derived
/// map-query URL so callers can act on it without re-parsing report text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub map_url: String,
}

impl GeoFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let map_url = build_map_url(latitude, longitude);
        Self {
            latitude,
            longitude,
            map_url,
        }
    }

    pub fn from_dms(lat: DmsCoordinate, lon: DmsCoordinate) -> Self {
        Self::new(dms_to_decimal(lat), dms_to_decimal(lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dms_north_is_positive() {
        let decimal = dms_to_decimal(DmsCoordinate::new(40.0, 26.0, 46.0, 'N'));
        let expected = 40.0 + 26.0 / 60.0 + 46.0 / 3600.0;
        assert!((decimal - expected).abs() < 1e-12);
        assert!((decimal - 40.446111).abs() < 1e-6);
    }

    #[test]
    fn test_dms_west_is_negative() {
        let decimal = dms_to_decimal(DmsCoordinate::new(73.0, 59.0, 11.0, 'W'));
        assert!((decimal + 73.986389).abs() < 1e-6);
    }

    #[test]
    fn test_sign_follows_reference() {
        for (reference, negative) in [('N', false), ('S', true), ('E', false), ('W', true)] {
            let decimal = dms_to_decimal(DmsCoordinate::new(10.0, 30.0, 0.0, reference));
            assert_eq!(decimal < 0.0, negative, "reference {}", reference);
            assert!((decimal.abs() - 10.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_components_pass_through() {
        // 90 minutes is nonsense per the standard but must not be clamped
        let decimal = dms_to_decimal(DmsCoordinate::new(10.0, 90.0, 0.0, 'N'));
        assert!((decimal - 11.5).abs() < 1e-12);
    }

    #[test]
    fn test_map_url_format() {
        let url = build_map_url(40.446111, -73.986389);
        assert_eq!(url, "https://www.google.com/maps?q=40.446111,-73.986389");
    }

    #[test]
    fn test_geo_fix_embeds_url() {
        let fix = GeoFix::new(48.8584, 2.2945);
        assert_eq!(fix.map_url, "https://www.google.com/maps?q=48.8584,2.2945");
    }
}
