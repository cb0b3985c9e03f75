use std::fmt;

use crate::metadata::tags::TAG_GPS_INFO;

/// A tag value as decoded by the EXIF codec, passed through untransformed.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    UInt(Vec<u32>),
    Int(Vec<i32>),
    Rational(Vec<(u32, u32)>),
    SRational(Vec<(i32, i32)>),
    Float(Vec<f64>),
    Bytes(Vec<u8>),
    Directory(ExifTagSet),
}

impl TagValue {
    fn from_exif_value(value: &exif::Value) -> Self {
        match value {
            exif::Value::Ascii(strings) => TagValue::Text(
                strings
                    .iter()
                    .map(|s| String::from_utf8_lossy(s).into_owned())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            exif::Value::Byte(bytes) => TagValue::Bytes(bytes.clone()),
            exif::Value::Short(values) => {
                TagValue::UInt(values.iter().map(|&v| u32::from(v)).collect())
            }
            exif::Value::Long(values) => TagValue::UInt(values.clone()),
            exif::Value::Rational(rationals) => {
                TagValue::Rational(rationals.iter().map(|r| (r.num, r.denom)).collect())
            }
            exif::Value::SByte(values) => {
                TagValue::Int(values.iter().map(|&v| i32::from(v)).collect())
            }
            exif::Value::SShort(values) => {
                TagValue::Int(values.iter().map(|&v| i32::from(v)).collect())
            }
            exif::Value::SLong(values) => TagValue::Int(values.clone()),
            exif::Value::SRational(rationals) => {
                TagValue::SRational(rationals.iter().map(|r| (r.num, r.denom)).collect())
            }
            exif::Value::Float(values) => {
                TagValue::Float(values.iter().map(|&v| f64::from(v)).collect())
            }
            exif::Value::Double(values) => TagValue::Float(values.clone()),
            exif::Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
            _ => TagValue::Bytes(Vec::new()),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(s) => f.write_str(s),
            TagValue::UInt(v) => write_sequence(f, v, |f, n| write!(f, "{}", n)),
            TagValue::Int(v) => write_sequence(f, v, |f, n| write!(f, "{}", n)),
            TagValue::Float(v) => write_sequence(f, v, |f, n| write!(f, "{}", n)),
            TagValue::Rational(v) => write_sequence(f, v, |f, &(num, denom)| {
                write_rational(f, i64::from(num), i64::from(denom))
            }),
            TagValue::SRational(v) => write_sequence(f, v, |f, &(num, denom)| {
                write_rational(f, i64::from(num), i64::from(denom))
            }),
            TagValue::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            TagValue::Directory(dir) => {
                write!(f, "{{")?;
                for (i, (id, value)) in dir.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", id, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_sequence<T>(
    f: &mut fmt::Formatter<'_>,
    values: &[T],
    write_one: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    if values.len() == 1 {
        return write_one(f, &values[0]);
    }
    write!(f, "(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_one(f, value)?;
    }
    write!(f, ")")
}

fn write_rational(f: &mut fmt::Formatter<'_>, num: i64, denom: i64) -> fmt::Result {
    if denom == 1 {
        write!(f, "{}", num)
    } else {
        write!(f, "{}/{}", num, denom)
    }
}

/// Order-preserving mapping from numeric tag ids to values, built once per
/// loaded image. The GPS sub-directory nests under tag id 34853.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifTagSet {
    entries: Vec<(u16, TagValue)>,
}

impl ExifTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, replacing any existing entry with the same id in place.
    pub fn insert(&mut self, id: u16, value: TagValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(tag, _)| *tag == id) {
            entry.1 = value;
        } else {
            self.entries.push((id, value));
        }
    }

    pub fn get(&self, id: u16) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(tag, _)| *tag == id)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u16, TagValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a tag set from the codec's field list. PRIMARY-IFD fields keep
    /// their decode order; GPS-context fields gather into the nested
    /// directory under the reserved GPSInfo id.
    pub fn from_exif(exif: &exif::Exif) -> Self {
        let mut primary = ExifTagSet::new();
        let mut gps = ExifTagSet::new();

        for field in exif.fields() {
            if field.ifd_num != exif::In::PRIMARY {
                continue;
            }
            let value = TagValue::from_exif_value(&field.value);
            if field.tag.context() == exif::Context::Gps {
                gps.insert(field.tag.number(), value);
            } else {
                primary.insert(field.tag.number(), value);
            }
        }

        if !gps.is_empty() {
            primary.insert(TAG_GPS_INFO, TagValue::Directory(gps));
        }

        primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut set = ExifTagSet::new();
        set.insert(272, TagValue::Text("EOS".into()));
        set.insert(271, TagValue::Text("Canon".into()));

        let ids = set.iter().map(|(id, _)| *id).collect::<Vec<_>>();
        assert_eq!(ids, vec![272, 271]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut set = ExifTagSet::new();
        set.insert(271, TagValue::Text("Canon".into()));
        set.insert(272, TagValue::Text("EOS".into()));
        set.insert(271, TagValue::Text("Nikon".into()));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(271), Some(&TagValue::Text("Nikon".into())));
        assert_eq!(set.iter().next().map(|(id, _)| *id), Some(271));
    }

    #[test]
    fn test_display_scalar_and_tuple() {
        assert_eq!(TagValue::UInt(vec![6]).to_string(), "6");
        assert_eq!(TagValue::UInt(vec![40, 26, 46]).to_string(), "(40, 26, 46)");
        assert_eq!(TagValue::Rational(vec![(72, 1)]).to_string(), "72");
        assert_eq!(
            TagValue::Rational(vec![(40, 1), (26, 1), (4611, 100)]).to_string(),
            "(40, 26, 4611/100)"
        );
        assert_eq!(TagValue::Bytes(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }

    #[test]
    fn test_from_exif_routes_gps_into_directory() {
        use exif::experimental::Writer;

        fn rationals(values: [u32; 3]) -> exif::Value {
            exif::Value::Rational(
                values
                    .iter()
                    .map(|&num| exif::Rational { num, denom: 1 })
                    .collect(),
            )
        }
        fn field(tag: exif::Tag, value: exif::Value) -> exif::Field {
            exif::Field {
                tag,
                ifd_num: exif::In::PRIMARY,
                value,
            }
        }

        let make = field(exif::Tag::Make, exif::Value::Ascii(vec![b"Canon".to_vec()]));
        let model = field(exif::Tag::Model, exif::Value::Ascii(vec![b"EOS".to_vec()]));
        let lat_ref = field(
            exif::Tag::GPSLatitudeRef,
            exif::Value::Ascii(vec![b"N".to_vec()]),
        );
        let lat = field(exif::Tag::GPSLatitude, rationals([40, 26, 46]));
        let lon_ref = field(
            exif::Tag::GPSLongitudeRef,
            exif::Value::Ascii(vec![b"W".to_vec()]),
        );
        let lon = field(exif::Tag::GPSLongitude, rationals([73, 59, 11]));

        let mut writer = Writer::new();
        for f in [&make, &model, &lat_ref, &lat, &lon_ref, &lon] {
            writer.push_field(f);
        }
        let mut buffer = std::io::Cursor::new(Vec::new());
        writer.write(&mut buffer, false).unwrap();

        let exif_data = exif::Reader::new().read_raw(buffer.into_inner()).unwrap();
        let set = ExifTagSet::from_exif(&exif_data);

        // GPS-context fields land in the nested directory, not the primary set
        let ids = set.iter().map(|(id, _)| *id).collect::<Vec<_>>();
        assert_eq!(ids, vec![271, 272, TAG_GPS_INFO]);
        assert_eq!(set.get(271), Some(&TagValue::Text("Canon".into())));
        assert_eq!(set.get(272), Some(&TagValue::Text("EOS".into())));

        let Some(TagValue::Directory(gps)) = set.get(TAG_GPS_INFO) else {
            panic!("GPS fields should nest under the GPSInfo directory");
        };
        assert_eq!(gps.len(), 4);
        assert_eq!(gps.get(1), Some(&TagValue::Text("N".into())));
        assert_eq!(
            gps.get(2),
            Some(&TagValue::Rational(vec![(40, 1), (26, 1), (46, 1)]))
        );
        assert_eq!(gps.get(3), Some(&TagValue::Text("W".into())));
        assert_eq!(
            gps.get(4),
            Some(&TagValue::Rational(vec![(73, 1), (59, 1), (11, 1)]))
        );

        // and the routed directory decodes to a fix end to end
        let report = crate::metadata::decoder::MetadataDecoder::decode_gps(Some(&set));
        let fix = report.fix().expect("complete GPS data should yield a fix");
        assert!((fix.latitude - 40.446111).abs() < 1e-6);
        assert!((fix.longitude + 73.986389).abs() < 1e-6);
    }

    #[test]
    fn test_display_nested_directory() {
        let mut gps = ExifTagSet::new();
        gps.insert(1, TagValue::Text("N".into()));
        gps.insert(2, TagValue::Rational(vec![(40, 1), (26, 1), (46, 1)]));

        let value = TagValue::Directory(gps);
        assert_eq!(value.to_string(), "{1: N, 2: (40, 26, 46)}");
    }
}
