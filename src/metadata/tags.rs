//! Static tag-name lookup tables.
//!
//! Numeric ids follow the EXIF standard; names match the conventional
//! human-readable forms. Unknown ids fall back to their decimal string.

/// Reserved tag id of the nested GPS sub-directory.
pub const TAG_GPS_INFO: u16 = 34853;

/// GPS sub-directory ids used for the location fix.
pub const GPS_LATITUDE_REF: u16 = 1;
pub const GPS_LATITUDE: u16 = 2;
pub const GPS_LONGITUDE_REF: u16 = 3;
pub const GPS_LONGITUDE: u16 = 4;

/// Resolve an EXIF tag id to a display name, falling back to the numeric id.
pub fn exif_tag_name(id: u16) -> String {
    lookup(EXIF_TAG_NAMES, id)
}

/// Resolve a GPS sub-directory tag id to a display name.
pub fn gps_tag_name(id: u16) -> String {
    lookup(GPS_TAG_NAMES, id)
}

fn lookup(table: &[(u16, &str)], id: u16) -> String {
    match table.binary_search_by_key(&id, |&(tag, _)| tag) {
        Ok(idx) => table[idx].1.to_string(),
        Err(_) => id.to_string(),
    }
}

// Sorted by id; lookup relies on the ordering.
static EXIF_TAG_NAMES: &[(u16, &str)] = &[
    (11, "ProcessingSoftware"),
    (254, "NewSubfileType"),
    (255, "SubfileType"),
    (256, "ImageWidth"),
    (257, "ImageLength"),
    (258, "BitsPerSample"),
    (259, "Compression"),
    (262, "PhotometricInterpretation"),
    (266, "FillOrder"),
    (269, "DocumentName"),
    (270, "ImageDescription"),
    (271, "Make"),
    (272, "Model"),
    (273, "StripOffsets"),
    (274, "Orientation"),
    (277, "SamplesPerPixel"),
    (278, "RowsPerStrip"),
    (279, "StripByteCounts"),
    (282, "XResolution"),
    (283, "YResolution"),
    (284, "PlanarConfiguration"),
    (296, "ResolutionUnit"),
    (301, "TransferFunction"),
    (305, "Software"),
    (306, "DateTime"),
    (315, "Artist"),
    (316, "HostComputer"),
    (318, "WhitePoint"),
    (319, "PrimaryChromaticities"),
    (513, "JpegIFOffset"),
    (514, "JpegIFByteCount"),
    (529, "YCbCrCoefficients"),
    (530, "YCbCrSubSampling"),
    (531, "YCbCrPositioning"),
    (532, "ReferenceBlackWhite"),
    (700, "XMLPacket"),
    (33432, "Copyright"),
    (33434, "ExposureTime"),
    (33437, "FNumber"),
    (34665, "ExifOffset"),
    (34675, "InterColorProfile"),
    (34850, "ExposureProgram"),
    (34852, "SpectralSensitivity"),
    (34853, "GPSInfo"),
    (34855, "ISOSpeedRatings"),
    (34856, "OECF"),
    (34864, "SensitivityType"),
    (34866, "RecommendedExposureIndex"),
    (36864, "ExifVersion"),
    (36867, "DateTimeOriginal"),
    (36868, "DateTimeDigitized"),
    (36880, "OffsetTime"),
    (36881, "OffsetTimeOriginal"),
    (36882, "OffsetTimeDigitized"),
    (37121, "ComponentsConfiguration"),
    (37122, "CompressedBitsPerPixel"),
    (37377, "ShutterSpeedValue"),
    (37378, "ApertureValue"),
    (37379, "BrightnessValue"),
    (37380, "ExposureBiasValue"),
    (37381, "MaxApertureValue"),
    (37382, "SubjectDistance"),
    (37383, "MeteringMode"),
    (37384, "LightSource"),
    (37385, "Flash"),
    (37386, "FocalLength"),
    (37396, "SubjectArea"),
    (37500, "MakerNote"),
    (37510, "UserComment"),
    (37520, "SubsecTime"),
    (37521, "SubsecTimeOriginal"),
    (37522, "SubsecTimeDigitized"),
    (40960, "FlashPixVersion"),
    (40961, "ColorSpace"),
    (40962, "ExifImageWidth"),
    (40963, "ExifImageHeight"),
    (40964, "RelatedSoundFile"),
    (40965, "ExifInteroperabilityOffset"),
    (41483, "FlashEnergy"),
    (41484, "SpatialFrequencyResponse"),
    (41486, "FocalPlaneXResolution"),
    (41487, "FocalPlaneYResolution"),
    (41488, "FocalPlaneResolutionUnit"),
    (41492, "SubjectLocation"),
    (41493, "ExposureIndex"),
    (41495, "SensingMethod"),
    (41728, "FileSource"),
    (41729, "SceneType"),
    (41730, "CFAPattern"),
    (41985, "CustomRendered"),
    (41986, "ExposureMode"),
    (41987, "WhiteBalance"),
    (41988, "DigitalZoomRatio"),
    (41989, "FocalLengthIn35mmFilm"),
    (41990, "SceneCaptureType"),
    (41991, "GainControl"),
    (41992, "Contrast"),
    (41993, "Saturation"),
    (41994, "Sharpness"),
    (41995, "DeviceSettingDescription"),
    (41996, "SubjectDistanceRange"),
    (42016, "ImageUniqueID"),
    (42032, "CameraOwnerName"),
    (42033, "BodySerialNumber"),
    (42034, "LensSpecification"),
    (42035, "LensMake"),
    (42036, "LensModel"),
    (42037, "LensSerialNumber"),
];

static GPS_TAG_NAMES: &[(u16, &str)] = &[
    (0, "GPSVersionID"),
    (1, "GPSLatitudeRef"),
    (2, "GPSLatitude"),
    (3, "GPSLongitudeRef"),
    (4, "GPSLongitude"),
    (5, "GPSAltitudeRef"),
    (6, "GPSAltitude"),
    (7, "GPSTimeStamp"),
    (8, "GPSSatellites"),
    (9, "GPSStatus"),
    (10, "GPSMeasureMode"),
    (11, "GPSDOP"),
    (12, "GPSSpeedRef"),
    (13, "GPSSpeed"),
    (14, "GPSTrackRef"),
    (15, "GPSTrack"),
    (16, "GPSImgDirectionRef"),
    (17, "GPSImgDirection"),
    (18, "GPSMapDatum"),
    (19, "GPSDestLatitudeRef"),
    (20, "GPSDestLatitude"),
    (21, "GPSDestLongitudeRef"),
    (22, "GPSDestLongitude"),
    (23, "GPSDestBearingRef"),
    (24, "GPSDestBearing"),
    (25, "GPSDestDistanceRef"),
    (26, "GPSDestDistance"),
    (27, "GPSProcessingMethod"),
    (28, "GPSAreaInformation"),
    (29, "GPSDateStamp"),
    (30, "GPSDifferential"),
    (31, "GPSHPositioningError"),
];
