//! Shared types used across INUNDEX.
//! Includes the `DepthSample` row, the persisted column names, and the
//! `PixelOffset` convention used when mapping pixels to coordinates.
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const LONGITUDE: &str = "Longitude";
pub const LATITUDE: &str = "Latitude";
pub const DEPTH: &str = "InundationDepth_m";

/// Column order of the persisted table
pub const COLUMNS: [&str; 3] = [LONGITUDE, LATITUDE, DEPTH];

/// One sampled pixel: geographic position plus inundation depth in meters.
///
/// Rows produced by the sampler always carry finite values with a positive depth.
/// Rows loaded from a persisted table may be incomplete; a missing field is held
/// as NaN and written back as an empty field.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthSample {
    #[serde(
        rename = "Longitude",
        serialize_with = "serialize_nullable",
        deserialize_with = "deserialize_nullable"
    )]
    pub longitude: f64,
    #[serde(
        rename = "Latitude",
        serialize_with = "serialize_nullable",
        deserialize_with = "deserialize_nullable"
    )]
    pub latitude: f64,
    #[serde(
        rename = "InundationDepth_m",
        serialize_with = "serialize_nullable",
        deserialize_with = "deserialize_nullable"
    )]
    pub depth: f64,
}

/// Samples drawn from a single raster
pub type SampleSet = Vec<DepthSample>;

impl DepthSample {
    pub fn new(longitude: f64, latitude: f64, depth: f64) -> Self {
        Self {
            longitude,
            latitude,
            depth,
        }
    }

    /// True when no field is missing
    pub fn is_complete(&self) -> bool {
        !(self.longitude.is_nan() || self.latitude.is_nan() || self.depth.is_nan())
    }

    /// Identity used for deduplication. Missing equals missing and `-0.0` equals `0.0`.
    pub fn dedup_key(&self) -> [u64; 3] {
        [
            canonical_bits(self.longitude),
            canonical_bits(self.latitude),
            canonical_bits(self.depth),
        ]
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn serialize_nullable<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_nan() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_f64(*value)
    }
}

fn deserialize_nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Where inside a pixel the geographic coordinate is taken
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PixelOffset {
    #[default]
    Center,
    UpperLeft,
}

impl PixelOffset {
    /// Fraction of a pixel added to row and column indices
    pub fn fraction(self) -> f64 {
        match self {
            PixelOffset::Center => 0.5,
            PixelOffset::UpperLeft => 0.0,
        }
    }
}

impl std::fmt::Display for PixelOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelOffset::Center => write!(f, "center"),
            PixelOffset::UpperLeft => write!(f, "upper-left"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_key_treats_signed_zero_and_missing_as_equal() {
        let a = DepthSample::new(0.0, f64::NAN, 1.5);
        let b = DepthSample::new(-0.0, f64::NAN, 1.5);
        assert_eq!(a.dedup_key(), b.dedup_key());
        assert_ne!(a.dedup_key(), DepthSample::new(0.0, 0.0, 1.5).dedup_key());
    }

    #[test]
    fn incomplete_rows_are_detected() {
        assert!(DepthSample::new(1.0, 2.0, 0.3).is_complete());
        assert!(!DepthSample::new(1.0, f64::NAN, 0.3).is_complete());
    }

    #[test]
    fn offset_fractions() {
        assert_eq!(PixelOffset::Center.fraction(), 0.5);
        assert_eq!(PixelOffset::UpperLeft.fraction(), 0.0);
        assert_eq!(PixelOffset::default(), PixelOffset::Center);
    }
}
