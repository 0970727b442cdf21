//! Post-parse transforms applied before writing.
//!
//! Longitude normalization and the coordinate range filter follow the ERA5
//! conversion; the wind-speed categories follow the Saffir-Simpson bins used
//! for the track maps.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::constants::saffir_simpson::*;
use crate::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::models::ParsedDataset;

/// Map degrees east in (180, 360] onto (-180, 0]. 180 itself stays 180.
pub fn normalize_longitude(longitude: f64) -> f64 {
    if longitude > MAX_LONGITUDE {
        longitude - 360.0
    } else {
        longitude
    }
}

/// Whether a position lies on the globe. NaN coordinates do not.
pub fn is_within_bounds(longitude: f64, latitude: f64) -> bool {
    (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
        && (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude)
}

/// Saffir-Simpson category of a wind speed in m/s
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StormCategory {
    TropicalDepression,
    TropicalStorm,
    Category1,
    Category2,
    Category3,
    Category4,
    Category5,
}

impl StormCategory {
    /// Right-inclusive binning; `None` for NaN
    pub fn from_wind_speed(wind_speed: f64) -> Option<Self> {
        if wind_speed.is_nan() {
            return None;
        }

        let category = if wind_speed <= TROPICAL_DEPRESSION_MAX {
            StormCategory::TropicalDepression
        } else if wind_speed <= TROPICAL_STORM_MAX {
            StormCategory::TropicalStorm
        } else if wind_speed <= CATEGORY_1_MAX {
            StormCategory::Category1
        } else if wind_speed <= CATEGORY_2_MAX {
            StormCategory::Category2
        } else if wind_speed <= CATEGORY_3_MAX {
            StormCategory::Category3
        } else if wind_speed <= CATEGORY_4_MAX {
            StormCategory::Category4
        } else {
            StormCategory::Category5
        };

        Some(category)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StormCategory::TropicalDepression => "TD",
            StormCategory::TropicalStorm => "TS",
            StormCategory::Category1 => "Category 1",
            StormCategory::Category2 => "Category 2",
            StormCategory::Category3 => "Category 3",
            StormCategory::Category4 => "Category 4",
            StormCategory::Category5 => "Category 5",
        }
    }
}

impl fmt::Display for StormCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which coordinate clean-ups to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateCleaning {
    pub normalize_longitude: bool,
    pub drop_out_of_range: bool,
}

impl CoordinateCleaning {
    pub fn is_noop(&self) -> bool {
        !self.normalize_longitude && !self.drop_out_of_range
    }

    /// Apply the clean-ups, keeping row order
    pub fn apply(&self, dataset: ParsedDataset) -> ParsedDataset {
        if self.is_noop() {
            return dataset;
        }

        let before = dataset.len();
        let points: Vec<_> = dataset
            .into_points()
            .into_iter()
            .map(|mut point| {
                if self.normalize_longitude {
                    point.longitude = normalize_longitude(point.longitude);
                }
                point
            })
            .filter(|point| {
                !self.drop_out_of_range || is_within_bounds(point.longitude, point.latitude)
            })
            .collect();

        if points.len() < before {
            debug!(
                "Dropped {} out-of-range points of {}",
                before - points.len(),
                before
            );
        }

        ParsedDataset::new(points)
    }
}
