//! Columnar accumulation of parsed track points
//!
//! Points are collected one column per field, matching the tabular shape
//! they are written in. Materializing the dataset checks that every column
//! has the same length before zipping them back into rows.

use chrono::NaiveDateTime;

use crate::error::{Result, TrackError};
use crate::models::{ParsedDataset, TrackPoint};

#[derive(Debug, Default)]
pub struct TrackColumns {
    storm_ids: Vec<u32>,
    grid_i: Vec<i32>,
    grid_j: Vec<i32>,
    valid_times: Vec<NaiveDateTime>,
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
    pressures: Vec<f64>,
    wind_speeds: Vec<f64>,
    origin_times: Vec<NaiveDateTime>,
    lead_times: Vec<i64>,
}

impl TrackColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every field of one point
    pub fn push(&mut self, point: TrackPoint) {
        self.storm_ids.push(point.storm_id);
        self.grid_i.push(point.grid_i);
        self.grid_j.push(point.grid_j);
        self.valid_times.push(point.valid_time);
        self.longitudes.push(point.longitude);
        self.latitudes.push(point.latitude);
        self.pressures.push(point.central_pressure);
        self.wind_speeds.push(point.wind_speed);
        self.origin_times.push(point.origin_time);
        self.lead_times.push(point.lead_time_hours);
    }

    /// Length of each column, by field name
    pub fn lengths(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("storm_id", self.storm_ids.len()),
            ("grid_i", self.grid_i.len()),
            ("grid_j", self.grid_j.len()),
            ("valid_time", self.valid_times.len()),
            ("longitude", self.longitudes.len()),
            ("latitude", self.latitudes.len()),
            ("central_pressure", self.pressures.len()),
            ("wind_speed", self.wind_speeds.len()),
            ("origin_time", self.origin_times.len()),
            ("lead_time_hours", self.lead_times.len()),
        ]
    }

    /// Zip the columns into rows, failing if their lengths disagree
    pub fn finish(self) -> Result<ParsedDataset> {
        let lengths = self.lengths();
        let rows = lengths[0].1;
        if lengths.iter().any(|&(_, len)| len != rows) {
            return Err(TrackError::MalformedDataset { lengths });
        }

        let mut storm_ids = self.storm_ids.into_iter();
        let mut grid_i = self.grid_i.into_iter();
        let mut grid_j = self.grid_j.into_iter();
        let mut valid_times = self.valid_times.into_iter();
        let mut longitudes = self.longitudes.into_iter();
        let mut latitudes = self.latitudes.into_iter();
        let mut pressures = self.pressures.into_iter();
        let mut wind_speeds = self.wind_speeds.into_iter();
        let mut origin_times = self.origin_times.into_iter();
        let mut lead_times = self.lead_times.into_iter();

        let points = (0..rows)
            .map_while(|_| {
                Some(TrackPoint {
                    storm_id: storm_ids.next()?,
                    grid_i: grid_i.next()?,
                    grid_j: grid_j.next()?,
                    valid_time: valid_times.next()?,
                    longitude: longitudes.next()?,
                    latitude: latitudes.next()?,
                    central_pressure: pressures.next()?,
                    wind_speed: wind_speeds.next()?,
                    origin_time: origin_times.next()?,
                    lead_time_hours: lead_times.next()?,
                })
            })
            .collect();

        Ok(ParsedDataset::new(points))
    }
}
