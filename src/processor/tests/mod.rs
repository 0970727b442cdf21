//! Integration tests for the processor module
//!
//! Tests the complete conversion pipeline on temporary track directories.


use std::fs;
use std::path::{Path, PathBuf};

/// ERA5-style output with one block east of 180 and one with a polar latitude
pub const ERA5_TRACKS: &str = "start 3 2022 8 27 18
\t1120\t380\t300.250000\t14.750000\t1.003200e+05\t18.500000\t0.000000e+00\t2022\t8\t27\t18
\t1118\t381\t299.750000\t15.000000\t1.001500e+05\t21.000000\t0.000000e+00\t2022\t8\t28\t0
\t1116\t383\t299.250000\t15.500000\t9.985000e+04\t24.250000\t0.000000e+00\t2022\t8\t28\t6
start 2 2022 9 1 0
\t500\t10\t125.000000\t91.000000\t1.000000e+05\t12.000000\t0.000000e+00\t2022\t9\t1\t0
\t501\t11\t125.500000\t20.000000\t1.000000e+05\t12.000000\t0.000000e+00\t2022\t9\t1\t6
";

/// Write a track file into `dir`
pub fn write_track_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Data rows of a CSV output, header excluded
pub fn csv_rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}
