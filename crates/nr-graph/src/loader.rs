//! CSV road loader.
//!
//! # CSV format
//!
//! One row per road segment:
//!
//! ```csv
//! city_a,city_b,length,year
//! Warszawa,Radom,100,1990
//! Radom,Kielce,80,2005
//! ```
//!
//! Each row goes through [`RoadGraph::add_road`], so the usual rules apply
//! (valid distinct names, positive length, non-zero year, no duplicates).
//! Loading stops at the first rejected row; rows before it stay applied.

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::{LoadError, LoadResult, RoadGraph};

#[derive(Deserialize)]
struct RoadRecord {
    city_a: String,
    city_b: String,
    length: u32,
    year:   i32,
}

/// Load roads from a CSV file into `graph`.  Returns the number of roads
/// added.
pub fn load_roads_csv(path: &Path, graph: &mut RoadGraph) -> LoadResult<usize> {
    let file = std::fs::File::open(path)?;
    load_roads_reader(file, graph)
}

/// Like [`load_roads_csv`] but accepts any `Read` source.
pub fn load_roads_reader<R: Read>(reader: R, graph: &mut RoadGraph) -> LoadResult<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut added = 0;

    for (i, result) in csv_reader.deserialize::<RoadRecord>().enumerate() {
        let row = result?;
        graph
            .add_road(&row.city_a, &row.city_b, row.length, row.year)
            .map_err(|source| LoadError::Road { record: i + 1, source })?;
        added += 1;
    }

    debug!("loaded {added} roads from CSV");
    Ok(added)
}
