use async_trait::async_trait;
use climate_core::{require_directory, require_file};
use duckdb::{
    arrow::array::{Array, Float64Array, RecordBatch, StringArray},
    Connection,
};
use log::{debug, info};

use super::{parse_observation_date, Dataset, DatasetLoader, Error};
use crate::engine::{Observation, StationId};

pub const MEASUREMENTS_CSV: &str = "hawaii_measurements.csv";
pub const STATIONS_CSV: &str = "hawaii_stations.csv";

/// Reads `hawaii_measurements.csv` (`station,date,prcp,tobs`) and
/// `hawaii_stations.csv` (`station,...`) from a directory through DuckDB.
pub struct CsvLoader {
    data_dir: String,
}

impl CsvLoader {
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates new in-memory connection, nothing is persisted between loads
    pub fn open_connection(&self) -> Result<Connection, duckdb::Error> {
        Connection::open_in_memory()
    }

    fn csv_path(&self, file_name: &str) -> Result<String, Error> {
        let dir =
            require_directory(&self.data_dir).map_err(|e| Error::NotFound(e.to_string()))?;
        let path = require_file(&dir.join(file_name).to_string_lossy())
            .map_err(|e| Error::NotFound(e.to_string()))?;
        Ok(path.to_string_lossy().replace('\'', "''"))
    }

    fn query(&self, sql: &str) -> Result<Vec<RecordBatch>, Error> {
        let conn = self.open_connection()?;
        let mut stmt = conn.prepare(sql)?;
        Ok(stmt.query_arrow([])?.collect())
    }

    fn measurements(&self) -> Result<Vec<Observation>, Error> {
        let query_sql = format!(
            r#"
            SELECT
                CAST(station AS VARCHAR) AS station,
                CAST(date AS VARCHAR) AS date,
                CAST(prcp AS DOUBLE) AS prcp,
                CAST(tobs AS DOUBLE) AS tobs
            FROM read_csv_auto('{}', header = true)
            "#,
            self.csv_path(MEASUREMENTS_CSV)?
        );
        let batches = self.query(&query_sql)?;
        debug!("read {} measurement batches", batches.len());

        let mut observations = Vec::new();
        for batch in &batches {
            observations.extend(batch_to_observations(batch)?);
        }
        Ok(observations)
    }

    fn stations(&self) -> Result<Vec<StationId>, Error> {
        let query_sql = format!(
            "SELECT CAST(station AS VARCHAR) AS station FROM read_csv_auto('{}', header = true)",
            self.csv_path(STATIONS_CSV)?
        );

        let mut stations = Vec::new();
        for batch in &self.query(&query_sql)? {
            let station_arr = column::<StringArray>(batch, 0, "station")?;
            for row_index in 0..batch.num_rows() {
                if station_arr.is_null(row_index) {
                    return Err(Error::Schema(format!("station id missing in row {}", row_index)));
                }
                stations.push(StationId::from(station_arr.value(row_index)));
            }
        }
        Ok(stations)
    }
}

fn column<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    index: usize,
    name: &str,
) -> Result<&'a T, Error> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| {
            Error::Schema(format!(
                "column {} ({}) has type {}",
                index,
                name,
                batch.column(index).data_type()
            ))
        })
}

fn optional_value(arr: &Float64Array, row_index: usize) -> Option<f64> {
    if arr.is_null(row_index) {
        None
    } else {
        Some(arr.value(row_index))
    }
}

fn batch_to_observations(batch: &RecordBatch) -> Result<Vec<Observation>, Error> {
    let station_arr = column::<StringArray>(batch, 0, "station")?;
    let date_arr = column::<StringArray>(batch, 1, "date")?;
    let prcp_arr = column::<Float64Array>(batch, 2, "prcp")?;
    let tobs_arr = column::<Float64Array>(batch, 3, "tobs")?;

    let mut observations = Vec::with_capacity(batch.num_rows());
    for row_index in 0..batch.num_rows() {
        if station_arr.is_null(row_index) || date_arr.is_null(row_index) {
            return Err(Error::Schema(format!(
                "station or date missing in row {}",
                row_index
            )));
        }
        observations.push(Observation {
            station: StationId::from(station_arr.value(row_index)),
            date: parse_observation_date(date_arr.value(row_index))?,
            precipitation: optional_value(prcp_arr, row_index),
            temperature: optional_value(tobs_arr, row_index),
        });
    }
    Ok(observations)
}

#[async_trait]
impl DatasetLoader for CsvLoader {
    async fn load(&self) -> Result<Dataset, Error> {
        let observations = self.measurements()?;
        let stations = self.stations()?;
        let dataset = Dataset::new(observations, stations);
        info!(
            "Loaded {} observations from {}",
            dataset.len(),
            self.data_dir
        );
        Ok(dataset)
    }

    fn source(&self) -> String {
        format!("csv:{}", self.data_dir)
    }
}
