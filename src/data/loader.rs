//! CSV loading of observation matrices

use super::observations_from_rows;
use crate::error::{ReconstructionError, Result};
use csv::ReaderBuilder;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// How entities are laid out in a CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Header row names the entities, each record is one sample
    #[default]
    Columns,
    /// No header, each record is `label,v1,v2,...` for one entity
    Rows,
}

/// Labelled observation matrix
#[derive(Debug, Clone)]
pub struct Observations {
    /// Entity names, one per row of `values`
    pub labels: Vec<String>,
    /// N x L values
    pub values: Array2<f64>,
}

impl Observations {
    /// Number of entities
    pub fn num_entities(&self) -> usize {
        self.values.nrows()
    }

    /// Number of samples per entity
    pub fn num_samples(&self) -> usize {
        self.values.ncols()
    }
}

/// Load observations from a CSV file
pub fn load_observations(path: &Path, layout: Layout) -> Result<Observations> {
    let file = File::open(path)?;
    let observations = read_observations(file, layout)?;

    debug!(
        path = %path.display(),
        entities = observations.num_entities(),
        samples = observations.num_samples(),
        "loaded observations"
    );

    Ok(observations)
}

/// Read observations from any CSV source
pub fn read_observations<R: Read>(source: R, layout: Layout) -> Result<Observations> {
    match layout {
        Layout::Columns => read_columns(source),
        Layout::Rows => read_rows(source),
    }
}

fn read_columns<R: Read>(source: R) -> Result<Observations> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);
    let labels: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut series: Vec<Vec<f64>> = vec![Vec::new(); labels.len()];
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        for (col, field) in record.iter().enumerate() {
            // The csv reader already rejects records of unequal length
            series[col].push(parse_value(field, line + 2)?);
        }
    }

    Ok(Observations {
        labels,
        values: observations_from_rows(&series)?,
    })
}

fn read_rows<R: Read>(source: R) -> Result<Observations> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut labels = Vec::new();
    let mut series = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let mut fields = record.iter();
        let Some(label) = fields.next() else {
            continue;
        };

        labels.push(label.trim().to_string());
        series.push(
            fields
                .map(|field| parse_value(field, line + 1))
                .collect::<Result<Vec<f64>>>()?,
        );
    }

    Ok(Observations {
        labels,
        values: observations_from_rows(&series)?,
    })
}

fn parse_value(field: &str, line: usize) -> Result<f64> {
    field.trim().parse::<f64>().map_err(|_| {
        ReconstructionError::Parse(format!("line {}: '{}' is not a number", line, field))
    })
}
