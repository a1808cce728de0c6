use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::algorithm::{SearchStats, ShortestPathResult};
use crate::Error;

/// Body of `POST /api/dijkstra` and `POST /api/shortest-path`
///
/// The matrix is kept as raw JSON so that non-numeric cells are reported as
/// a malformed matrix rather than a generic body error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPathRequest {
    #[serde(default)]
    pub adjacency_list: Option<serde_json::Value>,
    #[serde(default)]
    pub source: Option<usize>,
    #[serde(default)]
    pub target: Option<usize>,
}

impl ShortestPathRequest {
    /// Decodes the matrix cells, failing on anything that is not a list of
    /// lists of numbers
    pub fn matrix(&self) -> Result<Option<Vec<Vec<f64>>>, Error> {
        let rows = match &self.adjacency_list {
            None | Some(serde_json::Value::Null) => return Ok(None),
            Some(serde_json::Value::Array(rows)) => rows,
            Some(other) => {
                return Err(Error::MalformedMatrix(format!(
                    "expected a list of rows, got {}",
                    json_kind(other)
                )))
            }
        };

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let cells = row.as_array().ok_or_else(|| {
                    Error::MalformedMatrix(format!("row {} is {}, not a list", i, json_kind(row)))
                })?;
                cells
                    .iter()
                    .enumerate()
                    .map(|(j, cell)| {
                        cell.as_f64().ok_or_else(|| {
                            Error::MalformedMatrix(format!(
                                "weight at ({}, {}) is {}, not a number",
                                i,
                                j,
                                json_kind(cell)
                            ))
                        })
                    })
                    .collect::<Result<Vec<f64>, Error>>()
            })
            .collect::<Result<Vec<Vec<f64>>, Error>>()
            .map(Some)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Frontier counters reported with a full result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetrics {
    pub heap_pops: usize,
    pub stale_pops: usize,
    pub relaxations: usize,
    pub reached_vertices: usize,
}

/// Response of `POST /api/shortest-path`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPathResponse {
    pub execution_id: Uuid,
    pub algorithm: String,
    pub source: usize,
    pub target: usize,
    pub distance: f64,
    pub path: Vec<usize>,
    /// `null` for vertices the search never reached
    pub distances: BTreeMap<usize, Option<f64>>,
    pub execution_time_ms: f64,
    pub metrics: SearchMetrics,
}

impl ShortestPathResponse {
    pub fn new(algorithm: &str, result: &ShortestPathResult<f64>, execution_time_ms: f64) -> Self {
        let SearchStats {
            pops,
            stale_pops,
            relaxations,
            ..
        } = result.stats;

        Self {
            execution_id: Uuid::new_v4(),
            algorithm: algorithm.to_string(),
            source: result.source,
            target: result.target,
            distance: result.distance,
            path: result.path.clone(),
            distances: result
                .distances
                .iter()
                .map(|(&id, &d)| (id, d.is_finite().then_some(d)))
                .collect(),
            execution_time_ms,
            metrics: SearchMetrics {
                heap_pops: pops,
                stale_pops,
                relaxations,
                reached_vertices: result.reached_count(),
            },
        }
    }
}

/// Body of `POST /api/map`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMapRequest {
    #[serde(default)]
    pub map_name: Option<String>,
    #[serde(default)]
    pub map: Option<serde_json::Value>,
}

/// A map saved by a client, returned as-is
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMap {
    pub id: u64,
    pub map_name: String,
    pub node_map: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
