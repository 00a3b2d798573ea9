use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, Margin, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipState;

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of the derived chart state, for diagnostics and
/// host-side assertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub kind: ChartKind,
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
    pub point_count: usize,
    pub active_series: Vec<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub min_y: f64,
    pub max_y: f64,
    pub y_domain: (f64, f64),
    pub tick_stride: usize,
    pub tick_indices: Vec<usize>,
    pub tooltip: TooltipState,
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_contract_str(input: &str) -> ChartResult<Self> {
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
