//! Dashboard read models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::de_number;

/// `GET /dashboard/counts`: category name → number of records
pub type CategoryCounts = BTreeMap<String, u64>;

/// One bar of the machine-hours chart (`GET /dashboard/horas-operacoes`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationHours {
    #[serde(default)]
    pub operacao: String,
    #[serde(default, deserialize_with = "de_number")]
    pub total_horas: f64,
}

impl OperationHours {
    /// Bar length in percent of the largest entry, 0 when all are zero
    pub fn share_of(&self, max: f64) -> f64 {
        if max <= 0.0 {
            0.0
        } else {
            (self.total_horas / max * 100.0).clamp(0.0, 100.0)
        }
    }

    pub fn max_hours(rows: &[OperationHours]) -> f64 {
        rows.iter().map(|r| r.total_horas).fold(0.0, f64::max)
    }
}

/// Month query value (`"01"`..`"12"`) for the hours endpoint
pub fn month_param(month: u32) -> String {
    format!("{:02}", month.clamp(1, 12))
}
