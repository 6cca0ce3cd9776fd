pub mod survival;

use std::collections::HashSet;

use ndarray::Array2;
use serde::Serialize;

use crate::error::EcgError;
use crate::heads::{HeadKind, HeadRegistry};
pub use survival::{SurvivalCurve, days_per_bin, survival_from_row};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadOutput {
    pub name: String,
    pub kind: &'static str,
    pub values: Vec<f32>,
}

/// Decoded outputs of one inference call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionSet {
    pub heads: Vec<HeadOutput>,
    pub survival_curve: Option<SurvivalCurve>,
}

impl PredictionSet {
    pub fn head(&self, name: &str) -> Option<&[f32]> {
        self.heads
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.values.as_slice())
    }

    pub fn af_risk(&self) -> Option<f32> {
        self.survival_curve.as_ref().map(|c| c.risk)
    }
}

/// Decodes `(reported name, batch)` pairs against the registry. Only the
/// first row of each batch is used. Any error aborts the whole call.
pub fn decode(
    raw_outputs: &[(String, Array2<f32>)],
    registry: &HeadRegistry,
) -> Result<PredictionSet, EcgError> {
    let mut out = PredictionSet::default();
    let mut seen = HashSet::new();

    for (reported, batch) in raw_outputs {
        let spec = registry
            .get(reported)
            .ok_or_else(|| EcgError::UnknownOutputHead(reported.clone()))?;
        if !seen.insert(spec.name.as_str()) {
            return Err(EcgError::DuplicateOutput(spec.name.clone()));
        }
        if batch.nrows() == 0 {
            return Err(EcgError::shape(
                format!("output {}", reported),
                "at least one row",
                "0 rows",
            ));
        }
        if batch.ncols() != spec.width {
            return Err(EcgError::shape(
                format!("output {}", reported),
                spec.width,
                batch.ncols(),
            ));
        }
        let row = batch.row(0).to_vec();

        match spec.kind {
            HeadKind::SurvivalCurve { days_window } => {
                let curve = survival_from_row(&spec.name, &row, spec.width, days_window)?;
                out.survival_curve = Some(curve);
            }
            HeadKind::Categorical | HeadKind::Continuous => {
                out.heads.push(HeadOutput {
                    name: spec.name.clone(),
                    kind: spec.kind.tag(),
                    values: row,
                });
            }
        }
    }

    Ok(out)
}
