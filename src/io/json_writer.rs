use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::decode::PredictionSet;
use crate::heads::{AF_IN_READ_HEAD, AGE_HEAD, SEX_HEAD};
use crate::schema::v1::{
    AfClassification, Ecg2AfV1, HeadPrediction, Interpretation, Predictions, SexPrediction,
    SurvivalCurve,
};

pub fn build_report(ctx: &Ctx) -> Result<Ecg2AfV1> {
    let predictions = ctx.predictions.as_ref().context("predictions missing")?;

    let survival_curve = predictions.survival_curve.as_ref().map(|c| SurvivalCurve {
        head: c.head.clone(),
        days: c.days.clone(),
        values: c.values.clone(),
        af_risk: c.risk,
    });

    let heads = predictions
        .heads
        .iter()
        .map(|h| HeadPrediction {
            name: h.name.clone(),
            kind: h.kind.to_string(),
            values: h.values.clone(),
        })
        .collect();

    Ok(Ecg2AfV1 {
        tool: "ecg2af".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        input_meta: ctx.report.input_meta.clone(),
        predictions: Predictions {
            af_risk: predictions.af_risk(),
            survival_curve,
            heads,
        },
        interpretation: interpret(predictions),
        warnings: ctx.warnings.clone(),
    })
}

/// Maps the known heads onto named fields. Heads with an unexpected width
/// are left out rather than guessed at.
pub fn interpret(predictions: &PredictionSet) -> Interpretation {
    let sex = predictions
        .head(SEX_HEAD)
        .and_then(pair)
        .map(|(male, female)| SexPrediction { male, female });
    let age_normalized = predictions
        .head(AGE_HEAD)
        .and_then(|v| if v.len() == 1 { Some(v[0]) } else { None });
    let af_in_read = predictions
        .head(AF_IN_READ_HEAD)
        .and_then(pair)
        .map(|(no_af, af_present)| AfClassification { no_af, af_present });

    Interpretation {
        sex,
        age_normalized,
        af_in_read,
    }
}

fn pair(values: &[f32]) -> Option<(f32, f32)> {
    match values {
        [a, b] => Some((*a, *b)),
        _ => None,
    }
}

pub fn write_json(path: &Path, report: &Ecg2AfV1) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
