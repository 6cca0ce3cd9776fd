use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::decode;
use crate::pipeline::Stage;

pub struct Stage4Decode;

impl Stage4Decode {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Decode {
    fn name(&self) -> &'static str {
        "stage4_decode"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let registry = ctx.registry.as_ref().context("head registry missing")?;
        let predictions = decode::decode(&ctx.raw_outputs, registry)?;

        for spec in registry.iter() {
            let present = if spec.is_survival_curve() {
                predictions.survival_curve.is_some()
            } else {
                predictions.head(&spec.name).is_some()
            };
            if !present {
                ctx.warnings
                    .push(format!("model produced no output for head '{}'", spec.name));
            }
        }

        info!(
            heads = predictions.heads.len(),
            af_risk = predictions.af_risk().unwrap_or(f32::NAN),
            "predictions_decoded"
        );
        ctx.predictions = Some(predictions);
        Ok(())
    }
}
