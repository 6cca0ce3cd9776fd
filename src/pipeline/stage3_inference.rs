use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::model::{self, Model, ReplayModel};
use crate::pipeline::Stage;

pub struct Stage3Inference {
    model: Option<Box<dyn Model>>,
}

impl Stage3Inference {
    /// Replays recorded outputs from `ctx.predictions_path`.
    pub fn new() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: Box<dyn Model>) -> Self {
        Self { model: Some(model) }
    }
}

impl Stage for Stage3Inference {
    fn name(&self) -> &'static str {
        "stage3_inference"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let tensor = ctx.tensor.as_ref().context("recording tensor missing")?;

        let outputs = match &self.model {
            Some(m) => model::run_inference(m.as_ref(), tensor)?,
            None => {
                let path = ctx
                    .predictions_path
                    .as_ref()
                    .context("no model configured and no --predictions file given")?;
                let replay = ReplayModel::from_json_file(path)?;
                model::run_inference(&replay, tensor)?
            }
        };

        info!(outputs = outputs.len(), "inference_done");
        ctx.raw_outputs = outputs;
        Ok(())
    }
}
