use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::hd5;
use crate::pipeline::Stage;
use crate::signal::{self, RecordingSource, RecordingTensor};

pub struct Stage2Extract {
    source: Option<Box<dyn RecordingSource>>,
}

impl Stage2Extract {
    /// Reads the recording from `ctx.input` as HDF5.
    pub fn new() -> Self {
        Self { source: None }
    }

    pub fn with_source(source: Box<dyn RecordingSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    fn extract(&self, ctx: &Ctx) -> Result<RecordingTensor> {
        match &self.source {
            Some(source) => signal::extract(source.as_ref(), &ctx.layout)
                .context("failed to extract leads from recording source"),
            None => hd5::extract_file(&ctx.input, &ctx.layout),
        }
    }
}

impl Stage for Stage2Extract {
    fn name(&self) -> &'static str {
        "stage2_extract"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let tensor = self.extract(ctx)?;
        info!(
            samples = tensor.samples(),
            leads = tensor.leads(),
            raw_mean = tensor.raw_mean,
            raw_std = tensor.raw_std,
            "recording_extracted"
        );

        if tensor.raw_std < signal::NORM_EPSILON {
            ctx.warnings.push(format!(
                "recording has near-zero variance (std={:e}); normalized tensor is flat",
                tensor.raw_std
            ));
        }

        let meta = &mut ctx.report.input_meta;
        meta.samples = Some(tensor.samples() as u64);
        meta.leads = Some(tensor.leads() as u64);
        meta.lead_order = lead_order(&ctx.layout);
        meta.normalization.mean = Some(tensor.raw_mean);
        meta.normalization.std = Some(tensor.raw_std);

        ctx.tensor = Some(tensor);
        Ok(())
    }
}

fn lead_order(layout: &signal::LeadLayout) -> Vec<String> {
    let mut slots: Vec<_> = layout.leads.iter().collect();
    slots.sort_by_key(|s| s.column);
    slots.into_iter().map(|s| s.name.clone()).collect()
}
