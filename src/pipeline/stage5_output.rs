use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::{json_writer, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let has_curve = ctx
            .predictions
            .as_ref()
            .is_some_and(|p| p.survival_curve.is_some());
        let write_tsv = ctx.write_tsv && has_curve;
        if ctx.write_tsv && !has_curve {
            warn!(path = %ctx.output.tsv_path.display(), "survival_tsv_skipped");
            ctx.warnings
                .push("no survival curve decoded; survival TSV not written".to_string());
        }

        let report = json_writer::build_report(ctx)?;
        ctx.report = report;

        if ctx.write_json {
            json_writer::write_json(&ctx.output.json_path, &ctx.report)?;
        }
        if write_tsv {
            tsv_writer::write_tsv(&ctx.output.tsv_path, ctx)?;
        }

        info!("stage5_output_ready");
        Ok(())
    }
}
