use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;

pub mod stage0_scaffold;
pub mod stage1_heads;
pub mod stage2_extract;
pub mod stage3_inference;
pub mod stage4_decode;
pub mod stage5_output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    pub stage: &'static str,
    pub elapsed_ms: u64,
}

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Runs every stage in order, stopping at the first failure. Each stage
    /// that finishes is appended to `ctx.timings`.
    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let total = Instant::now();
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    error = %err,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis() as u64;
            info!(stage = stage.name(), elapsed_ms, "stage finished");
            ctx.timings.push(StageTiming {
                stage: stage.name(),
                elapsed_ms,
            });
        }
        info!(
            stages = ctx.timings.len(),
            elapsed_ms = total.elapsed().as_millis() as u64,
            warnings = ctx.warnings.len(),
            "pipeline finished"
        );
        Ok(())
    }
}
