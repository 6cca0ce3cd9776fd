use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::heads::{self, HeadRegistry};
use crate::pipeline::Stage;
use crate::signal;

/// Resolves run configuration: head registry (built-in overlaid with the
/// user TSV) and the lead layout.
pub struct Stage1Heads;

impl Stage1Heads {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Heads {
    fn name(&self) -> &'static str {
        "stage1_heads"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut specs = heads::load_builtin_v1()?;
        if let Some(path) = &ctx.heads_path {
            let user = heads::load_heads_tsv(path)?;
            specs = heads::merge_specs(specs, user);
        }
        let registry = HeadRegistry::build(specs)?;
        info!(
            heads = registry.len(),
            survival = registry.survival_head().map(|h| h.name.as_str()).unwrap_or("none"),
            "head_registry_ready"
        );
        ctx.registry = Some(registry);

        if let Some(path) = &ctx.leads_path {
            ctx.layout = signal::load_layout_tsv(path)?;
            info!(
                leads = ctx.layout.lead_count(),
                samples = ctx.layout.samples,
                "lead_layout_loaded"
            );
        }
        Ok(())
    }
}
