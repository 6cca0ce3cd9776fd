use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage0Scaffold;

impl Stage0Scaffold {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage0Scaffold {
    fn name(&self) -> &'static str {
        "stage0_scaffold"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        fs::create_dir_all(&ctx.output.out_dir)
            .with_context(|| format!("failed to create {}", ctx.output.out_dir.display()))?;

        // Drop outputs left by an earlier run into the same directory.
        let removed = remove_stale(&ctx.output.json_path)? as usize
            + remove_stale(&ctx.output.tsv_path)? as usize;

        info!(
            out_dir = %ctx.output.out_dir.display(),
            json = ctx.write_json,
            tsv = ctx.write_tsv,
            stale_removed = removed,
            "output_dir_ready"
        );
        Ok(())
    }
}

fn remove_stale(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "stale_output_removed");
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("failed to remove {}", path.display())),
    }
}
