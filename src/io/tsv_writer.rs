use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::Ctx;

pub fn write_tsv(path: &Path, ctx: &Ctx) -> Result<()> {
    let predictions = ctx.predictions.as_ref().context("predictions missing")?;
    let curve = predictions
        .survival_curve
        .as_ref()
        .context("no survival curve to write")?;
    if curve.days.len() != curve.values.len() {
        bail!(
            "survival curve length mismatch: {} days != {} values",
            curve.days.len(),
            curve.values.len()
        );
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "day\tsurvival")?;
    for (day, value) in curve.days.iter().zip(&curve.values) {
        writeln!(w, "{}\t{:.6}", day, value)?;
    }
    w.flush()?;
    Ok(())
}
