use anyhow::Result;

use crate::ctx::Ctx;
use crate::io::json_writer::interpret;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let predictions = ctx
        .predictions
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("predictions missing"))?;
    let meta = &ctx.report.input_meta;

    let mut out = String::new();
    out.push_str(&format!("ecg2af v{}\n", version));
    out.push_str(&format!(
        "Input: {} samples, {} leads\n",
        meta.samples.unwrap_or(0),
        meta.leads.unwrap_or(0)
    ));

    match predictions.af_risk() {
        Some(risk) => out.push_str(&format!("AF Risk: {:.4}\n", risk)),
        None => out.push_str("AF Risk: n/a\n"),
    }

    let interp = interpret(predictions);
    if let Some(sex) = interp.sex {
        out.push_str("Sex Prediction:\n");
        out.push_str(&format!("- Male: {:.4}\n", sex.male));
        out.push_str(&format!("- Female: {:.4}\n", sex.female));
    }
    if let Some(age) = interp.age_normalized {
        out.push_str(&format!("Age Prediction (normalized): {:.4}\n", age));
    }
    if let Some(af) = interp.af_in_read {
        out.push_str("AF Classification:\n");
        out.push_str(&format!("- No AF: {:.4}\n", af.no_af));
        out.push_str(&format!("- AF Present: {:.4}\n", af.af_present));
    }
    if let Some(curve) = &predictions.survival_curve {
        let last_day = curve.days.last().copied().unwrap_or(0);
        out.push_str(&format!(
            "Survival curve: {} bins, day 0..{}\n",
            curve.values.len(),
            last_day
        ));
    }

    Ok(out)
}
