use serde::Serialize;

use crate::error::EcgError;

/// Event-free probability per hazard bin, with the bin start day and the
/// cumulative risk at the end of the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalCurve {
    pub head: String,
    pub values: Vec<f32>,
    pub days: Vec<u32>,
    pub risk: f32,
}

/// Day width of one bin: floor division, then +1.
pub fn days_per_bin(days_window: u32, intervals: usize) -> Result<u32, EcgError> {
    let n = u32::try_from(intervals)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| EcgError::shape("survival intervals", "1..=u32::MAX", intervals))?;
    (days_window / n).checked_add(1).ok_or_else(|| {
        EcgError::shape(
            "survival bin width",
            "at most u32::MAX days",
            format!("1 + {days_window} / {n}"),
        )
    })
}

/// Start day of each bin, `i * step`.
fn bin_days(intervals: usize, step: u32) -> Result<Vec<u32>, EcgError> {
    (0..intervals)
        .map(|i| {
            u32::try_from(i)
                .ok()
                .and_then(|i| i.checked_mul(step))
                .ok_or_else(|| {
                    EcgError::shape(
                        "survival day axis",
                        "at most u32::MAX days",
                        format!("{i} * {step}"),
                    )
                })
        })
        .collect()
}

/// Builds the curve from one output row. The first `width / 2` entries are
/// per-bin survival factors; the trailing half is ignored.
pub fn survival_from_row(
    head: &str,
    row: &[f32],
    width: usize,
    days_window: u32,
) -> Result<SurvivalCurve, EcgError> {
    if row.len() != width {
        return Err(EcgError::shape(format!("survival head {}", head), width, row.len()));
    }
    let intervals = width / 2;
    if intervals == 0 || width % 2 != 0 {
        return Err(EcgError::shape(
            format!("survival head {}", head),
            "even width >= 2",
            width,
        ));
    }

    let mut values = Vec::with_capacity(intervals);
    let mut acc = 1.0_f32;
    for &hazard in &row[..intervals] {
        acc *= hazard;
        values.push(acc);
    }

    let step = days_per_bin(days_window, intervals)?;
    let days = bin_days(intervals, step)?;
    let risk = 1.0 - values[intervals - 1];

    Ok(SurvivalCurve {
        head: head.to_string(),
        values,
        days,
        risk,
    })
}
