//! Lead extraction and global normalization.
//!
//! The tensor is normalized with a single mean and standard deviation taken
//! over every sample of every lead, not per lead.

pub mod layout;
pub mod source;

use ndarray::{Array2, ArrayView3, Axis};

use crate::error::EcgError;
pub use layout::{LeadLayout, LeadSlot, load_layout_tsv, parse_layout_tsv};
pub use source::{MemoryRecording, RecordingSource};

pub const NORM_EPSILON: f32 = 1e-6;

/// Dense `(samples, leads)` recording, already normalized.
#[derive(Debug, Clone)]
pub struct RecordingTensor {
    data: Array2<f32>,
    /// Mean of the raw samples before normalization.
    pub raw_mean: f32,
    /// Population standard deviation of the raw samples before normalization.
    pub raw_std: f32,
}

impl RecordingTensor {
    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    pub fn samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn leads(&self) -> usize {
        self.data.ncols()
    }

    /// Batch-of-one view `(1, samples, leads)` for the model boundary.
    pub fn as_batch(&self) -> ArrayView3<'_, f32> {
        self.data.view().insert_axis(Axis(0))
    }
}

pub fn extract<S: RecordingSource + ?Sized>(
    source: &S,
    layout: &LeadLayout,
) -> Result<RecordingTensor, EcgError> {
    layout.validate()?;
    let mut data = Array2::<f32>::zeros((layout.samples, layout.lead_count()));

    for slot in &layout.leads {
        let path = layout.dataset_path(&slot.name);
        let samples = source
            .read_samples(&path)?
            .ok_or_else(|| EcgError::MissingLead {
                lead: slot.name.clone(),
                path: path.clone(),
            })?;
        if samples.len() != layout.samples {
            return Err(EcgError::shape(
                format!("lead {}", slot.name),
                layout.samples,
                samples.len(),
            ));
        }
        for (dst, src) in data.column_mut(slot.column).iter_mut().zip(samples) {
            *dst = src;
        }
    }

    let (raw_mean, raw_std) = normalize_global(&mut data);
    Ok(RecordingTensor {
        data,
        raw_mean,
        raw_std,
    })
}

/// `x = (x - mean) / (std + eps)` over the whole array.
/// Returns the pre-normalization `(mean, std)`.
pub fn normalize_global(data: &mut Array2<f32>) -> (f32, f32) {
    if data.is_empty() {
        return (0.0, 0.0);
    }
    let n = data.len() as f64;
    let mean = data.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = data
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let mean = mean as f32;
    let std = var.sqrt() as f32;
    let denom = std + NORM_EPSILON;
    data.mapv_inplace(|v| (v - mean) / denom);
    (mean, std)
}
