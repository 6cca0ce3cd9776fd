//! Model boundary.
//!
//! The trained network is opaque: it takes a `(1, samples, leads)` batch and
//! returns one `(1, width)` array per output head, in the order given by
//! [`Model::output_names`].

pub mod replay;

use anyhow::{Result, bail};
use ndarray::{Array2, ArrayView3};

use crate::signal::RecordingTensor;
pub use replay::ReplayModel;

pub trait Model {
    fn output_names(&self) -> &[String];
    fn predict(&self, input: ArrayView3<'_, f32>) -> Result<Vec<Array2<f32>>>;
}

/// Runs the model on a single recording and pairs each raw output with the
/// name the model reports for it.
pub fn run_inference<M: Model + ?Sized>(
    model: &M,
    tensor: &RecordingTensor,
) -> Result<Vec<(String, Array2<f32>)>> {
    let outputs = model.predict(tensor.as_batch())?;
    let names = model.output_names();
    if outputs.len() != names.len() {
        bail!(
            "model returned {} outputs but reports {} output names",
            outputs.len(),
            names.len()
        );
    }
    Ok(names.iter().cloned().zip(outputs).collect())
}
