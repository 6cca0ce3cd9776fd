use std::path::Path;

use anyhow::{Context, Result, bail};
use ndarray::{Array2, ArrayView3};
use serde::{Deserialize, Serialize};

use crate::model::Model;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedOutput {
    pub name: String,
    pub values: Vec<Vec<f32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedPredictions {
    #[serde(default)]
    pub input_shape: Option<[usize; 3]>,
    pub outputs: Vec<RecordedOutput>,
}

/// Serves raw head outputs captured from an external model run.
#[derive(Debug, Clone)]
pub struct ReplayModel {
    names: Vec<String>,
    outputs: Vec<Array2<f32>>,
    input_shape: Option<[usize; 3]>,
}

impl ReplayModel {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open predictions {}", path.display()))?;
        let recorded: RecordedPredictions = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("failed to parse predictions {}", path.display()))?;
        Self::from_recorded(recorded)
    }

    pub fn from_recorded(recorded: RecordedPredictions) -> Result<Self> {
        let mut names = Vec::with_capacity(recorded.outputs.len());
        let mut outputs = Vec::with_capacity(recorded.outputs.len());
        for output in recorded.outputs {
            let rows = output.values.len();
            let cols = output.values.first().map(Vec::len).unwrap_or(0);
            if output.values.iter().any(|r| r.len() != cols) {
                bail!("output '{}' has ragged rows", output.name);
            }
            let flat: Vec<f32> = output.values.into_iter().flatten().collect();
            let array = Array2::from_shape_vec((rows, cols), flat)
                .with_context(|| format!("output '{}' is not a 2-D array", output.name))?;
            names.push(output.name);
            outputs.push(array);
        }
        Ok(Self {
            names,
            outputs,
            input_shape: recorded.input_shape,
        })
    }
}

impl Model for ReplayModel {
    fn output_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, input: ArrayView3<'_, f32>) -> Result<Vec<Array2<f32>>> {
        if let Some(expected) = self.input_shape {
            if input.shape() != &expected[..] {
                bail!(
                    "input tensor shape {:?} does not match recorded shape {:?}",
                    input.shape(),
                    expected
                );
            }
        }
        Ok(self.outputs.clone())
    }
}
