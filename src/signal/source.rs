use std::collections::HashMap;

use crate::error::EcgError;

/// Hierarchical container addressed by `/`-separated paths.
///
/// `Ok(None)` means the path does not exist; `Err` is reserved for a path
/// that exists but cannot be read as a numeric sequence.
pub trait RecordingSource {
    fn read_samples(&self, path: &str) -> Result<Option<Vec<f32>>, EcgError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryRecording {
    datasets: HashMap<String, Vec<f32>>,
}

impl MemoryRecording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, samples: Vec<f32>) {
        self.datasets.insert(path.into(), samples);
    }

    pub fn with(mut self, path: impl Into<String>, samples: Vec<f32>) -> Self {
        self.insert(path, samples);
        self
    }
}

impl RecordingSource for MemoryRecording {
    fn read_samples(&self, path: &str) -> Result<Option<Vec<f32>>, EcgError> {
        Ok(self.datasets.get(path).cloned())
    }
}
