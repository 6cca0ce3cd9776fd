use std::path::Path;

use anyhow::{Context, Result};
use hdf5::{Dataset, File};
use tracing::debug;

use crate::error::EcgError;
use crate::signal::{self, LeadLayout, RecordingSource, RecordingTensor};

/// Read-only HDF5 recording. Lead datasets live at `<root>/<lead>/instance_0`.
pub struct Hd5Recording {
    file: File,
}

impl Hd5Recording {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open HDF5 recording {}", path.display()))?;
        Ok(Self { file })
    }

    fn path_exists(&self, path: &str) -> bool {
        let mut prefix = String::with_capacity(path.len());
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            if !self.file.link_exists(&prefix) {
                return false;
            }
        }
        !prefix.is_empty()
    }
}

impl RecordingSource for Hd5Recording {
    fn read_samples(&self, path: &str) -> Result<Option<Vec<f32>>, EcgError> {
        if !self.path_exists(path) {
            return Ok(None);
        }
        let ds = self
            .file
            .dataset(path)
            .map_err(|e| EcgError::Recording(format!("{}: {}", path, e)))?;
        read_f32_vec(&ds)
            .map(Some)
            .map_err(|e| EcgError::Recording(format!("{}: {}", path, e)))
    }
}

/// Opens the file, extracts the tensor and closes the file before returning.
pub fn extract_file(path: &Path, layout: &LeadLayout) -> Result<RecordingTensor> {
    let recording = Hd5Recording::open(path)?;
    let tensor = signal::extract(&recording, layout)
        .with_context(|| format!("failed to extract leads from {}", path.display()))?;
    debug!(path = %path.display(), "hd5_recording_closed");
    Ok(tensor)
}

fn read_f32_vec(ds: &Dataset) -> Result<Vec<f32>, String> {
    if let Ok(v) = ds.read_raw::<f32>() {
        return Ok(v);
    }
    if let Ok(v) = ds.read_raw::<f64>() {
        return Ok(v.into_iter().map(|x| x as f32).collect());
    }
    if let Ok(v) = ds.read_raw::<i16>() {
        return Ok(v.into_iter().map(|x| x as f32).collect());
    }
    if let Ok(v) = ds.read_raw::<i32>() {
        return Ok(v.into_iter().map(|x| x as f32).collect());
    }
    Err("unsupported sample type (expected f32, f64, i16 or i32)".to_string())
}
