#[cfg(feature = "hdf5")]
pub mod hd5;
#[cfg(not(feature = "hdf5"))]
pub mod hd5 {
    use anyhow::{Result, bail};
    use std::path::Path;

    use crate::signal::{LeadLayout, RecordingTensor};

    pub fn extract_file(_path: &Path, _layout: &LeadLayout) -> Result<RecordingTensor> {
        bail!("HDF5 support not enabled. Rebuild with --features hdf5");
    }
}
pub mod json_writer;
pub mod summary;
pub mod tsv_writer;
