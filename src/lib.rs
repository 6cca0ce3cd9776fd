//! Tensorizes resting ECG recordings and decodes the output heads of an
//! ECG-to-AF model into risk, demographic and survival-curve predictions.

pub mod cli;
pub mod ctx;
pub mod decode;
pub mod error;
pub mod heads;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod signal;

pub use error::EcgError;
