use std::path::PathBuf;

use ndarray::Array2;

use crate::decode::PredictionSet;
use crate::heads::HeadRegistry;
use crate::pipeline::StageTiming;
use crate::schema::v1::Ecg2AfV1;
use crate::signal::{LeadLayout, NORM_EPSILON, RecordingTensor};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub predictions_path: Option<PathBuf>,
    pub heads_path: Option<PathBuf>,
    pub leads_path: Option<PathBuf>,
    pub write_json: bool,
    pub write_tsv: bool,
    pub layout: LeadLayout,
    pub registry: Option<HeadRegistry>,
    pub tensor: Option<RecordingTensor>,
    pub raw_outputs: Vec<(String, Array2<f32>)>,
    pub predictions: Option<PredictionSet>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: Ecg2AfV1,
    pub timings: Vec<StageTiming>,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        out_dir: PathBuf,
        predictions_path: Option<PathBuf>,
        write_json: bool,
        write_tsv: bool,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("ecg2af.json");
        let tsv_path = out_dir.join("survival_curve.tsv");
        let report = Ecg2AfV1::empty(tool_version, &input.display().to_string(), NORM_EPSILON);
        Self {
            input,
            predictions_path,
            heads_path: None,
            leads_path: None,
            write_json,
            write_tsv,
            layout: LeadLayout::rest_12(),
            registry: None,
            tensor: None,
            raw_outputs: Vec::new(),
            predictions: None,
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                json_path,
                tsv_path,
            },
            report,
            timings: Vec::new(),
        }
    }
}
