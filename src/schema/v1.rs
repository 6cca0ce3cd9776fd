use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Normalization {
    pub scope: String,
    pub mean: Option<f32>,
    pub std: Option<f32>,
    pub epsilon: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub input: String,
    pub samples: Option<u64>,
    pub leads: Option<u64>,
    pub lead_order: Vec<String>,
    pub normalization: Normalization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalCurve {
    pub head: String,
    pub days: Vec<u32>,
    pub values: Vec<f32>,
    pub af_risk: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadPrediction {
    pub name: String,
    pub kind: String,
    pub values: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predictions {
    pub af_risk: Option<f32>,
    pub survival_curve: Option<SurvivalCurve>,
    pub heads: Vec<HeadPrediction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SexPrediction {
    pub male: f32,
    pub female: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfClassification {
    pub no_af: f32,
    pub af_present: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    pub sex: Option<SexPrediction>,
    pub age_normalized: Option<f32>,
    pub af_in_read: Option<AfClassification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ecg2AfV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub input_meta: InputMeta,
    pub predictions: Predictions,
    pub interpretation: Interpretation,
    pub warnings: Vec<String>,
}

impl Ecg2AfV1 {
    pub fn empty(tool_version: &str, input: &str, epsilon: f32) -> Self {
        Self {
            tool: "ecg2af".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            input_meta: InputMeta {
                input: input.to_string(),
                samples: None,
                leads: None,
                lead_order: Vec::new(),
                normalization: Normalization {
                    scope: "global".to_string(),
                    mean: None,
                    std: None,
                    epsilon,
                },
            },
            predictions: Predictions {
                af_risk: None,
                survival_curve: None,
                heads: Vec::new(),
            },
            interpretation: Interpretation {
                sex: None,
                age_normalized: None,
                af_in_read: None,
            },
            warnings: Vec::new(),
        }
    }
}
