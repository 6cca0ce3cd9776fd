use anyhow::Result;
use ecg2af::model::{Model, run_inference};
use ecg2af::signal::{LeadLayout, LeadSlot, MemoryRecording, extract};
use ndarray::{Array2, ArrayView3};

struct MeanModel {
    names: Vec<String>,
    extra_output: bool,
}

impl Model for MeanModel {
    fn output_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, input: ArrayView3<'_, f32>) -> Result<Vec<Array2<f32>>> {
        assert_eq!(input.shape()[0], 1);
        let mean = input.iter().sum::<f32>() / input.len() as f32;
        let mut out = vec![Array2::from_elem((1, 1), mean)];
        if self.extra_output {
            out.push(Array2::zeros((1, 2)));
        }
        Ok(out)
    }
}

fn tensor() -> ecg2af::signal::RecordingTensor {
    let layout = LeadLayout::new(
        "ecg",
        3,
        vec![
            LeadSlot {
                name: "a".to_string(),
                column: 0,
            },
            LeadSlot {
                name: "b".to_string(),
                column: 1,
            },
        ],
    )
    .unwrap();
    let rec = MemoryRecording::new()
        .with("ecg/a/instance_0", vec![1.0, 2.0, 3.0])
        .with("ecg/b/instance_0", vec![4.0, 5.0, 6.0]);
    extract(&rec, &layout).unwrap()
}

#[test]
fn inference_pairs_outputs_with_names() {
    let model = MeanModel {
        names: vec!["age".to_string()],
        extra_output: false,
    };
    let outputs = run_inference(&model, &tensor()).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].0, "age");
    assert!(outputs[0].1[[0, 0]].abs() < 1e-6);
}

#[test]
fn output_count_must_match_names() {
    let model = MeanModel {
        names: vec!["age".to_string()],
        extra_output: true,
    };
    assert!(run_inference(&model, &tensor()).is_err());
}
