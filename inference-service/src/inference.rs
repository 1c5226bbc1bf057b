use tract_onnx::prelude::*;

/// Prediction capability of a loaded model. Object-safe so handlers can
/// hold `Arc<dyn Predictor>` and tests can substitute a stub.
pub trait Predictor: Send + Sync {
    /// Number of input features the model expects.
    fn input_len(&self) -> usize;

    /// Run the model on a single feature vector of `input_len()` values.
    fn predict(&self, features: &[f32]) -> anyhow::Result<Vec<f32>>;
}

/// ONNX model executed with tract. The input fact is declared as a single
/// sample of `input_len` columns at load time.
pub struct ModelInference {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>,
    input_len: usize,
}

impl ModelInference {
    pub fn load<P: AsRef<std::path::Path>>(model_path: P, input_len: usize) -> TractResult<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, input_len)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model, input_len })
    }
}

impl Predictor for ModelInference {
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn predict(&self, features: &[f32]) -> anyhow::Result<Vec<f32>> {
        let input = Tensor::from_shape(&[1, self.input_len], features)?;
        let outputs = self.model.run(tvec!(input.into()))?;

        let prediction = outputs[0]
            .to_array_view::<f32>()?
            .iter()
            .copied()
            .collect();

        Ok(prediction)
    }
}
