use crate::InferError;
use formscore_base::Tensor;
use std::collections::HashMap;

/// A loaded model that maps named f32 inputs to named f32 outputs.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
