use crate::{Backend, InferError, ModelSource, Session};
use formscore_base::Tensor;
use ort::{inputs, session::Session as OrtSession, value::Tensor as OrtTensor};
use std::collections::HashMap;
use std::sync::OnceLock;

static ORT_INIT: OnceLock<()> = OnceLock::new();

fn ensure_ort_init() {
    ORT_INIT.get_or_init(|| {
        let _ = ort::init().commit();
    });
}

/// ONNX Runtime on the CPU execution provider.
#[derive(Debug, Default)]
pub struct OnnxBackend;

impl OnnxBackend {
    pub fn new() -> Self {
        ensure_ort_init();
        Self
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let builder = OrtSession::builder().map_err(|e| {
            InferError::Backend(format!("failed to create session builder: {}", e))
        })?;

        let session = match &model {
            ModelSource::File(path) => builder.commit_from_file(path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from {}: {}", path.display(), e))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {}", e))
            })?,
        };

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .collect();
        log::debug!(
            "onnx session for {}: inputs {:?}, outputs {:?}",
            model.describe(),
            input_names,
            output_names
        );

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        // pose models take a single image input
        let [(name, tensor)] = inputs else {
            return Err(InferError::InvalidInput(format!(
                "expected exactly one input, got {}",
                inputs.len()
            )));
        };
        if !self.input_names.iter().any(|n| n == name) {
            return Err(InferError::InvalidInput(format!(
                "unknown input '{}', model expects {:?}",
                name, self.input_names
            )));
        }

        let shape: Vec<i64> = tensor.shape.iter().map(|&d| d as i64).collect();
        let value = OrtTensor::from_array((shape, tensor.data.clone()))
            .map_err(|e| InferError::Backend(format!("failed to create input tensor: {}", e)))?;
        let outputs = self
            .session
            .run(inputs![*name => value])
            .map_err(|e| InferError::Runtime(format!("inference failed: {}", e)))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let (shape, data) = outputs[output_name.as_str()]
                .try_extract_tensor::<f32>()
                .map_err(|e| {
                    InferError::Backend(format!("output '{}' is not f32: {}", output_name, e))
                })?;
            let shape: Vec<usize> = shape.iter().map(|&d| d.max(0) as usize).collect();
            result.insert(output_name.clone(), Tensor::new(shape, data.to_vec())?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
