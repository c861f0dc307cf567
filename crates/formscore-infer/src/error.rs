use formscore_base::TensorError;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// The model file is missing or the runtime rejected it.
    ModelLoad(String),
    Backend(String),
    ShapeMismatch { expected: String, got: String },
    InvalidInput(String),
    Runtime(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::ShapeMismatch {
            expected: "consistent tensor shape".to_string(),
            got: err.to_string(),
        }
    }
}
