pub mod logging;
pub mod tensor;

pub use logging::{init_file_logger, init_stderr_logger, FileLogger, StderrLogger};
pub use tensor::{Tensor, TensorError};

// Re-export log crate so downstream crates can use formscore_base::log::*
pub use log;
