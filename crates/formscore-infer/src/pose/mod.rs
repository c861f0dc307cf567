mod movenet;
mod postprocess;
mod preprocess;

pub use movenet::MoveNetEstimator;
pub use postprocess::postprocess;
pub use preprocess::{preprocess, LetterboxInfo};
