use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Io(String),
    Decode(String),
    Tensor(formscore_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io(msg) => write!(f, "io error: {msg}"),
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Io(err.to_string())
    }
}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<formscore_base::TensorError> for ImageError {
    fn from(err: formscore_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
