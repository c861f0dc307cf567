use std::path::PathBuf;

/// Where model weights come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

impl ModelSource {
    pub fn describe(&self) -> String {
        match self {
            ModelSource::File(path) => path.display().to_string(),
            ModelSource::Memory(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}
