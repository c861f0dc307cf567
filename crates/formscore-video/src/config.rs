use std::{path::PathBuf, time::Duration};

/// Environment variable naming the decoder program.
pub const FFMPEG_PATH_ENV: &str = "FFMPEG_PATH";

// generous bound for a few minutes of source video at low sample rates
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Decoder program from `FFMPEG_PATH`, falling back to `ffmpeg` on `PATH`.
pub fn default_program() -> PathBuf {
    std::env::var_os(FFMPEG_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("ffmpeg"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    program: PathBuf,
    timeout: Duration,
    temp_root: Option<PathBuf>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temp_root: None,
        }
    }
}

impl ExtractorConfig {
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create frame directories under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn temp_root(&self) -> Option<&PathBuf> {
        self.temp_root.as_ref()
    }
}
