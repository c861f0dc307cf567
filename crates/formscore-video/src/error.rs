use std::{fmt, path::PathBuf, time::Duration};

#[derive(Debug)]
pub enum VideoError {
    /// The input video cannot be opened for reading.
    VideoUnreadable { path: PathBuf, reason: String },
    /// The decoder program could not be resolved or executed.
    ExtractorMissing { program: PathBuf },
    /// The decoder ran and exited with a failure status.
    ExtractionFailed {
        path: PathBuf,
        status: Option<i32>,
        output: String,
    },
    /// The decoder did not finish in time and was killed.
    Timeout { path: PathBuf, after: Duration },
    Io(String),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::VideoUnreadable { path, reason } => {
                write!(f, "cannot read video at {}: {reason}", path.display())
            }
            VideoError::ExtractorMissing { program } => write!(
                f,
                "ffmpeg not found at \"{}\"; install ffmpeg or set FFMPEG_PATH",
                program.display()
            ),
            VideoError::ExtractionFailed {
                path,
                status,
                output,
            } => {
                let status = status.map_or("signal".to_string(), |code| code.to_string());
                write!(
                    f,
                    "ffmpeg failed to extract frames from {} (exit {status}): {output}",
                    path.display()
                )
            }
            VideoError::Timeout { path, after } => write!(
                f,
                "ffmpeg did not finish extracting {} within {:.1}s",
                path.display(),
                after.as_secs_f64()
            ),
            VideoError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        VideoError::Io(err.to_string())
    }
}
