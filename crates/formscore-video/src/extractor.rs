use {
    crate::{ExtractorConfig, VideoError},
    std::{
        ffi::OsString,
        io::ErrorKind,
        path::{Path, PathBuf},
        process::Stdio,
        time::Instant,
    },
    tempfile::TempDir,
    tokio::process::Command,
};

/// File name pattern handed to the decoder; six digits keep lexical order temporal.
pub const FRAME_PATTERN: &str = "frame_%06d.png";

const FRAME_DIR_PREFIX: &str = "pose-frames-";
const FRAME_EXTENSION: &str = "png";

/// Sampled frames of one video.
///
/// Owns the temporary directory holding the images; dropping this value
/// removes the directory and everything in it.
#[derive(Debug)]
pub struct ExtractedFrames {
    dir: TempDir,
    frames: Vec<PathBuf>,
}

impl ExtractedFrames {
    /// Frame image paths in temporal order.
    pub fn frames(&self) -> &[PathBuf] {
        &self.frames
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Build the decoder argument list.
///
/// A `max_frames` of `None` or `Some(0)` means no cap.
pub fn ffmpeg_args(
    video: &Path,
    frame_rate: f64,
    max_frames: Option<u32>,
    output_pattern: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-y".into(),
        "-i".into(),
        video.as_os_str().to_owned(),
        "-vf".into(),
        format!("fps={}", frame_rate).into(),
    ];
    if let Some(cap) = max_frames.filter(|&cap| cap > 0) {
        args.push("-frames:v".into());
        args.push(cap.to_string().into());
    }
    args.push(output_pattern.as_os_str().to_owned());
    args
}

/// Samples videos into still PNG frames by running an external decoder.
#[derive(Debug, Clone, Default)]
pub struct FrameExtractor {
    config: ExtractorConfig,
}

impl FrameExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Sample `video` at `frame_rate` frames per second of source time.
    ///
    /// `frame_rate` must already be validated as finite and positive.
    /// At most `max_frames` frames are kept, counted from the start.
    pub async fn extract(
        &self,
        video: &Path,
        frame_rate: f64,
        max_frames: Option<u32>,
    ) -> Result<ExtractedFrames, VideoError> {
        check_readable(video).await?;

        let dir = self.create_frame_dir()?;
        let pattern = dir.path().join(FRAME_PATTERN);
        let args = ffmpeg_args(video, frame_rate, max_frames, &pattern);

        log::debug!(
            "extracting {} at {} fps into {}",
            video.display(),
            frame_rate,
            dir.path().display()
        );
        let start = Instant::now();

        // on any early return `dir` is dropped and removed
        self.run_decoder(video, &args).await?;
        let frames = list_frames(dir.path()).await?;

        log::info!(
            "extracted {} frames from {} in {:.2}s",
            frames.len(),
            video.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(ExtractedFrames { dir, frames })
    }

    fn create_frame_dir(&self) -> Result<TempDir, VideoError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(FRAME_DIR_PREFIX);
        let dir = match self.config.temp_root() {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }

    async fn run_decoder(&self, video: &Path, args: &[OsString]) -> Result<(), VideoError> {
        let program = self.config.program();
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    VideoError::ExtractorMissing {
                        program: program.clone(),
                    }
                }
                _ => VideoError::Io(format!("failed to start {}: {e}", program.display())),
            })?;

        // dropping the wait future on timeout kills the child
        let output = tokio::time::timeout(self.config.timeout(), child.wait_with_output())
            .await
            .map_err(|_| {
                log::warn!(
                    "ffmpeg timed out on {} after {:?}",
                    video.display(),
                    self.config.timeout()
                );
                VideoError::Timeout {
                    path: video.to_path_buf(),
                    after: self.config.timeout(),
                }
            })??;

        if !output.status.success() {
            let mut text = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.trim().is_empty() {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(stdout.trim());
            }
            return Err(VideoError::ExtractionFailed {
                path: video.to_path_buf(),
                status: output.status.code(),
                output: text,
            });
        }
        Ok(())
    }
}

async fn check_readable(video: &Path) -> Result<(), VideoError> {
    let unreadable = |reason: String| VideoError::VideoUnreadable {
        path: video.to_path_buf(),
        reason,
    };
    let metadata = tokio::fs::metadata(video)
        .await
        .map_err(|e| unreadable(e.to_string()))?;
    if metadata.is_dir() {
        return Err(unreadable("is a directory".to_string()));
    }
    tokio::fs::File::open(video)
        .await
        .map_err(|e| unreadable(e.to_string()))?;
    Ok(())
}

async fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, VideoError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut frames = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == FRAME_EXTENSION) {
            frames.push(path);
        }
    }
    // zero-padded names sort in temporal order
    frames.sort();
    Ok(frames)
}
