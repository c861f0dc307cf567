#![allow(dead_code)]

use formscore_base::Tensor;
use formscore_infer::{InferError, PoseEstimator, RawKeypoint};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];

/// Estimator that picks its answer by the red channel of the top-left pixel.
pub struct ColorEstimator {
    poses: HashMap<u8, Option<Vec<RawKeypoint>>>,
    calls: AtomicUsize,
}

impl ColorEstimator {
    pub fn new() -> Self {
        Self {
            poses: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_pose(mut self, color: [u8; 3], pose: Option<Vec<RawKeypoint>>) -> Self {
        self.poses.insert(color[0], pose);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PoseEstimator for ColorEstimator {
    fn estimate(
        &self,
        image: &Tensor<u8>,
        _flip_horizontal: bool,
    ) -> Result<Option<Vec<RawKeypoint>>, InferError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let red = image.data[0];
        self.poses
            .get(&red)
            .cloned()
            .ok_or_else(|| InferError::InvalidInput(format!("no pose for red={red}")))
    }
}

/// Three keypoints forming a right angle, all with the same score.
pub fn triangle(score: f32) -> Option<Vec<RawKeypoint>> {
    Some(vec![
        RawKeypoint { name: "nose", x: 0.0, y: 0.0, score },
        RawKeypoint { name: "left_eye", x: 1.0, y: 0.0, score },
        RawKeypoint { name: "right_eye", x: 0.0, y: 1.0, score },
    ])
}

pub fn write_png(path: &Path, color: [u8; 3]) {
    crates_image::RgbImage::from_pixel(8, 6, crates_image::Rgb(color))
        .save_with_format(path, crates_image::ImageFormat::Png)
        .unwrap();
}

/// Shell script standing in for ffmpeg: copies the input file (a PNG here)
/// to each numbered output, producing `total` frames unless capped.
#[cfg(unix)]
pub fn fake_ffmpeg(dir: &Path, total: usize) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
        r#"#!/bin/sh
total={total}
cap=$total
input=
while [ $# -gt 1 ]; do
  case "$1" in
    -i) input=$2 ;;
    -frames:v) cap=$2 ;;
  esac
  shift
done
pattern=$1
i=1
while [ $i -le $total ] && [ $i -le $cap ]; do
  cp "$input" "$(printf "$pattern" "$i")"
  i=$((i + 1))
done
"#
    );
    let path = dir.join(format!("fake-ffmpeg-{total}"));
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
