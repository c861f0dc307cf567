use formscore_base::{init_file_logger, init_stderr_logger};
use formscore_compare::{compare_videos_detailed, CompareConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// When set, logs go to date-named files in this directory instead of stderr.
const LOG_DIR_ENV: &str = "FORMSCORE_LOG_DIR";

const USAGE: &str = "Usage: formscore <reference-video> <attempt-video> [--config file.json] \
[--frame-rate R] [--max-frames N] [--min-pose-score S] [--json]";

struct Args {
    reference: PathBuf,
    attempt: PathBuf,
    config: CompareConfig,
    json: bool,
}

fn flag_value(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{flag} needs a value"))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{flag}: '{value}' is not a valid number"))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut videos = Vec::new();
    let mut config_path = None;
    let mut frame_rate = None;
    let mut max_frames = None;
    let mut min_pose_score = None;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(flag_value(&arg, args.next())?),
            "--frame-rate" => {
                frame_rate = Some(parse_number::<f64>(&arg, &flag_value(&arg, args.next())?)?)
            }
            "--max-frames" => {
                max_frames = Some(parse_number::<u32>(&arg, &flag_value(&arg, args.next())?)?)
            }
            "--min-pose-score" => {
                min_pose_score = Some(parse_number::<f32>(&arg, &flag_value(&arg, args.next())?)?)
            }
            "--json" => json = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ => videos.push(PathBuf::from(arg)),
        }
    }

    let [reference, attempt]: [PathBuf; 2] = videos
        .try_into()
        .map_err(|_| "expected exactly two video paths".to_string())?;

    let mut config = match config_path {
        Some(path) => CompareConfig::from_json_file(&path).map_err(|e| e.to_string())?,
        None => CompareConfig::default(),
    };
    if let Some(rate) = frame_rate {
        config = config.with_frame_rate(rate);
    }
    if let Some(cap) = max_frames {
        config = config.with_max_frames(Some(cap));
    }
    if let Some(score) = min_pose_score {
        config = config.with_min_pose_score(score);
    }

    Ok(Args {
        reference,
        attempt,
        config,
        json,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) => {
            if let Err(e) = init_file_logger(&dir) {
                init_stderr_logger();
                log::warn!("cannot log to {}: {e}", dir.to_string_lossy());
            }
        }
        None => init_stderr_logger(),
    }

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            if msg != USAGE {
                eprintln!("{USAGE}");
            }
            return ExitCode::from(1);
        }
    };

    match compare_videos_detailed(&args.reference, &args.attempt, &args.config).await {
        Ok(result) if args.json => match serde_json::to_string_pretty(&result) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("failed to serialize result: {e}");
                ExitCode::from(1)
            }
        },
        Ok(result) => {
            println!("{:.2}", result.score);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_overrides() {
        let parsed = parse_args(args(&[
            "ref.mp4",
            "--frame-rate",
            "8",
            "try.mp4",
            "--max-frames",
            "0",
            "--min-pose-score",
            "0.5",
            "--json",
        ]))
        .unwrap();
        assert_eq!(parsed.reference, PathBuf::from("ref.mp4"));
        assert_eq!(parsed.attempt, PathBuf::from("try.mp4"));
        assert_eq!(parsed.config.frame_rate, 8.0);
        assert_eq!(parsed.config.max_frames, Some(0));
        assert_eq!(parsed.config.min_pose_score, 0.5);
        assert!(parsed.json);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(args(&["only-one.mp4"])).is_err());
        assert!(parse_args(args(&["a.mp4", "b.mp4", "--frame-rate"])).is_err());
        assert!(parse_args(args(&["a.mp4", "b.mp4", "--frame-rate", "fast"])).is_err());
        assert!(parse_args(args(&["a.mp4", "b.mp4", "--verbose"])).is_err());
    }
}
