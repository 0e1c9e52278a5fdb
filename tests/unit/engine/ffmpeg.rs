use super::*;

use crate::engine::media::Canvas;

fn job(out: PathBuf) -> RenderJob {
    RenderJob {
        filter_graph: "format=pix_fmts=yuv420p".to_string(),
        audio_path: PathBuf::from("/work/audio.mp3"),
        canvas: Canvas::default(),
        fps: 30,
        canvas_seconds: 14.25,
        preset: "veryfast".to_string(),
        out_path: out,
    }
}

fn strings(args: Vec<OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn render_args_pass_graph_as_single_argument() {
    let args = strings(render_args(&job(PathBuf::from("/work/video.mp4"))));
    assert_eq!(
        args,
        vec![
            "-y",
            "-loglevel",
            "error",
            "-f",
            "lavfi",
            "-i",
            "nullsrc=s=1080x1920:r=30:d=14.250",
            "-i",
            "/work/audio.mp3",
            "-vf",
            "format=pix_fmts=yuv420p",
            "-r",
            "30",
            "-c:v",
            "libx264",
            "-preset",
            "veryfast",
            "-pix_fmt",
            "yuv420p",
            "-c:a",
            "aac",
            "-shortest",
            "-movflags",
            "+faststart",
            "/work/video.mp4",
        ]
    );
}

#[test]
fn audio_args_normalize_output_format() {
    let chain = AudioFilterChain::default();
    let args = strings(audio_args(
        &chain,
        Path::new("/work/audio_raw.mp3"),
        Path::new("/work/audio.mp3"),
    ));
    let af = args.iter().position(|a| a == "-af").unwrap();
    assert_eq!(args[af + 1], chain.to_filter_string());
    assert!(args.windows(2).any(|w| w[0] == "-ar" && w[1] == "44100"));
    assert!(args.windows(2).any(|w| w[0] == "-ac" && w[1] == "2"));
    assert!(args.windows(2).any(|w| w[0] == "-b:a" && w[1] == "192k"));
    assert_eq!(args.last().unwrap(), "/work/audio.mp3");
}

#[test]
fn probe_output_parsing() {
    let p = Path::new("a.mp3");
    assert_eq!(parse_probe_duration("12.345000\n", p).unwrap(), 12.345);
    for bad in ["", "N/A\n", "0.000000", "-3"] {
        assert!(matches!(
            parse_probe_duration(bad, p).unwrap_err(),
            ReelError::Measurement(_)
        ));
    }
}

#[test]
fn render_job_validation_catches_bad_values() {
    let mut j = job(PathBuf::from("out.mp4"));
    assert!(j.validate().is_ok());

    j.canvas.width = 1081;
    assert!(j.validate().is_err());

    let mut j = job(PathBuf::from("out.mp4"));
    j.fps = 0;
    assert!(j.validate().is_err());

    let mut j = job(PathBuf::from("out.mp4"));
    j.canvas_seconds = 0.0;
    assert!(j.validate().is_err());
}

#[test]
fn real_ffmpeg_roundtrip_when_available() {
    let engine = FfmpegEngine::default();
    if !engine.is_available() {
        return;
    }
    let root = std::env::temp_dir().join(format!(
        "shortreel_ffmpeg_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&root).unwrap();

    let raw = root.join("tone.wav");
    let status = Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-y",
            "-f",
            "lavfi",
            "-i",
            "sine=frequency=220:sample_rate=48000",
            "-t",
            "1.5",
            "-c:a",
            "pcm_s16le",
        ])
        .arg(&raw)
        .status()
        .unwrap();
    assert!(status.success());

    let processed = root.join("tone.m4a");
    engine
        .process_audio(&AudioFilterChain::default(), &raw, &processed)
        .unwrap();
    let seconds = engine.probe_duration(&processed).unwrap();
    assert!((seconds - 1.5).abs() < 0.2, "probed {seconds}");
}
