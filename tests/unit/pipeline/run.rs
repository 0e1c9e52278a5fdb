use super::*;

use std::{cell::RefCell, path::Path, rc::Rc};

use crate::{
    foundation::error::ReelError,
    speech::{
        backends::{BackendConfig, SpeechBackend, SynthesisRequest},
        payload::PayloadKind,
        synthesizer::FallbackPolicy,
    },
};

struct ScriptedBackend {
    name: &'static str,
    works: bool,
}

impl SpeechBackend for ScriptedBackend {
    fn name(&self) -> &str {
        self.name
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::PlainText
    }

    fn synthesize(&self, req: &SynthesisRequest<'_>) -> ReelResult<()> {
        if self.works {
            std::fs::write(req.out_path, b"ID3speech").unwrap();
            Ok(())
        } else {
            Err(ReelError::backend("offline"))
        }
    }
}

#[derive(Default)]
struct EngineLog {
    calls: Vec<&'static str>,
    jobs: Vec<RenderJob>,
}

struct FakeEngine {
    duration: f64,
    fail_render: bool,
    log: Rc<RefCell<EngineLog>>,
}

impl MediaEngine for FakeEngine {
    fn process_audio(&self, _chain: &AudioFilterChain, input: &Path, output: &Path) -> ReelResult<()> {
        self.log.borrow_mut().calls.push("process_audio");
        std::fs::copy(input, output).unwrap();
        Ok(())
    }

    fn probe_duration(&self, _path: &Path) -> ReelResult<f64> {
        self.log.borrow_mut().calls.push("probe_duration");
        Ok(self.duration)
    }

    fn render(&self, job: &RenderJob) -> ReelResult<()> {
        let mut log = self.log.borrow_mut();
        log.calls.push("render");
        log.jobs.push(job.clone());
        if self.fail_render {
            return Err(ReelError::render("encoder crashed"));
        }
        std::fs::write(&job.out_path, b"mp4").unwrap();
        Ok(())
    }
}

fn temp_workspace(tag: &str) -> Workspace {
    let root = std::env::temp_dir().join(format!(
        "shortreel_run_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    Workspace::create(root).unwrap()
}

fn pipeline(
    backends: Vec<(&'static str, bool)>,
    duration: f64,
    fail_render: bool,
) -> (Pipeline, Rc<RefCell<EngineLog>>) {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let backends = backends
        .into_iter()
        .map(|(name, works)| Box::new(ScriptedBackend { name, works }) as Box<dyn SpeechBackend>)
        .collect();
    let synthesizer = SpeechSynthesizer::new(backends, FallbackPolicy::Ordered).unwrap();
    let engine = FakeEngine {
        duration,
        fail_render,
        log: log.clone(),
    };
    let p = Pipeline::new(PipelineConfig::default(), synthesizer, Box::new(engine)).unwrap();
    (p, log)
}

fn request(seed: &str) -> RunRequest {
    RunRequest {
        mode: ScriptMode::Short,
        seed: Seed::new(seed),
        day_seed: Seed::new("2026-10-18"),
        voice_override: None,
    }
}

#[test]
fn run_renders_once_and_writes_metadata() {
    let ws = temp_workspace("ok");
    let (p, log) = pipeline(vec![("primary", true)], 27.5, false);

    let report = p.run(&ws, &request("run-1")).unwrap();

    let log = log.borrow();
    assert_eq!(log.calls, ["process_audio", "probe_duration", "render"]);
    assert_eq!(log.jobs.len(), 1);
    let job = &log.jobs[0];
    assert!((job.canvas_seconds - 29.5).abs() < 1e-9);
    assert_eq!(job.audio_path, ws.audio());
    assert_eq!(job.fps, 30);
    assert!(job.filter_graph.contains("subtitles="));

    assert_eq!(report.engine, "primary");
    assert_eq!(report.caption_count, report.script.lines().count());
    assert_eq!(
        std::fs::read_to_string(ws.meta_title()).unwrap(),
        report.script.title
    );
    let desc = std::fs::read_to_string(ws.meta_description()).unwrap();
    assert!(desc.starts_with("Silent Money Blueprint.\n\n"));
    assert!(desc.ends_with(&report.script.tags));
    assert!(ws.captions().exists());
    assert!(ws.title_text().exists());
}

#[test]
fn fallback_engine_is_reported() {
    let ws = temp_workspace("fallback");
    let (p, _log) = pipeline(vec![("primary", false), ("secondary", true)], 12.0, false);

    let report = p.run(&ws, &request("run-2")).unwrap();
    assert_eq!(report.engine, "secondary");
    assert_eq!(report.speech_failures.len(), 1);
    assert_eq!(report.speech_failures[0].engine, "primary");
}

#[test]
fn zero_duration_is_a_measurement_fault() {
    let ws = temp_workspace("zero");
    let (p, log) = pipeline(vec![("primary", true)], 0.0, false);

    let err = p.run(&ws, &request("run-3")).unwrap_err();
    assert!(matches!(err, ReelError::Measurement(_)));
    assert!(!log.borrow().calls.contains(&"render"));
    assert!(!ws.meta_title().exists());
}

#[test]
fn render_failure_leaves_no_metadata() {
    let ws = temp_workspace("render_fail");
    std::fs::write(ws.meta_title(), "stale").unwrap();
    let (p, log) = pipeline(vec![("primary", true)], 20.0, true);

    let err = p.run(&ws, &request("run-4")).unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
    assert_eq!(log.borrow().jobs.len(), 1);
    assert!(!ws.meta_title().exists());
    assert!(!ws.meta_description().exists());
}

#[test]
fn same_seed_gives_same_script() {
    let (p, _log) = pipeline(vec![("primary", true)], 15.0, false);
    let a = p.run(&temp_workspace("det_a"), &request("fixed")).unwrap();
    let b = p.run(&temp_workspace("det_b"), &request("fixed")).unwrap();
    assert_eq!(a.script, b.script);
    assert_eq!(a.voice, b.voice);
}

#[test]
fn request_override_beats_rotation() {
    let ws = temp_workspace("voice");
    let (p, _log) = pipeline(vec![("primary", true)], 10.0, false);
    let mut req = request("run-5");
    req.voice_override = Some("en-GB-SoniaNeural".to_string());

    let report = p.run(&ws, &req).unwrap();
    assert_eq!(report.voice.voice_id, "en-GB-SoniaNeural");
}

#[test]
fn stock_config_does_not_degrade_to_the_fallback_engine() {
    let mut config = PipelineConfig::default();
    assert_eq!(config.fallback, FallbackPolicy::RequirePrimary);
    // Keep the stock chain shape, with binaries that cannot be spawned.
    for backend in &mut config.backends {
        match backend {
            BackendConfig::EdgeTts { program, .. } | BackendConfig::Gtts { program, .. } => {
                *program = format!("shortreel-missing-{program}");
            }
            other => panic!("unexpected stock backend {other:?}"),
        }
    }
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let engine = FakeEngine {
        duration: 10.0,
        fail_render: false,
        log: log.clone(),
    };
    let p = Pipeline::from_config(config, Box::new(engine)).unwrap();
    let ws = temp_workspace("stock");

    let err = p.run(&ws, &request("run-6")).unwrap_err();
    assert!(matches!(err, ReelError::Backend(_)));
    let msg = err.to_string();
    assert!(msg.contains("'edge-tts' failed and fallback is disabled"), "{msg}");
    assert!(!msg.contains("gtts"), "{msg}");
    assert!(log.borrow().calls.is_empty());
    assert!(!ws.raw_audio().exists());
}
