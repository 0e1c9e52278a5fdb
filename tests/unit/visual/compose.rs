use super::*;

use std::path::PathBuf;

fn graph_for(seed: &str, opts: &VisualOptions) -> FilterGraph {
    build(
        Canvas::default(),
        Path::new("/work/title.txt"),
        Path::new("/work/captions.srt"),
        &Seed::new(seed),
        opts,
    )
    .unwrap()
}

#[test]
fn stage_order_is_background_then_title_then_captions() {
    let graph = graph_for("2026-10-18", &VisualOptions::default());
    let names: Vec<&str> = graph.stages().iter().map(FilterStage::name).collect();
    assert_eq!(
        names,
        vec!["geq", "noise", "eq", "format", "drawbox", "drawtext", "subtitles"]
    );
}

#[test]
fn slate_graph_serializes_exactly() {
    let opts = VisualOptions {
        style: Some(BackgroundStyle::Slate),
        ..VisualOptions::default()
    };
    let s = graph_for("any", &opts).to_filter_string().unwrap();
    assert_eq!(
        s,
        "geq=r='18+10*(Y/H)+6*sin(T/2)':g='16+10*(X/W)+6*sin(T/3)':b='26+12*(Y/H)+6*sin(T/4)',\
         noise=alls=5:allf=t+u,\
         eq=contrast=1.08:brightness=-0.02:saturation=1.05,\
         format=pix_fmts=yuv420p,\
         drawbox=x=70:y=150:w=940:h=250:color=black@0.40:t=fill:enable='lt(t,3.5)',\
         drawtext=font=DejaVuSans-Bold:textfile=/work/title.txt:reload=0:expansion=none:\
         fontcolor=white:fontsize=58:x='(w-text_w)/2':y='210':enable='lt(t,3.5)',\
         subtitles=filename=/work/captions.srt:force_style=FontName=DejaVu Sans\\,FontSize=52\\,\
         PrimaryColour=&HFFFFFF&\\,OutlineColour=&H000000&\\,BorderStyle=1\\,Outline=3\\,\
         Shadow=0\\,Alignment=2\\,MarginV=180"
    );
}

#[test]
fn style_selection_is_reproducible() {
    for seed in ["a", "b", "2026-10-18", "run-991"] {
        let s = Seed::new(seed);
        assert_eq!(BackgroundStyle::select(&s), BackgroundStyle::select(&s));
    }
    let a = graph_for("2026-10-18", &VisualOptions::default());
    let b = graph_for("2026-10-18", &VisualOptions::default());
    assert_eq!(a, b);
}

#[test]
fn side_artifacts_are_referenced_by_path() {
    let graph = graph_for("x", &VisualOptions::default());
    let files: Vec<PathBuf> = graph
        .stages()
        .iter()
        .flat_map(|s| s.referenced_files())
        .map(Path::to_path_buf)
        .collect();
    assert_eq!(
        files,
        vec![
            PathBuf::from("/work/title.txt"),
            PathBuf::from("/work/captions.srt")
        ]
    );
}

#[test]
fn title_window_follows_options() {
    let opts = VisualOptions {
        title_window_seconds: 2.25,
        ..VisualOptions::default()
    };
    let s = graph_for("x", &opts).to_filter_string().unwrap();
    assert_eq!(s.matches("enable='lt(t,2.25)'").count(), 2);
}

#[test]
fn title_file_is_trimmed_and_normalized() {
    let dir = std::env::temp_dir().join(format!("shortreel_title_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("title.txt");
    write_title_file(&path, "  Cash flow —\r\nbeats hustle \n").unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Cash flow —\nbeats hustle"
    );
}

#[test]
fn narrow_canvas_is_rejected_instead_of_full_width_panel() {
    for width in [0, 100, 140] {
        let err = build(
            Canvas {
                width,
                height: 1920,
            },
            Path::new("/work/title.txt"),
            Path::new("/work/captions.srt"),
            &Seed::new("x"),
            &VisualOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReelError::Validation(_)));
    }

    let graph = build(
        Canvas {
            width: 142,
            height: 256,
        },
        Path::new("/work/title.txt"),
        Path::new("/work/captions.srt"),
        &Seed::new("x"),
        &VisualOptions::default(),
    )
    .unwrap();
    assert!(graph.to_filter_string().unwrap().contains("drawbox=x=70:y=150:w=2:"));
}
