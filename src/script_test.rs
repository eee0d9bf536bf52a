#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_hands_signals_and_gaps() {
    let text = r#"
# warm-up
{"t": 0, "signal": {"type": "portal_source_selected", "name": "nebula.mp4"}}
{"t": 33, "hand": {"x": 0.25, "y": 0.75}}

{"t": 66, "hand": null}
{"t": 900, "signal": {"type": "grow_pressed"}}
"#;
    let script = Script::parse(text).unwrap();
    assert_eq!(script.samples().len(), 2);
    assert_eq!(script.samples()[0].output, TrackerOutput::Fingertip(Landmark::new(0.25, 0.75)));
    assert_eq!(script.samples()[1].output, TrackerOutput::NoHand);
    assert_eq!(script.signals()[0].signal, Signal::PortalSourceSelected { name: "nebula.mp4".into() });
    assert_eq!(script.signals()[1].signal, Signal::GrowPressed);
    assert_eq!(script.duration_ms(), 900.0);
}

#[test]
fn events_are_sorted_by_time() {
    let text = "{\"t\": 200, \"hand\": null}\n{\"t\": 100, \"hand\": {\"x\": 0.5, \"y\": 0.5}}\n";
    let script = Script::parse(text).unwrap();
    assert_eq!(script.samples()[0].t_ms, 100.0);
    assert_eq!(script.samples()[1].t_ms, 200.0);
}

#[test]
fn out_of_range_landmark_is_kept_for_the_session() {
    let script = Script::parse(r#"{"t": 0, "hand": {"x": 1.5, "y": 0.5}}"#).unwrap();
    let TrackerOutput::Fingertip(landmark) = script.samples()[0].output else {
        panic!("expected a fingertip");
    };
    assert!(landmark.validate().is_err());
}

#[test]
fn missing_coordinate_is_kept_for_the_session() {
    let script = Script::parse(r#"{"t": 0, "hand": {"x": 0.5}}"#).unwrap();
    let TrackerOutput::Fingertip(landmark) = script.samples()[0].output else {
        panic!("expected a fingertip");
    };
    assert_eq!(landmark.y, None);
}

#[test]
fn bad_line_reports_its_number() {
    let text = "{\"t\": 0, \"hand\": null}\n\nnot json\n";
    let err = Script::parse(text).unwrap_err();
    assert_eq!(err.line, 3);
    assert!(err.to_string().starts_with("script line 3:"));
}

#[test]
fn line_without_hand_or_signal_is_rejected() {
    let err = Script::parse("{\"t\": 0, \"hand\": null}\n{\"t\": 5}\n").unwrap_err();
    assert_eq!(err.line, 2);
}

#[test]
fn unknown_signal_is_rejected() {
    assert!(Script::parse(r#"{"t": 0, "signal": {"type": "explode"}}"#).is_err());
}

#[test]
fn empty_script_has_zero_duration() {
    let script = Script::parse("\n# nothing\n").unwrap();
    assert!(script.samples().is_empty());
    assert_eq!(script.duration_ms(), 0.0);
}

#[tokio::test]
async fn missing_file_is_source_unavailable() {
    let err = Script::open(Path::new("/nonexistent/portal-script.jsonl")).await.unwrap_err();
    assert!(matches!(err, SourceError::Io(_)));
}

// =============================================================
// Synthetic trace
// =============================================================

#[test]
fn synthetic_trace_has_hand_between_gaps() {
    let script = Script::synthetic(SyntheticParams::default());
    let samples = script.samples();
    assert_eq!(samples.first().map(|s| s.output), Some(TrackerOutput::NoHand));
    assert_eq!(samples.last().map(|s| s.output), Some(TrackerOutput::NoHand));
    let hands = samples.iter().filter(|s| matches!(s.output, TrackerOutput::Fingertip(_))).count();
    assert!(hands > 50, "hands {hands}");
}

#[test]
fn synthetic_landmarks_are_valid_and_round() {
    let p = SyntheticParams::default();
    let script = Script::synthetic(p);
    for sample in script.samples() {
        if let TrackerOutput::Fingertip(landmark) = sample.output {
            let (nx, ny) = landmark.validate().unwrap();
            let dx = nx * p.source_width - p.source_width * 0.5;
            let dy = ny * p.source_height - p.source_height * 0.5;
            let r = dx.hypot(dy);
            assert!((r - p.radius_px).abs() <= p.jitter_px * 1.5, "r {r}");
        }
    }
}

#[test]
fn synthetic_grow_is_held_after_the_hand_leaves() {
    let script = Script::synthetic(SyntheticParams::default());
    let leave = script.samples().last().map_or(0.0, |s| s.t_ms);
    let signals = script.signals();
    assert_eq!(signals.len(), 2);
    assert_eq!(signals[0].signal, Signal::GrowPressed);
    assert_eq!(signals[1].signal, Signal::GrowReleased);
    assert!(signals[0].t_ms > leave);
    assert_eq!(signals[1].t_ms - signals[0].t_ms, 1000.0);
    assert_eq!(script.duration_ms(), signals[1].t_ms);
}

#[test]
fn synthetic_is_deterministic_per_seed() {
    let a = Script::synthetic(SyntheticParams::default());
    let b = Script::synthetic(SyntheticParams::default());
    let c = Script::synthetic(SyntheticParams { seed: 99, ..SyntheticParams::default() });
    assert_eq!(a.samples(), b.samples());
    assert_ne!(a.samples(), c.samples());
}
