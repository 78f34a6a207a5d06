use crach_mocap_core::{
    config::DEFAULT_FRAME_INTERVAL, CaptureSource, Config, Session, SessionError,
};

fn session() -> Session {
    Session::new(Config::default()).expect("default session")
}

fn three_frame_json() -> String {
    crach_test_fixtures::CAPTURES.json("three-frame-root").expect("fixture")
}

#[test]
fn failed_load_keeps_capture_clock_and_selection() {
    let mut s = session();
    s.select_joint("Left_knee").unwrap();
    s.seek(0.5).unwrap();
    s.play();
    let before = s.state();

    let bad = crach_test_fixtures::MALFORMED.json("missing-joint-map").unwrap();
    let err = s.load_json(&bad).unwrap_err();
    assert!(matches!(err, SessionError::Capture(_)));
    assert!(s.load_json("not json").is_err());

    assert_eq!(s.state(), before);
    assert_eq!(s.selected_joint(), Some("Left_knee"));
    assert_eq!(s.source(), CaptureSource::Sample);
    assert_eq!(s.capture().frame_count(), 120);
}

#[test]
fn successful_load_resets_clock_and_clears_selection() {
    let mut s = session();
    s.set_speed(2.0).unwrap();
    s.select_joint("Head").unwrap();
    s.seek(0.75).unwrap();
    s.play();

    let state = s.load_json(&three_frame_json()).unwrap();
    assert_eq!(
        (state.frame_index, state.sub_frame, state.is_playing),
        (0, 0.0, false)
    );
    // Speed survives a capture swap.
    assert_eq!(state.speed, 2.0);
    assert_eq!(s.selected_joint(), None);
    assert_eq!(s.source(), CaptureSource::Uploaded);
    assert_eq!(s.clock().frame_count(), 3);
}

#[test]
fn load_value_accepts_parsed_documents() {
    let mut s = session();
    let doc: serde_json::Value = serde_json::from_str(&three_frame_json()).unwrap();
    s.load_value(doc).unwrap();
    assert_eq!(s.capture().frame_count(), 3);
}

#[test]
fn reset_to_sample_restores_demo() {
    let mut s = session();
    s.load_json(&three_frame_json()).unwrap();
    s.step_forward();
    let state = s.reset_to_sample();
    assert_eq!(state.frame_index, 0);
    assert_eq!(s.source(), CaptureSource::Sample);
    assert_eq!(s.capture().frame_count(), 120);
}

#[test]
fn driving_playback_moves_the_pose() {
    let mut s = session();
    s.load_json(&three_frame_json()).unwrap();
    s.play();
    s.tick(DEFAULT_FRAME_INTERVAL); // reference
    s.tick(DEFAULT_FRAME_INTERVAL * 0.5);

    let frame = s.current_frame();
    let x = frame.joint("Root").unwrap().position()[0];
    assert!((x - 0.5).abs() < 1e-4, "x={x}");

    s.pause();
    s.tick(10.0);
    let pose = s.pose(2.0);
    assert_eq!(pose.markers.len(), 1);
    assert!((pose.markers[0].position[0] - 1.0).abs() < 1e-3);
    // Only the Root joint exists, so no humanoid bone resolves.
    assert!(pose.bones.is_empty());
}

#[test]
fn sample_pose_resolves_all_bones() {
    let s = session();
    let pose = s.default_pose();
    assert_eq!(pose.markers.len(), 17);
    assert_eq!(pose.bones.len(), 16);
}

#[test]
fn invalid_control_inputs_are_rejected() {
    let mut s = session();
    let before = s.state();
    assert!(matches!(s.set_speed(0.0), Err(SessionError::Playback(_))));
    assert!(s.set_speed(-1.0).is_err());
    assert!(s.seek(f32::NAN).is_err());
    assert_eq!(s.state(), before);
}

#[test]
fn data_context_tracks_selection() {
    let mut s = session();
    s.load_json(&three_frame_json()).unwrap();
    s.seek_end();
    let text = s.data_context();
    assert!(text.contains("- Total frames: 3"));
    assert!(text.contains("### Root Joint"));

    s.select_joint("Root").unwrap();
    let text = s.data_context();
    assert!(text.contains("Selected joint: Root"));
    assert!(text.contains("- Rotation type: euler_xyz"));
    assert!(text.contains("- Speed: 1.00 units per frame"));
}
