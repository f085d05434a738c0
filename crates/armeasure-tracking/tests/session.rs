use armeasure_anchor::{Anchor, AnchorId};
use armeasure_geometry::{
    distance, format_distance_cm, perspective_projection, CameraFrame, HitResult, PointCloud,
    Pose, TrackingState, Viewport,
};
use armeasure_overlay::{CircleStyle, DrawCommand};
use armeasure_tracking::{
    ClipPlanes, MeasureSession, SessionConfig, SimulatedConfig, SimulatedProvider, TickOutcome,
    TrackingError, TrackingProvider,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn simulated(
    config: impl FnOnce(&mut SimulatedConfig),
) -> Result<SimulatedProvider, TrackingError> {
    let mut scene = SimulatedConfig::new(Viewport::new(1080, 2400)?);
    scene.warmup_frames = 0;
    config(&mut scene);
    Ok(SimulatedProvider::new(scene))
}

fn started<P: TrackingProvider>(
    provider: P,
) -> Result<MeasureSession<P>, Box<dyn std::error::Error>> {
    let mut session = MeasureSession::new(provider, SessionConfig::default())?;
    session.start()?;
    Ok(session)
}

fn solid_lines(commands: &[DrawCommand]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { dash: None, .. }))
        .count()
}

fn labels(commands: &[DrawCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn markers(commands: &[DrawCommand]) -> usize {
    commands
        .iter()
        .filter(|c| {
            matches!(
                c,
                DrawCommand::Circle {
                    style: CircleStyle::Fill,
                    radius,
                    ..
                } if *radius == 16.0
            )
        })
        .count()
}

#[test]
fn warmup_shows_only_status() -> TestResult {
    let mut session = started(simulated(|c| c.warmup_frames = 3)?)?;
    assert_eq!(session.status_message(), None);

    assert_eq!(session.tick(), TickOutcome::Rendered);
    assert_eq!(
        session.overlay(),
        &[DrawCommand::StatusText {
            text: "Initializing AR...".to_string()
        }]
    );
    assert_eq!(session.status_message(), Some("Initializing AR..."));
    assert!(!session.can_add_anchor());
    assert!(session.add_anchor()?.is_none());
    assert!(session.anchors().anchors().is_empty());
    Ok(())
}

#[test]
fn locks_on_the_floor() -> TestResult {
    let mut session = started(simulated(|_| {})?)?;
    assert_eq!(session.tick(), TickOutcome::Rendered);
    assert_eq!(session.status_message(), Some("Locked"));
    assert!(session.current_hit().is_some_and(|h| h.is_plane()));
    assert!(session.can_add_anchor());
    Ok(())
}

#[test]
fn measures_between_two_anchors() -> TestResult {
    let mut session = started(simulated(|_| {})?)?;

    session.tick();
    let first = session.add_anchor()?.ok_or("no hit for the first anchor")?;
    for _ in 0..10 {
        session.tick();
    }
    let second = session.add_anchor()?.ok_or("no hit for the second anchor")?;
    assert!(second.id > first.id);

    assert_eq!(session.tick(), TickOutcome::Rendered);
    let overlay = session.overlay();
    assert_eq!(solid_lines(overlay), 1);
    assert_eq!(markers(overlay), 2);

    let expected = format_distance_cm(distance(&first.pose, &second.pose));
    assert_eq!(labels(overlay).first().copied(), Some(expected.as_str()));
    // the live label follows the measurement label
    assert_eq!(labels(overlay).len(), 2);
    Ok(())
}

#[test]
fn failed_and_stale_frames_keep_overlay() -> TestResult {
    let mut session = started(simulated(|c| {
        c.failing_frames = vec![1];
        c.stale_frames = vec![2];
    })?)?;

    assert_eq!(session.tick(), TickOutcome::Rendered);
    let before = session.overlay().to_vec();

    assert_eq!(session.tick(), TickOutcome::FrameFailed);
    assert_eq!(session.overlay(), before.as_slice());
    assert_eq!(session.tick(), TickOutcome::NoNewFrame);
    assert_eq!(session.overlay(), before.as_slice());
    assert_eq!(session.frames_rendered(), 1);

    assert_eq!(session.tick(), TickOutcome::Rendered);
    assert_eq!(session.frames_rendered(), 2);
    Ok(())
}

#[test]
fn anchors_out_of_range_are_skipped_not_removed() -> TestResult {
    let mut session = started(simulated(|c| c.tracking_range = 0.5)?)?;
    session.tick();
    assert!(session.add_anchor()?.is_some());

    session.tick();
    let snapshot = session.anchors();
    assert_eq!(snapshot.anchors().len(), 1);
    assert_eq!(snapshot.anchors()[0].tracking, TrackingState::Paused);
    assert_eq!(snapshot.active_anchors().count(), 0);
    assert_eq!(markers(session.overlay()), 0);
    Ok(())
}

#[test]
fn clear_from_input_thread() -> TestResult {
    let mut session = started(simulated(|_| {})?)?;
    session.tick();
    session.add_anchor()?;
    session.tick();
    session.add_anchor()?;
    assert_eq!(session.anchors().anchors().len(), 2);

    let store = session.anchor_store();
    let input = std::thread::spawn(move || store.clear());
    assert!(input.join().is_ok());

    session.tick();
    assert!(session.anchors().anchors().is_empty());
    assert_eq!(solid_lines(session.overlay()), 0);
    assert_eq!(markers(session.overlay()), 0);
    Ok(())
}

#[test]
fn stopped_session() -> TestResult {
    let mut session = started(simulated(|_| {})?)?;
    session.tick();
    session.stop();

    // the status still describes the last overlay
    let shown = session.overlay().iter().find_map(|c| match c {
        DrawCommand::StatusText { text } => Some(text.as_str()),
        _ => None,
    });
    assert_eq!(shown, Some("Locked"));
    assert_eq!(session.status_message(), shown);

    assert!(!session.is_running());
    assert_eq!(session.tick(), TickOutcome::Stopped);
    assert!(!session.can_add_anchor());
    assert!(matches!(
        session.add_anchor(),
        Err(TrackingError::NotRunning)
    ));
    Ok(())
}

/// A provider with a fixed camera and scripted hit results.
struct ScriptedProvider {
    running: bool,
    hits: Vec<HitResult>,
    reject_anchors: bool,
    created: Vec<AnchorId>,
}

impl TrackingProvider for ScriptedProvider {
    fn start(&mut self) -> Result<(), TrackingError> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn current_frame(&mut self, clip: &ClipPlanes) -> Result<Option<CameraFrame>, TrackingError> {
        let viewport = Viewport::new(640, 480)?;
        let projection =
            perspective_projection(1.0, viewport.aspect_ratio(), clip.near, clip.far)?;
        Ok(Some(CameraFrame::from_camera_pose(
            &Pose::from_xyz(0.0, 0.0, 2.0),
            projection,
            TrackingState::Tracking,
            viewport,
        )))
    }

    fn hit_test(&self, _x: f32, _y: f32) -> Vec<HitResult> {
        self.hits.clone()
    }

    fn create_anchor(&mut self, id: AnchorId, pose: &Pose) -> Result<Anchor, TrackingError> {
        if self.reject_anchors {
            return Err(TrackingError::AnchorRejected("scripted".to_string()));
        }
        self.created.push(id);
        Ok(Anchor::new(id, *pose))
    }

    fn point_cloud(&self) -> Option<PointCloud> {
        None
    }

    fn anchor_tracking_state(&self, anchor: &Anchor) -> TrackingState {
        if self.created.contains(&anchor.id) {
            TrackingState::Tracking
        } else {
            TrackingState::NotTracking
        }
    }
}

#[test]
fn searching_without_hit() -> TestResult {
    let mut session = started(ScriptedProvider {
        running: false,
        hits: Vec::new(),
        reject_anchors: false,
        created: Vec::new(),
    })?;
    session.tick();
    assert_eq!(session.status_message(), Some("Move to find a surface"));
    assert!(!session.can_add_anchor());
    assert!(session.add_anchor()?.is_none());
    Ok(())
}

#[test]
fn rejected_anchor_is_not_stored() -> TestResult {
    use armeasure_geometry::HitKind;

    let mut session = started(ScriptedProvider {
        running: false,
        hits: vec![HitResult::new(Pose::IDENTITY, HitKind::EstimatedPoint)],
        reject_anchors: true,
        created: Vec::new(),
    })?;
    session.tick();
    assert_eq!(session.status_message(), Some("Locked"));
    assert!(matches!(
        session.add_anchor(),
        Err(TrackingError::AnchorRejected(_))
    ));
    assert!(session.anchors().anchors().is_empty());
    Ok(())
}

#[test]
fn provider_sees_the_store_ids() -> TestResult {
    use armeasure_geometry::HitKind;

    let mut session = started(ScriptedProvider {
        running: false,
        hits: vec![HitResult::new(Pose::IDENTITY, HitKind::Plane)],
        reject_anchors: false,
        created: Vec::new(),
    })?;
    session.tick();
    let first = session.add_anchor()?.ok_or("no anchor")?;
    let second = session.add_anchor()?.ok_or("no anchor")?;
    assert_eq!(session.provider().created, vec![first.id, second.id]);

    // both anchors sit on the same pose, tracking is still resolved per id
    session.provider_mut().created.retain(|id| *id != first.id);
    session.tick();
    let snapshot = session.anchors();
    let states: Vec<_> = snapshot.anchors().iter().map(|a| (a.id, a.tracking)).collect();
    assert_eq!(
        states,
        vec![
            (first.id, TrackingState::NotTracking),
            (second.id, TrackingState::Tracking)
        ]
    );
    Ok(())
}
