use armeasure_anchor::AnchorStore;
use armeasure_geometry::{
    perspective_projection, CameraFrame, GeometryError, HitKind, HitResult, PointCloud, Pose,
    ScreenPoint, TrackingState, Vec3, Viewport,
};
use armeasure_overlay::{render, DrawCommand, OverlayStyle};

/// A phone held upright three meters in front of the origin, looking down -Z.
fn frame_facing_origin(camera_x: f32) -> Result<CameraFrame, GeometryError> {
    let viewport = Viewport::new(1080, 2400)?;
    let projection =
        perspective_projection(60f32.to_radians(), viewport.aspect_ratio(), 0.1, 100.0)?;
    Ok(CameraFrame::from_camera_pose(
        &Pose::from_xyz(camera_x, 0.0, 3.0),
        projection,
        TrackingState::Tracking,
        viewport,
    ))
}

fn lines(commands: &[DrawCommand]) -> Vec<(ScreenPoint, ScreenPoint)> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { start, end, .. } => Some((*start, *end)),
            _ => None,
        })
        .collect()
}

fn labels(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn two_anchors_one_meter_apart() -> Result<(), GeometryError> {
    let frame = frame_facing_origin(0.5)?;
    let mut store = AnchorStore::new();
    store.append(Pose::from_xyz(0.0, 0.0, 0.0));
    store.append(Pose::from_xyz(1.0, 0.0, 0.0));

    let commands = render(&frame, None, store.anchors(), None);

    let lines = lines(&commands);
    assert_eq!(lines.len(), 1);
    assert_eq!(labels(&commands), vec!["100.0 cm".to_string()]);

    // the label sits above the midpoint of the segment
    let (start, end) = lines[0];
    let mid = start.midpoint(&end);
    let position = commands.iter().find_map(|c| match c {
        DrawCommand::Text { position, .. } => Some(*position),
        _ => None,
    });
    assert_eq!(position, Some(mid.offset(0.0, -20.0)));
    Ok(())
}

#[test]
fn anchor_behind_camera_skips_the_pair() -> Result<(), GeometryError> {
    let frame = frame_facing_origin(0.5)?;
    let mut store = AnchorStore::new();
    store.append(Pose::from_xyz(0.0, 0.0, 0.0));
    store.append(Pose::from_xyz(0.5, 0.0, 4.0));

    let commands = render(&frame, None, store.anchors(), None);
    assert!(lines(&commands).is_empty());
    assert!(labels(&commands).is_empty());

    // only the visible anchor gets a marker: fill + ring, plus the crosshair ring + dot
    let circles = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { .. }))
        .count();
    assert_eq!(circles, 4);
    Ok(())
}

#[test]
fn lost_anchor_is_skipped_and_neighbours_connect() -> Result<(), GeometryError> {
    let frame = frame_facing_origin(0.5)?;
    let mut store = AnchorStore::new();
    store.append(Pose::from_xyz(0.0, 0.0, 0.0));
    let lost = store.append(Pose::from_xyz(0.5, 0.5, 0.0));
    store.append(Pose::from_xyz(1.0, 0.0, 0.0));
    store.set_tracking(lost, TrackingState::Paused);

    let commands = render(&frame, None, store.anchors(), None);
    assert_eq!(lines(&commands).len(), 1);
    assert_eq!(labels(&commands), vec!["100.0 cm".to_string()]);

    store.set_tracking(lost, TrackingState::Tracking);
    let commands = render(&frame, None, store.anchors(), None);
    assert_eq!(lines(&commands).len(), 2);
    Ok(())
}

#[test]
fn live_measurement_uses_hit_pose() -> Result<(), GeometryError> {
    let frame = frame_facing_origin(0.5)?;
    let mut store = AnchorStore::new();
    store.append(Pose::from_xyz(0.0, 0.0, 0.0));
    store.append(Pose::from_xyz(1.0, 0.0, 0.0));
    let hit = HitResult::new(Pose::from_xyz(1.0, 0.0, 0.5), HitKind::EstimatedPoint);

    let commands = render(&frame, Some(&hit), store.anchors(), None);
    let lines = lines(&commands);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].1, frame.screen_center());
    assert_eq!(
        labels(&commands),
        vec!["100.0 cm".to_string(), "50.0 cm".to_string()]
    );
    Ok(())
}

#[test]
fn plane_outline_gap_is_not_restitched() -> Result<(), GeometryError> {
    // the camera plane z = 0.02 cuts the 5 cm hit circle: samples 2..=10 lie behind it
    let viewport = Viewport::new(1080, 2400)?;
    let projection =
        perspective_projection(60f32.to_radians(), viewport.aspect_ratio(), 0.1, 100.0)?;
    let frame = CameraFrame::from_camera_pose(
        &Pose::from_xyz(0.0, 0.5, 0.02),
        projection,
        TrackingState::Tracking,
        viewport,
    );
    let hit = HitResult::new(Pose::IDENTITY, HitKind::Plane);

    let commands = render(&frame, Some(&hit), &[], None);
    // segment 0-1 and segments 11-12 .. 23-24, nothing joins sample 1 to sample 11
    assert_eq!(lines(&commands).len(), 14);
    Ok(())
}

#[test]
fn live_line_skipped_when_last_anchor_is_behind() -> Result<(), GeometryError> {
    let frame = frame_facing_origin(0.5)?;
    let hit = HitResult::new(Pose::from_xyz(0.5, 0.0, 0.0), HitKind::EstimatedPoint);

    let mut store = AnchorStore::new();
    store.append(Pose::from_xyz(0.0, 0.0, 0.0));
    store.append(Pose::from_xyz(0.5, 0.0, 4.0));
    let commands = render(&frame, Some(&hit), store.anchors(), None);
    assert!(lines(&commands).is_empty());
    assert!(labels(&commands).is_empty());

    // with the visible anchor last the live measurement comes back
    let mut store = AnchorStore::new();
    store.append(Pose::from_xyz(0.5, 0.0, 4.0));
    store.append(Pose::from_xyz(0.0, 0.0, 0.0));
    let commands = render(&frame, Some(&hit), store.anchors(), None);
    let lines = lines(&commands);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].1, frame.screen_center());
    assert_eq!(labels(&commands), vec!["50.0 cm".to_string()]);
    Ok(())
}

#[test]
fn point_cloud_behind_camera_is_skipped() -> Result<(), GeometryError> {
    let frame = frame_facing_origin(0.0)?;
    // every 15th sample is drawn: sample 0 in front of the camera, sample 15 behind it
    let buffer: Vec<f32> = (0..30)
        .flat_map(|i| {
            let z = if i < 15 { 0.0 } else { 5.0 };
            [i as f32 * 0.001, 0.0, z, 1.0]
        })
        .collect();
    let cloud = PointCloud::from_xyzc(&buffer);
    let color = OverlayStyle::default().point_cloud.color;

    let commands = render(&frame, None, &[], Some(&cloud));
    let dots: Vec<ScreenPoint> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle { center, color: c, .. } if *c == color => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(dots.len(), 1);
    assert_eq!(Some(dots[0]), frame.project_point(Vec3::ZERO));
    Ok(())
}
