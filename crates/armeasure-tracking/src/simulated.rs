use std::collections::HashMap;

use armeasure_anchor::{Anchor, AnchorId};
use armeasure_geometry::{
    distance, perspective_projection, CameraFrame, HitKind, HitResult, PointCloud,
    PointCloudSample, Pose, ScreenPoint, TrackingState, Vec3, Viewport,
};

use crate::{config::ClipPlanes, error::TrackingError, provider::TrackingProvider};

/// Scene and camera path of a [`SimulatedProvider`].
///
/// The scene is an infinite floor at `y = 0` with a detected plane patch of
/// `plane_radius` around the origin. The camera circles the origin at a fixed height
/// while looking at a point that leads it on a smaller circle, so the screen center
/// sweeps the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedConfig {
    /// Size of the rendering surface.
    pub viewport: Viewport,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Radius of the camera orbit in meters.
    pub orbit_radius: f32,
    /// Height of the camera above the floor in meters.
    pub camera_height: f32,
    /// Orbit angle advanced per frame in radians.
    pub angular_step: f32,
    /// Number of initial frames reported as not tracking.
    pub warmup_frames: u64,
    /// Frame indices whose acquisition fails.
    pub failing_frames: Vec<u64>,
    /// Frame indices that deliver no new frame.
    pub stale_frames: Vec<u64>,
    /// Radius around the origin where hits are classified as plane hits.
    pub plane_radius: f32,
    /// Anchors farther than this from the camera are reported as paused.
    pub tracking_range: f32,
    /// Number of feature points per side of the point cloud grid.
    pub grid_size: usize,
}

impl SimulatedConfig {
    /// Create the default scene for a viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            fov_y: 60f32.to_radians(),
            orbit_radius: 1.5,
            camera_height: 1.2,
            angular_step: 0.02,
            warmup_frames: 5,
            failing_frames: Vec::new(),
            stale_frames: Vec::new(),
            plane_radius: 2.0,
            tracking_range: 5.0,
            grid_size: 30,
        }
    }
}

/// A deterministic [`TrackingProvider`] following a scripted camera path.
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    config: SimulatedConfig,
    running: bool,
    frame_index: u64,
    camera: Option<Pose>,
    frame: Option<CameraFrame>,
    anchors: HashMap<AnchorId, Pose>,
}

impl SimulatedProvider {
    /// Create a stopped provider.
    pub fn new(config: SimulatedConfig) -> Self {
        Self {
            config,
            running: false,
            frame_index: 0,
            camera: None,
            frame: None,
            anchors: HashMap::new(),
        }
    }

    /// The scene configuration.
    pub fn config(&self) -> &SimulatedConfig {
        &self.config
    }

    /// The index of the next frame to be acquired.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// The camera pose of a frame.
    pub fn camera_pose(&self, frame_index: u64) -> Result<Pose, TrackingError> {
        let angle = frame_index as f32 * self.config.angular_step;
        let radius = self.config.orbit_radius;
        let eye = Vec3::new(
            radius * angle.cos(),
            self.config.camera_height,
            radius * angle.sin(),
        );
        let lead = angle + 0.8;
        let target = Vec3::new(0.6 * radius * lead.cos(), 0.0, 0.6 * radius * lead.sin());
        Ok(Pose::look_at(eye, target, Vec3::Y)?)
    }

    fn is_tracking(&self) -> bool {
        self.frame.is_some_and(|f| f.is_tracking())
    }
}

impl TrackingProvider for SimulatedProvider {
    fn start(&mut self) -> Result<(), TrackingError> {
        if !self.running {
            self.running = true;
            log::debug!("simulated provider started at frame {}", self.frame_index);
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
        self.camera = None;
        self.frame = None;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn current_frame(&mut self, clip: &ClipPlanes) -> Result<Option<CameraFrame>, TrackingError> {
        if !self.running {
            return Err(TrackingError::NotRunning);
        }
        let index = self.frame_index;
        self.frame_index += 1;

        if self.config.failing_frames.contains(&index) {
            return Err(TrackingError::FrameUnavailable(format!(
                "simulated drop of frame {index}"
            )));
        }
        if self.config.stale_frames.contains(&index) {
            return Ok(None);
        }

        let camera = self.camera_pose(index)?;
        let viewport = self.config.viewport;
        let projection = perspective_projection(
            self.config.fov_y,
            viewport.aspect_ratio(),
            clip.near,
            clip.far,
        )?;
        let tracking = if index < self.config.warmup_frames {
            TrackingState::NotTracking
        } else {
            TrackingState::Tracking
        };

        let frame = CameraFrame::from_camera_pose(&camera, projection, tracking, viewport);
        self.camera = Some(camera);
        self.frame = Some(frame);
        Ok(Some(frame))
    }

    fn hit_test(&self, x: f32, y: f32) -> Vec<HitResult> {
        let Some(frame) = self.frame.filter(|f| f.is_tracking()) else {
            return Vec::new();
        };
        let Some(ray) = frame.ray_from_screen(ScreenPoint::new(x, y)) else {
            return Vec::new();
        };
        let Some(t) = ray.intersect_plane(Vec3::ZERO, Vec3::Y) else {
            return Vec::new();
        };

        let pose = Pose::from_translation(ray.at(t));
        let mut hits = vec![HitResult::new(pose, HitKind::EstimatedPoint)];
        let on_plane = Vec3::new(pose.tx(), 0.0, pose.tz()).length() <= self.config.plane_radius;
        if on_plane {
            hits.push(HitResult::new(pose, HitKind::Plane));
        }
        hits
    }

    fn create_anchor(&mut self, id: AnchorId, pose: &Pose) -> Result<Anchor, TrackingError> {
        if !self.running {
            return Err(TrackingError::NotRunning);
        }
        if !self.is_tracking() {
            return Err(TrackingError::AnchorRejected(
                "camera is not tracking".to_string(),
            ));
        }
        if !pose.translation().is_finite() {
            return Err(TrackingError::AnchorRejected(format!(
                "non finite position {:?}",
                pose.translation()
            )));
        }
        self.anchors.insert(id, *pose);
        Ok(Anchor::new(id, *pose))
    }

    fn point_cloud(&self) -> Option<PointCloud> {
        if !self.is_tracking() || self.config.grid_size == 0 {
            return None;
        }
        let n = self.config.grid_size;
        let extent = self.config.plane_radius;
        let step = if n > 1 {
            2.0 * extent / (n - 1) as f32
        } else {
            0.0
        };

        let samples = (0..n * n)
            .map(|i| {
                let (row, col) = (i / n, i % n);
                let x = -extent + col as f32 * step;
                let z = -extent + row as f32 * step;
                PointCloudSample {
                    position: Vec3::new(x, 0.0, z),
                    confidence: if (row + col) % 2 == 0 { 0.9 } else { 0.4 },
                }
            })
            .collect();
        Some(PointCloud::new(samples))
    }

    fn anchor_tracking_state(&self, anchor: &Anchor) -> TrackingState {
        let Some(pose) = self.anchors.get(&anchor.id) else {
            return TrackingState::NotTracking;
        };
        let range = self.config.tracking_range;
        match self.camera {
            Some(camera) if self.running && distance(&camera, pose) <= range => {
                TrackingState::Tracking
            }
            _ => TrackingState::Paused,
        }
    }
}
