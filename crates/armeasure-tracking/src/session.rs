use armeasure_anchor::{Anchor, AnchorSnapshot, SharedAnchorStore};
use armeasure_geometry::{CameraFrame, HitResult};
use armeasure_overlay::{status_message, ConfigError, DrawCommand, OverlayRenderer};

use crate::{
    config::{ClipPlanes, SessionConfig},
    error::TrackingError,
    provider::{select_hit, TrackingProvider},
};

/// What a call to [`MeasureSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new overlay was built.
    Rendered,
    /// The provider had no new frame, the previous overlay is kept.
    NoNewFrame,
    /// The provider failed to deliver a frame, the previous overlay is kept.
    FrameFailed,
    /// The session is not running.
    Stopped,
}

/// The per-frame measurement loop.
///
/// Each tick acquires a frame from the provider, refreshes the tracking status of the
/// anchors, hit-tests the screen center and rebuilds the overlay. The anchor list is a
/// [`SharedAnchorStore`], so input handlers on other threads can clear it while the
/// loop renders.
///
/// # Example
///
/// ```
/// use armeasure_geometry::Viewport;
/// use armeasure_tracking::{
///     MeasureSession, SessionConfig, SimulatedConfig, SimulatedProvider, TickOutcome,
/// };
///
/// let provider = SimulatedProvider::new(SimulatedConfig {
///     warmup_frames: 0,
///     ..SimulatedConfig::new(Viewport::new(1080, 2400)?)
/// });
/// let mut session = MeasureSession::new(provider, SessionConfig::default())?;
/// session.start()?;
///
/// assert_eq!(session.tick(), TickOutcome::Rendered);
/// assert!(session.can_add_anchor());
/// let anchor = session.add_anchor()?;
/// assert!(anchor.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MeasureSession<P: TrackingProvider> {
    provider: P,
    renderer: OverlayRenderer,
    clip: ClipPlanes,
    anchors: SharedAnchorStore,
    frame: Option<CameraFrame>,
    hit: Option<HitResult>,
    overlay: Vec<DrawCommand>,
    frames_rendered: u64,
}

impl<P: TrackingProvider> MeasureSession<P> {
    /// Create a session around a provider.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not validate.
    pub fn new(provider: P, config: SessionConfig) -> Result<Self, ConfigError> {
        config.clip.validate()?;
        Ok(Self {
            provider,
            renderer: OverlayRenderer::new(config.style)?,
            clip: config.clip,
            anchors: SharedAnchorStore::new(),
            frame: None,
            hit: None,
            overlay: Vec::new(),
            frames_rendered: 0,
        })
    }

    /// Start the provider.
    pub fn start(&mut self) -> Result<(), TrackingError> {
        self.provider.start()?;
        log::info!("measurement session started");
        Ok(())
    }

    /// Stop the provider.
    ///
    /// Anchors, the last overlay and its hit are kept, so the status message keeps
    /// describing the last rendered frame.
    pub fn stop(&mut self) {
        self.provider.stop();
        log::info!(
            "measurement session stopped after {} frames",
            self.frames_rendered
        );
    }

    /// Whether the provider is running.
    pub fn is_running(&self) -> bool {
        self.provider.is_running()
    }

    /// Advance the session by one display frame.
    ///
    /// Provider failures are logged and leave the previous overlay in place, they are
    /// never returned to the caller.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.provider.is_running() {
            return TickOutcome::Stopped;
        }

        let frame = match self.provider.current_frame(&self.clip) {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::debug!("no new camera frame, skipping render");
                return TickOutcome::NoNewFrame;
            }
            Err(err) => {
                log::warn!("failed to acquire camera frame, keeping last overlay: {err}");
                return TickOutcome::FrameFailed;
            }
        };

        self.refresh_anchor_tracking();

        self.hit = if frame.is_tracking() {
            let center = frame.screen_center();
            select_hit(&self.provider.hit_test(center.x, center.y))
        } else {
            None
        };
        let point_cloud = if frame.is_tracking() {
            self.provider.point_cloud()
        } else {
            None
        };

        let snapshot = self.anchors.snapshot();
        self.overlay = self.renderer.render(
            &frame,
            self.hit.as_ref(),
            snapshot.anchors(),
            point_cloud.as_ref(),
        );
        self.frame = Some(frame);
        self.frames_rendered += 1;

        log::debug!(
            "frame {}: {} commands, {} anchors, hit: {:?}",
            self.frames_rendered,
            self.overlay.len(),
            snapshot.anchors().len(),
            self.hit.map(|h| h.kind),
        );
        TickOutcome::Rendered
    }

    fn refresh_anchor_tracking(&self) {
        let snapshot = self.anchors.snapshot();
        for anchor in snapshot.anchors() {
            let state = self.provider.anchor_tracking_state(anchor);
            if state != anchor.tracking {
                // false when another thread cleared the store meanwhile
                self.anchors.set_tracking(anchor.id, state);
            }
        }
    }

    /// Whether an anchor can be placed, i.e. the session runs and a hit is selected.
    pub fn can_add_anchor(&self) -> bool {
        self.provider.is_running() && self.hit.is_some()
    }

    /// Place an anchor at the current hit.
    ///
    /// Returns `Ok(None)` without a current hit.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotRunning`] if the session is stopped, or the
    /// provider's error if it refuses the anchor.
    pub fn add_anchor(&mut self) -> Result<Option<Anchor>, TrackingError> {
        if !self.provider.is_running() {
            return Err(TrackingError::NotRunning);
        }
        let Some(hit) = self.hit else {
            log::debug!("no surface under the crosshair, nothing to anchor");
            return Ok(None);
        };

        let id = self.anchors.reserve_id();
        let anchor = match self.provider.create_anchor(id, &hit.pose) {
            Ok(anchor) => Anchor { id, ..anchor },
            Err(err) => {
                log::warn!("anchor creation rejected: {err}");
                return Err(err);
            }
        };
        self.anchors.insert(anchor);
        log::info!(
            "added {id} at ({:.3}, {:.3}, {:.3})",
            anchor.pose.tx(),
            anchor.pose.ty(),
            anchor.pose.tz()
        );
        Ok(Some(anchor))
    }

    /// Remove every anchor.
    pub fn clear_anchors(&self) {
        self.anchors.clear();
        log::info!("cleared all anchors");
    }

    /// A snapshot of the anchors in insertion order.
    pub fn anchors(&self) -> AnchorSnapshot {
        self.anchors.snapshot()
    }

    /// A handle to the anchor store for input handlers on other threads.
    pub fn anchor_store(&self) -> SharedAnchorStore {
        self.anchors.clone()
    }

    /// The draw commands of the last rendered frame.
    pub fn overlay(&self) -> &[DrawCommand] {
        &self.overlay
    }

    /// The status line of the last rendered frame, `None` before the first frame.
    pub fn status_message(&self) -> Option<&str> {
        let frame = self.frame.as_ref()?;
        Some(status_message(
            self.renderer.style(),
            frame,
            self.hit.as_ref(),
        ))
    }

    /// The hit selected at the screen center in the last rendered frame.
    pub fn current_hit(&self) -> Option<&HitResult> {
        self.hit.as_ref()
    }

    /// The last rendered camera frame.
    pub fn last_frame(&self) -> Option<&CameraFrame> {
        self.frame.as_ref()
    }

    /// The number of frames rendered since the session was created.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Get as reference the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Get as mutable reference the provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}
