use super::sampler::{FeatureSampler, SampleReport};
use crate::engine::SceneHost;
use crate::engine::layers::{DrawEntity, LayerId};
use crate::engine::viewport::{InputChannel, InputHandle, resolve_world_position};
use bevy::log::{debug, info, warn};
use bevy::math::{DVec2, DVec3};
use constants::selection::PREVIEW_POLYGON_ID;

/// Session inputs, already translated from raw pointer and key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawInput {
    /// Left click: project the pixel and append a vertex.
    ConfirmPoint(DVec2),
    /// Pointer move: update the unconfirmed preview vertex.
    MovePointer(DVec2),
    /// Right click or double click.
    Finish,
    /// Escape key.
    Cancel,
}

/// Why a session ended without a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Escape,
    InsufficientVertices { confirmed: usize },
    Deactivated,
}

impl CancelReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Escape => "escape",
            Self::InsufficientVertices { .. } => "insufficient_vertices",
            Self::Deactivated => "deactivated",
        }
    }
}

/// Result of feeding one input to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// No session in progress.
    Ignored,
    VertexAdded { count: usize, position: DVec3 },
    /// Confirm click did not hit the globe.
    VertexMissed,
    PointerMoved,
    Finished {
        vertices: Vec<DVec3>,
        report: SampleReport,
    },
    Cancelled(CancelReason),
}

/// Input registrations held for the lifetime of one session.
#[derive(Debug, Clone, Copy)]
struct InputLease {
    pointer: InputHandle,
    keyboard: InputHandle,
}

impl InputLease {
    fn acquire<H: SceneHost + ?Sized>(host: &mut H) -> Self {
        Self {
            pointer: host.acquire_input(InputChannel::Pointer),
            keyboard: host.acquire_input(InputChannel::Keyboard),
        }
    }

    fn release<H: SceneHost + ?Sized>(self, host: &mut H) {
        host.release_input(self.pointer);
        host.release_input(self.keyboard);
    }
}

/// State of one drawing session, created on start and dropped on exit.
#[derive(Debug)]
pub struct DrawingSession {
    layer: LayerId,
    lease: InputLease,
    vertices: Vec<DVec3>,
    moving: Option<DVec3>,
}

impl DrawingSession {
    /// Confirmed vertices in click order.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn moving_vertex(&self) -> Option<DVec3> {
        self.moving
    }

    /// Outline for the live preview: confirmed vertices plus the moving one,
    /// or `None` while fewer than three points are available.
    pub fn preview_positions(&self) -> Option<Vec<DVec3>> {
        let mut positions = self.vertices.clone();
        if let Some(moving) = self.moving {
            if !positions.is_empty() {
                positions.push(moving);
            }
        }
        (positions.len() >= 3).then_some(positions)
    }
}

/// Interactive polygon drawing: Idle → Drawing → Finished, with a Cancelled
/// exit back to Idle.
///
/// The tool owns one layer while drawing. It is created on first use,
/// cleared when a new session starts and removed on every exit path.
#[derive(Debug)]
pub struct PolygonTool {
    layer_name: String,
    min_vertices: usize,
    layer: Option<LayerId>,
    session: Option<DrawingSession>,
}

impl PolygonTool {
    pub fn new(layer_name: impl Into<String>, min_vertices: usize) -> Self {
        Self {
            layer_name: layer_name.into(),
            min_vertices,
            layer: None,
            session: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DrawingSession> {
        self.session.as_ref()
    }

    /// Idle → Drawing. A session already in progress is replaced: its input
    /// registrations are released before new ones are taken.
    pub fn start<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(previous) = self.session.take() {
            debug!("[SELECT] replacing session with {} vertices", previous.vertices.len());
            previous.lease.release(host);
        }

        let layer = match self.layer {
            Some(layer) => {
                host.clear_layer(layer);
                layer
            }
            None => {
                let layer = host.create_layer(&self.layer_name);
                self.layer = Some(layer);
                layer
            }
        };

        host.suppress_default_double_click();
        let lease = InputLease::acquire(host);

        self.session = Some(DrawingSession {
            layer,
            lease,
            vertices: Vec::new(),
            moving: None,
        });
        info!("[SELECT] drawing started on layer '{}'", self.layer_name);
    }

    pub fn handle_input<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        sampler: &FeatureSampler,
        input: DrawInput,
    ) -> DrawOutcome {
        let Some(session) = self.session.as_mut() else {
            return DrawOutcome::Ignored;
        };

        match input {
            DrawInput::ConfirmPoint(pixel) => {
                let Some(position) = resolve_world_position(&*host, pixel) else {
                    debug!("[SELECT] confirm at {pixel:?} missed the globe");
                    return DrawOutcome::VertexMissed;
                };
                session.vertices.push(position);
                let count = session.vertices.len();
                host.add_entity(session.layer, DrawEntity::vertex_marker(position, count));
                Self::refresh_preview(host, session);
                debug!("[SELECT] vertex {count} at {position:?}");
                DrawOutcome::VertexAdded { count, position }
            }
            DrawInput::MovePointer(pixel) => {
                session.moving = resolve_world_position(&*host, pixel);
                Self::refresh_preview(host, session);
                DrawOutcome::PointerMoved
            }
            DrawInput::Finish => self.finish(host, sampler),
            DrawInput::Cancel => {
                self.teardown(host);
                info!("[SELECT] drawing cancelled");
                DrawOutcome::Cancelled(CancelReason::Escape)
            }
        }
    }

    /// Drawing → Finished, or → Cancelled when too few vertices were confirmed.
    /// Teardown happens on both paths.
    fn finish<H: SceneHost + ?Sized>(&mut self, host: &mut H, sampler: &FeatureSampler) -> DrawOutcome {
        let confirmed = self.session.as_ref().map_or(0, |s| s.vertices.len());
        if confirmed < self.min_vertices {
            self.teardown(host);
            warn!(
                "[SELECT] finish with {confirmed} vertices (need {}), discarding",
                self.min_vertices
            );
            return DrawOutcome::Cancelled(CancelReason::InsufficientVertices { confirmed });
        }

        let vertices = self
            .session
            .as_ref()
            .map(|s| s.vertices.clone())
            .unwrap_or_default();
        let report = sampler.sample(host, &vertices);
        self.teardown(host);

        DrawOutcome::Finished { vertices, report }
    }

    /// Releases input registrations and removes the drawing layer. Safe to
    /// call in any state.
    pub fn teardown<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(session) = self.session.take() {
            session.lease.release(host);
        }
        if let Some(layer) = self.layer.take() {
            host.clear_layer(layer);
            host.remove_layer(layer);
        }
    }

    fn refresh_preview<H: SceneHost + ?Sized>(host: &mut H, session: &DrawingSession) {
        match session.preview_positions() {
            Some(positions) => host.add_entity(session.layer, DrawEntity::preview_polygon(positions)),
            None => {
                host.remove_entity(session.layer, PREVIEW_POLYGON_ID);
            }
        }
    }
}
