use super::entity_query;
use super::framing::{self, FramingOutcome, SubdistrictRecord};
use super::polygon::{CancelReason, DrawInput, DrawOutcome, DrawingSession, PolygonTool};
use super::sampler::{FeatureSampler, SampledFeature};
use crate::config::SelectionConfig;
use crate::engine::SceneHost;
use crate::engine::ellipsoid::Ellipsoid;
use crate::engine::layers::LayerId;
use crate::engine::viewport::ViewportMode;
use crate::error::{Result, SelectionError};
use crate::rpc::notifications::{RpcNotification, SelectionNotifications};
use bevy::log::{error, info};
use bevy::math::DVec3;
use constants::selection::SUBDISTRICT_LAYER_NAME;

/// Identifier reported to the frontend in tool state notifications.
pub const SELECTION_TOOL_ID: &str = "hide-entity";

/// Callback receiving the features of a completed selection.
pub type SelectionCallback = Box<dyn FnMut(&[SampledFeature]) + Send + Sync>;

/// What a single input did to the selection session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Tool inactive, input not consumed.
    Ignored,
    /// Session still drawing.
    Pending,
    Completed(Vec<SampledFeature>),
    Cancelled(CancelReason),
}

/// Host-facing entry point of the selection tool.
///
/// Owns the scene host for its lifetime and wires the drawing state machine
/// to the sampler. Selection is single-shot: after a completed or cancelled
/// drawing the controller is inactive until `activate` is called again.
pub struct SelectionController<H: SceneHost> {
    host: H,
    config: SelectionConfig,
    polygon_tool: PolygonTool,
    sampler: FeatureSampler,
    notifications: SelectionNotifications,
    on_selection_complete: Option<SelectionCallback>,
    active: bool,
    subdistrict_layer: Option<LayerId>,
}

impl<H: SceneHost> SelectionController<H> {
    pub fn new(host: H, config: SelectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            host,
            polygon_tool: PolygonTool::new(config.draw_layer_name.clone(), config.min_vertices),
            sampler: FeatureSampler::new(config.sample_step_degrees),
            config,
            notifications: SelectionNotifications::default(),
            on_selection_complete: None,
            active: false,
            subdistrict_layer: None,
        })
    }

    /// Start a drawing session. Activating while a session is in progress
    /// replaces it with a fresh one.
    ///
    /// Fails without touching any state when the viewport is not showing the
    /// 3D scene.
    pub fn activate(&mut self) -> Result<()> {
        let mode = self.host.mode();
        if mode != ViewportMode::Scene3D {
            error!("[SELECT] cannot activate selection tool, viewport is {mode:?}");
            return Err(SelectionError::ViewportUnavailable { mode });
        }

        self.polygon_tool.start(&mut self.host);
        self.active = true;
        info!("[SELECT] selection tool activated");
        self.notifications.send_notification(
            "selection_tool_state_changed",
            serde_json::json!({ "tool": SELECTION_TOOL_ID, "active": true }),
        );
        Ok(())
    }

    /// Tear down any session and hide the feature panel. No-op when idle.
    pub fn deactivate(&mut self) {
        if !self.active && !self.polygon_tool.is_drawing() {
            return;
        }
        if self.polygon_tool.is_drawing() {
            self.notify_cancelled(CancelReason::Deactivated);
        }
        self.end_session();
    }

    pub fn set_on_selection_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&[SampledFeature]) + Send + Sync + 'static,
    {
        self.on_selection_complete = Some(Box::new(callback));
    }

    pub fn clear_on_selection_complete(&mut self) {
        self.on_selection_complete = None;
    }

    pub fn handle_input(&mut self, input: DrawInput) -> SessionOutcome {
        if !self.active {
            return SessionOutcome::Ignored;
        }

        match self
            .polygon_tool
            .handle_input(&mut self.host, &self.sampler, input)
        {
            DrawOutcome::Ignored => SessionOutcome::Ignored,
            DrawOutcome::VertexAdded { count, position } => {
                self.notify_point_added(count, position);
                SessionOutcome::Pending
            }
            DrawOutcome::VertexMissed | DrawOutcome::PointerMoved => SessionOutcome::Pending,
            DrawOutcome::Finished { report, .. } => {
                let features = report.features;
                info!("[SELECT] selection completed with {} features", features.len());
                self.notifications.send_notification(
                    "selection_completed",
                    serde_json::json!({
                        "feature_count": features.len(),
                        "features": features
                            .iter()
                            .map(|f| serde_json::json!({
                                "tileset": f.feature.tileset.0,
                                "batch_id": f.feature.batch_id,
                            }))
                            .collect::<Vec<_>>(),
                    }),
                );
                self.end_session();
                if let Some(callback) = self.on_selection_complete.as_mut() {
                    callback(&features);
                }
                SessionOutcome::Completed(features)
            }
            DrawOutcome::Cancelled(reason) => {
                self.notify_cancelled(reason);
                self.end_session();
                SessionOutcome::Cancelled(reason)
            }
        }
    }

    /// Ids of shown entities inside the polygon, without a drawing session.
    pub fn entities_in_polygon(&self, points: &[DVec3]) -> Vec<String> {
        entity_query::entities_in_polygon(&self.host, points)
    }

    /// Run the feature sampler on an arbitrary polygon, without a drawing
    /// session.
    pub fn picked_features_in_polygon(&mut self, points: &[DVec3]) -> Vec<SampledFeature> {
        self.sampler.sample(&mut self.host, points).features
    }

    /// Show the subdistricts on their own layer, replacing any earlier batch,
    /// and bring them into view if none of them is visible.
    pub fn frame_subdistricts(&mut self, records: &[SubdistrictRecord]) -> Result<FramingOutcome> {
        let layer = match self.subdistrict_layer {
            Some(layer) => layer,
            None => {
                let layer = self.host.create_layer(SUBDISTRICT_LAYER_NAME);
                self.subdistrict_layer = Some(layer);
                layer
            }
        };
        framing::frame_subdistricts(&mut self.host, layer, records, &self.config)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn session(&self) -> Option<&DrawingSession> {
        self.polygon_tool.session()
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn drain_notifications(&mut self) -> Vec<RpcNotification> {
        self.notifications.drain()
    }

    fn end_session(&mut self) {
        self.polygon_tool.teardown(&mut self.host);
        self.active = false;
        info!("[SELECT] selection tool deactivated");
        self.notifications
            .send_notification("feature_info_panel", serde_json::json!({ "visible": false }));
        self.notifications.send_notification(
            "selection_tool_state_changed",
            serde_json::json!({ "tool": SELECTION_TOOL_ID, "active": false }),
        );
    }

    fn notify_point_added(&mut self, count: usize, position: DVec3) {
        // Position is informational only; skip it if it has no lon/lat.
        let params = match Ellipsoid::WGS84.cartesian_to_cartographic(position) {
            Some(c) => serde_json::json!({
                "point_count": count,
                "position": [c.longitude, c.latitude, c.height],
            }),
            None => serde_json::json!({ "point_count": count }),
        };
        self.notifications.send_notification("selection_point_added", params);
    }

    fn notify_cancelled(&mut self, reason: CancelReason) {
        info!("[SELECT] selection cancelled: {}", reason.as_str());
        self.notifications.send_notification(
            "selection_cancelled",
            serde_json::json!({ "reason": reason.as_str() }),
        );
    }
}

impl<H: SceneHost> Drop for SelectionController<H> {
    fn drop(&mut self) {
        self.polygon_tool.teardown(&mut self.host);
    }
}
