//! Bevy integration: native mouse and keyboard input drive a
//! [`SelectionController`] stored as a resource.

use crate::engine::SceneHost;
use crate::engine::viewport::resolve_world_position;
use crate::tools::polygon::DrawInput;
use crate::tools::sampler::SampledFeature;
use crate::tools::tool_manager::{SelectionController, SessionOutcome};
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::marker::PhantomData;
use std::time::Duration;

/// Resource wrapping the controller for the application's host type.
#[derive(Resource)]
pub struct SelectionTool<H: SceneHost + Send + Sync + 'static>(pub SelectionController<H>);

/// Activation requests from the UI or RPC layer.
#[derive(Event, Debug, Clone, Copy)]
pub struct SelectionToolEvent {
    pub action: SelectionToolAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionToolAction {
    Activate,
    Deactivate,
}

/// A drawing input for the active session.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerInput(pub DrawInput);

/// Fired once per completed selection.
#[derive(Event, Debug, Clone)]
pub struct SelectionCompleted {
    pub features: Vec<SampledFeature>,
}

/// Registers the selection events and systems for host type `H`.
///
/// The application inserts `SelectionTool<H>` itself; until it does, the
/// systems stay idle.
pub struct PolygonSelectionPlugin<H>(PhantomData<fn() -> H>);

impl<H> Default for PolygonSelectionPlugin<H> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<H: SceneHost + Send + Sync + 'static> Plugin for PolygonSelectionPlugin<H> {
    fn build(&self, app: &mut App) {
        // No-ops under InputPlugin/TimePlugin. Headless apps without them
        // write these resources directly and must clear them each frame.
        app.init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Time>()
            .add_event::<SelectionToolEvent>()
            .add_event::<PointerInput>()
            .add_event::<SelectionCompleted>()
            .add_systems(
                Update,
                (
                    handle_selection_tool_events::<H>,
                    collect_pointer_input::<H>,
                    drive_selection_tool::<H>,
                )
                    .chain()
                    .run_if(resource_exists::<SelectionTool<H>>),
            );
    }
}

/// Last confirm click, for double-click detection.
#[derive(Default)]
pub struct ClickTracker {
    last_click: Option<(DVec2, Duration)>,
    last_cursor: Option<DVec2>,
}

impl ClickTracker {
    fn is_double_click(&self, pixel: DVec2, now: Duration, window: Duration, radius: f64) -> bool {
        self.last_click.is_some_and(|(previous, at)| {
            now.saturating_sub(at) <= window && previous.distance(pixel) <= radius
        })
    }
}

/// System handling activation requests.
pub fn handle_selection_tool_events<H: SceneHost + Send + Sync + 'static>(
    mut events: EventReader<SelectionToolEvent>,
    mut tool: ResMut<SelectionTool<H>>,
) {
    for event in events.read() {
        match event.action {
            SelectionToolAction::Activate => {
                if let Err(err) = tool.0.activate() {
                    warn!("[SELECT] activation rejected ({}): {err}", err.code());
                }
            }
            SelectionToolAction::Deactivate => tool.0.deactivate(),
        }
    }
}

/// System translating mouse, keyboard and cursor state into session inputs.
///
/// Left click confirms a vertex, right click finishes, a second left click
/// within the configured window and radius finishes instead of adding a
/// vertex, Escape cancels.
pub fn collect_pointer_input<H: SceneHost + Send + Sync + 'static>(
    tool: Res<SelectionTool<H>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    mut clicks: Local<ClickTracker>,
    mut pointer_events: EventWriter<PointerInput>,
) {
    if !tool.0.is_active() {
        *clicks = ClickTracker::default();
        return;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        pointer_events.write(PointerInput(DrawInput::Cancel));
        return;
    }

    let cursor = windows
        .single()
        .ok()
        .and_then(Window::cursor_position)
        .map(|position| position.as_dvec2());

    if let Some(pixel) = cursor {
        if clicks.last_cursor != Some(pixel) {
            clicks.last_cursor = Some(pixel);
            pointer_events.write(PointerInput(DrawInput::MovePointer(pixel)));
        }
    }

    if mouse_button.just_pressed(MouseButton::Right) {
        clicks.last_click = None;
        pointer_events.write(PointerInput(DrawInput::Finish));
        return;
    }

    if mouse_button.just_pressed(MouseButton::Left) {
        let Some(pixel) = cursor else {
            return;
        };
        let config = tool.0.config();
        let now = time.elapsed();
        if clicks.is_double_click(
            pixel,
            now,
            Duration::from_millis(config.double_click_window_ms),
            config.double_click_radius_px,
        ) {
            clicks.last_click = None;
            pointer_events.write(PointerInput(DrawInput::Finish));
        } else {
            // A click on empty sky adds no vertex and so cannot start a double click.
            clicks.last_click =
                resolve_world_position(tool.0.host(), pixel).map(|_| (pixel, now));
            pointer_events.write(PointerInput(DrawInput::ConfirmPoint(pixel)));
        }
    }
}

/// System feeding session inputs to the controller.
pub fn drive_selection_tool<H: SceneHost + Send + Sync + 'static>(
    mut tool: ResMut<SelectionTool<H>>,
    mut inputs: EventReader<PointerInput>,
    mut completed: EventWriter<SelectionCompleted>,
) {
    for PointerInput(input) in inputs.read() {
        if let SessionOutcome::Completed(features) = tool.0.handle_input(*input) {
            completed.write(SelectionCompleted { features });
        }
    }
}
