mod common;

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};
use common::{Footprint, MockHost, pixel};
use polygon_select_engine::plugin::{
    PointerInput, PolygonSelectionPlugin, SelectionCompleted, SelectionTool, SelectionToolAction,
    SelectionToolEvent,
};
use polygon_select_engine::{DrawInput, SelectionConfig, SelectionController};
use std::time::Duration;

const P1: (f64, f64) = (105.8510, 21.0210);
const P2: (f64, f64) = (105.8540, 21.0210);
const P3: (f64, f64) = (105.8520, 21.0240);

fn app() -> App {
    let host = MockHost::new().with_feature(1, Footprint::new(105.8520, 21.0220, 105.8524, 21.0224));
    let controller = SelectionController::new(host, SelectionConfig::default()).unwrap();

    let mut app = App::new();
    app.add_plugins(PolygonSelectionPlugin::<MockHost>::default())
        .insert_resource(SelectionTool(controller));
    app
}

fn tool(app: &App) -> &SelectionController<MockHost> {
    &app.world().resource::<SelectionTool<MockHost>>().0
}

fn activate(app: &mut App) {
    app.world_mut().send_event(SelectionToolEvent {
        action: SelectionToolAction::Activate,
    });
    app.update();
}

fn completed(app: &App) -> Vec<SelectionCompleted> {
    app.world()
        .resource::<Events<SelectionCompleted>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

fn spawn_window(app: &mut App, (lon, lat): (f64, f64)) -> Entity {
    let mut window = Window {
        resolution: WindowResolution::new(2000.0, 2000.0),
        ..Default::default()
    };
    window.set_cursor_position(Some(pixel(lon, lat).as_vec2()));
    app.world_mut().spawn((window, PrimaryWindow)).id()
}

fn click(app: &mut App, button: MouseButton) {
    let mut input = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
    input.release(button);
    input.clear();
    input.press(button);
}

#[test]
fn idle_without_a_tool_resource() {
    let mut app = App::new();
    app.add_plugins(PolygonSelectionPlugin::<MockHost>::default());
    app.world_mut().send_event(SelectionToolEvent {
        action: SelectionToolAction::Activate,
    });
    app.update();
    assert!(completed(&app).is_empty());
}

#[test]
fn pointer_events_complete_a_selection() {
    let mut app = app();
    activate(&mut app);
    assert!(tool(&app).is_active());

    for (lon, lat) in [P1, P2, P3] {
        app.world_mut()
            .send_event(PointerInput(DrawInput::ConfirmPoint(pixel(lon, lat))));
    }
    app.world_mut().send_event(PointerInput(DrawInput::Finish));
    app.update();

    let events = completed(&app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].features.len(), 1);
    assert_eq!(events[0].features[0].feature.batch_id, 1);
    assert!(!tool(&app).is_active());
    assert_eq!(tool(&app).host().layer_count(), 0);
}

#[test]
fn escape_key_cancels() {
    let mut app = app();
    activate(&mut app);
    app.world_mut()
        .send_event(PointerInput(DrawInput::ConfirmPoint(pixel(P1.0, P1.1))));
    app.update();
    assert_eq!(tool(&app).session().unwrap().vertices().len(), 1);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Escape);
    app.update();

    assert!(!tool(&app).is_active());
    assert!(tool(&app).session().is_none());
    assert_eq!(tool(&app).host().active_input_count(), 0);
    assert!(completed(&app).is_empty());
}

#[test]
fn double_click_finishes_instead_of_adding_a_vertex() {
    let mut app = app();
    activate(&mut app);
    for (lon, lat) in [P1, P2] {
        app.world_mut()
            .send_event(PointerInput(DrawInput::ConfirmPoint(pixel(lon, lat))));
    }
    app.update();

    spawn_window(&mut app, P3);
    click(&mut app, MouseButton::Left);
    app.update();
    assert_eq!(tool(&app).session().unwrap().vertices().len(), 3);

    click(&mut app, MouseButton::Left);
    app.update();

    let events = completed(&app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].features.len(), 1);
}

#[test]
fn slow_second_click_adds_a_vertex() {
    let mut app = app();
    activate(&mut app);
    spawn_window(&mut app, P1);

    click(&mut app, MouseButton::Left);
    app.update();
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(500));
    click(&mut app, MouseButton::Left);
    app.update();

    assert_eq!(tool(&app).session().unwrap().vertices().len(), 2);
    assert!(tool(&app).is_active());
}

#[test]
fn right_click_with_two_vertices_cancels() {
    let mut app = app();
    activate(&mut app);
    for (lon, lat) in [P1, P2] {
        app.world_mut()
            .send_event(PointerInput(DrawInput::ConfirmPoint(pixel(lon, lat))));
    }
    app.update();

    click(&mut app, MouseButton::Right);
    app.update();

    assert!(!tool(&app).is_active());
    assert!(completed(&app).is_empty());
    assert_eq!(tool(&app).host().picks, 0);
}

#[test]
fn click_on_empty_sky_does_not_arm_a_double_click() {
    let mut app = app();
    app.world_mut()
        .resource_mut::<SelectionTool<MockHost>>()
        .0
        .host_mut()
        .sky = Some(Footprint::new(105.8509, 21.0209, 105.85099, 21.0211));
    activate(&mut app);

    let window = spawn_window(&mut app, (105.85098, 21.0210));
    click(&mut app, MouseButton::Left);
    app.update();
    assert!(tool(&app).session().unwrap().vertices().is_empty());

    // Two pixels away and within the double-click window, but on the globe.
    app.world_mut()
        .get_mut::<Window>(window)
        .unwrap()
        .set_cursor_position(Some(pixel(P1.0, P1.1).as_vec2()));
    click(&mut app, MouseButton::Left);
    app.update();

    assert!(tool(&app).is_active());
    assert_eq!(tool(&app).session().unwrap().vertices().len(), 1);
    assert!(completed(&app).is_empty());
}
