// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sketch driven without a window: declarations, scripted input, undo and a save.
//!
//! The host lays every node out as a row of a single column, feeds synthetic pointer and key
//! events through the context, and draws into a recording surface.
//!
//! Run:
//! - `cargo run -p lazy_demos --example headless_sketch`

use kurbo::{Point, Rect, Vec2};
use lazy_event_state::{InputEvent, KeyEvent, PointerButton};
use lazy_gui::{Gui, GuiConfig, SliderOptions};
use lazy_tree::{Argb, RecordingSurface};

const ROW_HEIGHT: f64 = 24.0;
const COLUMN_WIDTH: f64 = 240.0;

/// Declare the sketch's controls. Runs every frame.
fn declare(gui: &mut Gui) -> f32 {
    gui.push_folder("scene");
    let radius = gui
        .slider_with("radius", SliderOptions::new(10.0).with_range(0.0, 100.0))
        .unwrap_or_default();
    let count = gui.slider_int("count", 3).unwrap_or_default();
    let visible = gui.toggle("visible", true).unwrap_or_default();
    let tint = gui
        .color("tint", Argb::new(0xFF, 0x33, 0x99, 0xCC))
        .unwrap_or(Argb::BLACK);
    let blend = gui
        .radio("blend", &["normal", "add", "multiply"], "normal")
        .unwrap_or_default();
    let offset = gui.plot("offset", Vec2::new(0.0, 0.0)).unwrap_or_default();
    gui.pop_folder();
    if gui.button("reset all").unwrap_or_default() {
        println!("reset requested");
    }
    println!(
        "radius={radius} count={count} visible={visible} tint={} blend={blend} offset={},{}",
        tint.to_hex(),
        offset.x,
        offset.y
    );
    radius
}

/// Place every node in one column, in tree order.
fn layout(gui: &mut Gui) {
    let paths: Vec<String> = gui
        .registry()
        .all_nodes()
        .iter()
        .filter(|n| !n.is_root())
        .map(|n| n.path().to_owned())
        .collect();
    for (row, path) in paths.iter().enumerate() {
        let depth = lazy_path::split(path).len() as f64;
        let y = row as f64 * ROW_HEIGHT;
        gui.set_bounds(path, Rect::new(depth * 8.0, y, COLUMN_WIDTH, y + ROW_HEIGHT));
    }
}

fn row_center(gui: &Gui, path: &str) -> Point {
    gui.registry()
        .get(path)
        .map(|n| n.bounds().center())
        .unwrap_or_default()
}

fn main() {
    let save_dir = std::env::temp_dir().join("lazy_demos_headless_sketch");
    let config = GuiConfig::default()
        .with_app_name("HeadlessSketch")
        .with_save_dir(&save_dir)
        .with_load_latest_save(false);
    let mut gui = Gui::headless(config);

    let mut now_ms = 0;
    let mut frame = |gui: &mut Gui, events: &[InputEvent]| {
        gui.begin_frame(now_ms);
        for event in events {
            gui.handle_event(*event);
        }
        let radius = declare(gui);
        layout(gui);
        gui.end_frame();
        now_ms += 16;
        radius
    };

    frame(&mut gui, &[]);
    frame(&mut gui, &[]);

    // Drag the radius slider to the right by 40 pixels.
    let start = row_center(&gui, "scene/radius");
    let end = start + Vec2::new(40.0, 0.0);
    frame(
        &mut gui,
        &[
            InputEvent::PointerMoved { position: start },
            InputEvent::PointerPressed {
                position: start,
                button: PointerButton::Primary,
            },
            InputEvent::PointerDragged {
                position: end,
                previous: start,
            },
            InputEvent::PointerReleased {
                position: end,
                button: PointerButton::Primary,
            },
        ],
    );

    // Type a value over the count slider and wait for it to commit.
    let count = row_center(&gui, "scene/count");
    frame(
        &mut gui,
        &[
            InputEvent::PointerMoved { position: count },
            InputEvent::Key(KeyEvent::char('4')),
            InputEvent::Key(KeyEvent::char('2')),
            InputEvent::PointerLeft,
        ],
    );
    for _ in 0..40 {
        frame(&mut gui, &[]);
    }

    println!("undo: {}", gui.undo());
    let radius = frame(&mut gui, &[InputEvent::Key(KeyEvent::ctrl('y'))]);
    println!("radius after redo: {radius}");

    let mut surface = RecordingSurface::new();
    gui.draw(&mut surface);
    println!("{} draw ops", surface.ops.len());
    println!("{}", gui.pretty_print());

    match gui.create_new_save() {
        Ok(name) => println!("saved as {name:?} in {}", save_dir.display()),
        Err(err) => eprintln!("save failed: {err}"),
    }
}
