// SPDX-License-Identifier: GPL-3.0-or-later
// tests/crop_pipeline.rs
//
// End-to-end crop sessions driven through synthetic pointer events.

use std::cell::{Cell, RefCell};
use std::io::Cursor;
use std::rc::Rc;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use pagecrop::{
    BoundingBox, Cropper, CropperConfig, EventStatus, InteractionMode, PageStack, PointerPhase,
    RawPointerEvent, ResizeHandle, SelectionRect, WatermarkConfig, WatermarkSource,
    WindowListeners,
};

#[derive(Default)]
struct Listeners {
    active: Cell<i32>,
}

impl WindowListeners for Listeners {
    fn attach(&self) {
        self.active.set(self.active.get() + 1);
    }

    fn detach(&self) {
        self.active.set(self.active.get() - 1);
    }
}

/// Container 1000x900 at the origin, one page shown at 800x900 from x=100,
/// rendered at 1600x1800.
fn session(config: CropperConfig) -> (Cropper, Rc<Listeners>) {
    let mut pages = PageStack::new(100.0, 0.0, 2.0, 0.0);
    pages.push(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        1600,
        1800,
        Rgba([40, 80, 120, 255]),
    )));
    let listeners = Rc::new(Listeners::default());
    let shared: Rc<dyn WindowListeners> = listeners.clone();
    let cropper = Cropper::new(
        config,
        BoundingBox::new(0.0, 0.0, 1000.0, 900.0),
        Box::new(pages),
        shared,
    );
    (cropper, listeners)
}

fn mouse(cropper: &mut Cropper, phase: PointerPhase, x: f64, y: f64) -> EventStatus {
    cropper.handle_pointer(&RawPointerEvent::mouse(phase, x, y))
}

fn draw(cropper: &mut Cropper, from: (f64, f64), to: (f64, f64)) {
    mouse(cropper, PointerPhase::Down, from.0, from.1);
    mouse(cropper, PointerPhase::Move, to.0, to.1);
    mouse(cropper, PointerPhase::Up, to.0, to.1);
}

fn logo_png() -> Vec<u8> {
    let logo = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255]));
    let mut bytes = Vec::new();
    logo.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn collect(cropper: &mut Cropper) -> Rc<RefCell<Vec<(u32, u32)>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    cropper.on_crop(move |artifact| {
        sink.borrow_mut()
            .push((artifact.width(), artifact.height()))
    });
    seen
}

#[tokio::test]
async fn crop_without_watermark_is_twice_the_mapped_size() {
    let (mut cropper, _) = session(CropperConfig::default());
    let seen = collect(&mut cropper);

    cropper.start_selection();
    draw(&mut cropper, (150.0, 50.0), (250.0, 150.0));
    assert_eq!(
        cropper.selection_rect(),
        SelectionRect::new(150.0, 50.0, 100.0, 100.0)
    );

    assert!(cropper.save().await);
    assert_eq!(*seen.borrow(), vec![(400, 400)]);

    let artifact = cropper.artifact().unwrap();
    let decoded = image::load_from_memory(artifact.as_bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 400));
    assert!(artifact.to_data_url().starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn watermark_from_file_adds_white_strip() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");
    std::fs::write(&logo_path, logo_png()).unwrap();

    let mut watermark = WatermarkConfig::new(WatermarkSource::Path(logo_path));
    watermark.tile_width = Some(50.0);
    let config = CropperConfig {
        watermark: Some(watermark),
        ..CropperConfig::default()
    };
    let (mut cropper, _) = session(config);
    let seen = collect(&mut cropper);

    cropper.start_selection();
    draw(&mut cropper, (150.0, 50.0), (250.0, 150.0));
    assert!(cropper.save().await);
    assert_eq!(*seen.borrow(), vec![(400, 520)]);

    let decoded = image::load_from_memory(cropper.artifact().unwrap().as_bytes())
        .unwrap()
        .to_rgba8();
    // Strip corner stays white, logo sits in the strip's centre.
    assert_eq!(*decoded.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    assert!(decoded.get_pixel(200, 60)[0] < 50);
}

#[tokio::test]
async fn broken_watermark_still_crops() {
    let mut watermark = WatermarkConfig::new(WatermarkSource::Bytes(Arc::from(
        b"not an image".to_vec(),
    )));
    watermark.tile_width = Some(50.0);
    let config = CropperConfig {
        watermark: Some(watermark),
        ..CropperConfig::default()
    };
    let (mut cropper, _) = session(config);
    let seen = collect(&mut cropper);

    cropper.start_selection();
    draw(&mut cropper, (150.0, 50.0), (250.0, 150.0));
    assert!(cropper.save().await);
    assert_eq!(*seen.borrow(), vec![(400, 520)]);

    let decoded = image::load_from_memory(cropper.artifact().unwrap().as_bytes())
        .unwrap()
        .to_rgba8();
    assert_eq!(*decoded.get_pixel(200, 60), Rgba([255, 255, 255, 255]));
}

#[tokio::test]
async fn in_memory_watermark_bytes() {
    let config = CropperConfig {
        watermark: Some(WatermarkConfig::new(WatermarkSource::Bytes(Arc::from(
            logo_png(),
        )))),
        ..CropperConfig::default()
    };
    let (mut cropper, _) = session(config);
    cropper.start_selection();
    draw(&mut cropper, (150.0, 50.0), (250.0, 150.0));
    assert!(cropper.save().await);
    let artifact = cropper.artifact().unwrap();
    assert_eq!((artifact.width(), artifact.height()), (400, 520));
}

#[tokio::test]
async fn selection_off_the_page_delivers_nothing() {
    let (mut cropper, _) = session(CropperConfig::default());
    let seen = collect(&mut cropper);

    cropper.start_selection();
    draw(&mut cropper, (850.0, 700.0), (980.0, 880.0));
    assert!(!cropper.save().await);
    assert!(seen.borrow().is_empty());
    assert_eq!(cropper.mode(), InteractionMode::Selected);

    // Pull it back onto the page and retry.
    mouse(&mut cropper, PointerPhase::Down, 900.0, 800.0);
    assert_eq!(cropper.mode(), InteractionMode::Dragging);
    mouse(&mut cropper, PointerPhase::Move, 700.0, 600.0);
    mouse(&mut cropper, PointerPhase::Up, 700.0, 600.0);
    assert!(cropper.save().await);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn drag_scenarios() {
    let (mut cropper, listeners) = session(CropperConfig::default());
    cropper.start_selection();
    draw(&mut cropper, (100.0, 100.0), (300.0, 300.0));
    assert_eq!(
        cropper.selection_rect(),
        SelectionRect::new(100.0, 100.0, 200.0, 200.0)
    );

    mouse(&mut cropper, PointerPhase::Down, 200.0, 200.0);
    assert_eq!(listeners.active.get(), 1);
    mouse(&mut cropper, PointerPhase::Move, 250.0, 230.0);
    assert_eq!(
        cropper.selection_rect(),
        SelectionRect::new(150.0, 130.0, 200.0, 200.0)
    );
    mouse(&mut cropper, PointerPhase::Up, 250.0, 230.0);
    assert_eq!(listeners.active.get(), 0);

    // Back to left 100 and push far right.
    mouse(&mut cropper, PointerPhase::Down, 250.0, 230.0);
    mouse(&mut cropper, PointerPhase::Move, 200.0, 230.0);
    mouse(&mut cropper, PointerPhase::Move, 1050.0, 230.0);
    assert_eq!(cropper.selection_rect().left, 800.0);
    mouse(&mut cropper, PointerPhase::Up, 1050.0, 230.0);
}

#[test]
fn resize_bottom_right_follows_pointer() {
    let (mut cropper, listeners) = session(CropperConfig::default());
    cropper.start_selection();
    draw(&mut cropper, (200.0, 150.0), (260.0, 210.0));

    mouse(&mut cropper, PointerPhase::Down, 260.0, 210.0);
    assert_eq!(cropper.mode(), InteractionMode::Resizing);
    assert_eq!(cropper.overlay().unwrap().handles[4].0, ResizeHandle::BottomRight);
    mouse(&mut cropper, PointerPhase::Move, 400.0, 350.0);
    assert_eq!(
        cropper.selection_rect(),
        SelectionRect::new(200.0, 150.0, 200.0, 200.0)
    );

    cropper.window_blur();
    assert_eq!(cropper.mode(), InteractionMode::Selected);
    assert_eq!(listeners.active.get(), 0);
}

#[test]
fn touch_and_mouse_behave_alike() {
    let (mut cropper, _) = session(CropperConfig::default());
    cropper.start_selection();

    let status =
        cropper.handle_pointer(&RawPointerEvent::touch(PointerPhase::Down, 600.0, 600.0));
    assert_eq!(status, EventStatus::Captured);
    cropper.handle_pointer(&RawPointerEvent::touch(PointerPhase::Move, 700.0, 650.0));
    cropper.handle_pointer(&RawPointerEvent::touch_end());

    assert_eq!(cropper.mode(), InteractionMode::Selected);
    assert_eq!(
        cropper.selection_rect(),
        SelectionRect::new(600.0, 600.0, 100.0, 50.0)
    );
}

#[test]
fn cancel_always_restores_default() {
    let (mut cropper, listeners) = session(CropperConfig::default());
    cropper.start_selection();
    draw(&mut cropper, (600.0, 600.0), (700.0, 650.0));
    mouse(&mut cropper, PointerPhase::Down, 650.0, 620.0);
    assert_eq!(cropper.mode(), InteractionMode::Dragging);

    cropper.cancel();
    assert_eq!(listeners.active.get(), 0);
    assert_eq!(cropper.mode(), InteractionMode::Idle);
    assert!(!cropper.is_crop_mode());

    cropper.start_selection();
    assert_eq!(
        cropper.selection_rect(),
        SelectionRect::new(250.0, 120.0, 200.0, 200.0)
    );
}
