// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Command-line host: stacks page images, replays a selection and saves the crop.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, bail};
use clap::Parser;
use image::ImageReader;

use pagecrop::app::view::crop::CursorHint;
use pagecrop::constant::{COORD_EPSILON, PAGE_RENDER_SCALE};
use pagecrop::{
    BoundingBox, Cropper, CropperConfig, NoWindowListeners, PageStack, PointerPhase, PointerPoint,
    RawPointerEvent, SelectionRect, WatermarkConfig, WatermarkSource,
};

/// Crop a rectangle out of a rendered document page.
#[derive(Parser, Debug, Clone)]
#[command(name = "pagecrop", version, about)]
pub struct Args {
    /// Rendered page images, in page order.
    #[arg(required = true)]
    pub pages: Vec<PathBuf>,

    /// Page to crop (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Selection as LEFT,TOP,WIDTH,HEIGHT in display pixels of the page stack.
    /// Defaults to the standard initial selection.
    #[arg(long, value_parser = parse_rect)]
    pub rect: Option<SelectionRect>,

    /// Ratio between page image pixels and displayed size.
    #[arg(long, default_value_t = PAGE_RENDER_SCALE)]
    pub render_scale: f64,

    /// Vertical gap between stacked pages, in display pixels.
    #[arg(long, default_value_t = 0.0)]
    pub gap: f64,

    /// JSON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Watermark image (overrides the config file).
    #[arg(long)]
    pub watermark: Option<PathBuf>,

    /// Watermark tile opacity.
    #[arg(long)]
    pub opacity: Option<f64>,

    /// Watermark tile width in crop pixels.
    #[arg(long)]
    pub tile_width: Option<f64>,

    /// Watermark tile height in crop pixels.
    #[arg(long)]
    pub tile_height: Option<f64>,

    /// Directory the crop is written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output file name (overrides the config file).
    #[arg(long)]
    pub file_name: Option<String>,

    /// Log pipeline details.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_rect(raw: &str) -> Result<SelectionRect, String> {
    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in rectangle: {e}"))?;

    match values.as_slice() {
        [left, top, width, height] if *width > 0.0 && *height > 0.0 => {
            Ok(SelectionRect::new(*left, *top, *width, *height))
        }
        [_, _, _, _] => Err("width and height must be positive".to_string()),
        _ => Err("expected LEFT,TOP,WIDTH,HEIGHT".to_string()),
    }
}

fn build_config(args: &Args) -> anyhow::Result<CropperConfig> {
    let mut config = match &args.config {
        Some(path) => CropperConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => CropperConfig::default(),
    };

    if let Some(path) = &args.watermark {
        config.watermark = Some(WatermarkConfig::new(WatermarkSource::Path(path.clone())));
    }
    if let Some(watermark) = config.watermark.as_mut() {
        watermark.opacity = args.opacity.or(watermark.opacity);
        watermark.tile_width = args.tile_width.or(watermark.tile_width);
        watermark.tile_height = args.tile_height.or(watermark.tile_height);
    }
    if let Some(name) = &args.file_name {
        config.download_file_name = name.clone();
    }

    Ok(config)
}

fn gesture(cropper: &mut Cropper, from: PointerPoint, to: PointerPoint) {
    cropper.handle_pointer(&RawPointerEvent::mouse(PointerPhase::Down, from.x, from.y));
    cropper.handle_pointer(&RawPointerEvent::mouse(PointerPhase::Move, to.x, to.y));
    cropper.handle_pointer(&RawPointerEvent::mouse(PointerPhase::Up, to.x, to.y));
}

/// The selection must lie inside the page stack, or no gesture can draw it.
fn check_within(rect: SelectionRect, container: BoundingBox) -> anyhow::Result<()> {
    let inside = rect.left >= 0.0
        && rect.top >= 0.0
        && rect.right() <= container.width + COORD_EPSILON
        && rect.bottom() <= container.height + COORD_EPSILON;
    if !inside {
        bail!(
            "selection {rect:?} lies outside the page stack ({}x{})",
            container.width,
            container.height
        );
    }
    Ok(())
}

fn same_rect(a: SelectionRect, b: SelectionRect) -> bool {
    (a.left - b.left).abs() <= COORD_EPSILON
        && (a.top - b.top).abs() <= COORD_EPSILON
        && (a.width - b.width).abs() <= COORD_EPSILON
        && (a.height - b.height).abs() <= COORD_EPSILON
}

/// Draw `rect` the way a user would, starting from a corner that is not on
/// the current selection (which would start a drag or resize instead).
fn replay_selection(cropper: &mut Cropper, rect: SelectionRect) -> anyhow::Result<()> {
    let corners = [
        (rect.left, rect.top, rect.right(), rect.bottom()),
        (rect.right(), rect.top, rect.left, rect.bottom()),
        (rect.left, rect.bottom(), rect.right(), rect.top),
        (rect.right(), rect.bottom(), rect.left, rect.top),
    ];

    for _ in 0..2 {
        for (sx, sy, ex, ey) in corners {
            let start = PointerPoint::new(sx, sy);
            if cropper.cursor_at(start) == CursorHint::Crosshair {
                gesture(cropper, start, PointerPoint::new(ex, ey));
                let placed = cropper.selection_rect();
                if !same_rect(placed, rect) {
                    bail!("selection ended up at {placed:?} instead of {rect:?}");
                }
                return Ok(());
            }
        }
        // Every corner sits on the default selection: shrink it into the
        // container's top-left corner and retry.
        gesture(cropper, PointerPoint::new(0.0, 0.0), PointerPoint::new(1.0, 1.0));
    }

    bail!("could not place selection {rect:?}")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = build_config(&args)?;

    let mut pages = PageStack::new(0.0, 0.0, args.render_scale, args.gap);
    for path in &args.pages {
        let page = ImageReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .decode()
            .with_context(|| format!("failed to decode {}", path.display()))?;
        pages.push(&page);
    }
    let container = pages.extent();
    log::debug!("Stacked {} pages into {container:?}", pages.page_count());

    let mut cropper = Cropper::new(
        config,
        container,
        Box::new(pages),
        Rc::new(NoWindowListeners),
    );
    cropper.set_current_page(args.page);
    cropper.start_selection();

    if let Some(rect) = args.rect {
        check_within(rect, container)?;
        replay_selection(&mut cropper, rect)?;
    }
    log::info!("Selection: {:?}", cropper.selection_rect());

    if !cropper.save().await {
        bail!("crop failed, try a selection inside page {}", args.page);
    }

    match cropper.download(&args.output_dir)? {
        Some(path) => println!("{}", path.display()),
        None => bail!("no crop to save"),
    }

    Ok(())
}
