// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/cropper.rs
//
// Cropper session: wires input, selection, mapping and rasterizing together.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::app::input::{EventStatus, normalize};
use crate::app::message::{CropCommand, PointerPhase, RawPointerEvent};
use crate::app::view::crop::{
    CursorHint, InteractionMode, OverlayLayout, SelectionStateMachine, WindowListeners, cursor_for,
};
use crate::config::CropperConfig;
use crate::domain::document::{PageRegistry, map_to_surface};
use crate::domain::geometry::{BoundingBox, PointerPoint, SelectionRect};
use crate::error::{CropError, CropResult};
use crate::render::{CroppedArtifact, PendingCrop};

/// Called with every successfully produced crop.
pub type CropCallback = Box<dyn FnMut(&CroppedArtifact)>;

/// Save/cancel handles for hosts that hide the built-in controls.
///
/// Commands are queued and run on the next [`Cropper::process_commands`].
#[derive(Debug, Clone)]
pub struct CropControls {
    tx: UnboundedSender<CropCommand>,
}

impl CropControls {
    /// Request a crop. Returns false if the cropper is gone.
    pub fn save(&self) -> bool {
        self.tx.send(CropCommand::Save).is_ok()
    }

    /// Request cancellation. Returns false if the cropper is gone.
    pub fn cancel(&self) -> bool {
        self.tx.send(CropCommand::Cancel).is_ok()
    }
}

/// One crop session over a paged document.
pub struct Cropper {
    config: CropperConfig,
    selection: SelectionStateMachine,
    pages: Box<dyn PageRegistry>,
    crop_mode: bool,
    current_page: usize,
    artifact: Option<CroppedArtifact>,
    on_crop: Option<CropCallback>,
    commands_tx: UnboundedSender<CropCommand>,
    commands_rx: UnboundedReceiver<CropCommand>,
}

impl Cropper {
    pub fn new(
        config: CropperConfig,
        container: BoundingBox,
        pages: Box<dyn PageRegistry>,
        listeners: Rc<dyn WindowListeners>,
    ) -> Self {
        let selection = SelectionStateMachine::new(
            container,
            listeners,
            config.min_selection_size,
            config.handle_hit_size,
        );
        let (commands_tx, commands_rx) = unbounded_channel();

        Self {
            config,
            selection,
            pages,
            crop_mode: false,
            current_page: 1,
            artifact: None,
            on_crop: None,
            commands_tx,
            commands_rx,
        }
    }

    /// Register the completion callback.
    pub fn on_crop<F>(&mut self, callback: F)
    where
        F: FnMut(&CroppedArtifact) + 'static,
    {
        self.on_crop = Some(Box::new(callback));
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    // =========================================================================
    // Host state
    // =========================================================================

    pub fn is_crop_mode(&self) -> bool {
        self.crop_mode
    }

    /// Enter crop mode with a fresh default selection.
    pub fn start_selection(&mut self) {
        if self.artifact.take().is_some() {
            log::debug!("New selection supersedes pending crop");
        }
        self.crop_mode = true;
        self.selection.reset();
    }

    /// Host-side crop mode toggle.
    pub fn set_crop_mode(&mut self, enabled: bool) {
        if enabled == self.crop_mode {
            return;
        }
        if enabled {
            self.start_selection();
        } else {
            self.crop_mode = false;
            self.selection.reset();
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Host reports the visible page (1-based). A change while cropping
    /// resets the selection.
    pub fn set_current_page(&mut self, page: usize) {
        if page == self.current_page {
            return;
        }
        self.current_page = page;
        if self.crop_mode {
            log::debug!("Page changed to {page}, resetting selection");
            self.selection.reset();
        }
    }

    pub fn set_container_bounds(&mut self, container: BoundingBox) {
        self.selection.set_container(container);
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed a pointer event. `Captured` means the host must suppress the
    /// event's default action and propagation.
    pub fn handle_pointer(&mut self, event: &RawPointerEvent) -> EventStatus {
        if !self.crop_mode {
            return EventStatus::Ignored;
        }

        let input = normalize(event, &self.selection.container());
        match (input.phase, input.point) {
            (PointerPhase::Down, Some(point)) => self.selection.pointer_down(point),
            (PointerPhase::Move, Some(point)) => self.selection.pointer_move(point),
            (PointerPhase::Up, _) => self.selection.pointer_up(),
            (_, None) => EventStatus::Ignored,
        }
    }

    pub fn window_blur(&mut self) {
        self.selection.window_blur();
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn mode(&self) -> InteractionMode {
        self.selection.mode()
    }

    pub fn selection_rect(&self) -> SelectionRect {
        self.selection.rect()
    }

    /// Overlay geometry to paint, or `None` outside crop mode.
    pub fn overlay(&self) -> Option<OverlayLayout> {
        self.crop_mode.then(|| {
            OverlayLayout::new(self.selection.rect(), self.config.show_default_controls)
        })
    }

    /// Cursor for a container-relative hover position.
    pub fn cursor_at(&self, point: PointerPoint) -> CursorHint {
        cursor_for(
            self.selection.mode(),
            self.selection.resize_handle(),
            self.selection.hit_test(point),
        )
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Save/cancel handles for custom host UI. Only handed out while crop
    /// mode is on and the built-in controls are hidden.
    pub fn controls(&self) -> Option<CropControls> {
        (self.crop_mode && !self.config.show_default_controls).then(|| CropControls {
            tx: self.commands_tx.clone(),
        })
    }

    /// Run commands queued through [`CropControls`].
    pub async fn process_commands(&mut self) {
        while let Ok(command) = self.commands_rx.try_recv() {
            match command {
                CropCommand::Save => {
                    self.save().await;
                }
                CropCommand::Cancel => self.cancel(),
            }
        }
    }

    /// Crop the current selection from the current page.
    ///
    /// On success the artifact goes to the completion callback, stays
    /// available through [`Cropper::artifact`], and the selection resets.
    /// On failure nothing is delivered and the selection is kept so the
    /// user can adjust it and retry.
    ///
    /// Holds the session until the crop is done. Hosts that keep feeding
    /// input meanwhile use [`Cropper::begin_save`] and
    /// [`Cropper::finish_save`] instead.
    pub async fn save(&mut self) -> bool {
        let Some(pending) = self.begin_save() else {
            return false;
        };
        let result = pending.render().await;
        self.finish_save(result)
    }

    /// First half of a save: snapshot the selected pixels.
    ///
    /// The returned crop borrows nothing from the session; render it and
    /// hand the result to [`Cropper::finish_save`].
    pub fn begin_save(&self) -> Option<PendingCrop> {
        if !self.crop_mode {
            log::debug!("Save requested outside crop mode, ignoring");
            return None;
        }

        match self.prepare_crop() {
            Ok(pending) => Some(pending),
            Err(e) => {
                log::error!("Crop of page {} failed: {e}", self.current_page);
                None
            }
        }
    }

    /// Second half of a save: deliver a rendered crop.
    ///
    /// Results arriving after crop mode was left are dropped.
    pub fn finish_save(&mut self, result: CropResult<CroppedArtifact>) -> bool {
        if !self.crop_mode {
            log::debug!("Crop finished after leaving crop mode, discarding");
            return false;
        }

        match result {
            Ok(artifact) => {
                log::info!(
                    "Cropped page {} to {}x{}",
                    self.current_page,
                    artifact.width(),
                    artifact.height()
                );
                if let Some(callback) = self.on_crop.as_mut() {
                    callback(&artifact);
                }
                self.artifact = Some(artifact);
                self.selection.reset();
                true
            }
            Err(e) => {
                log::error!("Crop of page {} failed: {e}", self.current_page);
                false
            }
        }
    }

    fn prepare_crop(&self) -> CropResult<PendingCrop> {
        let page = self.current_page;
        let surface = self
            .pages
            .lookup(page)
            .ok_or(CropError::SurfaceNotFound { page })?;

        let rect = self.selection.rect();
        let region = map_to_surface(&rect, &self.selection.container(), &surface.geometry())?;
        log::debug!("Selection {rect:?} maps to {region:?} on page {page}");

        Ok(PendingCrop::snapshot(
            page,
            surface.pixels(),
            region,
            self.config.watermark.clone(),
        ))
    }

    /// Drop any pending crop, reset the selection and leave crop mode.
    pub fn cancel(&mut self) {
        self.artifact = None;
        self.selection.reset();
        self.crop_mode = false;
    }

    /// Last successful crop, until cancelled, downloaded or superseded.
    pub fn artifact(&self) -> Option<&CroppedArtifact> {
        self.artifact.as_ref()
    }

    pub fn take_artifact(&mut self) -> Option<CroppedArtifact> {
        self.artifact.take()
    }

    /// Write the pending crop into `dir` under the configured file name,
    /// then reset and leave crop mode. Does nothing without a pending crop.
    pub fn download(&mut self, dir: &Path) -> CropResult<Option<PathBuf>> {
        let Some(artifact) = self.artifact.as_ref() else {
            return Ok(None);
        };

        let path = dir.join(&self.config.download_file_name);
        artifact.save(&path)?;
        log::info!("Saved crop to {}", path.display());

        self.cancel();
        Ok(Some(path))
    }
}

impl std::fmt::Debug for Cropper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cropper")
            .field("selection", &self.selection)
            .field("crop_mode", &self.crop_mode)
            .field("current_page", &self.current_page)
            .field("has_artifact", &self.artifact.is_some())
            .finish()
    }
}
