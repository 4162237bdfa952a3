//! Editing session: the current source, transform and settings.
//!
//! The session owns the single `(SourceImage, Transform, PixelSettings)`
//! triple. Every edit bumps a generation counter and schedules a debounced
//! resample. A resample result is only committed when its generation is
//! still current; stale results are dropped. A failed operation never
//! touches the last good buffer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use grid_resample::{
    resample, ColorAdjust, PixelBuffer, PixelSettings, SourceImage, Transform,
    TransformController, TransformEvent,
};
use tokio::sync::Mutex;

use crate::error::PipelineError;
use crate::models::AppConfig;
use crate::rendering::{decode_source, ExportedImage, Presenter, RenderInput};
use crate::services::Debouncer;

/// Dimensions of the loaded source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
}

/// Transform plus drag state, as seen by input handlers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    pub transform: Transform,
    pub dragging: bool,
}

/// Partial settings update; `None` fields are left unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub grid_size: Option<u32>,
    pub contrast: Option<i32>,
    pub saturation: Option<i32>,
    pub show_grid: Option<bool>,
}

/// How a preview is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Nearest-neighbor magnification of the resampled buffer
    #[default]
    Pixel,
    /// The viewport crop sampled at display resolution
    Source,
}

struct EditorSession {
    source: Option<Arc<SourceImage>>,
    controller: TransformController,
    settings: PixelSettings,
    generation: u64,
    latest: Option<(u64, Arc<PixelBuffer>)>,
    last_error: Option<String>,
}

#[derive(Clone)]
struct Snapshot {
    generation: u64,
    source: Arc<SourceImage>,
    transform: Transform,
    settings: PixelSettings,
}

impl EditorSession {
    fn snapshot(&self) -> Result<Snapshot, PipelineError> {
        let source = self.source.clone().ok_or(PipelineError::EmptyInput)?;
        Ok(Snapshot {
            generation: self.generation,
            source,
            transform: self.controller.transform(),
            settings: self.settings,
        })
    }

    fn fresh_buffer(&self) -> Option<Arc<PixelBuffer>> {
        self.latest
            .as_ref()
            .filter(|(generation, _)| *generation == self.generation)
            .map(|(_, buffer)| buffer.clone())
    }
}

enum Commit {
    Stored(Arc<PixelBuffer>),
    Failed(PipelineError),
    Stale,
}

/// Shared editing session with debounced recompute
pub struct SessionService {
    state: Mutex<EditorSession>,
    debouncer: Debouncer,
    presenter: Arc<Presenter>,
    default_multiplier: u32,
    resample_passes: AtomicU64,
}

impl SessionService {
    pub fn new(config: &AppConfig) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(EditorSession {
                source: None,
                controller: TransformController::new(),
                settings: config.defaults.pixel_settings(),
                generation: 0,
                latest: None,
                last_error: None,
            }),
            debouncer: Debouncer::new(config.debounce()),
            presenter: Arc::new(Presenter::new(config)),
            default_multiplier: config.defaults.export_multiplier,
            resample_passes: AtomicU64::new(0),
        })
    }

    /// Decode uploaded bytes and make them the current source.
    ///
    /// On failure the previous source, transform and buffer stay in place.
    pub async fn load_source(self: &Arc<Self>, bytes: Vec<u8>) -> Result<SourceInfo, PipelineError> {
        let decoded = tokio::task::spawn_blocking(move || decode_source(&bytes))
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))?;

        match decoded {
            Ok(source) => Ok(self.set_source(source).await),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected source image");
                self.state.lock().await.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace the source wholesale and reset the transform.
    pub async fn set_source(self: &Arc<Self>, source: SourceImage) -> SourceInfo {
        let info = SourceInfo {
            width: source.width(),
            height: source.height(),
        };
        {
            let mut state = self.state.lock().await;
            state.source = Some(Arc::new(source));
            state.controller.reset();
            state.last_error = None;
            state.generation += 1;
        }
        tracing::info!(width = info.width, height = info.height, "Source image loaded");
        self.schedule_recompute();
        info
    }

    /// Apply one pointer or wheel event.
    pub async fn apply_event(self: &Arc<Self>, event: TransformEvent) -> ControllerState {
        let (state_after, changed, has_source) = {
            let mut state = self.state.lock().await;
            let before = state.controller.transform();
            let after = state.controller.apply(event);
            let changed = after != before;
            if changed {
                state.generation += 1;
            }
            (
                ControllerState {
                    transform: after,
                    dragging: state.controller.is_dragging(),
                },
                changed,
                state.source.is_some(),
            )
        };

        if changed {
            tracing::debug!(?event, transform = ?state_after.transform, "Transform updated");
            if has_source {
                self.schedule_recompute();
            }
        }
        state_after
    }

    /// Merge a settings update, clamping out-of-range values.
    pub async fn update_settings(self: &Arc<Self>, update: SettingsUpdate) -> PixelSettings {
        let (settings, needs_resample) = {
            let mut state = self.state.lock().await;
            let before = state.settings;
            let after = PixelSettings {
                grid_size: update.grid_size.unwrap_or(before.grid_size),
                contrast: update.contrast.unwrap_or(before.contrast),
                saturation: update.saturation.unwrap_or(before.saturation),
                show_grid: update.show_grid.unwrap_or(before.show_grid),
            }
            .clamped();
            state.settings = after;

            let needs_resample = after.grid_size != before.grid_size
                || after.contrast != before.contrast
                || after.saturation != before.saturation;
            if needs_resample {
                state.generation += 1;
            }
            (after, needs_resample && state.source.is_some())
        };

        tracing::debug!(?settings, "Settings updated");
        if needs_resample {
            self.schedule_recompute();
        }
        settings
    }

    pub async fn settings(&self) -> PixelSettings {
        self.state.lock().await.settings
    }

    pub async fn controller_state(&self) -> ControllerState {
        let state = self.state.lock().await;
        ControllerState {
            transform: state.controller.transform(),
            dragging: state.controller.is_dragging(),
        }
    }

    pub async fn source_info(&self) -> Option<SourceInfo> {
        self.state.lock().await.source.as_ref().map(|s| SourceInfo {
            width: s.width(),
            height: s.height(),
        })
    }

    /// Most recent successfully committed buffer, possibly outdated.
    pub async fn last_good(&self) -> Option<Arc<PixelBuffer>> {
        self.state
            .lock()
            .await
            .latest
            .as_ref()
            .map(|(_, buffer)| buffer.clone())
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    /// Current edit generation.
    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }

    /// Number of resample passes actually executed.
    pub fn resample_passes(&self) -> u64 {
        self.resample_passes.load(Ordering::Relaxed)
    }

    /// Buffer for the current state, resampling now if the last result is outdated.
    pub async fn buffer(self: &Arc<Self>) -> Result<Arc<PixelBuffer>, PipelineError> {
        loop {
            let snapshot = {
                let mut state = self.state.lock().await;
                if let Some(buffer) = state.fresh_buffer() {
                    return Ok(buffer);
                }
                match state.snapshot() {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        state.last_error = Some(e.to_string());
                        return Err(e);
                    }
                }
            };

            let generation = snapshot.generation;
            let result = self.run_resample(snapshot).await;
            match self.commit(generation, result).await {
                Commit::Stored(buffer) => return Ok(buffer),
                Commit::Failed(e) => return Err(e),
                Commit::Stale => continue,
            }
        }
    }

    /// Encoded preview PNG of the current state.
    pub async fn preview(
        self: &Arc<Self>,
        size: Option<u32>,
        show_grid: Option<bool>,
        mode: PreviewMode,
    ) -> Result<Vec<u8>, PipelineError> {
        let size = size.unwrap_or(self.presenter.preview_cap());
        let presenter = self.presenter.clone();

        match mode {
            PreviewMode::Pixel => {
                let buffer = self.buffer().await?;
                let show_grid = show_grid.unwrap_or(self.settings().await.show_grid);
                blocking(move || {
                    presenter.render_preview_png(RenderInput::Buffer(&buffer), size, show_grid)
                })
                .await
            }
            PreviewMode::Source => {
                let snapshot = self.state.lock().await.snapshot()?;
                let show_grid = show_grid.unwrap_or(snapshot.settings.show_grid);
                blocking(move || {
                    let input = RenderInput::Source {
                        source: &snapshot.source,
                        transform: snapshot.transform,
                        adjust: snapshot.settings.color_adjust(),
                        grid_size: snapshot.settings.grid_size,
                    };
                    presenter.render_preview_png(input, size, show_grid)
                })
                .await
            }
        }
    }

    /// Export the current buffer at `multiplier` (or the configured default).
    pub async fn export(self: &Arc<Self>, multiplier: Option<u32>) -> Result<ExportedImage, PipelineError> {
        let buffer = self.buffer().await?;
        let multiplier = multiplier.unwrap_or(self.default_multiplier);
        let presenter = self.presenter.clone();
        blocking(move || presenter.export(&buffer, multiplier)).await
    }

    fn schedule_recompute(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.debouncer.schedule(async move {
            if let Err(e) = this.buffer().await {
                tracing::warn!(error = %e, "Debounced resample failed");
            }
        });
    }

    async fn run_resample(&self, snapshot: Snapshot) -> Result<PixelBuffer, PipelineError> {
        self.resample_passes.fetch_add(1, Ordering::Relaxed);
        blocking(move || {
            let started = Instant::now();
            let adjust = ColorAdjust::new(snapshot.settings.contrast, snapshot.settings.saturation);
            let buffer = resample(
                &snapshot.source,
                &snapshot.transform,
                snapshot.settings.grid_size,
                &adjust,
            )?;
            tracing::debug!(
                generation = snapshot.generation,
                grid_size = buffer.grid_size(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "Resampled"
            );
            Ok(buffer)
        })
        .await
    }

    async fn commit(&self, generation: u64, result: Result<PixelBuffer, PipelineError>) -> Commit {
        let mut state = self.state.lock().await;
        if generation != state.generation {
            tracing::debug!(
                generation,
                current = state.generation,
                "Discarding stale resample result"
            );
            return Commit::Stale;
        }

        match result {
            Ok(buffer) => {
                let buffer = Arc::new(buffer);
                state.latest = Some((generation, buffer.clone()));
                state.last_error = None;
                Commit::Stored(buffer)
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
                Commit::Failed(e)
            }
        }
    }
}

/// Run CPU-bound pipeline work off the async executor.
async fn blocking<T, F>(f: F) -> Result<T, PipelineError>
where
    F: FnOnce() -> Result<T, PipelineError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))?
}
