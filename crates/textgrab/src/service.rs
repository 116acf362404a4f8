use std::sync::Arc;
use std::time::Duration;

use textgrab_ocr::{ImagePayload, OcrEngine, OcrError};
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, error, info};

use crate::config::Configuration;
use crate::error::{ExtractError, ExtractResult};
use crate::progress::{ProgressSink, ProgressTicker};

type EngineLoader = Arc<dyn Fn() -> Result<Box<dyn OcrEngine>, OcrError> + Send + Sync>;

/// Owns the lifecycle of one OCR engine and sequences recognition calls.
///
/// The engine is loaded lazily on the first call and lives until
/// [`terminate`](Self::terminate). At most one extraction runs at a time;
/// overlapping calls fail fast with [`ExtractError::ConcurrentRequest`]
/// instead of queuing. The service is an explicit object: construct it once
/// and hand out references, there is no global instance.
pub struct RecognitionService {
    loader: EngineLoader,
    tick_interval: Duration,
    engine: Mutex<Option<Box<dyn OcrEngine>>>,
}

impl RecognitionService {
    pub fn new(config: Configuration) -> Self {
        let tick_interval = config.tick_interval;
        Self::with_loader(tick_interval, move || config.create_engine())
    }

    /// Build a service around a custom engine factory. Tests use this to
    /// script load failures and count engine loads.
    pub fn with_loader(
        tick_interval: Duration,
        loader: impl Fn() -> Result<Box<dyn OcrEngine>, OcrError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            loader: Arc::new(loader),
            tick_interval,
            engine: Mutex::new(None),
        }
    }

    /// Load the engine if it is not loaded yet. Idempotent; a failed load
    /// leaves the service uninitialized so the next call retries.
    pub async fn initialize(&self) -> ExtractResult<()> {
        let mut guard = self
            .engine
            .try_lock()
            .map_err(|_| ExtractError::ConcurrentRequest)?;
        if guard.is_none() {
            *guard = Some(self.load_engine().await?);
        }
        Ok(())
    }

    /// Recognize text in `payload`, reporting synthetic progress through
    /// `on_progress` while the call is in flight.
    ///
    /// Progress starts at 5, stays at or below 90 until the engine returns,
    /// and ends with exactly 100 on success. On failure the ticker is
    /// cancelled before the error is returned, so no further progress
    /// values are reported. The returned text is edge-trimmed.
    pub async fn extract_text(
        &self,
        payload: ImagePayload,
        on_progress: ProgressSink,
    ) -> ExtractResult<String> {
        let mut guard = self
            .engine
            .try_lock()
            .map_err(|_| ExtractError::ConcurrentRequest)?;
        if guard.is_none() {
            *guard = Some(self.load_engine().await?);
        }
        let mut engine = guard.take().ok_or(ExtractError::EngineLoad)?;

        let ticker = ProgressTicker::start(self.tick_interval, on_progress);
        let outcome = task::spawn_blocking(move || {
            let result = engine.recognize(&payload);
            (engine, result)
        })
        .await;

        match outcome {
            Ok((engine, Ok(recognition))) => {
                *guard = Some(engine);
                ticker.complete();
                debug!(
                    confidence = ?recognition.confidence,
                    chars = recognition.text.len(),
                    "recognition finished"
                );
                Ok(recognition.text.trim().to_string())
            }
            Ok((engine, Err(err))) => {
                // The engine handle itself is presumed undamaged by a failed
                // call, so the service stays ready.
                *guard = Some(engine);
                ticker.cancel();
                error!(%err, "text recognition failed");
                Err(ExtractError::Recognition)
            }
            Err(join_err) => {
                // The engine was lost with the panicked task; the next call
                // re-initializes.
                ticker.cancel();
                error!(%join_err, "recognition task failed");
                Err(ExtractError::Recognition)
            }
        }
    }

    /// Release the engine, waiting for any in-flight extraction first.
    /// No-op when uninitialized; safe to call repeatedly.
    pub async fn terminate(&self) {
        let mut guard = self.engine.lock().await;
        if let Some(engine) = guard.take() {
            info!(engine = engine.name(), "releasing ocr engine");
            if let Err(join_err) = task::spawn_blocking(move || engine.release()).await {
                error!(%join_err, "engine release task failed");
            }
        }
    }

    /// Whether an engine handle is currently loaded.
    pub async fn is_initialized(&self) -> bool {
        self.engine.lock().await.is_some()
    }

    async fn load_engine(&self) -> ExtractResult<Box<dyn OcrEngine>> {
        let loader = Arc::clone(&self.loader);
        match task::spawn_blocking(move || loader()).await {
            Ok(Ok(engine)) => {
                debug!(engine = engine.name(), "ocr engine loaded");
                Ok(engine)
            }
            Ok(Err(err)) => {
                error!(%err, "ocr engine load failed");
                Err(ExtractError::EngineLoad)
            }
            Err(join_err) => {
                error!(%join_err, "ocr engine load task failed");
                Err(ExtractError::EngineLoad)
            }
        }
    }
}
