//! Async boundary around [`generate`](crate::generate).
//!
//! Generation runs on a tokio blocking task so a host event loop stays responsive.
//! A [`GenerationSession`] allows at most one generation in flight, cancels the stale
//! one when a new request arrives, and keeps the last successful print untouched when
//! a later attempt fails.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;
use tracing::{debug, warn};

use crate::{
    foundation::core::Surface,
    foundation::error::{LenticularError, LenticularResult},
    render::pipeline::{GenerateOpts, run_generation},
    sequence::SourceImage,
    settings::LenticularSettings,
};

/// Shared cancellation flag for one generation.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Request cancellation; the result will not be delivered.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// `true` once [`cancel`](Self::cancel) was called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// One generation running on the blocking pool.
#[derive(Debug)]
pub struct GenerationHandle {
    token: CancelToken,
    task: tokio::task::JoinHandle<LenticularResult<Surface>>,
}

impl GenerationHandle {
    /// Start generating on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(
        images: Vec<SourceImage>,
        settings: LenticularSettings,
        opts: GenerateOpts,
    ) -> Self {
        let token = CancelToken::default();
        let flag = Arc::clone(&token.0);
        let task = tokio::task::spawn_blocking(move || {
            run_generation(&images, &settings, &opts, Some(&flag))
        });
        Self { token, task }
    }

    /// Token that cancels this generation from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// `true` when the worker has stopped (successfully or not).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the result; a cancelled generation yields [`LenticularError::Cancelled`]
    /// even if its worker ran to completion.
    pub async fn join(self) -> LenticularResult<Surface> {
        let res = self
            .task
            .await
            .map_err(|e| anyhow!("generation task failed: {e}"))?;
        if self.token.is_cancelled() {
            return Err(LenticularError::Cancelled);
        }
        res
    }
}

/// Serializes generations and retains the latest good print.
#[derive(Debug, Default)]
pub struct GenerationSession {
    opts: GenerateOpts,
    in_flight: Option<GenerationHandle>,
    latest: Option<Arc<Surface>>,
}

impl GenerationSession {
    /// Session using `opts` for every generation.
    pub fn new(opts: GenerateOpts) -> Self {
        Self {
            opts,
            in_flight: None,
            latest: None,
        }
    }

    /// Start a generation, cancelling any one still in flight.
    pub fn start(&mut self, images: Vec<SourceImage>, settings: LenticularSettings) {
        if let Some(stale) = self.in_flight.take() {
            debug!("cancelling stale generation");
            stale.cancel();
        }
        self.in_flight = Some(GenerationHandle::spawn(images, settings, self.opts.clone()));
    }

    /// Token for the generation in flight, if any.
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.in_flight.as_ref().map(GenerationHandle::cancel_token)
    }

    /// Cancel the generation in flight, if any.
    pub fn cancel(&mut self) {
        if let Some(h) = self.in_flight.take() {
            h.cancel();
        }
    }

    /// `true` while a started generation has not been finished or cancelled.
    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Await the generation in flight.
    ///
    /// On success the result becomes [`latest`](Self::latest); on failure the
    /// previous print is kept.
    pub async fn finish(&mut self) -> LenticularResult<Arc<Surface>> {
        let handle = self
            .in_flight
            .take()
            .ok_or_else(|| LenticularError::validation("no generation in flight"))?;
        match handle.join().await {
            Ok(surface) => {
                let surface = Arc::new(surface);
                self.latest = Some(Arc::clone(&surface));
                Ok(surface)
            }
            Err(e) => {
                warn!(error = %e, "generation failed");
                Err(e)
            }
        }
    }

    /// [`start`](Self::start) then [`finish`](Self::finish).
    pub async fn generate(
        &mut self,
        images: Vec<SourceImage>,
        settings: LenticularSettings,
    ) -> LenticularResult<Arc<Surface>> {
        self.start(images, settings);
        self.finish().await
    }

    /// Last successfully generated print.
    pub fn latest(&self) -> Option<&Arc<Surface>> {
        self.latest.as_ref()
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
