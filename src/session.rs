//! Session state: one social context, one question batch, one in-flight
//! generation slot.
//!
//! The batch is only ever replaced wholesale by a generation that passed
//! validation. A second trigger while a generation is outstanding is
//! rejected. Each generation takes a ticket; clearing the session retires
//! outstanding tickets so their late responses are dropped.

use crate::clipboard::Clipboard;
use crate::context::{ContextField, SocialContext};
use crate::error::ApiError;
use crate::export::format_export;
use crate::generation::QuestionGenerator;
use crate::notice::Notice;
use crate::prompt::{GenerationRequest, QuestionMix};
use crate::provider::GenerationBackend;
use crate::question::QuestionBatch;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Which generation the user triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    /// Fresh batch (also used for "regenerate").
    Fresh,
    /// Follow-up batch told to avoid everything in the current batch.
    More,
}

/// What happened to a generation that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The batch replaced the held batch.
    Applied { count: usize },
    /// The session was cleared while the call was outstanding; the result
    /// was dropped.
    Superseded,
}

/// Releases the in-flight slot when the generation finishes or its future
/// is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Session {
    generator: QuestionGenerator,
    mix: QuestionMix,
    context: RwLock<SocialContext>,
    batch: RwLock<QuestionBatch>,
    in_flight: AtomicBool,
    latest_ticket: AtomicU64,
}

impl Session {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self::with_context(backend, SocialContext::default())
    }

    /// Start a session pre-populated with a context, e.g. from a share link.
    pub fn with_context(backend: Arc<dyn GenerationBackend>, context: SocialContext) -> Self {
        Self {
            generator: QuestionGenerator::new(backend),
            mix: QuestionMix::STANDARD,
            context: RwLock::new(context),
            batch: RwLock::new(QuestionBatch::empty()),
            in_flight: AtomicBool::new(false),
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn with_mix(mut self, mix: QuestionMix) -> Self {
        self.mix = mix;
        self
    }

    /// Snapshot of the current context.
    pub fn context(&self) -> SocialContext {
        self.context.read().clone()
    }

    pub fn update(&self, field: ContextField, value: impl Into<String>) {
        self.context.write().update(field, value);
    }

    pub fn set_context(&self, context: SocialContext) {
        *self.context.write() = context;
    }

    /// Snapshot of the held batch.
    pub fn batch(&self) -> QuestionBatch {
        self.batch.read().clone()
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Shareable query string for the current context.
    pub fn share_query(&self) -> String {
        self.context.read().to_query_string()
    }

    /// Drop the held batch and retire any outstanding generation so its
    /// response is not applied. The in-flight slot stays taken until that
    /// call actually returns.
    pub fn clear(&self) {
        self.latest_ticket.fetch_add(1, Ordering::AcqRel);
        *self.batch.write() = QuestionBatch::empty();
        debug!("Session cleared");
    }

    /// Build the request a trigger of `kind` would send right now.
    pub fn request_for(&self, kind: GenerationKind) -> GenerationRequest {
        let request = GenerationRequest::new(&self.context.read()).with_mix(self.mix);
        match kind {
            GenerationKind::Fresh => request,
            GenerationKind::More => request.with_exclusions(self.batch.read().texts()),
        }
    }

    /// Run one generation and apply its batch if it is still current.
    pub async fn generate(&self, kind: GenerationKind) -> Result<GenerationOutcome, ApiError> {
        let request = self.request_for(kind);
        if request.context().is_empty() {
            return Err(ApiError::EmptyContext);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ApiError::GenerationInFlight);
        }
        let _slot = InFlightGuard(&self.in_flight);
        let ticket = self.latest_ticket.fetch_add(1, Ordering::AcqRel) + 1;

        let batch = self.generator.generate(&request).await?;

        let mut held = self.batch.write();
        if self.latest_ticket.load(Ordering::Acquire) != ticket {
            debug!(ticket, "Dropping response from superseded generation");
            return Ok(GenerationOutcome::Superseded);
        }
        let count = batch.len();
        *held = batch;
        info!(count, kind = ?kind, "Applied generated questions");
        Ok(GenerationOutcome::Applied { count })
    }

    /// [`Session::generate`] with the result converted to a notice.
    pub async fn trigger(&self, kind: GenerationKind) -> Notice {
        match self.generate(kind).await {
            Ok(GenerationOutcome::Applied { .. }) => Notice::success(match kind {
                GenerationKind::Fresh => "Questions generated!",
                GenerationKind::More => "Fresh questions generated!",
            }),
            Ok(GenerationOutcome::Superseded) => Notice::info("Discarded an outdated result"),
            Err(e) => Notice::from_error(&e),
        }
    }

    /// Copy one question's text.
    pub fn copy_question(&self, index: usize, clipboard: &dyn Clipboard) -> Notice {
        let text = match self.batch.read().get(index) {
            Some(question) => question.text.clone(),
            None => return Notice::error("No question at that position"),
        };
        match clipboard.copy(&text) {
            Ok(()) => Notice::success("Copied to clipboard!"),
            Err(e) => Notice::from_error(&e),
        }
    }

    /// Copy the full export block.
    pub fn copy_export(&self, clipboard: &dyn Clipboard) -> Notice {
        let text = self.export();
        match clipboard.copy(&text) {
            Ok(()) => Notice::success("All questions copied to clipboard!"),
            Err(e) => Notice::from_error(&e),
        }
    }

    pub fn export(&self) -> String {
        format_export(&self.batch.read(), &self.context.read())
    }
}
