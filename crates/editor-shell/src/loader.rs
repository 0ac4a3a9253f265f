//! File load sequencing.
//!
//! Whenever the registry's selection lands on a document, the host asks the [`LoadSequencer`]
//! for a [`LoadRequest`] and runs it. The request asynchronously acquires the document's
//! content (retrying transient I/O failures inside a bounded budget), resolves a grammar for
//! the document's extension, applies grammar-then-content to the display collaborator, and
//! finally aligns the view on the document's target line/column with a short bounded retry,
//! since the display's layout may not be ready immediately after content assignment.
//!
//! At most one load is ever in flight: asking for a request for a *different* document cancels
//! the previous request's token, and the superseded task observes that token at its next
//! suspension point and abandons silently. Content read to completion after cancellation is
//! discarded, never applied - the display is only ever mutated by a load that has not been
//! cancelled (check-cancelled-then-mutate, never the reverse).
//!
//! Asking for a request for the *already-current* document yields an align-only request: the
//! content steps are skipped, but alignment re-runs with the document's refreshed targets, so
//! repeated "go to line" requests on the open file keep working without a reload.

use std::io;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::display::DisplaySink;
use crate::document::{Document, DocumentId, DocumentKind};
use editor_shell_lang::{LanguageId, LanguageRegistry, Scope};

/// Delay between file-read retries and between alignment attempts.
const RETRY_DELAY: Duration = Duration::from_millis(50);

/// Cumulative wall-clock budget for retrying a failing file read.
const READ_RETRY_BUDGET: Duration = Duration::from_secs(1);

/// Number of scroll/caret alignment attempts per load.
const ALIGN_ATTEMPTS: usize = 2;

/// Provides file content to the sequencer.
pub trait ContentProvider {
    /// Read the entire file at `path` as a string.
    fn read_all_text(&self, path: &str) -> impl Future<Output = io::Result<String>> + Send;
}

/// [`ContentProvider`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentProvider;

impl ContentProvider for FsContentProvider {
    fn read_all_text(&self, path: &str) -> impl Future<Output = io::Result<String>> + Send {
        let path = path.to_owned();
        async move { tokio::fs::read_to_string(&path).await }
    }
}

/// Resolves file extensions to languages and languages to grammar scopes.
///
/// Implemented by [`editor_shell_lang::LanguageRegistry`]; hosts with their own grammar
/// machinery can implement it directly.
pub trait GrammarResolver {
    /// Language registered for a file extension (no leading dot), if any.
    fn language_for_extension(&self, extension: &str) -> Option<LanguageId>;

    /// An arbitrary available language (the first registered), used as the fallback so
    /// highlighting is never left unconfigured.
    fn first_language(&self) -> Option<LanguageId>;

    /// The grammar scope for a language.
    fn scope_for_language(&self, id: LanguageId) -> Option<Scope>;
}

impl GrammarResolver for LanguageRegistry {
    fn language_for_extension(&self, extension: &str) -> Option<LanguageId> {
        LanguageRegistry::language_for_extension(self, extension)
    }

    fn first_language(&self) -> Option<LanguageId> {
        LanguageRegistry::first_language(self)
    }

    fn scope_for_language(&self, id: LanguageId) -> Option<Scope> {
        self.scope(id).cloned()
    }
}

/// Errors a load sequence can surface.
///
/// Cancellation is *not* an error; a superseded load reports [`LoadOutcome::Cancelled`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file stayed unreadable for the whole retry budget; this is the last I/O error.
    #[error("reading `{path}` failed after the retry budget was exhausted")]
    Read {
        /// Path that could not be read.
        path: String,
        /// The last I/O error observed.
        #[source]
        source: io::Error,
    },
    /// The grammar resolver yielded no usable language at all - a broken collaborator setup,
    /// not a per-document condition.
    #[error("grammar resolver yielded no usable language")]
    NoUsableLanguage,
}

/// Terminal state of a load sequence that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Content (if any) applied and alignment finished.
    Settled,
    /// The sequence was superseded and abandoned at a cancellation check.
    Cancelled,
}

struct CurrentLoad {
    document: DocumentId,
    cancel: CancellationToken,
}

/// Hands out [`LoadRequest`]s and cancels superseded ones.
///
/// All load state is sequence-local (carried by the request); the sequencer itself only
/// remembers which document is current and how to cancel its in-flight work.
#[derive(Default)]
pub struct LoadSequencer {
    current: Option<CurrentLoad>,
}

impl std::fmt::Debug for LoadSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadSequencer")
            .field("current", &self.current.as_ref().map(|c| c.document))
            .finish()
    }
}

impl LoadSequencer {
    /// Create a sequencer with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// The document the current (most recent, possibly finished) load belongs to.
    pub fn current_document(&self) -> Option<DocumentId> {
        self.current.as_ref().map(|current| current.document)
    }

    /// Build the load request for a newly selected document.
    ///
    /// A request for a different document than the current one cancels the in-flight load
    /// first; a request for the same document (by identity, not path) is align-only.
    pub fn begin_load(&mut self, document: &Document) -> LoadRequest {
        match &self.current {
            Some(current) if current.document == document.id() => {
                debug!(document = document.id().get(), "re-selected current document, align only");
                LoadRequest {
                    document: document.clone(),
                    cancel: current.cancel.clone(),
                    reload: false,
                }
            }
            _ => {
                if let Some(previous) = self.current.take() {
                    previous.cancel.cancel();
                }
                let cancel = CancellationToken::new();
                self.current = Some(CurrentLoad {
                    document: document.id(),
                    cancel: cancel.clone(),
                });
                debug!(
                    document = document.id().get(),
                    path = document.path_or_title(),
                    "beginning load"
                );
                LoadRequest {
                    document: document.clone(),
                    cancel,
                    reload: true,
                }
            }
        }
    }

    /// Cancel the in-flight load (if any) without starting a new one, e.g. when the active
    /// tab is closed.
    pub fn cancel_in_flight(&mut self) {
        if let Some(current) = self.current.take() {
            current.cancel.cancel();
        }
    }
}

/// One load sequence for one selected document.
///
/// Obtained from [`LoadSequencer::begin_load`]; [`run`](Self::run) consumes it and can be
/// awaited inline or spawned, since it borrows nothing from the sequencer.
pub struct LoadRequest {
    document: Document,
    cancel: CancellationToken,
    reload: bool,
}

impl LoadRequest {
    /// The document this request loads (a snapshot taken at `begin_load` time).
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// `false` when this request only re-aligns the already-loaded document.
    pub fn is_reload(&self) -> bool {
        self.reload
    }

    /// Execute the sequence: acquire content, resolve a grammar, apply both to the display,
    /// then align the view on the document's target line/column.
    pub async fn run<P, G, D>(
        self,
        provider: &P,
        grammars: &G,
        display: &mut D,
    ) -> Result<LoadOutcome, LoadError>
    where
        P: ContentProvider,
        G: GrammarResolver,
        D: DisplaySink,
    {
        if self.reload {
            let Some(text) = self.acquire_content(provider).await? else {
                return Ok(LoadOutcome::Cancelled);
            };
            let scope = self.resolve_scope(grammars)?;
            if self.cancel.is_cancelled() {
                return Ok(LoadOutcome::Cancelled);
            }
            // Grammar first: content pushed into an unconfigured widget flashes unhighlighted.
            display.install_grammar(&scope);
            display.set_content(&text);
        }

        self.align(display).await
    }

    /// Step 2: content acquisition with bounded retry.
    ///
    /// Returns `None` when cancellation was observed; a read that completes after
    /// cancellation is discarded here and never reaches the display.
    async fn acquire_content<P: ContentProvider>(
        &self,
        provider: &P,
    ) -> Result<Option<String>, LoadError> {
        if self.document.kind() != DocumentKind::File {
            return Ok(Some(String::new()));
        }

        let path = self.document.path_or_title();
        let started = Instant::now();
        loop {
            let read = tokio::select! {
                _ = self.cancel.cancelled() => return Ok(None),
                read = provider.read_all_text(path) => read,
            };
            let err = match read {
                Ok(text) => {
                    if self.cancel.is_cancelled() {
                        return Ok(None);
                    }
                    return Ok(Some(text));
                }
                Err(err) => err,
            };

            if self.cancel.is_cancelled() {
                return Ok(None);
            }
            if started.elapsed() >= READ_RETRY_BUDGET {
                return Err(LoadError::Read {
                    path: path.to_owned(),
                    source: err,
                });
            }

            warn!(path, error = %err, "file read failed, retrying");
            tokio::select! {
                _ = self.cancel.cancelled() => return Ok(None),
                _ = tokio::time::sleep(RETRY_DELAY) => {}
            }
        }
    }

    /// Step 3: extension-based language resolution with first-registered fallback.
    fn resolve_scope<G: GrammarResolver>(&self, grammars: &G) -> Result<Scope, LoadError> {
        let language = grammars
            .language_for_extension(self.document.extension())
            .or_else(|| grammars.first_language())
            .ok_or(LoadError::NoUsableLanguage)?;
        grammars
            .scope_for_language(language)
            .ok_or(LoadError::NoUsableLanguage)
    }

    /// Step 5: bounded-retry scroll/caret alignment.
    ///
    /// The display's layout may not be ready right after content assignment; a short retry
    /// absorbs that race without a readiness callback from the widget. A range error is
    /// permanent (line beyond document end), so it stops the loop instead of retrying.
    async fn align<D: DisplaySink>(&self, display: &mut D) -> Result<LoadOutcome, LoadError> {
        let line = self.document.target_line();
        let column = self.document.target_column();

        for _attempt in 0..ALIGN_ATTEMPTS {
            display.scroll_to_line(line);
            match display.line_to_offset(line) {
                Ok(offset) => display.set_caret(offset.saturating_add(column)),
                Err(err) => {
                    warn!(line, column, %err, "alignment target out of range");
                    break;
                }
            }

            tokio::select! {
                _ = self.cancel.cancelled() => return Ok(LoadOutcome::Cancelled),
                _ = tokio::time::sleep(RETRY_DELAY) => {}
            }
        }

        display.redraw();
        Ok(LoadOutcome::Settled)
    }
}
