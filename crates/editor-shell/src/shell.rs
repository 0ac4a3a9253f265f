//! Shell facade: registry and sequencer wired together.
//!
//! Hosts that keep their own event plumbing can use [`crate::TabRegistry`] and
//! [`crate::LoadSequencer`] directly (subscribe to the registry, forward selection changes
//! into the sequencer). [`EditorShell`] is the ready-made wiring for the common case: every
//! operation that moves the selection hands back the [`LoadRequest`] the host should run.

use crate::document::{Document, DocumentId};
use crate::loader::{LoadRequest, LoadSequencer};
use crate::tabs::{TabError, TabRegistry};

/// A tab registry and a load sequencer, wired.
#[derive(Debug, Default)]
pub struct EditorShell {
    tabs: TabRegistry,
    loads: LoadSequencer,
}

impl EditorShell {
    /// Create an empty shell.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying tab registry.
    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    /// Mutable access to the tab registry (dirty flags, pending text, subscriptions).
    pub fn tabs_mut(&mut self) -> &mut TabRegistry {
        &mut self.tabs
    }

    /// Open a file at a line/column and return the load request for the resulting selection.
    ///
    /// Tab create/reuse/replace semantics are [`TabRegistry::open_or_create`]'s; the returned
    /// request is align-only when the file was already the active document.
    pub fn open_file(
        &mut self,
        path: &str,
        open_in_preview: bool,
        line: usize,
        column: usize,
    ) -> LoadRequest {
        let document = self.tabs.open_or_create(path, open_in_preview, line, column);
        self.loads.begin_load(document)
    }

    /// Open an untitled scratch document and return its (empty-content) load request.
    pub fn open_untitled(&mut self, title: &str) -> LoadRequest {
        let document = self.tabs.open_untitled(title);
        self.loads.begin_load(document)
    }

    /// Activate an already-open document, as from a tab click.
    pub fn activate(&mut self, id: DocumentId) -> Result<LoadRequest, TabError> {
        self.tabs.select(id)?;
        match self.tabs.document(id) {
            Some(document) => Ok(self.loads.begin_load(document)),
            None => Err(TabError::DocumentNotFound(id)),
        }
    }

    /// Close a tab. Cancels the in-flight load if it belonged to the closed document, and
    /// returns the load request for the document that selection moved to, if any.
    pub fn close(&mut self, id: DocumentId) -> Result<Option<LoadRequest>, TabError> {
        let previously_selected = self.tabs.selected().first().copied();
        self.tabs.close(id)?;
        if self.loads.current_document() == Some(id) {
            self.loads.cancel_in_flight();
        }

        if previously_selected != Some(id) {
            // Selection untouched; nothing new to load.
            return Ok(None);
        }
        match self.tabs.selected_document() {
            Some(document) => Ok(Some(self.loads.begin_load(document))),
            None => Ok(None),
        }
    }

    /// The active document, if any.
    pub fn selected_document(&self) -> Option<&Document> {
        self.tabs.selected_document()
    }
}
