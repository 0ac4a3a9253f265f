//! Tab registry: the ordered list of open documents and the current selection.
//!
//! The registry resolves "open this file" requests into tab create/reuse/replace decisions
//! and owns per-document pending view state. It is pure in-memory bookkeeping: no operation
//! here touches storage, and `open_or_create` in particular cannot fail and is idempotent
//! with respect to tab count.
//!
//! Rules, in the order they are applied by [`TabRegistry::open_or_create`]:
//!
//! 1. **Preview replacement** - at most one preview tab exists at any time. Opening a
//!    *different* file in preview mode deletes the stale preview document and inserts the new
//!    one at the same index, preserving the visual tab position.
//! 2. **Reuse** - a file that is already open (case-insensitive path comparison) is reselected
//!    and its target line/column refreshed; no new tab, no forced reload (reloading is the
//!    sequencer's business, keyed off selection changes).
//! 3. **Create** - otherwise a new tab is inserted immediately after the currently selected
//!    tab, so files open next to where the user is working, or at index 0 when nothing is
//!    selected.

use crate::document::{Document, DocumentId, DocumentKind};
use thiserror::Error;

/// Registry-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TabError {
    /// A document id was not found in the registry.
    #[error("document not found: {0:?}")]
    DocumentNotFound(DocumentId),
}

/// Notification payload for selection changes.
///
/// `previous` and `selected` are the first members of the selection set before and after the
/// change. Observers are notified on every [`TabRegistry::select`], including re-selection of
/// the already-current document; consumers that only care about identity changes can compare
/// the two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    /// First selected document before the change, if any.
    pub previous: Option<DocumentId>,
    /// First selected document after the change, if any.
    pub selected: Option<DocumentId>,
}

/// Selection change callback function type.
pub type SelectionChangedCallback = Box<dyn FnMut(&SelectionChange) + Send>;

/// The ordered collection of open documents and the current selection.
#[derive(Default)]
pub struct TabRegistry {
    next_document_id: u64,
    opened: Vec<Document>,
    // Modeled as an ordered set to leave room for multi-select; single-selection editors keep
    // it at 0 or 1 entries and the first entry is "the" selection.
    selected: Vec<DocumentId>,
    callbacks: Vec<SelectionChangedCallback>,
}

impl std::fmt::Debug for TabRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabRegistry")
            .field("opened_count", &self.opened.len())
            .field("selected", &self.selected)
            .finish()
    }
}

impl TabRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open documents.
    pub fn len(&self) -> usize {
        self.opened.len()
    }

    /// Returns `true` if there are no open documents.
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty()
    }

    /// All open documents, in tab display order.
    pub fn documents(&self) -> &[Document] {
        &self.opened
    }

    /// Look up a document by id.
    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.opened.iter().find(|doc| doc.id() == id)
    }

    /// The selection set. The first entry is the active document.
    pub fn selected(&self) -> &[DocumentId] {
        &self.selected
    }

    /// The active (first selected) document, if any.
    pub fn selected_document(&self) -> Option<&Document> {
        let id = *self.selected.first()?;
        self.document(id)
    }

    /// Subscribe to selection changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SelectionChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Resolve an "open this file" request into a tab decision and select the result.
    ///
    /// - `path` is compared case-insensitively against open file documents.
    /// - `open_in_preview` marks the resulting tab (if newly created) as the single preview
    ///   tab, replacing a stale preview for a different file in place.
    /// - `line` (1-based) and `column` (character offset within the line) become the
    ///   document's focus target; they are refreshed even when the tab is reused, so repeated
    ///   "go to line" requests on an already-open file still take effect.
    ///
    /// Returns the resolved document. Calling this repeatedly with identical arguments always
    /// resolves to the same single document after the first call.
    pub fn open_or_create(
        &mut self,
        path: &str,
        open_in_preview: bool,
        line: usize,
        column: usize,
    ) -> &Document {
        if open_in_preview
            && let Some(stale) = self
                .opened
                .iter()
                .position(|doc| doc.is_preview() && !path_eq_fold(doc.path_or_title(), path))
        {
            let id = self.alloc_id();
            let mut document = Document::file(id, path);
            document.set_preview(true);
            document.set_targets(line, column);
            // Delete the stale preview at its index and put the new one in its place so the
            // tab keeps its visual position.
            self.opened[stale] = document;
            self.select_resolved(id);
            return &self.opened[stale];
        }

        if let Some(index) = self.opened.iter().position(|doc| {
            doc.kind() == DocumentKind::File && path_eq_fold(doc.path_or_title(), path)
        }) {
            let id = {
                let document = &mut self.opened[index];
                document.set_targets(line, column);
                document.id()
            };
            self.select_resolved(id);
            return &self.opened[index];
        }

        let id = self.alloc_id();
        let mut document = Document::file(id, path);
        document.set_preview(open_in_preview);
        document.set_targets(line, column);
        let index = self.insertion_index();
        self.opened.insert(index, document);
        self.select_resolved(id);
        &self.opened[index]
    }

    /// Open a new untitled scratch document next to the selection and select it.
    pub fn open_untitled(&mut self, title: &str) -> &Document {
        let id = self.alloc_id();
        let document = Document::untitled(id, title);
        let index = self.insertion_index();
        self.opened.insert(index, document);
        self.select_resolved(id);
        &self.opened[index]
    }

    /// Select a document, clearing any previous selection, and notify observers.
    pub fn select(&mut self, id: DocumentId) -> Result<(), TabError> {
        if self.document(id).is_none() {
            return Err(TabError::DocumentNotFound(id));
        }
        self.select_resolved(id);
        Ok(())
    }

    /// Close a document. If it was the active selection, selection moves to the document now
    /// occupying its index (or the last document, or nothing), and observers are notified.
    pub fn close(&mut self, id: DocumentId) -> Result<(), TabError> {
        let Some(index) = self.opened.iter().position(|doc| doc.id() == id) else {
            return Err(TabError::DocumentNotFound(id));
        };
        self.opened.remove(index);

        if self.selected.first() != Some(&id) {
            self.selected.retain(|selected| *selected != id);
            return Ok(());
        }

        self.selected.clear();
        let next = self
            .opened
            .get(index)
            .or_else(|| self.opened.last())
            .map(Document::id);
        if let Some(next) = next {
            self.selected.push(next);
        }
        self.notify(SelectionChange {
            previous: Some(id),
            selected: next,
        });
        Ok(())
    }

    /// Mark a document dirty/clean (set by the editing collaborator).
    pub fn set_dirty(&mut self, id: DocumentId, dirty: bool) -> Result<(), TabError> {
        self.document_mut(id)?.set_dirty(dirty);
        Ok(())
    }

    /// Stash or clear a document's unsaved buffer content.
    pub fn set_pending_text(
        &mut self,
        id: DocumentId,
        text: Option<String>,
    ) -> Result<(), TabError> {
        self.document_mut(id)?.set_pending_text(text);
        Ok(())
    }

    /// Record a document's last-modified timestamp.
    pub fn set_last_modified(
        &mut self,
        id: DocumentId,
        at: std::time::SystemTime,
    ) -> Result<(), TabError> {
        self.document_mut(id)?.set_last_modified(at);
        Ok(())
    }

    fn alloc_id(&mut self) -> DocumentId {
        let id = DocumentId::new(self.next_document_id);
        self.next_document_id = self.next_document_id.saturating_add(1);
        id
    }

    /// New tabs open adjacent to the active tab, not at the end.
    fn insertion_index(&self) -> usize {
        self.selected
            .first()
            .and_then(|id| self.opened.iter().position(|doc| doc.id() == *id))
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    fn document_mut(&mut self, id: DocumentId) -> Result<&mut Document, TabError> {
        self.opened
            .iter_mut()
            .find(|doc| doc.id() == id)
            .ok_or(TabError::DocumentNotFound(id))
    }

    fn select_resolved(&mut self, id: DocumentId) {
        let previous = self.selected.first().copied();
        self.selected.clear();
        self.selected.push(id);
        self.notify(SelectionChange {
            previous,
            selected: Some(id),
        });
    }

    fn notify(&mut self, change: SelectionChange) {
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

/// Case-insensitive path comparison, regardless of platform.
fn path_eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
