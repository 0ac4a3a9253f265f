//! Document (tab) model.
//!
//! A [`Document`] is one open tab: an editable file, an untitled scratch buffer, or a preview
//! pane. Tab items only retain lightweight bookkeeping (dirty text, pending view targets);
//! the actual text buffer lives in the display collaborator, which holds at most one loaded
//! document at a time.

use std::path::Path;
use std::time::SystemTime;

/// Fixed extension reported for documents that are not backed by a file.
pub const PLAIN_TEXT_EXTENSION: &str = "txt";

/// Opaque identifier for a [`Document`] in a [`crate::TabRegistry`].
///
/// Identity, not path, is what distinguishes documents: two documents can transiently share a
/// path (a stale preview being replaced), so consumers such as the load sequencer must compare
/// ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What a document represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A scratch buffer with no backing file.
    Untitled,
    /// A transient preview pane with no backing file.
    Preview,
    /// A document backed by a filesystem path.
    File,
}

/// One open tab.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    kind: DocumentKind,
    path_or_title: String,
    is_preview: bool,
    is_dirty: bool,
    pending_text: Option<String>,
    last_modified: Option<SystemTime>,
    target_line: usize,
    target_column: usize,
}

impl Document {
    pub(crate) fn file(id: DocumentId, path: impl Into<String>) -> Self {
        Self::new(id, DocumentKind::File, path.into())
    }

    pub(crate) fn untitled(id: DocumentId, title: impl Into<String>) -> Self {
        Self::new(id, DocumentKind::Untitled, title.into())
    }

    fn new(id: DocumentId, kind: DocumentKind, path_or_title: String) -> Self {
        Self {
            id,
            kind,
            path_or_title,
            is_preview: false,
            is_dirty: false,
            pending_text: None,
            last_modified: None,
            target_line: 1,
            target_column: 0,
        }
    }

    /// The document's registry identity.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// What this document represents.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Filesystem path for [`DocumentKind::File`], display title otherwise.
    pub fn path_or_title(&self) -> &str {
        &self.path_or_title
    }

    /// Title to show on the tab: the file-name component for file documents, the title itself
    /// otherwise.
    pub fn display_title(&self) -> &str {
        // TODO: disambiguate tabs that share a file name by including more of the path.
        if self.kind == DocumentKind::File {
            Path::new(&self.path_or_title)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(&self.path_or_title)
        } else {
            &self.path_or_title
        }
    }

    /// File extension without the leading dot; [`PLAIN_TEXT_EXTENSION`] for documents not
    /// backed by a file, and empty for extension-less paths.
    pub fn extension(&self) -> &str {
        if self.kind == DocumentKind::File {
            Path::new(&self.path_or_title)
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("")
        } else {
            PLAIN_TEXT_EXTENSION
        }
    }

    /// Whether this is a preview tab (replaced in place by the next preview-opened file
    /// instead of accumulating a new tab).
    pub fn is_preview(&self) -> bool {
        self.is_preview
    }

    pub(crate) fn set_preview(&mut self, preview: bool) {
        self.is_preview = preview;
    }

    /// Whether the document has unsaved edits (set by the editing collaborator).
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.is_dirty = dirty;
    }

    /// Unsaved buffer content kept so edits can be restored when the tab is reactivated before
    /// being saved. Never persisted to disk by this kernel.
    pub fn pending_text(&self) -> Option<&str> {
        self.pending_text.as_deref()
    }

    pub(crate) fn set_pending_text(&mut self, text: Option<String>) {
        self.pending_text = text;
    }

    /// Informational last-modified timestamp, host-set.
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    pub(crate) fn set_last_modified(&mut self, at: SystemTime) {
        self.last_modified = Some(at);
    }

    /// 1-based line to focus the next time this document becomes the visible selection.
    ///
    /// The target belongs to the document, not the view: it survives tab reordering and is
    /// consumed (read, not cleared) by the display step, so repeated focus requests on the
    /// same open file keep working.
    pub fn target_line(&self) -> usize {
        self.target_line
    }

    /// Character offset within [`Self::target_line`] to place the caret at.
    pub fn target_column(&self) -> usize {
        self.target_column
    }

    pub(crate) fn set_targets(&mut self, line: usize, column: usize) {
        self.target_line = line;
        self.target_column = column;
    }
}
