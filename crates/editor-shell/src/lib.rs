#![warn(missing_docs)]
//! `editor-shell` - Headless Document/Tab Management Kernel
//!
//! # Overview
//!
//! `editor-shell` is the document/tab management core of a desktop code-editor shell,
//! stripped of its GUI bindings. It decides how "open this file" requests map to creating,
//! reusing, or replacing tabs (including single-preview-tab semantics), and it sequences the
//! asynchronous, cancellable file load that follows a selection change: content acquisition
//! with bounded retry, grammar resolution by extension, grammar-before-content application to
//! a display collaborator, and bounded-retry caret/scroll alignment.
//!
//! Rendering, theming, text editing, and file dialogs are all external collaborators reached
//! through narrow traits ([`ContentProvider`], [`GrammarResolver`], [`DisplaySink`]); the
//! kernel itself is UI-framework free.
//!
//! # Core pieces
//!
//! - [`TabRegistry`] - ordered open-document list, selection set, open-or-reuse/preview
//!   replacement rules, per-document pending view state.
//! - [`LoadSequencer`] / [`LoadRequest`] - at-most-one-in-flight load sequencing with
//!   cooperative cancellation at every suspension point.
//! - [`EditorShell`] - the two wired together for hosts that want the common case.
//!
//! # Quick start
//!
//! ```rust
//! use editor_shell::TabRegistry;
//!
//! let mut tabs = TabRegistry::new();
//! let id = tabs.open_or_create("src/main.rs", false, 10, 2).id();
//!
//! // Re-opening the same path reuses the tab and refreshes its focus target.
//! let again = tabs.open_or_create("SRC/MAIN.RS", false, 42, 0).id();
//! assert_eq!(id, again);
//! assert_eq!(tabs.len(), 1);
//! assert_eq!(tabs.selected(), &[id]);
//! assert_eq!(tabs.document(id).unwrap().target_line(), 42);
//! ```
//!
//! Loading is driven by the host's runtime; see [`LoadRequest::run`] for the async side.
//!
//! # Module description
//!
//! - [`document`] - the [`Document`] tab model
//! - [`tabs`] - the [`TabRegistry`] collection
//! - [`loader`] - load sequencing and the content/grammar collaborator traits
//! - [`display`] - the display collaborator trait
//! - [`shell`] - the [`EditorShell`] facade

pub mod display;
pub mod document;
pub mod loader;
pub mod shell;
pub mod tabs;

pub use display::{DisplaySink, LineOutOfRange};
pub use document::{Document, DocumentId, DocumentKind, PLAIN_TEXT_EXTENSION};
pub use loader::{
    ContentProvider, FsContentProvider, GrammarResolver, LoadError, LoadOutcome, LoadRequest,
    LoadSequencer,
};
pub use shell::EditorShell;
pub use tabs::{SelectionChange, SelectionChangedCallback, TabError, TabRegistry};

pub use editor_shell_lang::{LanguageConfig, LanguageId, LanguageRegistry, Scope};
