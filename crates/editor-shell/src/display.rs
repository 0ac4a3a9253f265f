//! Display collaborator contract.
//!
//! The text widget (buffer, caret rendering, scrolling) is external to this kernel; the load
//! sequencer only ever drives it through this trait.

use editor_shell_lang::Scope;
use thiserror::Error;

/// Raised by [`DisplaySink::line_to_offset`] when the requested line does not exist in the
/// display's current document - either because layout is not finished yet or because the line
/// is beyond the document end.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line} out of range (document has {line_count} lines)")]
pub struct LineOutOfRange {
    /// The requested 1-based line number.
    pub line: usize,
    /// The number of lines the display document currently has.
    pub line_count: usize,
}

/// Sink for loaded documents.
///
/// The sequencer's call order is part of the contract: [`install_grammar`] is always invoked
/// before [`set_content`] so the widget never shows a flash of unhighlighted text.
///
/// [`install_grammar`]: DisplaySink::install_grammar
/// [`set_content`]: DisplaySink::set_content
pub trait DisplaySink {
    /// Install the grammar/scope used to highlight subsequent content.
    fn install_grammar(&mut self, scope: &Scope);

    /// Replace the displayed document content.
    fn set_content(&mut self, text: &str);

    /// Scroll the given 1-based line into view.
    fn scroll_to_line(&mut self, line: usize);

    /// Resolve a 1-based line number to the character offset of its first character.
    fn line_to_offset(&self, line: usize) -> Result<usize, LineOutOfRange>;

    /// Place the caret at a character offset.
    fn set_caret(&mut self, offset: usize);

    /// Force a redraw.
    fn redraw(&mut self);
}
