//! `editor-shell-headless` - a headless [`DisplaySink`] for `editor-shell`.
//!
//! [`HeadlessDisplay`] stands in for a real text widget: it holds the loaded content in a
//! rope (for line↔offset mapping), tracks the installed grammar scope, caret, and scroll
//! position, and records every sink call in an event log. TUI hosts can render from it;
//! tests assert against it.

use editor_shell::{DisplaySink, LineOutOfRange, Scope};
use ropey::Rope;

/// One recorded [`DisplaySink`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// `install_grammar` with this scope.
    GrammarInstalled(Scope),
    /// `set_content`; the character count of the new content.
    ContentSet {
        /// Characters in the new content.
        chars: usize,
    },
    /// `scroll_to_line` with this 1-based line.
    ScrolledTo(usize),
    /// `set_caret` with this character offset (after clamping).
    CaretMoved(usize),
    /// `redraw`.
    Redrawn,
}

/// A display sink with no screen behind it.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    content: Rope,
    scope: Option<Scope>,
    caret: usize,
    top_line: usize,
    events: Vec<DisplayEvent>,
}

impl HeadlessDisplay {
    /// Create an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current content.
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Number of lines in the current content (a rope always has at least one).
    pub fn line_count(&self) -> usize {
        self.content.len_lines()
    }

    /// The installed grammar scope, if any.
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Caret position as a character offset (clamped to the content length on set).
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The last line scrolled to (1-based); 0 before any scroll.
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Number of redraws requested so far.
    pub fn redraw_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DisplayEvent::Redrawn))
            .count()
    }

    /// All recorded sink calls, in order.
    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    /// Drain the recorded sink calls.
    pub fn take_events(&mut self) -> Vec<DisplayEvent> {
        std::mem::take(&mut self.events)
    }
}

impl DisplaySink for HeadlessDisplay {
    fn install_grammar(&mut self, scope: &Scope) {
        self.scope = Some(scope.clone());
        self.events.push(DisplayEvent::GrammarInstalled(scope.clone()));
    }

    fn set_content(&mut self, text: &str) {
        self.content = Rope::from_str(text);
        self.events.push(DisplayEvent::ContentSet {
            chars: self.content.len_chars(),
        });
    }

    fn scroll_to_line(&mut self, line: usize) {
        self.top_line = line;
        self.events.push(DisplayEvent::ScrolledTo(line));
    }

    fn line_to_offset(&self, line: usize) -> Result<usize, LineOutOfRange> {
        let line_count = self.content.len_lines();
        if line == 0 || line > line_count {
            return Err(LineOutOfRange { line, line_count });
        }
        Ok(self.content.line_to_char(line - 1))
    }

    fn set_caret(&mut self, offset: usize) {
        self.caret = offset.min(self.content.len_chars());
        self.events.push(DisplayEvent::CaretMoved(self.caret));
    }

    fn redraw(&mut self) {
        self.events.push(DisplayEvent::Redrawn);
    }
}
