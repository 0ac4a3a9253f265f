use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use editor_shell::{DocumentKind, SelectionChange, TabError, TabRegistry};
use pretty_assertions::assert_eq;

fn titles(tabs: &TabRegistry) -> Vec<&str> {
    tabs.documents().iter().map(|doc| doc.path_or_title()).collect()
}

#[test]
fn test_distinct_paths_open_distinct_tabs_exactly_once() {
    let mut tabs = TabRegistry::new();
    for path in ["a.txt", "b.txt", "c.txt", "a.txt", "b.txt"] {
        tabs.open_or_create(path, false, 1, 0);
    }
    assert_eq!(tabs.len(), 3);

    let mut seen = titles(&tabs);
    seen.sort_unstable();
    assert_eq!(seen, vec!["a.txt", "b.txt", "c.txt"]);
}

#[test]
fn test_same_path_reuses_tab_and_updates_targets() {
    let mut tabs = TabRegistry::new();
    let first = tabs.open_or_create("src/lib.rs", false, 10, 2).id();
    let second = tabs.open_or_create("src/lib.rs", false, 99, 7).id();

    assert_eq!(first, second);
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.selected(), &[first]);

    let doc = tabs.document(first).unwrap();
    assert_eq!(doc.target_line(), 99);
    assert_eq!(doc.target_column(), 7);
}

#[test]
fn test_path_reuse_is_case_insensitive() {
    let mut tabs = TabRegistry::new();
    let first = tabs.open_or_create("C:\\Work\\Main.rs", false, 1, 0).id();
    let second = tabs.open_or_create("c:\\work\\MAIN.RS", false, 5, 0).id();

    assert_eq!(first, second);
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.document(first).unwrap().target_line(), 5);
}

#[test]
fn test_new_tab_inserts_after_selection() {
    let mut tabs = TabRegistry::new();
    tabs.open_or_create("a.txt", false, 1, 0);
    tabs.open_or_create("b.txt", false, 1, 0);
    // b.txt sits after a.txt and is selected; c.txt must land between b and the end-of-list
    // position it would get with append semantics only by accident, so reselect a.txt first.
    let a = tabs.documents()[0].id();
    tabs.select(a).unwrap();

    tabs.open_or_create("c.txt", false, 1, 0);
    assert_eq!(titles(&tabs), vec!["a.txt", "c.txt", "b.txt"]);
}

#[test]
fn test_first_tab_inserts_at_front_without_selection() {
    let mut tabs = TabRegistry::new();
    assert!(tabs.is_empty());
    tabs.open_or_create("a.txt", false, 1, 0);
    assert_eq!(titles(&tabs), vec!["a.txt"]);
}

#[test]
fn test_single_preview_invariant_with_index_preservation() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open_or_create("a.txt", false, 10, 2).id();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.selected(), &[a]);
    assert_eq!(tabs.document(a).unwrap().target_line(), 10);

    let b = tabs.open_or_create("b.txt", true, 1, 1).id();
    assert_eq!(tabs.len(), 2);
    assert_eq!(titles(&tabs), vec!["a.txt", "b.txt"]);
    assert!(tabs.document(b).unwrap().is_preview());
    assert_eq!(tabs.selected(), &[b]);

    let c = tabs.open_or_create("c.txt", true, 1, 1).id();
    assert_eq!(tabs.len(), 2, "preview replacement must not grow the tab strip");
    assert_eq!(titles(&tabs), vec!["a.txt", "c.txt"]);
    assert!(tabs.document(b).is_none(), "stale preview document is deleted");
    assert!(tabs.document(c).unwrap().is_preview());
    assert_eq!(tabs.selected(), &[c]);

    let previews = tabs.documents().iter().filter(|doc| doc.is_preview()).count();
    assert_eq!(previews, 1);
}

#[test]
fn test_preview_then_pinned_open_of_same_path_does_not_duplicate() {
    let mut tabs = TabRegistry::new();
    let preview = tabs.open_or_create("notes.md", true, 1, 0).id();
    let pinned = tabs.open_or_create("notes.md", false, 30, 4).id();

    assert_eq!(preview, pinned, "reuse applies before preview replacement");
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.document(pinned).unwrap().target_line(), 30);
}

#[test]
fn test_preview_reopen_of_same_path_keeps_single_tab() {
    let mut tabs = TabRegistry::new();
    let first = tabs.open_or_create("notes.md", true, 1, 0).id();
    let second = tabs.open_or_create("NOTES.md", true, 8, 0).id();

    assert_eq!(first, second);
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.document(first).unwrap().target_line(), 8);
}

#[test]
fn test_open_untitled_inserts_next_to_selection() {
    let mut tabs = TabRegistry::new();
    tabs.open_or_create("a.txt", false, 1, 0);
    let untitled = tabs.open_untitled("Untitled-1").id();

    assert_eq!(tabs.len(), 2);
    assert_eq!(titles(&tabs), vec!["a.txt", "Untitled-1"]);
    assert_eq!(tabs.selected(), &[untitled]);

    let doc = tabs.document(untitled).unwrap();
    assert_eq!(doc.kind(), DocumentKind::Untitled);
    assert_eq!(doc.extension(), "txt");
}

#[test]
fn test_select_unknown_document_errors() {
    let mut tabs = TabRegistry::new();
    let id = tabs.open_or_create("a.txt", false, 1, 0).id();
    tabs.close(id).unwrap();

    assert_eq!(tabs.select(id), Err(TabError::DocumentNotFound(id)));
    assert_eq!(tabs.close(id), Err(TabError::DocumentNotFound(id)));
}

#[test]
fn test_close_selected_moves_selection_to_neighbor() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open_or_create("a.txt", false, 1, 0).id();
    let b = tabs.open_or_create("b.txt", false, 1, 0).id();
    let c = tabs.open_or_create("c.txt", false, 1, 0).id();
    // Order: a, b, c with c selected (each insert lands after the previous selection).
    assert_eq!(titles(&tabs), vec!["a.txt", "b.txt", "c.txt"]);

    tabs.select(b).unwrap();
    tabs.close(b).unwrap();
    assert_eq!(tabs.selected(), &[c], "the document now at the closed index is selected");

    tabs.close(c).unwrap();
    assert_eq!(tabs.selected(), &[a], "falls back to the last document");

    tabs.close(a).unwrap();
    assert!(tabs.selected().is_empty());
    assert!(tabs.is_empty());
}

#[test]
fn test_close_unselected_keeps_selection_and_stays_silent() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open_or_create("a.txt", false, 1, 0).id();
    let b = tabs.open_or_create("b.txt", false, 1, 0).id();

    let notifications = Arc::new(AtomicUsize::new(0));
    let seen = notifications.clone();
    tabs.subscribe(move |_change| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    tabs.close(a).unwrap();
    assert_eq!(tabs.selected(), &[b]);
    assert_eq!(notifications.load(Ordering::SeqCst), 0);
}

#[test]
fn test_selection_observers_see_every_select() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open_or_create("a.txt", false, 1, 0).id();

    let changes: Arc<std::sync::Mutex<Vec<SelectionChange>>> = Arc::default();
    let sink = changes.clone();
    tabs.subscribe(move |change| {
        sink.lock().unwrap().push(*change);
    });

    let b = tabs.open_or_create("b.txt", false, 1, 0).id();
    tabs.select(a).unwrap();
    // Re-selecting the current document still notifies (the sequencer is the identity guard).
    tabs.select(a).unwrap();

    let changes = changes.lock().unwrap();
    assert_eq!(
        *changes,
        vec![
            SelectionChange { previous: Some(a), selected: Some(b) },
            SelectionChange { previous: Some(b), selected: Some(a) },
            SelectionChange { previous: Some(a), selected: Some(a) },
        ]
    );
}

#[test]
fn test_dirty_and_pending_text_bookkeeping() {
    let mut tabs = TabRegistry::new();
    let id = tabs.open_or_create("a.txt", false, 1, 0).id();

    tabs.set_dirty(id, true).unwrap();
    tabs.set_pending_text(id, Some("unsaved".to_owned())).unwrap();

    let doc = tabs.document(id).unwrap();
    assert!(doc.is_dirty());
    assert_eq!(doc.pending_text(), Some("unsaved"));

    tabs.set_pending_text(id, None).unwrap();
    assert_eq!(tabs.document(id).unwrap().pending_text(), None);
}

#[test]
fn test_bookkeeping_rejects_closed_ids() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open_or_create("a.txt", false, 1, 0).id();
    tabs.open_or_create("b.txt", false, 1, 0);
    tabs.close(a).unwrap();

    assert_eq!(tabs.set_dirty(a, true), Err(TabError::DocumentNotFound(a)));
    assert_eq!(
        tabs.set_pending_text(a, Some("gone".to_owned())),
        Err(TabError::DocumentNotFound(a))
    );
}
