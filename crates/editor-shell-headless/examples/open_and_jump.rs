//! Open-and-jump example
//!
//! Opens this example's own source file into a [`HeadlessDisplay`], jumps to a line, then
//! re-opens the same file at another line to show the align-only fast path.

use editor_shell::{EditorShell, FsContentProvider, LanguageConfig, LanguageRegistry};
use editor_shell_headless::HeadlessDisplay;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut grammars = LanguageRegistry::new();
    grammars.register(LanguageConfig::plain_text());
    grammars.register(LanguageConfig::new("rust", "source.rust").with_extension("rs"));

    let mut shell = EditorShell::new();
    let mut display = HeadlessDisplay::new();

    // file!() is relative to the workspace root, which is where cargo runs examples from.
    let path = file!();

    println!("opening {path} at line 12");
    let request = shell.open_file(path, false, 12, 0);
    match request.run(&FsContentProvider, &grammars, &mut display).await {
        Ok(outcome) => println!("  outcome: {outcome:?}"),
        Err(err) => {
            eprintln!("  load failed: {err}");
            return;
        }
    }
    println!("  scope:   {}", display.scope().map(|s| s.as_str()).unwrap_or("-"));
    println!("  lines:   {}", display.line_count());
    println!("  caret:   {}", display.caret());

    println!("jumping to line 3 in the already-open file");
    let request = shell.open_file(path, false, 3, 4);
    println!("  reload needed: {}", request.is_reload());
    match request.run(&FsContentProvider, &grammars, &mut display).await {
        Ok(outcome) => println!("  outcome: {outcome:?}"),
        Err(err) => eprintln!("  align failed: {err}"),
    }
    println!("  caret:   {}", display.caret());
    println!("  redraws: {}", display.redraw_count());
}
