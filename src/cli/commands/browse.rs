use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use colored::Colorize;
use indicatif::ProgressBar;

use crate::cli::{output, render};
use crate::core::errors::Result;
use crate::core::services::view_state::{DeleteFlow, HeaderState, ViewState};
use crate::core::traits::directory::CertificateDirectory;

/// How often the collection is re-read from the backend. Fixed by
/// design, not configurable.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

enum Step {
    Continue,
    Quit,
}

/// Execute the `certdeck browse` command.
///
/// Single consumer loop over two event sources: stdin command lines
/// (forwarded by a reader thread) and a poll deadline owned by the
/// loop itself. Every state transition runs on this thread, so the
/// controller needs no locking. The next poll deadline is computed
/// only after the previous refresh has completed, so polls are
/// serialized, a slow fetch skips ticks instead of stacking them. The
/// deadline dies with the loop, so no tick can fire after teardown on
/// any exit path (quit, error, stdin EOF).
pub fn execute(directory: &dyn CertificateDirectory) -> Result<()> {
    let mut state = ViewState::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Loading certificates...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    refresh(directory, &mut state);
    spinner.finish_and_clear();

    // Reader thread: forwards stdin lines into the loop. When stdin
    // closes, the sender drops and the loop sees Disconnected.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    draw(&state);
    let mut next_poll = Instant::now() + POLL_INTERVAL;

    loop {
        let wait = next_poll.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok(line) => {
                if let Step::Quit = handle_line(directory, &mut state, line.trim()) {
                    break;
                }
                draw(&state);
            }
            Err(RecvTimeoutError::Timeout) => {
                refresh(directory, &mut state);
                next_poll = Instant::now() + POLL_INTERVAL;
                draw(&state);
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read the collection and reconcile the controller with the
/// outcome: wholesale replacement on success, blocking error state on
/// failure (no stale data is kept).
fn refresh(directory: &dyn CertificateDirectory, state: &mut ViewState) {
    match directory.fetch_all() {
        Ok(certificates) => state.replace_collection(certificates),
        Err(e) => state.set_error(e.to_string()),
    }
}

/// Interpret one command line against the current state.
fn handle_line(
    directory: &dyn CertificateDirectory,
    state: &mut ViewState,
    line: &str,
) -> Step {
    // A pending confirmation captures the next line entirely: it is a
    // yes/no answer, never a navigation command.
    if state.delete_flow() == DeleteFlow::ConfirmPending {
        match line {
            "y" | "Y" | "yes" => {
                let names = state.confirm_delete();
                let report = directory.delete_batch(&names);
                for name in report.deleted_names() {
                    output::success(&format!("Deleted {name}"));
                }
                for (name, reason) in report.failures() {
                    output::warning(&format!("Could not delete {name}: {reason}"));
                }
                state.reconcile_deletions(&report);
                refresh(directory, state);
            }
            _ => {
                state.cancel_delete();
                println!("  Deletion cancelled.");
            }
        }
        return Step::Continue;
    }

    let (cmd, arg) = match line.split_once(' ') {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    match cmd {
        "q" | "quit" => return Step::Quit,
        "n" => {
            state.next_page();
        }
        "p" => {
            state.prev_page();
        }
        "g" => match arg.parse::<usize>() {
            Ok(page) => {
                if !state.go_to_page(page) {
                    output::warning(&format!(
                        "Page {page} is out of range (1..={})",
                        state.total_pages().max(1)
                    ));
                }
            }
            Err(_) => output::warning("Usage: g <page>"),
        },
        "a" => {
            // Header checkbox click: unchecks only when every row on
            // the page is already selected.
            state.select_all_on_page(state.header_state() != HeaderState::Checked);
        }
        "s" => match row_name(state, arg) {
            Some(name) => state.toggle_selection(&name),
            None => output::warning("Usage: s <row>"),
        },
        "v" => match row_name(state, arg) {
            Some(name) => state.toggle_focus(&name),
            None => output::warning("Usage: v <row>"),
        },
        "c" => state.clear_focus(),
        "d" => {
            if !state.request_delete() {
                output::warning("Nothing selected — check some rows first (s <row> or a)");
            }
        }
        "h" | "?" => print_help(),
        "" => {}
        _ => {
            // Bare row number toggles that row's checkbox.
            match row_name(state, cmd) {
                Some(name) => state.toggle_selection(&name),
                None => output::warning(&format!("Unknown command '{line}' — h for help")),
            }
        }
    }
    Step::Continue
}

/// Resolve a 1-based row number on the current page to a common name.
fn row_name(state: &ViewState, arg: &str) -> Option<String> {
    let row: usize = arg.parse().ok()?;
    state
        .page_slice()
        .get(row.checked_sub(1)?)
        .map(|c| c.common_name.clone())
}

/// Redraw the whole console after every transition.
fn draw(state: &ViewState) {
    println!("\n{}", "─".repeat(64).dimmed());

    if let Some(error) = state.error() {
        // Error takes precedence over stale data: no table is shown.
        output::error(&format!("Error: {error}"));
        println!("  Retrying on the next poll (every 10 seconds)...");
        return;
    }

    render::table(state);
    render::pagination_footer(state);

    if let Some(cert) = state.focused() {
        render::detail_panel(cert);
    }

    if state.delete_flow() == DeleteFlow::ConfirmPending {
        println!("\n{}", "  Confirm Deletion".bold().red());
        println!("  The following certificates will be deleted:");
        for name in state.selection() {
            println!("    - {name}");
        }
        print!("  Proceed? [y/N]: ");
        let _ = io::stdout().flush();
    } else {
        println!(
            "  {}",
            "n/p page · g N goto · s N select · a page-all · v N view · d delete · q quit"
                .dimmed()
        );
    }
}

fn print_help() {
    output::header("certdeck browse");
    println!("  n, p        next / previous page");
    println!("  g <page>    go to page");
    println!("  s <row>     toggle the row's checkbox (bare number works too)");
    println!("  a           toggle all checkboxes on this page");
    println!("  v <row>     open/close the detail panel for a row");
    println!("  c           close the detail panel");
    println!("  d           delete the checked certificates (asks to confirm)");
    println!("  q           quit");
}
