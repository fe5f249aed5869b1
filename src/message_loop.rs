// ── Message loop ──────────────────────────────────────────────────────────────
//
// Blocking pull loop: GetMessage → TranslateMessage → DispatchMessage until
// WM_QUIT.  The wait inside `Host::get_message` is the only blocking point.

use serde::Serialize;

use crate::{
    error::WindowError,
    host::{Fetch, Host},
};

/// How the loop ended.
#[derive(Debug)]
pub(crate) enum LoopExit {
    /// `WM_QUIT` was retrieved; carries its exit code.
    Quit(i32),
    /// Message retrieval failed.  `last_code` is the `wParam` of the last
    /// message pulled (0 if none), which is what the process exits with.
    Failed { error: WindowError, last_code: i32 },
}

impl LoopExit {
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Quit(code) => *code,
            Self::Failed { last_code, .. } => *last_code,
        }
    }
}

/// Per-run summary, logged as one JSON line when the loop ends.
#[derive(Debug, Default, Serialize)]
pub(crate) struct LoopStats {
    pub(crate) dispatched: u64,
    pub(crate) exit_code: i32,
    pub(crate) failed: bool,
}

impl LoopStats {
    fn log(&self) {
        match serde_json::to_string(self) {
            Ok(json) => log::debug!("message loop stats {json}"),
            Err(e) => log::warn!("could not serialize loop stats: {e}"),
        }
    }
}

/// Pump messages for every window of this thread until `WM_QUIT` or a
/// retrieval failure.
pub(crate) fn run_message_loop<H: Host>(host: &mut H) -> LoopExit {
    let mut stats = LoopStats::default();
    // Mirrors the `wParam` of the MSG buffer, which GetMessage overwrites on
    // every successful pull.
    let mut last_code: i32 = 0;

    let exit = loop {
        match host.get_message() {
            Fetch::Quit(code) => break LoopExit::Quit(code),
            Fetch::Failed(code) => {
                break LoopExit::Failed {
                    error: WindowError::GetMessage { code },
                    last_code,
                }
            }
            Fetch::Message(msg) => {
                // Truncation matches `(int)msg.wParam`.
                last_code = msg.wparam as i32;
                host.translate_message(&msg);
                // The procedure's result is meaningless for queued messages.
                let _ = host.dispatch_message(&msg);
                stats.dispatched += 1;
            }
        }
    };

    stats.exit_code = exit.exit_code();
    stats.failed = matches!(exit, LoopExit::Failed { .. });
    stats.log();
    exit
}

// ── Tests ─────────────────────────────────────────────────────────────────────
