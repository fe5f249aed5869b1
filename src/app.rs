// ── Application lifecycle & context ───────────────────────────────────────────
//
// A single `AppContext` is created on startup, shared with the host (which
// hands it to the window procedure) and read by the dispatcher.  All access
// happens on the UI thread; there is no global mutable state.

use std::{cell::Cell, rc::Rc, time::Instant};

use crate::{
    error::WindowError,
    event::WindowHandle,
    host::{Host, ShowCommand, WindowOps},
    message_loop::{run_message_loop, LoopExit},
    window::init_window,
};

// ── AppContext ────────────────────────────────────────────────────────────────

/// State shared between the initializer and the window procedure.
///
/// Interior mutability keeps it usable through `&AppContext` while the
/// procedure is re-entered (`DestroyWindow` sends `WM_DESTROY` synchronously).
#[derive(Debug, Default)]
pub(crate) struct AppContext {
    /// `None` until creation succeeds.  Not cleared on destruction: the
    /// process exits right after `WM_QUIT`.
    main_window: Cell<Option<WindowHandle>>,
}

impl AppContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn main_window(&self) -> Option<WindowHandle> {
        self.main_window.get()
    }

    pub(crate) fn set_main_window(&self, hwnd: WindowHandle) {
        self.main_window.set(Some(hwnd));
    }
}

// ── Entry glue ────────────────────────────────────────────────────────────────

/// Initialize the main window and drive the message loop to completion.
///
/// Returns the process exit code: the `WM_QUIT` payload, `0` when
/// initialization failed, or the last recorded `wParam` when message
/// retrieval failed.
pub(crate) fn run<H: Host>(host: &mut H, ctx: &Rc<AppContext>, show: ShowCommand) -> i32 {
    let t0 = Instant::now();

    if let Err(e) = init_window(host, ctx, show) {
        report_fatal(host, &e);
        return 0;
    }

    // Startup milestone: window is now visible on screen.
    log::debug!(
        "window visible in {:.1} ms",
        t0.elapsed().as_secs_f64() * 1000.0
    );

    match run_message_loop(host) {
        LoopExit::Quit(code) => {
            log::info!("message loop finished with exit code {code}");
            code
        }
        LoopExit::Failed { error, last_code } => {
            report_fatal(host, &error);
            last_code
        }
    }
}

/// Surface a fatal error: one modal dialog for the user, one log line with
/// the OS error code.
pub(crate) fn report_fatal<O: WindowOps + ?Sized>(ops: &mut O, err: &WindowError) {
    log::error!("{err} (os error {:#010x})", err.os_code());
    ops.message_box(&err.to_string(), err.caption());
}

// ── Tests ─────────────────────────────────────────────────────────────────────
