// ── Host windowing seam ───────────────────────────────────────────────────────
//
// The program talks to the windowing system only through the two traits in
// this file.  `platform::win32` implements them over the real API; the
// scripted host in `script` implements them in memory for the tests.
//
// The split mirrors who may call what:
//   • `WindowOps` is everything the window procedure needs, and must be
//     callable re-entrantly (DestroyWindow re-enters the procedure).
//   • `Host` adds the setup and queue calls made by the initializer and the
//     event loop.

use std::rc::Rc;

use crate::{
    app::AppContext,
    error::Result,
    event::{Message, WindowHandle},
    window::{WindowClass, WindowSpec},
};

#[cfg(test)]
pub(crate) mod script;

// ── Show command ──────────────────────────────────────────────────────────────

/// The initial-visibility flag handed to `ShowWindow` (`nCmdShow`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShowCommand(pub(crate) i32);

impl ShowCommand {
    /// `SW_SHOWDEFAULT`: honour the flag the launcher put in STARTUPINFO.
    pub(crate) const DEFAULT: Self = Self(10);
}

// ── Message retrieval ─────────────────────────────────────────────────────────

/// The three things a blocking `GetMessage` can hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fetch {
    /// An ordinary message for one of this thread's windows.
    Message(Message),
    /// `WM_QUIT` was retrieved; carries the `PostQuitMessage` exit code.
    Quit(i32),
    /// The host reported an internal error; carries the OS error code.
    Failed(u32),
}

// ── Traits ────────────────────────────────────────────────────────────────────

/// Calls the window procedure makes while handling a message.
pub(crate) trait WindowOps {
    /// Default processing for a message the procedure does not handle
    /// (`DefWindowProcW`).  The return value must be passed back verbatim.
    fn default_window_proc(&mut self, msg: &Message) -> isize;

    /// Destroy `hwnd`.  Sends `WM_DESTROY` to its procedure before returning.
    fn destroy_window(&mut self, hwnd: WindowHandle) -> Result<()>;

    /// Post `WM_QUIT` carrying `exit_code` to this thread's queue.
    fn post_quit_message(&mut self, exit_code: i32);

    /// Show a blocking, owner-less, OK-only message box.
    ///
    /// `caption: None` uses the system default caption.
    fn message_box(&mut self, text: &str, caption: Option<&str>);
}

/// The full windowing surface used by the initializer and the event loop.
pub(crate) trait Host: WindowOps {
    fn register_class(&mut self, class: &WindowClass) -> Result<()>;

    /// Create a top-level window and associate `ctx` with it, so that the
    /// window procedure can reach it from the very first creation message.
    ///
    /// The host keeps `ctx` alive for as long as it may dispatch to the
    /// window.
    fn create_window(
        &mut self,
        class: &WindowClass,
        spec: &WindowSpec,
        ctx: &Rc<AppContext>,
    ) -> Result<WindowHandle>;

    fn show_window(&mut self, hwnd: WindowHandle, show: ShowCommand);

    /// Force an immediate `WM_PAINT` if the window has an update region.
    fn update_window(&mut self, hwnd: WindowHandle);

    /// Block until a message for any window of this thread is available.
    fn get_message(&mut self) -> Fetch;

    /// Turn key-down/up pairs into character messages where applicable.
    fn translate_message(&mut self, msg: &Message);

    /// Hand `msg` to its window's procedure and return the procedure's result.
    fn dispatch_message(&mut self, msg: &Message) -> isize;
}
