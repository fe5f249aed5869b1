// ── Window procedure ──────────────────────────────────────────────────────────
//
// The platform-neutral body of the main window's procedure.  The Win32
// trampoline in `platform::win32::window` recovers the `AppContext` from the
// window's user data and forwards every message here.
//
// Every message handled explicitly returns 0; everything else returns the
// default procedure's result verbatim.

use crate::{
    app::AppContext,
    event::{Event, Message, VirtualKey},
    host::WindowOps,
};

/// Body text of the left-click greeting.
pub(crate) const GREETING_TEXT: &str = "Hello, World";

/// Caption of the left-click greeting.
pub(crate) const GREETING_CAPTION: &str = "Hello";

/// Handle one message for the main window.
pub(crate) fn window_proc<O: WindowOps + ?Sized>(
    ctx: &AppContext,
    ops: &mut O,
    msg: &Message,
) -> isize {
    match msg.event() {
        Event::LeftButtonDown => {
            log::trace!("left button down on {:?}", msg.hwnd);
            ops.message_box(GREETING_TEXT, Some(GREETING_CAPTION));
            0
        }

        Event::KeyDown(VirtualKey::ESCAPE) => {
            match ctx.main_window() {
                Some(main) => {
                    log::trace!("escape pressed, destroying {main:?}");
                    if let Err(e) = ops.destroy_window(main) {
                        log::warn!("could not destroy main window {main:?}: {e}");
                    }
                }
                // Only reachable while CreateWindow is still running.
                None => log::debug!("escape before the main window exists; ignored"),
            }
            0
        }

        Event::Destroy => {
            log::trace!("{:?} destroyed, posting quit", msg.hwnd);
            ops.post_quit_message(0);
            0
        }

        Event::KeyDown(_) | Event::Other(_) => ops.default_window_proc(msg),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
