// ── Window initializer ────────────────────────────────────────────────────────
//
// Registers the window class, creates the single main window, shows it and
// forces the first paint.  No retries: the first failure is returned to the
// entry glue, which reports it and never enters the message loop.

use std::rc::Rc;

use crate::{
    app::AppContext,
    error::Result,
    event::WindowHandle,
    host::{Host, ShowCommand},
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Name the main window class is registered under.
pub(crate) const CLASS_NAME: &str = "BasicWndClass";

/// Title bar text.
pub(crate) const WINDOW_TITLE: &str = "Win32Basic";

/// Window-class descriptor.
///
/// The host fills in the parts that have a single sensible value on every
/// platform: the dispatcher callback, the application icon, the arrow cursor
/// and the white background brush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowClass {
    pub(crate) name: &'static str,
    /// `CS_HREDRAW | CS_VREDRAW`: repaint the whole client area on resize.
    pub(crate) redraw_on_resize: bool,
}

impl Default for WindowClass {
    fn default() -> Self {
        Self {
            name: CLASS_NAME,
            redraw_on_resize: true,
        }
    }
}

/// Creation parameters for the main window.
///
/// Style is always `WS_OVERLAPPEDWINDOW` with default position and size;
/// only the title varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSpec {
    pub(crate) title: &'static str,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE,
        }
    }
}

// ── Initializer ───────────────────────────────────────────────────────────────

/// Register the class, create the main window, then show and paint it.
///
/// On success the handle is recorded in `ctx` and returned.
pub(crate) fn init_window<H: Host>(
    host: &mut H,
    ctx: &Rc<AppContext>,
    show: ShowCommand,
) -> Result<WindowHandle> {
    let class = WindowClass::default();
    host.register_class(&class)?;
    log::debug!("registered window class {:?}", class.name);

    let hwnd = host.create_window(&class, &WindowSpec::default(), ctx)?;
    ctx.set_main_window(hwnd);
    log::debug!("created main window {hwnd:?}");

    host.show_window(hwnd, show);
    host.update_window(hwnd);

    Ok(hwnd)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
