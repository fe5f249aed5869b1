// ── Scripted host ─────────────────────────────────────────────────────────────
//
// In-memory stand-in for the windowing system, used by the tests.  It keeps
// the Win32 behaviours the program relies on:
//   • CreateWindow sends WM_NCCREATE to the procedure before returning.
//   • DestroyWindow sends WM_DESTROY synchronously, re-entering the procedure.
//   • PostQuitMessage sets a flag; WM_QUIT is retrieved once the queue drains.
//   • TranslateMessage puts WM_CHAR at the head of the queue for character keys.
//   • DefWindowProc destroys the window on WM_CLOSE.
// Every call is recorded so tests can assert on it.

use std::{collections::VecDeque, rc::Rc};

use crate::{
    app::AppContext,
    dispatcher::window_proc,
    error::{Result, WindowError},
    event::{Message, WindowHandle, WM_CHAR, WM_CLOSE, WM_DESTROY, WM_KEYDOWN, WM_NCCREATE},
    host::{Fetch, Host, ShowCommand, WindowOps},
    window::{WindowClass, WindowSpec},
};

/// `ERROR_INVALID_WINDOW_HANDLE`
const ERROR_INVALID_WINDOW_HANDLE: u32 = 1400;
/// `ERROR_CLASS_ALREADY_EXISTS`
const ERROR_CLASS_ALREADY_EXISTS: u32 = 1410;
/// `ERROR_NOT_ENOUGH_MEMORY`
const ERROR_NOT_ENOUGH_MEMORY: u32 = 8;

/// First handle value handed out by `create_window`.
const FIRST_HANDLE: isize = 0x1000;

type AfterCreate = Box<dyn FnOnce(WindowHandle) -> Vec<Message>>;

#[derive(Default)]
pub(crate) struct ScriptedHost {
    // ── Script ────────────────────────────────────────────────────────────────
    pub(crate) queue: VecDeque<Message>,
    pub(crate) quit_pending: Option<i32>,
    pub(crate) fail_register: bool,
    pub(crate) fail_create: bool,
    /// Fail the `n`th call to `get_message` (0-based).
    pub(crate) fail_get_message_at: Option<usize>,
    pub(crate) default_result: isize,
    after_create: Option<AfterCreate>,
    ctx: Option<Rc<AppContext>>,

    // ── Recording ─────────────────────────────────────────────────────────────
    pub(crate) registered: Vec<WindowClass>,
    pub(crate) created: Vec<WindowHandle>,
    pub(crate) shown: Vec<(WindowHandle, ShowCommand)>,
    pub(crate) updated: Vec<WindowHandle>,
    pub(crate) destroyed: Vec<WindowHandle>,
    pub(crate) quit_posts: Vec<i32>,
    pub(crate) boxes: Vec<(String, Option<String>)>,
    pub(crate) pulled: usize,
    /// Messages that reached the procedure after creation, queued or sent.
    pub(crate) dispatched: Vec<Message>,
    pub(crate) defaulted: Vec<Message>,
    /// What the context held when WM_NCCREATE was delivered.
    pub(crate) main_window_seen_at_create: Option<Option<WindowHandle>>,
}

impl ScriptedHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A host on which `hwnd` already exists.
    pub(crate) fn with_window(hwnd: WindowHandle) -> Self {
        Self {
            created: vec![hwnd],
            ..Self::default()
        }
    }

    /// Route delivered messages through the real window procedure with `ctx`.
    pub(crate) fn attach(&mut self, ctx: Rc<AppContext>) {
        self.ctx = Some(ctx);
    }

    /// Messages to enqueue as soon as the main window exists.
    pub(crate) fn after_create(&mut self, f: impl FnOnce(WindowHandle) -> Vec<Message> + 'static) {
        self.after_create = Some(Box::new(f));
    }

    pub(crate) fn dispatched_codes(&self) -> Vec<u32> {
        self.dispatched.iter().map(|m| m.code).collect()
    }

    /// Deliver `msg` to the window procedure, or to the default handler when
    /// no context is attached.
    fn send(&mut self, msg: &Message) -> isize {
        match self.ctx.clone() {
            Some(ctx) => window_proc(&ctx, self, msg),
            None => self.default_window_proc(msg),
        }
    }

    fn is_live(&self, hwnd: WindowHandle) -> bool {
        self.created.contains(&hwnd) && !self.destroyed.contains(&hwnd)
    }
}

impl WindowOps for ScriptedHost {
    fn default_window_proc(&mut self, msg: &Message) -> isize {
        self.defaulted.push(*msg);
        if msg.code == WM_CLOSE {
            let _ = self.destroy_window(msg.hwnd);
        }
        self.default_result
    }

    fn destroy_window(&mut self, hwnd: WindowHandle) -> Result<()> {
        if !self.is_live(hwnd) {
            return Err(WindowError::Win32 {
                function: "DestroyWindow",
                code: ERROR_INVALID_WINDOW_HANDLE,
            });
        }
        self.destroyed.push(hwnd);
        let msg = Message::new(hwnd, WM_DESTROY, 0, 0);
        self.dispatched.push(msg);
        self.send(&msg);
        Ok(())
    }

    fn post_quit_message(&mut self, exit_code: i32) {
        self.quit_posts.push(exit_code);
        self.quit_pending = Some(exit_code);
    }

    fn message_box(&mut self, text: &str, caption: Option<&str>) {
        self.boxes.push((text.to_owned(), caption.map(str::to_owned)));
    }
}

impl Host for ScriptedHost {
    fn register_class(&mut self, class: &WindowClass) -> Result<()> {
        if self.fail_register || self.registered.iter().any(|c| c.name == class.name) {
            return Err(WindowError::RegisterClass {
                code: ERROR_CLASS_ALREADY_EXISTS,
            });
        }
        self.registered.push(class.clone());
        Ok(())
    }

    fn create_window(
        &mut self,
        class: &WindowClass,
        _spec: &WindowSpec,
        ctx: &Rc<AppContext>,
    ) -> Result<WindowHandle> {
        if self.fail_create || !self.registered.iter().any(|c| c.name == class.name) {
            return Err(WindowError::CreateWindow {
                code: ERROR_NOT_ENOUGH_MEMORY,
            });
        }
        let hwnd = WindowHandle(FIRST_HANDLE + self.created.len() as isize);
        self.ctx = Some(Rc::clone(ctx));

        self.main_window_seen_at_create = Some(ctx.main_window());
        self.send(&Message::new(hwnd, WM_NCCREATE, 0, 0));
        self.created.push(hwnd);

        if let Some(f) = self.after_create.take() {
            self.queue.extend(f(hwnd));
        }
        Ok(hwnd)
    }

    fn show_window(&mut self, hwnd: WindowHandle, show: ShowCommand) {
        self.shown.push((hwnd, show));
    }

    fn update_window(&mut self, hwnd: WindowHandle) {
        self.updated.push(hwnd);
    }

    fn get_message(&mut self) -> Fetch {
        let n = self.pulled;
        self.pulled += 1;
        if self.fail_get_message_at == Some(n) {
            return Fetch::Failed(ERROR_INVALID_WINDOW_HANDLE);
        }
        if let Some(msg) = self.queue.pop_front() {
            return Fetch::Message(msg);
        }
        match self.quit_pending.take() {
            Some(code) => Fetch::Quit(code),
            // A real host would block forever here.
            None => panic!("scripted host ran out of messages after {n} pulls"),
        }
    }

    fn translate_message(&mut self, msg: &Message) {
        if msg.code != WM_KEYDOWN {
            return;
        }
        let vk = msg.wparam;
        // Unshifted letters, digits and space.
        let ch = match vk {
            0x41..=0x5A => vk + 0x20,
            0x20 | 0x30..=0x39 => vk,
            _ => return,
        };
        self.queue
            .push_front(Message::new(msg.hwnd, WM_CHAR, ch, msg.lparam));
    }

    fn dispatch_message(&mut self, msg: &Message) -> isize {
        self.dispatched.push(*msg);
        self.send(msg)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_proc_closes_window_on_wm_close() {
        let hwnd = WindowHandle(FIRST_HANDLE);
        let mut host = ScriptedHost::with_window(hwnd);
        let ctx = Rc::new(AppContext::new());
        ctx.set_main_window(hwnd);
        host.attach(ctx);

        host.dispatch_message(&Message::new(hwnd, WM_CLOSE, 0, 0));

        assert_eq!(host.destroyed, vec![hwnd]);
        assert_eq!(host.quit_posts, vec![0]);
    }

    #[test]
    fn destroying_twice_fails() {
        let hwnd = WindowHandle(FIRST_HANDLE);
        let mut host = ScriptedHost::with_window(hwnd);

        host.destroy_window(hwnd).expect("first destroy");
        let err = host.destroy_window(hwnd).unwrap_err();

        assert_eq!(err.os_code(), ERROR_INVALID_WINDOW_HANDLE);
    }

    #[test]
    fn class_registers_only_once() {
        let mut host = ScriptedHost::new();
        host.register_class(&WindowClass::default()).expect("first");
        assert!(host.register_class(&WindowClass::default()).is_err());
    }
}
