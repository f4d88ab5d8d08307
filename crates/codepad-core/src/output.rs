//! Output pane buffer and the redirector that feeds it.
//!
//! Handlers never write to the terminal. They write to the
//! [`OutputRedirector`], which appends to the output pane of whichever
//! window it is currently installed on. Between a window teardown and the
//! next install, writes fall through to the process's real stdout.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::io::Write as _;
use std::rc::Rc;

/// Text of one window's output pane. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct OutputPane(Rc<RefCell<String>>);

impl OutputPane {
    pub fn new(initial: &str) -> Self {
        Self(Rc::new(RefCell::new(initial.to_string())))
    }

    pub fn append(&self, text: &str) {
        self.0.borrow_mut().push_str(text);
    }

    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn borrow(&self) -> Ref<'_, String> {
        self.0.borrow()
    }

    /// Mutable access for the frontend's text widget.
    pub fn borrow_mut(&self) -> RefMut<'_, String> {
        self.0.borrow_mut()
    }

    /// True if both handles point at the same pane.
    pub fn same_pane(&self, other: &OutputPane) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Routes handler output into the installed output pane.
#[derive(Debug, Default)]
pub struct OutputRedirector {
    target: Option<OutputPane>,
}

impl OutputRedirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts appending to `pane`, replacing any previous target.
    pub fn install(&mut self, pane: OutputPane) {
        self.target = Some(pane);
    }

    /// Detaches from the current pane; writes go to stdout until the next install.
    pub fn restore(&mut self) -> Option<OutputPane> {
        self.target.take()
    }

    pub fn is_installed(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&OutputPane> {
        self.target.as_ref()
    }

    pub fn write_text(&mut self, text: &str) {
        match &self.target {
            Some(pane) => pane.append(text),
            None => {
                let mut stdout = std::io::stdout().lock();
                let _ = stdout.write_all(text.as_bytes());
                let _ = stdout.flush();
            }
        }
    }

    pub fn print(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::Write::write_fmt(self, args);
    }

    /// Like [`print`](Self::print) with a trailing newline.
    pub fn println(&mut self, args: fmt::Arguments<'_>) {
        self.print(args);
        self.write_text("\n");
    }
}

impl fmt::Write for OutputRedirector {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s);
        Ok(())
    }
}
