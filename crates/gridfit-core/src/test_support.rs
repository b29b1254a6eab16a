//! In-memory fakes for the platform traits.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::geometry::{CharacterGrid, PixelSize};
use crate::platform::Platform;
use crate::process::{Pid, ProcessError};
use crate::resize::{ConsoleBuffer, PseudoTerminal, ResizeError, TerminalBinding};
use crate::window::{WindowError, WindowHandle};

/// Shared record of calls made against fakes.
///
/// `entries` holds state-changing calls, `queries` holds reads.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Rc<RefCell<Vec<String>>>,
    queries: Rc<RefCell<Vec<String>>>,
}

impl CallLog {
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.queries.borrow_mut().clear();
    }

    fn record(&self, entry: String) {
        self.entries.borrow_mut().push(entry);
    }

    fn query(&self, entry: String) {
        self.queries.borrow_mut().push(entry);
    }
}

pub struct FakeWindow {
    id: u64,
    owner: Option<u32>,
    client: PixelSize,
    outer: PixelSize,
    fail_resize: bool,
    fail_hide: bool,
    log: CallLog,
}

impl FakeWindow {
    pub fn new(id: u64, owner: Option<u32>, log: &CallLog) -> Self {
        Self {
            id,
            owner,
            client: PixelSize::new(640, 384),
            outer: PixelSize::new(660, 410),
            fail_resize: false,
            fail_hide: false,
            log: log.clone(),
        }
    }

    pub fn failing_resize(mut self) -> Self {
        self.fail_resize = true;
        self
    }

    pub fn failing_hide(mut self) -> Self {
        self.fail_hide = true;
        self
    }
}

impl WindowHandle for FakeWindow {
    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> Option<String> {
        Some(format!("fake window {}", self.id))
    }

    fn owning_process(&self) -> Result<Pid, WindowError> {
        self.log.query(format!("window.owning_process {}", self.id));
        self.owner
            .map(Pid::from_raw)
            .ok_or_else(|| WindowError::OwnerQueryFailed {
                window_id: self.id,
                message: "owner unknown".to_string(),
            })
    }

    fn client_frame(&self) -> Result<PixelSize, WindowError> {
        self.log.query("window.client_frame".to_string());
        Ok(self.client)
    }

    fn outer_size(&self) -> Result<PixelSize, WindowError> {
        self.log.query("window.outer_size".to_string());
        Ok(self.outer)
    }

    fn hide(&self) -> Result<(), WindowError> {
        self.log.record("window.hide".to_string());
        if self.fail_hide {
            return Err(WindowError::OperationFailed {
                operation: "hide",
                window_id: self.id,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn set_position_and_size(&self, x: i32, y: i32, size: PixelSize) -> Result<(), WindowError> {
        self.log
            .record(format!("window.set_position_and_size {},{} {}", x, y, size));
        if self.fail_resize {
            return Err(WindowError::OperationFailed {
                operation: "set_position_and_size",
                window_id: self.id,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Console fake that enforces "the view fits inside the buffer".
pub struct FakeConsole {
    view: CharacterGrid,
    buffer: CharacterGrid,
    fail_view_rect: bool,
    fail_view_grid: bool,
    log: CallLog,
}

impl FakeConsole {
    pub fn new(view: CharacterGrid, log: &CallLog) -> Self {
        Self {
            view,
            buffer: view,
            fail_view_rect: false,
            fail_view_grid: false,
            log: log.clone(),
        }
    }

    pub fn failing_view_rect(mut self) -> Self {
        self.fail_view_rect = true;
        self
    }

    pub fn failing_view_grid(mut self) -> Self {
        self.fail_view_grid = true;
        self
    }
}

fn fits(inner: CharacterGrid, outer: CharacterGrid) -> bool {
    inner.columns() <= outer.columns() && inner.rows() <= outer.rows()
}

impl ConsoleBuffer for FakeConsole {
    fn view_grid(&self) -> Result<CharacterGrid, ResizeError> {
        self.log.query("console.view_grid".to_string());
        if self.fail_view_grid {
            return Err(ResizeError::primitive(
                "GetConsoleScreenBufferInfo",
                "injected failure",
            ));
        }
        Ok(self.view)
    }

    fn set_view_rect(&mut self, view: CharacterGrid) -> Result<(), ResizeError> {
        self.log.record(format!("console.set_view_rect {}", view));
        if self.fail_view_rect {
            return Err(ResizeError::primitive("SetConsoleWindowInfo", "injected failure"));
        }
        if !fits(view, self.buffer) {
            return Err(ResizeError::primitive(
                "SetConsoleWindowInfo",
                format!("view {} exceeds buffer {}", view, self.buffer),
            ));
        }
        self.view = view;
        Ok(())
    }

    fn set_buffer_size(&mut self, size: CharacterGrid) -> Result<(), ResizeError> {
        self.log.record(format!("console.set_buffer_size {}", size));
        if !fits(self.view, size) {
            return Err(ResizeError::primitive(
                "SetConsoleScreenBufferSize",
                format!("buffer {} smaller than view {}", size, self.view),
            ));
        }
        self.buffer = size;
        Ok(())
    }
}

pub struct FakePty {
    fail: bool,
    log: CallLog,
}

impl FakePty {
    pub fn new(log: &CallLog) -> Self {
        Self {
            fail: false,
            log: log.clone(),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl PseudoTerminal for FakePty {
    fn describe(&self) -> String {
        "/dev/pts/fake".to_string()
    }

    fn set_size(&mut self, rows: u16, columns: u16) -> Result<(), ResizeError> {
        self.log
            .record(format!("pty.set_size rows={} columns={}", rows, columns));
        if self.fail {
            return Err(ResizeError::primitive("TIOCSWINSZ", "injected failure"));
        }
        Ok(())
    }
}

/// What `FakePlatform::open_terminal` hands out.
#[derive(Debug, Clone, Copy)]
pub enum FakeTerminal {
    Console(CharacterGrid),
    BrokenConsole(CharacterGrid),
    Pty,
    FailingPty,
    Unavailable,
}

pub struct FakePlatform {
    pub windows: Vec<(u64, Option<u32>)>,
    pub descendants: HashMap<u32, HashSet<u32>>,
    pub running: HashSet<u32>,
    pub terminal: FakeTerminal,
    pub fail_hide: bool,
    pub fail_descendants: bool,
    pub log: CallLog,
}

impl FakePlatform {
    pub fn new(terminal: FakeTerminal) -> Self {
        Self {
            windows: Vec::new(),
            descendants: HashMap::new(),
            running: HashSet::new(),
            terminal,
            fail_hide: false,
            fail_descendants: false,
            log: CallLog::default(),
        }
    }

    pub fn with_process(mut self, pid: u32, children: &[u32]) -> Self {
        self.running.insert(pid);
        self.running.extend(children.iter().copied());
        self.descendants
            .insert(pid, children.iter().copied().collect());
        self
    }

    pub fn with_window(mut self, id: u64, owner: Option<u32>) -> Self {
        self.windows.push((id, owner));
        self
    }

    pub fn with_failing_hide(mut self) -> Self {
        self.fail_hide = true;
        self
    }

    pub fn with_failing_descendants(mut self) -> Self {
        self.fail_descendants = true;
        self
    }
}

impl Platform for FakePlatform {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn enumerate_windows(&self) -> Result<Vec<Box<dyn WindowHandle>>, WindowError> {
        self.log.query("platform.enumerate_windows".to_string());
        Ok(self
            .windows
            .iter()
            .map(|&(id, owner)| {
                let window = FakeWindow::new(id, owner, &self.log);
                let window = if self.fail_hide {
                    window.failing_hide()
                } else {
                    window
                };
                Box::new(window) as Box<dyn WindowHandle>
            })
            .collect())
    }

    fn open_terminal(&self, pid: Pid) -> Result<TerminalBinding, ResizeError> {
        self.log.record(format!("platform.open_terminal {}", pid));
        match self.terminal {
            FakeTerminal::Console(view) => Ok(TerminalBinding::Console(Box::new(
                FakeConsole::new(view, &self.log),
            ))),
            FakeTerminal::BrokenConsole(view) => Ok(TerminalBinding::Console(Box::new(
                FakeConsole::new(view, &self.log).failing_view_grid(),
            ))),
            FakeTerminal::Pty => Ok(TerminalBinding::PseudoTerminal(Box::new(FakePty::new(
                &self.log,
            )))),
            FakeTerminal::FailingPty => Ok(TerminalBinding::PseudoTerminal(Box::new(
                FakePty::new(&self.log).failing(),
            ))),
            FakeTerminal::Unavailable => Err(ResizeError::TerminalOpenFailed {
                pid: pid.as_u32(),
                message: "no controlling terminal".to_string(),
            }),
        }
    }

    fn is_process_running(&self, pid: Pid) -> Result<bool, ProcessError> {
        Ok(self.running.contains(&pid.as_u32()))
    }

    fn descendant_processes(&self, pid: Pid) -> Result<HashSet<Pid>, ProcessError> {
        if self.fail_descendants {
            return Err(ProcessError::NotFound { pid: pid.as_u32() });
        }
        Ok(self
            .descendants
            .get(&pid.as_u32())
            .map(|children| children.iter().copied().map(Pid::from_raw).collect())
            .unwrap_or_default())
    }
}
