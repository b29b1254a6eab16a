//! Pseudo-terminal resizing through `TIOCSWINSZ`.

use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use nix::pty::Winsize;
use tracing::debug;

use crate::resize::{PseudoTerminal, ResizeError};

nix::ioctl_write_ptr_bad!(set_winsize, nix::libc::TIOCSWINSZ, Winsize);

/// An open terminal device, held for the lifetime of a session.
#[derive(Debug)]
pub struct TtyDevice {
    file: File,
    path: PathBuf,
}

impl TtyDevice {
    /// Open `path` read-only; window size changes need no write access.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().read(true).open(path)?;
        debug!(
            event = "core.platform.tty_opened",
            path = %path.display()
        );
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl PseudoTerminal for TtyDevice {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn set_size(&mut self, rows: u16, columns: u16) -> Result<(), ResizeError> {
        let size = Winsize {
            ws_row: rows,
            ws_col: columns,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        // SAFETY: the fd is owned by `self.file` and stays open for the call;
        // `size` outlives the ioctl.
        unsafe { set_winsize(self.file.as_raw_fd(), &size) }
            .map(|_| ())
            .map_err(|e| ResizeError::primitive("TIOCSWINSZ", e))
    }
}
