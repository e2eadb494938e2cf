use std::io;

#[cfg(unix)]
use nix::errno::Errno;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[cfg(unix)]
    #[error("pty syscall failed: {0}")]
    Errno(#[from] Errno),

    #[error("i/o error: {0}")]
    IO(#[from] io::Error),

    #[error("failed to resize pty: {0}")]
    Resize(io::Error),
}
