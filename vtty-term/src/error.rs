use std::io;

use thiserror::Error;

use vtty_pty::SessionError;

/// Errors originating from the terminal engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("pty session error: {0}")]
    Session(#[from] SessionError),

    #[error("poll error: {0}")]
    Poll(io::Error),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Convenient result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
