//! Pseudoterminal sessions for the terminal engine.
//!
//! [`unix`] spawns a local program on the slave side of a PTY with the
//! master side set non-blocking. The [`Session`] trait covers byte I/O
//! and lifecycle, [`Pollable`] the registration with a `mio` poller, so
//! the engine can multiplex PTY output and child-exit notifications
//! without blocking.

mod errors;
mod size;
#[cfg(unix)]
mod unix;

use std::process::ExitStatus;

use mio::Token;

pub use crate::errors::SessionError;
pub use crate::size::PtySize;
#[cfg(unix)]
pub use crate::unix::{UnixSession, UnixSessionBuilder, unix};

/// A PTY session: the master-side byte channel plus child lifecycle.
pub trait Session {
    /// Read child output from the master side into the buffer.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SessionError>;

    /// Write data into the PTY, forwarding it to the child.
    fn write(&mut self, input: &[u8]) -> Result<usize, SessionError>;

    /// Resize the underlying pseudoterminal.
    fn resize(&mut self, size: PtySize) -> Result<(), SessionError>;

    /// Terminate the session and return the exit code if available.
    fn close(&mut self) -> Result<i32, SessionError>;

    /// Poll the child for an exit status without blocking.
    fn try_get_child_exit_status(
        &mut self,
    ) -> Result<Option<ExitStatus>, SessionError>;
}

/// Integration point with `mio`-based event loops.
pub trait Pollable: Send {
    /// Register the session's descriptors with the registry.
    fn register(
        &mut self,
        registry: &mio::Registry,
        interest: mio::Interest,
        io_token: Token,
        child_token: Token,
    ) -> Result<(), SessionError>;

    /// Update the interest set of the registered descriptors.
    fn reregister(
        &mut self,
        registry: &mio::Registry,
        interest: mio::Interest,
        io_token: Token,
        child_token: Token,
    ) -> Result<(), SessionError>;

    /// Remove the session's descriptors from the registry.
    fn deregister(
        &mut self,
        registry: &mio::Registry,
    ) -> Result<(), SessionError>;
}
