//! The PTY pump: a `mio`-driven loop shuttling bytes between the child
//! process and the terminal.
//!
//! One registration covers the master fd, a second the child-exit signal
//! pipe. Reads drain into the parser, writes flush the bounded outbound
//! buffer, and a hangup from the child ends the loop cleanly with its
//! exit status.

use std::io::ErrorKind;
use std::process::ExitStatus;
use std::time::Duration;

use mio::{Events, Interest, Poll, Token};

use crate::error::{Error, Result};
use crate::terminal::Terminal;
use vtty_pty::{Pollable, PtySize, Session, SessionError};

pub const PTY_IO_TOKEN: Token = Token(0);
pub const PTY_CHILD_TOKEN: Token = Token(1);

const DEFAULT_EVENT_CAPACITY: usize = 128;
const READ_BUFFER_SIZE: usize = 1024;

/// A terminal bound to a live PTY session.
pub struct Engine<P: Session> {
    session: P,
    terminal: Terminal,
    read_buffer: [u8; READ_BUFFER_SIZE],
    exit_status: Option<ExitStatus>,
}

impl<P: Session> Engine<P> {
    pub fn new(session: P, terminal: Terminal) -> Self {
        Self {
            session,
            terminal,
            read_buffer: [0; READ_BUFFER_SIZE],
            exit_status: None,
        }
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal {
        &mut self.terminal
    }

    pub fn session_mut(&mut self) -> &mut P {
        &mut self.session
    }

    pub fn is_running(&self) -> bool {
        self.exit_status.is_none()
    }

    pub fn exit_status(&self) -> Option<&ExitStatus> {
        self.exit_status.as_ref()
    }

    pub fn has_pending_output(&self) -> bool {
        !self.terminal.output().is_empty()
    }

    /// Resize both the PTY and the screen model.
    pub fn resize(&mut self, columns: u16, rows: u16) -> Result<()> {
        self.session.resize(PtySize {
            rows,
            cols: columns,
            ..PtySize::default()
        })?;
        self.terminal
            .screen_mut()
            .resize(columns as usize, rows as usize);
        Ok(())
    }

    /// Drain readable child output into the parser. Returns whether any
    /// bytes arrived. A zero-length read means the child hung up.
    pub fn handle_read_ready(&mut self) -> Result<bool> {
        let mut updated = false;

        loop {
            match self.session.read(&mut self.read_buffer) {
                Ok(0) => {
                    self.capture_exit()?;
                    break;
                },
                Ok(count) => {
                    let Self {
                        terminal,
                        read_buffer,
                        ..
                    } = self;
                    terminal.advance(&read_buffer[..count]);
                    updated = true;
                },
                Err(SessionError::IO(err))
                    if err.kind() == ErrorKind::Interrupted =>
                {
                    continue;
                },
                Err(SessionError::IO(err))
                    if err.kind() == ErrorKind::WouldBlock =>
                {
                    break;
                },
                Err(err) => return Err(err.into()),
            }
        }

        Ok(updated)
    }

    /// Flush as much of the outbound buffer as the PTY accepts; partial
    /// writes compact the buffer and the rest waits for the next tick.
    pub fn handle_write_ready(&mut self) -> Result<()> {
        while !self.terminal.output().is_empty() {
            let written = {
                let pending = self.terminal.output().as_slice();
                match self.session.write(pending) {
                    Ok(0) => break,
                    Ok(count) => count,
                    Err(SessionError::IO(err))
                        if err.kind() == ErrorKind::Interrupted =>
                    {
                        continue;
                    },
                    Err(SessionError::IO(err))
                        if err.kind() == ErrorKind::WouldBlock =>
                    {
                        break;
                    },
                    Err(err) => return Err(err.into()),
                }
            };

            self.terminal.output_mut().consume(written);
        }

        Ok(())
    }

    /// Check the child for an exit status without blocking.
    pub fn check_child_exit(&mut self) -> Result<Option<ExitStatus>> {
        self.capture_exit()
    }

    fn capture_exit(&mut self) -> Result<Option<ExitStatus>> {
        match self.session.try_get_child_exit_status() {
            Ok(Some(status)) => {
                self.exit_status = Some(status);
                Ok(Some(status))
            },
            Ok(None) => Ok(None),
            Err(SessionError::IO(err))
                if matches!(
                    err.kind(),
                    ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            },
            Err(err) => Err(err.into()),
        }
    }
}

/// Callback interface for driving the engine from a front end.
pub trait EngineClient<P: Session> {
    /// Executed before the loop blocks on the poller.
    fn before_poll(&mut self, _engine: &mut Engine<P>) -> Result<()> {
        Ok(())
    }

    /// Called after child output mutated the terminal.
    fn on_screen_change(&mut self, _terminal: &Terminal) -> Result<()> {
        Ok(())
    }

    /// Called once when the child exits.
    fn on_child_exit(&mut self, _status: &ExitStatus) -> Result<()> {
        Ok(())
    }

    /// Poll timeout; `None` blocks until the PTY wakes the loop.
    fn poll_timeout(&self) -> Option<Duration> {
        None
    }
}

/// Mio-backed loop that pumps PTY and child-process events.
pub struct EventLoop {
    poll: Poll,
    events: Events,
}

impl EventLoop {
    pub fn new() -> Result<Self> {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            poll: Poll::new().map_err(Error::Poll)?,
            events: Events::with_capacity(capacity.max(16)),
        })
    }

    /// Run until the child exits or an unrecoverable error surfaces.
    pub fn run<P, C>(&mut self, engine: &mut Engine<P>, client: &mut C) -> Result<()>
    where
        P: Session + Pollable,
        C: EngineClient<P>,
    {
        let mut interest = desired_interest(engine);
        engine.session.register(
            self.poll.registry(),
            interest,
            PTY_IO_TOKEN,
            PTY_CHILD_TOKEN,
        )?;

        let run_result = (|| -> Result<()> {
            while engine.is_running() {
                client.before_poll(engine)?;
                if !engine.is_running() {
                    break;
                }

                self.poll_once(client.poll_timeout())?;

                let mut readable = false;
                let mut hangup = false;

                for event in self.events.iter() {
                    if event.token() == PTY_IO_TOKEN {
                        readable |= event.is_readable();
                        hangup |= event.is_read_closed();
                    }
                }

                if readable && engine.handle_read_ready()? {
                    client.on_screen_change(engine.terminal())?;
                }

                if engine.has_pending_output() {
                    engine.handle_write_ready()?;
                }

                let exited = engine.check_child_exit()?.is_some();
                if hangup || exited {
                    if engine.exit_status.is_none() {
                        // Hangup without a reaped status: collect it now.
                        engine.exit_status =
                            engine.session.close().ok().map(exit_from_code);
                    }
                    break;
                }

                let wanted = desired_interest(engine);
                if wanted != interest {
                    engine.session.reregister(
                        self.poll.registry(),
                        wanted,
                        PTY_IO_TOKEN,
                        PTY_CHILD_TOKEN,
                    )?;
                    interest = wanted;
                }
            }

            Ok(())
        })();

        let deregister_result = engine.session.deregister(self.poll.registry());

        if let Some(status) = engine.exit_status() {
            client.on_child_exit(status)?;
        }

        run_result?;
        deregister_result?;

        Ok(())
    }

    fn poll_once(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.events.clear();
        loop {
            match self.poll.poll(&mut self.events, timeout) {
                Ok(()) => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(Error::Poll(err)),
            }
        }

        Ok(())
    }
}

fn desired_interest<P: Session>(engine: &Engine<P>) -> Interest {
    if engine.has_pending_output() {
        Interest::READABLE | Interest::WRITABLE
    } else {
        Interest::READABLE
    }
}

#[cfg(unix)]
fn exit_from_code(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code)
}

#[cfg(not(unix))]
fn exit_from_code(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;

    #[derive(Default)]
    struct FakeSession {
        reads: VecDeque<Vec<u8>>,
        writes: Vec<Vec<u8>>,
        max_write: Option<usize>,
        exit_status: Option<ExitStatus>,
    }

    impl FakeSession {
        fn with_reads(reads: Vec<Vec<u8>>) -> Self {
            Self {
                reads: reads.into(),
                ..Default::default()
            }
        }
    }

    impl Session for FakeSession {
        fn read(&mut self, buf: &mut [u8]) -> std::result::Result<usize, SessionError> {
            if let Some(mut chunk) = self.reads.pop_front() {
                let len = chunk.len().min(buf.len());
                buf[..len].copy_from_slice(&chunk[..len]);
                if len < chunk.len() {
                    chunk.drain(0..len);
                    self.reads.push_front(chunk);
                }
                return Ok(len);
            }
            Err(io::Error::from(io::ErrorKind::WouldBlock).into())
        }

        fn write(&mut self, input: &[u8]) -> std::result::Result<usize, SessionError> {
            let len = self.max_write.map_or(input.len(), |max| {
                input.len().min(max)
            });
            if len == 0 {
                return Err(
                    io::Error::from(io::ErrorKind::WouldBlock).into()
                );
            }
            self.writes.push(input[..len].to_vec());
            Ok(len)
        }

        fn resize(&mut self, _size: PtySize) -> std::result::Result<(), SessionError> {
            Ok(())
        }

        fn close(&mut self) -> std::result::Result<i32, SessionError> {
            Ok(0)
        }

        fn try_get_child_exit_status(
            &mut self,
        ) -> std::result::Result<Option<ExitStatus>, SessionError> {
            Ok(self.exit_status)
        }
    }

    #[test]
    fn drains_reads_into_terminal() {
        let session = FakeSession::with_reads(vec![
            b"hel".to_vec(),
            b"lo".to_vec(),
        ]);
        let mut engine = Engine::new(session, Terminal::new(20, 5));

        assert!(engine.handle_read_ready().unwrap());
        assert_eq!(engine.terminal().screen().line(0).text(), "hello");
    }

    #[test]
    fn replies_flush_through_write_ready() {
        let session = FakeSession::with_reads(vec![b"\x1b[c".to_vec()]);
        let mut engine = Engine::new(session, Terminal::new(20, 5));

        engine.handle_read_ready().unwrap();
        assert!(engine.has_pending_output());

        engine.handle_write_ready().unwrap();
        assert!(!engine.has_pending_output());
        assert_eq!(engine.session.writes, vec![b"\x1b[?1;7c".to_vec()]);
    }

    #[test]
    fn partial_writes_compact_the_buffer() {
        let mut session = FakeSession::default();
        session.max_write = Some(3);
        let mut engine = Engine::new(session, Terminal::new(20, 5));

        engine.terminal_mut().output_mut().append(b"abcdef");
        engine.handle_write_ready().unwrap();

        assert_eq!(engine.session.writes, vec![
            b"abc".to_vec(),
            b"def".to_vec()
        ]);
        assert!(!engine.has_pending_output());
    }

    #[test]
    fn zero_read_marks_child_gone() {
        let mut session = FakeSession::with_reads(vec![b"".to_vec()]);
        session.exit_status = Some(exit_from_code(0));
        let mut engine = Engine::new(session, Terminal::new(20, 5));

        engine.handle_read_ready().unwrap();
        assert!(!engine.is_running());
    }
}
