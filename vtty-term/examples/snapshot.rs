//! Run a command inside the terminal and dump the final screen as text.
//!
//! ```sh
//! cargo run --example snapshot -- ls -l
//! ```

use std::process::ExitStatus;

use anyhow::Result;
use vtty_term::pty::UnixSession;
use vtty_term::{Engine, EngineClient, EventLoop, TermOptions, Terminal};

struct Quiet;

impl EngineClient<UnixSession> for Quiet {
    fn on_child_exit(&mut self, status: &ExitStatus) -> vtty_term::Result<()> {
        eprintln!("child exited: {status}");
        Ok(())
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let shell = args.next().unwrap_or_else(|| "/bin/sh".into());

    let options = TermOptions {
        shell,
        args: args.collect(),
        ..TermOptions::default()
    };

    let session = options.spawn_session()?;
    let terminal = Terminal::new(
        options.size.cols as usize,
        options.size.rows as usize,
    );

    let mut engine = Engine::new(session, terminal);
    let mut event_loop = EventLoop::new()?;
    event_loop.run(&mut engine, &mut Quiet)?;

    for line in engine.terminal().screen().lines() {
        println!("{}", line.text());
    }

    Ok(())
}
