use vtty_pty::PtySize;

/// Configuration for a terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermOptions {
    /// Program started on the slave side.
    pub shell: String,
    pub args: Vec<String>,
    /// Value installed as `TERM` in the child environment.
    pub term: String,
    /// Answerback string transmitted in response to ENQ.
    pub answerback: String,
    pub size: PtySize,
}

impl Default for TermOptions {
    fn default() -> Self {
        Self {
            shell: "/bin/sh".into(),
            args: Vec::new(),
            term: "vt100".into(),
            answerback: String::new(),
            size: PtySize::default(),
        }
    }
}

#[cfg(unix)]
impl TermOptions {
    /// Spawn the configured program on a fresh PTY. The child environment
    /// is scrubbed of the variables that would contradict the emulated
    /// terminal.
    pub fn spawn_session(
        &self,
    ) -> Result<vtty_pty::UnixSession, vtty_pty::SessionError> {
        vtty_pty::unix(&self.shell)
            .with_args(&self.args)
            .with_env_remove("COLUMNS")
            .with_env_remove("LINES")
            .with_env_remove("TERMCAP")
            .with_env_remove("SHELL")
            .with_env("TERM", &self.term)
            .with_size(self.size)
            .spawn()
    }
}
