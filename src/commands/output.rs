/// What a command prints on stdout and whether the process should exit cleanly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, success: bool) -> Self {
        Self {
            stdout: stdout.into(),
            success,
        }
    }

    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(stdout, true)
    }
}
