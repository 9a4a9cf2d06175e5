use std::error::Error as _;

use crate::complete::CompletionEngines;
use crate::error::ScopeError;
use crate::gateway::OperationGateway;
use crate::navigator::Navigator;
use crate::symbols::OPERATION;

/// Console lines produced by one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineOutcome {
    pub output: Vec<String>,
    /// The rejected line, to be offered again for editing.
    pub retry: Option<String>,
}

/// Line-at-a-time driver around a [`Navigator`].
pub struct Session {
    navigator: Navigator,
    gateway: Box<dyn OperationGateway>,
}

impl Session {
    pub fn new(navigator: Navigator, gateway: Box<dyn OperationGateway>) -> Self {
        Self { navigator, gateway }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn gateway(&self) -> &dyn OperationGateway {
        &*self.gateway
    }

    /// Status line printed before the first prompt.
    pub fn banner(&self) -> String {
        self.scope_line()
    }

    fn scope_line(&self) -> String {
        format!("Scope: {} ", self.navigator.render_scope())
    }

    /// Empty lines step back, `!` lines run an operation and everything else
    /// navigates. Failures leave the cascade untouched.
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        let mut outcome = LineOutcome::default();
        if let Err(err) = self.apply(line, &mut outcome.output) {
            if err.is_internal() {
                tracing::error!(target: "jot.scope", line, error = %err, "scope invariant violated");
            } else {
                tracing::debug!(target: "jot.scope", line, error = ?err, "rejected scope line");
            }
            let mut message = format!("* Unable to parse input - {err}");
            if let Some(cause) = err.source() {
                message.push_str(&format!(" - {cause}"));
            }
            outcome.output.push(message);
            outcome.retry = Some(line.to_owned());
        }
        outcome.output.push(self.scope_line());
        outcome
    }

    fn apply(&mut self, line: &str, output: &mut Vec<String>) -> Result<(), ScopeError> {
        if line.is_empty() {
            if self.navigator.back().is_none() {
                output.push("* Already at root level!".to_owned());
            }
            return Ok(());
        }
        if let Some(op_line) = line.strip_prefix(OPERATION) {
            let op = self.gateway.create(
                self.navigator.current(),
                op_line,
                self.navigator.scope_dictionary(),
            )?;
            output.push(format!("Hook operation: {op}"));
            return Ok(());
        }
        self.navigator.navigate(line)?;
        Ok(())
    }

    /// Completion candidates for the buffer up to the cursor.
    pub fn complete(&self, engines: &mut CompletionEngines, line: &str) -> Option<Vec<String>> {
        let cx = self.navigator.completion_context(&*self.gateway);
        engines.complete(&cx, line)
    }
}
