use std::cell::RefCell;

use anyhow::{anyhow, Result};
use jot_scope::{CompletionEngines, Session};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

const PROMPT: &str = "> ";

/// Line editor helper completing scope lines.
struct ScopeHelper {
    session: Session,
    engines: RefCell<CompletionEngines>,
}

impl Helper for ScopeHelper {}

impl Highlighter for ScopeHelper {}

impl Hinter for ScopeHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Validator for ScopeHelper {}

impl Completer for ScopeHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let mut engines = self.engines.borrow_mut();
        let candidates = self
            .session
            .complete(&mut engines, &line[..pos])
            .unwrap_or_default();
        Ok((0, candidates))
    }
}

/// Read scope lines until end of input.
pub(crate) fn run(session: Session) -> Result<()> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut rl: Editor<ScopeHelper, DefaultHistory> =
        Editor::with_config(config).map_err(|e| anyhow!("failed to init line editor: {e}"))?;

    println!("{}", session.banner());
    rl.set_helper(Some(ScopeHelper {
        session,
        engines: RefCell::new(CompletionEngines::new()),
    }));

    let mut retry: Option<String> = None;
    loop {
        let read = match retry.take() {
            Some(initial) => rl.readline_with_initial(PROMPT, (&initial, "")),
            None => rl.readline(PROMPT),
        };
        let line = match read {
            Ok(line) => line,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => return Err(anyhow!("readline error: {e}")),
        };

        if !line.is_empty() {
            rl.add_history_entry(line.as_str())
                .map_err(|e| anyhow!("failed to record history: {e}"))?;
        }

        let Some(helper) = rl.helper_mut() else {
            return Err(anyhow!("line editor lost its helper"));
        };
        let outcome = helper.session.process_line(&line);
        for out in &outcome.output {
            println!("{out}");
        }
        retry = outcome.retry;
    }
    println!();
    Ok(())
}
