//! Interactive prompts read from a line-oriented input

use std::io::{self, BufRead, Write};

/// Interprets an answer to a `[Y/n]` question.
///
/// Only answers starting with `n` or `N` decline; empty input accepts.
pub fn parse_confirmation(answer: &str) -> bool {
    !answer.trim_start().starts_with(['n', 'N'])
}

/// Asks a yes/no question, defaulting to yes.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    writeln!(output, "{question} [Y/n]")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(parse_confirmation(&answer))
}

/// Waits for Enter.
pub fn pause<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    write!(output, "DEBUG_WAIT: Press enter to continue")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
