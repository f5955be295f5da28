use std::error;
use std::fmt;
use std::io::{self, BufRead, Write};

use crate::error::RoiError;

#[derive(Debug)]
struct InputInterrupted;

impl fmt::Display for InputInterrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input interrupted")
    }
}

impl error::Error for InputInterrupted {}

/// Error a reader returns when the user interrupts a pending line.
///
/// `BufRead::read_line` retries `ErrorKind::Interrupted`, so the interrupt
/// travels as a marked `ErrorKind::Other` instead.
pub fn interrupted() -> io::Error {
    io::Error::new(io::ErrorKind::Other, InputInterrupted)
}

fn is_interrupt(err: &io::Error) -> bool {
    err.get_ref()
        .map_or(false, |inner| inner.is::<InputInterrupted>())
}

/// Prints `prompt` and reads one line with the line ending removed.
/// End of input and interrupts surface as `RoiError::Cancelled`.
pub fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> Result<String, RoiError> {
    write!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Err(RoiError::Cancelled),
        Ok(_) => Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
        Err(err) if is_interrupt(&err) => Err(RoiError::Cancelled),
        Err(err) => Err(err.into()),
    }
}

pub fn parse_amount(text: &str) -> Result<f64, RoiError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RoiError::InvalidNumber(trimmed.to_string())),
    }
}
