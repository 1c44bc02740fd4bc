//! JSON line I/O for the serve loop
//!
//! - Input: one JSON request per line
//! - Output: one JSON response per line
//! - Success: `{"status": "ok", "data": ...}`
//! - Failure: `{"status": "error", "http_status": ..., "data": <error ping>}`

use std::io::{BufRead, Write};

use serde_json::{json, Value};

use super::errors::CliResult;
use crate::object::{Ping, ProtocolError};

/// A request line that is not a valid request object
#[derive(Debug, thiserror::Error)]
#[error("Malformed request: {0}")]
pub struct BadRequest(pub String);

impl ProtocolError for BadRequest {
    fn error_code(&self) -> u16 {
        2
    }

    fn status_code(&self) -> u16 {
        400
    }
}

/// A request that failed for reasons outside the object engine
#[derive(Debug, thiserror::Error)]
#[error("Server-side error: {0}")]
pub struct ServerError(pub String);

impl ProtocolError for ServerError {
    fn error_code(&self) -> u16 {
        1
    }

    fn status_code(&self) -> u16 {
        500
    }
}

/// Non-blank lines of `reader`. Read failures end the stream with an error.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<String>> {
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| line.map_err(Into::into))
}

/// Write a success response line
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    write_json(out, &json!({ "status": "ok", "data": data }))
}

/// Write an error ping response line
pub fn write_error<W: Write>(out: &mut W, ping: &Ping) -> CliResult<()> {
    write_json(
        out,
        &json!({
            "status": "error",
            "http_status": ping.status_code,
            "data": ping,
        }),
    )
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blank_lines_skipped() {
        let input = Cursor::new("{}\n\n   \n{\"op\":\"get\"}\n");
        let lines: Vec<String> = read_lines(input).map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["{}".to_string(), "{\"op\":\"get\"}".to_string()]);
    }

    #[test]
    fn test_error_line_shape() {
        let mut out = Vec::new();
        let ping = Ping::from_error(&BadRequest("nope".into()));
        write_error(&mut out, &ping).unwrap();

        let line: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(line["status"], "error");
        assert_eq!(line["http_status"], 400);
        assert_eq!(line["data"]["type"], "ping");
        assert_eq!(line["data"]["error_code"], 2);
    }
}
