//! Trace file parsing.
//!
//! This module turns textual memory traces into [`AccessRecord`]s. It supports:
//! 1. **Counted traces:** `<op> <non-memory count> <decimal address>` with `op`
//!    `0` for loads and `1` for stores; a line starting with `#` ends the trace.
//! 2. **Tagged traces:** `<R|W>:<hex address>` or `<op> <hex address> [value]`
//!    where `op` is one of `R`/`L` (load) or `W`/`S` (store), in either case.
//!    Lines starting with `#` are comments.
//! 3. **Auto-detection:** The format is chosen from the first meaningful line.

use std::io::BufRead;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::{AccessKind, AccessRecord, TraceError, Word};

/// Textual trace layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    /// Pick `Counted` or `Tagged` from the first meaningful line.
    ///
    /// A `#` line seen before detection ends the trace if the format turns
    /// out to be `Counted`, and is skipped as a comment otherwise.
    #[default]
    Auto,
    /// `<0|1> <non-memory count> <decimal address>`.
    Counted,
    /// `<R|W>:<hex address>` or `<op> <hex address> [value]`.
    Tagged,
}

impl FromStr for TraceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "counted" => Ok(Self::Counted),
            "tagged" => Ok(Self::Tagged),
            other => Err(format!("unknown trace format `{other}`")),
        }
    }
}

impl TraceFormat {
    /// Guesses the format of a non-empty, non-comment line.
    fn detect(line: &str) -> Self {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [op, count, addr]
                if matches!(*op, "0" | "1")
                    && count.parse::<u64>().is_ok()
                    && addr.parse::<u64>().is_ok() =>
            {
                Self::Counted
            }
            _ => Self::Tagged,
        }
    }
}

/// Lazy reader yielding one record per trace line.
///
/// Blank lines are skipped. After the first error the reader keeps going, so
/// callers that want fail-fast behavior should stop at the first `Err`.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    format: TraceFormat,
    line_no: usize,
    buf: String,
    done: bool,
    /// A `#` line appeared while the format was still `Auto`.
    pending_end: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader`, parsing lines in `format`.
    pub const fn new(reader: R, format: TraceFormat) -> Self {
        Self {
            reader,
            format,
            line_no: 0,
            buf: String::new(),
            done: false,
            pending_end: false,
        }
    }

    /// The format in use; `Auto` until the first meaningful line is seen.
    pub const fn format(&self) -> TraceFormat {
        self.format
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.buf.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line.starts_with('#') {
                        // End-of-trace mark in counted traces, comment otherwise.
                        match self.format {
                            TraceFormat::Counted => self.done = true,
                            TraceFormat::Auto => self.pending_end = true,
                            TraceFormat::Tagged => {}
                        }
                        continue;
                    }
                    if self.format == TraceFormat::Auto {
                        self.format = TraceFormat::detect(line);
                        if self.pending_end && self.format == TraceFormat::Counted {
                            self.done = true;
                            continue;
                        }
                    }
                    let parsed = match self.format {
                        TraceFormat::Counted => parse_counted(line),
                        _ => parse_tagged(line),
                    };
                    return Some(parsed.map_err(|reason| TraceError::Malformed {
                        line: self.line_no,
                        text: line.to_string(),
                        reason,
                    }));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

/// Parses a whole trace, stopping at the first malformed line.
pub fn parse_trace<R: BufRead>(
    reader: R,
    format: TraceFormat,
) -> Result<Vec<AccessRecord>, TraceError> {
    TraceReader::new(reader, format).collect()
}

fn parse_counted(line: &str) -> Result<AccessRecord, &'static str> {
    let mut fields = line.split_whitespace();
    let kind = match fields.next() {
        Some("0") => AccessKind::Load,
        Some("1") => AccessKind::Store,
        _ => return Err("operation must be 0 (load) or 1 (store)"),
    };
    let non_mem_count = fields
        .next()
        .and_then(|f| f.parse::<u64>().ok())
        .ok_or("missing or invalid non-memory instruction count")?;
    let address = fields
        .next()
        .and_then(|f| f.parse::<u64>().ok())
        .ok_or("missing or invalid decimal address")?;
    if fields.next().is_some() {
        return Err("trailing fields");
    }
    Ok(AccessRecord {
        kind,
        address,
        value: None,
        non_mem_count,
    })
}

fn parse_tagged(line: &str) -> Result<AccessRecord, &'static str> {
    let (op, rest) = match line.split_once(':') {
        Some((op, addr)) => (op.trim(), vec![addr.trim()]),
        None => {
            let mut fields = line.split_whitespace();
            let op = fields.next().unwrap_or_default();
            (op, fields.collect())
        }
    };
    let kind = match op {
        "R" | "r" | "L" | "l" => AccessKind::Load,
        "W" | "w" | "S" | "s" => AccessKind::Store,
        _ => return Err("operation must be one of R, W, L, S"),
    };
    let (address, value) = match rest.as_slice() {
        [addr] => (parse_hex(addr)?, None),
        [addr, value] if kind.is_store() => (parse_hex(addr)?, Some(parse_value(value)?)),
        [] => return Err("missing address"),
        _ => return Err("trailing fields"),
    };
    Ok(AccessRecord {
        kind,
        address,
        value,
        non_mem_count: 0,
    })
}

fn parse_hex(field: &str) -> Result<u64, &'static str> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u64::from_str_radix(digits, 16).map_err(|_| "invalid hexadecimal address")
}

fn parse_value(field: &str) -> Result<Word, &'static str> {
    let parsed = match field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
    {
        Some(hex) => Word::from_str_radix(hex, 16),
        None => field.parse::<Word>(),
    };
    parsed.map_err(|_| "invalid store value")
}
