//! Power Gadget CSV format
//!
//! The log starts with a header row, then one row per sample. After the
//! samples the utility appends a free-form summary block whose lines carry a
//! single field (`Total Elapsed Time (sec) = 20.01`, ...). Those short rows
//! end the data section.
//!
//! Header names are matched exactly; when a name repeats, the last column
//! with that name wins.

use super::PowerSample;
use crate::analysis::WARMUP_SECS;
use crate::error::{BenchError, Result};

/// Seconds since sampling began
pub const ELAPSED_COLUMN: &str = "Elapsed Time (sec)";
/// Package power of socket 0
pub const PROCESSOR_POWER_COLUMN: &str = "Processor Power_0(Watt)";
/// Core power of socket 0
pub const IA_POWER_COLUMN: &str = "IA Power_0(Watt)";

/// Split one CSV record into fields
///
/// Double-quoted fields may contain commas; `""` inside quotes is a literal
/// quote.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse power log content into samples
///
/// Rows inside the warm-up window are dropped before their power fields are
/// read, so a malformed warm-up row never fails the parse. Columns are
/// resolved against the header the first time a row needs them.
pub fn parse_csv(content: &str) -> Result<Vec<PowerSample>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.is_empty());

    let header = match lines.next() {
        Some((_, line)) => split_record(line),
        None => return Ok(Vec::new()),
    };

    let column = |name: &str| {
        header
            .iter()
            .rposition(|h| h == name)
            .ok_or_else(|| BenchError::MissingColumn(name.to_string()))
    };

    let mut elapsed_idx = None;
    let mut power_idx = None;
    let mut samples = Vec::new();
    for (line_no, line) in lines {
        let fields = split_record(line);

        let idx = match elapsed_idx {
            Some(idx) => idx,
            None => *elapsed_idx.insert(column(ELAPSED_COLUMN)?),
        };
        let elapsed = match fields.get(idx) {
            Some(value) => parse_field(line_no, ELAPSED_COLUMN, value)?,
            None => break,
        };
        if elapsed < WARMUP_SECS {
            continue;
        }

        let (processor_idx, ia_idx) = match power_idx {
            Some(idx) => idx,
            None => *power_idx.insert((
                column(PROCESSOR_POWER_COLUMN)?,
                column(IA_POWER_COLUMN)?,
            )),
        };
        let processor =
            required_field(line_no, &fields, processor_idx, PROCESSOR_POWER_COLUMN)?;
        let ia = required_field(line_no, &fields, ia_idx, IA_POWER_COLUMN)?;

        samples.push(PowerSample::new(elapsed, processor, ia));
    }

    Ok(samples)
}

fn required_field(line: usize, fields: &[String], idx: usize, column: &str) -> Result<f64> {
    let value = fields.get(idx).ok_or_else(|| BenchError::MissingField {
        line,
        column: column.to_string(),
    })?;
    parse_field(line, column, value)
}

fn parse_field(line: usize, column: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| BenchError::InvalidNumber {
            line,
            column: column.to_string(),
            value: value.to_string(),
        })
}
