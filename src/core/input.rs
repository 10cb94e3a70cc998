//! Parsing and validation of textual input at the library boundary.
//!
//! Engines take already-typed values; everything that can be wrong with raw
//! text (empty fields, non-numeric tokens, negative numbers, zero capacities)
//! is reported here as [`SimError::InvalidInput`].

use std::num::IntErrorKind;

use super::error::{Result, SimError};
use crate::scheduler::Process;

/// Parse a comma-separated list of non-negative integers, e.g. `"82, 170,43"`.
pub fn parse_list(field: &str, text: &str) -> Result<Vec<u64>> {
    if text.trim().is_empty() {
        return Err(SimError::invalid(field, "must not be empty"));
    }

    text.split(',')
        .map(|token| parse_non_negative(field, token))
        .collect()
}

pub fn parse_non_negative(field: &str, token: &str) -> Result<u64> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SimError::invalid(field, "contains an empty entry"));
    }

    match token.parse::<u64>() {
        Ok(value) => Ok(value),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Err(SimError::invalid(
            field,
            format!("`{token}` is out of range"),
        )),
        Err(_) if token.parse::<i64>().is_ok() => Err(SimError::invalid(
            field,
            format!("`{token}` must be non-negative"),
        )),
        Err(_) => Err(SimError::invalid(
            field,
            format!("`{token}` is not a number"),
        )),
    }
}

pub fn parse_positive(field: &str, token: &str) -> Result<u64> {
    match parse_non_negative(field, token)? {
        0 => Err(SimError::invalid(field, "must be greater than zero")),
        value => Ok(value),
    }
}

/// Parse one process row written as `id:arrival:burst:priority`.
pub fn parse_process(row: &str) -> Result<Process> {
    let fields: Vec<&str> = row.split(':').map(str::trim).collect();
    let [id, arrival, burst, priority] = fields[..] else {
        return Err(SimError::invalid(
            "process",
            format!("`{row}` must look like id:arrival:burst:priority"),
        ));
    };

    if id.is_empty() {
        return Err(SimError::invalid("process id", "must not be empty"));
    }

    let priority = i64::try_from(parse_non_negative("priority", priority)?)
        .map_err(|_| SimError::invalid("priority", format!("`{priority}` is out of range")))?;

    Ok(Process {
        id: id.to_string(),
        arrival_time: parse_non_negative("arrival time", arrival)?,
        burst_time: parse_positive("burst time", burst)?,
        priority,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_list() {
        assert_eq!(
            parse_list("requests", " 82,170 , 43").unwrap(),
            vec![82, 170, 43]
        );
    }

    #[test]
    fn rejects_bad_tokens() {
        let err = parse_list("requests", "82,-4").unwrap_err();
        assert_eq!(
            err,
            SimError::invalid("requests", "`-4` must be non-negative")
        );

        let err = parse_list("requests", "82,abc").unwrap_err();
        assert!(err.to_string().contains("not a number"));

        let err = parse_list("requests", "99999999999999999999").unwrap_err();
        assert_eq!(
            err,
            SimError::invalid("requests", "`99999999999999999999` is out of range")
        );

        assert!(parse_list("requests", "   ").is_err());
        assert!(parse_list("requests", "1,,2").is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(parse_positive("frames", "0").is_err());
        assert_eq!(parse_positive("frames", "3").unwrap(), 3);
    }

    #[test]
    fn parses_process_rows() {
        let p = parse_process("P1:0:5:2").unwrap();
        assert_eq!(p.id, "P1");
        assert_eq!((p.arrival_time, p.burst_time, p.priority), (0, 5, 2));

        assert!(parse_process(":0:5:2").is_err());
        assert!(parse_process("P1:0:0:2").is_err());
        assert!(parse_process("P1:0:5").is_err());
        assert!(parse_process("P1:0:5:-1").is_err());
    }

    #[test]
    fn priority_beyond_i64_is_rejected() {
        let err = parse_process("P1:0:5:18446744073709551615").unwrap_err();
        assert!(matches!(err, SimError::InvalidInput { ref field, .. } if field == "priority"));

        let p = parse_process("P1:0:5:9223372036854775807").unwrap();
        assert_eq!(p.priority, i64::MAX);
    }
}
