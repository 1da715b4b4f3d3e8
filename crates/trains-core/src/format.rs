//! Output format handling for trains
//!
//! Supports two output formats:
//! - human: one answer per line, diagnostics as `#` comment lines
//! - json: one JSON object per line

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::command::Command;
use crate::error::TrainsError;

/// Answer text for a query that found nothing
pub const NO_SUCH_ROUTE: &str = "NO SUCH ROUTE";

/// Output format for session results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON lines for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = TrainsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(TrainsError::UsageError(format!(
                "unknown output format: '{other}' (expected 'human' or 'json')"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    /// Render a query answer
    pub fn answer(self, command: &Command, answer: Option<u64>) -> String {
        match self {
            OutputFormat::Human => answer_text(answer),
            OutputFormat::Json => answer_json(command, answer).to_string(),
        }
    }

    /// Render a diagnostic trace line
    pub fn trace(self, line: &str) -> String {
        match self {
            OutputFormat::Human if line.is_empty() => "#".to_string(),
            OutputFormat::Human => format!("# {line}"),
            OutputFormat::Json => json!({ "trace": line }).to_string(),
        }
    }

    /// Render a failed input line
    pub fn error(self, line_no: usize, input: &str, err: &TrainsError) -> Vec<String> {
        match self {
            OutputFormat::Human => vec![
                format!("# line {line_no:>5}: {input}"),
                format!("#      ERROR: {err}"),
            ],
            OutputFormat::Json => vec![error_json(line_no, input, err).to_string()],
        }
    }
}

/// `9` or `NO SUCH ROUTE`
pub fn answer_text(answer: Option<u64>) -> String {
    match answer {
        Some(value) => value.to_string(),
        None => NO_SUCH_ROUTE.to_string(),
    }
}

/// Build the JSON record for a query answer
pub fn answer_json(command: &Command, answer: Option<u64>) -> Value {
    json!({
        "command": command.name(),
        "path": command.path(),
        "limit": command.limit(),
        "result": answer,
    })
}

/// Build the JSON record for a failed input line
pub fn error_json(line_no: usize, input: &str, err: &TrainsError) -> Value {
    let mut obj = Map::new();
    obj.insert("line".to_string(), json!(line_no));
    obj.insert("input".to_string(), json!(input));
    if let Value::Object(envelope) = err.to_json() {
        obj.extend(envelope);
    }
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(TrainsError::UsageError(_))
        ));
    }

    #[test]
    fn test_human_answers() {
        let cmd: Command = "dist A-B-C".parse().unwrap();
        assert_eq!(OutputFormat::Human.answer(&cmd, Some(9)), "9");
        assert_eq!(OutputFormat::Human.answer(&cmd, None), "NO SUCH ROUTE");
    }

    #[test]
    fn test_json_answer_record() {
        let cmd: Command = "routes C..C [stops <= 3]".parse().unwrap();
        let value: Value =
            serde_json::from_str(&OutputFormat::Json.answer(&cmd, Some(2))).unwrap();
        assert_eq!(value["command"], "routes");
        assert_eq!(value["path"], "C..C");
        assert_eq!(value["limit"], "stops <= 3");
        assert_eq!(value["result"], 2);

        let cmd: Command = "dist A-E-D".parse().unwrap();
        let value = answer_json(&cmd, None);
        assert!(value["result"].is_null());
        assert!(value["limit"].is_null());
    }

    #[test]
    fn test_trace_lines() {
        assert_eq!(OutputFormat::Human.trace("AB5, AD5"), "# AB5, AD5");
        assert_eq!(OutputFormat::Human.trace(""), "#");
        assert_eq!(OutputFormat::Json.trace("EXIT"), r#"{"trace":"EXIT"}"#);
    }

    #[test]
    fn test_error_lines() {
        let err = TrainsError::UnknownCommand("fly".into());
        assert_eq!(
            OutputFormat::Human.error(4, "fly A-B", &err),
            vec![
                "# line     4: fly A-B".to_string(),
                "#      ERROR: command is not supported: 'fly'".to_string(),
            ]
        );

        let value = error_json(4, "fly A-B", &err);
        assert_eq!(value["line"], 4);
        assert_eq!(value["input"], "fly A-B");
        assert_eq!(value["error"]["type"], "unknown_command");
    }
}
