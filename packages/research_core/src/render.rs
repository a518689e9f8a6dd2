//! Display rules for log entries and report text, independent of any UI
//! toolkit.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::session::LogEntry;

lazy_static! {
    static ref LABELED_LINE: Regex = Regex::new(r"^(\w+):\s*(.+)").expect("static regex");
}

/// How a single log entry is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryView {
    /// Shown verbatim.
    Text(String),
    /// Each key next to a pretty-printed rendering of its value.
    Fields(Vec<(String, String)>),
}

/// One line of the final report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportLine {
    /// `label: rest` with the label emphasised.
    Labeled { label: String, rest: String },
    Plain(String),
}

pub fn render_entry(entry: &LogEntry) -> EntryView {
    match entry.content() {
        Value::String(text) => EntryView::Text(text.clone()),
        Value::Object(map) => EntryView::Fields(
            map.iter()
                .map(|(key, value)| (key.clone(), pretty(value)))
                .collect(),
        ),
        Value::Array(items) => EntryView::Fields(
            items
                .iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), pretty(value)))
                .collect(),
        ),
        other => EntryView::Text(other.to_string()),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Splits report text into lines and marks `label: rest` lines.
pub fn report_lines(text: &str) -> Vec<ReportLine> {
    text.split('\n')
        .map(|line| match LABELED_LINE.captures(line) {
            Some(captures) => ReportLine::Labeled {
                label: captures[1].to_string(),
                rest: captures[2].to_string(),
            },
            None => ReportLine::Plain(line.to_string()),
        })
        .collect()
}
