//! iCalendar document serialization.

use super::{escape_param_value, escape_text, fold_line};
use crate::rfc::ical::core::{Component, ICalendar, Property, Value};

/// Output layout of serialized content lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Terminator written after every physical line.
    pub line_ending: &'static str,
    /// Fold content lines longer than 75 octets.
    pub fold: bool,
}

/// Serializes a calendar with an explicit layout.
///
/// Properties and components are written in insertion order, so equal
/// calendars always produce byte-identical output.
#[must_use]
pub fn serialize_with(ical: &ICalendar, options: &SerializeOptions) -> String {
    let mut out = String::new();
    serialize_component(&ical.root, options, &mut out);
    out
}

/// Serializes one component and its children into `out`.
pub fn serialize_component(component: &Component, options: &SerializeOptions, out: &mut String) {
    push_line(out, &format!("BEGIN:{}", component.name), options);

    for prop in &component.properties {
        push_line(out, &serialize_property(prop), options);
    }

    for child in &component.children {
        serialize_component(child, options, out);
    }

    push_line(out, &format!("END:{}", component.name), options);
}

/// Serializes a property as a single unfolded content line (no terminator).
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();

    for param in &prop.params {
        let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
        line.push(';');
        line.push_str(&param.name);
        line.push('=');
        line.push_str(&values.join(","));
    }

    line.push(':');
    match &prop.value {
        Value::Text(text) => line.push_str(&escape_text(text)),
        other => line.push_str(&other.to_string()),
    }

    line
}

fn push_line(out: &mut String, line: &str, options: &SerializeOptions) {
    if options.fold {
        out.push_str(&fold_line(line, options.line_ending));
    } else {
        out.push_str(line);
    }
    out.push_str(options.line_ending);
}
