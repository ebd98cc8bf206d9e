//! Output formatting for the `snmp-trap` tool.
//!
//! Supports human-readable and JSON output.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::hints;
use crate::sender::{BindingView, Session};
use crate::{Value, ValueKind, Version};

/// What was (or was attempted to be) sent, ready for output.
#[derive(Debug, Serialize)]
pub struct TrapSummary {
    pub target: String,
    pub version: Version,
    pub community: String,
    pub varbinds: Vec<VarBindSummary>,
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A single varbind in the summary.
#[derive(Debug, Serialize)]
pub struct VarBindSummary {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

impl TrapSummary {
    /// Capture the session and pending bindings. Call before sending, since
    /// sending resets the message.
    pub fn new<'a>(
        session: &Session,
        bindings: impl IntoIterator<Item = BindingView<'a>>,
        show_hints: bool,
    ) -> Self {
        Self {
            target: session.target(),
            version: session.version(),
            community: String::from_utf8_lossy(session.community()).into_owned(),
            varbinds: bindings
                .into_iter()
                .map(|view| summarize(view, show_hints))
                .collect(),
            sent: false,
            error: None,
        }
    }

    /// Record the outcome of the send.
    pub fn finish(&mut self, result: &crate::Result<()>) {
        self.sent = result.is_ok();
        self.error = result.as_ref().err().map(|e| e.to_string());
    }

    /// Write as text.
    pub fn write_human<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.sent {
            writeln!(
                w,
                "Sent trap to {} ({}, {} varbind(s))",
                self.target,
                self.version,
                self.varbinds.len()
            )?;
        } else {
            writeln!(w, "Trap to {} was not sent", self.target)?;
        }

        for vb in &self.varbinds {
            if let Some(ref hint) = vb.hint {
                write!(w, "  {} ({})", vb.oid, hint)?;
            } else {
                write!(w, "  {}", vb.oid)?;
            }
            match &vb.formatted {
                Some(formatted) => writeln!(w, " = {}: {} ({})", vb.value_type, vb.value, formatted)?,
                None => writeln!(w, " = {}: {}", vb.value_type, vb.value)?,
            }
        }
        Ok(())
    }

    /// Write as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        writeln!(w, "{}", json)
    }
}

fn summarize(view: BindingView<'_>, show_hints: bool) -> VarBindSummary {
    let hint = if show_hints {
        hints::lookup(view.oid).map(String::from)
    } else {
        None
    };
    let formatted = match view.value {
        Value::TimeTicks(t) => Some(format_timeticks(*t)),
        Value::ObjectIdentifier(oid) if show_hints => hints::lookup(oid).map(String::from),
        Value::OctetString(_) if view.kind != ValueKind::String => Some(view.value.to_string()),
        _ => None,
    };

    VarBindSummary {
        oid: view.oid.to_string(),
        hint,
        value_type: view.kind.to_string(),
        value: view.text.to_string(),
        formatted,
    }
}

/// Format TimeTicks as `[Nd ]HH:MM:SS.cc`.
fn format_timeticks(centiseconds: u32) -> String {
    let total_seconds = centiseconds / 100;
    let cs = centiseconds % 100;

    let days = total_seconds / 86400;
    let hours = (total_seconds % 86400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        format!(
            "{}d {:02}:{:02}:{:02}.{:02}",
            days, hours, minutes, seconds, cs
        )
    } else {
        format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, seconds, cs)
    }
}

/// Write an error message to stderr.
pub fn write_error(err: &dyn std::fmt::Display) {
    eprintln!("Error: {}", err);
}
