//! The link-type codec.
//!
//! The widget and the backend both carry dependency kinds as small
//! integers, but the numbers mean different things on each side. This table
//! is the single authoritative translation; call sites must not reimplement
//! it.
//!
//! | kind             | widget | backend |
//! |------------------|--------|---------|
//! | finish-to-start  | 0      | 2       |
//! | start-to-start   | 1      | 0       |
//! | finish-to-finish | 2      | 3       |
//! | start-to-finish  | 3      | 1       |
//!
//! An unrecognized code in either direction collapses to finish-to-start:
//! malformed or legacy data must never block rendering.

use serde_json::Value;

use crate::model::widget::LinkKind;

impl LinkKind {
    pub fn from_widget_code(code: i64) -> LinkKind {
        match code {
            1 => LinkKind::StartToStart,
            2 => LinkKind::FinishToFinish,
            3 => LinkKind::StartToFinish,
            _ => LinkKind::FinishToStart,
        }
    }

    pub fn to_widget_code(self) -> i64 {
        match self {
            LinkKind::FinishToStart => 0,
            LinkKind::StartToStart => 1,
            LinkKind::FinishToFinish => 2,
            LinkKind::StartToFinish => 3,
        }
    }

    pub fn from_backend_code(code: i64) -> LinkKind {
        match code {
            0 => LinkKind::StartToStart,
            1 => LinkKind::StartToFinish,
            3 => LinkKind::FinishToFinish,
            _ => LinkKind::FinishToStart,
        }
    }

    pub fn to_backend_code(self) -> i64 {
        match self {
            LinkKind::FinishToStart => 2,
            LinkKind::StartToStart => 0,
            LinkKind::FinishToFinish => 3,
            LinkKind::StartToFinish => 1,
        }
    }

    /// Decode a backend-side kind that may arrive as a number, a numeric
    /// string, or nothing at all.
    pub fn from_backend_value(raw: Option<&Value>) -> LinkKind {
        raw.and_then(coerce_code)
            .map(LinkKind::from_backend_code)
            .unwrap_or(LinkKind::FinishToStart)
    }
}

fn coerce_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
