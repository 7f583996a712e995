//! Dialog modeling for notices raised by the form controller.

use entry_core::Notice;
use shared::error::SinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSeverity {
    Info,
    Warning,
    Error,
}

impl DialogSeverity {
    pub fn title(self) -> &'static str {
        match self {
            Self::Info => "Hinweis",
            Self::Warning => "Achtung",
            Self::Error => "Fehler",
        }
    }
}

/// Blocking dialog: the form is disabled until it is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    severity: DialogSeverity,
    message: String,
}

impl Dialog {
    pub fn from_notice(notice: Notice) -> Self {
        match notice {
            Notice::Warning(message) => Self {
                severity: DialogSeverity::Warning,
                message,
            },
            Notice::Info(message) => Self {
                severity: DialogSeverity::Info,
                message,
            },
        }
    }

    pub fn from_sink_error(err: &SinkError) -> Self {
        Self {
            severity: DialogSeverity::Error,
            message: format!("Record could not be handed off: {err}"),
        }
    }

    pub fn severity(&self) -> DialogSeverity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
