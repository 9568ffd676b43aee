use reqwest::header::HeaderMap;

use std::{collections::VecDeque, fmt};

use crate::{
    client::ClientError,
    handlers::rest::headers::{ALERT_HEADER, PARAMS_HEADER},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// A banner message. `message` is either a translation key sent by the server or plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub params: Option<String>,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            params: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, message)
    }

    /// Reads the alert a successful mutation announces through response headers.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let message = headers.get(ALERT_HEADER)?.to_str().ok()?;
        let params = headers
            .get(PARAMS_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Some(Self {
            kind: AlertKind::Success,
            message: message.to_string(),
            params,
        })
    }

    pub fn from_error(error: &ClientError) -> Self {
        let message = match error {
            ClientError::Transport(e) if e.is_timeout() => {
                "Server did not answer in time".to_string()
            }
            ClientError::Transport(e) if e.is_connect() => {
                "Server not reachable".to_string()
            }
            ClientError::Transport(e) => format!("Request failed: {e}"),
            ClientError::NotFound(id) => format!("Note {id} was not found"),
            ClientError::Http { status, message } => format!("{message} ({status})"),
            ClientError::IdExists => "A new note cannot already have an ID".to_string(),
            ClientError::MissingId => "The note has no ID".to_string(),
        };
        Self::error(message)
    }

    /// English text for the keys the server sends, raw message otherwise.
    pub fn text(&self) -> String {
        let param = self.params.as_deref().unwrap_or_default();
        match self.message.as_str() {
            "notemakerApp.note.created" => {
                format!("A new Note is created with identifier {param}")
            }
            "notemakerApp.note.updated" => format!("A Note is updated with identifier {param}"),
            "notemakerApp.note.deleted" => format!("A Note is deleted with identifier {param}"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.text())
    }
}

/// Ordered banner stack shown above every screen. The oldest alert is dropped at capacity.
#[derive(Debug, Clone)]
pub struct AlertService {
    alerts: VecDeque<Alert>,
    capacity: usize,
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new(5)
    }
}

impl AlertService {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            alerts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn add(&mut self, alert: Alert) {
        match alert.kind {
            AlertKind::Error | AlertKind::Warning => tracing::warn!("{}", alert),
            AlertKind::Success | AlertKind::Info => tracing::debug!("{}", alert),
        }
        if self.alerts.len() == self.capacity {
            self.alerts.pop_front();
        }
        self.alerts.push_back(alert);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(Alert::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Alert::error(message));
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    pub fn alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn last(&self) -> Option<&Alert> {
        self.alerts.back()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn render(&self) -> String {
        self.alerts
            .iter()
            .map(|alert| format!("{alert}\n"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use reqwest::header::HeaderValue;

    #[test]
    fn capacity_drops_oldest() {
        let mut alerts = AlertService::new(2);
        alerts.success("one");
        alerts.success("two");
        alerts.error("three");

        let messages: Vec<_> = alerts.alerts().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(alerts.last().map(|a| a.kind), Some(AlertKind::Error));
    }

    #[test]
    fn headers_become_success_alert() {
        let mut headers = HeaderMap::new();
        headers.insert(ALERT_HEADER, HeaderValue::from_static("notemakerApp.note.created"));
        headers.insert(PARAMS_HEADER, HeaderValue::from_static("1"));

        let alert = Alert::from_headers(&headers).unwrap();
        assert_eq!(alert.kind, AlertKind::Success);
        assert_eq!(alert.text(), "A new Note is created with identifier 1");
        assert_eq!(alert.to_string(), "[success] A new Note is created with identifier 1");
    }

    #[test]
    fn no_alert_header_means_no_alert() {
        assert_eq!(Alert::from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn client_errors_render_as_error_banners() {
        let alert = Alert::from_error(&ClientError::NotFound(5));
        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.text(), "Note 5 was not found");

        let alert = Alert::from_error(&ClientError::Http {
            status: 500,
            message: "Failed to update note".to_string(),
        });
        assert_eq!(alert.text(), "Failed to update note (500)");
    }

    #[test]
    fn clear_and_render() {
        let mut alerts = AlertService::default();
        alerts.error("boom");
        assert_eq!(alerts.render(), "[error] boom\n");
        alerts.clear();
        assert!(alerts.is_empty());
        assert_eq!(alerts.render(), "");
    }
}
