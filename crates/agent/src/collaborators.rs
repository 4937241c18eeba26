//! Narrow interfaces to the remote services the assistant relays to.
//!
//! No implementations live here: token acquisition and the HTTP calls belong
//! to whoever wires the assistant up.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    Outlook,
    OneDrive,
    Gmail,
    Calendar,
}

impl Service {
    /// Order used when every service is synced at once.
    pub const ALL: [Service; 4] = [
        Service::Outlook,
        Service::OneDrive,
        Service::Gmail,
        Service::Calendar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Service::Outlook => "Outlook",
            Service::OneDrive => "OneDrive",
            Service::Gmail => "Gmail",
            Service::Calendar => "Calendar",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fetched entity: a mail, an event, a remote file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncItem {
    pub kind: String,
    pub id: String,
}

pub trait SyncAdapter {
    fn service(&self) -> Service;
    fn fetch_latest(&self) -> anyhow::Result<Vec<SyncItem>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

pub trait CompletionService {
    fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String>;
}
