use crate::domain::notification::{Notification, RepoRef, ReviewRequestEvent, Subject};

// REST payloads, trimmed to the fields the sweep reads.

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Login {
    pub login: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawRepository {
    pub name: String,
    pub owner: Login,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawSubject {
    #[serde(default)]
    pub title: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawNotification {
    pub id: String,
    pub reason: String,
    pub unread: bool,
    pub subject: Option<RawSubject>,
    pub repository: RawRepository,
}

impl From<RawNotification> for Notification {
    fn from(raw: RawNotification) -> Self {
        Self {
            id: raw.id,
            reason: raw.reason,
            unread: raw.unread,
            subject: raw.subject.map(|s| Subject {
                kind: s.kind,
                title: s.title,
                url: s.url,
            }),
            repository: RepoRef {
                owner: raw.repository.owner.login,
                name: raw.repository.name,
            },
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RequestedTeam {
    pub name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawIssueEvent {
    pub event: String,
    pub requested_team: Option<RequestedTeam>,
    pub requested_reviewer: Option<Login>,
}

impl From<RawIssueEvent> for ReviewRequestEvent {
    fn from(raw: RawIssueEvent) -> Self {
        Self {
            event: raw.event,
            requested_team: raw.requested_team.map(|t| t.name),
            requested_reviewer: raw.requested_reviewer.map(|r| r.login),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct NotificationListParams {
    pub all: bool,
    pub per_page: u8,
    pub page: u32,
}

impl NotificationListParams {
    /// Read threads are listed too (`all`). With unread-only listing, every
    /// thread marked read shifts the later pages and some would never be seen.
    pub fn inbox(page: u32, per_page: u8) -> Self {
        Self {
            all: true,
            per_page,
            page,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct PageParams {
    pub per_page: u8,
}
