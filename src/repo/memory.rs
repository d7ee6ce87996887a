use std::cell::Cell;
use std::collections::HashMap;

use anyhow::{Result, anyhow};

use super::{InboxRepository, NotificationPage};
use crate::domain::notification::{
    Notification, PULL_REQUEST_SUBJECT, PullRequest, REVIEW_REQUESTED, RepoRef,
    ReviewRequestEvent, Subject,
};

type PrKey = (String, String, u64);

fn key(repo: &RepoRef, number: u64) -> PrKey {
    (repo.owner.clone(), repo.name.clone(), number)
}

/// Scripted inbox: fixed pages or a live thread list, PR authors and event
/// histories. Records every thread marked read and every page/event fetch.
#[derive(Default)]
pub struct InMemoryInbox {
    pages: Vec<Vec<Notification>>,
    /// Paged by `per_page` on every fetch; marking read flips `unread` in place.
    threads: Vec<Notification>,
    viewer: String,
    prs: HashMap<PrKey, PullRequest>,
    events: HashMap<PrKey, Vec<ReviewRequestEvent>>,
    fail_mark: Option<String>,
    pub marked: Vec<String>,
    pub pages_fetched: Cell<usize>,
    pub event_fetches: Cell<usize>,
}

impl InMemoryInbox {
    pub fn new(viewer: &str) -> Self {
        Self {
            viewer: viewer.to_string(),
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: Vec<Notification>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_page(mut self, page: Vec<Notification>) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_pr(mut self, repo: &RepoRef, number: u64, author: &str) -> Self {
        self.prs.insert(
            key(repo, number),
            PullRequest {
                number,
                author: Some(author.to_string()),
                repository: repo.clone(),
            },
        );
        self
    }

    pub fn with_events(
        mut self,
        repo: &RepoRef,
        number: u64,
        events: Vec<ReviewRequestEvent>,
    ) -> Self {
        self.events.insert(key(repo, number), events);
        self
    }

    pub fn failing_mark(mut self, id: &str) -> Self {
        self.fail_mark = Some(id.to_string());
        self
    }
}

impl InboxRepository for InMemoryInbox {
    async fn list_notifications(&self, page: u32, per_page: u8) -> Result<NotificationPage> {
        self.pages_fetched.set(self.pages_fetched.get() + 1);
        let idx = page as usize - 1;
        if !self.threads.is_empty() {
            let start = idx * per_page as usize;
            let end = (start + per_page as usize).min(self.threads.len());
            let items = self.threads.get(start..end).unwrap_or_default().to_vec();
            let next = (end < self.threads.len()).then_some(page + 1);
            return Ok(NotificationPage { items, next });
        }
        let items = self
            .pages
            .get(idx)
            .cloned()
            .ok_or_else(|| anyhow!("no such page {page}"))?;
        let next = (idx + 1 < self.pages.len()).then_some(page + 1);
        Ok(NotificationPage { items, next })
    }

    async fn current_user_login(&self) -> Result<String> {
        Ok(self.viewer.clone())
    }

    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequest> {
        self.prs
            .get(&key(repo, number))
            .cloned()
            .ok_or_else(|| anyhow!("PR {}#{number} not found", repo.full_name()))
    }

    async fn list_issue_events(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<ReviewRequestEvent>> {
        self.event_fetches.set(self.event_fetches.get() + 1);
        Ok(self
            .events
            .get(&key(repo, number))
            .cloned()
            .unwrap_or_default())
    }

    async fn mark_thread_read(&mut self, id: &str) -> Result<()> {
        if self.fail_mark.as_deref() == Some(id) {
            return Err(anyhow!("failed to mark notification {id:?} as read"));
        }
        if let Some(thread) = self.threads.iter_mut().find(|t| t.id == id) {
            thread.unread = false;
        }
        self.marked.push(id.to_string());
        Ok(())
    }
}

pub fn repo() -> RepoRef {
    RepoRef {
        owner: "acme".into(),
        name: "widgets".into(),
    }
}

pub fn notification(id: &str, kind: &str, reason: &str, url: &str) -> Notification {
    Notification {
        id: id.to_string(),
        reason: reason.to_string(),
        unread: true,
        subject: Some(Subject {
            kind: kind.to_string(),
            title: format!("subject {id}"),
            url: Some(url.to_string()),
        }),
        repository: repo(),
    }
}

/// Review-request notification for PR `number` in [`repo`].
pub fn review_request(id: &str, number: u64) -> Notification {
    notification(
        id,
        PULL_REQUEST_SUBJECT,
        REVIEW_REQUESTED,
        &format!("https://api.github.com/repos/acme/widgets/pulls/{number}"),
    )
}

pub fn team_request(team: &str) -> ReviewRequestEvent {
    ReviewRequestEvent {
        event: REVIEW_REQUESTED.into(),
        requested_team: Some(team.into()),
        requested_reviewer: None,
    }
}

pub fn user_request(login: &str) -> ReviewRequestEvent {
    ReviewRequestEvent {
        event: REVIEW_REQUESTED.into(),
        requested_team: None,
        requested_reviewer: Some(login.into()),
    }
}
