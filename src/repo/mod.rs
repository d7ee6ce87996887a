use anyhow::Result;

use crate::domain::notification::{Notification, PullRequest, RepoRef, ReviewRequestEvent};

pub mod github;
#[cfg(test)]
pub mod memory;

/// One page of the inbox plus the cursor for the page after it.
#[derive(Debug, Clone, Default)]
pub struct NotificationPage {
    pub items: Vec<Notification>,
    pub next: Option<u32>,
}

/// Remote operations the sweep needs from the code-hosting platform.
pub trait InboxRepository {
    /// Fetch one page of notification threads, read ones included, so that
    /// marking a thread read never moves the threads after it. Page numbers
    /// start at 1.
    async fn list_notifications(&self, page: u32, per_page: u8) -> Result<NotificationPage>;
    async fn current_user_login(&self) -> Result<String>;
    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequest>;
    /// Full issue-event history of the PR, oldest first.
    async fn list_issue_events(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<ReviewRequestEvent>>;
    async fn mark_thread_read(&mut self, id: &str) -> Result<()>;
}
