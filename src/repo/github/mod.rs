pub mod auth;
pub mod model;

use anyhow::{Context, Result, anyhow};
use model::{NotificationListParams, PageParams, RawIssueEvent, RawNotification};
use octocrab::{Octocrab, Page, models::NotificationId};

use super::{InboxRepository, NotificationPage};
use crate::domain::notification::{Notification, PullRequest, RepoRef, ReviewRequestEvent};

const EVENTS_PER_PAGE: u8 = 100;

/// Build the API client. `token: None` yields an anonymous client.
pub fn build_client(token: Option<String>, api_base: Option<String>) -> Result<Octocrab> {
    let mut builder = Octocrab::builder();
    if let Some(token) = token {
        builder = builder.personal_token(token);
    }
    if let Some(api) = api_base {
        builder = builder
            .base_uri(api)
            .map_err(|e| anyhow!("invalid --api-base: {e}"))?;
    }
    builder
        .build()
        .map_err(|e| anyhow!("failed to init GitHub client: {e}"))
}

/// GitHub REST implementation of the inbox operations.
pub struct GithubInbox {
    octo: Octocrab,
}

impl GithubInbox {
    pub fn new(octo: Octocrab) -> Self {
        Self { octo }
    }
}

impl InboxRepository for GithubInbox {
    async fn list_notifications(&self, page: u32, per_page: u8) -> Result<NotificationPage> {
        let params = NotificationListParams::inbox(page, per_page);
        let resp: Page<RawNotification> = self
            .octo
            .get("/notifications", Some(&params))
            .await
            .with_context(|| format!("failed to list github notifications (page {page})"))?;

        let next = resp.next.is_some().then_some(page + 1);
        let items = resp.items.into_iter().map(Notification::from).collect();
        Ok(NotificationPage { items, next })
    }

    async fn current_user_login(&self) -> Result<String> {
        let me = self
            .octo
            .current()
            .user()
            .await
            .context("failed to fetch the authenticated user")?;
        Ok(me.login)
    }

    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequest> {
        let pr = self
            .octo
            .pulls(&repo.owner, &repo.name)
            .get(number)
            .await
            .with_context(|| {
                format!(
                    "failed to fetch PR {number} for repository {:?}",
                    repo.full_name()
                )
            })?;
        Ok(PullRequest {
            number: pr.number,
            author: pr.user.as_ref().map(|u| u.login.clone()),
            repository: repo.clone(),
        })
    }

    async fn list_issue_events(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<ReviewRequestEvent>> {
        let route = format!("/repos/{}/{}/issues/{number}/events", repo.owner, repo.name);
        let params = PageParams {
            per_page: EVENTS_PER_PAGE,
        };
        let context = || {
            format!(
                "failed to list issue events for {}#{number}",
                repo.full_name()
            )
        };
        let first: Page<RawIssueEvent> = self
            .octo
            .get(&route, Some(&params))
            .await
            .with_context(context)?;
        let all = self.octo.all_pages(first).await.with_context(context)?;
        Ok(all.into_iter().map(ReviewRequestEvent::from).collect())
    }

    async fn mark_thread_read(&mut self, id: &str) -> Result<()> {
        let thread: u64 = id
            .parse()
            .map_err(|e| anyhow!("notification id {id:?} is not numeric: {e}"))?;
        self.octo
            .activity()
            .notifications()
            .mark_as_read(NotificationId(thread))
            .await
            .with_context(|| format!("failed to mark notification {id:?} as read"))
    }
}
