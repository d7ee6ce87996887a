use anyhow::Result;

use crate::domain::notification::{IgnoreSets, SweepReport};
use crate::repo::InboxRepository;
use crate::usecase::dismissal::select_for_dismissal;

pub const DEFAULT_PAGE_SIZE: u8 = 50;

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub ignore: IgnoreSets,
    pub page_size: u8,
    /// Log what would be marked read without touching the inbox.
    pub dry_run: bool,
}

impl SweepConfig {
    pub fn new(ignore: IgnoreSets) -> Self {
        Self {
            ignore,
            page_size: DEFAULT_PAGE_SIZE,
            dry_run: false,
        }
    }
}

pub struct App<R: InboxRepository> {
    repo: R,
    config: SweepConfig,
}

impl<R: InboxRepository> App<R> {
    pub fn new(repo: R, config: SweepConfig) -> Self {
        Self { repo, config }
    }

    #[cfg(test)]
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Walk the inbox page by page. Each page is filtered and its
    /// matches marked read before the next page is requested; any error ends
    /// the run, leaving earlier pages' threads marked.
    pub async fn run(&mut self) -> Result<SweepReport> {
        let viewer = self.repo.current_user_login().await?;
        tracing::info!(
            viewer = %viewer,
            authors = self.config.ignore.author_count(),
            teams = self.config.ignore.team_count(),
            "starting sweep"
        );

        let mut report = SweepReport::default();
        let mut cursor = Some(1);
        while let Some(page) = cursor {
            let batch = self
                .repo
                .list_notifications(page, self.config.page_size)
                .await?;
            tracing::info!(page, "got {} notifications", batch.items.len());
            report.pages += 1;
            report.scanned += batch.items.len();

            let picked =
                select_for_dismissal(&self.repo, &self.config.ignore, &viewer, &batch.items)
                    .await?;

            if self.config.dry_run {
                for n in &picked {
                    tracing::info!(
                        id = %n.id,
                        repo = %n.repository.full_name(),
                        title = n.subject.as_ref().map(|s| s.title.as_str()),
                        "would mark as read"
                    );
                }
            } else {
                tracing::info!(page, "marking {} notifications as read", picked.len());
                for n in &picked {
                    self.repo.mark_thread_read(&n.id).await?;
                }
            }
            report.dismissed += picked.len();
            cursor = batch.next;
        }
        Ok(report)
    }
}
