use std::collections::HashSet;

use anyhow::{Result, anyhow};

/// Subject type GitHub assigns to pull-request notifications.
pub const PULL_REQUEST_SUBJECT: &str = "PullRequest";
/// Reason code (and issue-event type) for review requests.
pub const REVIEW_REQUESTED: &str = "review_requested";
/// Suffix GitHub appends to app/bot account logins.
pub const BOT_SUFFIX: &str = "[bot]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub kind: String,
    pub title: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub reason: String,
    pub unread: bool,
    pub subject: Option<Subject>,
    pub repository: RepoRef,
}

impl Notification {
    pub fn is_pull_request(&self) -> bool {
        self.subject
            .as_ref()
            .is_some_and(|s| s.kind == PULL_REQUEST_SUBJECT)
    }

    pub fn is_review_request(&self) -> bool {
        self.reason == REVIEW_REQUESTED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub author: Option<String>, // raw login, bot suffix intact
    pub repository: RepoRef,
}

impl PullRequest {
    pub fn key(&self) -> String {
        format!("{}#{}", self.repository.full_name(), self.number)
    }

    pub fn normalized_author(&self) -> Option<&str> {
        self.author.as_deref().map(normalize_login)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRequestEvent {
    pub event: String,
    pub requested_team: Option<String>,
    pub requested_reviewer: Option<String>,
}

impl ReviewRequestEvent {
    pub fn is_review_request(&self) -> bool {
        self.event == REVIEW_REQUESTED
    }
}

/// Authors and teams whose review requests get dismissed. Fixed for the run.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSets {
    authors: HashSet<String>,
    teams: HashSet<String>,
}

impl IgnoreSets {
    pub fn new(
        authors: impl IntoIterator<Item = String>,
        teams: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            authors: authors.into_iter().collect(),
            teams: teams.into_iter().collect(),
        }
    }

    pub fn ignores_author(&self, login: &str) -> bool {
        self.authors.contains(login)
    }

    pub fn ignores_team(&self, team: &str) -> bool {
        self.teams.contains(team)
    }

    pub fn has_teams(&self) -> bool {
        !self.teams.is_empty()
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

/// Totals for one sweep, logged once the last page is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub pages: usize,
    pub scanned: usize,
    pub dismissed: usize,
}

/// Strip one trailing `[bot]` so `renovate[bot]` matches an ignore entry `renovate`.
pub fn normalize_login(login: &str) -> &str {
    login.strip_suffix(BOT_SUFFIX).unwrap_or(login)
}

/// Pull the PR number out of an API URL such as
/// `https://api.github.com/repos/o/r/pulls/42`.
pub fn pr_number_from_subject_url(url: &str) -> Result<u64> {
    let segment = url.rsplit('/').next().unwrap_or_default();
    segment.parse::<u64>().map_err(|e| {
        anyhow!("failed to convert PR number {segment:?} extracted from URL {url:?} to int: {e}")
    })
}
