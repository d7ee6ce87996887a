use anyhow::{Result, anyhow};

use crate::domain::notification::{
    IgnoreSets, Notification, ReviewRequestEvent, pr_number_from_subject_url,
};
use crate::repo::InboxRepository;

/// Outcome of inspecting one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    AlreadyRead,
    NotPullRequest,
    /// Only `review_requested` is ever dismissed; mentions, comments and the
    /// rest stay unread.
    NotReviewRequest,
    IgnoredAuthor,
    IgnoredTeam,
    /// An ignored team was asked, but so was the viewer by name.
    PersonallyRequested,
    NotIgnored,
}

impl Verdict {
    pub fn dismisses(self) -> bool {
        matches!(self, Verdict::IgnoredAuthor | Verdict::IgnoredTeam)
    }
}

/// Decide from the PR's review-request history alone.
pub fn team_verdict(events: &[ReviewRequestEvent], ignore: &IgnoreSets, viewer: &str) -> Verdict {
    let mut team_requested = false;
    let mut self_requested = false;
    for ev in events.iter().filter(|e| e.is_review_request()) {
        if ev
            .requested_team
            .as_deref()
            .is_some_and(|t| ignore.ignores_team(t))
        {
            team_requested = true;
        }
        if ev.requested_reviewer.as_deref() == Some(viewer) {
            self_requested = true;
        }
    }
    match (team_requested, self_requested) {
        (true, false) => Verdict::IgnoredTeam,
        (true, true) => Verdict::PersonallyRequested,
        _ => Verdict::NotIgnored,
    }
}

pub async fn decide<R: InboxRepository>(
    repo: &R,
    ignore: &IgnoreSets,
    viewer: &str,
    n: &Notification,
) -> Result<Verdict> {
    if !n.unread {
        return Ok(Verdict::AlreadyRead);
    }
    let Some(subject) = n.subject.as_ref().filter(|_| n.is_pull_request()) else {
        return Ok(Verdict::NotPullRequest);
    };
    if !n.is_review_request() {
        return Ok(Verdict::NotReviewRequest);
    }

    let url = subject.url.as_deref().ok_or_else(|| {
        anyhow!(
            "notification {:?} in {} has no subject URL",
            n.id,
            n.repository.full_name()
        )
    })?;
    let number = pr_number_from_subject_url(url)?;

    let pr = repo.get_pull_request(&n.repository, number).await?;
    tracing::debug!(pr = %pr.key(), author = ?pr.author, "fetched pull request");
    if pr
        .normalized_author()
        .is_some_and(|a| ignore.ignores_author(a))
    {
        return Ok(Verdict::IgnoredAuthor);
    }

    if !ignore.has_teams() {
        return Ok(Verdict::NotIgnored);
    }
    let events = repo.list_issue_events(&n.repository, number).await?;
    Ok(team_verdict(&events, ignore, viewer))
}

/// Filter one page down to the notifications that should be marked read,
/// keeping input order. The first error aborts the page.
pub async fn select_for_dismissal<'a, R: InboxRepository>(
    repo: &R,
    ignore: &IgnoreSets,
    viewer: &str,
    batch: &'a [Notification],
) -> Result<Vec<&'a Notification>> {
    let mut out = Vec::new();
    for n in batch {
        let verdict = decide(repo, ignore, viewer, n).await?;
        tracing::debug!(
            id = %n.id,
            repo = %n.repository.full_name(),
            title = n.subject.as_ref().map(|s| s.title.as_str()),
            ?verdict,
            "inspected notification"
        );
        if verdict.dismisses() {
            out.push(n);
        }
    }
    Ok(out)
}
