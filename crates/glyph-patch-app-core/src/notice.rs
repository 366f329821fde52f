// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Short-lived HUD notices with expiry and de-duplication.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational.
    Info,
    /// Recoverable problem; the viewer carried on.
    Warn,
    /// Something the user has to act on.
    Error,
}

impl NoticeKind {
    /// How long a notice of this kind stays visible.
    pub const fn ttl(self) -> Duration {
        match self {
            Self::Info => Duration::from_secs(3),
            Self::Warn => Duration::from_secs(6),
            Self::Error => Duration::from_secs(10),
        }
    }
}

/// Identifier for a notice.
pub type NoticeId = u64;

#[derive(Debug, Clone)]
struct Notice {
    id: NoticeId,
    kind: NoticeKind,
    title: String,
    body: Option<String>,
    created: Instant,
    repeats: u32,
}

/// Render-ready view of a notice.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
    /// Stable identifier.
    pub id: NoticeId,
    /// Severity.
    pub kind: NoticeKind,
    /// Headline.
    pub title: String,
    /// Detail text.
    pub body: Option<String>,
    /// How many identical notices were folded into this one.
    pub repeats: u32,
    /// 1.0 when fresh, approaching 0.0 at expiry.
    pub remaining: f32,
}

/// Bounded queue of notices.
#[derive(Debug)]
pub struct NoticeBoard {
    queue: VecDeque<Notice>,
    capacity: usize,
    dedupe_window: Duration,
    next_id: NoticeId,
}

impl NoticeBoard {
    /// Board holding at most `capacity` notices; the oldest is dropped first.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            dedupe_window: Duration::from_secs(2),
            next_id: 1,
        }
    }

    /// Post a notice. An identical notice still inside the de-dupe window is
    /// refreshed instead of duplicated.
    pub fn post(
        &mut self,
        kind: NoticeKind,
        title: impl Into<String>,
        body: impl Into<Option<String>>,
        now: Instant,
    ) -> NoticeId {
        let title = title.into();
        let body = body.into();
        let window = self.dedupe_window;
        if let Some(existing) = self.queue.iter_mut().find(|n| {
            n.kind == kind
                && n.title == title
                && n.body == body
                && now.saturating_duration_since(n.created) <= window
        }) {
            existing.created = now;
            existing.repeats += 1;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.queue.len() >= self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(Notice {
            id,
            kind,
            title,
            body,
            created: now,
            repeats: 1,
        });
        id
    }

    /// Drop expired notices.
    pub fn prune(&mut self, now: Instant) {
        self.queue
            .retain(|n| now.saturating_duration_since(n.created) < n.kind.ttl());
    }

    /// Live notices, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<NoticeView> {
        self.queue
            .iter()
            .filter_map(|n| {
                let age = now.saturating_duration_since(n.created);
                let ttl = n.kind.ttl();
                (age < ttl).then(|| NoticeView {
                    id: n.id,
                    kind: n.kind,
                    title: n.title.clone(),
                    body: n.body.clone(),
                    repeats: n.repeats,
                    remaining: 1.0 - age.as_secs_f32() / ttl.as_secs_f32(),
                })
            })
            .collect()
    }

    /// Number of stored notices, expired ones included until [`prune`](Self::prune).
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
