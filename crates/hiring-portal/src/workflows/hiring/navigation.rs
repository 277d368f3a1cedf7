use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use super::domain::{ApplicationSnapshot, Stage, StageCompletion};
use super::gate::{check_access, AccessDecision, DenialReason};

const DEFAULT_NOTICE_TTL_SECS: i64 = 3;

/// Transient message shown after a refused stage switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialNotice {
    pub reason: DenialReason,
    pub message: &'static str,
    pub expires_at: DateTime<Utc>,
}

impl DenialNotice {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Result of a user-initiated stage switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Transitioned {
        from: Stage,
        to: Stage,
    },
    Rejected {
        active: Stage,
        target: Stage,
        notice: DenialNotice,
    },
}

impl NavigationOutcome {
    /// Stage the dashboard shows after the request.
    pub fn active_stage(&self) -> Stage {
        match self {
            Self::Transitioned { to, .. } => *to,
            Self::Rejected { active, .. } => *active,
        }
    }

    pub fn notice(&self) -> Option<&DenialNotice> {
        match self {
            Self::Transitioned { .. } => None,
            Self::Rejected { notice, .. } => Some(notice),
        }
    }
}

/// Applies the access gate to stage clicks and stamps denial notices with an expiry.
#[derive(Debug, Clone)]
pub struct StageNavigationController {
    notice_ttl: Duration,
}

impl StageNavigationController {
    /// Non-positive durations fall back to the default so notices always expire after a
    /// fixed, positive interval.
    pub fn new(notice_ttl: Duration) -> Self {
        let notice_ttl = if notice_ttl > Duration::zero() {
            notice_ttl
        } else {
            Duration::seconds(DEFAULT_NOTICE_TTL_SECS)
        };

        Self { notice_ttl }
    }

    pub fn notice_ttl(&self) -> Duration {
        self.notice_ttl
    }

    pub fn request(
        &self,
        snapshot: &ApplicationSnapshot,
        completion: &StageCompletion,
        current: Stage,
        target: Stage,
        now: DateTime<Utc>,
    ) -> NavigationOutcome {
        match check_access(snapshot, completion, target) {
            AccessDecision::Allowed => {
                debug!(from = current.number(), to = target.number(), "stage switch");
                NavigationOutcome::Transitioned {
                    from: current,
                    to: target,
                }
            }
            AccessDecision::Denied(reason) => {
                debug!(
                    active = current.number(),
                    target = target.number(),
                    reason = reason.message(),
                    "stage switch refused"
                );
                NavigationOutcome::Rejected {
                    active: current,
                    target,
                    notice: DenialNotice {
                        reason,
                        message: reason.message(),
                        expires_at: now + self.notice_ttl,
                    },
                }
            }
        }
    }
}

impl Default for StageNavigationController {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_NOTICE_TTL_SECS))
    }
}
