use chrono::{DateTime, Duration, Utc};

use crate::model::SessionId;
use crate::session::AnswerRecord;

/// Qualitative band for a final score. Thresholds are inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    /// 90% and above.
    Excellent,
    /// 70% and above.
    Good,
    /// 50% and above.
    Fair,
    NeedsWork,
}

impl ScoreTier {
    /// Tier for `score` correct answers out of `total`, in exact integer arithmetic.
    #[must_use]
    pub fn from_score(score: u32, total: u32) -> Self {
        if total == 0 {
            return ScoreTier::NeedsWork;
        }
        let scaled = u64::from(score) * 10;
        let total = u64::from(total);
        if scaled >= 9 * total {
            ScoreTier::Excellent
        } else if scaled >= 7 * total {
            ScoreTier::Good
        } else if scaled >= 5 * total {
            ScoreTier::Fair
        } else {
            ScoreTier::NeedsWork
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent! You have mastered this topic!",
            ScoreTier::Good => "Very good! You have a solid understanding of the topic.",
            ScoreTier::Fair => "Good! Keep practicing to improve.",
            ScoreTier::NeedsWork => "Keep studying this topic to strengthen your knowledge.",
        }
    }
}

/// Snapshot of a completed session, for the results screen.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResults {
    pub session_id: SessionId,
    pub title: String,
    pub score: u32,
    pub total: u32,
    pub tier: ScoreTier,
    pub history: Vec<AnswerRecord>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizResults {
    /// Score as a whole percentage, rounded half up.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score * 100 + self.total / 2) / self.total
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.history.iter().filter(|record| record.was_correct).count()
    }
}
