//! Customer review types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ReviewId;

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review ID.
    pub id: ReviewId,

    /// Reviewer display name.
    pub name: String,

    /// Review text.
    pub details: String,

    /// Star rating, 1-5.
    pub rating: u8,

    /// When the review was posted.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review.
    #[must_use]
    pub fn new(name: impl Into<String>, details: impl Into<String>, rating: u8) -> Self {
        Self {
            id: ReviewId::generate(),
            name: name.into(),
            details: details.into(),
            rating,
            created_at: Utc::now(),
        }
    }
}
