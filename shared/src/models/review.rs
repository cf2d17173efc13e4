//! Review Model

use serde::{Deserialize, Serialize};

use super::reservation::UserRef;
use super::restaurant::RestaurantRef;
use crate::error::{ModelError, ModelResult};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const MIN_COMMENT_LEN: usize = 5;

/// Review of a past reservation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: Option<i64>,
    pub rating: u8,
    pub comment: String,
    pub date: String,
    #[serde(default)]
    pub restaurant: Option<RestaurantRef>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Create review payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub restaurant_id: i64,
    pub reservation_id: i64,
    pub rating: u8,
    pub comment: String,
}

impl ReviewCreate {
    /// Checks rating range and (trimmed) comment length
    pub fn new(
        restaurant_id: i64,
        reservation_id: i64,
        rating: i64,
        comment: impl Into<String>,
    ) -> ModelResult<Self> {
        if !(MIN_RATING as i64..=MAX_RATING as i64).contains(&rating) {
            return Err(ModelError::RatingOutOfRange {
                got: rating,
                min: MIN_RATING,
                max: MAX_RATING,
            });
        }
        let comment = comment.into().trim().to_string();
        if comment.chars().count() < MIN_COMMENT_LEN {
            return Err(ModelError::CommentTooShort {
                min: MIN_COMMENT_LEN,
            });
        }
        Ok(Self {
            restaurant_id,
            reservation_id,
            rating: rating as u8,
            comment,
        })
    }
}

/// Mean rating rounded to one decimal, `None` without reviews
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| r.rating as u32).sum();
    let mean = sum as f64 / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}
