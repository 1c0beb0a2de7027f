//! Ability estimation.
//!
//! Theta is a centered-linear proxy: each category in `0..=4` maps to
//! `(category - 2) * 0.8` and theta is the plain mean over the response log.
//! Every response weighs the same regardless of position or item.

use crate::model::Response;

/// Step between adjacent categories on the theta scale.
pub const CATEGORY_STEP: f64 = 0.8;
/// The neutral category, mapped to 0.0.
pub const CENTER_CATEGORY: f64 = 2.0;

/// Starting uncertainty of a fresh session.
pub const INITIAL_SEM: f64 = 1.0;
/// Lower bound of the uncertainty proxy.
pub const SEM_FLOOR: f64 = 0.3;
const SEM_INTERCEPT: f64 = 1.2;
const SEM_DECAY_PER_RESPONSE: f64 = 0.1;

/// Signed value contributed by a single category.
pub fn category_value(category: u8) -> f64 {
    (f64::from(category) - CENTER_CATEGORY) * CATEGORY_STEP
}

/// Estimate theta from an ordered response log. Empty logs estimate 0.0.
pub fn estimate_theta(responses: &[Response]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let sum: f64 = responses.iter().map(|r| category_value(r.category)).sum();
    sum / responses.len() as f64
}

/// Uncertainty after `response_count` recorded responses.
///
/// `max(0.3, 1.2 - 0.1 * n)`: non-increasing in `n`, floored at 0.3.
pub fn sem_after(response_count: usize) -> f64 {
    SEM_FLOOR.max(SEM_INTERCEPT - SEM_DECAY_PER_RESPONSE * response_count as f64)
}
