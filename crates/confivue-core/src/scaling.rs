//! Score scaling and band mapping.
//!
//! Theta is clamped to `[-2.5, 2.5]` and remapped linearly onto an integer
//! `0..=100`. Ties round half to even.

use serde::{Deserialize, Serialize};

use crate::model::{Band, Mode};

pub const THETA_MIN: f64 = -2.5;
pub const THETA_MAX: f64 = 2.5;

/// Lowest score in the Growing band.
pub const GROWING_FROM: u8 = 40;
/// Lowest score in the Thriving band.
pub const THRIVING_FROM: u8 = 70;

/// Map theta onto `0..=100`.
pub fn scale_to_0_100(theta: f64) -> u8 {
    let clamped = theta.clamp(THETA_MIN, THETA_MAX);
    let scaled = ((clamped - THETA_MIN) / (THETA_MAX - THETA_MIN) * 100.0).round_ties_even();
    scaled as u8
}

impl Band {
    /// Band for a scaled score. Lower bounds are inclusive.
    pub fn from_score(score: u8) -> Self {
        if score < GROWING_FROM {
            Band::Emerging
        } else if score < THRIVING_FROM {
            Band::Growing
        } else {
            Band::Thriving
        }
    }
}

/// Score report for one assessment, provisional while the session is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub assessment_id: String,
    pub user_id: String,
    pub mode: Mode,
    pub scaled_score: u8,
    pub band: Band,
    pub sem: f64,
    /// Item ids in presentation order.
    pub asked: Vec<String>,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors() {
        assert_eq!(scale_to_0_100(0.0), 50);
        assert_eq!(scale_to_0_100(2.5), 100);
        assert_eq!(scale_to_0_100(-2.5), 0);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(scale_to_0_100(5.0), 100);
        assert_eq!(scale_to_0_100(-40.0), 0);
    }

    #[test]
    fn category_extremes() {
        assert_eq!(scale_to_0_100(1.6), 82);
        assert_eq!(scale_to_0_100(-1.6), 18);
        assert_eq!(scale_to_0_100(0.8), 66);
    }

    #[test]
    fn ties_round_half_to_even() {
        // (-1.875 + 2.5) / 5 * 100 == 12.5 exactly
        assert_eq!(scale_to_0_100(-1.875), 12);
        // (-0.625 + 2.5) / 5 * 100 == 37.5 exactly
        assert_eq!(scale_to_0_100(-0.625), 38);
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(Band::from_score(0), Band::Emerging);
        assert_eq!(Band::from_score(39), Band::Emerging);
        assert_eq!(Band::from_score(40), Band::Growing);
        assert_eq!(Band::from_score(69), Band::Growing);
        assert_eq!(Band::from_score(70), Band::Thriving);
        assert_eq!(Band::from_score(100), Band::Thriving);
    }
}
