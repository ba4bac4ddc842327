//! Year-over-year growth and one-year-ahead projection

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::YearlyAverages;

/// Growth of average yield between the two latest years, and the next year's projection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrowthProjection {
    /// Fractional change, e.g. 0.2 for +20%. May be negative.
    pub growth_rate: Decimal,
    pub projected_average_yield: Decimal,
}

/// Project next year's average yield from the latest year-over-year change.
///
/// Only the two most recent years are used; earlier history does not
/// influence the projection. A rate or projection too large for `Decimal`
/// saturates at `Decimal::MAX`.
pub fn compute_growth_projection(yearly: &YearlyAverages) -> GrowthProjection {
    let averages: Vec<Decimal> = yearly.average_yield.values().copied().collect();

    let projection = match averages.as_slice() {
        [] => GrowthProjection::default(),
        [only] => GrowthProjection {
            growth_rate: Decimal::ZERO,
            projected_average_yield: *only,
        },
        [.., prev, curr] => {
            let growth_rate = if *prev > Decimal::ZERO {
                curr.saturating_sub(*prev)
                    .checked_div(*prev)
                    .unwrap_or(Decimal::MAX)
            } else {
                Decimal::ZERO
            };
            GrowthProjection {
                growth_rate,
                projected_average_yield: curr
                    .saturating_mul(Decimal::ONE.saturating_add(growth_rate)),
            }
        }
    };

    tracing::debug!(
        growth_rate = %projection.growth_rate,
        projected_average_yield = %projection.projected_average_yield,
        "Computed growth projection"
    );

    projection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yearly(values: &[(i32, i64)]) -> YearlyAverages {
        let mut averages = YearlyAverages::default();
        for (year, avg) in values {
            averages.average_yield.insert(*year, Decimal::from(*avg));
        }
        averages
    }

    #[test]
    fn test_no_history() {
        assert_eq!(compute_growth_projection(&yearly(&[])), GrowthProjection::default());
    }

    #[test]
    fn test_single_year_carries_forward() {
        let projection = compute_growth_projection(&yearly(&[(2023, 80)]));
        assert_eq!(projection.growth_rate, Decimal::ZERO);
        assert_eq!(projection.projected_average_yield, Decimal::from(80));
    }

    #[test]
    fn test_growth_from_last_two_years() {
        let projection = compute_growth_projection(&yearly(&[(2022, 50), (2023, 60)]));
        assert_eq!(projection.growth_rate, Decimal::new(2, 1));
        assert_eq!(projection.projected_average_yield, Decimal::from(72));
    }

    #[test]
    fn test_earlier_years_ignored() {
        let short = compute_growth_projection(&yearly(&[(2022, 50), (2023, 60)]));
        let long = compute_growth_projection(&yearly(&[(2018, 5), (2020, 900), (2022, 50), (2023, 60)]));
        assert_eq!(short, long);
    }

    #[test]
    fn test_decline_is_negative() {
        let projection = compute_growth_projection(&yearly(&[(2022, 100), (2023, 50)]));
        assert_eq!(projection.growth_rate, Decimal::new(-5, 1));
        assert_eq!(projection.projected_average_yield, Decimal::from(25));
    }

    #[test]
    fn test_zero_previous_year_means_no_growth() {
        let projection = compute_growth_projection(&yearly(&[(2022, 0), (2023, 40)]));
        assert_eq!(projection.growth_rate, Decimal::ZERO);
        assert_eq!(projection.projected_average_yield, Decimal::from(40));
    }

    #[test]
    fn test_projection_saturates_instead_of_overflowing() {
        let mut averages = YearlyAverages::default();
        averages.average_yield.insert(2022, Decimal::new(1, 10));
        averages.average_yield.insert(2023, Decimal::from(10_000_000_000i64));

        let projection = compute_growth_projection(&averages);
        assert!(projection.growth_rate > Decimal::ZERO);
        assert_eq!(projection.projected_average_yield, Decimal::MAX);
    }

    #[test]
    fn test_growth_rate_saturates_on_tiny_previous_year() {
        let mut averages = YearlyAverages::default();
        averages.average_yield.insert(2022, Decimal::new(1, 28));
        averages.average_yield.insert(2023, Decimal::from(10_000_000_000i64));

        let projection = compute_growth_projection(&averages);
        assert_eq!(projection.growth_rate, Decimal::MAX);
        assert_eq!(projection.projected_average_yield, Decimal::MAX);
    }
}
