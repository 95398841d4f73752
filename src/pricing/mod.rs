use serde::{Deserialize, Serialize};

const BASE_FEE: f64 = 5.00;
const PER_MILE_RATE: f64 = 1.50;
const WEIGHT_THRESHOLD_LBS: f64 = 50.0;
const OVERWEIGHT_RATE_PER_LB: f64 = 0.10;
const INSURANCE_THRESHOLD_VALUE: f64 = 500.0;
const INSURANCE_FEE: f64 = 2.00;
const PLATFORM_PERCENTAGE: f64 = 0.20;

/// Per-component fee terms, kept unrounded. Only the totals below are
/// rounded to cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub base_fee: f64,
    pub distance_fee: f64,
    pub weight_fee: f64,
    pub insurance_fee: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeCalculation {
    pub total_fee: f64,
    pub platform_cut: f64,
    pub driver_earnings: f64,
    pub breakdown: FeeBreakdown,
}

/// Prices a delivery from distance, item weight and declared item value.
///
/// Weight over 50 lbs adds $0.10/lb for the excess; declared value over
/// $500 adds a flat $2.00 insurance fee. Both thresholds are strict:
/// exactly 50 lbs / exactly $500 incur nothing. The platform keeps 20%
/// of the total; the driver gets the remainder, so the two shares always
/// sum back to the rounded total.
///
/// Inputs are not guarded; callers validate non-negativity at the
/// boundary.
pub fn calculate_fee(distance_miles: f64, item_weight_lbs: f64, item_value: f64) -> FeeCalculation {
    let distance_fee = distance_miles * PER_MILE_RATE;

    let weight_fee = if item_weight_lbs > WEIGHT_THRESHOLD_LBS {
        (item_weight_lbs - WEIGHT_THRESHOLD_LBS) * OVERWEIGHT_RATE_PER_LB
    } else {
        0.0
    };

    let insurance_fee = if item_value > INSURANCE_THRESHOLD_VALUE {
        INSURANCE_FEE
    } else {
        0.0
    };

    let total_fee = round_cents(BASE_FEE + distance_fee + weight_fee + insurance_fee);
    let platform_cut = round_cents(total_fee * PLATFORM_PERCENTAGE);
    let driver_earnings = round_cents(total_fee - platform_cut);

    FeeCalculation {
        total_fee,
        platform_cut,
        driver_earnings,
        breakdown: FeeBreakdown {
            base_fee: BASE_FEE,
            distance_fee,
            weight_fee,
            insurance_fee,
        },
    }
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::calculate_fee;

    #[test]
    fn ten_mile_delivery_splits_twenty_dollars() {
        let fee = calculate_fee(10.0, 0.0, 0.0);

        assert_eq!(fee.total_fee, 20.00);
        assert_eq!(fee.platform_cut, 4.00);
        assert_eq!(fee.driver_earnings, 16.00);
        assert_eq!(fee.breakdown.base_fee, 5.00);
        assert_eq!(fee.breakdown.distance_fee, 15.00);
        assert_eq!(fee.breakdown.weight_fee, 0.0);
        assert_eq!(fee.breakdown.insurance_fee, 0.0);
    }

    #[test]
    fn total_is_monotone_in_distance() {
        let distances = [0.0, 0.5, 1.0, 2.75, 10.0, 25.0, 100.0];
        for pair in distances.windows(2) {
            let shorter = calculate_fee(pair[0], 30.0, 200.0);
            let longer = calculate_fee(pair[1], 30.0, 200.0);
            assert!(shorter.total_fee <= longer.total_fee);
        }
    }

    #[test]
    fn shares_always_sum_to_the_total() {
        let cases = [
            (0.0, 0.0, 0.0),
            (10.67, 0.0, 0.0),
            (0.35, 12.0, 80.0),
            (13.34, 72.5, 900.0),
            (99.99, 50.01, 500.01),
        ];
        for (distance, weight, value) in cases {
            let fee = calculate_fee(distance, weight, value);
            assert!(
                (fee.platform_cut + fee.driver_earnings - fee.total_fee).abs() < 1e-9,
                "shares drifted for distance={distance} weight={weight} value={value}"
            );
        }
    }

    #[test]
    fn weight_threshold_is_strict() {
        assert_eq!(calculate_fee(0.0, 50.0, 0.0).breakdown.weight_fee, 0.0);
        assert!(calculate_fee(0.0, 50.01, 0.0).breakdown.weight_fee > 0.0);
    }

    #[test]
    fn overweight_is_charged_per_excess_pound() {
        let fee = calculate_fee(0.0, 75.0, 0.0);
        assert!((fee.breakdown.weight_fee - 2.50).abs() < 1e-9);
    }

    #[test]
    fn insurance_threshold_is_strict() {
        assert_eq!(calculate_fee(0.0, 0.0, 500.0).breakdown.insurance_fee, 0.0);
        assert_eq!(
            calculate_fee(0.0, 0.0, 500.01).breakdown.insurance_fee,
            2.00
        );
    }

    #[test]
    fn shares_still_sum_when_platform_cut_rounds_down() {
        // total 20.01: 20% is 4.002, which rounds down to 4.00. The
        // driver share is derived from the total, not rounded
        // independently, so no cent goes missing.
        let fee = calculate_fee(10.006666, 0.0, 0.0);
        assert_eq!(fee.total_fee, 20.01);
        assert_eq!(fee.platform_cut, 4.00);
        assert_eq!(fee.driver_earnings, 16.01);
    }
}
