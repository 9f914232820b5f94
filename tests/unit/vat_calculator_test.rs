// Property tests for the two VAT strategies
//
// Flat: VAT = amount × rate, rounded half-even to cents; amount is untouched.
// Inclusive: VAT = amount × percent / 100; net = amount − VAT and never
// exceeds the amount.

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use vatpos::modules::vat::{compute_vat, VatCalculator, VatPolicy};

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

proptest! {
    #[test]
    fn test_flat_vat_is_sixteen_percent(amount_cents in 0u64..10_000_000_000u64) {
        let amount = cents(amount_cents);
        let calculator = VatCalculator::new(dec!(0.16)).unwrap();

        let vat = calculator.flat_vat(amount).unwrap();
        let expected = (amount * dec!(0.16))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        prop_assert_eq!(vat, expected);
        prop_assert!(vat >= Decimal::ZERO);
        prop_assert!(vat.scale() <= 2);
    }

    #[test]
    fn test_flat_policy_keeps_amount_as_net(amount_cents in 0u64..10_000_000_000u64) {
        let amount = cents(amount_cents);
        let breakdown = compute_vat(amount, VatPolicy::flat(dec!(0.16))).unwrap();

        prop_assert_eq!(breakdown.amount, amount);
        prop_assert_eq!(breakdown.net, amount);
    }

    #[test]
    fn test_inclusive_net_plus_vat_is_amount(
        amount_cents in 0u64..10_000_000_000u64,
        percent in 0u8..=100u8
    ) {
        let amount = cents(amount_cents);
        let percent = Decimal::from(percent);
        let breakdown = compute_vat(amount, VatPolicy::inclusive(percent)).unwrap();

        let expected_vat = (amount * percent / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        prop_assert_eq!(breakdown.vat, expected_vat);
        prop_assert_eq!(breakdown.net, amount - breakdown.vat);
        prop_assert!(breakdown.net <= amount, "net {} exceeds amount {}", breakdown.net, amount);
        prop_assert!(breakdown.net >= Decimal::ZERO);
    }
}

#[test]
fn test_known_values() {
    let calculator = VatCalculator::new(dec!(0.16)).unwrap();
    assert_eq!(calculator.flat_vat(dec!(100.00)).unwrap(), dec!(16.00));
    assert_eq!(calculator.flat_vat(dec!(0)).unwrap(), dec!(0));

    let breakdown = calculator.inclusive(dec!(110.00), dec!(20.0)).unwrap();
    assert_eq!(breakdown.vat, dec!(22.00));
    assert_eq!(breakdown.net, dec!(88.00));
}

#[test]
fn test_rejects_out_of_range_inputs() {
    assert!(VatCalculator::new(dec!(1.5)).is_err());
    assert!(VatCalculator::new(dec!(-0.01)).is_err());

    let calculator = VatCalculator::new(dec!(0.16)).unwrap();
    assert!(calculator.flat_vat(dec!(-1)).is_err());
    assert!(calculator.inclusive(dec!(10), dec!(101)).is_err());
}

#[test]
fn test_amounts_near_decimal_max_do_not_panic() {
    let huge = dec!(1000000000000000000000000000);
    let breakdown = compute_vat(huge, VatPolicy::inclusive(dec!(100))).unwrap();
    assert_eq!(breakdown.vat, huge);
    assert_eq!(breakdown.net, Decimal::ZERO);

    let calculator = VatCalculator::new(dec!(0.16)).unwrap();
    assert!(calculator.flat_vat(Decimal::MAX).is_ok());
    assert!(calculator.inclusive(Decimal::MAX, dec!(20)).is_ok());
}
