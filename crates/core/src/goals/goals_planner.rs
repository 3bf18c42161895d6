//! Pure calendar math for goal saving plans.
//!
//! All functions here are stateless: identical inputs yield identical
//! outputs, and callers re-derive on every change of target, current
//! amount, cadence, or deadline.

use chrono::{Datelike, Days, Months, NaiveDate};
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::goals_model::SavingStrategy;
use crate::constants::CURRENCY_DECIMAL_PRECISION;

/// Rounds a currency amount to cents, midpoint away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Count of whole cadence periods between two dates.
///
/// Month-based cadences count full calendar months (a month is only
/// complete once the day-of-month has been reached again), so the result
/// can be zero for a nearby deadline and negative for a past one.
pub fn whole_periods_between(strategy: SavingStrategy, from: NaiveDate, to: NaiveDate) -> i64 {
    match strategy {
        SavingStrategy::Daily => to.signed_duration_since(from).num_days(),
        SavingStrategy::Weekly => to.signed_duration_since(from).num_days() / 7,
        SavingStrategy::Monthly => whole_months_between(from, to),
        SavingStrategy::Quarterly => whole_months_between(from, to) / 3,
        SavingStrategy::Yearly => whole_months_between(from, to) / 12,
        SavingStrategy::SelfDependent => 0,
    }
}

fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = (to.year() as i64 - from.year() as i64) * 12
        + (to.month() as i64 - from.month() as i64);
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

/// Advances a date by `periods` cadence units, calendar-aware: month-based
/// cadences clamp to the last valid day of the landing month. Returns
/// `None` when the result is not representable or the strategy has no
/// cadence.
pub fn advance_periods(
    strategy: SavingStrategy,
    from: NaiveDate,
    periods: u32,
) -> Option<NaiveDate> {
    match strategy {
        SavingStrategy::Daily => from.checked_add_days(Days::new(periods as u64)),
        SavingStrategy::Weekly => from.checked_add_days(Days::new(7 * periods as u64)),
        SavingStrategy::Monthly => from.checked_add_months(Months::new(periods)),
        SavingStrategy::Quarterly => periods
            .checked_mul(3)
            .and_then(|months| from.checked_add_months(Months::new(months))),
        SavingStrategy::Yearly => periods
            .checked_mul(12)
            .and_then(|months| from.checked_add_months(Months::new(months))),
        SavingStrategy::SelfDependent => None,
    }
}

/// Required contribution per period to reach `target_amount` by `deadline`.
///
/// A deadline inside the current period (zero or negative whole periods
/// left) asks for the full remaining amount in the next period rather than
/// dividing by zero. A goal that is already met needs nothing.
pub fn derive_contribution(
    target_amount: Decimal,
    current_amount: Decimal,
    strategy: SavingStrategy,
    deadline: NaiveDate,
    today: NaiveDate,
) -> Decimal {
    if !strategy.is_structured() {
        return Decimal::ZERO;
    }
    let remaining = target_amount - current_amount;
    if remaining <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let periods = whole_periods_between(strategy, today, deadline);
    if periods <= 0 {
        return round_currency(remaining);
    }
    round_currency(remaining / Decimal::from(periods))
}

/// Projected completion date when `contribution` is saved every period.
///
/// Returns `None` when there is no active plan to project: the goal is
/// already met, the contribution is not positive, the strategy is
/// self-dependent, or the projected date would not be representable.
/// Periods needed are rounded up so the plan never under-shoots.
pub fn derive_completion_date(
    target_amount: Decimal,
    current_amount: Decimal,
    strategy: SavingStrategy,
    contribution: Decimal,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if !strategy.is_structured() {
        return None;
    }
    let remaining = target_amount - current_amount;
    if remaining <= Decimal::ZERO || contribution <= Decimal::ZERO {
        return None;
    }

    let periods_needed = (remaining / contribution).ceil().to_u32()?;
    advance_periods(strategy, today, periods_needed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_contribution_over_a_year() {
        let contribution = derive_contribution(
            dec!(1200),
            dec!(0),
            SavingStrategy::Monthly,
            date(2026, 8, 6),
            date(2025, 8, 6),
        );
        assert_eq!(contribution, dec!(100.00));
    }

    #[test]
    fn near_deadline_asks_for_full_remaining() {
        // Deadline 10 days out on a monthly cadence: zero whole periods.
        let contribution = derive_contribution(
            dec!(900),
            dec!(150),
            SavingStrategy::Monthly,
            date(2025, 8, 16),
            date(2025, 8, 6),
        );
        assert_eq!(contribution, dec!(750.00));
    }

    #[test]
    fn past_deadline_asks_for_full_remaining() {
        let contribution = derive_contribution(
            dec!(500),
            dec!(100),
            SavingStrategy::Weekly,
            date(2025, 7, 1),
            date(2025, 8, 6),
        );
        assert_eq!(contribution, dec!(400.00));
    }

    #[test]
    fn met_goal_needs_nothing() {
        let contribution = derive_contribution(
            dec!(500),
            dec!(500),
            SavingStrategy::Monthly,
            date(2026, 8, 6),
            date(2025, 8, 6),
        );
        assert_eq!(contribution, Decimal::ZERO);
    }

    #[test]
    fn uneven_split_rounds_to_cents() {
        let contribution = derive_contribution(
            dec!(1000),
            dec!(0),
            SavingStrategy::Monthly,
            date(2025, 11, 6),
            date(2025, 8, 6),
        );
        // 1000 / 3 months
        assert_eq!(contribution, dec!(333.33));
    }

    #[test]
    fn weekly_completion_date_is_eight_weeks_out() {
        let projected = derive_completion_date(
            dec!(1000),
            dec!(200),
            SavingStrategy::Weekly,
            dec!(100),
            date(2025, 8, 6),
        );
        assert_eq!(projected, Some(date(2025, 10, 1)));
    }

    #[test]
    fn periods_needed_round_up() {
        // ceil(800 / 300) = 3 quarters
        let projected = derive_completion_date(
            dec!(1000),
            dec!(200),
            SavingStrategy::Quarterly,
            dec!(300),
            date(2025, 8, 6),
        );
        assert_eq!(projected, Some(date(2026, 5, 6)));
    }

    #[test]
    fn month_advance_clamps_to_valid_day() {
        // Jan 31 + 1 month lands on Feb 28 in a non-leap year.
        let projected = derive_completion_date(
            dec!(100),
            dec!(0),
            SavingStrategy::Monthly,
            dec!(100),
            date(2025, 1, 31),
        );
        assert_eq!(projected, Some(date(2025, 2, 28)));
    }

    #[test]
    fn no_projection_without_positive_contribution() {
        let projected = derive_completion_date(
            dec!(1000),
            dec!(200),
            SavingStrategy::Monthly,
            Decimal::ZERO,
            date(2025, 8, 6),
        );
        assert_eq!(projected, None);
    }

    #[test]
    fn no_projection_once_met() {
        let projected = derive_completion_date(
            dec!(1000),
            dec!(1000),
            SavingStrategy::Monthly,
            dec!(50),
            date(2025, 8, 6),
        );
        assert_eq!(projected, None);
    }

    #[test]
    fn self_dependent_short_circuits_both_directions() {
        let contribution = derive_contribution(
            dec!(1000),
            dec!(0),
            SavingStrategy::SelfDependent,
            date(2026, 8, 6),
            date(2025, 8, 6),
        );
        assert_eq!(contribution, Decimal::ZERO);

        let projected = derive_completion_date(
            dec!(1000),
            dec!(0),
            SavingStrategy::SelfDependent,
            dec!(100),
            date(2025, 8, 6),
        );
        assert_eq!(projected, None);
    }

    #[test]
    fn quarterly_periods_count_full_quarters() {
        assert_eq!(
            whole_periods_between(SavingStrategy::Quarterly, date(2025, 1, 15), date(2025, 10, 20)),
            3
        );
        assert_eq!(
            whole_periods_between(SavingStrategy::Quarterly, date(2025, 1, 15), date(2025, 10, 10)),
            2
        );
    }

    #[test]
    fn monthly_periods_require_the_day_to_come_around() {
        assert_eq!(
            whole_periods_between(SavingStrategy::Monthly, date(2025, 1, 15), date(2025, 3, 14)),
            1
        );
        assert_eq!(
            whole_periods_between(SavingStrategy::Monthly, date(2025, 1, 15), date(2025, 3, 15)),
            2
        );
    }

    #[test]
    fn derivation_is_pure() {
        let args = (
            dec!(1200),
            dec!(300),
            SavingStrategy::Monthly,
            date(2026, 2, 1),
            date(2025, 8, 6),
        );
        let first = derive_contribution(args.0, args.1, args.2, args.3, args.4);
        let second = derive_contribution(args.0, args.1, args.2, args.3, args.4);
        assert_eq!(first, second);

        let p1 = derive_completion_date(args.0, args.1, args.2, dec!(150), args.4);
        let p2 = derive_completion_date(args.0, args.1, args.2, dec!(150), args.4);
        assert_eq!(p1, p2);
    }
}
