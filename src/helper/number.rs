use std::cmp::Ordering;

use rust_decimal::{Decimal, RoundingStrategy};

pub trait Sign {
    fn positive(&self) -> bool;
    fn negative(&self) -> bool;
    fn zero(&self) -> bool;
    fn sign(&self) -> Ordering;
}

impl Sign for Decimal {
    fn positive(&self) -> bool {
        self.is_sign_positive() && !self.is_zero()
    }

    fn negative(&self) -> bool {
        self.is_sign_negative() && !self.is_zero()
    }

    fn zero(&self) -> bool {
        self.is_zero()
    }

    fn sign(&self) -> Ordering {
        if self.negative() {
            Ordering::Less
        } else if self.is_zero() {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }
}

/// Format as en-US currency with exactly 2 fraction digits
/// Example: 340000000 → $340,000,000.00, 0.1234 → $0.12
pub fn format_currency(value: Decimal) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if value.negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_digits(&format!("{rounded:.2}")))
}

/// Format a percent value with 2 fraction digits and an explicit `+` for gains
/// Example: 5.67 → +5.67%, -3.21 → -3.21%, 0 → 0.00%
pub fn format_percent(value: Decimal) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = match value.sign() {
        Ordering::Greater => "+",
        Ordering::Less => "-",
        Ordering::Equal => "",
    };
    format!("{sign}{rounded:.2}%")
}

/// Format a plain quantity with thousands grouping and up to 3 fraction digits
/// Example: 1000000000 → 1,000,000,000, 1234.5000 → 1,234.5
pub fn format_grouped(value: Decimal) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if value.negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}", group_digits(&rounded.to_string()))
}

/// Insert `,` every three digits of the integer part of an unsigned number
fn group_digits(number: &str) -> String {
    let (int, frac) = number
        .split_once('.')
        .map_or((number, None), |(int, frac)| (int, Some(frac)));

    let len = int.len();
    let mut out = String::with_capacity(number.len() + len / 3);
    for (idx, c) in int.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_currency, format_grouped, format_percent, group_digits, Sign};
    use rust_decimal_macros::dec;
    use std::cmp::Ordering;

    #[test]
    fn format_currency_in_us_dollars() {
        assert_eq!(format_currency(dec!(0.1234)), "$0.12");
        assert_eq!(format_currency(dec!(2.3456)), "$2.35");
        assert_eq!(format_currency(dec!(340000000)), "$340,000,000.00");
        assert_eq!(format_currency(dec!(217000000)), "$217,000,000.00");
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.995)), "$1,000.00");
        assert_eq!(format_currency(dec!(-1)), "-$1.00");
    }

    #[test]
    fn format_percent_sign_rules() {
        assert_eq!(format_percent(dec!(5.67)), "+5.67%");
        assert_eq!(format_percent(dec!(-3.21)), "-3.21%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
        assert_eq!(format_percent(dec!(12)), "+12.00%");
        assert_eq!(format_percent(dec!(0.125)), "+0.13%");
        assert_eq!(format_percent(dec!(-0.001)), "-0.00%");
    }

    #[test]
    fn format_grouped_quantities() {
        assert_eq!(format_grouped(dec!(1000000000)), "1,000,000,000");
        assert_eq!(format_grouped(dec!(500000000)), "500,000,000");
        assert_eq!(format_grouped(dec!(999)), "999");
        assert_eq!(format_grouped(dec!(1234.5000)), "1,234.5");
        assert_eq!(format_grouped(dec!(0.12345)), "0.123");
    }

    #[test]
    fn formatting_is_pure() {
        let value = dec!(340000000);
        assert_eq!(format_currency(value), format_currency(value));
        assert_eq!(format_percent(dec!(5.67)), format_percent(dec!(5.67)));
        assert_eq!(format_grouped(value), format_grouped(value));
    }

    #[test]
    fn group_digits_boundaries() {
        assert_eq!(group_digits("1"), "1");
        assert_eq!(group_digits("100"), "100");
        assert_eq!(group_digits("1000"), "1,000");
        assert_eq!(group_digits("100000.50"), "100,000.50");
    }

    #[test]
    fn decimal_sign() {
        assert_eq!(dec!(1.5).sign(), Ordering::Greater);
        assert_eq!(dec!(0).sign(), Ordering::Equal);
        assert_eq!(dec!(-0.01).sign(), Ordering::Less);
        assert!(!dec!(0).positive());
    }
}
