//! Statistical helpers over decimal series.

use rust_decimal::Decimal;

const TWO: Decimal = Decimal::TWO;
const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 18); // 1e-18

/// Calculate mean of a slice of decimals.
///
/// Returns `None` for an empty slice or when the sum overflows.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(values.len() as u64))
}

/// Calculate the sample standard deviation (n - 1 denominator).
///
/// Returns `None` for fewer than two values or when an intermediate overflows.
pub fn std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }

    let avg = mean(values)?;
    let variance_sum = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        let diff = v.checked_sub(avg)?;
        acc.checked_add(diff.checked_mul(diff)?)
    })?;
    let variance = variance_sum.checked_div(Decimal::from((values.len() - 1) as u64))?;

    sqrt_decimal(variance)
}

/// Approximate square root using Newton's method.
pub fn sqrt_decimal(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    if value == Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    // Start at or above the root so the iteration decreases monotonically
    let mut guess = if value > Decimal::ONE { value } else { Decimal::ONE };

    for _ in 0..200 {
        let next = guess.checked_add(value.checked_div(guess)?)? / TWO;
        if (next - guess).abs() < TOLERANCE {
            return Some(next);
        }
        guess = next;
    }

    Some(guess)
}
