//! Notification Text
//!
//! Plain-text bodies for every message the monitor sends. Prices are shown
//! with two decimals and deviations as signed percentages.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use super::monitor_loop::{SeedFailure, TerminationReason};
use crate::application::ports::QuoteSourceError;
use crate::domain::band::Direction;
use crate::domain::shared::TickerSpec;
use crate::domain::watch::TickerWatch;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn price(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn percent(ratio: Decimal) -> String {
    let pct = (ratio * HUNDRED).round_dp(2);
    if pct.is_sign_negative() && !pct.is_zero() {
        format!("{pct:.2}%")
    } else {
        format!("+{:.2}%", pct.abs())
    }
}

fn move_from(reference: Decimal, target: Decimal) -> Decimal {
    (target - reference)
        .checked_div(reference)
        .unwrap_or(Decimal::ZERO)
}

/// Startup summary: one block per seeded ticker, then one line per failure.
pub fn session_summary<'a>(
    watches: impl IntoIterator<Item = &'a TickerWatch>,
    failures: &[SeedFailure],
) -> String {
    let mut text = String::from("Band monitor started\n");

    for watch in watches {
        let reference = watch.reference_close();
        let buy = watch.buy_trigger();
        let sell = watch.sell_trigger();
        let _ = write!(
            text,
            "\n{}\n  Reference close: {}\n  Buy below: {} ({})\n  Sell above: {} ({})\n",
            watch.spec().label(),
            price(reference),
            price(buy),
            percent(move_from(reference, buy)),
            price(sell),
            percent(move_from(reference, sell)),
        );
    }

    if !failures.is_empty() {
        text.push_str("\nNot monitored:\n");
        for failure in failures {
            let _ = writeln!(text, "  {}: {}", failure.ticker.label(), failure.reason);
        }
    }

    text
}

/// Directional alert for a band crossing.
pub fn crossing_alert(
    watch: &TickerWatch,
    direction: Direction,
    current_price: Decimal,
    deviation: Decimal,
) -> String {
    let reference = watch.reference_close();
    let (tag, label, trigger) = match direction {
        Direction::Buy => ("[BUY]", "Buy trigger", watch.buy_trigger()),
        Direction::Sell => ("[SELL]", "Sell trigger", watch.sell_trigger()),
    };

    format!(
        "{tag} {}\nReference close: {}\n{label}: {} ({})\nCurrent price: {} ({})",
        watch.spec().label(),
        price(reference),
        price(trigger),
        percent(move_from(reference, trigger)),
        price(current_price),
        percent(deviation),
    )
}

/// Per-ticker fault while polling.
pub fn ticker_error(ticker: &TickerSpec, error: &QuoteSourceError) -> String {
    format!("[ERROR] {}: {error}", ticker.label())
}

/// Message sent when the session reaches DONE.
pub fn termination_notice(reason: TerminationReason) -> String {
    match reason {
        TerminationReason::Weekend => "Market closed today (weekend). Monitoring not started.",
        TerminationReason::Holiday => "Market closed today (holiday). Monitoring not started.",
        TerminationReason::OutsideSessionHours => {
            "Outside regular session hours. Monitoring not started."
        }
        TerminationReason::SessionClosed => "Market closed. Monitoring ended.",
        TerminationReason::AllResolved => "All tickers have triggered. Monitoring ended.",
        TerminationReason::NoTickersSeeded => "No ticker could be prepared. Monitoring ended.",
        TerminationReason::Cancelled => "Monitoring stopped by operator.",
    }
    .to_string()
}
