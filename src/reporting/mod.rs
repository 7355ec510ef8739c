//! Plain-text rendering of scan results for chat or log consumers.

use std::fmt::Write;

use crate::indicators::registry::IndicatorCategory;
use crate::models::{ScanReport, Signal, TradePlan};

const RULE: &str = "-----------------------------------";

fn status(signal: &Signal, category: IndicatorCategory) -> &'static str {
    signal.category(category).map_or("neutral", |c| c.status())
}

/// Best composite the signal's categories allow.
fn score_range(signal: &Signal) -> i32 {
    signal.category_scores.iter().map(|c| c.cap).sum()
}

fn price(value: f64) -> String {
    format!("{:.2}", value)
}

/// One block per signal (report order), then the skipped tickers.
pub fn format_scan_report(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "SCAN RESULTS");
    let _ = writeln!(
        out,
        "Total: {} tickers, {} scored, {} skipped",
        report.total(),
        report.signals.len(),
        report.skipped.len()
    );
    let _ = writeln!(out, "{}", RULE);

    for signal in &report.signals {
        let _ = writeln!(out, "{} - {}", signal.ticker, price(signal.price));
        let _ = writeln!(out, "Signal: {}", signal.label);
        let _ = writeln!(out, "Score: {}/{}", signal.composite_score, score_range(signal));
        let _ = writeln!(out, "Trend: {}", status(signal, IndicatorCategory::Trend));
        let _ = writeln!(out, "Momentum: {}", status(signal, IndicatorCategory::Momentum));
        let _ = writeln!(out, "Volume: {}", status(signal, IndicatorCategory::Volume));
        let _ = writeln!(
            out,
            "Volatility: {}",
            status(signal, IndicatorCategory::Volatility)
        );
        let _ = writeln!(out, "{}", RULE);
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out, "Skipped:");
        for skipped in &report.skipped {
            let _ = writeln!(
                out,
                "- {} ({}): {}",
                skipped.ticker,
                skipped.reason.as_str(),
                skipped.detail
            );
        }
    }
    out
}

/// Full breakdown of one signal: plan, per-category scores, levels and the
/// strongest reasons.
pub fn format_signal_detail(signal: &Signal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ANALYSIS: {}", signal.ticker);
    let _ = writeln!(out, "As of: {}", signal.as_of.format("%d/%m/%Y %H:%M"));
    let _ = writeln!(out, "Price: {}", price(signal.price));
    let _ = writeln!(out);

    let _ = writeln!(out, "SIGNAL: {}", signal.label);
    let _ = writeln!(out, "Score: {}/{}", signal.composite_score, score_range(signal));
    let _ = writeln!(out);

    let _ = writeln!(out, "ENTRY & TARGETS");
    match &signal.plan {
        TradePlan::Active(levels) => {
            let _ = writeln!(out, "Entry: {}", price(levels.entry_price));
            for (i, target) in levels.target_prices.iter().enumerate() {
                let _ = writeln!(out, "Target {}: {}", i + 1, price(*target));
            }
            let _ = writeln!(out, "Stop Loss: {}", price(levels.stop_loss_price));
            let _ = writeln!(out, "R:R Ratio: 1:{:.1}", levels.risk_reward_ratio);
        }
        TradePlan::NotApplicable => {
            let _ = writeln!(out, "No trade plan for HOLD");
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "CATEGORIES");
    for category in &signal.category_scores {
        let _ = writeln!(
            out,
            "{}: {:+}/{} ({})",
            category.category.as_str(),
            category.score,
            category.cap,
            category.status()
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "SUPPORT & RESISTANCE");
    let level = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), price);
    let _ = writeln!(out, "Resistance: {}", level(signal.levels.resistance));
    let _ = writeln!(out, "Support: {}", level(signal.levels.support));
    let _ = writeln!(out);

    let _ = writeln!(out, "KEY SIGNALS");
    for reason in signal.key_reasons(5) {
        let _ = writeln!(out, "* {} ({:+})", reason.rule, reason.points);
    }
    out
}
