//! Single and two-bar reversal candle patterns on the latest bar

use crate::models::{Bar, CandlePattern, PriceSeries};

/// (body, lower wick, upper wick)
fn wicks(bar: &Bar) -> (f64, f64, f64) {
    let body = (bar.close - bar.open).abs();
    let lower = bar.open.min(bar.close) - bar.low;
    let upper = bar.high - bar.open.max(bar.close);
    (body, lower, upper)
}

/// Lower wick longer than twice the body and upper wick shorter than the
/// body. Shooting star is the mirror image.
pub fn is_hammer(bar: &Bar) -> bool {
    let (body, lower, upper) = wicks(bar);
    lower > 2.0 * body && upper < body
}

pub fn is_shooting_star(bar: &Bar) -> bool {
    let (body, lower, upper) = wicks(bar);
    upper > 2.0 * body && lower < body
}

pub fn is_bullish_engulfing(prev: &Bar, last: &Bar) -> bool {
    last.close > last.open && prev.close < prev.open && last.close > prev.open && last.open < prev.close
}

pub fn is_bearish_engulfing(prev: &Bar, last: &Bar) -> bool {
    last.close < last.open && prev.close > prev.open && last.close < prev.open && last.open > prev.close
}

/// First matching pattern on the latest bar, checked in the order hammer,
/// bullish engulfing, shooting star, bearish engulfing.
pub fn detect_pattern(series: &PriceSeries) -> Option<CandlePattern> {
    let bars = series.bars();
    let last = bars.last()?;
    let prev = bars.len().checked_sub(2).map(|i| &bars[i]);

    if is_hammer(last) {
        return Some(CandlePattern::Hammer);
    }
    if prev.is_some_and(|p| is_bullish_engulfing(p, last)) {
        return Some(CandlePattern::BullishEngulfing);
    }
    if is_shooting_star(last) {
        return Some(CandlePattern::ShootingStar);
    }
    if prev.is_some_and(|p| is_bearish_engulfing(p, last)) {
        return Some(CandlePattern::BearishEngulfing);
    }
    None
}
