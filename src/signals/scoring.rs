//! Rule table evaluation: snapshot readings to per-category contributions.
//!
//! Each rule reads only the snapshot and the configured thresholds. An
//! unavailable reading never fires a rule, so missing indicators score as
//! neutral.

use crate::config::scoring::ScoringConfig;
use crate::indicators::registry::{names, IndicatorCategory};
use crate::models::{
    CategoryScore, Contribution, CrossEvent, IndicatorSnapshot, ReadingValue, TrendTag,
};
use crate::signals::aggregation::Aggregator;

pub struct SignalScorer {
    rules: ScoringConfig,
}

fn contribution(indicator: &str, rule: String, points: i32) -> Contribution {
    Contribution {
        indicator: indicator.to_string(),
        rule,
        points,
    }
}

/// +points for bullish, -points for bearish
fn signed(bullish: bool, points: i32) -> i32 {
    if bullish {
        points
    } else {
        -points
    }
}

/// 1 up, -1 down, 0 unchanged
fn direction(change: f64) -> i8 {
    if change > 0.0 {
        1
    } else if change < 0.0 {
        -1
    } else {
        0
    }
}

impl SignalScorer {
    pub fn new(rules: ScoringConfig) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringConfig {
        &self.rules
    }

    /// Capped category scores in report order (trend, momentum, volume,
    /// volatility). Volatility is scored last because its mean-reversion
    /// rule depends on the direction of the other three.
    pub fn score(&self, snapshot: &IndicatorSnapshot) -> Vec<CategoryScore> {
        let trend = Aggregator::category(&self.rules, IndicatorCategory::Trend, self.trend(snapshot));
        let momentum =
            Aggregator::category(&self.rules, IndicatorCategory::Momentum, self.momentum(snapshot));
        let volume = Aggregator::category(&self.rules, IndicatorCategory::Volume, self.volume(snapshot));
        let bias = trend.score + momentum.score + volume.score;
        let volatility = Aggregator::category(
            &self.rules,
            IndicatorCategory::Volatility,
            self.volatility(snapshot, bias),
        );
        vec![trend, momentum, volume, volatility]
    }

    pub fn trend(&self, snapshot: &IndicatorSnapshot) -> Vec<Contribution> {
        let r = &self.rules.trend;
        let close = snapshot.price.close;
        let mut out = Vec::new();

        if let (Some(fast), Some(slow)) = (
            snapshot.scalar(names::EMA_FAST),
            snapshot.scalar(names::EMA_SLOW),
        ) {
            let bullish = close > fast && fast > slow;
            let bearish = close < fast && fast < slow;
            if bullish || bearish {
                let adx = snapshot.scalar(names::ADX);
                let trending = adx.is_some_and(|a| a > r.adx_threshold);
                let points = if trending {
                    r.strong_alignment_points
                } else {
                    r.weak_alignment_points
                };
                let stack = if bullish { "above" } else { "below" };
                let strength = match adx {
                    Some(a) if trending => format!("ADX {:.1} > {}", a, r.adx_threshold),
                    Some(a) => format!("ADX {:.1} <= {}", a, r.adx_threshold),
                    None => "ADX unavailable".to_string(),
                };
                out.push(contribution(
                    names::EMA_FAST,
                    format!("price {} EMA fast {} EMA slow, {}", stack, stack, strength),
                    signed(bullish, points),
                ));
            }
        }

        if let Some(sma) = snapshot.scalar(names::SMA_LONG) {
            if close != sma {
                let above = close > sma;
                out.push(contribution(
                    names::SMA_LONG,
                    format!("price {} long SMA", if above { "above" } else { "below" }),
                    signed(above, r.long_sma_points),
                ));
            }
        }

        if let Some(reading) = snapshot.reading(names::SUPERTREND) {
            match (reading.cross(), reading.value()) {
                (CrossEvent::BullishCross, _) => out.push(contribution(
                    names::SUPERTREND,
                    "SuperTrend flipped bullish".to_string(),
                    r.supertrend_flip_points,
                )),
                (CrossEvent::BearishCross, _) => out.push(contribution(
                    names::SUPERTREND,
                    "SuperTrend flipped bearish".to_string(),
                    -r.supertrend_flip_points,
                )),
                (CrossEvent::None, Some(ReadingValue::SuperTrend { uptrend, .. })) => {
                    out.push(contribution(
                        names::SUPERTREND,
                        format!("SuperTrend {}", if *uptrend { "uptrend" } else { "downtrend" }),
                        signed(*uptrend, r.supertrend_direction_points),
                    ))
                }
                _ => {}
            }
        }

        if let Some(reading) = snapshot.reading(names::MACD) {
            if let (
                Some(ReadingValue::Macd { histogram, .. }),
                Some(ReadingValue::Macd { histogram: prev, .. }),
            ) = (reading.value(), reading.previous())
            {
                if *prev < 0.0 && histogram > prev {
                    out.push(contribution(
                        names::MACD,
                        "MACD histogram rising from negative".to_string(),
                        r.macd_histogram_turn_points,
                    ));
                } else if *prev > 0.0 && histogram < prev {
                    out.push(contribution(
                        names::MACD,
                        "MACD histogram falling from positive".to_string(),
                        -r.macd_histogram_turn_points,
                    ));
                }
            }
            match reading.cross() {
                CrossEvent::BullishCross => out.push(contribution(
                    names::MACD,
                    "MACD crossed above signal".to_string(),
                    r.macd_cross_points,
                )),
                CrossEvent::BearishCross => out.push(contribution(
                    names::MACD,
                    "MACD crossed below signal".to_string(),
                    -r.macd_cross_points,
                )),
                CrossEvent::None => {}
            }
        }

        match snapshot.pair_cross(names::EMA_FAST, names::EMA_SLOW) {
            CrossEvent::BullishCross => out.push(contribution(
                names::EMA_FAST,
                "EMA fast crossed above EMA slow".to_string(),
                r.ema_cross_points,
            )),
            CrossEvent::BearishCross => out.push(contribution(
                names::EMA_FAST,
                "EMA fast crossed below EMA slow".to_string(),
                -r.ema_cross_points,
            )),
            CrossEvent::None => {}
        }

        out
    }

    pub fn momentum(&self, snapshot: &IndicatorSnapshot) -> Vec<Contribution> {
        let r = &self.rules.momentum;
        let mut out = Vec::new();

        if let Some(reading) = snapshot.reading(names::RSI) {
            let rsi = reading.value().and_then(|v| v.scalar());
            let prev = reading.previous().and_then(|v| v.scalar());
            if let Some(rsi) = rsi {
                match prev {
                    Some(p) if p < r.rsi_oversold && rsi >= r.rsi_oversold => {
                        out.push(contribution(
                            names::RSI,
                            format!("RSI crossed up through {} ({:.1})", r.rsi_oversold, rsi),
                            r.rsi_cross_points,
                        ))
                    }
                    Some(p) if p > r.rsi_overbought && rsi <= r.rsi_overbought => {
                        out.push(contribution(
                            names::RSI,
                            format!("RSI crossed down through {} ({:.1})", r.rsi_overbought, rsi),
                            -r.rsi_cross_points,
                        ))
                    }
                    _ if rsi > r.rsi_overbought => out.push(contribution(
                        names::RSI,
                        format!("RSI overbought ({:.1})", rsi),
                        -r.rsi_extreme_points,
                    )),
                    _ if rsi < r.rsi_oversold => out.push(contribution(
                        names::RSI,
                        format!("RSI oversold ({:.1})", rsi),
                        r.rsi_extreme_points,
                    )),
                    _ => {}
                }
            }
        }

        if let Some(reading) = snapshot.reading(names::STOCHASTIC) {
            if let Some(ReadingValue::Stochastic { k, .. }) = reading.value() {
                match reading.cross() {
                    CrossEvent::BullishCross if *k < r.stochastic_oversold => out.push(contribution(
                        names::STOCHASTIC,
                        format!("Stochastic bullish cross below {} (%K {:.1})", r.stochastic_oversold, k),
                        r.stochastic_cross_points,
                    )),
                    CrossEvent::BearishCross if *k > r.stochastic_overbought => {
                        out.push(contribution(
                            names::STOCHASTIC,
                            format!(
                                "Stochastic bearish cross above {} (%K {:.1})",
                                r.stochastic_overbought, k
                            ),
                            -r.stochastic_cross_points,
                        ))
                    }
                    _ => {}
                }
            }
        }

        if let Some(reading) = snapshot.reading(names::CCI) {
            if let Some(cci) = reading.value().and_then(|v| v.scalar()) {
                if cci < -r.cci_threshold && reading.trend() == TrendTag::Rising {
                    out.push(contribution(
                        names::CCI,
                        format!("CCI turning up from {:.0}", cci),
                        r.cci_points,
                    ));
                } else if cci > r.cci_threshold && reading.trend() == TrendTag::Falling {
                    out.push(contribution(
                        names::CCI,
                        format!("CCI turning down from {:.0}", cci),
                        -r.cci_points,
                    ));
                }
            }
        }

        if let Some(wr) = snapshot.scalar(names::WILLIAMS_R) {
            if wr <= r.williams_oversold {
                out.push(contribution(
                    names::WILLIAMS_R,
                    format!("Williams %R oversold ({:.1})", wr),
                    r.williams_points,
                ));
            } else if wr >= r.williams_overbought {
                out.push(contribution(
                    names::WILLIAMS_R,
                    format!("Williams %R overbought ({:.1})", wr),
                    -r.williams_points,
                ));
            }
        }

        if let Some(roc) = snapshot.scalar(names::ROC) {
            match snapshot.price.trend {
                TrendTag::Rising if roc > 0.0 => out.push(contribution(
                    names::ROC,
                    format!("ROC positive ({:.2}%) with rising price", roc),
                    r.roc_points,
                )),
                TrendTag::Falling if roc < 0.0 => out.push(contribution(
                    names::ROC,
                    format!("ROC negative ({:.2}%) with falling price", roc),
                    -r.roc_points,
                )),
                _ => {}
            }
        }

        if let Some(pattern) = snapshot.price.pattern {
            out.push(contribution(
                "pattern",
                format!("{:?} candle", pattern),
                signed(pattern.is_bullish(), r.pattern_points),
            ));
        }

        out
    }

    pub fn volume(&self, snapshot: &IndicatorSnapshot) -> Vec<Contribution> {
        let r = &self.rules.volume;
        let price = &snapshot.price;
        let mut out = Vec::new();

        if let Some(ratio) = snapshot.scalar(names::VOLUME_RATIO) {
            if ratio >= r.surge_ratio && (price.is_up_bar() || price.is_down_bar()) {
                let up = price.is_up_bar();
                out.push(contribution(
                    names::VOLUME_RATIO,
                    format!(
                        "volume {:.1}x average on {} bar",
                        ratio,
                        if up { "an up" } else { "a down" }
                    ),
                    signed(up, r.surge_points),
                ));
            }
        }

        // Both changes span `obv_window` bars.
        if let (Some(price_change), Some(obv_change)) = (
            price.window_change,
            snapshot.reading(names::OBV).and_then(|obv| obv.window_change()),
        ) {
            let bars = r.obv_window;
            match (direction(price_change), direction(obv_change)) {
                (1, -1) => out.push(contribution(
                    names::OBV,
                    format!("OBV falling while price rises over {} bars", bars),
                    -r.obv_divergence_points,
                )),
                (-1, 1) => out.push(contribution(
                    names::OBV,
                    format!("OBV rising while price falls over {} bars", bars),
                    r.obv_divergence_points,
                )),
                (1, 1) => out.push(contribution(
                    names::OBV,
                    format!("OBV confirms rising price over {} bars", bars),
                    r.obv_confirmation_points,
                )),
                (-1, -1) => out.push(contribution(
                    names::OBV,
                    format!("OBV confirms falling price over {} bars", bars),
                    -r.obv_confirmation_points,
                )),
                _ => {}
            }
        }

        if let Some(mfi) = snapshot.scalar(names::MFI) {
            if mfi <= r.mfi_oversold {
                out.push(contribution(
                    names::MFI,
                    format!("MFI oversold ({:.1})", mfi),
                    r.mfi_points,
                ));
            } else if mfi >= r.mfi_overbought {
                out.push(contribution(
                    names::MFI,
                    format!("MFI overbought ({:.1})", mfi),
                    -r.mfi_points,
                ));
            }
        }

        if let Some(reading) = snapshot.reading(names::VWAP) {
            match reading.cross() {
                CrossEvent::BullishCross => out.push(contribution(
                    names::VWAP,
                    "price crossed above VWAP".to_string(),
                    r.vwap_cross_points,
                )),
                CrossEvent::BearishCross => out.push(contribution(
                    names::VWAP,
                    "price crossed below VWAP".to_string(),
                    -r.vwap_cross_points,
                )),
                CrossEvent::None => {}
            }
        }

        out
    }

    /// `bias` is the summed capped score of the other three categories.
    pub fn volatility(&self, snapshot: &IndicatorSnapshot, bias: i32) -> Vec<Contribution> {
        let r = &self.rules.volatility;
        let momentum = &self.rules.momentum;
        let close = snapshot.price.close;
        let rsi = snapshot.scalar(names::RSI);
        let mut out = Vec::new();

        for name in [names::BOLLINGER, names::KELTNER] {
            let Some(ReadingValue::Band { upper, lower, .. }) = snapshot.value(name) else {
                continue;
            };
            let width = upper - lower;
            if width <= 0.0 {
                continue;
            }
            let position = (close - lower) / width;

            if close > upper && rsi.is_some_and(|v| v >= momentum.rsi_overbought) {
                out.push(contribution(
                    name,
                    "close above upper band with overbought RSI".to_string(),
                    -r.exhaustion_points,
                ));
            } else if close < lower && rsi.is_some_and(|v| v <= momentum.rsi_oversold) {
                out.push(contribution(
                    name,
                    "close below lower band with oversold RSI".to_string(),
                    r.exhaustion_points,
                ));
            } else if position <= r.band_proximity && bias > 0 {
                out.push(contribution(
                    name,
                    "near lower band in a bullish setup".to_string(),
                    r.mean_reversion_points,
                ));
            } else if position >= 1.0 - r.band_proximity && bias < 0 {
                out.push(contribution(
                    name,
                    "near upper band in a bearish setup".to_string(),
                    -r.mean_reversion_points,
                ));
            }
        }

        out
    }
}
