//! Unit-conversion calculator
//!
//! Pure functions shared by every document handler. The conversion pivot is
//! `weight_per_unit` (pieces per kg): piece counts divide down to kg, kg
//! divide by the line's UOM conversion factor to the transaction quantity.
//! Every function degrades to `None` on malformed input; callers clear the
//! derived field instead of propagating an error.

use regex::Regex;
use shared::ItemSummary;
use std::sync::LazyLock;

static LENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").expect("valid length pattern"));

/// Transaction quantity derived from a piece count
///
/// `total_pieces / weight_per_unit / conversion_factor`. A missing,
/// non-finite, or non-positive factor falls back to 1.
pub fn qty_from_total_pieces(
    total_pieces: f64,
    weight_per_unit: f64,
    conversion_factor: Option<f64>,
) -> Option<f64> {
    if !total_pieces.is_finite() {
        return None;
    }
    if !weight_per_unit.is_finite() || weight_per_unit <= 0.0 {
        return None;
    }
    let factor = conversion_factor
        .filter(|f| f.is_finite() && *f > 0.0)
        .unwrap_or(1.0);
    Some(total_pieces / weight_per_unit / factor)
}

/// Piece count derived from a stock-UOM quantity
pub fn total_pieces_from_qty(qty: f64, weight_per_unit: f64) -> Option<f64> {
    if !qty.is_finite() {
        return None;
    }
    if !weight_per_unit.is_finite() || weight_per_unit <= 0.0 {
        return None;
    }
    Some(qty * weight_per_unit)
}

/// First decimal numeral in a free-text label, e.g. "5.8m" -> 5.8
pub fn extract_length(label: &str) -> Option<f64> {
    let captures = LENGTH_RE.captures(label)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Whether a sticker-option label means "has a sticker"
///
/// A label without the word "sticker", or carrying a "no", reads as
/// sticker-less. Words are compared whole, so "Innovation Sticker" is not
/// negated by its "no" substring.
pub fn sticker_from_label(label: &str) -> bool {
    let label = label.to_lowercase();
    let mut has_sticker = false;
    for word in label.split(|c: char| !c.is_alphanumeric()) {
        match word {
            "no" => return false,
            "sticker" => has_sticker = true,
            _ => {}
        }
    }
    has_sticker
}

/// Weight of a profile cut to `length` meters at `rate_per_meter` kg/m
pub fn weight_from_length(length: f64, rate_per_meter: f64) -> Option<f64> {
    if !length.is_finite() || length <= 0.0 {
        return None;
    }
    if !rate_per_meter.is_finite() || rate_per_meter <= 0.0 {
        return None;
    }
    Some(length * rate_per_meter)
}

/// The per-meter weight rate of an item for the given sticker choice
pub fn per_meter_rate(item: &ItemSummary, has_sticker: bool) -> Option<f64> {
    let rate = if has_sticker {
        item.weight_per_meter_with_sticker
    } else {
        item.weight_per_meter_no_sticker
    };
    rate.filter(|r| r.is_finite() && *r > 0.0)
}
