//! Serving-size scaling for free-text ingredient lines.
//!
//! An ingredient line such as `"1/2 tsp salt"` carries an optional leading
//! quantity followed by whatever unit and name the author typed. Only that
//! quantity is rewritten; the rest of the line is kept byte for byte.
//!
//! Quantities are recognised with a strict grammar: a whole number (`3`), a
//! decimal with digits on both sides of the point (`1.5`), or a fraction of two
//! whole numbers (`1/2`). Anything else leaves the line untouched.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

static LEADING_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9./]+").expect("leading token pattern is valid"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("integer pattern is valid"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("decimal pattern is valid"));
static FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<numerator>[0-9]+)/(?P<denominator>[0-9]+)$")
        .expect("fraction pattern is valid")
});

/// A quantity recognised at the start of an ingredient line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Integer(u64),
    Decimal(f64),
    Fraction { numerator: u64, denominator: u64 },
}

impl Quantity {
    /// Parse a bare token. Returns `None` for anything outside the three
    /// accepted shapes, and for fractions with a zero denominator.
    pub fn parse(token: &str) -> Option<Self> {
        if INTEGER.is_match(token) {
            return token.parse().ok().map(Quantity::Integer);
        }

        if DECIMAL.is_match(token) {
            return token.parse().ok().map(Quantity::Decimal);
        }

        let caps = FRACTION.captures(token)?;
        let numerator = caps["numerator"].parse().ok()?;
        let denominator: u64 = caps["denominator"].parse().ok()?;
        if denominator == 0 {
            return None;
        }

        Some(Quantity::Fraction {
            numerator,
            denominator,
        })
    }

    pub fn value(&self) -> f64 {
        match *self {
            Quantity::Integer(n) => n as f64,
            Quantity::Decimal(n) => n,
            Quantity::Fraction {
                numerator,
                denominator,
            } => numerator as f64 / denominator as f64,
        }
    }
}

/// Split a line into its leading quantity and the untouched remainder.
///
/// The quantity token is the run of digits, `.` and `/` at the very start of
/// the line. It only counts when the character right after it ends the line,
/// is whitespace, or is a letter (`"500g"`). A hyphen joining the quantity to
/// a word (`"1/2-inch"`) is also accepted. Lines like `"2;alert(1) cups"` or
/// `"2-3 cups"` therefore have no quantity.
pub fn split_quantity(line: &str) -> Option<(Quantity, &str)> {
    let token = LEADING_TOKEN.find(line)?;
    let rest = &line[token.end()..];

    let mut after = rest.chars();
    let boundary_ok = match after.next() {
        None => true,
        Some('-') => after.next().is_some_and(char::is_alphabetic),
        Some(c) => c.is_whitespace() || c.is_alphabetic(),
    };
    if !boundary_ok {
        return None;
    }

    Quantity::parse(token.as_str()).map(|quantity| (quantity, rest))
}

/// Multiplier applied to every scalable quantity. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleRatio(f64);

impl ScaleRatio {
    pub const IDENTITY: ScaleRatio = ScaleRatio(1.0);

    pub fn new(ratio: f64) -> Option<Self> {
        (ratio.is_finite() && ratio > 0.0).then_some(ScaleRatio(ratio))
    }

    /// Ratio for cooking `requested` servings of a recipe written for `base`.
    ///
    /// No request (or a request for zero) means the recipe as written. A base
    /// of zero or less cannot be divided by, so it also yields the identity.
    pub fn for_servings(requested: Option<u32>, base: i64) -> Self {
        let Some(requested) = requested.filter(|&n| n > 0) else {
            return ScaleRatio::IDENTITY;
        };

        if base <= 0 {
            warn!(base, requested, "Recipe has no usable base servings, not scaling");
            return ScaleRatio::IDENTITY;
        }

        ScaleRatio::new(f64::from(requested) / base as f64).unwrap_or(ScaleRatio::IDENTITY)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_identity(self) -> bool {
        self.0 == 1.0
    }
}

impl Default for ScaleRatio {
    fn default() -> Self {
        ScaleRatio::IDENTITY
    }
}

impl fmt::Display for ScaleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Rewrite the leading quantity of `line` by `ratio`, rounded to one decimal.
///
/// Never fails: a line without a recognisable quantity comes back unchanged.
pub fn scale_ingredient(line: &str, ratio: ScaleRatio) -> String {
    let Some((quantity, rest)) = split_quantity(line) else {
        return line.to_string();
    };

    // Already at one decimal or less; rounding could only lose precision
    let token = &line[..line.len() - rest.len()];
    if ratio.is_identity() && at_most_one_decimal(quantity, token) {
        return line.to_string();
    }

    let tenths = (quantity.value() * ratio.get() * 10.0).round();
    if !tenths.is_finite() || tenths < 0.0 || tenths >= u64::MAX as f64 {
        return line.to_string();
    }

    let scaled = format_tenths(tenths as u64);
    debug!(line, %ratio, scaled = %scaled, "Scaled ingredient quantity");

    format!("{scaled}{rest}")
}

/// Same as [`scale_ingredient`] for a raw ratio. A ratio that is not finite
/// and positive leaves the line unchanged.
pub fn scale(line: &str, ratio: f64) -> String {
    match ScaleRatio::new(ratio) {
        Some(ratio) => scale_ingredient(line, ratio),
        None => line.to_string(),
    }
}

fn at_most_one_decimal(quantity: Quantity, token: &str) -> bool {
    match quantity {
        Quantity::Integer(_) => true,
        Quantity::Decimal(_) => token.split_once('.').is_some_and(|(_, digits)| digits.len() == 1),
        Quantity::Fraction { .. } => false,
    }
}

// Whole numbers print without a decimal point.
fn format_tenths(tenths: u64) -> String {
    let (whole, fraction) = (tenths / 10, tenths % 10);
    if fraction == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}
