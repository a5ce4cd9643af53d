//! Thread size and length parsing
//!
//! Sizes and lengths are normalized to inches so parts specified in
//! metric, numbered-gauge and fractional/decimal inch notation sort on one
//! scale. Parsing never fails: text without a recognizable measure maps
//! to a sentinel that sorts deterministically.

use ordered_float::OrderedFloat;
use partsort_core::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

const MM_PER_INCH: f64 = 25.4;

/// Major diameter of machine screw gauge #0, in inches
const GAUGE_BASE_IN: f64 = 0.060;
/// Diameter increment per gauge step, in inches
const GAUGE_STEP_IN: f64 = 0.013;
/// Largest gauge written without a leading `#` (`10-32`)
const MAX_BARE_GAUGE: u32 = 12;

/// Magnitudes are rounded to a micro-inch so that the same physical size
/// written in two notations compares equal.
const QUANTUM: f64 = 1e6;

#[inline]
fn quantize(inches: f64) -> f64 {
    (inches * QUANTUM).round() / QUANTUM
}

/// Notation a size was written in.
///
/// Declaration order is the tie-break order applied when two sizes have
/// the same magnitude: metric, then numbered gauge, then inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeFamily {
    Metric,
    NumberedGauge,
    FractionalInch,
    Unparsed,
}

/// Thread or nominal size, normalized to inches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ThreadSize {
    magnitude: OrderedFloat<f64>,
    family: SizeFamily,
}

impl ThreadSize {
    /// Sentinel for text without a recognizable size; sorts after every parsed size
    pub const UNPARSED: ThreadSize = ThreadSize {
        magnitude: OrderedFloat(f64::INFINITY),
        family: SizeFamily::Unparsed,
    };

    pub fn new(inches: f64, family: SizeFamily) -> Self {
        if !inches.is_finite() || family == SizeFamily::Unparsed {
            return Self::UNPARSED;
        }
        Self {
            magnitude: OrderedFloat(quantize(inches)),
            family,
        }
    }

    #[inline]
    pub fn family(&self) -> SizeFamily {
        self.family
    }

    #[inline]
    pub fn is_parsed(&self) -> bool {
        self.family != SizeFamily::Unparsed
    }

    /// Magnitude in inches, `None` for the unparsed sentinel
    #[inline]
    pub fn inches(&self) -> Option<f64> {
        self.is_parsed().then_some(self.magnitude.0)
    }
}

/// Part length in inches. An absent length sorts before every parsed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(Option<OrderedFloat<f64>>);

impl Length {
    pub const ABSENT: Length = Length(None);

    pub fn from_inches(inches: f64) -> Self {
        if inches.is_finite() {
            Length(Some(OrderedFloat(quantize(inches))))
        } else {
            Self::ABSENT
        }
    }

    #[inline]
    pub fn inches(&self) -> Option<f64> {
        self.0.map(|v| v.0)
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

// Whole, mixed fraction (1-1/2), fraction (3/8), decimal (.25 / 0.25)
const MEASURE: &str = r"(\d+-\d+/\d+|\d+/\d+|\d*\.\d+|\d+)";
const UNIT: &str = r#"("|inches\b|inch\b|in\b\.?|mm\b|cm\b)"#;

/// Compiled size and length patterns
#[derive(Debug, Clone)]
pub struct MeasureParser {
    metric: Regex,
    gauge: Regex,
    bare_gauge: Regex,
    fraction: Regex,
    decimal_inch: Regex,
    bare_decimal: Regex,
    length_long: Regex,
    length_after_x: Regex,
}

impl MeasureParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            metric: compile(r"(?i)\bm(\d+(?:\.\d+)?)")?,
            gauge: compile(r"#\s*(\d+)")?,
            bare_gauge: compile(r"\b(\d{1,2})-\d+\b")?,
            fraction: compile(r"\b(?:(\d+)-)?(\d+)/(\d+)")?,
            decimal_inch: compile(r#"(?i)(\d*\.\d+|\d+)\s*(?:"|inches\b|inch\b|in\b)"#)?,
            bare_decimal: compile(r"(?i)(\d*\.\d+)(\s*(?:mm|cm)\b)?")?,
            length_long: compile(&format!(r"(?i){}\s*{}?\s*long\b", MEASURE, UNIT))?,
            length_after_x: compile(&format!(r"(?i)\bx\s*{}\s*{}", MEASURE, UNIT))?,
        })
    }

    /// Parse a length and return the byte span it occupied
    pub fn parse_length(&self, text: &str) -> (Length, Option<Range<usize>>) {
        if let Some(caps) = self.length_long.captures(text) {
            if let Some(inches) = caps.get(1).and_then(|m| measure_to_inches(m.as_str(), caps.get(2).map(|u| u.as_str()))) {
                let span = caps.get(0).map(|m| m.range());
                return (Length::from_inches(inches), span);
            }
        }

        for caps in self.length_after_x.captures_iter(text) {
            let (Some(whole), Some(measure)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            // "M10 x 1.5 mm Thread" names a pitch, not a length
            let rest = text[whole.end()..].trim_start().to_lowercase();
            if rest.starts_with("thread") || rest.starts_with("pitch") {
                continue;
            }
            if let Some(inches) = measure_to_inches(measure.as_str(), caps.get(2).map(|u| u.as_str())) {
                return (Length::from_inches(inches), Some(whole.range()));
            }
        }

        (Length::ABSENT, None)
    }

    /// Parse the earliest size notation in `text`
    pub fn parse_size(&self, text: &str) -> ThreadSize {
        let mut best: Option<(usize, ThreadSize)> = None;
        let mut consider = |start: usize, size: ThreadSize| {
            if size.is_parsed() && best.map_or(true, |(s, _)| start < s) {
                best = Some((start, size));
            }
        };

        if let Some(caps) = self.metric.captures(text) {
            if let (Some(m), Some(mm)) = (caps.get(0), caps.get(1).and_then(|v| v.as_str().parse::<f64>().ok())) {
                consider(m.start(), ThreadSize::new(mm / MM_PER_INCH, SizeFamily::Metric));
            }
        }

        if let Some(caps) = self.gauge.captures(text) {
            if let (Some(m), Some(n)) = (caps.get(0), caps.get(1).and_then(|v| v.as_str().parse::<f64>().ok())) {
                consider(
                    m.start(),
                    ThreadSize::new(GAUGE_BASE_IN + GAUGE_STEP_IN * n, SizeFamily::NumberedGauge),
                );
            }
        }

        for caps in self.bare_gauge.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            // part of a fraction (3/8-16, 1-1/2) or a decimal (0.25-20)
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if matches!(before, Some('.' | '/')) || matches!(after, Some('.' | '/')) {
                continue;
            }
            let Some(n) = caps.get(1).and_then(|v| v.as_str().parse::<u32>().ok()) else {
                continue;
            };
            if n <= MAX_BARE_GAUGE {
                consider(
                    m.start(),
                    ThreadSize::new(GAUGE_BASE_IN + GAUGE_STEP_IN * f64::from(n), SizeFamily::NumberedGauge),
                );
                break;
            }
        }

        for caps in self.fraction.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            let whole = caps.get(1).and_then(|v| v.as_str().parse::<f64>().ok()).unwrap_or(0.0);
            let num = caps.get(2).and_then(|v| v.as_str().parse::<f64>().ok());
            let den = caps.get(3).and_then(|v| v.as_str().parse::<f64>().ok());
            if let (Some(num), Some(den)) = (num, den) {
                if den > 0.0 {
                    consider(m.start(), ThreadSize::new(whole + num / den, SizeFamily::FractionalInch));
                    break;
                }
            }
        }

        if let Some(caps) = self.decimal_inch.captures(text) {
            if let (Some(m), Some(v)) = (caps.get(0), caps.get(1).and_then(|v| v.as_str().parse::<f64>().ok())) {
                consider(m.start(), ThreadSize::new(v, SizeFamily::FractionalInch));
            }
        }

        // a decimal with no unit is inches; one followed by mm or cm is a pitch or length
        for caps in self.bare_decimal.captures_iter(text) {
            if caps.get(2).is_some() {
                continue;
            }
            if let (Some(m), Some(v)) = (caps.get(1), caps.get(1).and_then(|v| v.as_str().parse::<f64>().ok())) {
                consider(m.start(), ThreadSize::new(v, SizeFamily::FractionalInch));
                break;
            }
        }

        best.map(|(_, size)| size).unwrap_or(ThreadSize::UNPARSED)
    }

    /// Parse length first, then the size from the remaining text so a
    /// fractional length is never mistaken for the thread size
    pub fn parse(&self, text: &str) -> (ThreadSize, Length) {
        let (length, span) = self.parse_length(text);
        let size = match span {
            Some(span) => {
                let mut masked = String::with_capacity(text.len());
                masked.push_str(&text[..span.start]);
                masked.extend(std::iter::repeat(' ').take(span.len()));
                masked.push_str(&text[span.end..]);
                self.parse_size(&masked)
            }
            None => self.parse_size(text),
        };
        (size, length)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Pattern(e.to_string()))
}

/// Convert a measure token and optional unit to inches
pub fn measure_to_inches(measure: &str, unit: Option<&str>) -> Option<f64> {
    let value = parse_measure(measure)?;
    let unit = unit.map(|u| u.trim_end_matches('.').to_lowercase());
    let inches = match unit.as_deref() {
        Some("mm") => value / MM_PER_INCH,
        Some("cm") => value * 10.0 / MM_PER_INCH,
        _ => value,
    };
    inches.is_finite().then_some(inches)
}

/// Parse `1-1/2`, `3/8`, `0.25`, `.25` or `2`
fn parse_measure(measure: &str) -> Option<f64> {
    if let Some((whole, frac)) = measure.split_once('-') {
        let whole: f64 = whole.parse().ok()?;
        return parse_fraction(frac).map(|f| whole + f);
    }
    if measure.contains('/') {
        return parse_fraction(measure);
    }
    measure.parse().ok()
}

fn parse_fraction(frac: &str) -> Option<f64> {
    let (num, den) = frac.split_once('/')?;
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    (den > 0.0).then(|| num / den)
}
