// Statsdx - A minimal Statsd client for Rust!
//
// Copyright 2018 Philip Jenvey <pjenvey@mozilla.com>
// Copyright 2018-2026 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt::{self, Write};

/// Number of fractional digits used for every floating point value written
/// to the wire: gauges, gauge deltas, timings, and sample rates.
///
/// Aggregators and existing dashboards expect a stable representation, so
/// this does not follow the shortest round-trip formatting of `f64`.
pub const FLOAT_PRECISION: usize = 6;

/// Type of metric that knows how to display itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetricType {
    Counter,
    Timer,
    Gauge,
    Set,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricType::Counter => f.write_str("c"),
            MetricType::Timer => f.write_str("ms"),
            MetricType::Gauge => f.write_str("g"),
            MetricType::Set => f.write_str("s"),
        }
    }
}

/// Holder for primitive metric values that knows how to display itself.
///
/// The delta variants always render an explicit sign so the aggregator can
/// tell a relative adjustment (`+5`, `-5`, `+0`) apart from an absolute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MetricValue<'a> {
    Signed(i64),
    SignedDelta(i64),
    Float(f64),
    FloatDelta(f64),
    Str(&'a str),
}

impl<'a> fmt::Display for MetricValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricValue::Signed(v) => write!(f, "{}", v),
            MetricValue::SignedDelta(v) => write!(f, "{:+}", v),
            MetricValue::Float(v) => write_float(f, v, false),
            MetricValue::FloatDelta(v) => write_float(f, v, true),
            MetricValue::Str(v) => f.write_str(v),
        }
    }
}

// Non-finite values are spelled `NaN`, `+Inf`, and `-Inf`. Infinities always
// carry a sign and `NaN` gets a `+` when `signed` is set, so a delta never
// loses its sign character.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64, signed: bool) -> fmt::Result {
    if v.is_nan() {
        f.write_str(if signed { "+NaN" } else { "NaN" })
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "+Inf" } else { "-Inf" })
    } else if signed {
        write!(f, "{:+.*}", FLOAT_PRECISION, v)
    } else {
        write!(f, "{:.*}", FLOAT_PRECISION, v)
    }
}

/// The encoded value portion of a metric: everything after the `:`.
///
/// For example `42|c`, `+1.500000|g`, or `2|c|@0.800000`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MetricFormatter<'a> {
    val: MetricValue<'a>,
    type_: MetricType,
    rate: Option<f64>,
}

impl<'a> MetricFormatter<'a> {
    pub(crate) fn counter(val: i64) -> Self {
        Self::from_val(MetricValue::Signed(val), MetricType::Counter)
    }

    pub(crate) fn sampled_counter(val: i64, rate: f64) -> Self {
        MetricFormatter {
            rate: Some(rate),
            ..Self::counter(val)
        }
    }

    pub(crate) fn timer(val: MetricValue<'a>) -> Self {
        Self::from_val(val, MetricType::Timer)
    }

    pub(crate) fn gauge(val: MetricValue<'a>) -> Self {
        Self::from_val(val, MetricType::Gauge)
    }

    pub(crate) fn set(val: &'a str) -> Self {
        Self::from_val(MetricValue::Str(val), MetricType::Set)
    }

    fn from_val(val: MetricValue<'a>, type_: MetricType) -> Self {
        MetricFormatter { val, type_, rate: None }
    }
}

impl<'a> fmt::Display for MetricFormatter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.val, self.type_)?;
        if let Some(rate) = self.rate {
            write!(f, "|@{:.*}", FLOAT_PRECISION, rate)?;
        }
        Ok(())
    }
}

/// Join the namespace, key, and encoded value into the full wire payload:
/// `[<namespace>.]<key>:<value>`.
pub(crate) fn format_metric(namespace: &str, key: &str, value: &dyn fmt::Display) -> String {
    // namespace, '.', key, ':', and a guess at the encoded value
    let size_hint = namespace.len() + 1 + key.len() + 1 + 16;
    let mut out = String::with_capacity(size_hint);
    if !namespace.is_empty() {
        out.push_str(namespace);
        out.push('.');
    }
    out.push_str(key);
    out.push(':');
    // Writing to a String can only fail if a Display impl reports an error,
    // which none of ours do.
    let _ = write!(out, "{}", value);
    out
}

#[cfg(test)]
mod tests {
    use super::{format_metric, MetricFormatter, MetricValue};

    #[test]
    fn test_format_counter() {
        assert_eq!("2|c", MetricFormatter::counter(2).to_string());
        assert_eq!("-2|c", MetricFormatter::counter(-2).to_string());
    }

    #[test]
    fn test_format_sampled_counter() {
        let fmt = MetricFormatter::sampled_counter(2, 0.8);
        assert_eq!("2|c|@0.800000", fmt.to_string());
    }

    #[test]
    fn test_format_sampled_counter_rate_out_of_range() {
        let fmt = MetricFormatter::sampled_counter(1, 1.5);
        assert_eq!("1|c|@1.500000", fmt.to_string());

        let fmt = MetricFormatter::sampled_counter(1, -0.25);
        assert_eq!("1|c|@-0.250000", fmt.to_string());
    }

    #[test]
    fn test_format_gauge() {
        let fmt = MetricFormatter::gauge(MetricValue::Signed(99));
        assert_eq!("99|g", fmt.to_string());
    }

    #[test]
    fn test_format_gauge_delta_always_signed() {
        assert_eq!("+99|g", MetricFormatter::gauge(MetricValue::SignedDelta(99)).to_string());
        assert_eq!("-99|g", MetricFormatter::gauge(MetricValue::SignedDelta(-99)).to_string());
        assert_eq!("+0|g", MetricFormatter::gauge(MetricValue::SignedDelta(0)).to_string());
    }

    #[test]
    fn test_format_gauge_float_fixed_precision() {
        assert_eq!("99.900000|g", MetricFormatter::gauge(MetricValue::Float(99.9)).to_string());
        assert_eq!("3.000000|g", MetricFormatter::gauge(MetricValue::Float(3.0)).to_string());
        assert_eq!(
            "0.333333|g",
            MetricFormatter::gauge(MetricValue::Float(1.0 / 3.0)).to_string()
        );
    }

    #[test]
    fn test_format_gauge_float_delta_always_signed() {
        assert_eq!(
            "+99.900000|g",
            MetricFormatter::gauge(MetricValue::FloatDelta(99.9)).to_string()
        );
        assert_eq!(
            "-99.900000|g",
            MetricFormatter::gauge(MetricValue::FloatDelta(-99.9)).to_string()
        );
        assert_eq!(
            "+0.000000|g",
            MetricFormatter::gauge(MetricValue::FloatDelta(0.0)).to_string()
        );
    }

    #[test]
    fn test_format_gauge_float_non_finite() {
        assert_eq!("NaN|g", MetricFormatter::gauge(MetricValue::Float(f64::NAN)).to_string());
        assert_eq!(
            "+Inf|g",
            MetricFormatter::gauge(MetricValue::Float(f64::INFINITY)).to_string()
        );
        assert_eq!(
            "-Inf|ms",
            MetricFormatter::timer(MetricValue::Float(f64::NEG_INFINITY)).to_string()
        );
    }

    #[test]
    fn test_format_gauge_float_delta_non_finite_keeps_sign() {
        assert_eq!(
            "+NaN|g",
            MetricFormatter::gauge(MetricValue::FloatDelta(f64::NAN)).to_string()
        );
        assert_eq!(
            "+Inf|g",
            MetricFormatter::gauge(MetricValue::FloatDelta(f64::INFINITY)).to_string()
        );
        assert_eq!(
            "-Inf|g",
            MetricFormatter::gauge(MetricValue::FloatDelta(f64::NEG_INFINITY)).to_string()
        );
    }

    #[test]
    fn test_format_timer() {
        assert_eq!("5|ms", MetricFormatter::timer(MetricValue::Signed(5)).to_string());
        assert_eq!("5.100000|ms", MetricFormatter::timer(MetricValue::Float(5.1)).to_string());
    }

    #[test]
    fn test_format_set() {
        assert_eq!("x|s", MetricFormatter::set("x").to_string());
    }

    #[test]
    fn test_format_metric_no_namespace() {
        let fmt = MetricFormatter::counter(1);
        assert_eq!("some.key:1|c", format_metric("", "some.key", &fmt));
    }

    #[test]
    fn test_format_metric_with_namespace() {
        let fmt = MetricFormatter::set("x");
        assert_eq!("ns.test:x|s", format_metric("ns", "test", &fmt));
    }

    #[test]
    fn test_format_metric_raw_value() {
        assert_eq!("test:1|c", format_metric("", "test", &"1|c"));
    }
}
