// Statsdx - A minimal Statsd client for Rust!
//
// Copyright 2015-2026 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::sinks::core::MetricSink;
use log::Level;
use std::io;

/// Implementation of a `MetricSink` that emits metrics using the `log!` macro.
///
/// Metrics are emitted using the `Level` provided at construction with a target
/// of `metrics`. Note that the number of bytes written returned by `emit` does not
/// reflect if the provided log level is high enough to be active.
#[derive(Debug, Clone)]
pub struct LoggingMetricSink {
    level: Level,
}

impl LoggingMetricSink {
    pub fn new(level: Level) -> LoggingMetricSink {
        LoggingMetricSink { level }
    }
}

impl MetricSink for LoggingMetricSink {
    fn emit(&self, metric: &str) -> io::Result<usize> {
        log::log!(target: "metrics", self.level, "{}", metric);
        Ok(metric.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{LoggingMetricSink, MetricSink};
    use log::Level;

    #[test]
    fn test_logging_metric_sink() {
        let sink = LoggingMetricSink::new(Level::Info);
        assert_eq!(7, sink.emit("bar:1|g").unwrap());
    }
}
