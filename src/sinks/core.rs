// Statsdx - A minimal Statsd client for Rust!
//
// Copyright 2015-2026 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Snapshot of the I/O telemetry of a sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SinkStats {
    /// Bytes successfully written
    pub bytes_sent: u64,
    /// Metrics successfully written
    pub packets_sent: u64,
    /// Bytes of metrics that failed to be written
    pub bytes_dropped: u64,
    /// Metrics that failed to be written
    pub packets_dropped: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SocketStats {
    bytes_sent: Arc<AtomicU64>,
    packets_sent: Arc<AtomicU64>,
    bytes_dropped: Arc<AtomicU64>,
    packets_dropped: Arc<AtomicU64>,
}

impl SocketStats {
    fn incr_bytes_sent(&self, n: u64) {
        self.bytes_sent.fetch_add(n, Ordering::Relaxed);
    }

    fn incr_packets_sent(&self) {
        self.packets_sent.fetch_add(1, Ordering::Relaxed);
    }

    fn incr_bytes_dropped(&self, n: u64) {
        self.bytes_dropped.fetch_add(n, Ordering::Relaxed);
    }

    fn incr_packets_dropped(&self) {
        self.packets_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn update(&self, res: io::Result<usize>, len: usize) -> io::Result<usize> {
        match res {
            Ok(written) => {
                self.incr_bytes_sent(written as u64);
                self.incr_packets_sent();
                Ok(written)
            }
            Err(e) => {
                self.incr_bytes_dropped(len as u64);
                self.incr_packets_dropped();
                Err(e)
            }
        }
    }
}

impl From<&SocketStats> for SinkStats {
    fn from(stats: &SocketStats) -> Self {
        SinkStats {
            bytes_sent: stats.bytes_sent.load(Ordering::Relaxed),
            packets_sent: stats.packets_sent.load(Ordering::Relaxed),
            bytes_dropped: stats.bytes_dropped.load(Ordering::Relaxed),
            packets_dropped: stats.packets_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Trait for the transport that carries Statsd metrics to an aggregator.
///
/// The metric string will be in the canonical format to be sent to a
/// Statsd server and will not include a trailing newline. Each call to
/// `emit` is expected to produce exactly one datagram (or the equivalent
/// for non-network sinks). Examples of each supported metric type are
/// given below.
///
/// ## Counter
///
/// ``` text
/// some.counter:123|c
/// some.counter:2|c|@0.500000
/// ```
///
/// ## Timer
///
/// ``` text
/// some.timer:456|ms
/// some.timer:4.100000|ms
/// ```
///
/// ## Gauge
///
/// ``` text
/// some.gauge:5|g
/// some.gauge:-5|g
/// some.gauge:+1.250000|g
/// ```
///
/// ## Set
///
/// ``` text
/// some.set:user-1234|s
/// ```
///
/// See the [Statsd spec](https://github.com/b/statsd_spec) for more
/// information.
pub trait MetricSink {
    /// Send the Statsd metric using this sink and return the number of bytes
    /// written or an I/O error.
    fn emit(&self, metric: &str) -> io::Result<usize>;

    /// Flush any currently buffered metrics to the underlying backend.
    ///
    /// None of the sinks in this crate buffer, so the default does nothing.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// Release any resources held by the sink ahead of it being dropped.
    ///
    /// Sockets and channels are released when the sink is dropped so the
    /// default does nothing. Implementations that need to report a failure
    /// while shutting down should override this.
    fn close(&self) -> io::Result<()> {
        Ok(())
    }

    /// Return I/O telemetry like bytes / packets sent or dropped.
    ///
    /// Note that not all sinks implement this method and the default
    /// implementation returns zeros.
    fn stats(&self) -> SinkStats {
        SinkStats::default()
    }
}

/// Implementation of a `MetricSink` that discards all metrics.
///
/// Unlike an absent client, a client built on this sink still validates
/// its input. Useful for unit tests.
#[derive(Debug, Clone)]
pub struct NopMetricSink;

impl MetricSink for NopMetricSink {
    fn emit(&self, _metric: &str) -> io::Result<usize> {
        Ok(0)
    }
}
