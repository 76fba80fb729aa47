// Statsdx - A minimal Statsd client for Rust!
//
// Copyright 2020-2026 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::sinks::core::{MetricSink, SinkStats, SocketStats};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use std::io::{self, ErrorKind};

/// `MetricSink` implementation that writes all metrics to the `Sender` half of
/// a channel while callers are given ownership of the `Receiver` half.
///
/// This is not a general purpose sink, rather it's a sink meant for verifying
/// metrics written during the course of integration tests. By default, the channel
/// used is unbounded. The channel size can be limited using the `with_capacity` method.
///
/// Each metric is sent to the underlying channel when the `.emit()` method is
/// called, in the thread of the caller. Dropping the sink (or closing the client
/// that owns it) disconnects the channel.
#[derive(Debug)]
pub struct SpyMetricSink {
    sender: Sender<Vec<u8>>,
    stats: SocketStats,
}

impl SpyMetricSink {
    pub fn new() -> (Receiver<Vec<u8>>, Self) {
        Self::with_queue_capacity(None)
    }

    pub fn with_capacity(queue: usize) -> (Receiver<Vec<u8>>, Self) {
        Self::with_queue_capacity(Some(queue))
    }

    fn with_queue_capacity(queue: Option<usize>) -> (Receiver<Vec<u8>>, Self) {
        let (tx, rx) = new_channel(queue);
        let sink = SpyMetricSink {
            sender: tx,
            stats: SocketStats::default(),
        };
        (rx, sink)
    }
}

impl MetricSink for SpyMetricSink {
    fn emit(&self, metric: &str) -> io::Result<usize> {
        self.stats
            .update(send_metric(&self.sender, metric.as_bytes()), metric.len())
    }

    fn stats(&self) -> SinkStats {
        (&self.stats).into()
    }
}

fn new_channel(cap: Option<usize>) -> (Sender<Vec<u8>>, Receiver<Vec<u8>>) {
    if let Some(sz) = cap {
        bounded(sz)
    } else {
        unbounded()
    }
}

fn send_metric(sender: &Sender<Vec<u8>>, metric: &[u8]) -> io::Result<usize> {
    match sender.try_send(metric.to_vec()) {
        Err(TrySendError::Disconnected(_)) => {
            Err(io::Error::new(ErrorKind::Other, "channel disconnected"))
        }
        Err(TrySendError::Full(_)) => Err(io::Error::new(ErrorKind::Other, "channel full")),
        Ok(_) => Ok(metric.len()),
    }
}

#[cfg(test)]
mod test {
    use super::{MetricSink, SpyMetricSink};

    #[test]
    fn test_spy_metric_sink() {
        let (rx, sink) = SpyMetricSink::new();
        sink.emit("buz:1|c").unwrap();

        let sent = rx.recv().unwrap();
        assert_eq!("buz:1|c".as_bytes(), sent.as_slice());
    }

    #[test]
    fn test_spy_metric_sink_full() {
        let (_rx, sink) = SpyMetricSink::with_capacity(1);
        sink.emit("buz:1|c").unwrap();

        assert!(sink.emit("buz:2|c").is_err());
        assert_eq!(1, sink.stats().packets_sent);
        assert_eq!(1, sink.stats().packets_dropped);
    }

    #[test]
    fn test_spy_metric_sink_disconnected() {
        let (rx, sink) = SpyMetricSink::new();
        drop(rx);

        let err = sink.emit("buz:1|c").unwrap_err();
        assert_eq!("channel disconnected", err.to_string());
    }
}
