// Statsdx - A minimal Statsd client for Rust!
//
// Copyright 2015-2026 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A minimal Statsd client for Rust!
//!
//! Statsdx formats metrics into the Statsd text protocol and sends each one
//! as a single UDP datagram. There is no batching, no aggregation, and no
//! retrying: every call either writes one packet or returns an error.
//!
//! ## Features
//!
//! * Support for emitting counters, sampled counters, timers, gauges, gauge
//!   deltas, and sets to Statsd over UDP.
//! * Support for alternate backends via the `MetricSink` trait.
//! * Absent clients: every metric method is implemented for `Option<T>`, so
//!   instrumentation can stay in place when metrics are disabled.
//!
//! ## Usage
//!
//! ### Simple Use
//!
//! Create a client that will write to some imaginary metrics server and send
//! a few metrics.
//!
//! ```rust,no_run
//! use statsdx::prelude::*;
//! use statsdx::{StatsdClient, DEFAULT_PORT};
//!
//! // Note that you'll probably want to actually handle any errors creating
//! // the client when you use it for real in your application. We're just
//! // using .unwrap() here since this is an example!
//! let mut client = StatsdClient::from_udp_host(("metrics.example.com", DEFAULT_PORT)).unwrap();
//! client.set_namespace("my.metrics");
//!
//! // Emit metrics!
//! client.incr("some.counter").unwrap();
//! client.sampled_count("some.sampled", 1, 0.1).unwrap();
//! client.time("some.methodCall", 42).unwrap();
//! client.gauge("some.thing", 7).unwrap();
//! client.gauge_delta_f64("some.other.thing", -1.5).unwrap();
//! client.set("some.users", "user-1234").unwrap();
//!
//! client.close().unwrap();
//! ```
//!
//! ### Disabled Metrics
//!
//! When no aggregator is configured, hold `None` instead of a client. Every
//! call then returns `Ok(())` without validating its input or doing any I/O.
//!
//! ```rust
//! use statsdx::prelude::*;
//! use statsdx::StatsdClient;
//!
//! fn handle_request(metrics: &Option<StatsdClient>) {
//!     metrics.incr("requests").unwrap();
//! }
//!
//! let metrics: Option<StatsdClient> = None;
//! handle_request(&metrics);
//! metrics.close().unwrap();
//! ```
//!
//! ### Custom Metric Sinks
//!
//! The client delegates the transport to a `MetricSink`. Implement the trait
//! to send metrics somewhere other than a UDP socket.
//!
//! ```rust
//! use std::io;
//! use statsdx::prelude::*;
//! use statsdx::{StatsdClient, MetricSink};
//!
//! pub struct MyMetricSink;
//!
//! impl MetricSink for MyMetricSink {
//!     fn emit(&self, metric: &str) -> io::Result<usize> {
//!         // Your custom metric sink implementation goes here!
//!         Ok(metric.len())
//!     }
//! }
//!
//! let client = StatsdClient::builder(MyMetricSink).with_namespace("my.prefix").build();
//! client.count("my.counter.thing", 42).unwrap();
//! ```
//!
//! ## Wire Format
//!
//! ``` text
//! [<namespace>.]<name>:<value>|<type>[|@<rate>]
//! ```
//!
//! Floating point values are written with `FLOAT_PRECISION` fractional
//! digits, gauge deltas always carry a `+` or `-` sign.

pub const DEFAULT_PORT: u16 = 8125;

pub use self::client::{
    Counted, Gauged, MetricClient, Setted, StatsdClient, StatsdClientBuilder, Timed,
};

pub use self::format::FLOAT_PRECISION;

pub use self::sinks::{
    LoggingMetricSink, MetricSink, NopMetricSink, SinkStats, SpyMetricSink, UdpMetricSink,
};

pub use self::types::{ErrorKind, MetricError, MetricResult};

mod client;
mod format;
pub mod prelude;
mod sinks;
mod types;
