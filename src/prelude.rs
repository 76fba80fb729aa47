// Statsdx - A minimal Statsd client for Rust!
//
// Copyright 2015-2026 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Export the metric traits for easy glob imports
//!
//! # Example
//!
//! ```
//! use statsdx::prelude::*;
//! use statsdx::{StatsdClient, NopMetricSink};
//!
//! let client = StatsdClient::from_sink(NopMetricSink);
//!
//! client.count("some.counter", 1).unwrap();
//! client.time("some.timer", 23).unwrap();
//! client.gauge("some.gauge", 45).unwrap();
//! client.gauge_delta("some.gauge", -5).unwrap();
//! client.set("some.set", "123").unwrap();
//! ```

pub use crate::client::{Counted, Gauged, MetricClient, Setted, Timed};
