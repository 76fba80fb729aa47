// Statsdx - A minimal Statsd client for Rust!
//
// Copyright 2015-2026 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::format::{format_metric, MetricFormatter, MetricValue};
use crate::sinks::{MetricSink, SinkStats, UdpMetricSink};
use crate::types::{ErrorKind, MetricError, MetricResult};
use log::{debug, trace};
use std::fmt;
use std::net::ToSocketAddrs;
use std::panic::RefUnwindSafe;
use std::time::Duration;

/// Trait for incrementing and decrementing counters.
///
/// Counters are simple values incremented or decremented by a client. The
/// rates at which these events occur or average values will be determined
/// by the server receiving them. Examples of counter uses include number
/// of logins to a system or requests received.
///
/// See the [Statsd spec](https://github.com/b/statsd_spec) for more
/// information.
pub trait Counted {
    /// Increment or decrement the counter by the given amount
    fn count(&self, key: &str, count: i64) -> MetricResult<()>;

    /// Increment or decrement the counter by the given amount, marking the
    /// metric as sampled at the given rate.
    ///
    /// The rate is only written to the wire, sampling itself is up to the
    /// caller. Rates outside of `(0, 1]` are sent as-is.
    fn sampled_count(&self, key: &str, count: i64, rate: f64) -> MetricResult<()>;

    /// Increment the counter by 1
    fn incr(&self, key: &str) -> MetricResult<()> {
        self.count(key, 1)
    }

    /// Decrement the counter by 1
    fn decr(&self, key: &str) -> MetricResult<()> {
        self.count(key, -1)
    }
}

/// Trait for recording timings in milliseconds.
///
/// Timings are a number of milliseconds between a start and end time.
/// Examples include time taken to render a web page or time taken for a
/// database call to return.
///
/// See the [Statsd spec](https://github.com/b/statsd_spec) for more
/// information.
pub trait Timed {
    /// Record a timing in milliseconds with the given key
    fn time(&self, key: &str, ms: i64) -> MetricResult<()>;

    /// Record a fractional timing in milliseconds with the given key
    fn time_f64(&self, key: &str, ms: f64) -> MetricResult<()>;

    /// Record a `Duration` as a whole number of milliseconds.
    ///
    /// Fails with `ErrorKind::InvalidInput` if the duration does not fit
    /// into an `i64` number of milliseconds.
    fn time_duration(&self, key: &str, duration: Duration) -> MetricResult<()>;
}

/// Trait for recording gauge values.
///
/// Gauge values are an instantaneous measurement of a value determined
/// by the client. They do not change unless changed by the client. Examples
/// include things like load average or how many connections are active.
///
/// Absolute gauges must be non-negative. Deltas adjust the current value of
/// the gauge on the server and are always written with an explicit sign.
///
/// See the [Statsd spec](https://github.com/b/statsd_spec) for more
/// information.
pub trait Gauged {
    /// Record an absolute gauge value with the given key
    fn gauge(&self, key: &str, value: i64) -> MetricResult<()>;

    /// Adjust the gauge with the given key by a relative amount
    fn gauge_delta(&self, key: &str, delta: i64) -> MetricResult<()>;

    /// Record an absolute floating point gauge value with the given key
    fn gauge_f64(&self, key: &str, value: f64) -> MetricResult<()>;

    /// Adjust the gauge with the given key by a relative floating point amount
    fn gauge_delta_f64(&self, key: &str, delta: f64) -> MetricResult<()>;
}

/// Trait for recording set values.
///
/// Sets count the number of unique elements in a group. You can use them to,
/// for example, count the unique visitors to your site.
///
/// See the [Statsd spec](https://github.com/b/statsd_spec) for more
/// information.
pub trait Setted {
    /// Record a single set member with the given key
    fn set(&self, key: &str, value: &str) -> MetricResult<()>;
}

/// Trait that encompasses all other traits for sending metrics.
///
/// If you wish to use `StatsdClient` with a generic type or place a
/// `StatsdClient` instance behind a pointer (such as a `Box`) this will allow
/// you to reference all the implemented methods for recording metrics, while
/// using a single trait.
///
/// `Option<T>` implements this trait for any client `T`. A `None` client
/// turns every call, including `close`, into a no-op that returns `Ok(())`.
/// This lets instrumentation stay in place when metrics are disabled.
///
/// ```
/// use statsdx::prelude::*;
/// use statsdx::{StatsdClient, NopMetricSink};
///
/// let client: Box<dyn MetricClient> = Box::new(StatsdClient::from_sink(NopMetricSink));
///
/// client.count("some.counter", 1).unwrap();
/// client.time("some.timer", 42).unwrap();
/// client.gauge("some.gauge", 8).unwrap();
/// client.set("some.set", "member").unwrap();
///
/// let disabled: Option<StatsdClient> = None;
/// disabled.gauge("some.gauge", 8).unwrap();
/// disabled.close().unwrap();
/// ```
pub trait MetricClient: Counted + Timed + Gauged + Setted {
    /// Release the transport used by this client
    fn close(self) -> MetricResult<()>
    where
        Self: Sized;
}

/// Builder for creating and customizing `StatsdClient` instances.
///
/// Instances of the builder should be created by calling the `::builder()`
/// method on the `StatsdClient` struct.
///
/// # Example
///
/// ```
/// use statsdx::prelude::*;
/// use statsdx::{NopMetricSink, StatsdClient};
///
/// let client = StatsdClient::builder(NopMetricSink)
///     .with_namespace("my.app")
///     .build();
///
/// client.count("something", 123).unwrap();
/// ```
pub struct StatsdClientBuilder {
    namespace: String,
    sink: Box<dyn MetricSink + Sync + Send + RefUnwindSafe>,
}

impl StatsdClientBuilder {
    fn new<T>(sink: T) -> Self
    where
        T: MetricSink + Sync + Send + RefUnwindSafe + 'static,
    {
        StatsdClientBuilder {
            namespace: String::new(),
            sink: Box::new(sink),
        }
    }

    /// Set the namespace prepended (followed by a `.`) to every metric name.
    ///
    /// An empty namespace means metric names are sent as given.
    pub fn with_namespace<S>(mut self, namespace: S) -> Self
    where
        S: Into<String>,
    {
        self.namespace = namespace.into();
        self
    }

    /// Construct a new `StatsdClient` instance based on current settings.
    pub fn build(self) -> StatsdClient {
        StatsdClient {
            namespace: self.namespace,
            sink: self.sink,
        }
    }
}

/// Client for Statsd that implements various traits to record metrics.
///
/// # Traits
///
/// The client is the main entry point for users of this library. It supports
/// several traits for recording metrics of different types.
///
/// * `Counted` for emitting counters.
/// * `Timed` for emitting timings.
/// * `Gauged` for emitting absolute gauge values and deltas.
/// * `Setted` for emitting set values.
/// * `MetricClient` for a combination of all of the above.
///
/// Each metric is formatted and written to the sink as a single datagram in
/// the thread of the caller. Nothing is buffered or retried: errors from the
/// sink are returned to the caller as `ErrorKind::IoError`.
///
/// # Disabled Clients
///
/// Code that may run without metrics configured should hold an
/// `Option<StatsdClient>`. All of the traits above are implemented for
/// `Option`, with `None` performing no I/O and never returning an error.
///
/// ```
/// use statsdx::prelude::*;
/// use statsdx::StatsdClient;
///
/// struct Worker {
///     metrics: Option<StatsdClient>,
/// }
///
/// let worker = Worker { metrics: None };
/// worker.metrics.incr("jobs.started").unwrap();
/// ```
///
/// # Threading
///
/// The `StatsdClient` is `Send` and `Sync` and can be shared between threads
/// by wrapping it in an `Arc`. No locking is added on top of the sink, so
/// concurrent sends are only as safe as the sink's own writes.
pub struct StatsdClient {
    namespace: String,
    sink: Box<dyn MetricSink + Sync + Send + RefUnwindSafe>,
}

impl StatsdClient {
    /// Create a new client instance that will send metrics to the given host
    /// over UDP using an ephemeral, non-blocking local socket. This is the
    /// construction method that most users of this library will use.
    ///
    /// The client starts with an empty namespace.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use statsdx::StatsdClient;
    ///
    /// let client = StatsdClient::from_udp_host(("metrics.example.com", 8125)).unwrap();
    /// ```
    ///
    /// # Failures
    ///
    /// This method may fail if:
    ///
    /// * It is unable to create a local UDP socket.
    /// * It is unable to put the UDP socket into non-blocking mode.
    /// * It is unable to resolve the hostname of the metric server.
    /// * The host address is otherwise unable to be parsed.
    pub fn from_udp_host<A>(host: A) -> MetricResult<Self>
    where
        A: ToSocketAddrs,
    {
        let sink = UdpMetricSink::from_host(host)?;
        debug!("sending metrics over UDP to {}", sink.peer_addr());
        Ok(Self::from_sink(sink))
    }

    /// Create a new client instance that will emit metrics to the given
    /// `MetricSink` implementation with an empty namespace.
    ///
    /// # No-op Example
    ///
    /// ```
    /// use statsdx::{StatsdClient, NopMetricSink};
    ///
    /// let client = StatsdClient::from_sink(NopMetricSink);
    /// ```
    ///
    /// # UDP Socket Example
    ///
    /// ```
    /// use std::net::UdpSocket;
    /// use statsdx::{StatsdClient, UdpMetricSink, DEFAULT_PORT};
    ///
    /// let host = ("127.0.0.1", DEFAULT_PORT);
    ///
    /// let socket = UdpSocket::bind("0.0.0.0:0").unwrap();
    /// socket.set_nonblocking(true).unwrap();
    ///
    /// let sink = UdpMetricSink::from(host, socket).unwrap();
    /// let client = StatsdClient::from_sink(sink);
    /// ```
    pub fn from_sink<T>(sink: T) -> Self
    where
        T: MetricSink + Sync + Send + RefUnwindSafe + 'static,
    {
        Self::builder(sink).build()
    }

    /// Create a new builder with the provided metric sink.
    pub fn builder<T>(sink: T) -> StatsdClientBuilder
    where
        T: MetricSink + Sync + Send + RefUnwindSafe + 'static,
    {
        StatsdClientBuilder::new(sink)
    }

    /// Namespace prepended to every metric name, possibly empty.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Replace the namespace used for all subsequent metrics.
    ///
    /// ```
    /// use statsdx::prelude::*;
    /// use statsdx::{SpyMetricSink, StatsdClient};
    ///
    /// let (rx, sink) = SpyMetricSink::new();
    /// let mut client = StatsdClient::from_sink(sink);
    ///
    /// client.set_namespace("ns");
    /// client.set("test", "x").unwrap();
    ///
    /// assert_eq!(b"ns.test:x|s".to_vec(), rx.recv().unwrap());
    /// ```
    pub fn set_namespace<S>(&mut self, namespace: S)
    where
        S: Into<String>,
    {
        self.namespace = namespace.into();
    }

    /// Flush the underlying metric sink.
    pub fn flush(&self) -> MetricResult<()> {
        Ok(self.sink.flush()?)
    }

    /// I/O telemetry of the underlying metric sink.
    pub fn stats(&self) -> SinkStats {
        self.sink.stats()
    }

    /// Flush and close the underlying metric sink, releasing the transport.
    pub fn close(self) -> MetricResult<()> {
        self.sink.flush()?;
        self.sink.close()?;
        debug!("closed statsd client with namespace {:?}", self.namespace);
        Ok(())
    }

    // Join the namespace, key, and encoded value and write the result to
    // the sink as a single metric. An empty key is rejected before anything
    // is formatted.
    fn send(&self, key: &str, value: &dyn fmt::Display) -> MetricResult<()> {
        if key.is_empty() {
            return Err(MetricError::from((ErrorKind::InvalidInput, "name required")));
        }

        let metric = format_metric(&self.namespace, key, value);
        trace!("emitting metric {}", metric);
        self.sink.emit(&metric)?;
        Ok(())
    }
}

impl fmt::Debug for StatsdClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatsdClient {{ namespace: {:?}, sink: ... }}", self.namespace)
    }
}

impl Counted for StatsdClient {
    fn count(&self, key: &str, count: i64) -> MetricResult<()> {
        self.send(key, &MetricFormatter::counter(count))
    }

    fn sampled_count(&self, key: &str, count: i64, rate: f64) -> MetricResult<()> {
        self.send(key, &MetricFormatter::sampled_counter(count, rate))
    }
}

impl Timed for StatsdClient {
    fn time(&self, key: &str, ms: i64) -> MetricResult<()> {
        self.send(key, &MetricFormatter::timer(MetricValue::Signed(ms)))
    }

    fn time_f64(&self, key: &str, ms: f64) -> MetricResult<()> {
        self.send(key, &MetricFormatter::timer(MetricValue::Float(ms)))
    }

    fn time_duration(&self, key: &str, duration: Duration) -> MetricResult<()> {
        let ms = i64::try_from(duration.as_millis())
            .map_err(|_| MetricError::from((ErrorKind::InvalidInput, "i64 overflow")))?;
        self.time(key, ms)
    }
}

impl Gauged for StatsdClient {
    fn gauge(&self, key: &str, value: i64) -> MetricResult<()> {
        if value < 0 {
            return Err(MetricError::from((ErrorKind::InvalidInput, "gauge value must be >= 0")));
        }
        self.send(key, &MetricFormatter::gauge(MetricValue::Signed(value)))
    }

    fn gauge_delta(&self, key: &str, delta: i64) -> MetricResult<()> {
        self.send(key, &MetricFormatter::gauge(MetricValue::SignedDelta(delta)))
    }

    fn gauge_f64(&self, key: &str, value: f64) -> MetricResult<()> {
        if value < 0.0 {
            return Err(MetricError::from((ErrorKind::InvalidInput, "gauge value must be >= 0")));
        }
        self.send(key, &MetricFormatter::gauge(MetricValue::Float(value)))
    }

    fn gauge_delta_f64(&self, key: &str, delta: f64) -> MetricResult<()> {
        self.send(key, &MetricFormatter::gauge(MetricValue::FloatDelta(delta)))
    }
}

impl Setted for StatsdClient {
    fn set(&self, key: &str, value: &str) -> MetricResult<()> {
        self.send(key, &MetricFormatter::set(value))
    }
}

impl MetricClient for StatsdClient {
    fn close(self) -> MetricResult<()> {
        StatsdClient::close(self)
    }
}

// Every method of an absent client goes through this guard: `None` returns
// `Ok(())` before any validation or I/O happens.
fn when_present<T, F>(client: &Option<T>, f: F) -> MetricResult<()>
where
    F: FnOnce(&T) -> MetricResult<()>,
{
    match client {
        Some(c) => f(c),
        None => Ok(()),
    }
}

impl<T: Counted> Counted for Option<T> {
    fn count(&self, key: &str, count: i64) -> MetricResult<()> {
        when_present(self, |c| c.count(key, count))
    }

    fn sampled_count(&self, key: &str, count: i64, rate: f64) -> MetricResult<()> {
        when_present(self, |c| c.sampled_count(key, count, rate))
    }

    fn incr(&self, key: &str) -> MetricResult<()> {
        when_present(self, |c| c.incr(key))
    }

    fn decr(&self, key: &str) -> MetricResult<()> {
        when_present(self, |c| c.decr(key))
    }
}

impl<T: Timed> Timed for Option<T> {
    fn time(&self, key: &str, ms: i64) -> MetricResult<()> {
        when_present(self, |c| c.time(key, ms))
    }

    fn time_f64(&self, key: &str, ms: f64) -> MetricResult<()> {
        when_present(self, |c| c.time_f64(key, ms))
    }

    fn time_duration(&self, key: &str, duration: Duration) -> MetricResult<()> {
        when_present(self, |c| c.time_duration(key, duration))
    }
}

impl<T: Gauged> Gauged for Option<T> {
    fn gauge(&self, key: &str, value: i64) -> MetricResult<()> {
        when_present(self, |c| c.gauge(key, value))
    }

    fn gauge_delta(&self, key: &str, delta: i64) -> MetricResult<()> {
        when_present(self, |c| c.gauge_delta(key, delta))
    }

    fn gauge_f64(&self, key: &str, value: f64) -> MetricResult<()> {
        when_present(self, |c| c.gauge_f64(key, value))
    }

    fn gauge_delta_f64(&self, key: &str, delta: f64) -> MetricResult<()> {
        when_present(self, |c| c.gauge_delta_f64(key, delta))
    }
}

impl<T: Setted> Setted for Option<T> {
    fn set(&self, key: &str, value: &str) -> MetricResult<()> {
        when_present(self, |c| c.set(key, value))
    }
}

impl<T: MetricClient> MetricClient for Option<T> {
    fn close(self) -> MetricResult<()> {
        match self {
            Some(c) => c.close(),
            None => Ok(()),
        }
    }
}

// Forwarding impls so that borrowed clients, and in particular
// `Option<&StatsdClient>`, get the same treatment as owned ones.

impl<T: Counted + ?Sized> Counted for &T {
    fn count(&self, key: &str, count: i64) -> MetricResult<()> {
        (**self).count(key, count)
    }

    fn sampled_count(&self, key: &str, count: i64, rate: f64) -> MetricResult<()> {
        (**self).sampled_count(key, count, rate)
    }

    fn incr(&self, key: &str) -> MetricResult<()> {
        (**self).incr(key)
    }

    fn decr(&self, key: &str) -> MetricResult<()> {
        (**self).decr(key)
    }
}

impl<T: Timed + ?Sized> Timed for &T {
    fn time(&self, key: &str, ms: i64) -> MetricResult<()> {
        (**self).time(key, ms)
    }

    fn time_f64(&self, key: &str, ms: f64) -> MetricResult<()> {
        (**self).time_f64(key, ms)
    }

    fn time_duration(&self, key: &str, duration: Duration) -> MetricResult<()> {
        (**self).time_duration(key, duration)
    }
}

impl<T: Gauged + ?Sized> Gauged for &T {
    fn gauge(&self, key: &str, value: i64) -> MetricResult<()> {
        (**self).gauge(key, value)
    }

    fn gauge_delta(&self, key: &str, delta: i64) -> MetricResult<()> {
        (**self).gauge_delta(key, delta)
    }

    fn gauge_f64(&self, key: &str, value: f64) -> MetricResult<()> {
        (**self).gauge_f64(key, value)
    }

    fn gauge_delta_f64(&self, key: &str, delta: f64) -> MetricResult<()> {
        (**self).gauge_delta_f64(key, delta)
    }
}

impl<T: Setted + ?Sized> Setted for &T {
    fn set(&self, key: &str, value: &str) -> MetricResult<()> {
        (**self).set(key, value)
    }
}
