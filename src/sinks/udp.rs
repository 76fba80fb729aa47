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
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use crate::sinks::core::{MetricSink, SinkStats, SocketStats};
use crate::types::{ErrorKind, MetricError, MetricResult};

/// Attempt to convert anything implementing the `ToSocketAddrs` trait
/// into a concrete `SocketAddr` instance, returning an `InvalidInput`
/// error if the address could not be parsed.
// Public portion of the API (the sink constructors) is pass by value so
// there's no point in changing this to be pass by reference yet.
#[allow(clippy::needless_pass_by_value)]
fn get_addr<A: ToSocketAddrs>(addr: A) -> MetricResult<SocketAddr> {
    match addr.to_socket_addrs()?.next() {
        Some(addr) => Ok(addr),
        None => Err(MetricError::from((
            ErrorKind::InvalidInput,
            "No socket addresses yielded",
        ))),
    }
}

/// Bind an ephemeral local socket in the same address family as the peer.
fn bind_local(peer: &SocketAddr) -> io::Result<UdpSocket> {
    let local: SocketAddr = match peer {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    UdpSocket::bind(local)
}

/// Implementation of a `MetricSink` that emits metrics over UDP.
///
/// It accepts a UDP socket instance over which to write metrics and the
/// address of the Statsd server to send packets to. There is no handshake:
/// the socket is never connected, each metric is a single `send_to` call.
///
/// Each metric is sent to the Statsd server when the `.emit()` method is
/// called, in the thread of the caller.
#[derive(Debug)]
pub struct UdpMetricSink {
    addr: SocketAddr,
    socket: UdpSocket,
    stats: SocketStats,
}

impl UdpMetricSink {
    /// Construct a new `UdpMetricSink` instance.
    ///
    /// The address should be the address of the remote metric server to
    /// emit metrics to over UDP. The socket should already be bound to a
    /// local address with any desired configuration applied (blocking vs
    /// non-blocking, timeouts, etc.).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::net::UdpSocket;
    /// use statsdx::{UdpMetricSink, DEFAULT_PORT};
    ///
    /// let socket = UdpSocket::bind("0.0.0.0:0").unwrap();
    /// let host = ("metrics.example.com", DEFAULT_PORT);
    /// let sink = UdpMetricSink::from(host, socket);
    /// ```
    ///
    /// # Failures
    ///
    /// This method may fail if:
    ///
    /// * It is unable to resolve the hostname of the metric server.
    /// * The host address is otherwise unable to be parsed
    pub fn from<A>(to_addr: A, socket: UdpSocket) -> MetricResult<UdpMetricSink>
    where
        A: ToSocketAddrs,
    {
        let addr = get_addr(to_addr)?;
        let stats = SocketStats::default();
        Ok(UdpMetricSink { addr, socket, stats })
    }

    /// Resolve the host and open a non-blocking socket bound to an ephemeral
    /// local port to send to it.
    ///
    /// IPv4 hosts get a socket bound to `0.0.0.0:0`, IPv6 hosts get one bound
    /// to `[::]:0`. When the host resolves to several addresses the first one
    /// is used.
    ///
    /// # Failures
    ///
    /// This method may fail if:
    ///
    /// * It is unable to resolve the hostname of the metric server.
    /// * It is unable to create a local UDP socket.
    /// * It is unable to put the UDP socket into non-blocking mode.
    pub fn from_host<A>(host: A) -> MetricResult<UdpMetricSink>
    where
        A: ToSocketAddrs,
    {
        let addr = get_addr(host)?;
        let socket = bind_local(&addr)?;
        socket.set_nonblocking(true)?;
        let stats = SocketStats::default();
        Ok(UdpMetricSink { addr, socket, stats })
    }

    /// Address of the Statsd server this sink sends to.
    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }
}

impl MetricSink for UdpMetricSink {
    fn emit(&self, metric: &str) -> io::Result<usize> {
        self.stats
            .update(self.socket.send_to(metric.as_bytes(), self.addr), metric.len())
    }

    fn stats(&self) -> SinkStats {
        (&self.stats).into()
    }
}

#[cfg(test)]
mod tests {
    use super::{bind_local, get_addr, MetricSink, UdpMetricSink};
    use crate::types::ErrorKind;
    use std::net::{SocketAddr, UdpSocket};

    #[test]
    fn test_get_addr_bad_address() {
        let res = get_addr("asdf");
        assert!(res.is_err());
    }

    #[test]
    fn test_get_addr_valid_address() {
        let res = get_addr("127.0.0.1:8125");
        assert!(res.is_ok());
    }

    #[test]
    fn test_get_addr_no_addresses() {
        let empty: &[SocketAddr] = &[];
        let err = get_addr(empty).unwrap_err();
        assert_eq!(ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn test_bind_local_matches_family() {
        let v4: SocketAddr = "127.0.0.1:8125".parse().unwrap();
        let socket = bind_local(&v4).unwrap();
        assert!(socket.local_addr().unwrap().is_ipv4());
    }

    #[test]
    fn test_udp_metric_sink() {
        let socket = UdpSocket::bind("0.0.0.0:0").unwrap();
        let sink = UdpMetricSink::from("127.0.0.1:8125", socket).unwrap();
        assert_eq!(7, sink.emit("buz:1|c").unwrap());
    }

    #[test]
    fn test_udp_metric_sink_from_host() {
        let sink = UdpMetricSink::from_host(("127.0.0.1", 8125)).unwrap();
        assert_eq!("127.0.0.1:8125".parse::<SocketAddr>().unwrap(), sink.peer_addr());
        assert_eq!(7, sink.emit("baz:1|c").unwrap());
    }

    #[test]
    fn test_udp_metric_sink_from_host_bad_address() {
        let res = UdpMetricSink::from_host("not an address");
        assert!(res.is_err());
    }

    #[test]
    fn test_udp_metric_sink_stats() {
        let socket = UdpSocket::bind("0.0.0.0:0").unwrap();
        let sink = UdpMetricSink::from("127.0.0.1:8125", socket).unwrap();
        sink.emit("foo:54|c").unwrap();
        sink.emit("foo:67|c").unwrap();

        let stats = sink.stats();
        assert_eq!(16, stats.bytes_sent);
        assert_eq!(2, stats.packets_sent);
        assert_eq!(0, stats.packets_dropped);
    }
}
