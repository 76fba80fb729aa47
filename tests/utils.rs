use statsdx::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[allow(dead_code)]
pub const NUM_THREADS: u64 = 100;
#[allow(dead_code)]
pub const NUM_ITERATIONS: u64 = 1_000;

#[allow(dead_code)]
pub fn run_arc_threaded_test<T>(client: T, num_threads: u64, iterations: u64)
where
    T: MetricClient + Send + Sync + 'static,
{
    let shared_client = Arc::new(client);

    let threads: Vec<_> = (0..num_threads)
        .map(|_| {
            let local_client = Arc::clone(&shared_client);

            thread::spawn(move || {
                for i in 0..iterations {
                    local_client.count("some.counter", i as i64).unwrap();
                    local_client.sampled_count("some.counter", i as i64, 0.5).unwrap();
                    local_client.time("some.timer", i as i64).unwrap();
                    local_client.time_f64("some.timer", i as f64).unwrap();
                    local_client.gauge("some.gauge", i as i64).unwrap();
                    local_client.gauge_delta("some.gauge", -(i as i64)).unwrap();
                    local_client.gauge_f64("some.gauge", i as f64).unwrap();
                    local_client.gauge_delta_f64("some.gauge", i as f64).unwrap();
                    local_client.set("some.set", &i.to_string()).unwrap();
                    thread::sleep(Duration::from_millis(1));
                }
            })
        })
        .collect();

    for t in threads {
        t.join().unwrap();
    }
}

/// Split a payload on `:` and then `|` into name, value, and type.
#[allow(dead_code)]
pub fn parse_metric(payload: &str) -> (&str, &str, &str) {
    let (name, rest) = payload.split_once(':').unwrap();
    let mut parts = rest.split('|');
    let value = parts.next().unwrap();
    let type_ = parts.next().unwrap();
    (name, value, type_)
}
