use std::{env, net::IpAddr, time::Duration};

// Runtime/server settings read from the environment (and `.env` if present).

pub fn http_port() -> u16 {
    env::var("SCORE_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000)
}

pub fn http_host() -> IpAddr {
    env::var("SCORE_SERVER_HOST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

// Keepalive interval for idle viewer streams.
pub fn heartbeat_interval() -> Duration {
    let secs = env::var("HEARTBEAT_INTERVAL_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(30);
    Duration::from_secs(secs)
}

// Frames buffered per viewer before it is dropped as too slow.
pub fn subscriber_buffer() -> usize {
    env::var("SUBSCRIBER_BUFFER")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|frames| *frames > 0)
        .unwrap_or(64)
}

pub fn seed_sample_matches() -> bool {
    env::var("SEED_SAMPLE_MATCHES")
        .map(|value| !matches!(value.trim(), "0" | "false" | "no"))
        .unwrap_or(true)
}
