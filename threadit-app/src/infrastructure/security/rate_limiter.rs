use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

const MAX_WRITES_PER_MINUTE: u32 = 20;
const MAX_WRITES_PER_HOUR: u32 = 200;
const CLEANUP_INTERVAL_SECS: u64 = 300;

/// Who a write is counted against. Logged-in writers get their own bucket
/// keyed by username, so shared NATs do not starve each other; everything
/// else falls back to the peer address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WriteKey {
    User(String),
    Ip(IpAddr),
}

impl WriteKey {
    pub fn for_request(viewer: Option<&str>, peer: IpAddr) -> Self {
        match viewer {
            Some(username) => Self::User(username.to_string()),
            None => Self::Ip(peer),
        }
    }
}

#[derive(Clone)]
struct WriteRecord {
    minute_count: u32,
    hour_count: u32,
    minute_start: Instant,
    hour_start: Instant,
}

impl Default for WriteRecord {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            minute_count: 0,
            hour_count: 0,
            minute_start: now,
            hour_start: now,
        }
    }
}

/// Per-writer limiter for write endpoints (posts, votes, comments).
#[derive(Clone)]
pub struct RateLimiter {
    writes: Arc<DashMap<WriteKey, WriteRecord>>,
    last_cleanup: Arc<std::sync::Mutex<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            writes: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(std::sync::Mutex::new(Instant::now())),
        }
    }

    pub fn check_write(&self, key: WriteKey) -> Result<(), RateLimitError> {
        self.maybe_cleanup();

        let now = Instant::now();
        let mut record = self.writes.entry(key).or_default();

        if now.duration_since(record.minute_start) > Duration::from_secs(60) {
            record.minute_count = 0;
            record.minute_start = now;
        }

        if now.duration_since(record.hour_start) > Duration::from_secs(3600) {
            record.hour_count = 0;
            record.hour_start = now;
        }

        if record.minute_count >= MAX_WRITES_PER_MINUTE {
            let wait_secs = 60 - now.duration_since(record.minute_start).as_secs();
            return Err(RateLimitError::TooManyPerMinute(wait_secs));
        }

        if record.hour_count >= MAX_WRITES_PER_HOUR {
            let wait_secs = 3600 - now.duration_since(record.hour_start).as_secs();
            return Err(RateLimitError::TooManyPerHour(wait_secs));
        }

        record.minute_count += 1;
        record.hour_count += 1;

        Ok(())
    }

    fn maybe_cleanup(&self) {
        let mut last_cleanup = self.last_cleanup.lock().unwrap();
        if last_cleanup.elapsed() > Duration::from_secs(CLEANUP_INTERVAL_SECS) {
            let cutoff = Instant::now() - Duration::from_secs(3600);
            self.writes.retain(|_, v| v.hour_start > cutoff);
            *last_cleanup = Instant::now();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum RateLimitError {
    TooManyPerMinute(u64),
    TooManyPerHour(u64),
}

impl RateLimitError {
    pub fn user_message(&self) -> String {
        match self {
            Self::TooManyPerMinute(secs) => {
                format!("Pelan-pelan! Tunggu {} detik lagi.", secs)
            }
            Self::TooManyPerHour(secs) => {
                format!(
                    "Kamu sudah mencapai batas per jam. Tunggu {} menit lagi.",
                    secs / 60
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn writes_over_the_minute_limit_are_rejected() {
        let limiter = RateLimiter::new();
        let key = WriteKey::User("budi".to_string());

        for _ in 0..MAX_WRITES_PER_MINUTE {
            assert!(limiter.check_write(key.clone()).is_ok());
        }
        assert!(matches!(
            limiter.check_write(key),
            Err(RateLimitError::TooManyPerMinute(_))
        ));
    }

    #[test]
    fn each_writer_gets_its_own_bucket() {
        let limiter = RateLimiter::new();

        for _ in 0..MAX_WRITES_PER_MINUTE {
            assert!(limiter
                .check_write(WriteKey::User("budi".to_string()))
                .is_ok());
        }

        // budi exhausted the limit; siti and an anonymous peer are untouched
        assert!(limiter
            .check_write(WriteKey::User("siti".to_string()))
            .is_ok());
        assert!(limiter.check_write(WriteKey::Ip(ip(7))).is_ok());
    }

    #[test]
    fn anonymous_peers_are_keyed_by_address() {
        let limiter = RateLimiter::new();

        for _ in 0..MAX_WRITES_PER_MINUTE {
            assert!(limiter.check_write(WriteKey::Ip(ip(1))).is_ok());
        }

        assert!(limiter.check_write(WriteKey::Ip(ip(1))).is_err());
        assert!(limiter.check_write(WriteKey::Ip(ip(2))).is_ok());
    }

    #[test]
    fn logged_in_key_ignores_the_peer_address() {
        let a = WriteKey::for_request(Some("budi"), ip(1));
        let b = WriteKey::for_request(Some("budi"), ip(2));
        assert_eq!(a, b);

        let anon = WriteKey::for_request(None, ip(1));
        assert_eq!(anon, WriteKey::Ip(ip(1)));
    }
}
