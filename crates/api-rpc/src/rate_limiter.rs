//! Rate Limiter (Token Bucket)
//!
//! Caps mutating requests per second. Contention is a handful of clinic
//! front-desk clients, so a mutex-guarded bucket is plenty.

use std::sync::Mutex;
use std::time::Instant;

pub struct RateLimiter {
    bucket: Mutex<Bucket>,
    max_tokens: f64,
    refill_per_sec: f64,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `max_burst` - Maximum burst size
    /// * `rate_per_sec` - Tokens added per second
    pub fn new(max_burst: u32, rate_per_sec: u32) -> Self {
        Self {
            bucket: Mutex::new(Bucket {
                tokens: f64::from(max_burst),
                last_refill: Instant::now(),
            }),
            max_tokens: f64::from(max_burst),
            refill_per_sec: f64::from(rate_per_sec),
        }
    }

    /// Check if a request is allowed (consumes 1 token)
    pub fn check(&self) -> bool {
        let mut bucket = self.bucket.lock().unwrap();

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.max_tokens);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}
