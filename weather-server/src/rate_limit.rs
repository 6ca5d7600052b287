use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

struct Window {
    count: u32,
    started_at: Instant,
}

/// Fixed-window request counter gating the whole API surface.
///
/// The window is global, not per-client, and rolls over lazily: every
/// `admit` call first checks whether the window has expired. The check and
/// the increment happen inside one critical section.
pub struct RateLimiter {
    window: Mutex<Window>,
    max_requests: u32,
    window_len: Duration,
}

impl RateLimiter {
    pub fn new(max_requests_per_minute: u32) -> Self {
        Self::with_window(max_requests_per_minute, Duration::from_secs(60))
    }

    pub fn with_window(max_requests: u32, window_len: Duration) -> Self {
        Self {
            window: Mutex::new(Window {
                count: 0,
                started_at: Instant::now(),
            }),
            max_requests,
            window_len,
        }
    }

    /// Returns false when the ceiling for the current window is reached.
    /// The counter is only ever reset by window rollover.
    pub async fn admit(&self) -> bool {
        let mut window = self.window.lock().await;

        let now = Instant::now();
        if now.duration_since(window.started_at) > self.window_len {
            window.count = 0;
            window.started_at = now;
        }

        if window.count >= self.max_requests {
            return false;
        }

        window.count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_once_ceiling_is_reached() {
        let limiter = RateLimiter::new(100);
        for _ in 0..100 {
            assert!(limiter.admit().await);
        }
        assert!(!limiter.admit().await);
        assert!(!limiter.admit().await);
    }

    #[tokio::test(start_paused = true)]
    async fn window_rollover_resets_the_counter() {
        let limiter = RateLimiter::new(100);
        for _ in 0..100 {
            assert!(limiter.admit().await);
        }
        assert!(!limiter.admit().await);

        tokio::time::advance(Duration::from_secs(61)).await;

        for _ in 0..100 {
            assert!(limiter.admit().await);
        }
        assert!(!limiter.admit().await);
    }

    #[tokio::test(start_paused = true)]
    async fn window_survives_until_it_expires() {
        let limiter = RateLimiter::with_window(2, Duration::from_secs(60));
        assert!(limiter.admit().await);
        assert!(limiter.admit().await);

        // Still inside the same window.
        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(!limiter.admit().await);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(limiter.admit().await);
    }
}
