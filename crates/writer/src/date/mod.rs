//! HTTP date header value management service.
//!
//! The `Date` header changes once per second while a busy server commits
//! thousands of responses in that time, so the formatted value is cached and
//! refreshed by a background task instead of formatted on every commit.

use arc_swap::ArcSwap;
use bytes::Bytes;
use http::HeaderValue;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// A service that maintains and periodically updates the current HTTP date string.
#[derive(Debug)]
pub struct DateService {
    current: Arc<ArcSwap<Bytes>>,
    handle: tokio::task::JoinHandle<()>,
}

static DATE_SERVICE: Lazy<DateService> = Lazy::new(|| DateService::new_with_update_interval(Duration::from_millis(800)));

impl DateService {
    /// Returns the process wide instance.
    ///
    /// The first call spawns the refresh task, so it must happen inside a tokio runtime.
    pub fn get_global_instance() -> &'static DateService {
        &DATE_SERVICE
    }

    fn new_with_update_interval(update_interval: Duration) -> Self {
        let current = Arc::new(ArcSwap::from_pointee(now()));
        let current_arc = Arc::clone(&current);

        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(update_interval).await;
                current_arc.store(Arc::new(now()));
            }
        });

        DateService { current, handle }
    }

    /// Hands the current date header value to `f`.
    pub fn with_http_date<F>(&self, f: F)
    where
        F: FnOnce(HeaderValue),
    {
        let date = self.current.load().as_ref().clone();
        match HeaderValue::from_maybe_shared(date) {
            Ok(header_value) => f(header_value),
            Err(e) => warn!(cause = %e, "cached http date is not a valid header value"),
        }
    }
}

fn now() -> Bytes {
    let mut buf = faf_http_date::get_date_buff_no_key();
    faf_http_date::get_date_no_key(&mut buf);
    Bytes::from_owner(buf)
}

impl Drop for DateService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
