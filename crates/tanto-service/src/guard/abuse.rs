//! Login throttling per source address and per username.
//!
//! Each dimension keeps a bounded LRU of token buckets. A bucket appears on the
//! first failed attempt for a key and disappears on a successful login. Once a
//! bucket exists, every ban check takes a token, so throttled keys must wait for
//! the refill before they are allowed to try again.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use tanto_core::config::SecurityConfig;

use super::address::AddressKey;
use super::bucket::TokenBucket;

/// Entries kept per dimension before least-recently-used keys are evicted.
pub const BAN_CACHE_CAPACITY: usize = 1024;

/// Attempts allowed back to back before throttling starts.
pub const BURST: u32 = 5;

/// Window over which `retry_limit` tokens are refilled.
pub const REFILL_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Which dimensions are banned, and how fast buckets refill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BanPolicy {
    pub by_address: bool,
    pub by_username: bool,
    refill_per_sec: f64,
}

impl BanPolicy {
    pub const DISABLED: Self = Self {
        by_address: false,
        by_username: false,
        refill_per_sec: 0.0,
    };

    /// ## Summary
    /// Builds a policy refilling `retry_limit` tokens per five minutes.
    ///
    /// A `retry_limit` of zero or less disables both dimensions.
    #[must_use]
    pub fn new(retry_limit: i64, by_address: bool, by_username: bool) -> Self {
        let Some(limit) = u32::try_from(retry_limit).ok().filter(|limit| *limit > 0) else {
            return Self::DISABLED;
        };

        Self {
            by_address,
            by_username,
            refill_per_sec: f64::from(limit) / REFILL_WINDOW.as_secs_f64(),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.by_address || self.by_username
    }

    fn new_bucket(&self, now: Instant) -> TokenBucket {
        TokenBucket::new(BURST, self.refill_per_sec, now)
    }
}

impl From<&SecurityConfig> for BanPolicy {
    fn from(config: &SecurityConfig) -> Self {
        Self::new(
            config.retry_limit,
            config.ban_address_on_failure,
            config.ban_username_on_failure,
        )
    }
}

/// ## Summary
/// Tracks failed logins and decides whether an attempt is rejected outright.
///
/// Each cache sits behind its own lock; lookup, token consumption, insertion
/// and eviction for a key all happen while holding it.
pub struct AbuseGuard {
    policy: BanPolicy,
    by_address: Mutex<LruCache<AddressKey, TokenBucket>>,
    by_username: Mutex<LruCache<String, TokenBucket>>,
}

impl AbuseGuard {
    #[must_use]
    pub fn new(policy: BanPolicy) -> Self {
        Self::with_capacity(policy, BAN_CACHE_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(policy: BanPolicy, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            policy,
            by_address: Mutex::new(LruCache::new(capacity)),
            by_username: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> BanPolicy {
        self.policy
    }

    /// ## Summary
    /// Returns `true` if attempts from `address` are currently throttled.
    ///
    /// Checking counts as an attempt: a tracked address spends a token.
    pub fn is_address_banned(&self, address: AddressKey) -> bool {
        self.is_address_banned_at(address, Instant::now())
    }

    /// ## Summary
    /// Returns `true` if attempts for `username` are currently throttled.
    ///
    /// Checking counts as an attempt: a tracked username spends a token.
    pub fn is_username_banned(&self, username: &str) -> bool {
        self.is_username_banned_at(username, Instant::now())
    }

    /// ## Summary
    /// Starts tracking `address` and `username` after a failed attempt.
    ///
    /// A key seen for the first time gets a bucket already charged for this
    /// failure. Keys that are already tracked are left as they are.
    pub fn record_failure(&self, address: AddressKey, username: &str) {
        self.record_failure_at(address, username, Instant::now());
    }

    /// Forgets both keys after a successful login.
    pub fn record_success(&self, address: AddressKey, username: &str) {
        if self.policy.by_address {
            self.by_address.lock().pop(&address);
        }
        if self.policy.by_username {
            self.by_username.lock().pop(username);
        }
    }

    #[must_use]
    pub fn tracked_addresses(&self) -> usize {
        self.by_address.lock().len()
    }

    #[must_use]
    pub fn tracked_usernames(&self) -> usize {
        self.by_username.lock().len()
    }

    fn is_address_banned_at(&self, address: AddressKey, now: Instant) -> bool {
        if !self.policy.by_address || address.is_unknown() {
            return false;
        }
        self.by_address
            .lock()
            .get_mut(&address)
            .is_some_and(|bucket| !bucket.try_acquire_at(now))
    }

    fn is_username_banned_at(&self, username: &str, now: Instant) -> bool {
        if !self.policy.by_username {
            return false;
        }
        self.by_username
            .lock()
            .get_mut(username)
            .is_some_and(|bucket| !bucket.try_acquire_at(now))
    }

    fn record_failure_at(&self, address: AddressKey, username: &str, now: Instant) {
        if self.policy.by_address && !address.is_unknown() {
            let mut cache = self.by_address.lock();
            if !cache.contains(&address) {
                cache.put(address, self.charged_bucket(now));
            }
        }
        if self.policy.by_username && !username.is_empty() {
            let mut cache = self.by_username.lock();
            if !cache.contains(username) {
                cache.put(username.to_string(), self.charged_bucket(now));
            }
        }
    }

    fn charged_bucket(&self, now: Instant) -> TokenBucket {
        let mut bucket = self.policy.new_bucket(now);
        bucket.try_acquire_at(now);
        bucket
    }
}

impl std::fmt::Debug for AbuseGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbuseGuard")
            .field("policy", &self.policy)
            .field("tracked_addresses", &self.tracked_addresses())
            .field("tracked_usernames", &self.tracked_usernames())
            .finish()
    }
}
