//! Registry of submissions that are still being processed.
//!
//! A form may have at most one pending submission per email address. A second
//! attempt while the first is awaiting its service is refused instead of being
//! queued. The slot is released when the returned guard is dropped, whether
//! the submission succeeded, failed or the handler unwound.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Which form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Contact,
    AdminLogin,
}

impl FormKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::AdminLogin => "admin_login",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Key = (FormKind, String);

/// Pending submissions keyed by form and lowercased email.
#[derive(Debug, Default)]
pub struct InFlight {
    pending: DashMap<Key, Instant>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `(form, email)`.
    ///
    /// Returns `None` while another submission for the same pair is pending.
    #[must_use]
    pub fn begin(self: &Arc<Self>, form: FormKind, email: &str) -> Option<InFlightGuard> {
        let key = (form, email.trim().to_lowercase());
        match self.pending.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(Instant::now());
                Some(InFlightGuard {
                    registry: Arc::clone(self),
                    key,
                })
            }
        }
    }

    /// Whether a submission for `(form, email)` is pending.
    #[must_use]
    pub fn is_pending(&self, form: FormKind, email: &str) -> bool {
        self.pending
            .contains_key(&(form, email.trim().to_lowercase()))
    }

    /// Number of pending submissions across all forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Holds a pending slot; releases it on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<InFlight>,
    key: Key,
}

impl InFlightGuard {
    #[must_use]
    pub const fn form(&self) -> FormKind {
        self.key.0
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Some((_, started)) = self.registry.pending.remove(&self.key) {
            tracing::debug!(
                form = %self.key.0,
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "Submission slot released"
            );
        }
    }
}
