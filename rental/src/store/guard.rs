use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{RentalError, Result};

/// In-flight flag for a save action.
///
/// A second save started while one is running is rejected rather than queued.
/// There is no timeout: the flag clears when the [`SaveTicket`] is dropped.
#[derive(Debug, Clone, Default)]
pub struct SaveGuard {
    in_flight: Arc<AtomicBool>,
}

impl SaveGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag, or fail with [`RentalError::SaveInFlight`].
    pub fn try_begin(&self) -> Result<SaveTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| RentalError::SaveInFlight)?;
        Ok(SaveTicket {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held for the duration of one save.
#[derive(Debug)]
pub struct SaveTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SaveTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
