//! Counting semaphore privat per instance
//!
//! Dibangun dari `Mutex<usize>` + `Condvar`. Tidak ada nama global: dua
//! semaphore tidak akan pernah berbagi state kernel.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Counting signal: `acquire` menunggu sampai count > 0 lalu mengurangi satu,
/// `release` menambah satu dan membangunkan satu waiter.
#[derive(Debug)]
pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    // Critical section hanya aritmetika usize, tidak bisa panic, jadi poison
    // aman diabaikan
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.permits.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ambil satu permit tanpa menunggu.
    ///
    /// Returns `false` jika count sedang 0.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.lock();
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Tunggu (park, bukan spin) sampai ada permit, lalu ambil satu.
    pub fn acquire(&self) {
        let guard = self.lock();
        let mut permits = self
            .available
            .wait_while(guard, |permits| *permits == 0)
            .unwrap_or_else(PoisonError::into_inner);
        *permits -= 1;
    }

    /// Seperti `acquire`, tetapi menyerah setelah `timeout`.
    ///
    /// Returns `false` jika waktu habis; count tidak berubah dalam kasus itu.
    pub fn acquire_timeout(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (mut permits, _) = self
            .available
            .wait_timeout_while(guard, timeout, |permits| *permits == 0)
            .unwrap_or_else(PoisonError::into_inner);

        // Permit bisa datang tepat saat timeout; tetap ambil jika ada
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Kembalikan satu permit dan bangunkan satu waiter.
    pub fn release(&self) {
        let mut permits = self.lock();
        *permits += 1;
        drop(permits);
        self.available.notify_one();
    }

    /// Snapshot count saat ini. Bisa langsung basi jika ada thread lain.
    pub fn available_permits(&self) -> usize {
        *self.lock()
    }
}
