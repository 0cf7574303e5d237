//! Bounded MPMC queue dengan backpressure
//!
//! Satu `RingBuffer` di balik `Mutex`, plus dua semaphore:
//! - `free`: slot kosong, mulai dari `capacity`
//! - `filled`: slot terisi, mulai dari 0
//!
//! Insert mengambil satu `free` lalu melepas satu `filled`; remove kebalikannya.
//! Lock hanya dipegang untuk satu mutasi buffer dan tidak pernah dipegang
//! saat menunggu semaphore.

use std::fmt;
use std::mem::MaybeUninit;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::Semaphore;
use crate::core::RingBuffer;
use crate::error::{Error, Result};
use crate::trace::{debug, trace};

/// Queue FIFO thread-safe dengan kapasitas tetap.
///
/// Bisa dipakai banyak producer dan banyak consumer sekaligus (bagikan lewat
/// `Arc` atau `std::thread::scope`). Karena semua operasi hanya butuh `&self`,
/// queue tidak bisa di-drop selama masih ada thread yang menunggu di dalamnya.
///
/// Tidak ada `len()`: nilai itu langsung basi begitu lock dilepas. Untuk
/// shutdown consumer, kirim nilai sentinel pilihan caller.
///
/// # Example
///
/// ```
/// use fifobuf::sync::BoundedQueue;
///
/// let queue = BoundedQueue::new(2).unwrap();
///
/// queue.insert_blocking(1);
/// assert!(queue.try_insert(2).is_ok());
/// assert_eq!(queue.try_insert(3), Err(3)); // penuh
///
/// assert_eq!(queue.peek(), Some(1));
/// assert_eq!(queue.remove_blocking(), 1);
/// assert_eq!(queue.try_remove(), Some(2));
/// assert_eq!(queue.try_remove(), None);
/// ```
pub struct BoundedQueue<'a, T> {
    ring: Mutex<RingBuffer<'a, T>>,
    free: Semaphore,
    filled: Semaphore,
    capacity: usize,
}

impl<T> BoundedQueue<'static, T> {
    /// Queue dengan storage sendiri untuk `capacity` elemen.
    ///
    /// # Errors
    /// Sama seperti [`RingBuffer::new`].
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_ring(RingBuffer::new(capacity)?)
    }
}

impl<'a, T> BoundedQueue<'a, T> {
    /// Queue di atas memori caller; lihat [`RingBuffer::from_storage`].
    ///
    /// # Errors
    /// Sama seperti [`RingBuffer::from_storage`].
    pub fn from_storage(storage: &'a mut [MaybeUninit<T>], capacity: usize) -> Result<Self> {
        Self::from_ring(RingBuffer::from_storage(storage, capacity)?)
    }

    /// Bungkus ring buffer yang masih kosong.
    ///
    /// # Errors
    /// `Error::NotEmpty` jika ring sudah berisi elemen.
    pub fn from_ring(ring: RingBuffer<'a, T>) -> Result<Self> {
        if !ring.is_empty() {
            return Err(Error::NotEmpty(ring.len()));
        }

        let capacity = ring.capacity();
        debug!(capacity, "bounded queue created");

        Ok(Self {
            ring: Mutex::new(ring),
            free: Semaphore::new(capacity),
            filled: Semaphore::new(0),
            capacity,
        })
    }

    // Poison aman diabaikan: ring selalu konsisten sebelum kode user
    // (Clone / Drop milik T) sempat panic
    fn lock(&self) -> MutexGuard<'_, RingBuffer<'a, T>> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Slot `free` sudah dipesan: pindahkan nilai ke ring lalu beri sinyal.
    fn commit_insert(&self, value: T) {
        let accepted = self.lock().insert(value);
        debug_assert!(accepted.is_ok(), "free slot reserved but ring is full");
        self.filled.release();
    }

    /// Slot `filled` sudah dipesan: ambil nilai dari ring lalu beri sinyal.
    fn commit_remove(&self) -> T {
        let value = self.lock().remove();
        self.free.release();
        match value {
            Some(value) => value,
            None => unreachable!("filled slot reserved but ring is empty"),
        }
    }

    /// Insert tanpa menunggu.
    ///
    /// # Errors
    /// `Err(value)` jika tidak ada slot kosong; state tidak berubah.
    pub fn try_insert(&self, value: T) -> Result<(), T> {
        if !self.free.try_acquire() {
            return Err(value);
        }
        self.commit_insert(value);
        Ok(())
    }

    /// Insert, menunggu (tanpa batas waktu) sampai ada slot kosong.
    pub fn insert_blocking(&self, value: T) {
        if !self.free.try_acquire() {
            trace!("queue full, producer parked");
            self.free.acquire();
        }
        self.commit_insert(value);
    }

    /// Insert, menunggu paling lama `timeout`.
    ///
    /// # Errors
    /// `Err(value)` jika waktu habis sebelum ada slot kosong; state tidak
    /// berubah.
    pub fn insert_timeout(&self, value: T, timeout: Duration) -> Result<(), T> {
        if !self.free.acquire_timeout(timeout) {
            debug!(?timeout, "insert timed out");
            return Err(value);
        }
        self.commit_insert(value);
        Ok(())
    }

    /// Ambil elemen tertua tanpa menunggu.
    ///
    /// Returns `None` jika queue kosong.
    pub fn try_remove(&self) -> Option<T> {
        if !self.filled.try_acquire() {
            return None;
        }
        Some(self.commit_remove())
    }

    /// Ambil elemen tertua, menunggu (tanpa batas waktu) sampai ada.
    pub fn remove_blocking(&self) -> T {
        if !self.filled.try_acquire() {
            trace!("queue empty, consumer parked");
            self.filled.acquire();
        }
        self.commit_remove()
    }

    /// Ambil elemen tertua, menunggu paling lama `timeout`.
    ///
    /// Returns `None` jika waktu habis; state tidak berubah.
    pub fn remove_timeout(&self, timeout: Duration) -> Option<T> {
        if !self.filled.acquire_timeout(timeout) {
            debug!(?timeout, "remove timed out");
            return None;
        }
        Some(self.commit_remove())
    }

    /// Buang elemen tertua tanpa menunggu. Returns `false` jika kosong.
    pub fn try_discard(&self) -> bool {
        self.try_remove().is_some()
    }

    /// Buang elemen tertua, menunggu sampai ada.
    pub fn discard_blocking(&self) {
        drop(self.remove_blocking());
    }

    /// Salinan elemen tertua saat ini, tanpa mengubah count `free`/`filled`.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().peek()
    }

    /// Kapasitas queue (konstan)
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ambil kembali ring buffer di dalam queue.
    ///
    /// Butuh ownership, jadi tidak ada thread lain yang masih memakai queue.
    pub fn into_inner(self) -> RingBuffer<'a, T> {
        self.ring.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for BoundedQueue<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
