//! Single-owner FIFO Ring Buffer
//!
//! Kapasitas tetap, tidak ada alokasi setelah konstruksi, tidak ada
//! sinkronisasi. Semua mutasi lewat `&mut self`, jadi hanya satu konteks
//! eksekusi yang bisa menyentuh buffer pada satu waktu. Untuk versi
//! thread-safe lihat [`crate::sync::BoundedQueue`].

use std::fmt;
use std::mem::MaybeUninit;

use super::slots::{self, Slots};
use crate::error::{Error, Result};
use crate::trace::debug;

/// Ring buffer FIFO generik dengan kapasitas tetap.
///
/// Slot terisi selalu membentuk range melingkar `[head, head + len)`
/// modulo kapasitas. Slot di luar range itu tidak pernah dibaca atau di-drop.
///
/// Lifetime `'a` adalah lifetime memori slot. Buffer yang memiliki memorinya
/// sendiri (lewat [`RingBuffer::new`]) adalah `RingBuffer<'static, T>`.
pub struct RingBuffer<'a, T> {
    slots: Slots<'a, T>,
    // Slot tertua yang terisi (valid hanya jika len > 0)
    head: usize,
    // Slot kosong berikutnya untuk insert
    tail: usize,
    len: usize,
}

impl<T> RingBuffer<'static, T> {
    /// Membuat ring buffer dengan storage sendiri untuk `capacity` elemen.
    ///
    /// Alokasi hanya terjadi sekali di sini.
    ///
    /// # Errors
    /// `Error::ZeroCapacity` jika `capacity == 0`, `Error::Alloc` jika
    /// storage tidak bisa dialokasikan.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self::with_slots(Slots::allocate(capacity)?))
    }
}

impl<'a, T> RingBuffer<'a, T> {
    /// Membuat ring buffer di atas memori yang disediakan caller.
    ///
    /// Hanya `capacity` slot pertama dari `storage` yang dipakai. Memori tidak
    /// dibebaskan saat buffer di-drop, tetapi elemen yang masih tersisa tetap
    /// di-drop.
    ///
    /// # Errors
    /// `Error::ZeroCapacity` jika `capacity == 0`, `Error::StorageTooSmall`
    /// jika `storage` punya kurang dari `capacity` slot.
    pub fn from_storage(storage: &'a mut [MaybeUninit<T>], capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if storage.len() < capacity {
            return Err(Error::StorageTooSmall {
                available: storage.len(),
                requested: capacity,
            });
        }
        Ok(Self::with_slots(Slots::Borrowed(&mut storage[..capacity])))
    }

    fn with_slots(slots: Slots<'a, T>) -> Self {
        debug!(capacity = slots.len(), storage = slots.kind(), "ring buffer created");
        Self {
            slots,
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Index berikutnya secara melingkar.
    #[inline(always)]
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() {
            0
        } else {
            next
        }
    }

    /// Tambah elemen di belakang buffer.
    ///
    /// # Errors
    /// Jika buffer penuh, `value` dikembalikan lewat `Err` dan state tidak
    /// berubah.
    #[inline]
    pub fn insert(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        slots::construct(&mut self.slots[self.tail], value);
        self.tail = self.advance(self.tail);
        self.len += 1;

        Ok(())
    }

    /// Ambil elemen tertua (di `head`).
    ///
    /// Returns `None` jika buffer kosong.
    #[inline]
    pub fn remove(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let head = self.head;
        self.head = self.advance(head);
        self.len -= 1;

        // SAFETY: head ada di dalam range terisi sebelum dimajukan, dan sudah
        // dikeluarkan dari range sebelum dibaca, jadi tidak akan dibaca lagi
        Some(unsafe { slots::take(&mut self.slots[head]) })
    }

    /// Buang elemen tertua tanpa mengembalikannya.
    ///
    /// Returns `false` jika buffer kosong.
    #[inline]
    pub fn discard(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }

        let head = self.head;
        self.head = self.advance(head);
        self.len -= 1;

        // Index dimajukan dulu: jika Drop milik T panic, state tetap konsisten
        // SAFETY: lihat `remove`
        unsafe { slots::destroy(&mut self.slots[head]) };
        true
    }

    /// Borrow elemen tertua tanpa mengubah state.
    #[inline]
    pub fn peek_ref(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: head terisi karena len > 0
        Some(unsafe { slots::get(&self.slots[self.head]) })
    }

    /// Salinan elemen tertua, urutan yang sama dengan `remove`.
    #[inline]
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.peek_ref().cloned()
    }

    /// Drop semua elemen, dari yang tertua.
    pub fn clear(&mut self) {
        while self.discard() {}
    }

    /// Iterasi elemen dari tertua ke terbaru.
    pub fn iter(&self) -> Iter<'_, 'a, T> {
        Iter {
            ring: self,
            index: self.head,
            remaining: self.len,
        }
    }

    /// Jumlah elemen dalam buffer
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Kapasitas buffer
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }
}

impl<T> Drop for RingBuffer<'_, T> {
    fn drop(&mut self) {
        if self.len > 0 {
            debug!(live = self.len, "dropping remaining elements");
        }
        // Storage Owned dibebaskan oleh Box setelah ini; Borrowed tidak
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("storage", &self.slots.kind())
            .field("len", &self.len)
            .field("elements", &DebugElements(self))
            .finish()
    }
}

struct DebugElements<'r, 'a, T>(&'r RingBuffer<'a, T>);

impl<T: fmt::Debug> fmt::Debug for DebugElements<'_, '_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Iterator dari [`RingBuffer::iter`].
pub struct Iter<'r, 'a, T> {
    ring: &'r RingBuffer<'a, T>,
    index: usize,
    remaining: usize,
}

impl<'r, T> Iterator for Iter<'r, '_, T> {
    type Item = &'r T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ring = self.ring;
        let index = self.index;
        self.index = ring.advance(index);
        self.remaining -= 1;
        // SAFETY: index masih di dalam range terisi, dan `&'r` pada ring
        // mencegah mutasi selama iterator hidup
        Some(unsafe { slots::get(&ring.slots[index]) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, '_, T> {}

impl<'r, 'a, T> IntoIterator for &'r RingBuffer<'a, T> {
    type Item = &'r T;
    type IntoIter = Iter<'r, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
