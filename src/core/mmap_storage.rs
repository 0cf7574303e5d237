//! Memory-mapped slot region untuk storage dari luar ring buffer
//!
//! Region di-mmap secara anonymous (tidak ada file, tidak persisten). Ring
//! buffer yang dibangun di atasnya lewat `RingBuffer::from_storage` tidak
//! memiliki memori ini: mapping baru dilepas saat `MmapSlots` di-drop, dan
//! borrow checker menjamin itu terjadi setelah ring buffer-nya di-drop.

use memmap2::{MmapMut, MmapOptions};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};

use crate::error::{Error, Result};
use crate::trace::debug;

/// Region mmap yang cukup untuk `capacity` elemen `T`.
pub struct MmapSlots<T> {
    mmap: MmapMut,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> MmapSlots<T> {
    /// Map region anonymous untuk `capacity` slot.
    ///
    /// # Errors
    /// `Error::CapacityOverflow` jika ukuran total melebihi `isize::MAX`,
    /// `Error::Map` jika mmap gagal, `Error::Misaligned` jika alignment `T`
    /// lebih besar dari alignment halaman.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        let bytes = mem::size_of::<T>()
            .checked_mul(capacity)
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or(Error::CapacityOverflow(capacity))?;

        // Mapping dengan panjang 0 ditolak kernel (ZST tetap butuh pointer valid)
        let mmap = MmapOptions::new().len(bytes.max(1)).map_anon()?;

        let align = mem::align_of::<T>();
        if mmap.as_ptr() as usize % align != 0 {
            return Err(Error::Misaligned { align });
        }

        debug!(capacity, bytes, "mapped slot region");

        Ok(Self {
            mmap,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Jumlah slot dalam region
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// View slot kosong untuk diberikan ke `RingBuffer::from_storage`.
    pub fn slots(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: mapping minimal `size_of::<T>() * capacity` bytes, alignment
        // sudah dicek di `new`, dan `MaybeUninit` tidak butuh isi valid
        unsafe {
            std::slice::from_raw_parts_mut(
                self.mmap.as_mut_ptr() as *mut MaybeUninit<T>,
                self.capacity,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RingBuffer;

    #[test]
    fn test_mmap_slots_basic() {
        let mut region: MmapSlots<u64> = MmapSlots::new(4096).unwrap();
        assert_eq!(region.capacity(), 4096);
        assert_eq!(region.slots().len(), 4096);

        let mut rb = RingBuffer::from_storage(region.slots(), 4096).unwrap();
        for i in 0..4096u64 {
            rb.insert(i).unwrap();
        }
        assert!(rb.insert(4096).is_err());
        assert_eq!(rb.remove(), Some(0));
    }

    #[test]
    fn test_mmap_slots_reused_after_ring_dropped() {
        let mut region: MmapSlots<String> = MmapSlots::new(8).unwrap();

        {
            let mut rb = RingBuffer::from_storage(region.slots(), 8).unwrap();
            rb.insert("Hello, fifobuf!".to_string()).unwrap();
            rb.insert("leftover".to_string()).unwrap();
            assert_eq!(rb.remove().as_deref(), Some("Hello, fifobuf!"));
        }

        let mut rb = RingBuffer::from_storage(region.slots(), 2).unwrap();
        assert!(rb.is_empty());
        rb.insert("again".to_string()).unwrap();
        assert_eq!(rb.peek().as_deref(), Some("again"));
    }

    #[test]
    fn test_mmap_slots_errors() {
        assert!(matches!(MmapSlots::<u8>::new(0), Err(Error::ZeroCapacity)));
        assert!(matches!(
            MmapSlots::<u64>::new(usize::MAX),
            Err(Error::CapacityOverflow(_))
        ));
    }

    #[test]
    fn test_mmap_slots_zero_sized() {
        let mut region: MmapSlots<()> = MmapSlots::new(3).unwrap();
        let mut rb = RingBuffer::from_storage(region.slots(), 3).unwrap();
        rb.insert(()).unwrap();
        assert_eq!(rb.len(), 1);
    }
}
