//! Slot storage: region `MaybeUninit<T>` berukuran tetap
//!
//! Slot tidak pernah di-default-initialize. Elemen dibangun in-place saat
//! insert dan di-drop in-place saat remove, jadi hanya slot yang sedang terisi
//! yang berisi data valid.

use std::mem::MaybeUninit;
use std::ops::{Deref, DerefMut};

use crate::error::Result;

/// Sumber memori untuk slot ring buffer.
pub(crate) enum Slots<'a, T> {
    /// Dialokasikan sekali saat konstruksi, dibebaskan saat drop
    Owned(Box<[MaybeUninit<T>]>),
    /// Memori milik caller, tidak pernah dibebaskan oleh ring buffer
    Borrowed(&'a mut [MaybeUninit<T>]),
}

impl<T> Slots<'_, T> {
    /// Alokasi `capacity` slot kosong di heap.
    ///
    /// Pakai `try_reserve_exact` supaya kegagalan alokasi jadi `Error::Alloc`,
    /// bukan abort.
    pub(crate) fn allocate(capacity: usize) -> Result<Self> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(capacity)?;
        buffer.resize_with(capacity, MaybeUninit::uninit);
        Ok(Slots::Owned(buffer.into_boxed_slice()))
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Slots::Owned(_) => "owned",
            Slots::Borrowed(_) => "borrowed",
        }
    }
}

impl<T> Deref for Slots<'_, T> {
    type Target = [MaybeUninit<T>];

    fn deref(&self) -> &Self::Target {
        match self {
            Slots::Owned(slots) => slots,
            Slots::Borrowed(slots) => slots,
        }
    }
}

impl<T> DerefMut for Slots<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Slots::Owned(slots) => slots,
            Slots::Borrowed(slots) => slots,
        }
    }
}

/// Bangun elemen in-place di slot kosong.
///
/// Slot harus kosong; elemen lama (jika ada) akan bocor, bukan di-drop.
#[inline(always)]
pub(crate) fn construct<T>(slot: &mut MaybeUninit<T>, value: T) {
    slot.write(value);
}

/// Pindahkan elemen keluar dari slot. Setelah ini slot dianggap kosong.
///
/// # Safety
/// Slot harus berisi elemen hidup, dan tidak boleh dibaca lagi sebelum
/// `construct` berikutnya.
#[inline(always)]
pub(crate) unsafe fn take<T>(slot: &mut MaybeUninit<T>) -> T {
    slot.assume_init_read()
}

/// Drop elemen in-place. Setelah ini slot dianggap kosong.
///
/// # Safety
/// Sama seperti [`take`]: slot harus berisi elemen hidup, tepat satu kali.
#[inline(always)]
pub(crate) unsafe fn destroy<T>(slot: &mut MaybeUninit<T>) {
    slot.assume_init_drop();
}

/// Borrow elemen hidup di slot.
///
/// # Safety
/// Slot harus berisi elemen hidup selama borrow ini berlaku.
#[inline(always)]
pub(crate) unsafe fn get<T>(slot: &MaybeUninit<T>) -> &T {
    slot.assume_init_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_exact_capacity() {
        let slots: Slots<'_, String> = Slots::allocate(7).unwrap();
        assert_eq!(slots.len(), 7);
        assert_eq!(slots.kind(), "owned");
    }

    #[test]
    fn test_allocate_zero_sized_type() {
        let slots: Slots<'_, ()> = Slots::allocate(1024).unwrap();
        assert_eq!(slots.len(), 1024);
    }

    #[test]
    fn test_allocate_overflow_reports_error() {
        let result: Result<Slots<'_, u64>> = Slots::allocate(usize::MAX);
        assert!(matches!(result, Err(crate::Error::Alloc(_))));
    }

    #[test]
    fn test_construct_take_destroy() {
        let mut backing = [MaybeUninit::<u32>::uninit(); 2];
        let mut slots = Slots::Borrowed(&mut backing[..]);
        assert_eq!(slots.kind(), "borrowed");

        construct(&mut slots[0], 11);
        construct(&mut slots[1], 22);

        unsafe {
            assert_eq!(*get(&slots[0]), 11);
            assert_eq!(take(&mut slots[0]), 11);
            destroy(&mut slots[1]);
        }
    }
}
