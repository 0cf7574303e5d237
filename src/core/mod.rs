//! Core module: FIFO Ring Buffer dengan kapasitas tetap
//!
//! Prinsip desain:
//! - No-Allocation: storage dialokasikan (atau dipinjam) sekali saat init
//! - In-place lifecycle: slot `MaybeUninit`, elemen dibangun saat insert dan
//!   di-drop saat remove / teardown, tidak pernah di-default-initialize
//! - Single-owner: tidak ada lock di sini, lihat `crate::sync` untuk itu

mod mmap_storage;
mod ring_buffer;
mod slots;

pub use mmap_storage::MmapSlots;
pub use ring_buffer::{Iter, RingBuffer};
