//! fifobuf - Fixed-Capacity FIFO Ring Buffer
//!
//! Arsitektur:
//! - `core::RingBuffer`: single-owner, non-blocking, slot `MaybeUninit`
//! - `core::MmapSlots`: region mmap anonymous sebagai storage dari luar
//! - `sync::BoundedQueue`: MPMC, blocking + non-blocking, backpressure lewat
//!   dua counting semaphore
//!
//! Buffer penuh atau kosong adalah hasil normal (`Err(value)` / `None`), bukan
//! error. [`Error`] hanya muncul saat konstruksi.
//!
//! ```
//! use fifobuf::core::RingBuffer;
//!
//! let mut rb = RingBuffer::new(2).unwrap();
//! rb.insert("a").unwrap();
//! rb.insert("b").unwrap();
//! assert_eq!(rb.insert("c"), Err("c"));
//! assert_eq!(rb.peek(), Some("a"));
//! assert_eq!(rb.remove(), Some("a"));
//! ```

pub mod core;
mod error;
pub mod sync;
pub mod trace;

pub use error::{Error, Result};
