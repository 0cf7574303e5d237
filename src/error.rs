//! Error untuk konstruksi buffer
//!
//! Buffer penuh / kosong BUKAN error: itu hasil normal yang dilaporkan lewat
//! `Err(value)`, `None`, atau `false`. Enum ini hanya untuk kegagalan saat
//! membangun ring buffer atau queue.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Kegagalan konstruksi. Tidak ada buffer yang dihasilkan jika ini muncul.
#[derive(Debug, Error)]
pub enum Error {
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    #[error("storage holds {available} slots but capacity {requested} was requested")]
    StorageTooSmall { available: usize, requested: usize },

    #[error("capacity {0} overflows the addressable size for this element type")]
    CapacityOverflow(usize),

    #[error("failed to allocate slot storage: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("failed to map slot storage: {0}")]
    Map(#[from] io::Error),

    #[error("mapped region is not aligned for element type (align {align})")]
    Misaligned { align: usize },

    #[error("ring buffer still holds {0} elements")]
    NotEmpty(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
