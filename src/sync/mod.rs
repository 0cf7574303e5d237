//! Sync module: thread-safe wrapper di atas `core::RingBuffer`
//!
//! Prinsip desain:
//! - Backpressure: dua counting semaphore (`free` / `filled`), bukan polling
//! - Lock pendek: mutex hanya membungkus satu mutasi ring buffer
//! - Instance-private: semua primitive anonymous, tidak ada nama global

mod bounded;
mod semaphore;

pub use bounded::BoundedQueue;
pub use semaphore::Semaphore;
