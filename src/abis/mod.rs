pub mod v2;

pub use v2::{Swap, Sync};
