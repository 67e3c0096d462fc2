//! Multi-threaded front ends for the STFT engine

pub mod buffer;
pub mod shared;

pub use buffer::{SampleConsumer, SampleProducer, SampleQueue};
pub use shared::SharedStft;
