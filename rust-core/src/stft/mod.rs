//! Streaming STFT: framing, accumulation, history and queries

pub mod accumulator;
pub mod engine;
pub mod frame;
pub mod history;

pub use accumulator::SpectralAccumulator;
pub use engine::{FeedReport, Stft};
pub use frame::{FrameAssembler, PushInterrupted, Sample};
pub use history::SpectrumHistory;
