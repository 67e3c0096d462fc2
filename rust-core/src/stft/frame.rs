//! Overlapping frame assembly
//!
//! Samples are written into a fixed frame buffer. Each time the buffer fills up
//! it is handed to a callback, then its second half is shifted to the front so
//! the next frame overlaps the previous one by 50%.

use crate::error::{Result, StftError};

/// A sample format the engine can ingest
pub trait Sample: Copy {
    /// Convert to a normalized value in [-1, 1]
    fn to_unit(self) -> f64;
}

impl Sample for i16 {
    #[inline]
    fn to_unit(self) -> f64 {
        self as f64 / 32768.0
    }
}

impl Sample for f32 {
    #[inline]
    fn to_unit(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    #[inline]
    fn to_unit(self) -> f64 {
        self
    }
}

/// A frame callback failed partway through a push
///
/// Everything up to and including the failed frame was consumed; the failed
/// frame itself is dropped and the stream carries on from its second half.
#[derive(Debug, Clone, PartialEq)]
pub struct PushInterrupted {
    /// Samples consumed before stopping
    pub consumed: usize,

    /// Frames successfully handed to the callback
    pub completed: usize,

    pub error: StftError,
}

/// Accumulates samples into 50%-overlapping frames
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    /// Current frame, normalized samples
    frame: Vec<f64>,

    /// Write cursor into `frame`, in [0, frame_length]
    position: usize,
}

impl FrameAssembler {
    /// Create new assembler for frames of `frame_length` samples
    pub fn new(frame_length: usize) -> Self {
        Self {
            frame: vec![0.0; frame_length],
            position: 0,
        }
    }

    /// Push samples, calling `on_frame` for every frame that completes
    ///
    /// Stops at the first frame whose callback fails, so the caller can resume
    /// from `samples[consumed..]`.
    ///
    /// # Returns
    /// Number of frames completed by this call
    pub fn push<S, F>(
        &mut self,
        samples: &[S],
        mut on_frame: F,
    ) -> std::result::Result<usize, PushInterrupted>
    where
        S: Sample,
        F: FnMut(&[f64]) -> Result<()>,
    {
        let frame_length = self.frame.len();
        let hop = frame_length / 2;
        let mut remaining = samples;
        let mut completed = 0;

        while !remaining.is_empty() {
            let take = (frame_length - self.position).min(remaining.len());
            let (chunk, rest) = remaining.split_at(take);

            for (slot, &sample) in self.frame[self.position..self.position + take]
                .iter_mut()
                .zip(chunk)
            {
                *slot = sample.to_unit();
            }
            self.position += take;
            remaining = rest;

            if self.position == frame_length {
                let outcome = on_frame(&self.frame);

                // Half overlap: keep the newest half as the start of the next frame
                self.frame.copy_within(hop.., 0);
                self.position = hop;

                if let Err(error) = outcome {
                    return Err(PushInterrupted {
                        consumed: samples.len() - remaining.len(),
                        completed,
                        error,
                    });
                }
                completed += 1;
            }
        }

        Ok(completed)
    }

    /// Samples still needed before the next frame completes
    pub fn pending(&self) -> usize {
        self.frame.len() - self.position
    }

    /// Current write position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Frame length
    pub fn frame_length(&self) -> usize {
        self.frame.len()
    }

    /// Rewind the cursor; old samples are overwritten by the next pushes
    pub fn reset(&mut self) {
        self.position = 0;
    }
}
