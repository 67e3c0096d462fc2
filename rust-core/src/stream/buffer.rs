//! Lock-free sample queue between a capture thread and the STFT
//!
//! The capture side pushes raw PCM without ever blocking; the analysis side
//! drains whatever has arrived into an engine.

use crate::error::{Result, StftError};
use crate::stft::{FeedReport, Stft};
use crate::stream::shared::SharedStft;
use ringbuf::{HeapConsumer, HeapProducer, HeapRb};
use tracing::warn;

/// Samples moved from the queue into the engine per feed
const DRAIN_CHUNK: usize = 1024;

/// Single-producer single-consumer PCM queue
pub struct SampleQueue {
    producer: HeapProducer<i16>,
    consumer: HeapConsumer<i16>,
    capacity: usize,
}

impl SampleQueue {
    /// Create new queue
    ///
    /// # Arguments
    /// * `capacity` - Queue capacity in samples, raised to 1 if zero
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let rb = HeapRb::<i16>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Split into producer and consumer ends
    pub fn split(self) -> (SampleProducer, SampleConsumer) {
        (
            SampleProducer {
                producer: self.producer,
                capacity: self.capacity,
            },
            SampleConsumer {
                consumer: self.consumer,
                scratch: vec![0; DRAIN_CHUNK.min(self.capacity)],
            },
        )
    }

    /// Get queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Capture end of the queue
pub struct SampleProducer {
    producer: HeapProducer<i16>,
    capacity: usize,
}

impl SampleProducer {
    /// Queue samples
    ///
    /// # Returns
    /// Number of samples actually queued. When the queue is full the rest are
    /// dropped and logged; the capture thread never waits.
    pub fn write(&mut self, samples: &[i16]) -> usize {
        let written = self.producer.push_slice(samples);
        if written < samples.len() {
            warn!(
                dropped = samples.len() - written,
                capacity = self.capacity,
                "sample queue full, dropping samples"
            );
        }
        written
    }

    /// Get number of free slots
    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }

    /// Get queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Analysis end of the queue
pub struct SampleConsumer {
    consumer: HeapConsumer<i16>,
    scratch: Vec<i16>,
}

impl SampleConsumer {
    /// Feed everything currently queued into `stft`
    pub fn drain_into(&mut self, stft: &mut Stft) -> Result<FeedReport> {
        self.drain_with(|chunk| stft.feed(chunk))
    }

    /// Feed everything currently queued into a shared engine
    ///
    /// The lock is taken once per chunk, so a polling reader is never held off
    /// for a whole backlog.
    pub fn drain_into_shared(&mut self, stft: &SharedStft) -> Result<FeedReport> {
        self.drain_with(|chunk| stft.feed(chunk))
    }

    /// Pop chunks and hand them to `feed` until the queue is empty
    ///
    /// An interrupted feed stops the drain; its report is widened to cover the
    /// whole drain. Samples of that chunk past `report.accepted` are discarded.
    fn drain_with<F>(&mut self, mut feed: F) -> Result<FeedReport>
    where
        F: FnMut(&[i16]) -> Result<FeedReport>,
    {
        let mut report = FeedReport::default();
        loop {
            let n = self.consumer.pop_slice(&mut self.scratch);
            if n == 0 {
                return Ok(report);
            }
            match feed(&self.scratch[..n]) {
                Ok(chunk) => report = report.merge(chunk),
                Err(StftError::Interrupted { report: partial, source }) => {
                    return Err(StftError::Interrupted {
                        report: report.merge(partial),
                        source,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Get number of queued samples
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }
}
