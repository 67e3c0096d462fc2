//! Streaming STFT engine
//!
//! Samples go in through [`Stft::feed`], averaged spectra come out through
//! [`Stft::amplitude_spectrum`] and [`Stft::amplitude_spectrum_db`]. The engine
//! is synchronous and holds no locks: one instance per stream, and callers
//! sharing it across threads must serialize access themselves (or use
//! [`crate::SharedStft`]).

use super::accumulator::SpectralAccumulator;
use super::frame::{FrameAssembler, Sample};
use super::history::SpectrumHistory;
use crate::config::StftConfig;
use crate::error::{OverflowWarning, Result, StftError};
use crate::spectrum::{FrameProcessor, RealFft, RealFftEngine};
use tracing::{debug, trace, warn};

/// Outcome of a single feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedReport {
    /// Samples actually consumed
    pub accepted: usize,

    /// Frames completed (and analyzed) during the feed
    pub frames_completed: usize,

    /// Set when the caller asked for more samples than it supplied
    pub overflow: Option<OverflowWarning>,
}

impl FeedReport {
    /// Combine two consecutive feeds, keeping the first overflow seen
    pub fn merge(self, other: FeedReport) -> FeedReport {
        FeedReport {
            accepted: self.accepted + other.accepted,
            frames_completed: self.frames_completed + other.frames_completed,
            overflow: self.overflow.or(other.overflow),
        }
    }
}

/// Streaming short-time Fourier transform
pub struct Stft {
    config: StftConfig,
    assembler: FrameAssembler,
    processor: FrameProcessor,
    accumulator: SpectralAccumulator,
    history: SpectrumHistory,

    /// Spectrum of the frame being processed
    frame_spectrum: Vec<f64>,

    /// Frames analyzed over the engine lifetime
    total_frames: u64,
}

impl Stft {
    /// Create new engine backed by the realfft transform
    pub fn new(config: StftConfig) -> Result<Self> {
        config.validate()?;
        let fft = Box::new(RealFftEngine::new(config.frame_length));
        Self::with_fft(config, fft)
    }

    /// Create new engine with a caller-supplied transform
    ///
    /// The transform length must equal `config.frame_length`.
    pub fn with_fft(config: StftConfig, fft: Box<dyn RealFft + Send>) -> Result<Self> {
        config.validate()?;

        let frame_length = config.frame_length;
        let num_bins = config.num_bins();
        let processor = FrameProcessor::new(frame_length, config.window, fft)?;
        let history = SpectrumHistory::new(config.history_size(), num_bins);

        debug!(
            frame_length,
            history = history.capacity(),
            window = %config.window,
            "STFT engine configured"
        );

        Ok(Self {
            assembler: FrameAssembler::new(frame_length),
            processor,
            accumulator: SpectralAccumulator::new(num_bins),
            history,
            frame_spectrum: vec![0.0; num_bins],
            total_frames: 0,
            config,
        })
    }

    /// Convenience constructor with default sample rate and window
    pub fn with_frame_length(frame_length: usize, min_feed_size: usize) -> Result<Self> {
        Self::new(StftConfig::new(frame_length, min_feed_size))
    }

    /// Feed every sample in `samples`
    pub fn feed<S: Sample>(&mut self, samples: &[S]) -> Result<FeedReport> {
        self.feed_count(samples, samples.len())
    }

    /// Feed the first `count` samples
    ///
    /// Asking for more than `samples.len()` is not fatal: the count is clamped,
    /// the condition is logged, and the report carries an [`OverflowWarning`].
    ///
    /// If the transform fails, the feed stops at that frame and returns
    /// [`StftError::Interrupted`] with the progress made so far. The failed
    /// frame is dropped; frames before it stay in the average and history.
    pub fn feed_count<S: Sample>(&mut self, samples: &[S], count: usize) -> Result<FeedReport> {
        let overflow = if count > samples.len() {
            let warning = OverflowWarning {
                requested: count,
                available: samples.len(),
            };
            warn!(%warning, "clamping STFT feed");
            Some(warning)
        } else {
            None
        };

        let accepted = count.min(samples.len());
        let processor = &mut self.processor;
        let accumulator = &mut self.accumulator;
        let history = &mut self.history;
        let spectrum = &mut self.frame_spectrum;
        let total_frames = &mut self.total_frames;

        let outcome = self.assembler.push(&samples[..accepted], |frame| {
            processor.process(frame, spectrum.as_mut_slice())?;
            accumulator.add(spectrum.as_slice());
            history.push(spectrum.as_slice());
            *total_frames += 1;
            trace!(frame = *total_frames, "frame analyzed");
            Ok(())
        });

        match outcome {
            Ok(frames_completed) => Ok(FeedReport {
                accepted,
                frames_completed,
                overflow,
            }),
            Err(interrupted) => {
                let report = FeedReport {
                    accepted: interrupted.consumed,
                    frames_completed: interrupted.completed,
                    overflow,
                };
                warn!(
                    accepted = report.accepted,
                    error = %interrupted.error,
                    "frame dropped, feed stopped"
                );
                Err(StftError::Interrupted {
                    report,
                    source: Box::new(interrupted.error),
                })
            }
        }
    }

    /// Average power spectrum of the frames analyzed since the previous query
    ///
    /// Resets the pending count. With no new frames, the previous result is
    /// returned unchanged.
    pub fn amplitude_spectrum(&mut self) -> &[f64] {
        self.accumulator.linear()
    }

    /// Same as [`Stft::amplitude_spectrum`], as `10*log10(power)`
    ///
    /// Bins with zero power read as negative infinity.
    pub fn amplitude_spectrum_db(&mut self) -> &[f64] {
        self.accumulator.decibel()
    }

    /// Frames analyzed since the previous query
    ///
    /// Read this before querying: the query resets it to 0.
    pub fn frames_since_query(&self) -> usize {
        self.accumulator.frames()
    }

    /// Drop buffered samples, pending frames, cached averages and history
    ///
    /// The window and configuration are kept.
    pub fn clear(&mut self) {
        self.assembler.reset();
        self.accumulator.clear();
        self.history.clear();
    }

    /// Per-frame spectra of the most recent frames
    pub fn history(&self) -> &SpectrumHistory {
        &self.history
    }

    /// Frames analyzed since construction
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Current configuration
    pub fn config(&self) -> &StftConfig {
        &self.config
    }

    /// Frame length in samples
    pub fn frame_length(&self) -> usize {
        self.config.frame_length
    }

    /// Number of frequency bins (frame_length/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.config.num_bins()
    }

    /// Samples still needed before the next frame completes
    pub fn samples_until_frame(&self) -> usize {
        self.assembler.pending()
    }

    /// Analysis window coefficients (unit mean)
    pub fn window(&self) -> &[f64] {
        self.processor.window()
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_to_hz(&self, bin: usize) -> f64 {
        bin as f64 * self.config.sample_rate / self.config.frame_length as f64
    }

    /// Frequency axis in Hz, one entry per bin
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        (0..self.num_bins()).map(|bin| self.bin_to_hz(bin)).collect()
    }
}
