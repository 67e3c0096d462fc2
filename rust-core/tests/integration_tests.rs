//! Integration tests for stft-stream

use std::f64::consts::PI;
use stft_stream::{
    ConfigError, RealFft, Result, SampleQueue, SharedStft, Stft, StftConfig, StftError,
    WindowType,
};

/// Generate 16-bit PCM of a sine sitting exactly on `bin`
fn generate_tone(frame_length: usize, bin: usize, len: usize, amplitude: f64) -> Vec<i16> {
    (0..len)
        .map(|n| {
            let phase = 2.0 * PI * bin as f64 * n as f64 / frame_length as f64;
            (amplitude * 32767.0 * phase.sin()).round() as i16
        })
        .collect()
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
        .map(|(i, _)| i)
        .unwrap()
}

#[test]
fn test_configuration_errors() {
    assert!(matches!(
        Stft::with_frame_length(100, 1),
        Err(StftError::Config(ConfigError::InvalidValue { .. }))
    ));
    assert!(matches!(
        Stft::with_frame_length(1024, 0),
        Err(StftError::Config(ConfigError::InvalidValue { .. }))
    ));
    assert!(Stft::with_frame_length(1024, 1).is_ok());
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
        frame_length = 512
        min_feed_size = 2048
        sample_rate = 16000.0
        window = "blackman"
    "#;

    let config = StftConfig::from_toml_str(toml_str).expect("Failed to parse TOML");
    let stft = Stft::new(config).unwrap();

    assert_eq!(stft.num_bins(), 257);
    assert_eq!(stft.history().capacity(), 8);
    assert_eq!(stft.config().window, WindowType::Blackman);
    assert_eq!(stft.bin_to_hz(32), 1000.0);
}

#[test]
fn test_pcm_tone_peak() {
    let frame_length = 2048;
    let bin = 100;
    let mut stft = Stft::with_frame_length(frame_length, 1).unwrap();

    stft.feed(&generate_tone(frame_length, bin, frame_length * 3, 1.0))
        .unwrap();

    let spectrum = stft.amplitude_spectrum().to_vec();
    assert_eq!(spectrum.len(), frame_length / 2 + 1);
    assert!(spectrum.iter().all(|&p| p >= 0.0));
    assert_eq!(argmax(&spectrum), bin);
    assert!((spectrum[bin] - 1.0).abs() < 0.05);

    let db = stft.amplitude_spectrum_db();
    assert!(db[bin].abs() < 0.25);
    assert!(db[bin + 50] < -80.0);
}

#[test]
fn test_overlap_frames_completed() {
    let frame_length = 1024;
    let mut stft = Stft::with_frame_length(frame_length, 1).unwrap();

    let report = stft.feed(&vec![0i16; frame_length]).unwrap();
    assert_eq!(report.frames_completed, 1);

    stft.clear();
    let report = stft
        .feed(&vec![0i16; frame_length + frame_length / 2])
        .unwrap();
    assert_eq!(report.frames_completed, 2);
}

/// Records every frame it is asked to transform, transform is a no-op
struct RecordingFft {
    len: usize,
    frames: std::sync::Arc<std::sync::Mutex<Vec<Vec<f64>>>>,
}

impl RealFft for RecordingFft {
    fn len(&self) -> usize {
        self.len
    }

    fn forward(&mut self, buffer: &mut [f64]) -> Result<()> {
        self.frames.lock().unwrap().push(buffer.to_vec());
        Ok(())
    }
}

#[test]
fn test_second_frame_overlaps_first() {
    let frame_length = 16;
    let frames = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let fft = RecordingFft {
        len: frame_length,
        frames: frames.clone(),
    };
    let config = StftConfig {
        window: WindowType::Rectangular,
        ..StftConfig::new(frame_length, 1)
    };
    let mut stft = Stft::with_fft(config, Box::new(fft)).unwrap();

    let samples: Vec<i16> = (0..24).map(|i| (i * 1000) as i16).collect();
    assert_eq!(stft.feed(&samples).unwrap().frames_completed, 2);

    let frames = frames.lock().unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1][..8], frames[0][8..]);
    assert_eq!(frames[1][8], 16000.0 / 32768.0);
}

#[test]
fn test_injected_fft_length_must_match() {
    let fft = RecordingFft {
        len: 32,
        frames: Default::default(),
    };
    let result = Stft::with_fft(StftConfig::new(64, 1), Box::new(fft));
    assert!(matches!(
        result,
        Err(StftError::Config(ConfigError::FftLengthMismatch {
            expected: 64,
            actual: 32
        }))
    ));
}

#[test]
fn test_history_ring_wraps() {
    // 8-sample frames, history = ceil(9 / 4) = 3
    let frame_length = 8;
    let mut stft = Stft::with_frame_length(frame_length, 9).unwrap();
    assert_eq!(stft.history().capacity(), 3);

    // Every frame gets a distinct DC level; a single-frame query returns
    // exactly that frame's spectrum
    let mut per_frame = Vec::new();
    stft.feed(&[1000i16; 4]).unwrap();
    for level in 1..=4 {
        let report = stft.feed(&[level * 4000i16; 4]).unwrap();
        assert_eq!(report.frames_completed, 1);
        per_frame.push(stft.amplitude_spectrum().to_vec());
    }

    let history = stft.history();
    assert_eq!(history.len(), 3);

    let newest_first: Vec<Vec<f64>> = history.latest(3).map(|row| row.to_vec()).collect();
    let expected: Vec<Vec<f64>> = per_frame.iter().rev().take(3).cloned().collect();
    assert_eq!(newest_first, expected);

    // The very first frame has been overwritten
    assert!(history.latest(3).all(|row| row.to_vec() != per_frame[0]));
}

#[test]
fn test_irregular_polling_averages() {
    let frame_length = 256;
    let tone = generate_tone(frame_length, 16, frame_length * 16, 0.5);
    let mut stft = Stft::with_frame_length(frame_length, 1).unwrap();

    // Odd-sized feeds and polls at random points all see the same stationary level
    let mut polls = Vec::new();
    for (i, chunk) in tone.chunks(333).enumerate() {
        stft.feed(chunk).unwrap();
        if i % 3 == 2 && stft.frames_since_query() > 0 {
            polls.push(stft.amplitude_spectrum()[16]);
        }
    }

    assert!(polls.len() >= 3);
    for power in polls {
        assert!((power - 0.25).abs() < 0.02);
    }
}

#[test]
fn test_idempotent_queries() {
    let mut stft = Stft::with_frame_length(512, 1).unwrap();
    stft.feed(&generate_tone(512, 20, 2000, 0.7)).unwrap();

    let a = stft.amplitude_spectrum().to_vec();
    let b = stft.amplitude_spectrum().to_vec();
    let a_db = stft.amplitude_spectrum_db().to_vec();
    let b_db = stft.amplitude_spectrum_db().to_vec();

    assert_eq!(a, b);
    assert_eq!(a_db, b_db);
    for (d, l) in a_db.iter().zip(&a) {
        assert_eq!(*d, 10.0 * l.log10());
    }
}

#[test]
fn test_clear_then_query_is_silent() {
    let mut stft = Stft::with_frame_length(256, 1024).unwrap();
    stft.feed(&generate_tone(256, 7, 1024, 0.9)).unwrap();
    stft.amplitude_spectrum();
    stft.feed(&generate_tone(256, 7, 300, 0.9)).unwrap();

    stft.clear();

    assert!(stft.amplitude_spectrum().iter().all(|&p| p == 0.0));
    assert!(stft.history().is_empty());
}

#[test]
fn test_capture_thread_pipeline() {
    let frame_length = 512;
    let (mut producer, mut consumer) = SampleQueue::new(frame_length * 16).split();
    let shared = SharedStft::new(Stft::with_frame_length(frame_length, frame_length * 4).unwrap());
    let tone = generate_tone(frame_length, 40, frame_length * 8, 0.8);

    let capture = std::thread::spawn(move || {
        for chunk in tone.chunks(480) {
            producer.write(chunk);
        }
    });
    capture.join().unwrap();

    let report = consumer.drain_into_shared(&shared).unwrap();
    assert_eq!(report.accepted, frame_length * 8);
    assert_eq!(report.frames_completed, 15);

    let (frames, spectrum) = shared.poll();
    assert_eq!(frames, 15);
    assert_eq!(argmax(&spectrum), 40);
    assert_eq!(shared.history().nrows(), 8);
}
