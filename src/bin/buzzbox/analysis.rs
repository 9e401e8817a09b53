//! Level and harmonic analysis of rendered audio.

use std::f32::consts::TAU;

use buzzbox::dsp::gain::gain_to_db;
use rustfft::{num_complex::Complex, FftPlanner};

/// Analysis window length. Long enough to resolve low fundamentals.
pub const FFT_SIZE: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    pub peak: f32,
    pub rms: f32,
    pub dc: f32,
}

pub fn levels(samples: &[f32]) -> Levels {
    if samples.is_empty() {
        return Levels {
            peak: 0.0,
            rms: 0.0,
            dc: 0.0,
        };
    }

    let len = samples.len() as f32;
    let peak = samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    let rms = (samples.iter().map(|x| x * x).sum::<f32>() / len).sqrt();
    let dc = samples.iter().sum::<f32>() / len;

    Levels { peak, rms, dc }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicReport {
    pub fundamental_hz: f32,
    /// Level of harmonics 2, 3, ... relative to the fundamental, in dB
    pub harmonics_db: Vec<f32>,
    /// Total harmonic distortion over the reported harmonics, in percent
    pub thd_percent: f32,
}

/// Nearest frequency that lands exactly on an analysis bin.
pub fn bin_centered(freq: f32, sample_rate: f32) -> f32 {
    let bin_width = sample_rate / FFT_SIZE as f32;
    (freq / bin_width).round().max(1.0) * bin_width
}

/// Measure `count` harmonics above the fundamental in the last
/// [`FFT_SIZE`] samples. `None` if there is not enough audio or no
/// fundamental.
pub fn harmonics(
    samples: &[f32],
    sample_rate: f32,
    fundamental_hz: f32,
    count: usize,
) -> Option<HarmonicReport> {
    if samples.len() < FFT_SIZE {
        return None;
    }

    let window = &samples[samples.len() - FFT_SIZE..];
    let mut spectrum: Vec<Complex<f32>> = window
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let hann = 0.5 - 0.5 * (TAU * i as f32 / FFT_SIZE as f32).cos();
            Complex::new(s * hann, 0.0)
        })
        .collect();

    let fft = FftPlanner::new().plan_fft_forward(FFT_SIZE);
    fft.process(&mut spectrum);

    let nyquist_bin = FFT_SIZE / 2;
    // Peak over the bin and its neighbours, since the Hann main lobe is 2 bins wide
    let magnitude = |bin: usize| -> f32 {
        (bin.saturating_sub(1)..=(bin + 1).min(nyquist_bin))
            .map(|b| spectrum[b].norm())
            .fold(0.0, f32::max)
    };

    let fundamental_bin = (fundamental_hz * FFT_SIZE as f32 / sample_rate).round() as usize;
    if fundamental_bin == 0 || fundamental_bin >= nyquist_bin {
        return None;
    }

    let fundamental = magnitude(fundamental_bin);
    if fundamental <= f32::EPSILON {
        return None;
    }

    let mut harmonics_db = Vec::with_capacity(count);
    let mut power = 0.0f32;
    for harmonic in 2..=count + 1 {
        let bin = fundamental_bin * harmonic;
        if bin >= nyquist_bin {
            break;
        }
        let ratio = magnitude(bin) / fundamental;
        power += ratio * ratio;
        harmonics_db.push(gain_to_db(ratio));
    }

    Some(HarmonicReport {
        fundamental_hz,
        harmonics_db,
        thd_percent: power.sqrt() * 100.0,
    })
}
