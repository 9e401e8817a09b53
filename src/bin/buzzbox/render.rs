//! Offline render of a test tone through the engine.

use std::f32::consts::TAU;

use buzzbox::{io::AudioBuffer, DistortionEngine, ProcessSpec, MAX_BLOCK_SIZE};
use color_eyre::eyre::{ensure, Result as EyreResult};

use super::analysis::{self, FFT_SIZE};
use super::ControlArgs;

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    controls: ControlArgs,

    /// Test tone frequency in Hz (snapped to the nearest analysis bin)
    #[arg(long, default_value_t = 440.0)]
    freq: f32,

    /// Test tone peak amplitude
    #[arg(long, default_value_t = 0.8)]
    amplitude: f32,

    /// Seconds of audio to render
    #[arg(long, default_value_t = 1.0)]
    seconds: f32,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 48_000.0)]
    sample_rate: f32,

    /// Block size handed to the engine per call
    #[arg(long, default_value_t = 512)]
    block_size: usize,

    /// Number of harmonics to report
    #[arg(long, default_value_t = 8)]
    harmonics: usize,
}

pub fn run(args: &RenderArgs) -> EyreResult<()> {
    ensure!(args.sample_rate > 0.0, "sample rate must be positive");
    ensure!(
        (1..=MAX_BLOCK_SIZE).contains(&args.block_size),
        "block size must be between 1 and {MAX_BLOCK_SIZE}"
    );

    let total_frames = (args.seconds * args.sample_rate) as usize;
    ensure!(
        total_frames >= FFT_SIZE,
        "need at least {FFT_SIZE} samples for analysis, got {total_frames}"
    );

    let freq = analysis::bin_centered(args.freq, args.sample_rate);
    let input: Vec<f32> = (0..total_frames)
        .map(|i| args.amplitude * (TAU * freq * i as f32 / args.sample_rate).sin())
        .collect();

    let mut engine = DistortionEngine::new();
    args.controls.apply(&engine.params());
    engine.prepare(&ProcessSpec::new(args.sample_rate, args.block_size, 1));

    let params = engine.params().snapshot();
    println!("=== buzzbox render ===");
    println!("Model: {}", params.model);
    println!("Drive: {:.1} dB", params.drive_db);
    println!("Output: {:.1} dB", params.output_db);
    println!("Mix: {:.2}", params.mix);
    println!("Tone: {:.2} Hz at {:.2} peak", freq, args.amplitude);
    println!();

    let mut output = Vec::with_capacity(total_frames);
    let mut block = AudioBuffer::new(1, 0);
    for chunk in input.chunks(args.block_size) {
        block.copy_from_interleaved(chunk);
        engine.process_replacing(&mut block.buffers);
        output.extend_from_slice(block.channel(0));
    }

    let input_levels = analysis::levels(&input);
    let output_levels = analysis::levels(&output);
    println!(
        "Input:  peak {:.4}  rms {:.4}  dc {:+.5}",
        input_levels.peak, input_levels.rms, input_levels.dc
    );
    println!(
        "Output: peak {:.4}  rms {:.4}  dc {:+.5}",
        output_levels.peak, output_levels.rms, output_levels.dc
    );

    match analysis::harmonics(&output, args.sample_rate, freq, args.harmonics) {
        Some(report) => {
            println!();
            println!("Harmonics (relative to fundamental):");
            for (offset, level) in report.harmonics_db.iter().enumerate() {
                println!("  H{:<2} {:>8.2} dB", offset + 2, level);
            }
            println!("THD: {:.3} %", report.thd_percent);
        }
        None => println!("No fundamental found in output"),
    }

    Ok(())
}
