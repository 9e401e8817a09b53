//! Live processing on the default audio devices.
//!
//! Input audio travels from the input callback to the output callback
//! through an rtrb ring buffer; the output callback runs the engine. Key
//! presses on the main thread write straight into the shared parameter
//! block.

use std::f32::consts::TAU;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use buzzbox::{
    io::AudioBuffer, DistortionEngine, DistortionModel, DistortionParams, ProcessSpec,
    MAX_BLOCK_SIZE,
};
use color_eyre::eyre::{ensure, eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use rtrb::{Consumer, RingBuffer};

use super::ControlArgs;

// Tunables
const RING_SECONDS: f32 = 0.1; // Input → output buffering
const DRIVE_STEP_DB: f32 = 1.0;
const OUTPUT_STEP_DB: f32 = 1.0;
const MIX_STEP: f32 = 0.05;

#[derive(clap::Args, Debug)]
pub struct LiveArgs {
    #[command(flatten)]
    controls: ControlArgs,

    /// Play an internal sine at this frequency instead of the input device
    #[arg(long)]
    tone: Option<f32>,

    /// Peak amplitude of the internal sine
    #[arg(long, default_value_t = 0.5)]
    amplitude: f32,
}

/// Where the output callback gets its dry signal from.
enum Source {
    Tone {
        phase: f32,
        increment: f32,
        amplitude: f32,
    },
    Input(Consumer<f32>),
}

impl Source {
    /// Fill every channel of `block` for its current frame count.
    fn fill(&mut self, block: &mut AudioBuffer) {
        let frames = block.num_frames();

        match self {
            Source::Tone {
                phase,
                increment,
                amplitude,
            } => {
                for i in 0..frames {
                    let sample = *amplitude * (TAU * *phase).sin();
                    *phase = (*phase + *increment).fract();
                    for channel in block.buffers.iter_mut() {
                        channel[i] = sample;
                    }
                }
            }
            Source::Input(consumer) => {
                // Underruns play silence rather than stalling the callback
                for i in 0..frames {
                    for channel in block.buffers.iter_mut() {
                        channel[i] = consumer.pop().unwrap_or(0.0);
                    }
                }
            }
        }
    }
}

pub fn run(args: &LiveArgs) -> EyreResult<()> {
    let host = cpal::default_host();
    let output_device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let output_config = output_device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    ensure!(
        output_config.sample_format() == cpal::SampleFormat::F32,
        "live mode requires an f32 output device, got {:?}",
        output_config.sample_format()
    );

    let sample_rate = output_config.sample_rate().0 as f32;
    let channels = output_config.channels() as usize;

    let params = Arc::new(DistortionParams::new());
    args.controls.apply(&params);

    let mut engine = DistortionEngine::with_params(Arc::clone(&params));
    engine.prepare(&ProcessSpec::new(sample_rate, MAX_BLOCK_SIZE, channels));

    println!("=== buzzbox live ===");
    println!("Sample rate: {} Hz", sample_rate);
    println!("Channels: {}", channels);

    // Kept alive for as long as the output stream runs
    let mut input_stream = None;

    let mut source = match args.tone {
        Some(freq) => {
            println!("Source: {:.1} Hz sine", freq);
            Source::Tone {
                phase: 0.0,
                increment: freq / sample_rate,
                amplitude: args.amplitude,
            }
        }
        None => {
            let (stream, consumer) = open_input(&host, sample_rate, channels)?;
            input_stream = Some(stream);
            Source::Input(consumer)
        }
    };

    let mut block = AudioBuffer::with_capacity(channels, MAX_BLOCK_SIZE);
    let output_stream = output_device.build_output_stream(
        &output_config.into(),
        move |data: &mut [f32], _| {
            for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                block.set_num_frames(chunk.len() / channels);
                source.fill(&mut block);
                engine.process_replacing(&mut block.buffers);
                block.copy_to_interleaved(chunk);
            }
        },
        |err| eprintln!("Audio error: {}", err),
        None,
    )?;

    output_stream.play()?;
    if let Some(stream) = &input_stream {
        stream.play()?;
    }

    println!();
    println!("Keys: 1/2/3 or m model | up/down drive | left/right mix | +/- output | q quit");
    control_loop(&params)
}

/// Open the default input and stream it into a ring buffer laid out in the
/// output's channel order.
fn open_input(
    host: &cpal::Host,
    sample_rate: f32,
    out_channels: usize,
) -> EyreResult<(cpal::Stream, Consumer<f32>)> {
    let device = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available (try --tone)"))?;
    let config = device
        .default_input_config()
        .wrap_err("failed to fetch default input config")?;
    ensure!(
        config.sample_format() == cpal::SampleFormat::F32,
        "live mode requires an f32 input device, got {:?}",
        config.sample_format()
    );
    ensure!(
        config.sample_rate().0 as f32 == sample_rate,
        "input runs at {} Hz but output at {} Hz",
        config.sample_rate().0,
        sample_rate
    );

    let in_channels = config.channels() as usize;
    println!("Source: input device ({} channels)", in_channels);

    let capacity = (sample_rate * RING_SECONDS) as usize * out_channels;
    let (mut producer, consumer) = RingBuffer::<f32>::new(capacity);

    let stream = device.build_input_stream(
        &config.into(),
        move |data: &[f32], _| {
            for frame in data.chunks_exact(in_channels) {
                // Mono inputs feed every output channel
                for channel in 0..out_channels {
                    // Full ring: the output side has stalled, drop input
                    let _ = producer.push(frame[channel.min(in_channels - 1)]);
                }
            }
        },
        |err| eprintln!("Audio input error: {}", err),
        None,
    )?;

    Ok((stream, consumer))
}

fn control_loop(params: &DistortionParams) -> EyreResult<()> {
    terminal::enable_raw_mode()?;
    let result = read_keys(params);
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn read_keys(params: &DistortionParams) -> EyreResult<()> {
    print_status(params)?;

    loop {
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Char('1') => params.set_model(DistortionModel::HardClip),
            KeyCode::Char('2') => params.set_model(DistortionModel::SoftClip),
            KeyCode::Char('3') => params.set_model(DistortionModel::Saturation),
            KeyCode::Char('m') | KeyCode::Tab => params.set_model(params.model().next()),
            KeyCode::Up => params.set_drive(params.drive_db() + DRIVE_STEP_DB),
            KeyCode::Down => params.set_drive(params.drive_db() - DRIVE_STEP_DB),
            KeyCode::Right => params.set_mix(params.mix() + MIX_STEP),
            KeyCode::Left => params.set_mix(params.mix() - MIX_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                params.set_output(params.output_db() + OUTPUT_STEP_DB)
            }
            KeyCode::Char('-') => params.set_output(params.output_db() - OUTPUT_STEP_DB),
            _ => continue,
        }

        print_status(params)?;
    }
}

fn print_status(params: &DistortionParams) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(
        stdout,
        "\r{:<10} | drive {:>5.1} dB | output {:>+5.1} dB | mix {:>4.2}   ",
        params.model().label(),
        params.drive_db(),
        params.output_db(),
        params.mix()
    )?;
    stdout.flush()
}
