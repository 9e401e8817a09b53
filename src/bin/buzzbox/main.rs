//! buzzbox - standalone host for the distortion engine
//!
//! Run with: cargo run -- render --model soft --drive 12
//!       or: cargo run -- live --tone 220

mod analysis;
mod live;
mod render;

use buzzbox::{DistortionModel, DistortionParams};
use clap::{Parser, Subcommand, ValueEnum};

/// Waveshaping distortion: hard clip, soft clip and saturation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a test tone offline and print level and harmonic analysis
    Render(render::RenderArgs),
    /// Run the effect on the default audio devices with keyboard control
    Live(live::LiveArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModelArg {
    Hard,
    Soft,
    Saturation,
}

impl From<ModelArg> for DistortionModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Hard => DistortionModel::HardClip,
            ModelArg::Soft => DistortionModel::SoftClip,
            ModelArg::Saturation => DistortionModel::Saturation,
        }
    }
}

/// Initial control values shared by both subcommands.
#[derive(clap::Args, Debug, Clone)]
pub struct ControlArgs {
    /// Distortion model
    #[arg(long, value_enum, default_value = "hard")]
    model: ModelArg,

    /// Drive in dB (0 to 24)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    drive: f32,

    /// Output gain in dB (-24 to 24)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    output: f32,

    /// Dry/wet mix (0 = dry, 1 = wet)
    #[arg(long, default_value_t = 1.0)]
    mix: f32,
}

impl ControlArgs {
    /// Write these values into a parameter block (clamped to range).
    pub fn apply(&self, params: &DistortionParams) {
        params.set_model(self.model.into());
        params.set_drive(self.drive);
        params.set_output(self.output);
        params.set_mix(self.mix);
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    match args.command {
        Command::Render(render_args) => render::run(&render_args),
        Command::Live(live_args) => live::run(&live_args),
    }
}
