//! Chronograph for Echo Arena: polls the headset's session telemetry API
//! and announces each detected throw by voice and/or FIGlet banner.
//!
//! Usage: echochrono <QUEST_IP> [options]

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;

use echochrono::announce::{Announcer, Banner, DEFAULT_TTS_COMMAND, SpeechEngine};
use echochrono::client::SessionClient;
use echochrono::detector::ShotDetector;
use echochrono::error::SetupError;
use echochrono::monitor::Monitor;
use echochrono::record::FrameRecorder;

#[derive(Parser)]
#[command(
    name = "echochrono",
    about = "Chronograph for Echo Arena on the Oculus Quest",
    version
)]
struct Cli {
    /// IP of the headset running the telemetry API
    #[arg(value_name = "QUEST_IP")]
    host: String,

    /// Disc velocity update/refresh rate in Hz
    #[arg(
        short = 'r',
        long = "refresh-rate",
        value_name = "HERTZ",
        default_value_t = 5.0
    )]
    refresh_rate: f64,

    /// Minimum disc speed to read out (m/s)
    #[arg(short = 'm', long = "minimum-speed", default_value_t = 10.0)]
    minimum_speed: f64,

    /// Maximum speed change between consecutive samples still read as one
    /// sustained flight (m/s)
    #[arg(long = "stability-tolerance", default_value_t = 0.1)]
    stability_tolerance: f64,

    /// Disable text-to-speech output
    #[arg(long = "no-tts")]
    no_tts: bool,

    /// Speech synthesizer command (receives the speed as its argument)
    #[arg(long = "tts-command", value_name = "PROGRAM", default_value = DEFAULT_TTS_COMMAND)]
    tts_command: String,

    /// Disable displaying the speed in large letters
    #[arg(long = "no-banner")]
    no_banner: bool,

    /// FIGlet .flf font file for the banner (embedded standard font if omitted)
    #[arg(long = "banner-font", value_name = "FONTFILE")]
    banner_font: Option<PathBuf>,

    /// Announce absolute disc speed instead of speed relative to the thrower
    #[arg(long = "no-throw-speed")]
    no_throw_speed: bool,

    /// Record session frames and detected shots to FILEPATH
    #[arg(short = 'R', long = "record", value_name = "FILEPATH")]
    record: Option<PathBuf>,

    /// Print lots of extra debug messages
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SetupError> {
    let client = SessionClient::new(&cli.host)?;
    println!("Using Echo Arena API at {}", client.url());

    let banner = if cli.no_banner {
        None
    } else {
        Some(match &cli.banner_font {
            Some(path) => Banner::from_file(path)?,
            None => Banner::standard()?,
        })
    };

    let speech = if cli.no_tts {
        None
    } else {
        Some(SpeechEngine::new(&cli.tts_command)?)
    };

    let recorder = match &cli.record {
        Some(path) => {
            println!("Writing session frames to {}", path.display());
            Some(FrameRecorder::open(path)?)
        }
        None => None,
    };

    let mut monitor = Monitor::new(
        client,
        ShotDetector::new(cli.minimum_speed, cli.stability_tolerance),
        Announcer::new(banner, speech, !cli.no_throw_speed),
        recorder,
        cli.refresh_rate,
    )?;
    monitor.run()
}
