use std::path::PathBuf;
use std::process::ExitCode;

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use homeward::app::DemoBuilder;
use homeward::audio::AudioContext;
use homeward::canvas::Color;
use homeward::config::DemoConfig;
use homeward::motion::MotionPolicy;
use homeward::scene::{ExitPolicy, MoveScene, MoveSceneConfig};
use homeward::sheet::{ColorKey, SheetSet};
use homeward::spawn::SpawnPlan;

const USAGE: &str = "\
homeward — click to summon the swarm, click again to send it home

USAGE:
    homeward [OPTIONS]

OPTIONS:
    --config <FILE>   JSON config file (any subset of fields)
    --assets <DIR>    Asset root with sheets/ and sounds/; enables sprites + audio
    --seed <N>        Seed the placement RNG for a reproducible layout
    --count <N>       Number of actors to spawn
    -h, --help        Show this help

KEYS:
    click             toggle the swarm target
    r                 respawn all actors
    any other key     quit";

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    assets: Option<PathBuf>,
    seed: Option<u64>,
    count: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::default(),
    };
    if let Some(dir) = args.assets {
        config.assets = Some(dir);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(count) = args.count {
        config.actor_count = count;
    }

    // Sheets and sounds load up front; anything configured that fails to
    // load ends the run here with a diagnostic.
    let sheets = match &config.assets {
        Some(dir) => Some(SheetSet::load_dir(
            &dir.join("sheets"),
            config.frame_width,
            config.frame_height,
            config.frames_per_sheet,
            ColorKey::Origin,
        )?),
        None => None,
    };

    let audio = match &config.assets {
        Some(dir) => {
            let mut audio = AudioContext::new()?;
            audio.load_sound("converge", dir.join("sounds/converge.ogg"))?;
            audio.load_sound("disperse", dir.join("sounds/disperse.ogg"))?;
            if let Some(track) = &config.soundtrack {
                audio.load_sound("soundtrack", dir.join(track))?;
            }
            Some(audio)
        }
        None => None,
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("rng seed: {seed}");
    let rng = SmallRng::seed_from_u64(seed);

    let scene = MoveScene::new(
        MoveSceneConfig {
            bounds: Vec2::new(config.width as f32, config.height as f32),
            plan: SpawnPlan {
                count: config.actor_count,
                radius: config.actor_radius,
                buffer: config.spawn_buffer,
            },
            policy: MotionPolicy { rel_tol: config.motion_rel_tol, ..Default::default() },
            sheet_frames: sheets.as_ref().map(|s| s.frame_counts()).unwrap_or_default(),
            exit_policy: ExitPolicy::AnyKey,
            background: Color(config.background),
            soundtrack: config.soundtrack.as_ref().map(|_| "soundtrack".to_string()),
        },
        rng,
    );

    DemoBuilder::new()
        .with_title(&config.title)
        .with_size(config.width, config.height)
        .with_sheets(sheets)
        .with_audio(audio)
        .with_soundtrack_volume(config.soundtrack_volume)
        .run(Box::new(scene))?;
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("--config needs a file path")?;
                cli.config = Some(PathBuf::from(value));
            }
            "--assets" => {
                let value = args.next().ok_or("--assets needs a directory path")?;
                cli.assets = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a number")?;
                cli.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid seed '{value}'"))?,
                );
            }
            "--count" => {
                let value = args.next().ok_or("--count needs a number")?;
                cli.count = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid count '{value}'"))?,
                );
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument '{other}' (try --help)")),
        }
    }
    Ok(cli)
}
