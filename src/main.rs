use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute, terminal,
};
use directories::ProjectDirs;
use flaps::assets::AssetTable;
use flaps::audio::{Audio, Cue};
use flaps::render::Renderer;
use flaps::{
    FlapsError, FlapsLedger, Game, GameConfig, GameEvent, JsonFileStore, MemoryStore, Phase,
    Result, RewardSink,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "flaps", version)]
#[command(about = "Flap through the walls and collect $FLAPS")]
struct Cli {
    /// TOML file overriding the game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the $FLAPS balance is kept
    #[arg(long)]
    balance_file: Option<PathBuf>,

    /// Keep the balance in memory only
    #[arg(long, default_value_t = false)]
    ephemeral: bool,

    #[arg(long, default_value_t = false)]
    mute: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for obstacle placement
    #[arg(long)]
    seed: Option<u64>,
}

// ── Setup ───────────────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "flaps")
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Logs go to a file since the terminal belongs to the game. Without one
/// the game runs unlogged.
fn init_logging(path: &Path) {
    match open_log_file(path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("flaps: not logging to {}: {e}", path.display()),
    }
}

fn load_config(cli: &Cli, dirs: Option<&ProjectDirs>) -> Result<GameConfig> {
    if let Some(path) = &cli.config {
        return GameConfig::load(path);
    }
    match dirs.map(|d| d.config_dir().join("config.toml")) {
        Some(path) if path.exists() => GameConfig::load(&path),
        _ => Ok(GameConfig::default()),
    }
}

fn open_sink(cli: &Cli, dirs: Option<&ProjectDirs>) -> Box<dyn RewardSink> {
    if cli.ephemeral {
        return Box::new(FlapsLedger::open(MemoryStore::new()));
    }
    let path = cli
        .balance_file
        .clone()
        .or_else(|| dirs.map(|d| d.data_dir().join("balance.json")));
    match path {
        Some(path) => {
            log::info!("keeping $FLAPS balance in {}", path.display());
            Box::new(FlapsLedger::open(JsonFileStore::new(path)))
        }
        None => {
            log::warn!("no data directory, $FLAPS balance will not be saved");
            Box::new(FlapsLedger::open(MemoryStore::new()))
        }
    }
}

fn open_audio(mute: bool) -> Option<Audio> {
    if mute {
        return None;
    }
    match Audio::open() {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("{e}, playing without sound");
            None
        }
    }
}

// ── Sounds ──────────────────────────────────────────────────────────────────

/// Turns game events into sounds once the assets are in.
fn play_event(audio: &mut Option<Audio>, assets: &AssetTable, ready: bool, event: GameEvent) {
    match event {
        GameEvent::ObstaclePassed { score, earned } => {
            log::debug!("passed obstacle {score}, round total {earned} $FLAPS");
        }
        GameEvent::RoundStarted => {}
        GameEvent::Flapped | GameEvent::RoundOver(_) => {
            let Some(audio) = audio.as_mut() else {
                return;
            };
            if !ready {
                return;
            }
            let cue = if event == GameEvent::Flapped {
                Cue::Purr
            } else {
                audio.stop(Cue::Purr);
                Cue::Crash
            };
            if let Some(samples) = assets.sound(cue) {
                audio.play(cue, samples);
            }
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────────

fn run<S: RewardSink>(
    out: &mut io::Stdout,
    game: &mut Game<S>,
    rng: &mut StdRng,
    mut audio: Option<Audio>,
) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut renderer = Renderer::new(cols, rows);
    let mut assets = AssetTable::load_in_background();

    let frame_dur = Duration::from_millis(16); // ~60 fps
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;

        assets.poll();
        let ready = assets.is_ready();

        // Input
        while event::poll(Duration::ZERO)? {
            let activate = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => true,
                    _ => false,
                },
                Event::Mouse(m) => m.kind == MouseEventKind::Down(MouseButton::Left),
                Event::Resize(c, r) => {
                    renderer.resize(c, r);
                    false
                }
                _ => false,
            };
            if activate {
                let ev = game.activate(now_ms, rng);
                play_event(&mut audio, &assets, ready, ev);
            }
        }

        // Update
        for ev in game.tick(now_ms, rng) {
            play_event(&mut audio, &assets, ready, ev);
        }

        // Render
        renderer.draw(game, &assets);
        renderer.present(out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

fn main() -> std::result::Result<(), FlapsError> {
    let cli = Cli::parse();
    let dirs = project_dirs();

    let log_path = cli
        .log_file
        .clone()
        .or_else(|| dirs.as_ref().map(|d| d.data_dir().join("flaps.log")));
    if let Some(path) = &log_path {
        init_logging(path);
    }

    let config = load_config(&cli, dirs.as_ref())?;
    let sink = open_sink(&cli, dirs.as_ref());
    let mut game = Game::new(config, sink);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let audio = open_audio(cli.mute);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()?;
        out.flush()
    };

    let result = run(&mut out, &mut game, &mut rng, audio);
    cleanup(&mut out)?;

    if game.phase() == Phase::Playing {
        log::info!(
            "quit mid-round, {} unflushed $FLAPS dropped",
            game.round().earned
        );
    }
    log::info!("exiting with {} $FLAPS", game.sink().flaps_balance());
    result
}
