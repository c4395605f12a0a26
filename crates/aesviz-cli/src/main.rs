//! Command-line interface for `aesviz`.

#![forbid(unsafe_code)]

mod serve;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use aesviz_bind::HostState;
use aesviz_core::{init_state, State, Step};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::serve::ServeConfig;

/// Step-by-step AES round visualizer.
#[derive(Parser)]
#[command(
    name = "aesviz",
    version,
    author,
    about = "Step through a simplified AES round on a 4x4 byte grid"
)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the initial state from text and key.
    Init {
        /// Input text; the first 16 bytes are used.
        #[arg(long)]
        text: String,
        /// Key text; the first 16 bytes are used.
        #[arg(long)]
        key: String,
        /// Print the state as JSON instead of the hex grid.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Apply one step to a JSON state.
    Step {
        /// State file as written by `init --json`, or `-` for stdin.
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
        /// Step name: SubBytes, ShiftRows, MixColumns or AddRoundKey.
        #[arg(long, value_name = "NAME")]
        step: String,
        /// Write the resulting JSON state here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Print the hex grid on stdout instead of JSON.
        #[arg(long, default_value_t = false)]
        render: bool,
    },
    /// Initialize, then apply a list of steps printing the grid after each.
    Walk {
        /// Input text; the first 16 bytes are used.
        #[arg(long)]
        text: String,
        /// Key text; the first 16 bytes are used.
        #[arg(long)]
        key: String,
        /// Comma-separated step names (defaults to one round).
        #[arg(long, value_delimiter = ',')]
        steps: Vec<String>,
    },
    /// Walk one round over random printable text and key.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve the visualization page and its WebAssembly module.
    Serve {
        /// Port to listen on.
        #[arg(long, env = "AESVIZ_PORT", default_value_t = 8080)]
        port: u16,
        /// Directory of static files.
        #[arg(long, env = "AESVIZ_DIR", default_value = "static")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);
    match cli.command {
        Commands::Init { text, key, json } => cmd_init(&text, &key, json),
        Commands::Step {
            state,
            step,
            out,
            render,
        } => cmd_step(&state, &step, out.as_deref(), render),
        Commands::Walk { text, key, steps } => cmd_walk(&text, &key, &steps),
        Commands::Demo { seed } => cmd_demo(seed),
        Commands::Serve { port, dir } => cmd_serve(port, &dir),
    }
}

fn init_logger(verbose: u8, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(LevelFilter::Error);
    } else if verbose > 0 {
        builder.filter_level(if verbose == 1 {
            LevelFilter::Debug
        } else {
            LevelFilter::Trace
        });
    }
    builder.format_timestamp_secs().init();
}

fn cmd_init(text: &str, key: &str, json: bool) -> Result<()> {
    let state = init_state(text, key);
    if json {
        println!("{}", to_json(state)?);
    } else {
        print!("{state}");
    }
    Ok(())
}

fn cmd_step(state_path: &Path, step: &str, out: Option<&Path>, render: bool) -> Result<()> {
    let mut state = load_state(state_path)?;
    let step = Step::from_name(step);
    if !step.is_known() {
        log::warn!("unknown step \"{step}\"; grid left unchanged");
    }
    state.apply(step);

    if render {
        print!("{state}");
    }
    let json = to_json(state)?;
    match out {
        Some(path) => {
            fs::write(path, json + "\n").with_context(|| format!("write {}", path.display()))?
        }
        None if !render => println!("{json}"),
        None => {}
    }
    Ok(())
}

fn cmd_walk(text: &str, key: &str, steps: &[String]) -> Result<()> {
    let steps: Vec<Step> = if steps.is_empty() {
        Step::ROUND.to_vec()
    } else {
        steps.iter().map(|name| Step::from_name(name.trim())).collect()
    };

    log::info!(
        "text {} key {}",
        hex::encode(text.as_bytes()),
        hex::encode(key.as_bytes())
    );
    let mut state = init_state(text, key);
    println!("{}", state.current_step);
    print!("{state}");
    for step in steps {
        state.apply(step);
        println!("{}", state.current_step);
        print!("{state}");
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let text = random_printable(&mut rng);
    let key = random_printable(&mut rng);
    println!("text: {text}");
    println!("key: {key}");
    cmd_walk(&text, &key, &[])
}

fn cmd_serve(port: u16, dir: &Path) -> Result<()> {
    let result = ServeConfig::new(port, dir).and_then(serve::run);
    if let Err(err) = &result {
        log::error!("server stopped: {err:#}");
    }
    result
}

fn load_state(path: &Path) -> Result<State> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    };
    let host: HostState = serde_json::from_str(&text).context("parse state JSON")?;
    Ok(host.into())
}

fn to_json(state: State) -> Result<String> {
    serde_json::to_string(&HostState::from(state)).context("serialize state")
}

fn random_printable(rng: &mut impl Rng) -> String {
    (0..16).map(|_| rng.gen_range(b'!'..=b'~') as char).collect()
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}
