#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Duration;

use anyhow::{Context, Result, bail};
use life_strategies::driver::DriverTotals;
use life_strategies::{
    Algorithm, DriverConfig, FrameDriver, Generator, LifeStrategy, Simulation, SimulationConfig,
};
use rand::SeedableRng;
use tracing::info;

const USAGE: &str = "usage: life-strategies [--algorithm map-diff|map-set|bounded-grid] \
[--generator random|glider-gun] [--width N] [--height N] [--frames N] [--seed N] \
[--budget-ms N] [--max-steps N] [--switch-to NAME]";

struct MainArgs {
    algorithm: Algorithm,
    generator: Generator,
    config: SimulationConfig,
    frames: u64,
    seed: u64,
    driver: DriverConfig,
    switch_to: Option<Algorithm>,
}

fn parse_args() -> Result<MainArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = MainArgs {
        algorithm: Algorithm::Incremental,
        generator: Generator::Random,
        config: SimulationConfig::default().width(200).height(200),
        frames: 120,
        seed: 0x5EED_1234_ABCD_EF01,
        driver: DriverConfig::default(),
        switch_to: None,
    };
    let next_arg = |i: usize, flag: &str| -> Result<&str> {
        args.get(i)
            .map(String::as_str)
            .with_context(|| format!("{flag} requires a value\n{USAGE}"))
    };
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--algorithm" => {
                i += 1;
                parsed.algorithm = next_arg(i, flag)?.parse()?;
            }
            "--generator" => {
                i += 1;
                parsed.generator = next_arg(i, flag)?.parse()?;
            }
            "--width" => {
                i += 1;
                let n: usize = next_arg(i, flag)?.parse().context("--width requires a positive integer")?;
                parsed.config = parsed.config.width(n);
            }
            "--height" => {
                i += 1;
                let n: usize = next_arg(i, flag)?.parse().context("--height requires a positive integer")?;
                parsed.config = parsed.config.height(n);
            }
            "--frames" => {
                i += 1;
                parsed.frames = next_arg(i, flag)?.parse().context("--frames requires an integer")?;
            }
            "--seed" => {
                i += 1;
                parsed.seed = next_arg(i, flag)?.parse().context("--seed requires an integer")?;
            }
            "--budget-ms" => {
                i += 1;
                let ms: u64 = next_arg(i, flag)?.parse().context("--budget-ms requires an integer")?;
                parsed.driver = parsed.driver.frame_budget(Duration::from_millis(ms));
            }
            "--max-steps" => {
                i += 1;
                let n: u64 = next_arg(i, flag)?.parse().context("--max-steps requires an integer")?;
                parsed.driver = parsed.driver.max_steps_per_frame(n);
            }
            "--switch-to" => {
                i += 1;
                parsed.switch_to = Some(next_arg(i, flag)?.parse()?);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
        i += 1;
    }
    Ok(parsed)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn log_totals(totals: &DriverTotals, algorithm: Algorithm) {
    info!(
        %algorithm,
        frames = totals.frames,
        steps = totals.steps,
        mean_step_ms = totals.mean_step_ms(),
        "totals"
    );
}

fn main() -> Result<()> {
    init_tracing();
    let args = parse_args()?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
    let seed = args
        .generator
        .generate(args.config.width, args.config.height, &mut rng);
    info!(
        generator = %args.generator,
        algorithm = %args.algorithm,
        width = args.config.width,
        height = args.config.height,
        points = seed.len(),
        "starting simulation"
    );

    let mut sim = Simulation::new(args.algorithm, seed, &args.config)?;
    let mut driver = FrameDriver::new(args.driver);
    let switch_frame = args.frames / 2;

    for frame in 1..=args.frames {
        let report = driver.run_frame(&mut sim);
        // Stand-in for a renderer: consume the generation once per frame.
        let drawn = sim.live_cells().count();
        info!(
            frame,
            steps = report.steps,
            generation = report.generation,
            population = report.population,
            drawn,
            step_ms = sim.stats().step_time_ms(),
            "frame"
        );

        if frame == switch_frame {
            if let Some(target) = args.switch_to {
                log_totals(&driver.take_totals(), sim.algorithm());
                sim = sim.switch_to(target, &args.config)?;
            }
        }
    }

    log_totals(&driver.take_totals(), sim.algorithm());
    Ok(())
}
