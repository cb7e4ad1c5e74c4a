//! Headless benchmark of the engine's advance, serial vs parallel

use std::time::Instant;
use anyhow::{Context, Result};
use torus_life::{Engine, InitialState, Strategy, rendering::format_number, telemetry};
use tracing::info;

const SEED: u64 = 0x5eed;

fn seeded_engine(size: usize, strategy: Strategy) -> Result<Engine> {
    let engine = Engine::new(size, size)?
        .with_initial_state(InitialState::seeded(SEED))?
        .with_strategy(strategy);
    Ok(engine)
}

/// Average milliseconds per advance (excluding bootstrap) and average changes
fn benchmark(size: usize, strategy: Strategy, iterations: u32) -> Result<(f64, f64)> {
    let mut engine = seeded_engine(size, strategy)?;
    engine.advance().for_each(drop);

    let mut total_changes = 0usize;
    let start = Instant::now();
    for _ in 0..iterations {
        // Drain the stream so the diff is part of the measurement
        total_changes += engine.advance().count();
    }
    let ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;
    Ok((ms, total_changes as f64 / iterations as f64))
}

fn main() -> Result<()> {
    telemetry::init_tracing();

    println!("=== Toroidal Life Advance Benchmark ===\n");

    let sizes = [100, 500, 1000, 2000, 5000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10} {:>14}",
        "Size", "Serial", "Parallel", "Speedup", "Changes/gen");
    println!("{:-<64}", "");

    for size in sizes {
        // Skip serial for huge grids to save time
        let serial = if size <= 2000 {
            Some(benchmark(size, Strategy::Serial, iterations)?)
        } else {
            None
        };
        let (parallel_ms, changes) = benchmark(size, Strategy::Parallel, iterations)
            .with_context(|| format!("parallel run at {size}x{size}"))?;

        let (serial_str, speedup_str) = match serial {
            Some((serial_ms, _)) => (
                format!("{:>12.2}", serial_ms),
                format!("{:>9.1}x", serial_ms / parallel_ms),
            ),
            None => (format!("{:>12}", "-"), format!("{:>10}", "-")),
        };

        println!(
            "{:>10} {} {:>12.2} {} {:>14}",
            format!("{}x{}", size, size),
            serial_str,
            parallel_ms,
            speedup_str,
            format_number(changes as usize)
        );
    }

    println!("\n=== 500 frames at 2000x2000 ===\n");

    let frames = 500;
    let mut engine = seeded_engine(2000, Strategy::Parallel)?;
    let start = Instant::now();
    for _ in 0..frames {
        engine.advance().for_each(drop);
    }
    let elapsed = start.elapsed().as_secs_f64();
    let cells = 2000 * 2000;

    info!(frames, "{} frames in {:.2} seconds", frames, elapsed);
    println!("{} frames in {:.2} seconds, {:.1}M cells/sec",
        frames, elapsed, (cells as f64 * frames as f64) / elapsed / 1_000_000.0);

    Ok(())
}
