use std::time::Instant;

use corridors::{generators::WalkConfig, session::Session, solvers::Solver};

/// Generate and solve mazes without a terminal, logging timings to stdout.
/// Usage: profile [rows] [cols] [iterations] [seed]
fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let mut next_number = |default: u64| {
        args.next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(default)
    };
    let rows = u16::try_from(next_number(200)).unwrap_or(u16::MAX);
    let cols = u16::try_from(next_number(200)).unwrap_or(u16::MAX);
    let iterations = next_number(10);
    let seed = next_number(0);

    let start = Instant::now();
    let mut session = Session::new(rows, cols, WalkConfig::default(), Some(seed), None)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    for iteration in 0..iterations {
        let generated = Instant::now();
        session.regenerate();
        let generate_time = generated.elapsed();

        let solved = Instant::now();
        let dfs = session.run(Solver::Dfs).map(|path| path.hops());
        let bfs = session.run(Solver::Bfs).map(|path| path.hops());
        tracing::info!(
            iteration,
            ?generate_time,
            solve_time = ?solved.elapsed(),
            ?dfs,
            ?bfs,
            "profiled"
        );
    }
    tracing::info!(total = ?start.elapsed(), rows, cols, iterations, "done");
    Ok(())
}
