use anyhow::Result;
use hydro_dispatch::{config::Scenario, report::SolveReport, telemetry};
use hydro_dispatch::{DispatchStrategy, LpOptimizer};
use std::path::Path;
use tracing::info;

/// CLI arguments: an optional scenario path and the literal `json` flag, in
/// either order. `hydro-dispatch json` renders the default scenario as JSON.
fn parse_args<I: Iterator<Item = String>>(args: I) -> (String, bool) {
    let mut path = None;
    let mut json = false;
    for arg in args {
        if arg == "json" {
            json = true;
        } else if path.is_none() {
            path = Some(arg);
        }
    }
    (
        path.unwrap_or_else(|| "config/scenario.toml".to_string()),
        json,
    )
}

fn main() -> Result<()> {
    telemetry::init_tracing();

    let (path, json) = parse_args(std::env::args().skip(1));

    let scenario = Scenario::load(Path::new(&path))?;
    let problem = scenario.into_problem();
    info!(horizon = problem.horizon(), scenario = %path, "solving release schedule");

    let outcome = LpOptimizer::default().solve(&problem);
    let report = SolveReport::from_result(&outcome);

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render());
    }

    if !report.success {
        anyhow::bail!("solve failed: {}", report.message);
    }
    Ok(())
}
