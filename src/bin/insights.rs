use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use tipsheet::config::Config;
use tipsheet::data::MatchSnapshot;
use tipsheet::engine::Engine;
use tipsheet::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the match snapshot from
    #[clap(short = 'f', long)]
    file: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    debug!("args: {args:?}");

    let raw = fs::read_to_string(&args.file)?;
    let snapshot: MatchSnapshot = serde_json::from_str(&raw)?;

    let config = Config::default();
    let request = snapshot.unpack(config.goals_line)?;
    let engine = Engine::try_from(config)?;
    let insights = engine.analyse(
        &request.home,
        &request.away,
        &request.h2h,
        &request.scorers,
        request.odds.as_ref(),
    )?;

    info!("{} vs {}", request.home.team, request.away.team);
    let console = Console::default();
    info!(
        "Recent form:\n{}",
        console.render(&print::tabulate_form(
            &insights.home_form,
            &insights.away_form
        ))
    );
    info!(
        "Head-to-head:\n{}",
        console.render(&print::tabulate_h2h(&insights.h2h))
    );
    if !insights.home_absences.is_empty() || !insights.away_absences.is_empty() {
        info!(
            "Absences:\n{}",
            console.render(&print::tabulate_absences(
                &insights.home_absences,
                &insights.away_absences
            ))
        );
    }
    info!(
        "Recommendations:\n{}",
        console.render(&print::tabulate_recommendations(&insights.recommendations))
    );

    Ok(())
}
