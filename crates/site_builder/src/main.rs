//! Tournament Site Data CLI
//!
//! Three passes over the site's `data/` directory: import the roster
//! CSV, recompute the derived statistics files, and mirror JSON files
//! into script-loadable form.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cup_core::{jsdata, TournamentEngine};

#[derive(Parser)]
#[command(name = "site_builder")]
#[command(about = "Build the tournament site's static data files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import the roster CSV and write the teams store
    Import {
        /// Input roster CSV path
        #[arg(long, default_value = "players-data.csv")]
        csv: PathBuf,

        /// Output teams store path
        #[arg(long, default_value = "data/teams.json")]
        out: PathBuf,
    },

    /// Recompute standings, top scorers, player stats and the bracket
    Stats {
        /// Data directory holding the JSON stores
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Mirror every JSON data file into a window-global .js file
    Mirror {
        /// Data directory holding the JSON stores
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { csv, out } => {
            println!("Importing roster...");
            println!("   CSV Input: {}", csv.display());
            println!("   Output:    {}", out.display());

            let (teams, stats) = site_builder::import_roster(&csv, &out)?;

            println!("\n✅ Import complete!");
            println!("   {} teams", teams.len());
            println!(
                "   {} players ({} rows skipped)",
                stats.players, stats.skipped
            );
            println!("\nTeams:");
            for team in &teams {
                println!("   - {}: {} players", team.name, team.members.len());
            }
        }

        Commands::Stats { data_dir } => {
            println!("Updating tournament statistics...");
            println!("   Data dir: {}", data_dir.display());

            let mut engine = TournamentEngine::new(&data_dir);
            engine.load()?;
            let summary = engine.save_results()?;

            println!("\n✅ Statistics updated!");
            println!("   {} teams in standings", summary.standings_rows);
            println!("   {} players with goals", summary.scorers);
            println!("   {} player stat records", summary.player_rows);
            println!("   {} bracket matches seeded", summary.bracket_matches);
            println!("   JSON and JS files written to {}", data_dir.display());
        }

        Commands::Mirror { data_dir } => {
            println!("Mirroring JSON data files to JS...");
            println!("   Data dir: {}", data_dir.display());

            let written = jsdata::mirror_data_dir(&data_dir)?;

            println!("\n✅ Mirrored {written} data files");
        }
    }

    Ok(())
}
