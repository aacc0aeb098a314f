//! keiba - command-line race browser
//!
//! Uses the same provider and prediction store as keiba-web. When a
//! provider request fails the error is shown and the user may re-issue the
//! identical request.

use std::future::Future;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use keiba_common::api::{ProviderError, RaceDataSource};
use keiba_common::config::{resolve_root_folder, TomlConfig};
use keiba_common::marks::display_mark;
use keiba_common::transforms::{
    build_race_card, chart_time_domain, format_training_times, sort_newest_first, to_chart_points,
};
use keiba_common::types::Horse;
use keiba_common::view::{HorseSearch, Resource};
use keiba_common::{PredictionMark, PredictionStore};
use keiba_web::bootstrap::{build_source, init_tracing, open_store};

#[derive(Debug, Parser)]
#[command(name = "keiba", version, about = "Browse races, training and horses; keep prediction marks")]
struct Cli {
    /// Config file (defaults to <config dir>/keiba/config.toml)
    #[arg(long, env = "KEIBA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Folder holding persisted prediction marks
    #[arg(long, global = true)]
    root_folder: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Browse(BrowseCommand),
    /// Manage prediction marks
    Mark {
        #[command(subcommand)]
        action: MarkAction,
    },
}

/// Commands that query the race data provider
#[derive(Debug, Subcommand)]
enum BrowseCommand {
    /// Meetings for a day, grouped by racecourse
    Races {
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Race card with marks and recent form
    Card {
        #[arg(long)]
        race: String,
    },
    /// Training log for a horse
    Training {
        #[arg(long)]
        horse: String,
        /// Show chart points (up time per session, oldest first)
        #[arg(long)]
        chart: bool,
    },
    /// Search horses by (partial) name
    Search { query: Vec<String> },
    /// Pedigree and race record
    Horse { horse_id: String },
}

#[derive(Debug, Subcommand)]
enum MarkAction {
    /// Set a mark: ◎ ○ ▲ △ × (or honmei, taikou, tanana, renka, hoshi)
    Set {
        race_id: String,
        horse_number: u32,
        mark: PredictionMark,
    },
    /// Clear one horse's mark
    Clear { race_id: String, horse_number: u32 },
    /// List marks, for one race or all
    List { race_id: Option<String> },
    /// Remove marks for one race, or every mark
    Reset {
        #[arg(long)]
        race: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TomlConfig::load_or_default(cli.config.as_deref());

    init_tracing(&config.logging.level);

    let root_folder = resolve_root_folder(cli.root_folder.as_deref(), &config);
    let store = open_store(&root_folder, &config.predictions.key)?;

    match cli.command {
        Command::Mark { action } => run_mark(&store, action),
        Command::Browse(command) => {
            let source = build_source(&config.provider)?;
            run_browse(source.as_ref(), &store, command).await
        }
    }
}

async fn run_browse(
    source: &dyn RaceDataSource,
    store: &PredictionStore,
    command: BrowseCommand,
) -> Result<()> {
    match command {
        BrowseCommand::Races { date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            show_races(source, date).await
        }
        BrowseCommand::Card { race } => show_card(source, store, race).await,
        BrowseCommand::Training { horse, chart } => show_training(source, horse, chart).await,
        BrowseCommand::Search { query } => show_search(source, &query.join(" ")).await,
        BrowseCommand::Horse { horse_id } => show_horse(source, &horse_id).await,
    }
}

/// Ask a yes/no question on the terminal
fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Fetch once; on failure show the error and offer to re-issue the request
async fn fetch_interactive<Q, T, F, Fut>(query: Q, f: F) -> Result<T>
where
    Q: Clone,
    F: Fn(Q) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut resource = Resource::new();
    resource.fetch(query, &f).await;

    while let Some(message) = resource.error() {
        eprintln!("error: {}", message);
        if !confirm("Retry?")? {
            bail!("{}", message);
        }
        resource.retry(&f).await;
    }

    match resource.into_data() {
        Some(data) => Ok(data),
        None => bail!("request did not complete"),
    }
}

async fn show_races(source: &dyn RaceDataSource, date: NaiveDate) -> Result<()> {
    let response = fetch_interactive(date, |d| source.races_by_date(d)).await?;

    if response.racecourses.is_empty() {
        println!("No meetings on {}", date);
        return Ok(());
    }

    for group in &response.racecourses {
        println!("{} ({})", group.racecourse.name, group.racecourse.id);
        for race in &group.races {
            let graded = if race.is_graded() { " *" } else { "" };
            println!(
                "  {:>2}R {}  {}{}  [{}]",
                race.race_number, race.start_time, race.race_name, graded, race.id
            );
        }
    }
    Ok(())
}

async fn show_card(source: &dyn RaceDataSource, store: &PredictionStore, race_id: String) -> Result<()> {
    let race = fetch_interactive(race_id.clone(), |id| async move { source.race(&id).await }).await?;
    let entries = fetch_interactive(race_id.clone(), |id| async move { source.entries(&id).await })
        .await?
        .entries;

    let card = build_race_card(&race_id, race, entries, &store.group(&race_id));

    match &card.race {
        Some(race) => println!(
            "{} {}R {} {}m",
            race.racecourse.name, race.race_number, race.race_name, race.distance
        ),
        None => println!("{}", race_id),
    }

    if card.entries.is_empty() {
        println!("No entries");
        return Ok(());
    }

    for row in &card.entries {
        let form: Vec<String> = row
            .recent_form
            .iter()
            .map(|r| format!("{}着 {} {}m", r.position, r.racecourse, r.distance))
            .collect();
        println!(
            "{} {:>2} {:<12} {:<8} {:>4.1}kg {:>3}kg  {}",
            display_mark(row.mark),
            row.entry.horse_number,
            row.entry.horse_name,
            row.entry.jockey,
            row.entry.weight,
            row.entry.horse_weight,
            form.join(" / ")
        );
    }
    Ok(())
}

async fn show_training(source: &dyn RaceDataSource, horse_id: String, chart: bool) -> Result<()> {
    let response =
        fetch_interactive(horse_id, |id| async move { source.training_by_horse(&id).await }).await?;

    if response.trainings.is_empty() {
        println!("No training data");
        return Ok(());
    }

    if chart {
        let domain = chart_time_domain(&response.trainings);
        println!("axis {:.0}s - {:.0}s", domain.min, domain.max);
        for point in to_chart_points(&response.trainings) {
            let up_time = point
                .up_time()
                .map(|t| format!("{:.1}", t))
                .unwrap_or_else(|| "-".to_string());
            println!("{}  {:<4} {}", point.date, point.course.label(), up_time);
        }
        return Ok(());
    }

    let mut trainings = response.trainings;
    sort_newest_first(&mut trainings);
    for t in &trainings {
        println!("{}  {:<4} {}", t.date, t.course.label(), format_training_times(&t.times));
    }
    Ok(())
}

async fn show_search(source: &dyn RaceDataSource, query: &str) -> Result<()> {
    let mut search = HorseSearch::new();
    search.search(source, query).await;

    if let Some(notice) = search.notice() {
        println!("{}", notice);
        return Ok(());
    }

    while let Some(message) = search.results().error() {
        eprintln!("error: {}", message);
        if !confirm("Retry?")? {
            bail!("{}", message);
        }
        search.retry(source).await;
    }

    let horses = search.results().data().map(Vec::as_slice).unwrap_or_default();
    if horses.is_empty() {
        println!("No horses match {:?}", query.trim());
    }
    for horse in horses {
        println!("{}  {} ({})", horse.id, horse.name, horse.birth_year);
    }
    Ok(())
}

async fn show_horse(source: &dyn RaceDataSource, horse_id: &str) -> Result<()> {
    let mut search = HorseSearch::new();
    search.select(source, horse_id).await;

    while let Some(message) = search.detail().error() {
        eprintln!("error: {}", message);
        if !confirm("Retry?")? {
            bail!("{}", message);
        }
        search.retry(source).await;
    }

    match search.detail().data() {
        Some(Some(horse)) => print_horse(horse),
        _ => println!("Horse not found: {}", horse_id),
    }
    Ok(())
}

fn print_horse(horse: &Horse) {
    println!("{} ({})", horse.name, horse.birth_year);
    println!("  父   {}", horse.sire);
    println!("  母   {}", horse.dam);
    println!("  母父 {}", horse.dam_sire);

    if horse.results.is_empty() {
        println!("No race record");
        return;
    }
    for r in &horse.results {
        println!(
            "  {}  {:<4} {:>5}m  {:>2}着  {}",
            r.date, r.racecourse, r.distance, r.position, r.time
        );
    }
}

fn run_mark(store: &PredictionStore, action: MarkAction) -> Result<()> {
    match action {
        MarkAction::Set {
            race_id,
            horse_number,
            mark,
        } => {
            store.set(&race_id, horse_number, Some(mark))?;
            println!("{} #{} {}", race_id, horse_number, mark);
        }
        MarkAction::Clear {
            race_id,
            horse_number,
        } => {
            store.delete(&race_id, horse_number)?;
            println!("{} #{} -", race_id, horse_number);
        }
        MarkAction::List { race_id: Some(race_id) } => {
            for (number, mark) in store.group(&race_id) {
                println!("{} #{} {}", race_id, number, mark);
            }
        }
        MarkAction::List { race_id: None } => {
            for (race_id, marks) in store.load_all() {
                for (number, mark) in marks {
                    println!("{} #{} {}", race_id, number, mark);
                }
            }
        }
        MarkAction::Reset { race: Some(race_id) } => {
            store.clear_race(&race_id)?;
            println!("Cleared marks for {}", race_id);
        }
        MarkAction::Reset { race: None } => {
            store.clear_all()?;
            println!("Cleared all marks");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_browse_commands_parse_at_top_level() {
        let cli = Cli::try_parse_from(["keiba", "card", "--race", "race-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Browse(BrowseCommand::Card { ref race }) if race == "race-1"
        ));

        let cli = Cli::try_parse_from(["keiba", "training", "--horse", "horse-001", "--chart"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Browse(BrowseCommand::Training { chart: true, .. })
        ));

        let cli = Cli::try_parse_from(["keiba", "races", "--date", "2025-01-05"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Browse(BrowseCommand::Races { date: Some(_) })
        ));
    }

    #[test]
    fn test_mark_commands_parse() {
        let cli = Cli::try_parse_from(["keiba", "mark", "set", "race-1", "3", "◎"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Mark {
                action: MarkAction::Set {
                    horse_number: 3,
                    mark: PredictionMark::Honmei,
                    ..
                }
            }
        ));

        let cli = Cli::try_parse_from(["keiba", "mark", "reset"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Mark {
                action: MarkAction::Reset { race: None }
            }
        ));

        assert!(Cli::try_parse_from(["keiba", "mark", "set", "race-1", "3", "☆"]).is_err());
    }

    #[test]
    fn test_mark_commands_update_store() {
        let store = PredictionStore::in_memory();

        run_mark(
            &store,
            MarkAction::Set {
                race_id: "race-1".to_string(),
                horse_number: 3,
                mark: PredictionMark::Tanana,
            },
        )
        .unwrap();
        assert_eq!(store.get("race-1", 3), Some(PredictionMark::Tanana));

        run_mark(&store, MarkAction::Reset { race: None }).unwrap();
        assert!(store.load_all().is_empty());
    }
}
