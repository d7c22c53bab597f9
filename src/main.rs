mod cache;
mod config;
mod football;
mod logging;
mod present;
mod refresh;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use serde::Serialize;
use std::path::PathBuf;

use cache::FetchOptions;
use football::{CachedFootballClient, League};
use present::{PlayerSort, SortDirection, StandingsSort};

#[derive(Parser, Debug)]
#[command(name = "touchline")]
#[command(about = "Football standings, fixtures and scorers with a 24h offline cache")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/touchline/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Skip a fresh cached copy and ask upstream
  #[arg(short, long, global = true)]
  force_refresh: bool,

  /// Print the payload as JSON instead of a table
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// League table
  Standings {
    league: League,
    /// Season start year (default from config)
    #[arg(short, long, value_parser = clap::value_parser!(i32).range(1900..=2100))]
    season: Option<i32>,
    #[arg(long, value_enum, default_value_t = StandingsSort::Rank)]
    sort: StandingsSort,
    #[arg(long)]
    desc: bool,
  },
  /// Current season fixtures, grouped by month
  Fixtures {
    league: League,
    /// Only this month (YYYY-MM)
    #[arg(short, long, value_parser = present::parse_month)]
    month: Option<String>,
  },
  /// Top scorers
  Players {
    league: League,
    #[arg(long, value_enum, default_value_t = PlayerSort::Goals)]
    sort: PlayerSort,
    #[arg(long)]
    asc: bool,
  },
  /// Champions League standings, matches and scorers
  ChampionsLeague {
    #[arg(long, value_enum, default_value_t = ClView::All)]
    view: ClView,
  },
  /// Force-refresh standings due at this hour (for cron)
  Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ClView {
  Standings,
  Matches,
  Scorers,
  All,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let config = config::Config::load(args.config.as_deref())?;
  let _guard = logging::init();

  let client = CachedFootballClient::new(&config)?;
  let options = FetchOptions {
    force_refresh: args.force_refresh,
  };

  match args.command {
    Command::Standings {
      league,
      season,
      sort,
      desc,
    } => {
      let season = season.unwrap_or(config.season);
      let mut result = client
        .standings(league.competition_id(), season, options)
        .await;
      let direction = if desc {
        SortDirection::Desc
      } else {
        SortDirection::Asc
      };
      for group in &mut result.data.groups {
        present::sort_standings(&mut group.table, sort, direction);
      }
      if args.json {
        print_json(&result.data)?;
      } else {
        print!("{}", present::render_standings(&result.data));
        println!("{}", present::render_source(&result));
      }
    }
    Command::Fixtures { league, month } => {
      // The cached document holds the whole season; filter after reading it
      let result = client
        .fixtures(league, options)
        .await
        .map(|list| match &month {
          Some(month) => present::filter_month(&list.fixtures, month),
          None => list.fixtures,
        });
      if args.json {
        print_json(&result.data)?;
      } else {
        println!("{} fixtures", league.name());
        print!("{}", present::render_fixtures(&present::group_by_month(&result.data)));
        println!("{}", present::render_source(&result));
      }
    }
    Command::Players { league, sort, asc } => {
      let mut result = client.players(league, options).await;
      let direction = if asc {
        SortDirection::Asc
      } else {
        SortDirection::Desc
      };
      present::sort_players(&mut result.data, sort, direction);
      if args.json {
        print_json(&result.data)?;
      } else {
        println!("{} top scorers", league.name());
        print!("{}", present::render_players(&result.data));
        println!("{}", present::render_source(&result));
      }
    }
    Command::ChampionsLeague { view } => {
      let result = client.champions_league(options).await;
      let data = &result.data;
      if args.json {
        match view {
          ClView::Standings => print_json(&data.standings)?,
          ClView::Matches => print_json(&data.matches)?,
          ClView::Scorers => print_json(&data.scorers)?,
          ClView::All => print_json(data)?,
        }
      } else {
        if matches!(view, ClView::Standings | ClView::All) {
          let league = League::ChampionsLeague;
          let standings = football::types::LeagueStandings {
            id: league.competition_id(),
            name: league.name().to_string(),
            country: league.country().to_string(),
            logo: String::new(),
            flag: String::new(),
            season: config.season,
            groups: data.standings.clone(),
          };
          print!("{}", present::render_standings(&standings));
        }
        if matches!(view, ClView::Matches | ClView::All) {
          print!("{}", present::render_fixtures(&present::group_by_month(&data.matches)));
        }
        if matches!(view, ClView::Scorers | ClView::All) {
          println!();
          print!("{}", present::render_players(&data.scorers));
        }
        println!("{}", present::render_source(&result));
      }
    }
    Command::Refresh => {
      let summary = refresh::run(&client, config.season, chrono::Local::now()).await;
      if args.json {
        print_json(&summary)?;
      } else {
        for r in &summary.results {
          let status = if r.success { "ok" } else { "failed" };
          println!("{:<16} {}  {}", r.league, present::season_label(r.season), status);
        }
        println!(
          "{} refreshed, {} failed (weekend: {}, prime time: {})",
          summary.success, summary.failed, summary.is_weekend, summary.is_prime_time
        );
      }
    }
  }

  Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
