//! Text report over the democracy table, plus CSV/JSON export.
//!
//! Usage:
//!   democracy_report [--input table.csv] [--export-dir out/] [--rank-size 5] [SEARCH]...

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use democracy_atlas::config::AtlasConfig;
use democracy_atlas::data::model::{Dataset, Record};
use democracy_atlas::data::{catalog, export, filter, loader, query, stats};

const DEFAULT_SEARCH: [&str; 3] = ["Korea", "United States", "China"];

#[derive(Parser, Debug)]
#[command(
    name = "democracy_report",
    about = "Summarise the democracy-index table and export it as CSV and JSON"
)]
struct Args {
    /// Table to analyse (.csv or .json) instead of the built-in data
    #[arg(short, long, env = "ATLAS_INPUT")]
    input: Option<PathBuf>,

    /// Directory receiving democracy_geo_data.csv / .json
    #[arg(short, long, env = "ATLAS_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    /// Length of the top/bottom rankings
    #[arg(short, long, env = "ATLAS_RANK_SIZE")]
    rank_size: Option<usize>,

    /// Country names to look up (case-insensitive substring)
    search: Vec<String>,
}

impl Args {
    /// Settings with unset flags taken from the dashboard defaults.
    fn config(&self) -> AtlasConfig {
        let defaults = AtlasConfig::default();
        AtlasConfig {
            rank_size: self.rank_size.unwrap_or(defaults.rank_size),
            export_dir: self.export_dir.clone().unwrap_or(defaults.export_dir),
            ..defaults
        }
    }

    fn needles(&self) -> Vec<String> {
        if self.search.is_empty() {
            DEFAULT_SEARCH.iter().map(|s| s.to_string()).collect()
        } else {
            self.search.clone()
        }
    }
}

fn print_ranking(title: &str, records: &[&Record]) {
    println!("\n{title}");
    for r in records {
        println!("  {:<16} {:>5.2}  {}", r.name(), r.score(), r.category());
    }
}

fn print_search(table: &Dataset, needle: &str) {
    let hits = filter::search_by_name(table, needle);
    if hits.is_empty() {
        println!("\nNo country matches '{needle}'.");
        return;
    }
    for r in hits.records() {
        let p = r.position();
        println!("\nCountry:         {}", r.name());
        println!("Democracy index: {}", r.score());
        println!("Regime type:     {}", r.category());
        println!("Latitude:        {}", p.latitude);
        println!("Longitude:       {}", p.longitude);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();
    let table = match &args.input {
        Some(path) => loader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => catalog::load(),
    };
    log::info!("Analysing {} countries", table.len());

    println!("Democracy index geographic analysis");
    println!("{}", "=".repeat(50));

    let summary = stats::summary(&table).context("democracy table is empty")?;
    println!("Countries analysed: {}", summary.count);
    println!("Mean index:         {:.2}", summary.mean);
    println!("Index range:        {:.2} - {:.2}", summary.min, summary.max);

    println!("\nRegime types:");
    for (category, n) in stats::category_counts(&table) {
        println!("  {category}: {n} countries");
    }

    println!("\nBy region:");
    println!("{}", "=".repeat(60));
    for s in stats::region_stats(&table) {
        println!("{}:", s.region);
        println!("  mean index: {:.2}", s.mean);
        println!("  countries:  {}", s.count);
        match s.std_dev {
            Some(sd) => println!("  std dev:    {sd:.2}"),
            None => println!("  std dev:    n/a"),
        }
    }

    for (ext, label) in [("csv", "CSV"), ("json", "JSON")] {
        let path = config.export_dir.join(format!("democracy_geo_data.{ext}"));
        export::export_file(&table, &path)
            .with_context(|| format!("exporting {label} to {}", path.display()))?;
        println!("\nSaved {label} data to {}", path.display());
    }

    print_ranking(
        &format!("Top {} by democracy index:", config.rank_size),
        &query::top_k(&table, config.rank_size),
    );
    print_ranking(
        &format!("Bottom {} by democracy index:", config.rank_size),
        &query::bottom_k(&table, config.rank_size),
    );

    println!("\n{}", "=".repeat(50));
    println!("Country lookup:");
    for needle in args.needles() {
        print_search(&table, &needle);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["democracy_report"]).unwrap();
        assert_eq!(args.config(), AtlasConfig::default());
        assert_eq!(args.needles(), vec!["Korea", "United States", "China"]);
        assert!(args.input.is_none());
    }

    #[test]
    fn test_args_flags_and_search_terms() {
        let args = Args::try_parse_from([
            "democracy_report",
            "--input",
            "table.json",
            "--export-dir",
            "/tmp/out",
            "--rank-size",
            "3",
            "norway",
            "korea",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("table.json")));
        let config = args.config();
        assert_eq!(config.rank_size, 3);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(args.needles(), vec!["norway", "korea"]);
    }

    #[test]
    fn test_help_and_unknown_flags_are_not_search_terms() {
        let err = Args::try_parse_from(["democracy_report", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["democracy_report", "--inptu", "x.csv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);

        let err = Args::try_parse_from(["democracy_report", "--rank-size", "many"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
