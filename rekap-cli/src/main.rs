use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rekap_core::time::parse_dmy_strict;
use rekap_core::{generate_windows, Category, RuleSet, RunConfig};
use rekap_finance::{build_report, similarity_scores, Classifier};
use rekap_ingest::read_ledger;
use std::path::PathBuf;
use tracing::info;

mod config;
mod logging;
mod output;

#[derive(Parser, Debug)]
#[command(name = "rekap", version, about = "Weekly fuel-expense recap per job role")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a ledger CSV and print/write the weekly recap
    Summarize {
        /// Ledger export (CSV with TRANS. DATE, DESCRIPTION, DEBIT columns)
        #[arg(long)]
        input: PathBuf,

        /// First day of the first week, dd/mm/yyyy (overrides the config file)
        #[arg(long)]
        start: Option<String>,

        /// Config file (defaults to ./rekap.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Flag rows whose entry date is more than this many days off
        #[arg(long)]
        anomaly_days: Option<i64>,

        /// Write kategori.csv, rekap_mingguan.csv and anomali_tanggal.csv here
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the whole report as JSON instead of tables
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        names: NameArgs,
    },

    /// Show which category a single description gets
    Classify {
        description: String,

        /// Show every rule with its best similarity score
        #[arg(long)]
        explain: bool,

        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        names: NameArgs,
    },

    /// List the weekly windows between two dates
    Windows {
        #[arg(long)]
        start: String,

        #[arg(long)]
        end: String,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file
    Init {
        #[arg(long, default_value = "rekap.toml")]
        path: PathBuf,
    },
}

/// Per-run names, comma-separated, matched before built-in keywords
#[derive(Args, Debug, Default)]
struct NameArgs {
    #[arg(long)]
    manager: Option<String>,
    #[arg(long)]
    asmen: Option<String>,
    #[arg(long)]
    admin: Option<String>,
    #[arg(long)]
    mis: Option<String>,
    #[arg(long)]
    staff_lapang: Option<String>,
    #[arg(long)]
    other: Option<String>,
}

impl NameArgs {
    fn to_rule_set(&self) -> RuleSet {
        let mut rules = RuleSet::new();
        let lists = [
            (Category::Manager, &self.manager),
            (Category::Asmen, &self.asmen),
            (Category::Admin, &self.admin),
            (Category::Mis, &self.mis),
            (Category::StaffLapang, &self.staff_lapang),
            (Category::Other, &self.other),
        ];
        for (category, list) in lists {
            if let Some(list) = list {
                rules.add_names(category, list);
            }
        }
        rules
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Summarize {
            input,
            start,
            config,
            anomaly_days,
            out_dir,
            json,
            names,
        } => {
            let file_cfg = config::load_config(config.as_deref())?;
            let run_cfg = resolve_run_config(&file_cfg, start.as_deref(), anomaly_days, &names)?;

            if !input.exists() {
                bail!("input not found: {} (pass --input <path>)", input.display());
            }
            let ledger = read_ledger(&input)
                .with_context(|| format!("cannot read input {}", input.display()))?;
            info!(rows = ledger.len(), path = %input.display(), "ledger loaded");

            let report = build_report(&ledger.transactions, &run_cfg);

            if json {
                output::print_json(&report)?;
            } else {
                output::print_text(&report, &run_cfg);
            }

            if let Some(dir) = out_dir {
                let written = output::write_outputs(&report, &dir)?;
                for p in written {
                    eprintln!("Wrote {}", p.display());
                }
            }
        }

        Command::Classify {
            description,
            explain,
            config,
            names,
        } => {
            let file_cfg = config::load_config(config.as_deref())?;
            let mut custom = file_cfg.custom_rules()?;
            custom.merge(&names.to_rule_set());
            let thresholds = file_cfg.thresholds;
            thresholds.validate()?;

            let classifier = Classifier::new(&custom, &thresholds);
            if explain {
                for (i, rule) in classifier.rules().iter().enumerate() {
                    let best = rule
                        .keywords
                        .iter()
                        .map(|k| similarity_scores(&description, k).best())
                        .fold(0.0, f64::max);
                    println!(
                        "{:>2}. {:<12} {:?} threshold={} best={:.1} matched={}",
                        i + 1,
                        rule.category.as_str(),
                        rule.source,
                        rule.threshold,
                        best,
                        rule.matches(Some(description.as_str())),
                    );
                }
            }
            println!("{}", classifier.classify(Some(description.as_str())));
        }

        Command::Windows { start, end } => {
            let start = parse_dmy_strict(&start).context("--start")?;
            let end = parse_dmy_strict(&end).context("--end")?;
            let windows = generate_windows(start, end);
            if windows.is_empty() {
                println!("(no windows: start is after end)");
            }
            for w in &windows {
                let marker = if w.is_truncated() { " (truncated)" } else { "" };
                println!("{}{}", w.label(), marker);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init { path } => {
                config::init_config(&path)?;
            }
        },
    }

    Ok(())
}

/// CLI flags win over the config file; names from both are combined.
fn resolve_run_config(
    file_cfg: &config::FileConfig,
    start: Option<&str>,
    anomaly_days: Option<i64>,
    names: &NameArgs,
) -> Result<RunConfig> {
    let start = match start.or(file_cfg.week_start.as_deref()) {
        Some(s) => parse_dmy_strict(s).context("week start")?,
        None => bail!("no week start given (pass --start dd/mm/yyyy or set week_start in the config)"),
    };

    let mut custom = file_cfg.custom_rules()?;
    custom.merge(&names.to_rule_set());

    let anomaly_days = anomaly_days.unwrap_or(file_cfg.anomaly_threshold_days);
    if anomaly_days < 0 {
        bail!("anomaly threshold must not be negative, got {anomaly_days}");
    }

    file_cfg.thresholds.validate()?;

    let mut run_cfg = RunConfig::new(start)
        .with_custom(custom)
        .with_anomaly_threshold_days(anomaly_days);
    run_cfg.thresholds = file_cfg.thresholds;
    Ok(run_cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cli_parses_summarize() {
        let cli = Cli::try_parse_from([
            "rekap",
            "summarize",
            "--input",
            "ledger.csv",
            "--start",
            "06/01/2025",
            "--asmen",
            "irfan, dewi",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Summarize { names, start, .. } => {
                assert_eq!(start.as_deref(), Some("06/01/2025"));
                let rules = names.to_rule_set();
                assert_eq!(rules.names(Category::Asmen), &["irfan".to_string(), "dewi".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let file_cfg: config::FileConfig = toml::from_str(
            r#"
week_start = "30/12/2024"
anomaly_threshold_days = 1

[custom_names]
asmen = "irfan"
"#,
        )
        .unwrap();
        let names = NameArgs {
            mis: Some("dedi".into()),
            ..NameArgs::default()
        };

        let cfg = resolve_run_config(&file_cfg, Some("06/01/2025"), None, &names).unwrap();
        assert_eq!(cfg.week_start, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(cfg.anomaly_threshold_days, 1);
        assert_eq!(cfg.custom.names(Category::Asmen), &["irfan".to_string()]);
        assert_eq!(cfg.custom.names(Category::Mis), &["dedi".to_string()]);

        let cfg = resolve_run_config(&file_cfg, None, Some(7), &NameArgs::default()).unwrap();
        assert_eq!(cfg.week_start, NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        assert_eq!(cfg.anomaly_threshold_days, 7);
    }

    #[test]
    fn test_missing_week_start_is_an_error() {
        let err = resolve_run_config(
            &config::FileConfig::default(),
            None,
            None,
            &NameArgs::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("week start"));
    }
}
