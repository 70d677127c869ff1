//! `twin` - inspect a robot twin from the command line

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twin_core::assembly::validator::explode_sequence;
use twin_core::graph::impact::impact_analysis;
use twin_core::graph::traversal::{
    dependency_chain, direct_dependencies, direct_dependents, topological_sort,
};
use twin_core::query::{parts_by_category, removable_parts, search_parts, total_weight};
use twin_core::{AssemblyState, AssemblyStore, Catalogs, PartCategory, TwinConfig};

fn cli() -> Command {
    let part_arg = || Arg::new("part").required(true).help("Part id");

    Command::new("twin")
        .version(twin_core::VERSION)
        .about("Robot digital twin: impact analysis and teardown planning")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("parts")
                .long("parts")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Parts catalog JSON (overrides config)"),
        )
        .arg(
            Arg::new("graph")
                .long("graph")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Dependency graph JSON (overrides config)"),
        )
        .arg(
            Arg::new("materials")
                .long("materials")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Materials catalog JSON (overrides config)"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Fail on catalog integrity issues"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(
            Command::new("impact")
                .about("Parts affected by removing a part, with severity")
                .arg(part_arg()),
        )
        .subcommand(
            Command::new("chain")
                .about("Everything a part transitively depends on")
                .arg(part_arg()),
        )
        .subcommand(
            Command::new("dependents")
                .about("Parts directly depending on a part")
                .arg(part_arg()),
        )
        .subcommand(
            Command::new("dependencies")
                .about("Parts a part directly depends on")
                .arg(part_arg()),
        )
        .subcommand(
            Command::new("teardown")
                .about("Safe removal order (default: all removable parts)")
                .arg(Arg::new("ids").num_args(0..).help("Part ids")),
        )
        .subcommand(Command::new("explode").about("Exploded view sequence"))
        .subcommand(
            Command::new("search")
                .about("Search parts by name or description")
                .arg(Arg::new("query").required(true)),
        )
        .subcommand(
            Command::new("weight")
                .about("Total weight in grams")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Only parts in this category"),
                ),
        )
        .subcommand(Command::new("check").about("Report catalog integrity issues"))
        .subcommand(
            Command::new("validate")
                .about("Validate a saved assembly state")
                .arg(
                    Arg::new("state")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Assembly state JSON"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<TwinConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => TwinConfig::load(path)?,
        None => TwinConfig::default(),
    };
    if let Some(path) = matches.get_one::<PathBuf>("parts") {
        config = config.with_parts_path(path);
    }
    if let Some(path) = matches.get_one::<PathBuf>("graph") {
        config = config.with_graph_path(path);
    }
    if let Some(path) = matches.get_one::<PathBuf>("materials") {
        config = config.with_materials_path(path);
    }
    if matches.get_flag("strict") {
        config = config.with_strict(true);
    }
    Ok(config)
}

fn init_tracing(config: &TwinConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn list(ids: &[&str]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.iter()
            .map(|id| format!("  {id}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn part_id<'m>(args: &'m ArgMatches, catalogs: &Catalogs) -> Result<&'m str> {
    let id = args
        .get_one::<String>("part")
        .map(String::as_str)
        .context("missing part id")?;
    if !catalogs.parts.contains(id) {
        bail!("unknown part '{id}'");
    }
    Ok(id)
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let config = load_config(matches)?;
    init_tracing(&config);

    let json = matches.get_flag("json");
    let catalogs = Catalogs::load(&config).context("loading catalogs")?;
    let parts = catalogs.parts.parts();

    match matches.subcommand() {
        Some(("impact", args)) => {
            let id = part_id(args, &catalogs)?;
            let impact = impact_analysis(&catalogs.graph, parts, id);
            print(json, &impact, || {
                format!(
                    "{} [{}]\n{}\n{}",
                    impact.removed_part_id,
                    impact.severity_level,
                    impact.description,
                    list(&impact.affected_part_ids.iter().map(String::as_str).collect::<Vec<_>>())
                )
            })?;
        }
        Some(("chain", args)) => {
            let ids = dependency_chain(&catalogs.graph, part_id(args, &catalogs)?);
            print(json, &ids, || list(&ids))?;
        }
        Some(("dependents", args)) => {
            let ids = direct_dependents(&catalogs.graph, part_id(args, &catalogs)?);
            print(json, &ids, || list(&ids))?;
        }
        Some(("dependencies", args)) => {
            let ids = direct_dependencies(&catalogs.graph, part_id(args, &catalogs)?);
            print(json, &ids, || list(&ids))?;
        }
        Some(("teardown", args)) => {
            let requested: Vec<String> = match args.get_many::<String>("ids") {
                Some(ids) => ids.cloned().collect(),
                None => removable_parts(parts).iter().map(|p| p.id.clone()).collect(),
            };
            for id in &requested {
                if !catalogs.parts.contains(id) {
                    bail!("unknown part '{id}'");
                }
            }
            let order = topological_sort(&catalogs.graph, &requested);
            print(json, &order, || list(&order))?;
        }
        Some(("explode", _)) => {
            let order = explode_sequence(parts);
            print(json, &order, || list(&order))?;
        }
        Some(("search", args)) => {
            let query = args.get_one::<String>("query").map_or("", String::as_str);
            let found = search_parts(parts, query);
            print(json, &found, || {
                found
                    .iter()
                    .map(|p| format!("  {:<16} {}", p.id, p.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Some(("weight", args)) => {
            let grams = match args.get_one::<String>("category") {
                Some(raw) => {
                    let category: PartCategory = raw.parse().map_err(anyhow::Error::msg)?;
                    total_weight(parts_by_category(parts, category))
                }
                None => total_weight(parts),
            };
            print(json, &grams, || format!("{grams} g"))?;
        }
        Some(("check", _)) => {
            let issues = catalogs.check();
            print(json, &issues, || {
                if issues.is_empty() {
                    "catalogs are consistent".to_string()
                } else {
                    issues
                        .iter()
                        .map(|i| format!("  {i}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            })?;
            if !issues.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(("validate", args)) => {
            let path = args
                .get_one::<PathBuf>("state")
                .context("missing state path")?;
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let state: AssemblyState = serde_json::from_str(&text)
                .with_context(|| format!("decoding {}", path.display()))?;

            let report = AssemblyStore::new(catalogs).with_state(state).validate();
            print(json, &report, || {
                if report.is_valid() {
                    "assembly state is valid".to_string()
                } else {
                    report
                        .errors()
                        .iter()
                        .map(|e| format!("  {e}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            })?;
            if !report.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
        _ => bail!("unknown command"),
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    run(&cli().get_matches())
}
