use agrispec::config::Config;
use agrispec::query;
use agrispec::record;
use agrispec::schema::{Category, FieldDef, SchemaRegistry};
use agrispec::units::{self, ConversionError, UnitPolicy};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const DEFAULT_CATALOG_DIR: &str = "catalog";

#[derive(Parser)]
#[command(name = "agrispec")]
#[command(about = "Tractor spec canonicalization and catalog filtering", long_about = None)]
struct Cli {
    /// Config file (default: ./agrispec.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one raw value to its canonical numeric field
    Convert {
        /// Variable name (e.g., "rated_power_net")
        variable: String,

        /// Raw value string (e.g., "370 HP")
        raw: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract the first number from a string
    Number {
        text: String,
    },

    /// List the fields of the tractor schema
    Fields {
        /// Only fields of this category (e.g., "hydraulics")
        #[arg(long)]
        category: Option<Category>,

        /// Only numeric (filterable by range) fields
        #[arg(long)]
        numeric: bool,
    },

    /// List variables that have a unit conversion
    Variables,

    /// List all tractors in a catalog directory
    List {
        /// Catalog directory path
        path: Option<PathBuf>,
    },

    /// Export a catalog as JSON
    Export {
        /// Catalog directory path
        path: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Filter a catalog (e.g., "rated_power_net_kw>=150" "company~deere")
    Filter {
        /// Filter expressions, all must match
        #[arg(required = true)]
        exprs: Vec<String>,

        /// Catalog directory path
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Extra columns to show (comma separated)
        #[arg(long, value_delimiter = ',')]
        show: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::discover(cli.config.as_deref(), Path::new(".")) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    let result = match cli.command {
        Commands::Convert { variable, raw, json } => convert(&variable, &raw, json),
        Commands::Number { text } => number(&text),
        Commands::Fields { category, numeric } => {
            list_fields(category, numeric);
            Ok(())
        }
        Commands::Variables => {
            list_variables();
            Ok(())
        }
        Commands::List { path } => list_catalog(&catalog_dir(path, &config), &config),
        Commands::Export { path, output } => {
            export_catalog(&catalog_dir(path, &config), output.as_deref(), &config)
        }
        Commands::Filter { exprs, dir, show } => {
            filter_catalog(&catalog_dir(dir, &config), &exprs, &show, &config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn catalog_dir(arg: Option<PathBuf>, config: &Config) -> PathBuf {
    arg.or_else(|| config.catalog.dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_DIR))
}

fn convert(variable: &str, raw: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = units::try_canonicalize(variable, raw);

    if json {
        let value = match &result {
            Ok(c) => serde_json::json!({ "field": c.field, "value": c.value }),
            Err(_) => serde_json::json!({ "field": null, "value": null }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match result {
        Ok(c) => println!("{} = {}", c.field, c),
        Err(e) => {
            println!("No canonical value: {}", e);
            if let ConversionError::UnrecognizedUnit { .. } = e {
                if let Some(rule) = units::rule_for(variable) {
                    println!("Recognized units: {}", unit_tokens(rule.policy));
                }
            }
        }
    }
    Ok(())
}

fn number(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    match units::extract_number(text) {
        Some(n) => println!("{}", n),
        None => return Err(format!("No number found in '{}'", text).into()),
    }
    Ok(())
}

fn list_fields(category: Option<Category>, numeric: bool) {
    let schema = SchemaRegistry::tractor();

    if numeric {
        for field in schema
            .numeric_fields()
            .filter(|f| category.map_or(true, |c| f.category == c))
        {
            print_field(field);
        }
        return;
    }

    let categories: Vec<Category> = match category {
        Some(c) => vec![c],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("{}:", category.name());
        for field in schema.fields_in(category) {
            print!("  ");
            print_field(field);
        }
    }
}

fn print_field(field: &FieldDef) {
    match field.unit {
        Some(unit) => println!("- {} ({}, {})", field.name, field.kind, unit),
        None => println!("- {} ({})", field.name, field.kind),
    }
}

fn list_variables() {
    for rule in units::rules() {
        let unit = if rule.unit.is_empty() { "-" } else { rule.unit };
        println!(
            "{:<22} -> {:<26} [{}] {}",
            rule.variable,
            rule.field,
            unit,
            unit_tokens(rule.policy)
        );
    }
}

fn unit_tokens(policy: UnitPolicy) -> String {
    match policy {
        UnitPolicy::PassThrough(_) => "(no unit needed)".to_string(),
        UnitPolicy::Tokens(tokens) => tokens
            .iter()
            .map(|t| t.any_of.join("/"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn load(path: &Path, config: &Config) -> Result<record::Catalog, Box<dyn std::error::Error>> {
    let (catalog, validation) = record::load_catalog_from_directory(path, config)?;

    // Print validation issues if any
    if validation.has_issues() {
        eprintln!("{}", validation);
    }

    Ok(catalog)
}

fn list_catalog(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load(path, config)?;

    println!("Catalog: {} ({} tractors)", path.display(), catalog.len());
    for tractor in &catalog.records {
        println!(
            "  - {} ({}) [{} values]",
            tractor.model,
            tractor.company_display(),
            tractor.values.len()
        );
    }

    Ok(())
}

fn export_catalog(
    path: &Path,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load(path, config)?;
    let json = serde_json::to_string_pretty(&catalog)?;

    if let Some(output_path) = output {
        std::fs::write(output_path, json)?;
        println!("Catalog exported to {}", output_path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn filter_catalog(
    path: &Path,
    exprs: &[String],
    show: &[String],
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load(path, config)?;
    let filters = query::parse_filters(exprs)?;

    let matches = query::CatalogQuery::new(&catalog).filter(&filters)?;

    // Show filtered fields by default
    let columns: Vec<&str> = if show.is_empty() {
        let mut cols: Vec<&str> = Vec::new();
        for f in &filters {
            if !matches!(f.field.as_str(), "model" | "company") && !cols.contains(&f.field.as_str()) {
                cols.push(&f.field);
            }
        }
        cols
    } else {
        show.iter().map(|s| s.as_str()).collect()
    };

    print!("{}", query::format_records(&matches, &columns));
    println!("({} of {} tractors)", matches.len(), catalog.len());

    Ok(())
}
