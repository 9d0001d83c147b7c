use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use metanav::config::{load_config, save_config, MetanavConfig};
use metanav::errors::{MetanavError, Result};
use metanav::metadata::load_metadata;
use metanav::resolution::PathResolver;
use metanav::types::*;

/// Navigate service metadata documents.
#[derive(Parser)]
#[command(name = "metanav", about = "Navigate service metadata documents")]
struct Cli {
    /// Metadata document (JSON). Defaults to the file recorded in the config.
    #[arg(short, long, global = true)]
    metadata: Option<String>,
    /// Project path holding `.metanav/config.json` (default: current directory)
    #[arg(short, long, global = true)]
    path: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration
    Init,
    /// Resolve a path to a function import or entity
    Resolve {
        /// Slash-delimited path, e.g. `Contacts/Orders`
        target: String,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Print the URI template for a path
    Uri {
        /// Slash-delimited path
        target: String,
    },
    /// Search entity types by name
    Search {
        /// Case-insensitive substring (default: everything)
        query: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Show an entity type with its bound functions
    Entity {
        /// Fully-qualified entity type name
        full_name: String,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// List root function imports
    Roots,
    /// Report references that point at nothing
    Check,
    /// Show document statistics
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Runs a command. Returns `Ok(false)` when the command completed but found
/// problems worth a non-zero exit status.
fn run(cli: Cli) -> Result<bool> {
    let project_path = resolve_path(cli.path);
    let config = load_config(&project_path)?;
    let metadata_flag = cli.metadata;

    match cli.command {
        Commands::Init => {
            let config = MetanavConfig {
                metadata_file: metadata_flag.or(config.metadata_file),
                ..config
            };
            save_config(&project_path, &config)?;
            println!("Initialized metanav at {}", project_path.display());
        }
        Commands::Resolve { target, json } => {
            let metadata = open_metadata(&project_path, metadata_flag, &config)?;
            let resolver = PathResolver::with_config(&metadata, config)?;
            match resolver.resolve(&target)? {
                None => {
                    println!("No root function named '{}'", root_segment(&target));
                    return Ok(false);
                }
                Some(resolved) if json => print_json(&resolved)?,
                Some(Resolved::Function(func)) => print_function(&resolver, &func),
                Some(Resolved::Entity(entity)) => print_entity(&resolver, &entity),
            }
        }
        Commands::Uri { target } => {
            let metadata = open_metadata(&project_path, metadata_flag, &config)?;
            let resolver = PathResolver::with_config(&metadata, config)?;
            match resolver.build_uri_template(&target)? {
                Some(template) => println!("{}", template),
                None => {
                    println!("No root function named '{}'", root_segment(&target));
                    return Ok(false);
                }
            }
        }
        Commands::Search { query, json } => {
            let metadata = open_metadata(&project_path, metadata_flag, &config)?;
            let resolver = PathResolver::with_config(&metadata, config)?;
            let results = resolver.search_entities(query.as_deref());
            if json {
                print_json(&results)?;
            } else if results.is_empty() {
                println!("No entity types found for '{}'", query.unwrap_or_default());
            } else {
                for entity_type in &results {
                    println!(
                        "{} ({} properties, {} navigation, {} functions)",
                        entity_type.full_name,
                        entity_type.properties.len(),
                        entity_type.navigation_properties.len(),
                        entity_type.function_ids.len()
                    );
                }
            }
        }
        Commands::Entity { full_name, json } => {
            let metadata = open_metadata(&project_path, metadata_flag, &config)?;
            let resolver = PathResolver::with_config(&metadata, config)?;
            let entity = resolver.get_entity_by_name(&full_name)?;
            if json {
                print_json(&entity)?;
            } else {
                print_entity(&resolver, &entity);
            }
        }
        Commands::Roots => {
            let metadata = open_metadata(&project_path, metadata_flag, &config)?;
            let resolver = PathResolver::with_config(&metadata, config)?;
            for func in resolver.root_functions() {
                println!("{} -> {}", func.name, func.return_type);
            }
        }
        Commands::Check => {
            let metadata = open_metadata(&project_path, metadata_flag, &config)?;
            let dangling = metadata.dangling_references();
            if dangling.is_empty() {
                println!("No dangling references");
                return Ok(true);
            }
            for reference in &dangling {
                match reference {
                    DanglingReference::BoundFunction { entity, id } => {
                        println!("{}: bound function id {} does not exist", entity, id)
                    }
                    DanglingReference::ReturnType {
                        function,
                        type_name,
                    } => println!(
                        "function {}: return type '{}' does not exist",
                        function, type_name
                    ),
                    DanglingReference::NavigationTarget {
                        entity,
                        property,
                        type_name,
                    } => println!(
                        "{}.{}: navigation target '{}' does not exist",
                        entity, property, type_name
                    ),
                }
            }
            println!("{} dangling references", dangling.len());
            return Ok(false);
        }
        Commands::Status { json } => {
            let metadata = open_metadata(&project_path, metadata_flag, &config)?;
            let stats = metadata.stats(&config);
            if json {
                print_json(&stats)?;
            } else {
                println!("Metadata Status");
                println!("  Entity types:     {}", stats.entity_count);
                println!("  Collection types: {}", stats.collection_count);
                println!("  System types:     {}", stats.system_count);
                println!("  Functions:        {}", stats.function_count);
                println!("  Root functions:   {}", stats.root_function_count);
            }
        }
    }
    Ok(true)
}

/// Resolves an optional path argument to a `PathBuf`.
///
/// Defaults to the current working directory if no path is provided.
fn resolve_path(path: Option<String>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Loads the metadata document: the `--metadata` flag first, then the
/// config entry (relative to the project path).
fn open_metadata(
    project_path: &Path,
    flag: Option<String>,
    config: &MetanavConfig,
) -> Result<Metadata> {
    let path = match (flag, &config.metadata_file) {
        (Some(file), _) => PathBuf::from(file),
        (None, Some(file)) => project_path.join(file),
        (None, None) => {
            return Err(MetanavError::Config {
                message: "no metadata document given; pass --metadata or run `metanav init --metadata <file>`"
                    .to_string(),
            })
        }
    };
    load_metadata(&path)
}

fn root_segment(target: &str) -> &str {
    target.split('/').next().unwrap_or_default()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_function(resolver: &PathResolver<'_>, func: &FunctionImport) {
    let params: Vec<&str> = func
        .parameters
        .iter()
        .filter(|p| p.name != resolver.config().bound_parameter)
        .map(|p| p.name.as_str())
        .collect();
    println!("function {} (id {})", func.name, func.id);
    println!("  returns: {}", func.return_type);
    if func.is_root {
        println!("  root:    yes");
    }
    if resolver.has_parameters(func) {
        println!("  params:  {}", params.join(", "));
    }
}

fn print_entity(resolver: &PathResolver<'_>, entity: &Entity) {
    let entity_type = &entity.entity_type;
    println!("entity {}", entity_type.full_name);
    if !entity_type.properties.is_empty() {
        println!("  properties:");
        for prop in &entity_type.properties {
            println!("    {}: {}", prop.name, prop.type_name);
        }
    }
    if !entity_type.navigation_properties.is_empty() {
        println!("  navigation:");
        for nav in &entity_type.navigation_properties {
            println!("    {} -> {}", nav.name, nav.type_name);
        }
    }
    if !entity.functions.is_empty() {
        println!("  functions:");
        for func in &entity.functions {
            let suffix = if resolver.has_parameters(func) { "(...)" } else { "" };
            println!("    {}{} -> {}", func.name, suffix, func.return_type);
        }
    }
}
