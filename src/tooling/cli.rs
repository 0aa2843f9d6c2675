//! CLI Tooling
//!
//! Command-line interface for collation, aggregation and packaging. Each
//! command returns the text to print; the binary only prints it.

use crate::aggregate::aggregate_results;
use crate::collate::{collate_entities, parse_nested_tree, EntityKind};
use crate::config::{BenchConfig, ConfigLoader};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::package::{package_result, PackageRequest};
use crate::tooling::format::{
    format_aggregate_summary_text, format_collation_text, CollationSection,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Benchreg CLI - benchmark registry utilities
#[derive(Debug, Parser)]
#[command(name = "benchreg", version)]
#[command(about = "Collate registry entities, aggregate results, and package evaluations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Overlay logging flags onto the configured logging settings.
    ///
    /// `--log-file` is not folded in here; it goes to [`init_logging`] so that
    /// it outranks `BENCHREG_LOG_FILE`.
    ///
    /// [`init_logging`]: crate::logging::init_logging
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        config
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Collate dataset/task/model definitions into JSON for the web front-end
    Collate {
        /// Registry root to scan (default: collate.registry_root from config)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Collate a single entity kind
        #[arg(long, value_enum, conflicts_with = "indicator")]
        kind: Option<EntityKind>,
        /// Collate leaves marked by a custom indicator file pattern
        #[arg(long)]
        indicator: Option<String>,
        /// Write JSON to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Output format (json or text)
        #[arg(long, default_value = "json", value_parser = ["json", "text"])]
        format: String,
    },
    /// Merge per-submission result.json blurbs into one results file
    Aggregate {
        /// Directory containing the result JSON files
        #[arg(long, alias = "input_dir")]
        input_dir: Option<PathBuf>,
        /// Path to the aggregated output JSON file
        #[arg(long, alias = "output_path")]
        output_path: Option<PathBuf>,
        /// Maximum number of unreadable results before aborting
        #[arg(long, alias = "error_threshold")]
        error_threshold: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["json", "text"])]
        format: String,
    },
    /// Package an evaluation result with its dataset, task and model
    Package {
        /// Evaluation JSON produced by the benchmark run
        #[arg(long)]
        evaluation_fp: PathBuf,
        #[arg(long)]
        dataset: String,
        #[arg(long)]
        task: String,
        #[arg(long)]
        model: String,
        /// Where to write the packaged result
        #[arg(long)]
        result_fp: PathBuf,
        /// Replace an existing packaged result
        #[arg(long)]
        do_overwrite: bool,
    },
}

/// CLI execution context: workspace plus loaded configuration.
pub struct CliContext {
    workspace_root: PathBuf,
    config: BenchConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Collate {
                root,
                kind,
                indicator,
                output,
                format,
            } => self.handle_collate(
                root.as_deref(),
                *kind,
                indicator.as_deref(),
                output.as_deref(),
                format,
            ),
            Commands::Aggregate {
                input_dir,
                output_path,
                error_threshold,
                format,
            } => {
                let aggregate = &self.config.aggregate;
                let input_dir = self.resolve(input_dir.as_deref().unwrap_or(&aggregate.input_dir));
                let output_path =
                    self.resolve(output_path.as_deref().unwrap_or(&aggregate.output_path));
                let threshold = error_threshold.unwrap_or(aggregate.error_threshold);

                let summary = aggregate_results(&input_dir, &output_path, threshold)?;
                match format.as_str() {
                    "json" => Ok(serde_json::to_string_pretty(&summary)?),
                    _ => Ok(format_aggregate_summary_text(&summary)),
                }
            }
            Commands::Package {
                evaluation_fp,
                dataset,
                task,
                model,
                result_fp,
                do_overwrite,
            } => {
                let request = PackageRequest {
                    evaluation_fp: self.resolve(evaluation_fp),
                    dataset: dataset.clone(),
                    task: task.clone(),
                    model: model.clone(),
                    result_fp: self.resolve(result_fp),
                    do_overwrite: *do_overwrite,
                };
                let package = package_result(&request)?;
                Ok(format!(
                    "Packaged result for {}/{}/{} (version {}) to {}",
                    package.dataset,
                    package.task,
                    package.model,
                    package.version,
                    request.result_fp.display()
                ))
            }
        }
    }

    /// Handle collate command
    fn handle_collate(
        &self,
        root: Option<&Path>,
        kind: Option<EntityKind>,
        indicator: Option<&str>,
        output: Option<&Path>,
        format: &str,
    ) -> Result<String, ApiError> {
        let root = self.resolve(root.unwrap_or(&self.config.collate.registry_root));

        let single = indicator
            .map(str::to_string)
            .or_else(|| kind.map(|k| k.indicator().to_string()));
        let (json, sections) = match single {
            Some(indicator) => {
                let nodes = parse_nested_tree(&root, &indicator)?;
                let json = serde_json::to_string_pretty(&nodes)?;
                (json, vec![CollationSection::new(indicator, nodes)])
            }
            None => {
                let collection = collate_entities(&root)?;
                let json = serde_json::to_string_pretty(&collection)?;
                let sections: Vec<CollationSection> = EntityKind::ALL
                    .iter()
                    .map(|kind| {
                        CollationSection::new(kind.collection(), collection.get(*kind).clone())
                    })
                    .collect();
                (json, sections)
            }
        };

        if let Some(output) = output {
            let output = self.resolve(output);
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, &json)?;
            let total: usize = sections.iter().map(|s| s.nodes.len()).sum();
            info!(output = %output.display(), nodes = total, "Wrote collated entities");
            if format == "text" {
                return Ok(format_collation_text(&sections));
            }
            return Ok(format!("Wrote {} nodes to {}", total, output.display()));
        }

        match format {
            "text" => Ok(format_collation_text(&sections)),
            _ => Ok(json),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Collate { .. } => "collate",
        Commands::Aggregate { .. } => "aggregate",
        Commands::Package { .. } => "package",
    }
}
