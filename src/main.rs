mod cli;

use cli::Args;
use conda_minify::adapters::outbound::conda::{CondaCli, CondaMetadataReader, FixedChannelConfig};
use conda_minify::adapters::outbound::console::StderrProgressReporter;
use conda_minify::adapters::outbound::filesystem::SnapshotReader;
use conda_minify::application::dto::{ExportOutput, ExportRequest, ExportResponse};
use conda_minify::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use conda_minify::application::use_cases::ExportEnvironmentUseCase;
use conda_minify::config::{self, ConfigFile};
use conda_minify::env_reduction::services::FIRST_PARTY_CHANNELS;
use conda_minify::ports::outbound::{ChannelConfigProvider, InventoryProvider, MetadataResolver};
use conda_minify::shared::error::ExitCode;
use conda_minify::shared::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Load configuration (explicit path, or auto-discovered in the working directory)
    let config = load_config(args.config.as_deref())?;

    let format = match args.format {
        Some(format) => format,
        None => config
            .as_ref()
            .map(ConfigFile::output_format)
            .transpose()?
            .flatten()
            .unwrap_or_default(),
    };
    let cycle_policy = match args.cycle_policy {
        Some(policy) => policy,
        None => config
            .as_ref()
            .map(ConfigFile::cycle_policy)
            .transpose()?
            .flatten()
            .unwrap_or_default(),
    };

    // Create request
    let target = args.target();
    let method = args.command.into_method(config.as_ref())?;
    let request = ExportRequest::new(target, method, cycle_policy);

    // Create adapters (Dependency Injection) and execute
    let progress_reporter = StderrProgressReporter::new();
    let configured_pkgs_dirs = config.as_ref().and_then(|c| c.pkgs_dirs.clone());
    let configured_channels = config.as_ref().and_then(|c| c.default_channels.clone());

    let response = match args.snapshot {
        Some(snapshot) => {
            let channels = configured_channels.unwrap_or_else(|| {
                FIRST_PARTY_CHANNELS.iter().map(|c| c.to_string()).collect()
            });
            execute(
                SnapshotReader::new(snapshot),
                CondaMetadataReader::new(configured_pkgs_dirs.unwrap_or_default()),
                FixedChannelConfig::new(channels),
                progress_reporter,
                request,
            )?
        }
        None => {
            let conda = CondaCli::new();
            let pkgs_dirs = configured_pkgs_dirs.unwrap_or_else(|| conda_pkgs_dirs(&conda));
            let metadata_reader = CondaMetadataReader::new(pkgs_dirs);
            match configured_channels {
                Some(channels) => execute(
                    conda,
                    metadata_reader,
                    FixedChannelConfig::new(channels),
                    progress_reporter,
                    request,
                )?,
                None => execute(
                    conda.clone(),
                    metadata_reader,
                    conda,
                    progress_reporter,
                    request,
                )?,
            }
        }
    };

    report_diagnostics(&response);

    // Format and present output
    eprintln!("{}", FormatterFactory::progress_message(format));
    let formatter = FormatterFactory::create(format);
    let formatted_output = match &response.output {
        ExportOutput::Environment(spec) => formatter.format(spec)?,
        ExportOutput::Tree { package, tree } => formatter.format_tree(package, tree)?,
    };

    let presenter = PresenterFactory::create(PresenterType::from_output_path(args.file.clone()));
    presenter.present(&formatted_output)?;

    if let Some(path) = &args.file {
        eprintln!(
            "Minified environment specification written to \"{}\"",
            path.display()
        );
    }

    Ok(())
}

fn execute<IP, MR, CC>(
    inventory_provider: IP,
    metadata_resolver: MR,
    channel_config: CC,
    progress_reporter: StderrProgressReporter,
    request: ExportRequest,
) -> Result<ExportResponse>
where
    IP: InventoryProvider,
    MR: MetadataResolver,
    CC: ChannelConfigProvider,
{
    let use_case = ExportEnvironmentUseCase::new(
        inventory_provider,
        metadata_resolver,
        channel_config,
        progress_reporter,
    );
    use_case.execute(request)
}

/// Names behind the summary warnings of the use case
fn report_diagnostics(response: &ExportResponse) {
    if !response.missing_metadata.is_empty() {
        eprintln!(
            "⚠️  Missing dependency metadata: {}",
            response.missing_metadata.join(", ")
        );
    }
    for collision in &response.collisions {
        eprintln!(
            "⚠️  Name collision: '{}' and '{}' both normalize to '{}'; '{}' is only matched by its exact name",
            collision.kept, collision.shadowed, collision.normalized_key, collision.shadowed
        );
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Option<ConfigFile>> {
    match path {
        Some(path) => Ok(Some(config::load_config_from_path(path)?)),
        None => {
            let cwd = std::env::current_dir()?;
            let discovered = config::discover_config(&cwd)?;
            if discovered.is_some() {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    cwd.join(config::CONFIG_FILENAME).display()
                );
            }
            Ok(discovered)
        }
    }
}

/// Package caches of the conda installation; without them native metadata
/// is simply not found.
fn conda_pkgs_dirs(conda: &CondaCli) -> Vec<PathBuf> {
    conda.pkgs_dirs().unwrap_or_else(|e| {
        log::warn!("Could not read conda pkgs_dirs: {:#}", e);
        Vec::new()
    })
}
