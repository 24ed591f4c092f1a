use crate::application::dto::{ExportMethod, ExportOutput, ExportRequest, ExportResponse};
use crate::env_reduction::domain::{
    DependencyGraph, Package, PackageCatalog, RawDependencies, RawPackageRecord,
};
use crate::env_reduction::services::{ChannelResolver, Minifier, Relaxer};
use crate::ports::outbound::{
    ChannelConfigProvider, EnvironmentInventory, InventoryProvider, MetadataResolver,
    ProgressReporter,
};
use crate::shared::error::EnvError;
use crate::shared::Result;

/// Packages with resolved dependencies plus the names whose metadata was missing
type ResolvedPackages = (Vec<Package>, Vec<String>);

/// ExportEnvironmentUseCase - Core use case of conda-minify
///
/// Orchestrates inventory → metadata → catalog → graph → reduction, with
/// every piece of infrastructure injected through a port.
///
/// # Type Parameters
/// * `IP` - InventoryProvider implementation
/// * `MR` - MetadataResolver implementation
/// * `CC` - ChannelConfigProvider implementation
/// * `PR` - ProgressReporter implementation
pub struct ExportEnvironmentUseCase<IP, MR, CC, PR> {
    inventory_provider: IP,
    metadata_resolver: MR,
    channel_config: CC,
    progress_reporter: PR,
}

impl<IP, MR, CC, PR> ExportEnvironmentUseCase<IP, MR, CC, PR>
where
    IP: InventoryProvider,
    MR: MetadataResolver,
    CC: ChannelConfigProvider,
    PR: ProgressReporter,
{
    /// Creates a new ExportEnvironmentUseCase with injected dependencies
    pub fn new(
        inventory_provider: IP,
        metadata_resolver: MR,
        channel_config: CC,
        progress_reporter: PR,
    ) -> Self {
        Self {
            inventory_provider,
            metadata_resolver,
            channel_config,
            progress_reporter,
        }
    }

    /// Executes the export
    ///
    /// # Errors
    /// * `EnvError::EnvironmentNotFound` when the target does not exist
    /// * `ReductionError::Cycle` under `CyclePolicy::Raise`
    /// * `ReductionError::ConflictingPolicy` when relax pins and overrides one package
    /// * `EnvError::Validation` when the tree root is not installed
    pub fn execute(&self, request: ExportRequest) -> Result<ExportResponse> {
        // Step 1: Read the installed packages
        let inventory = self.read_and_report_inventory(&request)?;

        // Step 2: Resolve dependency metadata for every record
        let (packages, missing_metadata) = self.resolve_packages(&inventory);

        // Step 3: Build the catalog
        let catalog = PackageCatalog::from_packages(packages);
        let collisions = catalog.collisions().to_vec();

        // Step 4: Build the graph and run the requested reduction
        let output = match &request.method {
            ExportMethod::Minify(policy) => {
                let graph = self.build_graph(&catalog, &request)?;
                let channels = self.channel_resolver();
                self.progress_reporter.report("✂️  Minifying environment...");
                ExportOutput::Environment(Minifier::minify(
                    &catalog,
                    &graph,
                    &channels,
                    &inventory.name,
                    policy,
                ))
            }
            ExportMethod::Relax(policy) => {
                let channels = self.channel_resolver();
                self.progress_reporter.report("🔓 Relaxing environment...");
                ExportOutput::Environment(Relaxer::relax(
                    &catalog,
                    &channels,
                    &inventory.name,
                    policy,
                )?)
            }
            ExportMethod::Tree { package, max_depth } => {
                let graph = self.build_graph(&catalog, &request)?;
                let Some(canonical) = catalog.canonical_name(package) else {
                    return Err(EnvError::Validation {
                        message: format!(
                            "Package '{}' is not installed in environment '{}'",
                            package, inventory.name
                        ),
                    }
                    .into());
                };
                ExportOutput::Tree {
                    package: canonical.to_string(),
                    tree: graph.get_package_dependency_tree(canonical, *max_depth),
                }
            }
        };

        Ok(ExportResponse::new(
            inventory.name,
            catalog.len(),
            missing_metadata,
            collisions,
            output,
        ))
    }

    fn read_and_report_inventory(&self, request: &ExportRequest) -> Result<EnvironmentInventory> {
        self.progress_reporter
            .report(&format!("📖 Reading environment: {}", request.target));

        let inventory = self.inventory_provider.read_inventory(&request.target)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} package(s) in '{}'",
            inventory.packages.len(),
            inventory.name
        ));

        Ok(inventory)
    }

    /// Turns every record into a package, asking the resolver only for
    /// records without inline dependencies. Missing or unreadable metadata
    /// degrades to an empty dependency set.
    fn resolve_packages(&self, inventory: &EnvironmentInventory) -> ResolvedPackages {
        let total = inventory.packages.len();
        let mut packages = Vec::with_capacity(total);
        let mut missing = Vec::new();

        if total > 0 {
            self.progress_reporter
                .report("🔍 Reading package dependency metadata...");
        }

        for (index, record) in inventory.packages.iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(&record.name));

            let depends = match &record.depends {
                Some(depends) => depends.clone(),
                None => self.resolve_record(inventory, record, &mut missing),
            };
            packages.push(Package::from_record(record, &depends));
        }

        if total > 0 {
            self.progress_reporter.report_completion(&format!(
                "✅ Resolved dependencies for {} package(s)",
                total
            ));
        }

        if !missing.is_empty() {
            self.progress_reporter.report_error(&format!(
                "Warning: No dependency metadata for {} package(s); they are treated as having no dependencies",
                missing.len()
            ));
        }

        (packages, missing)
    }

    fn resolve_record(
        &self,
        inventory: &EnvironmentInventory,
        record: &RawPackageRecord,
        missing: &mut Vec<String>,
    ) -> RawDependencies {
        match self
            .metadata_resolver
            .resolve_dependencies(inventory, record)
        {
            Ok(Some(depends)) => depends,
            Ok(None) => {
                log::debug!("No dependency metadata found for {}", record.name);
                missing.push(record.name.clone());
                RawDependencies::default()
            }
            Err(e) => {
                log::warn!("Failed to read metadata of {}: {:#}", record.name, e);
                missing.push(record.name.clone());
                RawDependencies::default()
            }
        }
    }

    fn build_graph(
        &self,
        catalog: &PackageCatalog,
        request: &ExportRequest,
    ) -> Result<DependencyGraph> {
        let graph = DependencyGraph::build(catalog, request.cycle_policy)?;
        log::debug!(
            "Dependency graph: {} node(s), {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Falls back to the first-party channel set when the configuration
    /// cannot be read.
    fn channel_resolver(&self) -> ChannelResolver {
        match self.channel_config.default_channels() {
            Ok(configured) => ChannelResolver::from_configured(&configured),
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "Warning: Could not read the default channels ({}); assuming {}",
                    e,
                    ChannelResolver::first_party()
                        .default_channels()
                        .iter()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                ChannelResolver::first_party()
            }
        }
    }
}
