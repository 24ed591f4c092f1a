/// Adapters backed by the conda executable and its on-disk metadata
mod conda_cli;
mod fixed_channels;
mod metadata_reader;

pub use conda_cli::{parse_default_channels, parse_list_header, parse_pkgs_dirs, CondaCli};
pub use fixed_channels::FixedChannelConfig;
pub use metadata_reader::{
    find_dist_info_metadata, locate_site_packages, parse_pypi_metadata, CondaMetadataReader,
};
