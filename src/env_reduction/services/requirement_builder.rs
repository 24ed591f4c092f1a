use super::channel_resolver::ChannelResolver;
use crate::env_reduction::domain::{
    format_version, EnvironmentSpec, Package, PackageOrigin, VersionPolicy,
};

/// Builds requirement lines for single packages
///
/// Native packages render as `name[=version][=build]`, index packages as
/// `name[==version]`. Build strings never apply to index packages. When the
/// version is omitted but a build is requested, native lines carry a `=*`
/// placeholder so the build still lands in the third field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequirementBuilder {
    how: VersionPolicy,
    add_builds: bool,
}

impl RequirementBuilder {
    pub fn new(how: VersionPolicy, add_builds: bool) -> Self {
        Self { how, add_builds }
    }

    pub fn requirement(&self, package: &Package) -> String {
        match package.origin() {
            PackageOrigin::Native => self.native_requirement(package),
            PackageOrigin::Index => self.index_requirement(package),
        }
    }

    fn native_requirement(&self, package: &Package) -> String {
        let mut line = package.canonical_name().to_string();
        let include_version = self.how.includes_version();
        if include_version {
            line.push('=');
            line.push_str(&format_version(package.version(), self.how));
        }
        if self.add_builds {
            if !include_version {
                line.push_str("=*");
            }
            line.push('=');
            line.push_str(package.build());
        }
        line
    }

    fn index_requirement(&self, package: &Package) -> String {
        let mut line = package.canonical_name().to_string();
        if self.how.includes_version() {
            line.push_str("==");
            line.push_str(&format_version(package.version(), self.how));
        }
        line
    }
}

/// Renders the selected packages into an [`EnvironmentSpec`].
///
/// Packages keep the order they are given in; native lines come first and
/// index lines go into the trailing pip block. Channels are taken from the
/// native packages only.
pub(crate) fn assemble_spec<'a>(
    name: &str,
    channels: &ChannelResolver,
    selected: impl IntoIterator<Item = (&'a Package, RequirementBuilder)>,
) -> EnvironmentSpec {
    let mut native = Vec::new();
    let mut pip = Vec::new();
    let mut native_packages = Vec::new();

    for (package, builder) in selected {
        match package.origin() {
            PackageOrigin::Native => {
                native.push(builder.requirement(package));
                native_packages.push(package);
            }
            PackageOrigin::Index => pip.push(builder.requirement(package)),
        }
    }

    let channel_list = channels.resolve(native_packages.iter().copied());
    EnvironmentSpec::new(name.to_string(), channel_list, native, pip)
}
