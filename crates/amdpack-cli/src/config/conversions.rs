use amdpack_bundler::{BundleOptions, CommandTransform, FsRegistry};
use amdpack_config::{BundleConfig, LayoutConfig, MinifierConfig, SourceEntryKind};

/// Registry over the configured directory layout.
pub fn registry_from_layout(layout: &LayoutConfig) -> FsRegistry {
    let registry = FsRegistry::new(&layout.modules_dir, &layout.var_dir, &layout.framework_dir)
        .root_http(layout.root_http.as_str())
        .cache_module(layout.cache_module.as_str());

    layout
        .modules
        .iter()
        .fold(registry, |registry, (module, htdocs)| {
            registry.module(module.as_str(), htdocs)
        })
}

pub fn transform_from_minifier(minifier: &MinifierConfig) -> CommandTransform {
    CommandTransform::new(minifier.program.as_str()).args(minifier.args.iter().cloned())
}

/// Options for `bundle` without registry or transform.
///
/// Source entries are applied in declaration order, so an owner's paths
/// keep the order they were listed in.
pub fn bundle_options(bundle: &BundleConfig) -> BundleOptions {
    let options = BundleOptions::new(
        bundle.module.as_str(),
        bundle.name.as_str(),
        bundle.version.as_str(),
    )
    .debug(bundle.debug)
    .watch(bundle.watch)
    .compress(bundle.compress);

    bundle.sources.iter().fold(options, |options, source| {
        let paths = source.paths.iter().cloned();
        let owner = source.module.as_str();
        match source.kind {
            SourceEntryKind::Plain => options.add_scripts(owner, paths),
            SourceEntryKind::Var => options.add_var_scripts(owner, paths),
            SourceEntryKind::Framework => options.add_framework_scripts(owner, paths),
            SourceEntryKind::Directory => options.add_directories(owner, paths),
        }
    })
}
