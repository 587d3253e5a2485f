//! `docbuild build` command

use anyhow::{anyhow, Result};

use crate::cli::BuildArgs;
use docbuild::container::ContainerTool;
use docbuild::ops::build::{build_docs, BuildDocsOptions};
use docbuild::util::Config;

pub fn execute(args: BuildArgs) -> Result<()> {
    let config = Config::load_default();

    // -i implies a container build
    let use_container = args.build_with_container || args.container_image.is_some();

    // Image names are case-insensitive in registries but must be given
    // to the engine in lowercase.
    let container_image = args
        .container_image
        .or(config.build.container_image.clone())
        .map(|image| image.to_lowercase());

    // CLI overrides config
    let container_tool = match args.container_tool {
        Some(t) => Some(t),
        None => config
            .build
            .container_tool
            .as_deref()
            .map(|s| s.parse::<ContainerTool>().map_err(|e| anyhow!("{}", e)))
            .transpose()?,
    };

    let build_target = args
        .build_target
        .or(config.build.build_target.clone())
        .unwrap_or_else(|| "html".to_string());

    let num_make_jobs = args
        .num_make_jobs
        .or(config.build.num_make_jobs)
        .unwrap_or(4);

    let opts = BuildDocsOptions {
        build_dir: args.build_dir,
        repo_root: args.repo_root,
        doc_versions: args.doc_version,
        version_display_name: args.version_display_name,
        clean: args.clean,
        use_container,
        container_image,
        container_tool,
        build_target,
        num_make_jobs,
        multi_version: args.versions,
        site_root: args.site_root,
        warnings_as_warnings: args.warnings_as_warnings,
        conf_py_path: args.conf_py_path,
        static_path: args.static_path,
        templates_path: args.templates_path,
    };

    build_docs(&opts)
}
