//! The install command

use std::path::Path;

use colored::Colorize;
use diamond_core::{InstallResult, InstallStatus, Installer};
use diamond_source::PackageDescriptor;

use super::ProjectContext;
use super::spec::parse_spec;
use crate::cli::InstallArgs;
use crate::error::{CliError, Result};

/// Install every requested package, one after another.
///
/// A package that fails is reported and skipped. A fatal failure stops the
/// run immediately.
pub async fn run_install(context: &ProjectContext, args: &InstallArgs) -> Result<()> {
    let packages = descriptors(args)?;
    let installer = Installer::new(context.layout.clone(), &context.config);

    let mut failed = 0;
    for package in &packages {
        match installer.install(package).await {
            Ok(result) => print_result(&result),
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                eprintln!("{}: {}: {}", "error".red().bold(), package.name, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::user(format!(
            "{} of {} packages failed to install",
            failed,
            packages.len()
        )));
    }
    Ok(())
}

fn print_result(result: &InstallResult) {
    match result.status() {
        InstallStatus::New => println!("{}", result.display_token.green()),
        InstallStatus::Updated => println!("{}", result.display_token.yellow()),
    }
}

/// Build descriptors from the descriptor file and the positional specs.
fn descriptors(args: &InstallArgs) -> Result<Vec<PackageDescriptor>> {
    if args.path.is_some() && args.specs.len() != 1 {
        return Err(CliError::user("--path can only be used with a single package"));
    }

    let mut packages = match &args.from {
        Some(file) => read_descriptor_file(file)?,
        None => Vec::new(),
    };

    for spec in &args.specs {
        let mut package = parse_spec(spec)?;
        if let Some(path) = &args.path {
            package.path = path.clone();
        }
        if let Some(main) = &args.main {
            package.main = Some(main.clone());
        }
        package.functions |= args.functions;
        package.importer |= args.importer;
        package.post_compile |= args.post_compile;
        packages.push(package);
    }

    Ok(packages)
}

fn read_descriptor_file(path: &Path) -> Result<Vec<PackageDescriptor>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::Descriptors {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(specs: &[&str]) -> InstallArgs {
        InstallArgs {
            specs: specs.iter().map(|s| s.to_string()).collect(),
            path: None,
            main: None,
            functions: false,
            importer: false,
            post_compile: false,
            from: None,
        }
    }

    #[test]
    fn flags_apply_to_every_spec() {
        let mut args = args(&["alpha", "beta@2.0.0"]);
        args.main = Some("index.scss".to_string());
        args.importer = true;

        let packages = descriptors(&args).unwrap();

        assert_eq!(packages.len(), 2);
        for package in &packages {
            assert_eq!(package.main.as_deref(), Some("index.scss"));
            assert!(package.importer);
            assert!(package.needs_dependency_install());
        }
        assert_eq!(packages[1].version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn path_overrides_destination_of_a_single_spec() {
        let mut args = args(&["@acme/grid"]);
        args.path = Some("grid".to_string());

        let packages = descriptors(&args).unwrap();

        assert_eq!(packages[0].name, "@acme/grid");
        assert_eq!(packages[0].path, "grid");
    }

    #[test]
    fn path_with_several_specs_is_rejected() {
        let mut args = args(&["alpha", "beta"]);
        args.path = Some("shared".to_string());

        assert!(matches!(descriptors(&args), Err(CliError::User { .. })));
    }

    #[test]
    fn descriptor_file_comes_first() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("packages.json");
        std::fs::write(
            &file,
            r#"[{"name":"grid","source":{"type":"github","url":"acme/grid"},"path":"grid","functions":true}]"#,
        )
        .unwrap();
        let mut args = args(&["widgets"]);
        args.from = Some(file);

        let packages = descriptors(&args).unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "grid");
        assert!(packages[0].functions);
        assert_eq!(packages[1].name, "widgets");
    }

    #[test]
    fn malformed_descriptor_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("packages.json");
        std::fs::write(&file, r#"[{"name":"grid","source":{"type":"svn"}}]"#).unwrap();
        let mut args = args(&[]);
        args.from = Some(file);

        assert!(matches!(descriptors(&args), Err(CliError::Descriptors { .. })));
    }
}
