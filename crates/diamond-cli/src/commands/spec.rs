//! Package specs given on the command line

use diamond_source::{PackageDescriptor, Source};

use crate::error::{CliError, Result};

/// Prefix marking a source-control spec.
pub const SCM_PREFIX: &str = "scm:";

/// Parse `name[@version]` or `scm:<url|user/repo>[#reference]`.
///
/// Scoped registry names keep their leading `@`. A source-control package
/// is named after the last path segment of its URL.
pub fn parse_spec(spec: &str) -> Result<PackageDescriptor> {
    let invalid = |reason: &str| CliError::user(format!("Invalid package spec '{}': {}", spec, reason));

    if let Some(rest) = spec.strip_prefix(SCM_PREFIX) {
        let (url, reference) = match rest.split_once('#') {
            Some((url, reference)) if !reference.is_empty() => (url, Some(reference)),
            Some((url, _)) => (url, None),
            None => (rest, None),
        };
        let name = url
            .trim_end_matches('/')
            .rsplit(['/', ':'])
            .next()
            .map(|segment| segment.trim_end_matches(".git"))
            .unwrap_or_default();
        if url.is_empty() || name.is_empty() {
            return Err(invalid("missing repository"));
        }

        let mut package = PackageDescriptor::scm(name, url);
        package.source = Source::Scm {
            url: url.to_string(),
            reference: reference.map(str::to_string),
        };
        return Ok(package);
    }

    // Skip the scope marker so `@scope/name@1.0` splits on the second `@`.
    let search_from = usize::from(spec.starts_with('@'));
    let (name, version) = match spec[search_from..].find('@') {
        Some(at) => {
            let at = at + search_from;
            (&spec[..at], Some(&spec[at + 1..]))
        }
        None => (spec, None),
    };

    if name.is_empty() || name == "@" {
        return Err(invalid("missing package name"));
    }
    let mut package = PackageDescriptor::registry(name);
    match version {
        Some("") => return Err(invalid("empty version")),
        Some(version) => package = package.with_version(version),
        None => {}
    }
    Ok(package)
}
