//! Glob expansion of template patterns and instance-name derivation.
//!
//! Expansion walks the pattern one path component at a time through the
//! [`FileSystem`] trait, so the mock and the real filesystem behave the
//! same. Wildcard components are matched with `glob::Pattern` against the
//! entries of every directory reached so far; literal components are joined
//! and kept when they exist.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::catalog::MetricTemplate;
use crate::collector::traits::FileSystem;
use crate::error::CollectError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A file matched by a template, with its derived instance name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    pub filename: String,
    pub instance: String,
}

/// Resolves every file matching `template` below `base`.
///
/// Zero matches yields an empty list.
pub fn resolve<F: FileSystem + ?Sized>(
    fs: &F,
    base: &Path,
    template: &MetricTemplate,
) -> Result<Vec<ResolvedTarget>, CollectError> {
    let pattern = template.pattern(base);
    let depth = template.directory_depth();
    expand(fs, &pattern)?
        .into_iter()
        .map(|path| {
            let (filename, instance) = resolve_instance(&path, depth)?;
            Ok(ResolvedTarget {
                path,
                filename,
                instance,
            })
        })
        .collect()
}

/// Expands a glob pattern, returning matches in shell order.
///
/// Each directory level is sorted lexically before descending. Every
/// wildcard component is compiled before the walk starts, so a malformed
/// pattern is reported even when nothing exists below the root.
pub fn expand<F: FileSystem + ?Sized>(fs: &F, pattern: &Path) -> Result<Vec<PathBuf>, CollectError> {
    let steps = compile(pattern)?;
    let mut current = vec![PathBuf::new()];

    for step in &steps {
        let mut next = Vec::new();
        match step {
            Step::Root(root) => {
                next = current.iter().map(|p| p.join(root)).collect();
            }
            Step::Literal(segment) => {
                for dir in &current {
                    let candidate = dir.join(segment);
                    if fs.exists(&candidate) {
                        next.push(candidate);
                    }
                }
            }
            Step::Wildcard(matcher) => {
                for dir in &current {
                    let relative = dir.as_os_str().is_empty();
                    let listing = if relative {
                        fs.read_dir(Path::new("."))
                    } else {
                        fs.read_dir(dir)
                    };
                    // Unreadable or non-directory entries simply do not match.
                    let Ok(entries) = listing else { continue };
                    let mut matched: Vec<PathBuf> = entries
                        .into_iter()
                        .filter_map(|entry| {
                            let name = entry.file_name()?.to_string_lossy().into_owned();
                            if !matcher.matches_with(&name, MATCH_OPTIONS) {
                                return None;
                            }
                            Some(if relative { PathBuf::from(name) } else { entry })
                        })
                        .collect();
                    matched.sort();
                    next.extend(matched);
                }
            }
        }

        if next.is_empty() {
            return Ok(next);
        }
        current = next;
    }

    current.retain(|p| !p.as_os_str().is_empty());
    Ok(current)
}

enum Step {
    Root(PathBuf),
    Literal(String),
    Wildcard(Pattern),
}

fn compile(pattern: &Path) -> Result<Vec<Step>, CollectError> {
    let mut steps = Vec::new();
    for component in pattern.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                steps.push(Step::Root(PathBuf::from(component.as_os_str())));
            }
            Component::CurDir => {}
            Component::ParentDir => steps.push(Step::Literal("..".to_string())),
            Component::Normal(segment) => {
                let segment = segment.to_string_lossy();
                if has_wildcard(&segment) {
                    let matcher = Pattern::new(&segment).map_err(|source| {
                        CollectError::InvalidPattern {
                            pattern: pattern.to_string_lossy().into_owned(),
                            source,
                        }
                    })?;
                    steps.push(Step::Wildcard(matcher));
                } else {
                    steps.push(Step::Literal(segment.into_owned()));
                }
            }
        }
    }
    Ok(steps)
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '['])
}

/// Derives `(filename, instance)` from a resolved path.
///
/// The instance is the path element `depth` levels above the file's own
/// directory, with a `filter-` prefix and a `_UUID` suffix stripped.
///
/// ```
/// use std::path::Path;
/// use lustre_core::collector::resolve_instance;
///
/// let (file, instance) =
///     resolve_instance(Path::new("/proc/fs/lustre/obdfilter/OST0000/filesfree"), 0).unwrap();
/// assert_eq!((file.as_str(), instance.as_str()), ("filesfree", "OST0000"));
/// ```
pub fn resolve_instance(path: &Path, depth: usize) -> Result<(String, String), CollectError> {
    let text = path.to_string_lossy();
    let elements: Vec<&str> = text.split('/').collect();
    let too_short = || CollectError::InstancePath {
        path: path.to_path_buf(),
        depth,
    };

    if elements.len() < depth + 2 {
        return Err(too_short());
    }
    let filename = elements[elements.len() - 1];
    let instance = elements[elements.len() - 2 - depth];
    if filename.is_empty() || instance.is_empty() {
        return Err(too_short());
    }

    let instance = instance.strip_prefix("filter-").unwrap_or(instance);
    let instance = instance.strip_suffix("_UUID").unwrap_or(instance);
    Ok((filename.to_string(), instance.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Component as LustreComponent, SourceKind, build};
    use crate::collector::mock::MockFs;
    use crate::config::EnableLevel;

    #[test]
    fn test_resolve_instance_flat() {
        let (file, instance) =
            resolve_instance(Path::new("/proc/fs/lustre/obdfilter/OST0000/filesfree"), 0).unwrap();
        assert_eq!(file, "filesfree");
        assert_eq!(instance, "OST0000");
    }

    #[test]
    fn test_resolve_instance_filter_prefixed_uuid() {
        let (file, instance) = resolve_instance(
            Path::new("/sys/fs/lustre/ldlm/namespaces/filter-lustrefs-OST0005_UUID/pool/grant_rate"),
            1,
        )
        .unwrap();
        assert_eq!(file, "grant_rate");
        assert_eq!(instance, "lustrefs-OST0005");
    }

    #[test]
    fn test_resolve_instance_without_instance_dir() {
        let (file, instance) = resolve_instance(Path::new("/proc/fs/lustre/health_check"), 0).unwrap();
        assert_eq!(file, "health_check");
        assert_eq!(instance, "lustre");

        let (_, instance) = resolve_instance(Path::new("/proc/sys/lnet/stats"), 0).unwrap();
        assert_eq!(instance, "lnet");
    }

    #[test]
    fn test_resolve_instance_client_device() {
        let (_, instance) = resolve_instance(
            Path::new("/proc/fs/lustre/osc/lustrefs-OST0000-osc-ffff88105db50000/rpc_stats"),
            0,
        )
        .unwrap();
        assert_eq!(instance, "lustrefs-OST0000-osc-ffff88105db50000");
    }

    #[test]
    fn test_resolve_instance_too_short() {
        assert!(matches!(
            resolve_instance(Path::new("stats"), 0),
            Err(CollectError::InstancePath { depth: 0, .. })
        ));
        assert!(resolve_instance(Path::new("/health_check"), 1).is_err());
        assert!(resolve_instance(Path::new("pool/granted"), 1).is_err());
    }

    #[test]
    fn test_expand_sorted_per_level() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/fs/lustre/obdfilter/lustrefs-OST0002/stats", "");
        fs.add_file("/proc/fs/lustre/obdfilter/lustrefs-OST0000/stats", "");
        fs.add_file("/proc/fs/lustre/obdfilter/lustrefs-OST0001/num_exports", "1");
        fs.add_file("/proc/fs/lustre/obdfilter/lustrefs-MDT0000/stats", "");

        let matches = expand(&fs, Path::new("/proc/fs/lustre/obdfilter/*-OST*/stats")).unwrap();
        assert_eq!(
            matches,
            vec![
                PathBuf::from("/proc/fs/lustre/obdfilter/lustrefs-OST0000/stats"),
                PathBuf::from("/proc/fs/lustre/obdfilter/lustrefs-OST0002/stats"),
            ]
        );
    }

    #[test]
    fn test_expand_multiple_wildcards() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/fs/lustre/osd-zfs/lustrefs-OST0001/kbytesfree", "1");
        fs.add_file("/proc/fs/lustre/osd-ldiskfs/lustrefs-OST0000/kbytesfree", "1");
        fs.add_file("/proc/fs/lustre/osd-ldiskfs/lustrefs-MDT0000/kbytesfree", "1");

        let matches = expand(&fs, Path::new("/proc/fs/lustre/osd-*/*-OST*/kbytesfree")).unwrap();
        assert_eq!(
            matches,
            vec![
                PathBuf::from("/proc/fs/lustre/osd-ldiskfs/lustrefs-OST0000/kbytesfree"),
                PathBuf::from("/proc/fs/lustre/osd-zfs/lustrefs-OST0001/kbytesfree"),
            ]
        );
    }

    #[test]
    fn test_expand_no_match_is_empty() {
        let fs = MockFs::new();
        assert!(expand(&fs, Path::new("/proc/fs/lustre/mdt/*/md_stats")).unwrap().is_empty());
        assert!(expand(&fs, Path::new("/sys/fs/lustre/health_check")).unwrap().is_empty());
    }

    #[test]
    fn test_expand_literal_file() {
        let mut fs = MockFs::new();
        fs.add_file("/sys/fs/lustre/health_check", "healthy");
        let matches = expand(&fs, Path::new("/sys/fs/lustre/health_check")).unwrap();
        assert_eq!(matches, vec![PathBuf::from("/sys/fs/lustre/health_check")]);
    }

    #[test]
    fn test_expand_skips_hidden_entries() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/fs/lustre/mdt/.snapshot/num_exports", "1");
        fs.add_file("/proc/fs/lustre/mdt/lustrefs-MDT0000/num_exports", "1");
        let matches = expand(&fs, Path::new("/proc/fs/lustre/mdt/*/num_exports")).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_expand_invalid_pattern() {
        let fs = MockFs::new();
        let err = expand(&fs, Path::new("/proc/fs/lustre/[-OST/stats")).unwrap_err();
        assert!(matches!(err, CollectError::InvalidPattern { .. }));
    }

    #[test]
    fn test_resolve_sysfs_pool_template() {
        let fs = MockFs::ost_server();
        let templates = build(LustreComponent::Ost, SourceKind::Sysfs, EnableLevel::Extended);
        let granted = templates.iter().find(|t| t.filename == "pool/granted").unwrap();

        let targets = resolve(&fs, Path::new("/sys/fs/lustre"), granted).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].instance, "lustrefs-OST0000");
        assert_eq!(targets[0].filename, "granted");
    }

    #[test]
    fn test_resolve_health_template() {
        let fs = MockFs::ost_server();
        let templates = build(LustreComponent::Health, SourceKind::Sysfs, EnableLevel::Core);
        let targets = resolve(&fs, Path::new("/sys/fs/lustre"), &templates[0]).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].instance, "lustre");
    }
}
