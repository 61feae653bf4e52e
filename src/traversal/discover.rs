//! Project and compilation-unit discovery

use crate::config::ScanConfig;
use crate::error::{ScanError, ScanResult};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A directory of compilation units scanned as one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory name, used in output file names and issue components
    pub name: String,
    pub root: PathBuf,
}

/// List the projects under `root`, sorted by name.
///
/// Each immediate subdirectory is a project; files directly under `root`
/// belong to none. With `single_project` the root itself is the only
/// project. Directories in `ignore_dirs` (such as the output directory)
/// are never projects.
pub fn discover_projects(
    root: &Path,
    single_project: bool,
    config: &ScanConfig,
    ignore_dirs: &[PathBuf],
) -> ScanResult<Vec<Project>> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    if single_project {
        return Ok(vec![Project {
            name: directory_name(root),
            root: root.to_path_buf(),
        }]);
    }

    let ignored: Vec<PathBuf> = ignore_dirs
        .iter()
        .filter_map(|d| fs::canonicalize(d).ok())
        .collect();

    let entries = fs::read_dir(root).map_err(|e| ScanError::unreadable(root, e))?;
    let mut projects: Vec<Project> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if config.scan.skip_hidden && name.starts_with('.') {
                return None;
            }
            let path = entry.path();
            let is_ignored = fs::canonicalize(&path)
                .map(|canon| ignored.contains(&canon))
                .unwrap_or(false);
            if is_ignored {
                debug!("Not treating {} as a project", path.display());
                return None;
            }
            Some(Project { name, root: path })
        })
        .collect();

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

/// Collect the compilation units of one project, sorted by path
pub fn collect_source_files(project: &Project, config: &ScanConfig) -> Vec<PathBuf> {
    let scan = &config.scan;
    let mut builder = WalkBuilder::new(&project.root);
    builder
        .hidden(scan.skip_hidden)
        .git_ignore(scan.respect_gitignore)
        .git_global(scan.respect_gitignore)
        .git_exclude(scan.respect_gitignore)
        .ignore(scan.respect_gitignore)
        .parents(scan.respect_gitignore)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext == scan.extension)
            .unwrap_or(false);
        if !matches_ext {
            continue;
        }

        let relative = path.strip_prefix(&project.root).unwrap_or(path);
        if config.should_exclude(relative) {
            debug!("Excluded {}", path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    files
}

fn directory_name(path: &Path) -> String {
    // "." and ".." have no file name of their own
    path.file_name()
        .map(|n| n.to_os_string())
        .or_else(|| fs::canonicalize(path).ok()?.file_name().map(|n| n.to_os_string()))
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}
