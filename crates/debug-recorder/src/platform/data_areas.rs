use debug_recorder_core::{AreaDiscovery, CoreResult};

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

/// Reports each subdirectory of a root as one data area.
pub struct DirectoryAreaDiscovery {
    root: PathBuf,
}

impl DirectoryAreaDiscovery {
    /// Discovery over the subdirectories of `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl AreaDiscovery for DirectoryAreaDiscovery {
    #[instrument(skip(self), fields(root = ?self.root))]
    fn discover(&self) -> CoreResult<Vec<String>> {
        if !self.root.exists() {
            debug!("Data area root missing");
            return Ok(Vec::new());
        }

        let mut areas = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                areas.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        areas.sort();

        Ok(areas)
    }
}
