use debug_recorder_core::{CoreResult, InstallIdentity};

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Install identifier persisted as a UUID in a plain file.
pub struct FileInstallIdentity {
    path: PathBuf,
}

impl FileInstallIdentity {
    /// Identity stored at `path`, created on first read.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn persist_new(&self) -> CoreResult<String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let id = Uuid::new_v4().to_string();
        fs::write(&self.path, &id)?;

        info!(path = ?self.path, install_id = %id, "Generated install id");

        Ok(id)
    }
}

impl InstallIdentity for FileInstallIdentity {
    #[instrument(skip(self), fields(path = ?self.path))]
    fn install_id(&self) -> CoreResult<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match Uuid::parse_str(contents.trim()) {
                Ok(id) => Ok(id.to_string()),
                Err(e) => {
                    warn!(error = %e, "Stored install id is malformed, regenerating");
                    self.persist_new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.persist_new(),
            Err(e) => Err(e.into()),
        }
    }
}
