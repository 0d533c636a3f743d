use debug_recorder_core::{CoreResult, UpdateHistory};

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::instrument;

/// Update history kept as one entry per line, newest last.
pub struct FileUpdateHistory {
    path: PathBuf,
}

impl FileUpdateHistory {
    /// History read from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl UpdateHistory for FileUpdateHistory {
    #[instrument(skip(self), fields(path = ?self.path))]
    fn latest(&self) -> CoreResult<Option<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(contents
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string))
    }
}
