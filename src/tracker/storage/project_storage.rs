use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use serde::Serialize;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::{debug, warn};

use super::entities::ProjectMapping;

/// Interface for abstracting storage of projects.
pub trait ProjectStorage {
    /// Reads every project. Missing state is an empty mapping, not an error.
    fn load(&self) -> impl Future<Output = Result<ProjectMapping>>;

    /// Replaces the persisted state with `projects`.
    fn save(&self, projects: &ProjectMapping) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> ProjectStorage for T
where
    T::Target: ProjectStorage,
{
    async fn load(&self) -> Result<ProjectMapping> {
        self.deref().load().await
    }

    async fn save(&self, projects: &ProjectMapping) -> Result<()> {
        self.deref().save(projects).await
    }
}

/// The main realization of [ProjectStorage]. Keeps the whole mapping in a single json file.
pub struct JsonProjectStorage {
    path: PathBuf,
}

impl JsonProjectStorage {
    pub fn new(path: PathBuf) -> Result<Self, std::io::Error> {
        if let Some(parent) = path.parent().filter(|v| !v.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open_lock(&self) -> Result<File, std::io::Error> {
        File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(sibling_path(&self.path, "lock"))
            .await
    }

    async fn read_mapping(&self) -> Result<ProjectMapping> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {:?}, starting empty", self.path);
                return Ok(ProjectMapping::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {:?}", self.path));
            }
        };

        // A direct overwrite interrupted by a crash leaves an empty file behind.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            warn!("Data file {:?} is empty, starting empty", self.path);
            return Ok(ProjectMapping::new());
        }

        serde_json::from_slice(&bytes)
            .with_context(|| format!("Data file {:?} is malformed", self.path))
    }

    /// Writes into a sibling file first and renames it over the target, so a crash never leaves
    /// a truncated file.
    async fn replace_with(&self, payload: &[u8]) -> Result<()> {
        let temp = sibling_path(&self.path, "tmp");
        let mut file = File::create(&temp)
            .await
            .with_context(|| format!("Failed to create {temp:?}"))?;
        file.write_all(payload).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {:?}", self.path))?;
        Ok(())
    }
}

impl ProjectStorage for JsonProjectStorage {
    async fn load(&self) -> Result<ProjectMapping> {
        let lock = self.open_lock().await?;
        lock.lock_shared()?;
        let result = self.read_mapping().await;
        lock.unlock_async().await?;

        let projects = result?;
        debug!("Loaded {} projects from {:?}", projects.len(), self.path);
        Ok(projects)
    }

    async fn save(&self, projects: &ProjectMapping) -> Result<()> {
        let payload = to_json(projects)?;

        let lock = self.open_lock().await?;
        // Semi-safe acquire-release for a file
        lock.lock_exclusive()?;
        let result = self.replace_with(&payload).await;
        lock.unlock_async().await?;

        result?;
        debug!("Saved {} projects into {:?}", projects.len(), self.path);
        Ok(())
    }
}

fn to_json(projects: &ProjectMapping) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    projects.serialize(&mut serializer)?;
    Ok(buffer)
}

/// `projects.json` -> `projects.json.<extension>`
fn sibling_path(path: &Path, extension: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|v| v.to_os_string())
        .unwrap_or_else(|| crate::utils::dir::DATA_FILE_NAME.into());
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}
