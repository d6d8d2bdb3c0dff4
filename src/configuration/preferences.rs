#[cfg(test)]
#[path = "preferences_test.rs"]
mod tests;

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use tokio::fs;
use tokio::sync::Mutex;
use toml_edit::Array;
use toml_edit::Document;

use super::Config;
use super::ConfigKey;

pub const RECENT_FILES_KEY: &str = "recent-files";
pub const MAX_RECENT_FILES: usize = 10;

pub fn push_recent(files: Vec<String>, path: &str) -> Vec<String> {
    let mut res = vec![path.to_string()];
    res.extend(files.into_iter().filter(|file| return file != path));
    res.truncate(MAX_RECENT_FILES);

    return res;
}

fn read_recent(doc: &Document) -> Vec<String> {
    return doc
        .get(RECENT_FILES_KEY)
        .and_then(|item| return item.as_array())
        .map(|array| {
            return array
                .iter()
                .filter_map(|val| return val.as_str().map(|s| return s.to_string()))
                .collect::<Vec<String>>();
        })
        .unwrap_or_default();
}

/// Values written back to the config file while the editor runs. Edits go
/// through `toml_edit` so comments and unrelated keys survive.
pub struct Preferences {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Preferences {
    pub fn new(path: PathBuf) -> Preferences {
        return Preferences {
            path,
            lock: Mutex::new(()),
        };
    }

    pub fn from_config() -> Preferences {
        return Preferences::new(PathBuf::from(Config::get(ConfigKey::ConfigFile)));
    }

    async fn read(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::new());
        }

        let toml_str = fs::read_to_string(&self.path).await?;
        return toml_str
            .parse::<Document>()
            .with_context(|| return format!("Failed to parse {}", self.path.display()));
    }

    async fn write(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(&self.path, doc.to_string()).await?;
        return Ok(());
    }

    pub async fn save_theme(&self, dark_mode: bool) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read().await?;
        let theme = if dark_mode { "dark" } else { "light" };
        doc[ConfigKey::Theme.to_string().as_str()] = toml_edit::value(theme);

        return self.write(&doc).await;
    }

    pub async fn save_autosave(&self, enabled: bool) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read().await?;
        doc[ConfigKey::Autosave.to_string().as_str()] = toml_edit::value(enabled);

        return self.write(&doc).await;
    }

    pub async fn recent_files(&self) -> Result<Vec<PathBuf>> {
        let _guard = self.lock.lock().await;
        let doc = self.read().await?;

        return Ok(read_recent(&doc).into_iter().map(PathBuf::from).collect());
    }

    pub async fn add_recent_file(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let path = fs::canonicalize(path)
            .await
            .unwrap_or_else(|_| return path.to_path_buf());

        let _guard = self.lock.lock().await;
        let mut doc = self.read().await?;
        let files = push_recent(read_recent(&doc), &path.to_string_lossy());

        let mut array = Array::new();
        for file in &files {
            array.push(file.as_str());
        }
        doc[RECENT_FILES_KEY] = toml_edit::value(array);
        self.write(&doc).await?;

        return Ok(files.into_iter().map(PathBuf::from).collect());
    }
}
