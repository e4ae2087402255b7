use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::models::Movie;

/// JSON snapshot of the preloaded movie catalog.
#[derive(Debug, Clone)]
pub struct MovieCache {
    path: PathBuf,
}

impl MovieCache {
    /// Cache stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, returning `None` if it does not exist.
    pub fn load(&self) -> Result<Option<Vec<Movie>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read movie cache {}", self.path.display()))?;
        let movies = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse movie cache {}", self.path.display()))?;
        Ok(Some(movies))
    }

    /// Write the snapshot, creating parent directories if needed.
    pub fn persist(&self, movies: &[Movie]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create cache directory {}", parent.display())
            })?;
        }

        let serialized =
            serde_json::to_string_pretty(movies).context("failed to serialize movie cache")?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("failed to write movie cache {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectionType;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_none() -> Result<()> {
        let dir = tempdir()?;
        let cache = MovieCache::new(dir.path().join("absent.json"));
        assert!(cache.load()?.is_none());
        Ok(())
    }

    #[test]
    fn persist_creates_directories_and_reloads() -> Result<()> {
        let dir = tempdir()?;
        let cache = MovieCache::new(dir.path().join("nested/cache/movie_cache.json"));
        let movies = vec![Movie::new("Inception", 2010)
            .with_id(27205)
            .with_genres(["Action", "Science Fiction"])
            .with_credits(ConnectionType::Director, ["Christopher Nolan"])
            .with_credits(ConnectionType::Composer, ["Hans Zimmer"])];

        cache.persist(&movies)?;
        let raw = fs::read_to_string(cache.path())?;
        assert!(raw.contains("\"title\": \"Inception\""));

        let loaded = cache.load()?.expect("cache should exist");
        assert_eq!(loaded.len(), 1);
        let movie = &loaded[0];
        assert_eq!(movie, &movies[0]);
        assert!(movie.directors().contains("Christopher Nolan"));
        assert!(movie.credits(ConnectionType::Composer).contains("Hans Zimmer"));
        Ok(())
    }

    #[test]
    fn corrupt_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("movie_cache.json");
        fs::write(&path, "{ not json")?;
        assert!(MovieCache::new(path).load().is_err());
        Ok(())
    }
}
