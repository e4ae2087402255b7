//! Movie catalog: lookup contract, in-memory database, cache, and TMDB client.

/// On-disk snapshot of the preloaded catalog.
pub mod cache;
#[cfg(test)]
pub(crate) mod test_server;
/// HTTP client for The Movie Database.
pub mod tmdb;

use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rand::seq::IteratorRandom;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    autocomplete::{Autocomplete, AutocompleteError},
    config::AppConfig,
    models::Movie,
};

pub use cache::MovieCache;
pub use tmdb::TmdbClient;

/// Resolves guesses to movies.
///
/// Implementations own any normalisation of the input text.
pub trait MovieLookup {
    /// Movie whose title matches `title`.
    fn find_by_title(&self, title: &str) -> Option<Movie>;
    /// Any known movie, for opening a game.
    fn random_movie(&self) -> Option<Movie>;
}

impl<T: MovieLookup + ?Sized> MovieLookup for &T {
    fn find_by_title(&self, title: &str) -> Option<Movie> {
        (**self).find_by_title(title)
    }

    fn random_movie(&self) -> Option<Movie> {
        (**self).random_movie()
    }
}

/// Thread-safe movie catalog keyed by normalised title.
///
/// Clones share the same underlying catalog.
#[derive(Clone)]
pub struct MovieDatabase {
    inner: Arc<RwLock<Inner>>,
    tmdb: Option<TmdbClient>,
    cache: Option<MovieCache>,
    preload_pages: u32,
}

struct Inner {
    movies: HashMap<String, Movie>,
}

impl MovieDatabase {
    /// Catalog backed by the configured cache file and, when an API key is
    /// present, by TMDB.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let tmdb = config
            .tmdb_api_key
            .as_deref()
            .map(|key| TmdbClient::new(&config.tmdb_base_url, key))
            .transpose()
            .context("failed to create TMDB client")?;
        if tmdb.is_none() {
            warn!("no TMDB API key configured; running from the local cache only");
        }

        Ok(Self {
            inner: Arc::new(RwLock::new(Inner {
                movies: HashMap::new(),
            })),
            tmdb,
            cache: Some(MovieCache::new(&config.cache_path)),
            preload_pages: config.preload_pages,
        })
    }

    /// Offline catalog holding exactly `movies`.
    pub fn with_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let movies = movies
            .into_iter()
            .map(|movie| (normalize_title(movie.title()), movie))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(Inner { movies })),
            tmdb: None,
            cache: None,
            preload_pages: 0,
        }
    }

    /// Number of known movies.
    pub fn len(&self) -> usize {
        self.inner.read().movies.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().movies.is_empty()
    }

    /// Whether a TMDB client is available for fetching unknown titles.
    pub fn is_online(&self) -> bool {
        self.tmdb.is_some()
    }

    /// Add or replace a movie.
    pub fn insert(&self, movie: Movie) {
        let key = normalize_title(movie.title());
        self.inner.write().movies.insert(key, movie);
    }

    /// Whether `title` is already known without a network round trip.
    pub fn contains_title(&self, title: &str) -> bool {
        self.inner
            .read()
            .movies
            .contains_key(&normalize_title(title))
    }

    /// Every known title, sorted.
    pub fn titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self
            .inner
            .read()
            .movies
            .values()
            .map(|movie| movie.title().to_string())
            .collect();
        titles.sort();
        titles
    }

    /// Fill the catalog from the cache file, or from TMDB's popular list when
    /// no cache exists yet (writing the cache afterwards). Returns the number
    /// of movies loaded.
    pub async fn preload_popular(&self) -> Result<usize> {
        if let Some(cache) = &self.cache {
            match cache.load() {
                Ok(Some(movies)) if movies.is_empty() => {
                    warn!(path = %cache.path().display(), "movie cache is empty; refetching");
                }
                Ok(Some(movies)) => {
                    let count = movies.len();
                    self.extend(movies);
                    info!(count, path = %cache.path().display(), "catalog loaded from cache");
                    return Ok(count);
                }
                Ok(None) => {}
                Err(err) => warn!("ignoring unreadable movie cache: {err:#}"),
            }
        }

        let Some(tmdb) = &self.tmdb else {
            warn!("no cache and no TMDB client; catalog is empty");
            return Ok(0);
        };

        let movies = tmdb.popular_movies(self.preload_pages).await?;
        let count = movies.len();
        info!(count, pages = self.preload_pages, "catalog fetched from TMDB");
        if movies.is_empty() {
            warn!("TMDB returned no movies; leaving the cache untouched");
            return Ok(0);
        }

        if let Some(cache) = self.cache.clone() {
            let snapshot = movies.clone();
            let written = tokio::task::spawn_blocking(move || cache.persist(&snapshot))
                .await
                .context("cache writer task failed")?;
            if let Err(err) = written {
                warn!("failed to write movie cache: {err:#}");
            }
        }

        self.extend(movies);
        Ok(count)
    }

    /// Resolve `title`, asking TMDB when it is not cached. The fetched movie
    /// is kept for later lookups.
    pub async fn fetch_title(&self, title: &str) -> Result<Option<Movie>> {
        if let Some(movie) = self.find_by_title(title) {
            return Ok(Some(movie));
        }
        let Some(tmdb) = &self.tmdb else {
            return Ok(None);
        };

        let fetched = tmdb.search_movie(title.trim()).await?;
        if let Some(movie) = &fetched {
            info!(title, movie = %movie.display_name(), "fetched title from TMDB");
            // Cache under the typed text as well so the exact guess resolves.
            let mut inner = self.inner.write();
            inner.movies.insert(normalize_title(title), movie.clone());
            inner.movies.insert(normalize_title(movie.title()), movie.clone());
        }
        Ok(fetched)
    }

    /// Suggestion index over every known title, all weighted 0.
    pub fn build_autocomplete(&self, limit: usize) -> Result<Autocomplete, AutocompleteError> {
        let mut engine = Autocomplete::with_limit(limit)?;
        engine.extend(self.titles().into_iter().map(|title| (title, 0)))?;
        Ok(engine)
    }

    fn extend(&self, movies: Vec<Movie>) {
        let mut inner = self.inner.write();
        for movie in movies {
            inner.movies.insert(normalize_title(movie.title()), movie);
        }
    }
}

impl MovieLookup for MovieDatabase {
    fn find_by_title(&self, title: &str) -> Option<Movie> {
        self.inner
            .read()
            .movies
            .get(&normalize_title(title))
            .cloned()
    }

    fn random_movie(&self) -> Option<Movie> {
        self.inner
            .read()
            .movies
            .values()
            .choose(&mut rand::thread_rng())
            .cloned()
    }
}

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Lookup key for a title: trimmed, inner whitespace collapsed, lower-cased.
pub fn normalize_title(title: &str) -> String {
    WHITESPACE_RE
        .replace_all(title.trim(), " ")
        .to_lowercase()
}
