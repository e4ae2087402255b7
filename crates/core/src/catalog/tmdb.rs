use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::models::{ConnectionType, Movie};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Minimal TMDB v3 client returning fully credited movies.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Build a client for `base_url` authenticated with `api_key`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    /// Best search hit for `title`, with credits.
    pub async fn search_movie(&self, title: &str) -> Result<Option<Movie>> {
        let page: RawPage = self
            .get("search/movie", &[("query", title.to_string())])
            .await?;
        match page.results.first() {
            Some(hit) => self.movie_details(hit.id).await.map(Some),
            None => Ok(None),
        }
    }

    /// Details and credits for the movie with TMDB id `id`.
    pub async fn movie_details(&self, id: u64) -> Result<Movie> {
        let raw: RawDetails = self
            .get(
                &format!("movie/{id}"),
                &[("append_to_response", "credits".to_string())],
            )
            .await?;
        Ok(build_movie(raw))
    }

    /// Movies from the first `pages` pages of the popular list. Individual
    /// movies that fail to load are skipped, and a failing page after the
    /// first ends the crawl with what was gathered so far.
    pub async fn popular_movies(&self, pages: u32) -> Result<Vec<Movie>> {
        let mut movies = Vec::new();
        for page_number in 1..=pages {
            let page: RawPage = match self
                .get("movie/popular", &[("page", page_number.to_string())])
                .await
            {
                Ok(page) => page,
                Err(err) if page_number == 1 => return Err(err),
                Err(err) => {
                    warn!(page = page_number, kept = movies.len(), "stopping popular crawl: {err:#}");
                    break;
                }
            };
            debug!(page = page_number, results = page.results.len(), "fetched popular page");

            for listing in &page.results {
                match self.movie_details(listing.id).await {
                    Ok(movie) => movies.push(movie),
                    Err(err) => warn!(
                        id = listing.id,
                        title = listing.title.as_deref().unwrap_or("?"),
                        "skipping movie: {err:#}"
                    ),
                }
            }

            if page.total_pages.is_some_and(|total| page_number >= total) {
                break;
            }
        }
        Ok(movies)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("TMDB rejected request to {url}"))?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode response from {url}"))
    }
}

fn build_movie(raw: RawDetails) -> Movie {
    let year = raw
        .release_date
        .as_deref()
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(|date| date.year())
        .unwrap_or(0);

    let crew_with = |accept: fn(&RawCrew) -> bool| {
        raw.credits
            .crew
            .iter()
            .filter(move |member| accept(member))
            .map(|member| member.name.clone())
            .collect::<Vec<_>>()
    };
    let directors = crew_with(|member| member.job.as_deref() == Some("Director"));
    let writers = crew_with(|member| member.department.as_deref() == Some("Writing"));
    let composers = crew_with(|member| {
        matches!(member.job.as_deref(), Some("Original Music Composer" | "Music"))
    });
    let cinematographers =
        crew_with(|member| member.job.as_deref() == Some("Director of Photography"));

    Movie::new(raw.title.trim(), year)
        .with_id(raw.id)
        .with_genres(raw.genres.iter().map(|genre| genre.name.clone()))
        .with_credits(
            ConnectionType::Actor,
            raw.credits.cast.iter().map(|member| member.name.clone()),
        )
        .with_credits(ConnectionType::Director, directors)
        .with_credits(ConnectionType::Writer, writers)
        .with_credits(ConnectionType::Composer, composers)
        .with_credits(ConnectionType::Cinematographer, cinematographers)
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    results: Vec<RawListing>,
    #[serde(default)]
    total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawListing {
    id: u64,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDetails {
    id: u64,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    genres: Vec<RawGenre>,
    #[serde(default)]
    credits: RawCredits,
}

#[derive(Debug, Deserialize)]
struct RawGenre {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawCredits {
    #[serde(default)]
    cast: Vec<RawCast>,
    #[serde(default)]
    crew: Vec<RawCrew>,
}

#[derive(Debug, Deserialize)]
struct RawCast {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawCrew {
    name: String,
    #[serde(default)]
    job: Option<String>,
    #[serde(default)]
    department: Option<String>,
}
