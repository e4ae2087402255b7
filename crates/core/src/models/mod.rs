//! Shared domain models.

mod connection;
mod player;

use std::{
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

pub use connection::{find_connections, Connection, ConnectionType};
pub use player::Player;

/// A movie together with its credited people.
///
/// Identity is the case-insensitive title plus the release year. Credits and
/// genres are fixed once the movie is built; the only thing that grows
/// afterwards is the log of connection batches that justified playing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// Provider identifier (TMDB id), informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    title: String,
    year: i32,
    #[serde(default)]
    genres: BTreeSet<String>,
    #[serde(default)]
    actors: BTreeSet<String>,
    #[serde(default)]
    directors: BTreeSet<String>,
    #[serde(default)]
    writers: BTreeSet<String>,
    #[serde(default)]
    composers: BTreeSet<String>,
    #[serde(default)]
    cinematographers: BTreeSet<String>,
    #[serde(skip)]
    connection_history: Vec<Vec<Connection>>,
}

impl Movie {
    /// Create a movie with no genres or credits.
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            id: None,
            title: title.into(),
            year,
            genres: BTreeSet::new(),
            actors: BTreeSet::new(),
            directors: BTreeSet::new(),
            writers: BTreeSet::new(),
            composers: BTreeSet::new(),
            cinematographers: BTreeSet::new(),
            connection_history: Vec::new(),
        }
    }

    /// Attach the provider identifier.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Add genre names.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres.extend(genres.into_iter().map(Into::into));
        self
    }

    /// Add credited names for one role kind.
    pub fn with_credits<I, S>(mut self, kind: ConnectionType, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = match kind {
            ConnectionType::Actor => &mut self.actors,
            ConnectionType::Director => &mut self.directors,
            ConnectionType::Writer => &mut self.writers,
            ConnectionType::Composer => &mut self.composers,
            ConnectionType::Cinematographer => &mut self.cinematographers,
        };
        set.extend(names.into_iter().map(Into::into));
        self
    }

    /// Provider identifier, if known.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Title as credited.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Release year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Genre names.
    pub fn genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    /// Names credited under the given role kind.
    pub fn credits(&self, kind: ConnectionType) -> &BTreeSet<String> {
        match kind {
            ConnectionType::Actor => &self.actors,
            ConnectionType::Director => &self.directors,
            ConnectionType::Writer => &self.writers,
            ConnectionType::Composer => &self.composers,
            ConnectionType::Cinematographer => &self.cinematographers,
        }
    }

    /// Credited actors.
    pub fn actors(&self) -> &BTreeSet<String> {
        &self.actors
    }

    /// Credited directors.
    pub fn directors(&self) -> &BTreeSet<String> {
        &self.directors
    }

    /// Shared-credit links between this movie and `other`.
    pub fn find_connections(&self, other: &Movie) -> Vec<Connection> {
        find_connections(self, other)
    }

    /// Append the batch of connections that justified playing this movie.
    pub fn add_connection_history(&mut self, connections: Vec<Connection>) {
        self.connection_history.push(connections);
    }

    /// Every batch appended so far, oldest first.
    pub fn connection_history(&self) -> &[Vec<Connection>] {
        &self.connection_history
    }

    /// The batch appended most recently.
    pub fn latest_connections(&self) -> Option<&[Connection]> {
        self.connection_history.last().map(Vec::as_slice)
    }

    /// Returns a user-facing label combining title and year.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year && self.title.to_lowercase() == other.title.to_lowercase()
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.to_lowercase().hash(state);
        self.year.hash(state);
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_ignores_title_case_and_credits() {
        let a = Movie::new("The Godfather", 1972)
            .with_credits(ConnectionType::Actor, ["Al Pacino"]);
        let b = Movie::new("the godfather", 1972);
        let remake = Movie::new("The Godfather", 2030);

        assert_eq!(a, b);
        assert_ne!(a, remake);

        let set: HashSet<Movie> = [a, b, remake].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn connection_history_is_append_only() {
        let mut movie = Movie::new("Heat", 1995);
        assert!(movie.latest_connections().is_none());

        movie.add_connection_history(vec![Connection::new("Al Pacino", ConnectionType::Actor)]);
        movie.add_connection_history(vec![Connection::new(
            "Michael Mann",
            ConnectionType::Director,
        )]);

        assert_eq!(movie.connection_history().len(), 2);
        assert_eq!(
            movie.latest_connections(),
            Some(&[Connection::new("Michael Mann", ConnectionType::Director)][..])
        );
    }

    #[test]
    fn cache_format_skips_connection_history() -> anyhow::Result<()> {
        let mut movie = Movie::new("Heat", 1995)
            .with_id(949)
            .with_genres(["Crime"])
            .with_credits(ConnectionType::Director, ["Michael Mann"]);
        movie.add_connection_history(vec![Connection::new("Al Pacino", ConnectionType::Actor)]);

        let json = serde_json::to_value(&movie)?;
        assert!(json.get("connection_history").is_none());
        assert_eq!(json["directors"][0], "Michael Mann");

        let restored: Movie = serde_json::from_value(json)?;
        assert_eq!(restored, movie);
        assert_eq!(restored.id(), Some(949));
        assert!(restored.connection_history().is_empty());
        Ok(())
    }
}
