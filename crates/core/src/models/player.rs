use std::collections::HashSet;

use super::Movie;

/// One of the two participants in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    movies_guessed: HashSet<Movie>,
    progress: u32,
}

impl Player {
    /// Create a player with no guesses and zero progress.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            movies_guessed: HashSet::new(),
            progress: 0,
        }
    }

    /// Player name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record a correctly guessed movie. Guessing the same movie twice keeps one entry.
    pub fn add_guessed_movie(&mut self, movie: Movie) {
        self.movies_guessed.insert(movie);
    }

    /// Movies this player has guessed correctly.
    pub fn movies_guessed(&self) -> &HashSet<Movie> {
        &self.movies_guessed
    }

    /// Number of distinct movies guessed correctly.
    pub fn num_movies_guessed(&self) -> usize {
        self.movies_guessed.len()
    }

    /// Progress counter, interpreted by the active win condition.
    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Increment the progress counter by one.
    pub fn update_progress(&mut self) {
        self.progress += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guessed_movies_collapse_duplicates() {
        let mut player = Player::new("Alice");
        player.add_guessed_movie(Movie::new("Heat", 1995));
        player.add_guessed_movie(Movie::new("HEAT", 1995));
        player.add_guessed_movie(Movie::new("Ronin", 1998));

        assert_eq!(player.num_movies_guessed(), 2);
        assert_eq!(player.progress(), 0);

        player.update_progress();
        assert_eq!(player.progress(), 1);
    }
}
