//! Win conditions.

use crate::models::{Movie, Player};

/// Required count used by the shipped win conditions.
pub const DEFAULT_REQUIRED_COUNT: u32 = 2;

/// Victory rule for a game. Each variant names the attribute a guessed movie
/// must carry to advance a player's progress, and how many such movies win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinCondition {
    /// Guess `required` movies tagged with `genre`.
    GenreMovies {
        /// Genre name, matched exactly.
        genre: String,
        /// Movies needed to win.
        required: u32,
    },
    /// Guess `required` movies directed by `director`.
    DirectorMovies {
        /// Director name, matched exactly.
        director: String,
        /// Movies needed to win.
        required: u32,
    },
}

impl WinCondition {
    /// Win by guessing `required` movies of `genre`.
    pub fn genre_movies(genre: impl Into<String>, required: u32) -> Self {
        Self::GenreMovies {
            genre: genre.into(),
            required,
        }
    }

    /// Win by guessing `required` movies directed by `director`.
    pub fn director_movies(director: impl Into<String>, required: u32) -> Self {
        Self::DirectorMovies {
            director: director.into(),
            required,
        }
    }

    /// Win by guessing two movies of `genre`.
    pub fn two_genre_movies(genre: impl Into<String>) -> Self {
        Self::genre_movies(genre, DEFAULT_REQUIRED_COUNT)
    }

    /// Win by guessing two movies directed by `director`.
    pub fn two_director_movies(director: impl Into<String>) -> Self {
        Self::director_movies(director, DEFAULT_REQUIRED_COUNT)
    }

    /// Two horror movies.
    pub fn two_horror_movies() -> Self {
        Self::two_genre_movies("Horror")
    }

    /// Two Christopher Nolan movies.
    pub fn two_nolan_movies() -> Self {
        Self::two_director_movies("Christopher Nolan")
    }

    /// Conditions offered when setting up a game.
    pub fn presets() -> Vec<Self> {
        vec![Self::two_horror_movies(), Self::two_nolan_movies()]
    }

    /// Movies needed to win.
    pub fn required_count(&self) -> u32 {
        match self {
            Self::GenreMovies { required, .. } | Self::DirectorMovies { required, .. } => {
                *required
            }
        }
    }

    /// Whether `movie` carries the target attribute.
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            Self::GenreMovies { genre, .. } => movie.genres().contains(genre),
            Self::DirectorMovies { director, .. } => movie.directors().contains(director),
        }
    }

    /// Whether `player` has reached the required count.
    pub fn check_victory(&self, player: &Player) -> bool {
        player.progress() >= self.required_count()
    }

    /// Advance `player` by one if `movie` carries the target attribute.
    ///
    /// Call once per committed turn; repeated calls count again.
    pub fn update_player_progress(&self, player: &mut Player, movie: &Movie) {
        if self.matches(movie) {
            player.update_progress();
        }
    }

    /// `"current/required"` for display.
    pub fn player_progress(&self, player: &Player) -> String {
        format!("{}/{}", player.progress(), self.required_count())
    }

    /// Human-readable rule.
    pub fn description(&self) -> String {
        let required = self.required_count();
        let noun = if required == 1 { "movie" } else { "movies" };
        match self {
            Self::GenreMovies { genre, .. } => format!(
                "Win by guessing {} {} {}!",
                count_word(required),
                genre.to_lowercase(),
                noun
            ),
            Self::DirectorMovies { director, .. } => format!(
                "Win by guessing {} {} directed by {}!",
                count_word(required),
                noun,
                director
            ),
        }
    }
}

fn count_word(count: u32) -> String {
    const WORDS: [&str; 11] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    WORDS
        .get(count as usize)
        .map(|word| word.to_string())
        .unwrap_or_else(|| count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectionType;

    fn horror_movie(id: u32) -> Movie {
        Movie::new(format!("Horror Movie {id}"), 2000).with_genres(["Horror"])
    }

    fn action_movie(id: u32) -> Movie {
        Movie::new(format!("Non-Horror Movie {id}"), 2000).with_genres(["Action"])
    }

    fn nolan_movie(id: u32) -> Movie {
        Movie::new(format!("Nolan Movie {id}"), 2000)
            .with_genres(["Sci-Fi"])
            .with_credits(ConnectionType::Director, ["Christopher Nolan"])
    }

    fn play(condition: &WinCondition, player: &mut Player, movie: Movie) {
        condition.update_player_progress(player, &movie);
        player.add_guessed_movie(movie);
    }

    #[test]
    fn horror_needs_two_matching_movies() {
        let condition = WinCondition::two_horror_movies();
        let mut player = Player::new("TestPlayer");

        play(&condition, &mut player, horror_movie(1));
        play(&condition, &mut player, action_movie(2));
        assert!(!condition.check_victory(&player));
        assert_eq!(condition.player_progress(&player), "1/2");

        play(&condition, &mut player, horror_movie(3));
        assert!(condition.check_victory(&player));
        assert_eq!(condition.player_progress(&player), "2/2");

        play(&condition, &mut player, horror_movie(4));
        assert!(condition.check_victory(&player));
        assert_eq!(condition.player_progress(&player), "3/2");
    }

    #[test]
    fn guessing_without_progress_update_does_not_win() {
        let condition = WinCondition::two_horror_movies();
        let mut player = Player::new("TestPlayer");
        player.add_guessed_movie(horror_movie(1));
        player.add_guessed_movie(horror_movie(2));

        assert!(!condition.check_victory(&player));
    }

    #[test]
    fn nolan_counts_directed_movies_only() {
        let condition = WinCondition::two_nolan_movies();
        let mut player = Player::new("TestPlayer");

        play(&condition, &mut player, horror_movie(1));
        play(&condition, &mut player, nolan_movie(2));
        assert_eq!(condition.player_progress(&player), "1/2");
        assert!(!condition.check_victory(&player));

        play(&condition, &mut player, nolan_movie(3));
        assert!(condition.check_victory(&player));
    }

    #[test]
    fn progress_update_counts_every_call() {
        let condition = WinCondition::two_nolan_movies();
        let mut player = Player::new("TestPlayer");
        let movie = nolan_movie(1);

        condition.update_player_progress(&mut player, &movie);
        condition.update_player_progress(&mut player, &movie);
        assert!(condition.check_victory(&player));
    }

    #[test]
    fn descriptions_match_shipped_wording() {
        assert_eq!(
            WinCondition::two_horror_movies().description(),
            "Win by guessing two horror movies!"
        );
        assert_eq!(
            WinCondition::two_nolan_movies().description(),
            "Win by guessing two movies directed by Christopher Nolan!"
        );
        assert_eq!(
            WinCondition::genre_movies("Comedy", 1).description(),
            "Win by guessing one comedy movie!"
        );
        assert_eq!(
            WinCondition::director_movies("Agnes Varda", 12).description(),
            "Win by guessing 12 movies directed by Agnes Varda!"
        );
    }

    #[test]
    fn custom_thresholds_are_honoured() {
        let condition = WinCondition::genre_movies("Horror", 3);
        let mut player = Player::new("TestPlayer");
        for id in 0..2 {
            play(&condition, &mut player, horror_movie(id));
        }
        assert!(!condition.check_victory(&player));
        assert_eq!(condition.player_progress(&player), "2/3");

        play(&condition, &mut player, horror_movie(9));
        assert!(condition.check_victory(&player));
    }
}
