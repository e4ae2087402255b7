//! Turn-state engine for a single game.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::{Connection, Movie, Player};

use super::WinCondition;

/// Entries kept in the recent-history window.
pub const RECENT_HISTORY_CAPACITY: usize = 5;
/// Accepted turns a single person may justify over a whole game.
pub const MAX_CONNECTION_USES: u32 = 3;

const FIRST_PLAYER: usize = 0;

/// How a concluded game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    /// The current player met the win condition.
    Victory,
    /// The current player ran out of time; the other player wins.
    Timeout,
}

/// Lifecycle of a game. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player one to move, round one, only the starting movie played.
    AwaitingFirstTurn,
    /// Players alternate.
    AwaitingTurn,
    /// No further turns are accepted.
    Concluded(Conclusion),
}

/// State of one game between two players.
#[derive(Debug, Clone)]
pub struct GameState {
    players: [Player; 2],
    current: usize,
    round: u32,
    starting_movie: Movie,
    used_movies: HashSet<Movie>,
    recent_history: VecDeque<Movie>,
    connection_usage: HashMap<String, u32>,
    win_condition: WinCondition,
    phase: GamePhase,
}

impl GameState {
    /// Start a game: `player1` moves first and `starting_movie` counts as played.
    pub fn new(
        player1: Player,
        player2: Player,
        win_condition: WinCondition,
        starting_movie: Movie,
    ) -> Self {
        let mut used_movies = HashSet::new();
        used_movies.insert(starting_movie.clone());
        let mut recent_history = VecDeque::with_capacity(RECENT_HISTORY_CAPACITY + 1);
        recent_history.push_back(starting_movie.clone());

        Self {
            players: [player1, player2],
            current: FIRST_PLAYER,
            round: 1,
            starting_movie,
            used_movies,
            recent_history,
            connection_usage: HashMap::new(),
            win_condition,
            phase: GamePhase::AwaitingFirstTurn,
        }
    }

    /// Whether `movie` has been played at any point in this game.
    pub fn is_movie_used(&self, movie: &Movie) -> bool {
        self.used_movies.contains(movie)
    }

    /// Commit `movie` as played.
    ///
    /// Spends one use for every connection in the movie's latest connection
    /// batch, so the batch must be attached before calling. Duplicates are not
    /// rejected here; check [`GameState::is_movie_used`] first.
    pub fn add_movie_to_history(&mut self, movie: Movie) {
        if let Some(batch) = movie.latest_connections() {
            for connection in batch {
                self.increment_connection_usage(connection.person_name());
            }
        }

        self.used_movies.insert(movie.clone());
        self.recent_history.push_back(movie);
        while self.recent_history.len() > RECENT_HISTORY_CAPACITY {
            self.recent_history.pop_front();
        }

        if self.phase == GamePhase::AwaitingFirstTurn {
            self.phase = GamePhase::AwaitingTurn;
        }
    }

    /// Spend one use of `person`'s connection.
    pub fn increment_connection_usage(&mut self, person: &str) {
        *self.connection_usage.entry(person.to_string()).or_insert(0) += 1;
    }

    /// Times `person`'s connection has been spent so far.
    pub fn connection_usage(&self, person: &str) -> u32 {
        self.connection_usage.get(person).copied().unwrap_or(0)
    }

    /// Candidates whose person has been spent fewer than
    /// [`MAX_CONNECTION_USES`] times, in input order.
    pub fn filter_connections(&self, candidates: &[Connection]) -> Vec<Connection> {
        candidates
            .iter()
            .filter(|connection| self.connection_usage(connection.person_name()) < MAX_CONNECTION_USES)
            .cloned()
            .collect()
    }

    /// Credit `movie` to the current player and advance their progress.
    ///
    /// Call exactly once per committed turn.
    pub fn record_guess(&mut self, movie: &Movie) {
        let player = &mut self.players[self.current];
        player.add_guessed_movie(movie.clone());
        self.win_condition.update_player_progress(player, movie);
    }

    /// Hand the turn to the other player. The round advances whenever control
    /// returns to the player who opened it. Does nothing once concluded.
    pub fn switch_player(&mut self) {
        if self.is_concluded() {
            return;
        }
        self.current = 1 - self.current;
        if self.current == FIRST_PLAYER {
            self.round += 1;
        }
    }

    /// Whether the current player satisfies the win condition.
    pub fn has_current_player_won(&self) -> bool {
        self.win_condition.check_victory(self.current_player())
    }

    /// End the game with the current player as winner.
    pub fn conclude_victory(&mut self) {
        self.phase = GamePhase::Concluded(Conclusion::Victory);
    }

    /// End the game because the current player ran out of time.
    pub fn conclude_timeout(&mut self) {
        self.phase = GamePhase::Concluded(Conclusion::Timeout);
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether the game has ended.
    pub fn is_concluded(&self) -> bool {
        matches!(self.phase, GamePhase::Concluded(_))
    }

    /// Winner of a concluded game.
    pub fn winner(&self) -> Option<&Player> {
        match self.phase {
            GamePhase::Concluded(Conclusion::Victory) => Some(self.current_player()),
            GamePhase::Concluded(Conclusion::Timeout) => Some(self.other_player()),
            _ => None,
        }
    }

    /// Player to move.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Player waiting for their turn.
    pub fn other_player(&self) -> &Player {
        &self.players[1 - self.current]
    }

    /// Both players, in seating order.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Current round, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Movie the game opened with.
    pub fn starting_movie(&self) -> &Movie {
        &self.starting_movie
    }

    /// Most recently committed movie; the starting movie before any turn.
    pub fn current_movie(&self) -> &Movie {
        self.recent_history.back().unwrap_or(&self.starting_movie)
    }

    /// Up to [`RECENT_HISTORY_CAPACITY`] most recent movies, oldest first.
    pub fn recent_history(&self) -> &VecDeque<Movie> {
        &self.recent_history
    }

    /// Number of distinct movies played, the starting movie included.
    pub fn movies_played(&self) -> usize {
        self.used_movies.len()
    }

    /// Active win condition.
    pub fn win_condition(&self) -> &WinCondition {
        &self.win_condition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectionType;

    fn godfather() -> Movie {
        Movie::new("The Godfather", 1972).with_credits(ConnectionType::Actor, ["Al Pacino"])
    }

    fn heat() -> Movie {
        Movie::new("Heat", 1995).with_credits(ConnectionType::Actor, ["Al Pacino"])
    }

    fn new_state() -> GameState {
        GameState::new(
            Player::new("Alice"),
            Player::new("Bob"),
            WinCondition::two_horror_movies(),
            godfather(),
        )
    }

    fn pacino() -> Connection {
        Connection::new("Al Pacino", ConnectionType::Actor)
    }

    #[test]
    fn initial_state() {
        let state = new_state();
        assert_eq!(state.current_player().name(), "Alice");
        assert_eq!(state.other_player().name(), "Bob");
        assert_eq!(state.round(), 1);
        assert_eq!(state.starting_movie(), &godfather());
        assert_eq!(state.current_movie(), &godfather());
        assert!(state.is_movie_used(&godfather()));
        assert_eq!(state.recent_history().len(), 1);
        assert_eq!(state.phase(), GamePhase::AwaitingFirstTurn);
        assert!(!state.has_current_player_won());
        assert_eq!(state.win_condition(), &WinCondition::two_horror_movies());
    }

    #[test]
    fn adding_movie_marks_it_used() {
        let mut state = new_state();
        state.add_movie_to_history(heat());

        assert!(state.is_movie_used(&heat()));
        assert!(state.is_movie_used(&Movie::new("HEAT", 1995)));
        assert_eq!(state.recent_history().len(), 2);
        assert_eq!(state.current_movie(), &heat());
        assert_eq!(state.phase(), GamePhase::AwaitingTurn);
    }

    #[test]
    fn recent_history_keeps_last_five() {
        let mut state = new_state();
        for i in 1..=7 {
            state.add_movie_to_history(Movie::new(format!("Movie {i}"), 2000 + i));
        }

        let titles: Vec<&str> = state.recent_history().iter().map(Movie::title).collect();
        assert_eq!(
            titles,
            vec!["Movie 3", "Movie 4", "Movie 5", "Movie 6", "Movie 7"]
        );
        assert!(state.is_movie_used(&godfather()));
        assert!(state.is_movie_used(&Movie::new("Movie 1", 2001)));
        assert_eq!(state.movies_played(), 8);
    }

    #[test]
    fn switching_advances_round_after_full_cycle() {
        let mut state = new_state();
        state.switch_player();
        assert_eq!(state.current_player().name(), "Bob");
        assert_eq!(state.other_player().name(), "Alice");
        assert_eq!(state.round(), 1);

        state.switch_player();
        assert_eq!(state.current_player().name(), "Alice");
        assert_eq!(state.round(), 2);

        state.switch_player();
        assert_eq!(state.round(), 2);
    }

    #[test]
    fn connection_spent_three_times_is_filtered() {
        let mut state = new_state();
        state.increment_connection_usage("Al Pacino");
        state.increment_connection_usage("Al Pacino");
        assert_eq!(state.filter_connections(&[pacino()]).len(), 1);

        state.increment_connection_usage("Al Pacino");
        assert!(state.filter_connections(&[pacino()]).is_empty());
        assert_eq!(state.connection_usage("Al Pacino"), 3);
    }

    #[test]
    fn filtering_keeps_unspent_people_in_order() {
        let mut state = new_state();
        let candidates = vec![
            Connection::new("Robert De Niro", ConnectionType::Actor),
            pacino(),
            Connection::new("Al Pacino", ConnectionType::Director),
            Connection::new("Michael Mann", ConnectionType::Director),
        ];
        assert_eq!(state.filter_connections(&candidates), candidates);

        for _ in 0..MAX_CONNECTION_USES {
            state.increment_connection_usage("Al Pacino");
        }

        assert_eq!(
            state.filter_connections(&candidates),
            vec![
                Connection::new("Robert De Niro", ConnectionType::Actor),
                Connection::new("Michael Mann", ConnectionType::Director),
            ]
        );
    }

    #[test]
    fn committing_spends_latest_batch_only() {
        let mut state = new_state();
        let mut movie = heat();
        movie.add_connection_history(vec![Connection::new("Michael Mann", ConnectionType::Director)]);
        movie.add_connection_history(vec![pacino()]);

        state.add_movie_to_history(movie);
        assert_eq!(state.connection_usage("Al Pacino"), 1);
        assert_eq!(state.connection_usage("Michael Mann"), 0);
    }

    #[test]
    fn committing_spends_every_role_of_a_person() {
        let mut state = new_state();
        let mut movie = heat();
        movie.add_connection_history(vec![
            pacino(),
            Connection::new("Al Pacino", ConnectionType::Director),
        ]);

        state.add_movie_to_history(movie);
        assert_eq!(state.connection_usage("Al Pacino"), 2);
        assert_eq!(state.filter_connections(&[pacino()]).len(), 1);
    }

    #[test]
    fn record_guess_updates_current_player_only() {
        let mut state = new_state();
        let horror = Movie::new("Scream", 1996).with_genres(["Horror"]);

        state.record_guess(&horror);
        assert_eq!(state.current_player().progress(), 1);
        assert_eq!(state.current_player().num_movies_guessed(), 1);
        assert_eq!(state.other_player().progress(), 0);
    }

    #[test]
    fn concluded_game_freezes_turns() {
        let mut state = new_state();
        state.switch_player();
        state.conclude_victory();
        state.switch_player();

        assert!(state.is_concluded());
        assert_eq!(state.current_player().name(), "Bob");
        assert_eq!(state.round(), 1);
        assert_eq!(state.winner().map(Player::name), Some("Bob"));
    }

    #[test]
    fn timeout_awards_other_player() {
        let mut state = new_state();
        assert!(state.winner().is_none());
        state.conclude_timeout();
        assert_eq!(state.phase(), GamePhase::Concluded(Conclusion::Timeout));
        assert_eq!(state.winner().map(Player::name), Some("Bob"));
    }
}
