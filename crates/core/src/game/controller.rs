use thiserror::Error;
use tracing::{debug, info};

use crate::{
    autocomplete::Autocomplete,
    catalog::MovieLookup,
    models::{Connection, Movie, Player},
};

use super::{GameState, WinCondition};

/// Errors that stop a turn from being considered at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// `start_game` has not been called.
    #[error("no game is in progress")]
    NoActiveGame,
    /// A winner has already been decided.
    #[error("the game has already concluded")]
    GameConcluded,
    /// The catalog could not provide a starting movie.
    #[error("no starting movie is available")]
    NoStartingMovie,
}

/// Outcome of one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    accepted: bool,
    game_over: bool,
    message: String,
}

impl TurnResult {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            accepted: false,
            game_over: false,
            message: message.into(),
        }
    }

    fn accepted(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            game_over: false,
            message: message.into(),
        }
    }

    fn finished(accepted: bool, message: impl Into<String>) -> Self {
        Self {
            accepted,
            game_over: true,
            message: message.into(),
        }
    }

    /// Whether the guess was committed.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Whether the game ended with this turn.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Message for the players.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Binds guesses to the catalog, the autocomplete index and the active game.
pub struct GameController<L> {
    lookup: L,
    autocomplete: Autocomplete,
    state: Option<GameState>,
}

impl<L: MovieLookup> GameController<L> {
    /// Controller with no game in progress.
    pub fn new(lookup: L, autocomplete: Autocomplete) -> Self {
        Self {
            lookup,
            autocomplete,
            state: None,
        }
    }

    /// Movie lookup collaborator.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Suggestion index.
    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    /// Mutable suggestion index, for titles learned mid-game.
    pub fn autocomplete_mut(&mut self) -> &mut Autocomplete {
        &mut self.autocomplete
    }

    /// Active game, if any.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Replace the active game.
    pub fn set_state(&mut self, state: GameState) {
        self.state = Some(state);
    }

    /// Start a new game from a random catalog movie, discarding any previous one.
    pub fn start_game(
        &mut self,
        player1: &str,
        player2: &str,
        win_condition: WinCondition,
    ) -> Result<&Movie, GameError> {
        let starting_movie = self
            .lookup
            .random_movie()
            .ok_or(GameError::NoStartingMovie)?;
        info!(
            player1,
            player2,
            movie = %starting_movie.display_name(),
            rule = %win_condition.description(),
            "game started"
        );
        let state = GameState::new(
            Player::new(player1),
            Player::new(player2),
            win_condition,
            starting_movie,
        );
        Ok(self.state.insert(state).starting_movie())
    }

    /// Validate and, if valid, commit the current player's guess.
    ///
    /// Rejections leave the game untouched. On victory the current player is
    /// kept so callers can name the winner; otherwise the turn passes.
    pub fn process_turn(&mut self, raw_input: &str) -> Result<TurnResult, GameError> {
        let state = self.state.as_mut().ok_or(GameError::NoActiveGame)?;
        if state.is_concluded() {
            return Err(GameError::GameConcluded);
        }

        let title = raw_input.trim();
        if title.is_empty() {
            return Ok(TurnResult::rejected("Movie title cannot be empty."));
        }

        let Some(mut guessed) = self.lookup.find_by_title(title) else {
            debug!(title, "guess not found");
            return Ok(TurnResult::rejected(format!(
                "Oops, {title} is not found in the database."
            )));
        };

        if state.is_movie_used(&guessed) {
            debug!(title, "guess already used");
            return Ok(TurnResult::rejected(format!(
                "Nice try! However movie {title} already used"
            )));
        }

        let last_movie = state.current_movie().clone();
        let connections = last_movie.find_connections(&guessed);
        if connections.is_empty() {
            debug!(title, last = last_movie.title(), "no shared credits");
            return Ok(TurnResult::rejected(format!(
                "Oops, no valid connection found between {} and {}",
                last_movie.title(),
                guessed.title()
            )));
        }

        let valid = state.filter_connections(&connections);
        if valid.is_empty() {
            debug!(title, "every shared credit is exhausted");
            return Ok(TurnResult::rejected(format!(
                "Nice Try! However {} has already been used 3 times.",
                person_names(&connections)
            )));
        }

        let message = format!(
            "Nice! {} and {} connected via {}",
            last_movie.title(),
            guessed.title(),
            describe(&valid)
        );

        guessed.add_connection_history(valid);
        let player = state.current_player().name().to_string();
        info!(player = %player, movie = %guessed.display_name(), "turn committed");
        state.record_guess(&guessed);
        state.add_movie_to_history(guessed);

        if state.has_current_player_won() {
            state.conclude_victory();
            info!(player = %player, round = state.round(), "game won");
            return Ok(TurnResult::finished(
                true,
                format!("Congrats {player}, you won!"),
            ));
        }

        state.switch_player();
        Ok(TurnResult::accepted(message))
    }

    /// End the game because the current player ran out of time.
    pub fn time_expired(&mut self) -> Result<TurnResult, GameError> {
        let state = self.state.as_mut().ok_or(GameError::NoActiveGame)?;
        if state.is_concluded() {
            return Err(GameError::GameConcluded);
        }
        state.conclude_timeout();
        let winner = state.other_player().name().to_string();
        info!(winner = %winner, round = state.round(), "turn timer expired");
        Ok(TurnResult::finished(
            false,
            format!("Time's up! {winner} wins!"),
        ))
    }

    /// Titles suggested for the partially typed `input`.
    pub fn autocomplete_suggestions(&self, input: &str) -> Vec<String> {
        self.autocomplete.suggest(input)
    }
}

fn describe(connections: &[Connection]) -> String {
    connections
        .iter()
        .map(Connection::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn person_names(connections: &[Connection]) -> String {
    let mut names: Vec<&str> = Vec::new();
    for connection in connections {
        if !names.contains(&connection.person_name()) {
            names.push(connection.person_name());
        }
    }
    names.join(", ")
}
