use std::sync::mpsc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Board, Controller, Participant, Position, Token, TurnSequencer};
use crate::chooser::MoveExecutor;
use crate::config::GameConfig;
use crate::error::{ConfigError, ExecutorError, GameError, MoveError};
use crate::events::{Command, EventBus, GameEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// The participant holding `loser` ran out of time.
    Forfeited { winner: Token, loser: Token },
    /// The board reached a terminal state. `winner` is `None` on a draw.
    Concluded {
        winner: Option<Token>,
        winning_cells: Vec<Position>,
    },
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What a single call to [`Game::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Applied(Position),
    Rejected(MoveError),
    /// The participant to move is interactive; feed it through [`Game::play`].
    AwaitingInput,
    Forfeited,
    GameOver,
}

/// A game session: two participants, a board, and the turn loop between them.
///
/// All board mutation happens on the thread that owns the `Game`. Computed
/// participants only ever receive a snapshot through the [`MoveExecutor`].
pub struct Game {
    config: GameConfig,
    board: Board,
    participants: [Participant; 2],
    turns: TurnSequencer,
    executor: MoveExecutor,
    events: EventBus,
    status: GameStatus,
    rng: StdRng,
}

impl Game {
    /// Create a session. Fails on an invalid config.
    pub fn new(config: GameConfig, participants: [Participant; 2]) -> Result<Self, ConfigError> {
        Self::with_rng(config, participants, StdRng::from_os_rng())
    }

    /// Create a session whose random start is reproducible.
    pub fn with_seed(
        config: GameConfig,
        participants: [Participant; 2],
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, participants, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: GameConfig,
        participants: [Participant; 2],
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols, config.winning_length)?;
        let executor = MoveExecutor::new(config.move_timeout());

        let mut game = Game {
            config,
            board,
            participants,
            turns: TurnSequencer::new(),
            executor,
            events: EventBus::new(),
            status: GameStatus::InProgress,
            rng,
        };
        game.start();
        Ok(game)
    }

    /// Decide the play order, hand out tokens and clear the board.
    fn start(&mut self) {
        self.turns = if self.config.random_start {
            TurnSequencer::random(&mut self.rng)
        } else {
            TurnSequencer::new()
        };
        let [first, second] = self.turns.order();
        self.participants[first].set_token(Token::Red);
        self.participants[second].set_token(Token::Yellow);

        self.board.reset();
        self.status = GameStatus::InProgress;
        log::info!(
            "{} ({}) moves first against {} ({})",
            self.participants[first].name(),
            Token::Red.name(),
            self.participants[second].name(),
            Token::Yellow.name()
        );
    }

    /// Start over with a fresh board, re-drawing the play order if random
    /// start is enabled.
    pub fn reset(&mut self) {
        self.start();
        self.events.publish(GameEvent::Restarted);
    }

    /// Register an event subscriber.
    pub fn subscribe(&mut self) -> mpsc::Receiver<GameEvent> {
        let rx = self.events.subscribe();
        log::debug!("{} event subscribers", self.events.subscriber_count());
        rx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn participants(&self) -> &[Participant; 2] {
        &self.participants
    }

    /// The participant whose turn it is
    pub fn current_participant(&self) -> &Participant {
        &self.participants[self.turns.current()]
    }

    /// The participant playing `token`
    pub fn participant_for(&self, token: Token) -> &Participant {
        let [first, second] = &self.participants;
        if first.token() == token {
            first
        } else {
            second
        }
    }

    /// Winner of the game, by board or by forfeit
    pub fn winner(&self) -> Option<&Participant> {
        match &self.status {
            GameStatus::InProgress => None,
            GameStatus::Forfeited { winner, .. } => Some(self.participant_for(*winner)),
            GameStatus::Concluded { winner, .. } => winner.map(|t| self.participant_for(t)),
        }
    }

    pub fn winning_cells(&self) -> &[Position] {
        match &self.status {
            GameStatus::Concluded { winning_cells, .. } => winning_cells,
            _ => &[],
        }
    }

    /// Advisory hover from an interactive participant.
    pub fn highlight(&mut self, col: usize) {
        if !self.status.is_over() && self.current_participant().is_interactive() {
            self.events.publish(GameEvent::HighlightRequested(col));
        }
    }

    /// Play `col` for the current participant, which must be interactive.
    ///
    /// `None` stands for a selection that missed the board. Rejected moves
    /// change nothing and emit nothing; the same participant stays to move.
    /// Computed participants only move through [`Game::step`].
    pub fn play(&mut self, col: Option<usize>) -> Result<Position, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.current_participant().is_interactive() {
            return Err(MoveError::NotInteractive(
                self.current_participant().name().to_string(),
            ));
        }
        self.apply(col)
    }

    fn apply(&mut self, col: Option<usize>) -> Result<Position, MoveError> {
        let col = col.ok_or(MoveError::NoColumn)?;

        let token = self.current_participant().token();
        let row = self.board.play(token.to_cell(), col)?;
        let position = (col, row);

        self.events.publish(GameEvent::ColumnChosen(col));
        self.events.publish(GameEvent::MoveApplied { position, token });
        log::debug!(
            "board capacity = {}, winner = {:?}",
            self.board.remaining_capacity(),
            self.board.winner()
        );

        self.turns.advance();
        if self.board.is_terminal() {
            self.conclude();
        }
        Ok(position)
    }

    /// Run one computed turn.
    pub fn step(&mut self) -> Step {
        if self.status.is_over() {
            return Step::GameOver;
        }
        let chooser = match self.current_participant().controller() {
            Controller::Interactive => return Step::AwaitingInput,
            Controller::Computed(chooser) => chooser.clone(),
        };

        match self.executor.choose(&chooser, &self.board) {
            Ok(col) => match self.apply(col) {
                Ok(position) => Step::Applied(position),
                Err(e) => {
                    log::debug!(
                        "{} chose an invalid move: {}",
                        self.current_participant().name(),
                        e
                    );
                    Step::Rejected(e)
                }
            },
            Err(ExecutorError::TimedOut(_)) => {
                log::error!("{} took too long!", self.current_participant().name());
                self.forfeit_current();
                Step::Forfeited
            }
            Err(e) => {
                log::error!(
                    "{} failed to choose a move: {}",
                    self.current_participant().name(),
                    e
                );
                self.forfeit_current();
                Step::Forfeited
            }
        }
    }

    /// Drive the game until it ends.
    ///
    /// Interactive turns block on `commands` with no deadline. Column
    /// selections arriving during a computed turn are ignored; a reset is
    /// honoured before the next computed move.
    pub fn run(&mut self, commands: &mpsc::Receiver<Command>) -> Result<GameStatus, GameError> {
        loop {
            if self.status.is_over() {
                log::debug!("game over");
                return Ok(self.status.clone());
            }

            if self.current_participant().is_interactive() {
                match commands.recv().map_err(|_| GameError::InputClosed)? {
                    Command::ColumnSelected(col) => {
                        if let Err(e) = self.play(col) {
                            log::debug!("ignoring selection {:?}: {}", col, e);
                        }
                    }
                    Command::Hover(col) => self.highlight(col),
                    Command::Reset => self.reset(),
                }
                continue;
            }

            let mut restarted = false;
            for command in commands.try_iter() {
                match command {
                    Command::Reset => {
                        self.reset();
                        restarted = true;
                    }
                    other => log::debug!("ignoring {:?} during a computed turn", other),
                }
            }
            if restarted {
                continue;
            }
            self.step();
        }
    }

    fn forfeit_current(&mut self) {
        let loser = self.current_participant().token();
        let winner = self.participants[self.turns.opponent()].token();
        self.status = GameStatus::Forfeited { winner, loser };

        let name = self.participant_for(winner).name().to_string();
        log::info!("{} wins by forfeit", name);
        self.events.publish(GameEvent::GameOver {
            winner: Some(name),
            winning_cells: Vec::new(),
        });
    }

    fn conclude(&mut self) {
        let winner = self.board.winner();
        let winning_cells = self.board.winning_cells().to_vec();
        let name = winner.map(|t| self.participant_for(t).name().to_string());
        match &name {
            Some(name) => log::info!("{} wins", name),
            None => log::info!("draw"),
        }

        self.status = GameStatus::Concluded {
            winner,
            winning_cells: winning_cells.clone(),
        };
        self.events.publish(GameEvent::GameOver {
            winner: name,
            winning_cells,
        });
    }
}
