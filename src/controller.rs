//! The game controller: one board, its state machine, counters and clock.
//!
//! This is the main point of interest for frontends — everything they do goes through here. Input adapters turn clicks into [`reveal_tile`][reveal] and [`flag_tile`][flag] calls, renderers read the getters or subscribe to the [stores][store].
//!
//! [reveal]: struct.GameController.html#method.reveal_tile "reveal_tile — opens a tile, floods clearings and chords numbers"
//! [flag]: struct.GameController.html#method.flag_tile "flag_tile — toggles a flag"
//! [store]: struct.Store.html "Store — a value which frontends can observe"

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use crate::{
    Board, Coordinates, Tile,
    Difficulty, DifficultySetup, DifficultyTable,
    GameState, GameTimer, Clock, SystemClock,
    Scheduler, TokioScheduler, InertScheduler, TaskHandle,
    AudioService, SilentAudio, Store,
    audio::play_explosion,
};

/// The collaborators and configuration a controller is built with.
///
/// The default options use the classic presets, an entropy-seeded generator, the wall clock, silence, and the tokio runtime of the calling context if there is one. Without a runtime, scheduled work is dropped: the clock is still correct when read, but it is not pushed to subscribers every second.
pub struct ControllerOptions {
    /// The setup of every difficulty.
    pub setups: DifficultyTable,
    /// The generator used to place mines.
    pub rng: Box<dyn RngCore + Send>,
    /// The time source of the game clock.
    pub clock: Arc<dyn Clock>,
    /// Runs the clock tick and the delayed sound cues.
    pub scheduler: Arc<dyn Scheduler>,
    /// Plays the sound cues.
    pub audio: Arc<dyn AudioService>,
}
impl Default for ControllerOptions {
    fn default() -> Self {
        let scheduler: Arc<dyn Scheduler> = match TokioScheduler::try_current() {
            Some(scheduler) => Arc::new(scheduler),
            None => Arc::new(InertScheduler),
        };
        Self {
            setups: DifficultyTable::default(),
            rng: Box::new(StdRng::from_entropy()),
            clock: Arc::new(SystemClock),
            scheduler,
            audio: Arc::new(SilentAudio),
        }
    }
}

/// Runs one Minesweeper game at a time.
///
/// A controller always owns exactly one board. A fresh board has no mines: they are placed on the first reveal, around but never next to the clicked tile, which also starts the clock. From then on reveals and flags mutate the board until a mine is hit or every safe tile is open; after that the board is frozen until the game is reset.
///
/// Invalid input is never an error. Coordinates outside the board and actions which the current state does not allow are ignored, and the methods report whether anything changed.
///
/// # Usage
/// ```
/// # use sweeper_engine::{GameController, Difficulty, GameState};
/// let mut game = GameController::new(Difficulty::Hard);
/// assert_eq!(game.state(), GameState::Start);
///
/// assert!(game.reveal_tile(4, 4));
/// assert_ne!(game.state(), GameState::Lose);
/// assert!(game.tile(4, 4).unwrap().is_revealed);
///
/// // The first click is always safe, and so are its neighbors.
/// assert!(!game.tile(3, 3).unwrap().is_mine);
/// ```
pub struct GameController {
    difficulty: Difficulty,
    setups: DifficultyTable,
    setup: DifficultySetup,
    board: Board,
    state: GameState,
    flags: usize,
    revealed: usize,
    score: u32,
    timer: GameTimer,
    rng: Box<dyn RngCore + Send>,
    scheduler: Arc<dyn Scheduler>,
    audio: Arc<dyn AudioService>,
    cues: Vec<TaskHandle>,
    board_store: Store<Board>,
    elapsed_store: Store<u64>,
}

impl GameController {
    /// Creates a controller with the default options, ready for the first click.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_options(difficulty, ControllerOptions::default())
    }
    /// Creates a controller with the given collaborators, ready for the first click.
    pub fn with_options(difficulty: Difficulty, options: ControllerOptions) -> Self {
        let setup = options.setups.get(difficulty);
        let board = Board::empty(setup.dimensions());
        let mut controller = Self {
            difficulty,
            setups: options.setups,
            board_store: Store::new(board.clone()),
            elapsed_store: Store::new(0),
            setup,
            board,
            state: GameState::Start,
            flags: 0,
            revealed: 0,
            score: 0,
            timer: GameTimer::new(options.clock),
            rng: options.rng,
            scheduler: options.scheduler,
            audio: options.audio,
            cues: Vec::new(),
        };
        controller.setup_game();
        controller
    }

    /// Throws the board away and starts over with the current difficulty.
    pub fn reset_game(&mut self) {
        self.setup_game();
    }
    /// Switches to another difficulty, starting over.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.setup_game();
    }
    /// Replaces the difficulty table. The new setups apply from the next reset or difficulty change.
    pub fn set_setups(&mut self, setups: DifficultyTable) {
        self.setups = setups;
    }

    fn setup_game(&mut self) {
        self.cancel_cues();
        self.timer.reset();

        let setup = self.setups.get(self.difficulty);
        self.setup = setup;
        self.board = Board::empty(setup.dimensions());
        self.state = GameState::Start;
        self.flags = 0;
        self.revealed = 0;
        self.score = 0;
        log::debug!("new {} game: {}x{} with {} mines",
            self.difficulty, setup.width(), setup.height(), setup.mines());

        self.board_store.set(self.board.clone());
        self.elapsed_store.set(0);
    }
    /// Places the mines around the first click and starts playing.
    fn fill_board(&mut self, first_click: Coordinates) {
        self.board.populate(&mut *self.rng, self.setup.mines(), first_click);
        self.state = GameState::Playing;
        self.timer.start(self.scheduler.as_ref(), self.elapsed_store.clone());
    }

    /// Opens the tile at `(x, y)`.
    ///
    /// The first reveal of a game places the mines. Revealing a closed tile floods the clearing it belongs to; revealing an open number chords it, opening its closed neighbors if exactly as many of them are flagged as its number says. Flagged tiles are never opened.
    ///
    /// Returns `true` if any tile was opened.
    pub fn reveal_tile(&mut self, x: usize, y: usize) -> bool {
        let at = [x, y];
        if !self.board.contains(at) || !self.state.accepts_reveals() {
            return false;
        }
        if self.state == GameState::Start {
            self.fill_board(at);
        }

        let pending = if self.board[at].is_revealed {
            match self.board.chord_seeds(at) {
                Some(seeds) => self.board.flood_from(seeds),
                None => return false,
            }
        } else {
            self.board.flood_from([at])
        };
        log::trace!("revealing {} tiles from {:?}", pending.len(), at);
        self.commit(&pending)
    }
    /// Opens a planned batch, then settles the outcome and publishes the board once.
    fn commit(&mut self, pending: &[Coordinates]) -> bool {
        let outcome = self.board.reveal_all(pending);
        if outcome.is_empty() {
            return false;
        }
        if outcome.hit_mine {
            self.board.reveal_mines();
            self.finish(GameState::Lose);
            self.cues = play_explosion(&self.audio, self.scheduler.as_ref());
        } else {
            self.revealed += outcome.newly_revealed;
            if self.revealed == self.setup.safe_tiles() {
                self.finish(GameState::Win);
            }
        }
        self.board_store.set(self.board.clone());
        true
    }
    fn finish(&mut self, state: GameState) {
        let elapsed = self.timer.stop();
        self.elapsed_store.set(elapsed.as_secs());
        self.state = state;
        log::info!("game over: {:?} after {:.1}s", state, elapsed.as_secs_f64());
    }

    /// Toggles the flag on the closed tile at `(x, y)`.
    ///
    /// Flags can only be placed while playing. There is no upper limit: placing more flags than there are mines drives [`flags_remaining`](#method.flags_remaining) below zero.
    ///
    /// Returns `true` if the flag was toggled.
    pub fn flag_tile(&mut self, x: usize, y: usize) -> bool {
        if !self.state.accepts_flags() {
            return false;
        }
        let tile = match self.board.get_mut([x, y]) {
            Some(tile) if tile.is_flaggable() => tile,
            _ => return false,
        };
        tile.is_flagged = !tile.is_flagged;
        if tile.is_flagged {
            self.flags += 1;
        } else {
            self.flags -= 1;
        }
        self.board_store.set(self.board.clone());
        true
    }

    /// Returns the tile at `(x, y)`, or `None` if it's out of bounds.
    #[inline]
    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.board.get([x, y])
    }
    /// Returns the board.
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }
    /// Returns the phase the game is in.
    #[inline(always)]
    pub const fn state(&self) -> GameState {
        self.state
    }
    /// Returns the difficulty of the current game.
    #[inline(always)]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
    /// Returns the setup of the current game. Setups installed by [`set_setups`](#method.set_setups) only show up here after the next reset.
    #[inline(always)]
    pub const fn setup(&self) -> DifficultySetup {
        self.setup
    }
    /// Returns the number of columns.
    #[inline(always)]
    pub const fn width(&self) -> usize {
        self.board.width()
    }
    /// Returns the number of rows.
    #[inline(always)]
    pub const fn height(&self) -> usize {
        self.board.height()
    }
    /// Returns the number of mines in the current game.
    #[inline(always)]
    pub const fn total_mines(&self) -> usize {
        self.setup.mines()
    }
    /// Returns the number of flags the player placed during the game.
    ///
    /// Losing opens every mine and takes the flags off them, but this count stays as the player left it, so after a loss it can exceed [`Board::flag_count`](struct.Board.html#method.flag_count).
    #[inline(always)]
    pub const fn flag_count(&self) -> usize {
        self.flags
    }
    /// Returns the number of mines minus the number of flags. Negative when the player over-flags.
    #[inline]
    pub const fn flags_remaining(&self) -> isize {
        self.setup.mines() as isize - self.flags as isize
    }
    /// Returns the number of safe tiles opened so far.
    #[inline(always)]
    pub const fn revealed_count(&self) -> usize {
        self.revealed
    }
    /// Returns the score. Nothing awards points yet, so this is always zero.
    #[inline(always)]
    pub const fn score(&self) -> u32 {
        self.score
    }
    /// Returns the whole seconds spent playing: zero before the first click, frozen once the game is over.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }
    /// Returns the store publishing the board after every change.
    pub fn board_store(&self) -> &Store<Board> {
        &self.board_store
    }
    /// Returns the store publishing the elapsed seconds every tick, on game end and on reset.
    pub fn elapsed_store(&self) -> &Store<u64> {
        &self.elapsed_store
    }

    fn cancel_cues(&mut self) {
        for cue in &mut self.cues {
            cue.cancel();
        }
        self.cues.clear();
    }

    /// Starts playing with mines at exactly the given spots instead of random ones.
    #[cfg(test)]
    pub(crate) fn start_with_mines(&mut self, mines: &[Coordinates]) {
        self.board.place_mines_at(mines);
        self.setup = DifficultySetup::unchecked(self.board.dimensions(), self.board.mine_count());
        self.state = GameState::Playing;
        self.timer.start(self.scheduler.as_ref(), self.elapsed_store.clone());
    }
}
impl Drop for GameController {
    fn drop(&mut self) {
        self.cancel_cues();
        self.timer.reset();
    }
}
impl Debug for GameController {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("difficulty", &self.difficulty)
            .field("state", &self.state)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("total_mines", &self.total_mines())
            .field("flags", &self.flags)
            .field("revealed", &self.revealed)
            .field("elapsed_secs", &self.elapsed_secs())
            .finish()
    }
}
