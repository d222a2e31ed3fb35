//! The game session: playlist, per-frame orchestration and the query
//! surface the driving loop consumes.
//!
//! A session owns the vocabulary, the level playlist, the active board
//! and the current rule set. The driver calls [`Session::frame`] once
//! per frame with that frame's input and reads the outcome; rendering,
//! input polling and file I/O all stay outside.
//!
//! Frame order: control requests, then the effect engine (which may
//! move blocks via the `YOU` effect), then — only if the board changed —
//! property clearing and a full rule recompute. Rules are therefore
//! stable across frames with no net board change.

use crate::board::{Block, Board};
use crate::core::{Text, Vocabulary};
use crate::error::EngineError;
use crate::effects;
use crate::rules::{self, Evaluator, Rule};

use super::input::{ControlRequest, FrameInput};
use super::level::{parse_level, LevelSource};
use super::save::{read_save, write_save};

/// What a frame left the session in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The current level continues.
    Running,
    /// The current level was finished; the session advanced to the next.
    LevelComplete,
    /// The playlist is exhausted or the driver quit.
    SessionOver,
}

/// Builds a [`Session`].
///
/// ## Example
///
/// ```
/// use gridspell::session::{LevelSource, SessionBuilder};
///
/// let session = SessionBuilder::new()
///     .level(LevelSource::new("one.txt", "3,1\nOBJ_BABA,BABA,YOU"))
///     .starting_rule("BABA", "IS", "YOU")
///     .build()
///     .unwrap();
/// assert_eq!(session.level_name(), "one.txt");
/// ```
#[derive(Default)]
pub struct SessionBuilder {
    levels: Vec<LevelSource>,
    extra_rules: Vec<[String; 3]>,
}

impl SessionBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a level to the playlist.
    #[must_use]
    pub fn level(mut self, source: LevelSource) -> Self {
        self.levels.push(source);
        self
    }

    /// Append several levels to the playlist.
    #[must_use]
    pub fn levels(mut self, sources: impl IntoIterator<Item = LevelSource>) -> Self {
        self.levels.extend(sources);
        self
    }

    /// Inject a starting rule as literal identifier names
    /// (`subject operator object`). Merged into every frame's candidate
    /// rule list, after the constant `TEXT IS PUSH` default.
    #[must_use]
    pub fn starting_rule(
        mut self,
        subject: impl Into<String>,
        operator: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        self.extra_rules
            .push([subject.into(), operator.into(), object.into()]);
        self
    }

    /// Validate every level source and start the session on the first.
    pub fn build(self) -> Result<Session, EngineError> {
        if self.levels.is_empty() {
            return Err(EngineError::EmptyPlaylist);
        }

        let vocab = Vocabulary::new();

        // Parse the whole playlist up front so a malformed level fails
        // here instead of mid-session.
        let mut boards = Vec::with_capacity(self.levels.len());
        for source in &self.levels {
            boards.push(parse_level(&vocab, &source.text)?);
        }
        let board = boards.swap_remove(0);

        let mut starting_rules = vec![Rule::from_names(&vocab, &["TEXT", "IS", "PUSH"])];
        for names in &self.extra_rules {
            let rule = Rule::from_names(&vocab, &[&names[0], &names[1], &names[2]]);
            log::info!("starting rule injected: {rule}");
            starting_rules.push(rule);
        }

        Ok(Session {
            vocab,
            levels: self.levels,
            index: 0,
            board,
            starting_rules,
            active_rules: Vec::new(),
            quit: false,
        })
    }
}

/// A running game across a playlist of levels.
pub struct Session {
    vocab: Vocabulary,
    levels: Vec<LevelSource>,
    index: usize,
    board: Board,
    starting_rules: Vec<Rule>,
    active_rules: Vec<Rule>,
    quit: bool,
}

impl Session {
    /// Run one frame.
    pub fn frame(&mut self, input: &FrameInput) -> FrameOutcome {
        for &request in &input.controls {
            match request {
                ControlRequest::Quit => self.quit = true,
                ControlRequest::Reload => self.enter_level(self.index),
                ControlRequest::Skip => self.board.set_finished(true),
                ControlRequest::Previous => {
                    if self.index > 0 {
                        self.enter_level(self.index - 1);
                    }
                }
            }
        }
        if self.quit {
            return FrameOutcome::SessionOver;
        }

        effects::apply_effects(&mut self.board, input.direction);

        if self.board.is_dirty() {
            self.board.clear_properties();
            self.recompute_rules();
            self.board.clear_dirty();
        }

        if self.board.is_finished() {
            if self.index + 1 < self.levels.len() {
                self.enter_level(self.index + 1);
                FrameOutcome::LevelComplete
            } else {
                log::info!("playlist finished");
                self.quit = true;
                FrameOutcome::SessionOver
            }
        } else {
            FrameOutcome::Running
        }
    }

    /// Extract, merge, simplify and evaluate this frame's rule set.
    fn recompute_rules(&mut self) {
        let mut candidates = rules::extract(&self.board);
        candidates.extend(self.starting_rules.iter().cloned());

        let mut reduced = rules::simplify(candidates);
        Evaluator::new(&self.vocab).evaluate(&mut reduced, &mut self.board);
        self.active_rules = reduced;
    }

    /// Load (or reload) a playlist level by index.
    ///
    /// Sources were validated at build time, so a parse failure here
    /// means the impossible happened; the current board is kept.
    fn enter_level(&mut self, index: usize) {
        match parse_level(&self.vocab, &self.levels[index].text) {
            Ok(board) => {
                log::info!("entering level {:?}", self.levels[index].name);
                self.index = index;
                self.board = board;
                self.active_rules.clear();
            }
            Err(err) => log::warn!("level {:?} failed to reload: {err}", self.levels[index].name),
        }
    }

    // === Persistence ===

    /// Write the current level name and block arena in the save format.
    pub fn save_game<W: std::io::Write>(&self, writer: W) -> Result<(), EngineError> {
        write_save(writer, self.level_name(), &self.board)
    }

    /// Restore a saved game: resume at the named level and replace its
    /// whole block arena with the saved records.
    ///
    /// Fails without touching the session if the data is malformed or
    /// names a level outside the playlist. Out-of-bounds records are
    /// dropped like out-of-bounds level tokens.
    pub fn restore_game<R: std::io::BufRead>(&mut self, reader: R) -> Result<(), EngineError> {
        let data = read_save(reader, &self.vocab)?;

        let index = self
            .levels
            .iter()
            .position(|source| source.name == data.level_name)
            .ok_or_else(|| EngineError::UnknownLevel(data.level_name.clone()))?;

        self.enter_level(index);
        let bounds = self.board.size();
        let blocks: Vec<Block> = data
            .blocks
            .into_iter()
            .filter(|b| {
                let keep = self.board.in_bounds(b.position());
                if !keep {
                    log::warn!("dropping out-of-bounds save record at {}", b.position());
                }
                keep
            })
            .collect();
        log::info!(
            "restored {} blocks into {}x{} level {:?}",
            blocks.len(),
            bounds.x,
            bounds.y,
            data.level_name
        );
        self.board.replace_all(blocks);
        Ok(())
    }

    // === Query surface ===

    /// The live blocks in draw order (text above objects).
    #[must_use]
    pub fn render_blocks(&self) -> Vec<&Block> {
        self.board.render_order()
    }

    /// Display name of the current level.
    #[must_use]
    pub fn level_name(&self) -> &str {
        &self.levels[self.index].name
    }

    /// Whether the current level's finished flag is set.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.board.is_finished()
    }

    /// The rule set from the last recompute, fully reduced.
    #[must_use]
    pub fn active_rules(&self) -> &[Rule] {
        &self.active_rules
    }

    /// Tokens of the active rules, for display or assertions.
    pub fn active_rule_texts(&self) -> impl Iterator<Item = &[Text]> {
        self.active_rules.iter().map(Rule::tokens)
    }

    /// The vocabulary this session resolves names through.
    #[must_use]
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// The active board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The active board, mutable. Intended for drivers that edit state
    /// between frames (level editors, tests).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Ident, Position, Property, RealObject};

    // One row: baba object, a gap, then the sentence BABA IS YOU.
    const LEVEL_ONE: &str = "6,2\nOBJ_BABA,,BABA,IS,YOU";

    fn session() -> Session {
        SessionBuilder::new()
            .level(LevelSource::new("one.txt", LEVEL_ONE))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_requires_levels() {
        assert!(matches!(
            SessionBuilder::new().build(),
            Err(EngineError::EmptyPlaylist)
        ));
    }

    #[test]
    fn test_build_validates_all_levels() {
        let result = SessionBuilder::new()
            .level(LevelSource::new("ok.txt", LEVEL_ONE))
            .level(LevelSource::new("bad.txt", "not-a-header\n"))
            .build();
        assert!(matches!(result, Err(EngineError::MalformedLevel(_))));
    }

    #[test]
    fn test_first_frame_derives_rules() {
        let mut session = session();
        session.frame(&FrameInput::idle());

        let baba = session
            .board()
            .live_of(Ident::Object(RealObject::Baba))[0];
        assert!(session.board().block(baba).has(Property::You));
    }

    #[test]
    fn test_rules_stable_without_movement() {
        let mut session = session();
        session.frame(&FrameInput::idle());
        let before = session.active_rules().to_vec();

        for _ in 0..3 {
            session.frame(&FrameInput::idle());
        }
        assert_eq!(session.active_rules(), before.as_slice());
    }

    #[test]
    fn test_movement_consumes_intent() {
        let mut session = session();
        session.frame(&FrameInput::idle()); // derive BABA IS YOU
        session.frame(&FrameInput::moving(Direction::Down));

        let baba = session
            .board()
            .live_of(Ident::Object(RealObject::Baba))[0];
        assert_eq!(session.board().block(baba).position(), Position::new(0, 1));
    }

    #[test]
    fn test_default_rule_makes_text_pushable() {
        let mut session = session();
        session.frame(&FrameInput::idle());

        let text_block = session
            .board()
            .live()
            .find(|(_, b)| b.ident().as_text().is_some())
            .map(|(i, _)| i)
            .unwrap();
        assert!(session.board().block(text_block).has(Property::Push));
    }

    #[test]
    fn test_injected_starting_rule() {
        let mut session = SessionBuilder::new()
            .level(LevelSource::new("one.txt", "3,1\nOBJ_ROCK"))
            .starting_rule("ROCK", "IS", "YOU")
            .build()
            .unwrap();
        session.frame(&FrameInput::idle());

        let rock = session
            .board()
            .live_of(Ident::Object(RealObject::Rock))[0];
        assert!(session.board().block(rock).has(Property::You));
    }

    #[test]
    fn test_quit_control() {
        let mut session = session();
        let outcome = session.frame(&FrameInput::control(ControlRequest::Quit));
        assert_eq!(outcome, FrameOutcome::SessionOver);
    }

    #[test]
    fn test_skip_advances_playlist() {
        let mut session = SessionBuilder::new()
            .level(LevelSource::new("one.txt", LEVEL_ONE))
            .level(LevelSource::new("two.txt", "3,1\nOBJ_ROCK"))
            .build()
            .unwrap();

        let outcome = session.frame(&FrameInput::control(ControlRequest::Skip));
        assert_eq!(outcome, FrameOutcome::LevelComplete);
        assert_eq!(session.level_name(), "two.txt");
    }

    #[test]
    fn test_skip_on_last_level_ends_session() {
        let mut session = session();
        let outcome = session.frame(&FrameInput::control(ControlRequest::Skip));
        assert_eq!(outcome, FrameOutcome::SessionOver);
    }

    #[test]
    fn test_reload_restores_positions() {
        let mut session = session();
        session.frame(&FrameInput::idle());
        session.frame(&FrameInput::moving(Direction::Down));

        session.frame(&FrameInput::control(ControlRequest::Reload));
        let baba = session
            .board()
            .live_of(Ident::Object(RealObject::Baba))[0];
        assert_eq!(session.board().block(baba).position(), Position::new(0, 0));
    }
}
