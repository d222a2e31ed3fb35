//! Gameplay integration tests: movement, effects and whole-session
//! frames driven through the public `Session` API.

use gridspell::core::{Direction, Ident, Position, Property, RealObject};
use gridspell::session::{ControlRequest, FrameInput, FrameOutcome, LevelSource, SessionBuilder};
use gridspell::{apply_effects, move_block, Block, Board, Session};

use proptest::prelude::*;

fn board(size: i32) -> Board {
    Board::new(Position::new(size, size))
}

// =============================================================================
// Push chains
// =============================================================================

/// YOU at (2,2), PUSH at (3,2), STOP at (4,2): a rightward move leaves
/// all three in place.
#[test]
fn test_push_chain_rejection() {
    let mut b = board(8);
    b.add(Block::new(RealObject::Baba, Position::new(2, 2)));
    b.add(Block::new(RealObject::Rock, Position::new(3, 2)));
    b.add(Block::new(RealObject::Wall, Position::new(4, 2)));
    b.block_mut(0).grant(Property::You);
    b.block_mut(1).grant(Property::Push);
    b.block_mut(2).grant(Property::Stop);

    apply_effects(&mut b, Some(Direction::Right));

    assert_eq!(b.block(0).position(), Position::new(2, 2));
    assert_eq!(b.block(1).position(), Position::new(3, 2));
    assert_eq!(b.block(2).position(), Position::new(4, 2));
}

#[test]
fn test_push_chain_commits_whole() {
    let mut b = board(8);
    b.add(Block::new(RealObject::Baba, Position::new(1, 2)));
    b.add(Block::new(RealObject::Rock, Position::new(2, 2)));
    b.add(Block::new(RealObject::Rock, Position::new(3, 2)));
    b.block_mut(0).grant(Property::You);
    b.block_mut(1).grant(Property::Push);
    b.block_mut(2).grant(Property::Push);

    apply_effects(&mut b, Some(Direction::Right));

    assert_eq!(b.block(0).position(), Position::new(2, 2));
    assert_eq!(b.block(1).position(), Position::new(3, 2));
    assert_eq!(b.block(2).position(), Position::new(4, 2));
}

// =============================================================================
// Effects
// =============================================================================

/// Two co-located blocks, one sinking: both die. A lone sink block
/// never does.
#[test]
fn test_sink_requires_company() {
    let mut b = board(8);
    b.add(Block::new(RealObject::Water, Position::new(2, 2)));
    b.add(Block::new(RealObject::Rock, Position::new(2, 2)));
    b.add(Block::new(RealObject::Water, Position::new(6, 6)));
    b.block_mut(0).grant(Property::Sink);
    b.block_mut(2).grant(Property::Sink);

    apply_effects(&mut b, None);

    assert!(b.block(0).is_dead());
    assert!(b.block(1).is_dead());
    assert!(!b.block(2).is_dead());
}

#[test]
fn test_win_sets_finished_only_on_co_location() {
    let mut b = board(8);
    b.add(Block::new(RealObject::Flag, Position::new(4, 4)));
    b.add(Block::new(RealObject::Baba, Position::new(3, 4)));
    b.block_mut(0).grant(Property::Win);
    b.block_mut(1).grant(Property::You);

    apply_effects(&mut b, None);
    assert!(!b.is_finished());

    b.block_mut(1).set_position(Position::new(4, 4));
    apply_effects(&mut b, None);
    assert!(b.is_finished());
}

// =============================================================================
// Full session frames
// =============================================================================

// 7 wide, 4 tall. Row 0 writes BABA IS YOU; row 1 writes FLAG IS WIN.
// The baba object starts at (0,3); the flag sits at (2,3).
const WIN_LEVEL: &str = "7,4\n\
    BABA,IS,YOU\n\
    FLAG,IS,WIN\n\
    \n\
    OBJ_BABA,,OBJ_FLAG";

fn win_session() -> Session {
    SessionBuilder::new()
        .level(LevelSource::new("win.txt", WIN_LEVEL))
        .level(LevelSource::new("next.txt", "3,1\nOBJ_ROCK"))
        .build()
        .unwrap()
}

#[test]
fn test_walk_onto_flag_completes_level() {
    let mut session = win_session();

    assert_eq!(session.frame(&FrameInput::idle()), FrameOutcome::Running);
    assert_eq!(
        session.frame(&FrameInput::moving(Direction::Right)),
        FrameOutcome::Running
    );
    let outcome = session.frame(&FrameInput::moving(Direction::Right));

    assert_eq!(outcome, FrameOutcome::LevelComplete);
    assert_eq!(session.level_name(), "next.txt");
}

#[test]
fn test_breaking_the_you_sentence_strands_the_player() {
    // The sentence sits on row 1 with space above, the baba object on
    // row 3 below it.
    let level = "5,5\n\
        \n\
        BABA,IS,YOU\n\
        \n\
        OBJ_BABA";
    let mut session = SessionBuilder::new()
        .level(LevelSource::new("lv.txt", level))
        .build()
        .unwrap();

    session.frame(&FrameInput::idle());
    // Walk under the YOU token, then shove it off the sentence row
    // (TEXT IS PUSH is the default, so tokens are pushable).
    session.frame(&FrameInput::moving(Direction::Right));
    session.frame(&FrameInput::moving(Direction::Right));
    session.frame(&FrameInput::moving(Direction::Up));
    session.frame(&FrameInput::moving(Direction::Up));

    // The sentence is broken: baba no longer holds YOU.
    let baba = session.board().live_of(Ident::Object(RealObject::Baba))[0];
    assert!(!session.board().block(baba).has(Property::You));

    // And with no YOU, further intents change nothing.
    let before = session.board().block(baba).position();
    session.frame(&FrameInput::moving(Direction::Left));
    assert_eq!(session.board().block(baba).position(), before);
}

#[test]
fn test_previous_control_returns_to_earlier_level() {
    let mut session = win_session();
    session.frame(&FrameInput::control(ControlRequest::Skip));
    assert_eq!(session.level_name(), "next.txt");

    session.frame(&FrameInput::control(ControlRequest::Previous));
    assert_eq!(session.level_name(), "win.txt");
}

// =============================================================================
// Movement invariants
// =============================================================================

proptest! {
    /// However blocks are tagged, movement never escapes the board.
    #[test]
    fn prop_moves_stay_in_bounds(
        placements in prop::collection::vec((0i32..6, 0i32..6, 0u8..4), 1..12),
        moves in prop::collection::vec(0u8..4, 1..12),
    ) {
        let mut b = board(6);
        for &(x, y, tag) in &placements {
            let mut block = Block::new(RealObject::Rock, Position::new(x, y));
            match tag {
                0 => block.grant(Property::Push),
                1 => block.grant(Property::Stop),
                2 => block.grant(Property::You),
                _ => {}
            }
            b.add(block);
        }

        for (i, &dir) in moves.iter().enumerate() {
            let direction = match dir {
                0 => Direction::Up,
                1 => Direction::Down,
                2 => Direction::Left,
                _ => Direction::Right,
            };
            move_block(&mut b, i % placements.len(), direction);
        }

        for (_, block) in b.live() {
            prop_assert!(b.in_bounds(block.position()));
        }
    }
}
