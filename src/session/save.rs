//! Save/restore text format.
//!
//! Line 1 is the current level's display name, used to resume at the
//! matching level. Each following line is one block record:
//! `IDENTIFIER X Y DEAD`, separated by [`SEPARATOR`], until a blank or
//! short line terminates the record. Dead blocks are persisted too —
//! the `HAS` operator needs them back after a restore.
//!
//! Property sets are never written: they are frame-scoped and are
//! recomputed from scratch after any load.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::board::{Block, Board};
use crate::core::{Position, Vocabulary};
use crate::error::EngineError;

/// Field separator in block records.
pub const SEPARATOR: char = ' ';

/// A parsed save file: the level to resume plus its block records.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveData {
    /// Display name of the level being resumed.
    pub level_name: String,
    /// The full block arena, dead blocks included.
    pub blocks: Vec<Block>,
}

/// Write `board` (and the level name) in the save text format.
pub fn write_save<W: Write>(
    mut writer: W,
    level_name: &str,
    board: &Board,
) -> Result<(), EngineError> {
    writeln!(writer, "{level_name}")?;
    for block in board.blocks() {
        let position = block.position();
        writeln!(
            writer,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            block.ident(),
            position.x,
            position.y,
            block.is_dead()
        )?;
    }
    writeln!(writer)?;
    log::info!("saved {} blocks of level {level_name:?}", board.blocks().len());
    Ok(())
}

/// Parse a save record. Nothing is applied to any board here; the
/// session commits the result only once parsing has fully succeeded.
///
/// Records with an unknown identifier are skipped with a warning, like
/// unknown tokens in a level source. Structurally broken records
/// (unparsable coordinates or dead flag) are hard errors.
pub fn read_save<R: BufRead>(reader: R, vocab: &Vocabulary) -> Result<SaveData, EngineError> {
    let mut lines = reader.lines();

    let level_name = lines
        .next()
        .transpose()?
        .ok_or_else(|| EngineError::MalformedSave("missing level name".into()))?;

    let mut blocks = Vec::new();
    for line in lines {
        let line = line?;
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        if fields.len() <= 1 {
            break; // End of record.
        }
        if fields.len() != 4 {
            return Err(EngineError::MalformedSave(format!(
                "expected 4 fields, got {}: {line:?}",
                fields.len()
            )));
        }

        let Some(ident) = vocab.lookup(fields[0]) else {
            log::warn!("skipping save record with unknown identifier {:?}", fields[0]);
            continue;
        };
        let x = parse_field(fields[1], &line)?;
        let y = parse_field(fields[2], &line)?;
        let dead: bool = fields[3]
            .parse()
            .map_err(|_| EngineError::MalformedSave(format!("bad dead flag in {line:?}")))?;

        let mut block = Block::new(ident, Position::new(x, y));
        block.set_dead(dead);
        blocks.push(block);
    }

    log::info!("read {} blocks for level {level_name:?}", blocks.len());
    Ok(SaveData { level_name, blocks })
}

fn parse_field(field: &str, line: &str) -> Result<i32, EngineError> {
    field
        .parse()
        .map_err(|_| EngineError::MalformedSave(format!("bad coordinate in {line:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RealObject;

    fn sample_board() -> Board {
        let mut board = Board::new(Position::new(5, 5));
        board.add(Block::new(RealObject::Baba, Position::new(1, 2)));
        board.add(Block::new(RealObject::Rock, Position::new(3, 4)));
        board.block_mut(1).set_dead(true);
        board
    }

    #[test]
    fn test_round_trip() {
        let vocab = Vocabulary::new();
        let board = sample_board();

        let mut buffer = Vec::new();
        write_save(&mut buffer, "level1.txt", &board).unwrap();
        let data = read_save(buffer.as_slice(), &vocab).unwrap();

        assert_eq!(data.level_name, "level1.txt");
        assert_eq!(data.blocks.len(), 2);
        for (orig, restored) in board.blocks().iter().zip(&data.blocks) {
            assert_eq!(orig.ident(), restored.ident());
            assert_eq!(orig.position(), restored.position());
            assert_eq!(orig.is_dead(), restored.is_dead());
        }
    }

    #[test]
    fn test_written_format() {
        let board = sample_board();
        let mut buffer = Vec::new();
        write_save(&mut buffer, "lv", &board).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "lv\nOBJ_BABA 1 2 false\nOBJ_ROCK 3 4 true\n\n");
    }

    #[test]
    fn test_blank_line_terminates_record() {
        let vocab = Vocabulary::new();
        let text = "lv\nOBJ_BABA 1 2 false\n\nOBJ_ROCK 3 4 false\n";
        let data = read_save(text.as_bytes(), &vocab).unwrap();
        assert_eq!(data.blocks.len(), 1);
    }

    #[test]
    fn test_unknown_identifier_skipped() {
        let vocab = Vocabulary::new();
        let text = "lv\nKEKE 1 2 false\nOBJ_ROCK 3 4 false\n\n";
        let data = read_save(text.as_bytes(), &vocab).unwrap();
        assert_eq!(data.blocks.len(), 1);
    }

    #[test]
    fn test_broken_record_is_an_error() {
        let vocab = Vocabulary::new();
        assert!(read_save("lv\nOBJ_BABA one 2 false\n".as_bytes(), &vocab).is_err());
        assert!(read_save("lv\nOBJ_BABA 1 2 maybe\n".as_bytes(), &vocab).is_err());
        assert!(read_save("".as_bytes(), &vocab).is_err());
    }

    #[test]
    fn test_properties_not_persisted() {
        use crate::core::Property;

        let vocab = Vocabulary::new();
        let mut board = sample_board();
        board.block_mut(0).grant(Property::You);

        let mut buffer = Vec::new();
        write_save(&mut buffer, "lv", &board).unwrap();
        let data = read_save(buffer.as_slice(), &vocab).unwrap();

        assert!(!data.blocks[0].has(Property::You));
    }
}
