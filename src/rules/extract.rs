//! Sentence extraction: reading candidate rules off the board.
//!
//! Text-capable blocks are projected onto a cell grid, then scanned
//! twice: column-major (columns outer, rows inner) and row-major. A run
//! of consecutive occupied cells ends at any gap or at the board edge;
//! runs of at least [`RULE_MIN_LEN`] tokens become candidate rules in
//! scan order.

use crate::board::Board;
use crate::core::Text;

use super::rule::Rule;

/// Minimum token count for a run to count as a sentence.
pub const RULE_MIN_LEN: usize = 3;

/// Extract every candidate rule from the board's live text blocks.
///
/// If more than one text block occupies a cell, the last one in arena
/// order wins; cells are modeled as holding at most one significant
/// text token.
#[must_use]
pub fn extract(board: &Board) -> Vec<Rule> {
    let size = board.size();
    let (w, h) = (size.x.max(0) as usize, size.y.max(0) as usize);

    let mut cells: Vec<Option<Text>> = vec![None; w * h];
    for (_, block) in board.live() {
        if let Some(text) = block.ident().as_text() {
            let pos = block.position();
            cells[pos.y as usize * w + pos.x as usize] = Some(text);
        }
    }

    let mut rules = Vec::new();
    let mut run: Vec<Text> = Vec::new();

    // Column-major pass.
    for x in 0..w {
        for y in 0..h {
            push_cell(cells[y * w + x], &mut run, &mut rules);
        }
        flush(&mut run, &mut rules);
    }

    // Row-major pass.
    for y in 0..h {
        for x in 0..w {
            push_cell(cells[y * w + x], &mut run, &mut rules);
        }
        flush(&mut run, &mut rules);
    }

    rules
}

fn push_cell(cell: Option<Text>, run: &mut Vec<Text>, rules: &mut Vec<Rule>) {
    match cell {
        Some(text) => run.push(text),
        None => flush(run, rules),
    }
}

fn flush(run: &mut Vec<Text>, rules: &mut Vec<Rule>) {
    if run.len() >= RULE_MIN_LEN {
        rules.push(Rule::new(run.iter().copied()));
    }
    run.clear();
}
