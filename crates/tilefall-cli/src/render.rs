use std::fmt::Write as _;

use tilefall_core::{Grid, Position, Symbol};

/// Shapes for the classic six-symbol board.
const SHAPES: [char; 6] = ['★', '▲', '■', '◆', '⬟', '●'];

/// How symbols are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Glyphs {
    Shapes,
    Letters,
}

impl Glyphs {
    /// Shapes when every symbol has one, letters otherwise.
    pub(crate) fn for_symbol_count(count: u8, letters: bool) -> Self {
        if letters || usize::from(count) > SHAPES.len() {
            Self::Letters
        } else {
            Self::Shapes
        }
    }

    fn glyph(self, symbol: Symbol) -> char {
        match self {
            Self::Shapes => SHAPES[usize::from(symbol.index())],
            Self::Letters => symbol.glyph(),
        }
    }
}

/// Renders the board with column and row numbers. The selected cell, if any,
/// is wrapped in brackets.
pub(crate) fn render(grid: &Grid, selection: Option<Position>, glyphs: Glyphs) -> String {
    let mut out = String::from("   ");
    for x in 0..grid.size() {
        let _ = write!(out, "{x:>3}");
    }
    out.push('\n');
    for y in 0..grid.size() {
        let _ = write!(out, "{y:>3}");
        for (x, &symbol) in (0..).zip(grid.row(y)) {
            let glyph = glyphs.glyph(symbol);
            if selection == Some(Position::new(x, y)) {
                let _ = write!(out, "[{glyph}]");
            } else {
                let _ = write!(out, "  {glyph}");
            }
        }
        out.push('\n');
    }
    out
}
