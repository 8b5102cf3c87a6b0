//! Grid geometry and cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Number of columns for a board of `cards` cards.
///
/// Picks the narrowest near-square layout whose rows are all full, falling
/// back to a square-ish layout with a short last row.
pub fn grid_columns(cards: usize) -> usize {
    if cards == 0 {
        return 1;
    }
    let side = (cards as f64).sqrt().ceil() as usize;
    (side..=side * 2)
        .find(|c| cards % c == 0)
        .unwrap_or(side)
        .min(cards)
}

/// Moves cursor based on arrow keys, stopping at the grid edges.
pub fn move_cursor(cursor: usize, key: KeyCode, columns: usize, cards: usize) -> usize {
    if cards == 0 || columns == 0 {
        return 0;
    }
    let col = cursor % columns;
    let target = match key {
        KeyCode::Left | KeyCode::Char('h') if col > 0 => cursor - 1,
        KeyCode::Right | KeyCode::Char('l') if col + 1 < columns => cursor + 1,
        KeyCode::Up | KeyCode::Char('k') if cursor >= columns => cursor - columns,
        KeyCode::Down | KeyCode::Char('j') => cursor + columns,
        _ => cursor,
    };
    if target < cards { target } else { cursor }
}
