//! Terminal rendering of a [`Grid`] with crossterm.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
    execute, queue,
};

use pathgrid_core::{Cell, Grid, Role};

/// Character and colour used to draw `cell`.
pub fn glyph(cell: &Cell) -> (char, Color) {
    match cell.role {
        Role::Start => return ('S', Color::Green),
        Role::End => return ('E', Color::Red),
        Role::None => {}
    }
    if cell.wall {
        ('#', Color::DarkGrey)
    } else if cell.on_path {
        ('*', Color::Yellow)
    } else if cell.visited {
        ('o', Color::Blue)
    } else if cell.is_weighted() {
        (weight_char(cell.weight), Color::Magenta)
    } else {
        ('.', Color::Reset)
    }
}

fn weight_char(w: i32) -> char {
    match w {
        2..=9 => char::from_digit(w as u32, 10).unwrap_or('+'),
        _ => '+',
    }
}

/// The grid as plain text, one line per row.
pub fn plain(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.cols() as usize * 2 + 1) * grid.rows() as usize);
    for (p, cell) in grid.iter() {
        out.push(glyph(cell).0);
        if p.x + 1 == grid.cols() {
            out.push('\n');
        } else {
            out.push(' ');
        }
    }
    out
}

/// Redraw the whole grid at the top-left corner, followed by `status`.
pub fn draw<W: Write>(out: &mut W, grid: &Grid, status: &str) -> io::Result<()> {
    for (p, cell) in grid.iter() {
        let (ch, color) = glyph(cell);
        queue!(
            out,
            cursor::MoveTo(p.x as u16 * 2, p.y as u16),
            SetForegroundColor(color),
            Print(ch),
        )?;
    }
    queue!(
        out,
        ResetColor,
        cursor::MoveTo(0, grid.rows() as u16 + 1),
        terminal::Clear(ClearType::CurrentLine),
        Print(status),
    )?;
    out.flush()
}

/// Alternate-screen session restored on drop.
pub struct Screen {
    out: io::Stdout,
}

impl Screen {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }

    pub fn draw(&mut self, grid: &Grid, status: &str) -> io::Result<()> {
        draw(&mut self.out, grid, status)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
    }
}
