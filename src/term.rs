use crate::grid::{Cell, Grid};
use crate::render::RenderSink;
use crate::TermInt;
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

// Terminal characters are about twice as tall as they are wide.
const CELL_WIDTH: TermInt = 2;
const CELL_FILL: &str = "  ";

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    board: Board,
    current_msg: Option<Message>,
}

/// Where the grid sits on screen: `top_left` is the border's corner.
#[derive(Clone, Copy)]
struct Board {
    grid: Grid,
    top_left: (TermInt, TermInt),
}

struct Message {
    top_left: (TermInt, TermInt),
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    /// Fails when the terminal cannot hold the grid, its border and the status line.
    pub fn new(grid: Grid) -> Result<Self> {
        let (width, height) = terminal::size().context("Failed to read terminal size")?;
        let board = Board::centered(grid, width, height)?;
        Ok(TermManager { width, height, stdout: stdout(), board, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Failed to hide cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Waits at most `timeout` for the next key press.
    pub fn poll_key(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn draw_borders(&mut self) -> io::Result<()> {
        let (left, top) = self.board.top_left;
        let inner_width = self.board.grid.columns * CELL_WIDTH;
        let end_x = left + inner_width + 1;
        let end_y = top + self.board.grid.rows + 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    /// Blanks every cell inside the border.
    pub fn clear_board(&mut self) -> io::Result<()> {
        let (left, top) = self.board.top_left;
        let row = " ".repeat((self.board.grid.columns * CELL_WIDTH) as usize);

        for y in 0..self.board.grid.rows {
            queue!(self.stdout, cursor::MoveTo(left + 1, top + 1 + y), style::Print(&row))?;
        }

        Ok(())
    }

    /// The score line right under the board.
    pub fn draw_status(&mut self, score: u32, high_score: u32) -> io::Result<()> {
        let (left, top) = self.board.top_left;
        let y = top + self.board.grid.rows + 2;
        let line = format!("Score: {}   High score: {}", score, high_score);
        let line_width = (self.board.grid.columns * CELL_WIDTH + 2) as usize;

        queue!(
            self.stdout,
            cursor::MoveTo(left, y),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(format!("{line: ^width$}", line = line, width = line_width))
        )
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let msg_width = msg_width.min(self.width);
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(&blank))?;
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    /// Blanks the message box. The caller redraws whatever it covered.
    pub fn hide_message(&mut self) -> io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        let blank = " ".repeat(msg.width as usize);
        for y_diff in 0..msg.height {
            queue!(self.stdout, cursor::MoveTo(msg.top_left.0, msg.top_left.1 + y_diff), style::Print(&blank))?;
        }

        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }
}

impl RenderSink for TermManager {
    fn fill_cell(&mut self, cell: Cell, color: Color) -> io::Result<()> {
        // A head that just crashed through the wall has nowhere to be drawn.
        let pos = match self.board.screen_pos(cell) {
            Some(pos) => pos,
            None => return Ok(()),
        };

        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetBackgroundColor(color),
            style::Print(CELL_FILL),
            style::ResetColor
        )
    }
}

impl Board {
    fn centered(grid: Grid, term_width: TermInt, term_height: TermInt) -> Result<Self> {
        // Border on both sides, plus the status line below.
        let needed_width = grid.columns as u32 * CELL_WIDTH as u32 + 2;
        let needed_height = grid.rows as u32 + 3;

        if needed_width > term_width as u32 || needed_height > term_height as u32 {
            bail!(
                "A {}x{} grid needs a {}x{} terminal, this one is {}x{}",
                grid.columns, grid.rows, needed_width, needed_height, term_width, term_height
            );
        }

        let top_left = (
            (term_width - needed_width as TermInt) / 2,
            (term_height - needed_height as TermInt) / 2,
        );
        Ok(Board { grid, top_left })
    }

    fn screen_pos(&self, cell: Cell) -> Option<(TermInt, TermInt)> {
        if !self.grid.contains(cell) {
            return None;
        }

        let x = self.top_left.0 + 1 + cell.x as TermInt * CELL_WIDTH;
        let y = self.top_left.1 + 1 + cell.y as TermInt;
        Some((x, y))
    }
}
