use std::io::{self, BufRead, Stdin, Stdout, Write};

use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use common::{Maze, maze::render};

use crate::ui::MazeUi;

pub struct TerminalUi {
    stdin: Stdin,
    stdout: Stdout,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }

    fn print_colored(&mut self, color: Color, text: &str) {
        let _ = execute!(
            self.stdout,
            SetForegroundColor(color),
            Print(text),
            ResetColor,
            Print("\n")
        );
    }

    fn paint(&mut self, maze: &Maze) -> io::Result<()> {
        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))?;

        for row in maze.grid().grid_rows() {
            for cell in row {
                let glyph = render::glyph(cell);
                if cell.is_on_escape_path() {
                    queue!(
                        self.stdout,
                        SetForegroundColor(Color::Yellow),
                        Print(glyph),
                        ResetColor
                    )?;
                } else {
                    queue!(self.stdout, Print(glyph))?;
                }
            }
            queue!(self.stdout, Print("\n"))?;
        }

        self.stdout.flush()
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeUi for TerminalUi {
    fn show_message(&mut self, message: &str) {
        println!("{}", message);
    }

    fn show_error(&mut self, message: &str) {
        self.print_colored(Color::Red, message);
    }

    fn show_prompt(&mut self, prompt: &str) {
        print!("{}", prompt);
        let _ = self.stdout.flush();
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = self.stdin.lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn draw_maze(&mut self, maze: &Maze) {
        if let Err(e) = self.paint(maze) {
            eprintln!("Failed to draw maze: {}.", e);
        }
    }
}
