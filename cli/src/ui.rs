use std::io;

use common::Maze;

pub trait MazeUi {
    fn show_message(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
    fn show_prompt(&mut self, prompt: &str);
    /// `Ok(None)` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    fn draw_maze(&mut self, maze: &Maze);

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.show_prompt(prompt);
        self.read_line()
    }
}
