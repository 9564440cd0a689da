use rand::{SeedableRng, rngs::StdRng};

use common::{Maze, MazeError};

/// The maze the user is currently working on, plus the generator that drives
/// both building and solving.
pub struct Session {
    current: Option<Maze>,
    rng: StdRng,
}

impl Session {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self { current: None, rng }
    }

    pub fn current(&self) -> Option<&Maze> {
        self.current.as_ref()
    }

    fn current_mut(&mut self) -> Result<&mut Maze, MazeError> {
        self.current.as_mut().ok_or(MazeError::NotBuilt)
    }

    /// Replaces the current maze only when `size` is valid.
    pub fn create(&mut self, size: usize) -> Result<&Maze, MazeError> {
        let maze = Maze::create_with_rng(size, &mut self.rng)?;
        Ok(&*self.current.insert(maze))
    }

    pub fn escape(&mut self) -> Result<&Maze, MazeError> {
        let maze = self.current.as_mut().ok_or(MazeError::NotBuilt)?;
        maze.escape_with_rng(&mut self.rng)?;
        Ok(&*maze)
    }

    pub fn unmark(&mut self) -> Result<&Maze, MazeError> {
        let maze = self.current_mut()?;
        maze.unmark_escape();
        Ok(&*maze)
    }

    pub fn replace(&mut self, maze: Maze) -> &Maze {
        self.current.insert(maze)
    }

    /// An unmarked copy of the current maze, for saving.
    pub fn snapshot(&self) -> Result<Maze, MazeError> {
        self.current
            .as_ref()
            .map(Maze::snapshot)
            .ok_or(MazeError::NotBuilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_need_a_maze_first() {
        let mut session = Session::new(Some(1));

        assert!(session.current().is_none());
        assert_eq!(session.escape().err(), Some(MazeError::NotBuilt));
        assert_eq!(session.unmark().err(), Some(MazeError::NotBuilt));
        assert_eq!(session.snapshot().err(), Some(MazeError::NotBuilt));
    }

    #[test]
    fn invalid_size_keeps_the_previous_maze() {
        let mut session = Session::new(Some(2));
        let first = session.create(9).expect("valid size").clone();

        assert_eq!(
            session.create(10).err(),
            Some(MazeError::InvalidSize { size: 10 })
        );
        assert_eq!(session.current(), Some(&first));
    }

    #[test]
    fn escape_marks_and_unmark_clears() {
        let mut session = Session::new(Some(3));
        session.create(11).expect("valid size");

        assert!(session.escape().expect("solvable").is_marked());
        assert!(!session.snapshot().expect("built").is_marked());
        assert!(session.current().is_some_and(Maze::is_marked));
        assert!(!session.unmark().expect("built").is_marked());
    }

    #[test]
    fn same_seed_gives_the_same_maze() {
        let mut a = Session::new(Some(42));
        let mut b = Session::new(Some(42));

        assert_eq!(
            a.create(21).expect("valid size").render(),
            b.create(21).expect("valid size").render()
        );
    }
}
