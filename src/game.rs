use std::path::Path;

use tracing::info;

use crate::agent::Agent;
use crate::cells::Direction;
use crate::coordinates::Vector3;
use crate::errors::*;
use crate::grid::{Grid, MazeOptions};
use crate::grid_dimensions::GridDimensions;
use crate::persistence;


/// One play session: a carved maze, the player in it, the time spent and whether the goal has
/// been reached. Rendering and timing live with the caller, which reports elapsed time back
/// before saving.
#[derive(Debug, Default)]
pub struct Game {
    session: Option<(Grid, Agent)>,
    elapsed_seconds: u32,
    won: bool,
}

impl Game {
    pub fn new() -> Game {
        Game::default()
    }

    /// Start over on a freshly carved maze with the player at the entrance in the origin corner.
    pub fn new_game(&mut self, dimensions: GridDimensions, options: &MazeOptions) {
        let mut grid = Grid::with_options(dimensions, options);
        let entrance = Vector3::origin();
        grid.carve(entrance);

        self.session = Some((grid, Agent::new(entrance)));
        self.elapsed_seconds = 0;
        self.won = false;
        info!(?dimensions, "new game");
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.session.as_ref().map(|&(ref grid, _)| grid)
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.session.as_ref().map(|&(_, ref agent)| agent)
    }

    /// Replace the player. Ignored if there is no maze or the agent would be outside it.
    pub fn set_agent(&mut self, agent: Agent) -> bool {
        match self.session {
            Some((ref grid, ref mut current)) if grid.is_valid_coordinate(agent.position()) => {
                *current = agent;
                true
            }
            _ => false,
        }
    }

    pub fn set_elapsed_time(&mut self, seconds: u32) {
        self.elapsed_seconds = seconds;
    }

    pub fn elapsed_time(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn move_agent(&mut self, direction: Direction) -> bool {
        match self.session {
            Some((ref grid, ref mut agent)) => agent.step(grid, direction),
            None => false,
        }
    }

    /// Mark the game won if the player stands on the goal.
    /// Returns true only on the call that changes the game to won.
    pub fn check_victory(&mut self) -> bool {
        let at_goal = self.session
            .as_ref()
            .map_or(false, |&(ref grid, ref agent)| agent.is_at(grid.goal()));

        if at_goal && !self.won {
            self.won = true;
            info!(moves = ?self.agent().map(|a| a.moves()), seconds = self.elapsed_seconds, "game won");
            true
        } else {
            false
        }
    }

    /// Has `check_victory` seen the player on the goal
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Solve from where the player stands.
    pub fn solve(&mut self) -> bool {
        match self.session {
            Some((ref mut grid, ref agent)) => {
                let goal = grid.goal();
                grid.solve(agent.position(), goal)
            }
            None => false,
        }
    }

    /// Move the player one step along the solution, solving first if the player is off the trail.
    pub fn auto_step(&mut self) -> bool {
        let on_trail = self.session
            .as_ref()
            .and_then(|&(ref grid, ref agent)| grid.cell(agent.position()))
            .map_or(false, |cell| cell.solution().is_some());

        if !on_trail && !self.solve() {
            return false;
        }

        match self.session {
            Some((ref grid, ref mut agent)) => agent.step_along_solution(grid),
            None => false,
        }
    }

    pub fn save_game<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match self.session {
            Some((ref grid, ref agent)) => persistence::save(path, grid, agent, self.elapsed_seconds),
            None => bail!("no game in progress to save"),
        }
    }

    /// Replace the session with the one saved at `path`. On any failure the current session is
    /// kept as it was.
    pub fn load_game<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let saved = persistence::load(path)?;
        self.session = Some((saved.grid, saved.agent));
        self.elapsed_seconds = saved.elapsed_seconds;
        self.won = false;
        Ok(())
    }
}


#[cfg(test)]
mod tests {

    use tempfile::tempdir;

    use super::*;
    use crate::grid::MazeOptionsBuilder;
    use crate::units::{Floors, Height, Width};

    fn started(w: u8, h: u8, f: u8) -> Game {
        let dimensions = GridDimensions::new(Width(w), Height(h), Floors(f)).unwrap();
        let mut game = Game::new();
        game.new_game(dimensions, &MazeOptionsBuilder::new().seed(Some(900)).build());
        game
    }

    #[test]
    fn new_game_starts_at_entrance() {
        let game = started(5, 5, 5);
        assert!(game.is_started());
        assert!(game.grid().unwrap().is_carved());
        assert_eq!(game.agent().unwrap().position(), Vector3::origin());
        assert_eq!(game.grid().unwrap().entrance(), Some(Vector3::origin()));
        assert_eq!(game.elapsed_time(), 0);
        assert!(!game.is_won());
    }

    #[test]
    fn nothing_to_do_before_start() {
        let mut game = Game::new();
        assert!(!game.move_agent(Direction::Right));
        assert!(!game.check_victory());
        assert!(!game.solve());
        assert!(!game.auto_step());
        assert!(game.save_game("unused.sav").is_err());
    }

    #[test]
    fn victory_flips_once() {
        let mut game = started(4, 4, 2);
        assert!(!game.check_victory());
        while game.auto_step() {}
        assert!(game.agent().unwrap().is_at(Vector3::new(3, 3, 1)));
        assert!(game.check_victory());
        assert!(game.is_won());
        assert!(!game.check_victory());
    }

    #[test]
    fn auto_step_resolves_after_wandering_off() {
        let mut game = started(6, 6, 1);
        game.solve();
        let goal = game.grid().unwrap().goal();
        let off_trail = Direction::ALL
            .iter()
            .cloned()
            .find(|&dir| {
                let grid = game.grid().unwrap();
                let cell = grid.cell(Vector3::origin()).unwrap();
                !cell.is_wall(dir) && cell.solution() != Some(dir)
            });
        if let Some(dir) = off_trail {
            assert!(game.move_agent(dir));
        }
        for _ in 0..(6 * 6) {
            if !game.auto_step() {
                break;
            }
        }
        assert!(game.agent().unwrap().is_at(goal));
    }

    #[test]
    fn set_agent_must_be_inside() {
        let mut game = started(3, 3, 1);
        assert!(game.set_agent(Agent::with_moves(Vector3::new(2, 2, 0), 4)));
        assert_eq!(game.agent().unwrap().moves(), 4);
        assert!(!game.set_agent(Agent::new(Vector3::new(3, 0, 0))));
        assert_eq!(game.agent().unwrap().position(), Vector3::new(2, 2, 0));
    }

    #[test]
    fn save_and_load_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.sav");

        let mut game = started(5, 4, 3);
        game.auto_step();
        game.set_elapsed_time(99);
        game.save_game(&path).unwrap();

        let mut restored = Game::new();
        restored.load_game(&path).unwrap();
        assert_eq!(restored.agent(), game.agent());
        assert_eq!(restored.elapsed_time(), 99);
        assert!(!restored.is_won());
        assert!(!restored.grid().unwrap().is_solved());
        assert_eq!(restored.grid().unwrap().dimensions(), game.grid().unwrap().dimensions());
    }

    #[test]
    fn won_flag_reset_by_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("won.sav");

        let mut game = started(2, 2, 1);
        while game.auto_step() {}
        assert!(game.check_victory());
        game.save_game(&path).unwrap();

        game.load_game(&path).unwrap();
        assert!(!game.is_won());
        assert!(game.check_victory());
    }

    #[test]
    fn failed_load_keeps_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.sav");
        ::std::fs::write(&path, b"LABv20 but then garbage").unwrap();

        let mut game = started(4, 4, 1);
        game.set_elapsed_time(12);
        let before_cells = game.grid().unwrap().iter_cells().cloned().collect::<Vec<_>>();
        let before_agent = *game.agent().unwrap();

        assert!(game.load_game(&path).is_err());
        assert!(game.load_game(dir.path().join("missing.sav")).is_err());

        assert_eq!(game.grid().unwrap().iter_cells().cloned().collect::<Vec<_>>(), before_cells);
        assert_eq!(*game.agent().unwrap(), before_agent);
        assert_eq!(game.elapsed_time(), 12);
    }
}
