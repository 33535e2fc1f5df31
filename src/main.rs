use docopt::Docopt;
use error_chain::bail;
use serde_derive::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use mazes3d::{
    coordinates::Vector3,
    game::Game,
    grid::MazeOptionsBuilder,
    grid_dimensions::GridDimensions,
    grid_displays::{AgentDisplay, SolutionDisplay},
    units::{Floors, Height, Width},
};

const USAGE: &str = "Mazes3d

Usage:
    mazes3d_driver -h | --help
    mazes3d_driver new [--width=<w> --height=<h> --floors=<f> --seed=<s> --bias=<b> --save=<path> --show-solution]
    mazes3d_driver show <path>
    mazes3d_driver solve <path>

Options:
    -h --help           Show this screen.
    --width=<w>         Cells along x, 1-255 [default: 5].
    --height=<h>        Cells along y, 1-255 [default: 5].
    --floors=<f>        Cells along z, 1-255 [default: 5].
    --seed=<s>          Seed for the random generator. Random if not given.
    --bias=<b>          Roughly one in b carving steps may change floor [default: 5].
    --save=<path>       Write the new game to a save file.
    --show-solution     Mark the route from the entrance to the goal.

Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_new: bool,
    cmd_show: bool,
    cmd_solve: bool,
    arg_path: String,
    flag_width: u8,
    flag_height: u8,
    flag_floors: u8,
    flag_seed: Option<u64>,
    flag_bias: u32,
    flag_save: String,
    flag_show_solution: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes3d::errors::Error, ::mazes3d::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());
    debug!(?args, "parsed arguments");

    if args.cmd_new {
        new_game(&args)
    } else if args.cmd_show {
        show_game(&args.arg_path)
    } else if args.cmd_solve {
        solve_game(&args.arg_path)
    } else {
        Ok(())
    }
}

fn new_game(args: &MazeArgs) -> Result<()> {

    let dimensions = GridDimensions::new(Width(args.flag_width),
                                         Height(args.flag_height),
                                         Floors(args.flag_floors))?;
    let options = MazeOptionsBuilder::new()
        .bias(args.flag_bias)
        .seed(args.flag_seed)
        .build();

    let mut game = Game::new();
    game.new_game(dimensions, &options);

    if !args.flag_save.is_empty() {
        game.save_game(&args.flag_save)
            .chain_err(|| format!("Failed to save the new game to {}", args.flag_save))?;
        println!("Saved to {}", args.flag_save);
    }

    if args.flag_show_solution {
        print_solution(&mut game)
    } else {
        print_session(&game)
    }
}

fn show_game(path: &str) -> Result<()> {
    let mut game = Game::new();
    game.load_game(path)
        .chain_err(|| format!("Failed to load game {}", path))?;
    print_session(&game)
}

fn solve_game(path: &str) -> Result<()> {
    let mut game = Game::new();
    game.load_game(path)
        .chain_err(|| format!("Failed to load game {}", path))?;
    print_solution(&mut game)
}

fn print_session(game: &Game) -> Result<()> {
    let grid = game.grid().ok_or("No maze to show")?;
    let agent = game.agent().ok_or("No player to show")?;

    println!("{}", grid.view(&AgentDisplay::new(agent)));
    println!("Maze {}x{}x{}, player at {} on floor {} after {} moves, {}s played",
             grid.dimensions().width().0,
             grid.dimensions().height().0,
             grid.dimensions().floors().0,
             agent.position(),
             agent.floor() + 1,
             agent.moves(),
             game.elapsed_time());
    Ok(())
}

fn print_solution(game: &mut Game) -> Result<()> {
    if !game.solve() {
        bail!("The goal cannot be reached from the player's position");
    }

    let grid = game.grid().ok_or("No maze to solve")?;
    let start = game.agent().map_or_else(Vector3::origin, |agent| agent.position());
    let steps = grid.solution_path(start)
        .map_or(0, |path| path.len() - 1);

    println!("{}", grid.view(&SolutionDisplay));
    println!("Route from {} to {} takes {} steps", start, grid.goal(), steps);
    Ok(())
}
