//! Save file format.
//!
//! ```text
//! offset  size  field
//!      0     6  signature "LABv20"
//!      6     3  width, height, floors
//!      9     3  agent x, y, z
//!     12     2  agent move count, little endian
//!     14     4  elapsed seconds, little endian
//!     18   w*h*f  one byte per cell, floor by floor, row by row, x innermost
//! ```
//!
//! Cell byte bits 0-5 are the Top, Bottom, Left, Right, Back and Front walls (set = wall
//! present), bit 6 marks the entrance and bit 7 the goal.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::coordinates::Vector3;
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;
use crate::units::{Floors, Height, Width};

pub const SIGNATURE: &[u8; 6] = b"LABv20";
pub const HEADER_SIZE: usize = 18;

/// A decoded save: the maze, the player and the play time in seconds.
#[derive(Debug, Clone)]
pub struct SavedGame {
    pub grid: Grid,
    pub agent: Agent,
    pub elapsed_seconds: u32,
}

/// Serialise a session into save file bytes.
pub fn encode(grid: &Grid, agent: &Agent, elapsed_seconds: u32) -> Result<Vec<u8>> {

    if agent.moves() > u16::max_value() as u32 {
        bail!(ErrorKind::MoveCountOverflow(agent.moves()));
    }
    let position = agent.position();
    if !grid.is_valid_coordinate(position) {
        bail!(invalid_save_file(format!("agent position {} is outside the maze", position)));
    }

    let dimensions = grid.dimensions();
    let mut bytes = Vec::with_capacity(HEADER_SIZE + grid.size());
    bytes.extend_from_slice(SIGNATURE);
    bytes.extend_from_slice(&[dimensions.width().0, dimensions.height().0, dimensions.floors().0]);
    bytes.extend_from_slice(&[position.x as u8, position.y as u8, position.z as u8]);
    bytes.extend_from_slice(&(agent.moves() as u16).to_le_bytes());
    bytes.extend_from_slice(&elapsed_seconds.to_le_bytes());
    bytes.extend(grid.iter_cells().map(|cell| cell.to_byte()));

    Ok(bytes)
}

/// Rebuild a session from save file bytes.
///
/// Every check happens before anything is built: the header must be complete, the signature
/// must match, the length must match the dimensions and the agent must stand inside the maze.
/// The grid comes back carved but unsolved.
pub fn decode(bytes: &[u8]) -> Result<SavedGame> {

    if bytes.len() < HEADER_SIZE {
        bail!(invalid_save_file(format!("{} bytes is shorter than the {} byte header",
                                        bytes.len(), HEADER_SIZE)));
    }
    if &bytes[0..6] != SIGNATURE {
        bail!(invalid_save_file("signature mismatch"));
    }

    let (width, height, floors) = (bytes[6], bytes[7], bytes[8]);
    let cells_count = width as usize * height as usize * floors as usize;
    if bytes.len() != HEADER_SIZE + cells_count {
        bail!(invalid_save_file(format!("{} bytes does not match a {}x{}x{} maze",
                                        bytes.len(), width, height, floors)));
    }

    let position = Vector3::new(bytes[9] as i32, bytes[10] as i32, bytes[11] as i32);
    if bytes[9] >= width || bytes[10] >= height || bytes[11] >= floors {
        bail!(invalid_save_file(format!("agent position {} is outside the maze", position)));
    }

    // Cannot fail once the agent is known to be inside, but keep the error in the save domain.
    let dimensions = GridDimensions::new(Width(width), Height(height), Floors(floors))
        .map_err(|e| invalid_save_file(e.to_string()))?;

    let moves = u16::from_le_bytes([bytes[12], bytes[13]]);
    let elapsed_seconds = u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]);

    Ok(SavedGame {
        grid: Grid::from_cell_bytes(dimensions, &bytes[HEADER_SIZE..]),
        agent: Agent::with_moves(position, moves as u32),
        elapsed_seconds: elapsed_seconds,
    })
}

/// Write a whole session to `path`, replacing any existing file.
pub fn save<P: AsRef<Path>>(path: P, grid: &Grid, agent: &Agent, elapsed_seconds: u32) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(grid, agent, elapsed_seconds)?;

    let mut file = File::create(path)
        .chain_err(|| format!("Failed to create save file {}", path.display()))?;
    file.write_all(&bytes)
        .chain_err(|| format!("Failed to write save file {}", path.display()))?;

    info!(path = %path.display(), bytes = bytes.len(), "saved game");
    Ok(())
}

/// Read a whole session back from `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SavedGame> {
    let path = path.as_ref();

    let mut bytes = vec![];
    {
        let mut file = File::open(path)
            .chain_err(|| format!("Failed to open save file {}", path.display()))?;
        file.read_to_end(&mut bytes)
            .chain_err(|| format!("Failed to read save file {}", path.display()))?;
    }
    debug!(path = %path.display(), bytes = bytes.len(), "read save file");

    match decode(&bytes) {
        Ok(saved) => {
            info!(path = %path.display(), dimensions = ?saved.grid.dimensions(), "loaded game");
            Ok(saved)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "rejected save file");
            Err(e)
        }
    }
}
