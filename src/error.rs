use std::path::PathBuf;

/// Errors surfaced synchronously from the maze core.
///
/// Misuse (wrong flags, `set_cores` out of range) never reaches this type:
/// `set_cores` clamps silently and the rest is rejected before any state
/// mutation, per the taxonomy described for this crate.
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    #[error("dims must be non-empty with every entry >= 1, got {0:?}")]
    InvalidDims(Vec<u32>),

    #[error("solve() requires MazeFlags::output_solution to be set at create()")]
    SolvingNotEnabled,

    #[error("solve() was called again without MazeFlags::multiple_solves")]
    RepeatSolveNotEnabled,

    #[error("start ({start}) or end ({end}) out of range [0, {total_cells})")]
    EndpointOutOfRange {
        start: usize,
        end: usize,
        total_cells: usize,
    },

    #[error("file '{}' is not a valid maze file: {reason}", path.display())]
    InvalidFile { path: PathBuf, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MazeError>;
