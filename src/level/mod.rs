pub mod grid;
pub mod spawn;
pub mod translate;
pub mod writer;

pub use grid::{Grid, GridError, GridResult};
pub use spawn::{SpawnPoint, find_spawn, OPEN_SPACE, SPAWN_MARKER};
pub use translate::translate;
pub use writer::{write_map_file, WriteError, WriteResult};
