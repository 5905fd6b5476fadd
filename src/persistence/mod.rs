//! Save files: a versioned JSON record per game and the directory store
//! that writes, lists, loads and deletes them.

mod manager;
mod save_data;

pub use crate::game::GameSnapshot;
pub use manager::SaveManager;
pub use save_data::{
    MoveEntry, SaveGameData, CURRENT_FORMAT_VERSION, MIN_COMPATIBLE_FORMAT_VERSION,
};
