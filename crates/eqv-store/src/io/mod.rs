//! Store file I/O.

mod load;
mod lock;
mod save;

pub use load::load_store;
pub use lock::{StoreLock, temp_path};
pub use save::save_store;
