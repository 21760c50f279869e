pub mod config;
pub mod legend;

// Re-export commonly used items
pub use config::Config;
pub use legend::{symbols_in_model, Legend, SymbolGrid};
pub use voxhelper_common::{color, Result, VoxError};
pub use voxhelper_logger::{init as logger_init, log, LogSeverity};
pub use voxhelper_palette::PaletteTable;
pub use voxhelper_vox::{load, load_async, read_vox, save, save_async, write_vox, VoxModel};
