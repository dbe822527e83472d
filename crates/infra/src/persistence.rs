// crates/infra/src/persistence.rs
pub mod file_reader;
pub mod layer_reader;
pub mod settings_reader;

pub use file_reader::FileReader;
pub use layer_reader::{load_layer, parse_layer};
pub use settings_reader::load_settings;
