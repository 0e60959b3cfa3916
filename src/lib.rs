// Library root
// ------------
// Module responsibilities:
// - `model`: the Person/Student records, title-casing and the alphabetic rule.
// - `storage`: reads and writes the roster as a JSON file.
// - `ui`: the console (menu, prompts, roster listing, error reporting) and
//   the menu loop that ties everything together.
// - `config`: where the data file lives.
// - `error`: validation and storage error types.
//
// The binary (`main.rs`) only builds a config and a stdio console and hands
// them to `ui::main_menu`.
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod ui;

pub use error::{Field, StorageError, ValidationError};
pub use model::{Person, Student};
