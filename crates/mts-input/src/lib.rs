//! `mts-input` — reads the train list that seeds a simulation run.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`loader`] | `load_trains_file`, `load_trains_reader`, `parse_line` |
//! | [`error`]  | `InputError`, `InputResult<T>`                         |

pub mod error;
pub mod loader;


pub use error::{InputError, InputResult};
pub use loader::{load_trains_file, load_trains_reader, parse_line};
