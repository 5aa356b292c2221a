#![no_std]

extern crate alloc;

pub use clock::*;
pub use diamond::*;
pub use driver::*;
pub use engine::*;
pub use error::*;
pub use field::*;
pub use frontend::*;
pub use level::*;
pub use tile::*;
pub use types::*;

mod bomb;
mod clock;
mod diamond;
mod driver;
mod engine;
mod error;
mod field;
mod frontend;
mod level;
mod tile;
mod types;
pub mod visibility;
