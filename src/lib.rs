//! fdconv - Farlands to BPHMod item converter
//!
//! A library for transforming Farlands item definition files into the
//! BPHMod item schema: field remapping, nested effect and modifier
//! conversion, footprint rasterization and sprite resolution.

pub mod cli;
pub mod convert;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod sprites;

pub use convert::prune::prune;
pub use convert::shape::{rasterize, Point, Rect};
pub use convert::{convert_item, Conversion};
pub use discovery::find_item_files;
pub use error::{FdError, Result};
pub use parser::{parse_item, read_item};
pub use sprites::{item_id, resolve_sprites, ResolvedSprites};
