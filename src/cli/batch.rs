//! Folder conversion command.
//!
//! Converts every `item*.json` in the input folder into
//! `<output>/Items/<itemID>.item.json`, optionally copying the resolved
//! sprites alongside. The first file that fails aborts the whole run, so a
//! bad document never leaves a silently incomplete mod behind.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::convert::convert_item;
use crate::discovery::find_item_files;
use crate::error::{FdError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::read_item;
use crate::sprites::item_id;

/// Convert every item file in a folder
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input folder containing `item*.json` files
    pub input: PathBuf,

    /// Output folder
    #[arg(long, short, default_value = "output")]
    pub output: PathBuf,

    /// Minify output instead of pretty-printing
    #[arg(long, short)]
    pub minify: bool,

    /// Copy resolved sprite files next to the converted items
    #[arg(long, short)]
    pub copy_sprites: bool,
}

pub fn run(args: BatchArgs, printer: &Printer) -> Result<()> {
    let files = find_item_files(&args.input)?;

    let items_dir = args.output.join("Items");
    fs::create_dir_all(&items_dir).map_err(|e| FdError::Io {
        path: items_dir.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let total = files.len();
    for (index, file) in files.iter().enumerate() {
        let name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        printer.status("Converting", &format!("{} ({}/{})", name, index + 1, total));

        let doc = read_item(file)?;
        let conversion = convert_item(&doc, file)?;
        super::convert::report_warnings(&conversion, file, printer);

        let out_path = items_dir.join(format!("{}.item.json", item_id(file)?));
        let rendered = super::convert::render(&conversion.item, args.minify, file)?;
        fs::write(&out_path, rendered.as_bytes()).map_err(|e| FdError::Io {
            path: out_path.clone(),
            message: format!("Failed to write output: {}", e),
        })?;

        if args.copy_sprites {
            copy_sprites(&conversion.sprites, &items_dir, printer)?;
        }
    }

    printer.success(
        "Finished",
        &format!("{} -> {}", plural(total, "item", "items"), display_path(&items_dir)),
    );
    Ok(())
}

fn copy_sprites(sprites: &[PathBuf], items_dir: &std::path::Path, printer: &Printer) -> Result<()> {
    for sprite in sprites {
        let name = sprite.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        printer.info("Copying", name);
        fs::copy(sprite, items_dir.join(name)).map_err(|e| FdError::Io {
            path: sprite.clone(),
            message: format!("Failed to copy sprite: {}", e),
        })?;
    }
    Ok(())
}
