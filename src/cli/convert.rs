//! Single-file conversion command.
//!
//! Converts one item file and writes the result to stdout, or to a file
//! with `-o`. Status and warnings go to stderr so stdout stays pipeable.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::Value;

use crate::convert::{convert_item, Conversion};
use crate::error::{FdError, Result};
use crate::output::{display_path, Printer};
use crate::parser::read_item;

/// Convert a single item file
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input item file (named like `item@Torch.json`)
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Minify output instead of pretty-printing
    #[arg(long, short)]
    pub minify: bool,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let doc = read_item(&args.input)?;
    let conversion = convert_item(&doc, &args.input)?;
    report_warnings(&conversion, &args.input, printer);

    let rendered = render(&conversion.item, args.minify, &args.input)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered.as_bytes()).map_err(|e| FdError::Io {
                path: path.clone(),
                message: format!("Failed to write output: {}", e),
            })?;
            printer.success(
                "Converted",
                &format!("{} -> {}", display_path(&args.input), display_path(path)),
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Serialize a converted document as strict JSON.
pub(crate) fn render(item: &Value, minify: bool, path: &Path) -> Result<String> {
    let rendered = if minify {
        serde_json::to_string(item)
    } else {
        serde_json::to_string_pretty(item)
    };
    rendered.map_err(|e| FdError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to serialize output: {}", e),
    })
}

pub(crate) fn report_warnings(conversion: &Conversion, input: &Path, printer: &Printer) {
    for warning in &conversion.warnings {
        printer.warning("Warning", &format!("{}: {}", display_path(input), warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write_fixture(dir: &Path) -> PathBuf {
        fs::write(
            dir.join("sprite@Torch.png"),
            b"png",
        )
        .unwrap();
        let input = dir.join("item@Torch.json");
        fs::write(
            &input,
            r#"{
                // basic tool
                Name: "Torch",
                ItemType: "tool",
                ItemShape: [{Offset: {x: 0, y: 0}, Size: {x: 1, y: 1}}],
            }"#,
        )
        .unwrap();
        input
    }

    #[test]
    fn test_convert_to_file() {
        let dir = tempdir().unwrap();
        let input = write_fixture(dir.path());
        let output = dir.path().join("torch.item.json");

        let args = ConvertArgs {
            input,
            output: Some(output.clone()),
            minify: false,
        };
        run(args, &Printer::new()).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["name"], json!("Torch"));
        assert_eq!(written["shape"], json!(["X"]));
    }

    #[test]
    fn test_convert_minified() {
        let dir = tempdir().unwrap();
        let input = write_fixture(dir.path());
        let output = dir.path().join("torch.min.json");

        let args = ConvertArgs {
            input,
            output: Some(output.clone()),
            minify: true,
        };
        run(args, &Printer::new()).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.starts_with(r#"{"name":"Torch""#));
    }

    #[test]
    fn test_convert_missing_input() {
        let args = ConvertArgs {
            input: PathBuf::from("does/not/exist.json"),
            output: None,
            minify: false,
        };
        assert!(run(args, &Printer::new()).is_err());
    }

    #[test]
    fn test_convert_invalid_item_fails() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("item@Broken.json");
        fs::write(&input, r#"{"ItemType": "tool"}"#).unwrap();

        let args = ConvertArgs {
            input,
            output: None,
            minify: false,
        };
        assert!(run(args, &Printer::new()).is_err());
    }
}
