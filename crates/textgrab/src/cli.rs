use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "textgrab",
    about = "Extract text from an image file",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Image file to recognize
    #[arg(value_name = "IMAGE", required_unless_present = "list_backends")]
    pub input: Option<PathBuf>,

    /// Write the extracted text to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Lock recognition to a specific engine backend
    #[arg(short = 'b', long = "backend")]
    pub backend: Option<String>,

    /// Recognition language code passed to the engine (e.g. eng, eng+deu)
    #[arg(long = "lang")]
    pub lang: Option<String>,

    /// Override the configuration file path
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Synthetic progress update interval in milliseconds
    #[arg(long = "tick-interval-ms", value_name = "MS")]
    pub tick_interval_ms: Option<u64>,

    /// Directory containing tesseract language data
    #[arg(long = "tessdata", value_name = "DIR")]
    pub tessdata: Option<PathBuf>,

    /// Print the list of available OCR backends
    #[arg(long = "list-backends")]
    pub list_backends: bool,
}
