use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use textgrab::cli::CliArgs;
use textgrab::progress::ProgressSink;
use textgrab::{Configuration, RecognitionService, settings};
use textgrab_ocr::ImagePayload;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    if args.list_backends {
        for backend in Configuration::available_backends() {
            println!("{backend}");
        }
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("textgrab: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = settings::resolve(&args)?;
    let input = args
        .input
        .as_deref()
        .context("no input image was provided")?;

    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("failed to read '{}'", input.display()))?;
    let payload = ImagePayload::from_bytes(bytes)
        .with_context(|| format!("'{}' is not a usable image", input.display()))?
        .with_source(input);

    let service = RecognitionService::new(config);

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{prefix:.green} [{bar:40}] {pos:>3}%")
            .unwrap()
            .progress_chars("=> "),
    );
    bar.set_prefix("recognizing");
    let bar_sink = bar.clone();
    let on_progress: ProgressSink = Arc::new(move |percent| {
        bar_sink.set_position(u64::from(percent));
    });

    let extracted = service.extract_text(payload, on_progress).await;
    service.terminate().await;

    let text = match extracted {
        Ok(text) => {
            bar.finish();
            text
        }
        Err(err) => {
            bar.abandon();
            return Err(err.into());
        }
    };

    match &args.output {
        Some(path) => {
            let mut contents = text;
            contents.push('\n');
            tokio::fs::write(path, contents)
                .await
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        None => println!("{text}"),
    }
    Ok(())
}
