mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Args, Commands};
use ocrcheck_rs::{recognize_only, render, render_elements_json, run};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(quiet: bool) {
  let default_level = if quiet { "warn" } else { "info" };
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with(
      tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr),
    )
    .init();
}

async fn execute(command: Commands) -> Result<()> {
  match &command {
    Commands::Version => {
      println!("ocrcheck {}", env!("CARGO_PKG_VERSION"));
    }
    Commands::Compare { format, engine, .. } => {
      let config = command
        .run_config()
        .ok_or_else(|| anyhow!("compare command without run configuration"))?;
      let engine = engine.build_engine(config.languages.clone());

      let report = run(&config, &engine).await?;
      let rendered = render(&report, *format, &config.reference_path, &config.image_path)?;
      println!("{}", rendered.trim_end());
    }
    Commands::Recognize { image, engine } => {
      let elements = recognize_only(image, &engine.build_engine(engine.languages())).await?;
      println!("{}", render_elements_json(&elements)?);
    }
  }
  Ok(())
}

#[tokio::main]
async fn main() {
  let args = Args::parse();
  init_logging(args.quiet);

  if let Err(e) = execute(args.command).await {
    eprintln!("Error: {}", e);
    std::process::exit(1);
  }
}
