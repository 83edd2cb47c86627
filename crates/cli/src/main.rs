use anyhow::anyhow;
use clap::Parser;

/// Compile a T program and print its hex-encoded container to stdout.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// The program text to compile.
  source: String,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Cli::parse();
  let hex = tarto::compile(&args.source)
    .map_err(|e| anyhow!(e.report(args.source.as_str())))?;

  // no trailing newline: the container is the whole output
  print!("{hex}");
  Ok(())
}
