use anyhow::Result;
use permit_node_app::commands;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  permit-node run <config.yaml> [items.json|-]
  permit-node test-credentials <config.yaml>
  permit-node describe";

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = dispatch(&args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(args: &[String]) -> Result<()> {
    match args.get(1).map(String::as_str) {
        Some("run") => {
            let config = required(args, 2, "config path")?;
            commands::run::run(config, args.get(3).map(String::as_str)).await
        }
        Some("test-credentials") => {
            let config = required(args, 2, "config path")?;
            commands::test_credentials::run(config).await
        }
        Some("describe") => commands::describe::run(),
        Some("help") | Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some(other) => anyhow::bail!("Unknown command: {}\n\n{}", other, USAGE),
        None => anyhow::bail!("Missing command\n\n{}", USAGE),
    }
}

fn required<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing {}\n\n{}", what, USAGE))
}
