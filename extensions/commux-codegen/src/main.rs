use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "commux-codegen")]
#[command(about = "Generate typed Commux clients from schema documents")]
#[command(version)]
struct Args {
    /// Schema documents (JSON) to generate clients from
    #[arg(required = true, value_name = "SCHEMA")]
    schemas: Vec<PathBuf>,

    /// Directory the generated `<service>.rs` files are written to
    #[arg(long, short = 'o', value_name = "DIR")]
    out_dir: PathBuf,

    /// Path generated code uses to reach the runtime crate
    #[arg(long, default_value = "::commux", value_name = "PATH")]
    runtime_path: String,

    /// Fail instead of writing when generated files are out of date
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let builder = commux_codegen::configure()
        .out_dir(&args.out_dir)
        .runtime_path(args.runtime_path)
        .emit_rerun_if_changed(false);

    let result = if args.check {
        builder.check(&args.schemas)
    } else {
        builder.compile(&args.schemas).map(|written| {
            tracing::info!("{} client file(s) up to date", written.len());
        })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
