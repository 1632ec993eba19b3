use clap::Parser;
use pose_marker::{
    Result,
    cli::Args,
    node::{NodeOptions, run_marker_publisher},
};
use pose_marker_rt::Builder;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,zenoh=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let ctx = args.context_builder().build()?;
    let options = NodeOptions::from(&args);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };
    run_marker_publisher(ctx.clone(), options, shutdown).await?;

    ctx.shutdown()
}
