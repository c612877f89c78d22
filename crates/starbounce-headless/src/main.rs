use tracing_subscriber::EnvFilter;

use starbounce_headless::config::HeadlessConfig;
use starbounce_headless::driver;
use starbounce_sandbox::Sandbox;
use starbounce_sandbox::config::SandboxConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starbounce headless driver starting");

    let sandbox_config = SandboxConfig::load();
    let config = HeadlessConfig::load();
    if let Err(e) = config.validate() {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    let mut sandbox = Sandbox::from_config(&sandbox_config);
    let summary = driver::run(&mut sandbox, &config);

    tracing::info!(
        frames = summary.frames,
        platform_bounces = summary.platform_bounces,
        wall_bounces = summary.wall_bounces,
        resets = summary.resets,
        fps = ?summary.fps,
        "Run complete"
    );

    if config.summary_json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!("Failed to encode run summary: {e}");
                std::process::exit(1);
            },
        }
    }
}
