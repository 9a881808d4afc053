extern crate provider_mock_admission;

use anyhow::Result;

mod admission_review;
mod cli;
mod config;
mod testdrive;
mod tracing;

use config::Config;

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_args(&matches)?;

    crate::tracing::setup_tracing(&config.log_level, &config.log_fmt, config.log_no_color)?;
    ::tracing::debug!(webhook = config.webhook.path(), "starting review");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    testdrive::run(&config, &mut out)
}
