use std::process::ExitCode;

use tracing::metadata::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    match clone().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.kind().exit_code())
        }
    }
}

#[cfg(target_os = "linux")]
async fn clone() -> blecloner::Result<()> {
    use blecloner::{app, BluerRadio, Config};
    use tracing::info;

    let radio = BluerRadio::new().await?;
    info!("using adapter {}", radio.name());

    let stdin = std::io::stdin();
    app::run(&radio, &Config::default(), &mut stdin.lock(), &mut std::io::stdout()).await?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
async fn clone() -> blecloner::Result<()> {
    Err(blecloner::error::ErrorKind::NotSupported.into())
}
