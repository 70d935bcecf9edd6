use std::io;

use clap::Parser;
use dimunits::{app, config};
use tracing_subscriber::EnvFilter;

/// 프로그램의 엔트리 포인트. 사용자 단위 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    init_logging();
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = app::Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;
    app::run(&cli, &cfg)?;
    Ok(())
}

/// `RUST_LOG`로 수준을 바꿀 수 있다. 기본은 경고만 출력한다.
fn init_logging() {
    let format = tracing_subscriber::fmt::format()
        .without_time()
        .with_target(false)
        .compact();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .event_format(format)
        .init();
}
