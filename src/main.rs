/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use xIndicator::api::{routes, source};
use xIndicator::config::Config;
use xIndicator::pipeline::{self, IndicatorAggregator};
use xIndicator::utils::logging;

#[derive(Debug, Parser)]
#[command(name = "xindicator", version, about = "VWAP / MA / RSI indicator pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// CSV 봉을 태그 레코드로 변환 (stdin → stdout)
    Map {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// 태그 레코드를 지표 행으로 집계 (stdin → stdout)
    Reduce {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// map 과 reduce 를 한 번에 실행
    Run {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// 차트 HTTP 서버 실행
    Serve,
}

fn open_input(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(p) => {
            let file = File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p).with_context(|| format!("failed to create {}", p.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level, config.logging.file_path.as_deref())?;
    log::info!("설정 로드 완료 (period = {}, mode = {:?})", config.indicators.period, config.indicators.sample_mode);

    match cli.command {
        Command::Map { input } => {
            pipeline::run_map(open_input(input.as_ref())?, io::stdout())?;
        }
        Command::Reduce { input } => {
            let mut aggregator = IndicatorAggregator::from_config(&config.indicators);
            pipeline::run_reduce(open_input(input.as_ref())?, io::stdout(), &mut aggregator)?;
        }
        Command::Run { input, output } => {
            let mut aggregator = IndicatorAggregator::from_config(&config.indicators);
            pipeline::run_pipeline(open_input(input.as_ref())?, open_output(output.as_ref())?, &mut aggregator)?;
        }
        Command::Serve => serve(config).await?,
    }

    Ok(())
}

async fn serve(config: Config) -> Result<(), anyhow::Error> {
    let row_source = source::from_config(&config.data_source)?;
    let routes = routes::create_routes(row_source, config.indicators.chart_ma_window);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid server address {}:{}", config.server.host, config.server.port))?;

    log::info!("서버 시작: http://{}/", addr);
    warp::serve(routes).run(addr).await;

    Ok(())
}
