use std::io;
use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tancalc::config::CalculatorConfig;
use tancalc::logging::{LogOutput, init_logging, level_for_verbosity};
use tancalc::session::Session;
use tancalc::trig::{Strategy, TangentEngine};
use tracing::debug;

fn main() {
    // コマンドライン引数の解析
    let matches = Command::new("tancalc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("正接電卓 (Tangent Calculator)")
        .long_about(
            "三角関数ライブラリを使わずに tan(x) を計算します。\n\
             角度は度で入力し、sin / cos は15項のMaclaurin級数で評価します。\n\
             角度を引数で指定しない場合は対話モードで起動します。",
        )
        .arg(
            Arg::new("angles")
                .value_name("ANGLE")
                .num_args(0..)
                .allow_negative_numbers(true)
                .help("計算する角度（度）。指定した場合は結果を表示して終了"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("設定ファイル(.yaml)のパスを指定"),
        )
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .value_name("STRATEGY")
                .value_parser(["radian", "degree"])
                .help("正規化と特異判定の戦略"),
        )
        .arg(
            Arg::new("metrics")
                .short('m')
                .long("metrics")
                .action(ArgAction::SetTrue)
                .help("計算ごとの所要時間を表示"),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(ArgAction::SetTrue)
                .help("有効な設定を表示して終了"),
        )
        .arg(
            Arg::new("log-output")
                .long("log-output")
                .value_name("OUTPUT")
                .value_parser(["console", "file", "both"])
                .help("ログの出力先"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("詳細出力レベル (-v: 基本, -vv: 詳細, -vvv: デバッグ)"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(matches)?;

    if matches.get_flag("info") {
        config.print_summary();
        return Ok(());
    }

    let mut log_config = config.log_config()?;
    log_config.level = level_for_verbosity(log_config.level, matches.get_count("verbose"));
    // ガードはプロセス終了まで保持する
    let _guard = init_logging(log_config)?;
    debug!(?config, "設定読み込み完了");

    let engine = TangentEngine::new(config.engine.strategy);

    match matches.get_many::<String>("angles") {
        Some(angles) => {
            let stdout = io::stdout();
            let mut session = Session::new(engine, config.session, io::empty(), stdout.lock());
            session.evaluate_all(angles.map(String::as_str))?;
        }
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(engine, config.session, stdin.lock(), stdout.lock());
            session.run()?;
        }
    }

    Ok(())
}

/// 設定ファイルを読み込み、コマンドライン引数で上書き
fn load_config(matches: &ArgMatches) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };

    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.engine.strategy = Strategy::from_str(strategy)?;
    }
    if let Some(output) = matches.get_one::<String>("log-output") {
        config.logging.output = LogOutput::from_str(output)?;
    }
    if matches.get_flag("metrics") {
        config.session.show_metrics = true;
    }

    config.validate()?;
    Ok(config)
}
