// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::fs::{self, OpenOptions};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use jobwiz::app::App;
use jobwiz::config::Config;
use jobwiz::error::AppError;
use jobwiz::lang::Lang;
use jobwiz::storage::{FileStore, MemoryStore, Store};
use jobwiz::ui;
use jobwiz::view::PageView;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use ratatui::prelude::*;

const LOG_FILE: &str = "jobwiz.log";

/// コマンドライン引数 (設定ファイルより優先)
#[derive(Debug, Parser)]
#[command(name = "jobwiz", version, about = "JOB WiZ. Bilingual job search and interview practice.")]
struct Cli {
    /// 表示言語 (en / ja)
    #[arg(long, value_parser = parse_lang)]
    lang: Option<Lang>,

    /// 保存先ディレクトリ
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 乱数のシード
    #[arg(long)]
    seed: Option<u64>,

    /// 設定ファイルのパス
    #[arg(long)]
    config: Option<PathBuf>,

    /// 何も保存しない
    #[arg(long)]
    memory: bool,
}

fn parse_lang(s: &str) -> std::result::Result<Lang, String> {
    s.parse().map_err(|err: AppError| err.to_string())
}

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(FileStore::default_dir);
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data dir: {}", data_dir.display()))?;
    init_logging(&data_dir, &config.log_level)?;

    let lang = cli.lang.unwrap_or(config.language);
    let seed = cli.seed.or(config.seed);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let store: Box<dyn Store> = if cli.memory {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::open(&data_dir)?)
    };
    info!(
        "starting: data_dir={} lang={} seed={:?} memory={}",
        data_dir.display(),
        lang,
        seed,
        cli.memory
    );

    let mut app = App::new(store, rng, lang, config.interview_probability);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal()?;
    result
}

/// ログは画面を崩さないようファイルへ
fn init_logging(dir: &Path, default_level: &str) -> Result<()> {
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // 録音中ならここで1秒ごとのカウントが進む
        app.on_tick(Instant::now());

        let view = PageView::build(app);
        terminal.draw(|f| ui::ui(f, &view))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key, Instant::now());
            }
        }
    }

    if app.recorder.is_recording() {
        info!("quit while recording; session discarded");
    }
    Ok(())
}
