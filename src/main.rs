use anyhow::{Context, Result};
use polyglot_wordle::cli::{CliInterface, parse_cli};
use polyglot_wordle::config::Config;
use polyglot_wordle::http::{DictionaryApi, RandomWordApi};
use polyglot_wordle::i18n::Catalog;
use polyglot_wordle::logging::init_logger;
use polyglot_wordle::services::ServiceWorker;
use polyglot_wordle::session::{GameInterface, Session};
use polyglot_wordle::tui::TuiInterface;
use std::io;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = parse_cli();
    let config = Config::from_cli(&cli).context("invalid game settings")?;
    init_logger(&config.log_file).context("could not open the log file")?;
    log::info!(
        "starting: language={} length={} difficulty={}",
        config.settings.language,
        config.settings.word_length,
        config.settings.difficulty
    );

    let catalog = Catalog::embedded().context("embedded translations are broken")?;
    let (worker, events) = ServiceWorker::new(
        Arc::new(RandomWordApi::new(&config.word_api)),
        Arc::new(DictionaryApi::new(&config.dictionary_api)),
    );
    let mut session = Session::new(config.settings.clone(), worker);

    let mut interface: Box<dyn GameInterface> = if config.plain {
        Box::new(CliInterface::new(io::stdin().lock(), io::stdout()))
    } else {
        Box::new(TuiInterface::new().context("could not set up the terminal")?)
    };
    interface.run(&mut session, &events, &catalog)?;
    log::info!("exiting");
    Ok(())
}
