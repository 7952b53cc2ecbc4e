use anyhow::Result;
use env_logger::{Builder, Env};

mod cli;
mod util;
mod cmd_aggregate;
mod cmd_query;
mod cmd_status;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт - info.
    // Пример: RUST_LOG=debug scripture-freq aggregate ...
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Aggregate { input, out, lemma_dict, no_lemmatize, compact } =>
            cmd_aggregate::exec(input, out, lemma_dict, no_lemmatize, compact),

        cli::Cmd::Query { term, granularity, snapshot, json } =>
            cmd_query::exec(term, granularity, snapshot, json),

        cli::Cmd::Status { snapshot, json } =>
            cmd_status::exec(snapshot, json),
    }
}
