mod cli;
mod client;
mod command;
mod config;
mod tabular;

type Result<T, E = anyhow::Error> = std::result::Result<T, E>;

fn main() -> Result<()> {
    let opts = cli::parse_args();

    let command = match opts.command {
        Some(command) => command,
        None => cli::exit_with_help(),
    };

    // every session-requiring arm opens exactly one connection; `config`
    // only edits the local file and never opens one
    let connect = || command::connect(&opts.connect);

    match command {
        cli::Command::Config(config_args) => command::config::execute(config_args),
        cli::Command::Ls(ls_args) => command::ls::execute(&connect()?, ls_args),
        cli::Command::Query(query_args) => command::query::execute(&connect()?, query_args),
        cli::Command::Del(del_args) => command::del::execute(&connect()?, del_args),
        cli::Command::Stat(stat_args) => command::stat::execute(&connect()?, stat_args),
        cli::Command::Put(put_args) => command::put::execute(&connect()?, put_args),
    }
}
