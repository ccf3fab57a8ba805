mod app;
mod cli;

fn main() {
    let cli = cli::parse();
    deckprofile::engine::log::init_tracing(cli.verbose);
    app::run(cli);
}
