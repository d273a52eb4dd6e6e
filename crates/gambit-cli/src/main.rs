mod command;
mod config;
mod io;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    command::run()
}
