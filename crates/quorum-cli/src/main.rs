mod command;
mod data;
mod render;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
