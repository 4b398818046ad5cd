use petal::app::AppModel;
use petal::config;
use petal::menu::{CONTROL_SIZE, PetalMenu};
use petal::sys::runtime;
use sepal::{Size, Timeline};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();

    let mut timeline = Timeline::new();
    let menu = PetalMenu::from_config(
        &mut timeline,
        Size::new(CONTROL_SIZE, CONTROL_SIZE),
        &config,
    )?;

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx);

    AppModel::new(timeline, menu).run(rx);
    Ok(())
}
