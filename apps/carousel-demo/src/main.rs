mod host;
mod scenarios;

use host::Host;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Urano Carousel Demo ===");
    println!("Replays the carousel and page widget scenarios in real time.");
    println!("Set RUST_LOG=debug to see bounds, drag and release details.");
    println!();

    let host = Host::new();
    scenarios::paging(&host)?;
    scenarios::drag_and_click(&host)?;
    scenarios::mobile(&host)?;
    scenarios::menu(&host)?;
    scenarios::typewriter(&host)?;
    scenarios::copy(&host)?;

    log::info!("all scenarios finished in {}ms", host.now_millis());
    Ok(())
}
