//! Scripted walkthroughs of the carousel and the page widgets.

use anyhow::{ensure, Context};
use urano_carousel::prelude::*;
use urano_carousel::CarouselMount;
use urano_ui_graphics::{Point, Size};
use urano_widgets::{
    Clipboard, CopyFeedback, FaqAccordion, MemoryClipboard, MenuConfig, MenuController, MenuEvent,
    MenuKey, Typewriter, TypewriterConfig, TypewriterPhase,
};

use crate::host::Host;

const PRODUCTS: [(&str, &str, &str); 6] = [
    ("launchpad", "Launchpad", "/launch"),
    ("staking", "Staking", "/staking"),
    ("docs", "Docs", "https://docs.example.com"),
    ("bridge", "Bridge", "coming-soon"),
    ("wallet", "Wallet", "/wallet"),
    ("support", "Support", "mailto:support@example.com"),
];

fn product_cards() -> anyhow::Result<Vec<CarouselItem>> {
    PRODUCTS
        .iter()
        .map(|(id, title, href)| {
            CarouselItem::new(*id, *title, format!("{title} on the network"))
                .with_href(href)
                .with_context(|| format!("card `{id}`"))
        })
        .collect()
}

fn mounted(host: &Host, config: CarouselConfig) -> anyhow::Result<(Carousel, CarouselMount)> {
    let mut carousel = Carousel::new(host.runtime().handle(), product_cards()?, config)?;
    carousel.set_navigator(|request: &NavigationRequest| {
        log::info!("navigate: {request:?}");
    });
    let mount = carousel.mount();
    Ok((carousel, mount))
}

/// Arrow paging over a host-measured 2500px track in a 1000px viewport.
pub fn paging(host: &Host) -> anyhow::Result<()> {
    log::info!("--- paging ---");
    let (mut carousel, mount) = mounted(host, CarouselConfig::desktop())?;
    carousel.on_viewport_resized(Size::new(1000.0, 360.0));
    carousel.on_track_resized(Size::new(2500.0, 340.0));
    log::info!("bounds {:?}, arrows {:?}", carousel.bounds(), carousel.arrows());

    while carousel.arrows().can_go_right {
        let target = carousel.go_right();
        host.settle()?;
        log::info!(
            "paged right to {target:.0}, arrows {:?}",
            carousel.arrows()
        );
    }
    ensure!(carousel.offset() == carousel.bounds().min, "did not reach the end");

    carousel.go_left();
    host.settle()?;
    log::info!("paged left to {:.0}", carousel.offset());
    mount.unmount();
    Ok(())
}

/// A drag across the built-in layout, the click it swallows, and a later
/// tap that navigates.
pub fn drag_and_click(host: &Host) -> anyhow::Result<()> {
    log::info!("--- drag and click ---");
    let (mut carousel, mount) = mounted(host, CarouselConfig::desktop())?;
    carousel.on_window_resized(Size::new(1280.0, 800.0));
    carousel.on_viewport_resized(Size::new(1280.0, 360.0));

    let y = 120.0;
    carousel.on_pointer_event(&host.down(700.0, y));
    for step in 1..=12 {
        host.frame();
        carousel.on_pointer_event(&host.moved(700.0 - 40.0 * step as f32, y));
    }
    carousel.on_pointer_event(&host.up(220.0, y));
    log::info!("released at {:.0}", carousel.offset());

    let outcome = carousel.click_at(Point::new(220.0, y));
    ensure!(outcome == ClickOutcome::Suppressed, "click after drag was {outcome:?}");
    host.settle()?;
    log::info!("glided to {:.0}", carousel.offset());

    host.wait(150);
    let target = carousel
        .frame()
        .cards
        .iter()
        .filter_map(|card| card.rect.map(|rect| (card.id.clone(), rect)))
        .find(|(_, rect)| rect.x >= 0.0 && rect.right() <= 1280.0)
        .context("no card fully visible")?;
    let (id, rect) = target;
    let centre = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    carousel.on_pointer_event(&host.down(centre.x, centre.y));
    carousel.on_pointer_event(&host.up(centre.x, centre.y));
    let outcome = carousel.click_at(centre);
    log::info!("tapped `{id}`: {outcome:?}");
    mount.unmount();
    Ok(())
}

/// Mobile preset on a phone-sized window.
pub fn mobile(host: &Host) -> anyhow::Result<()> {
    log::info!("--- mobile ---");
    let (mut carousel, mount) = mounted(host, CarouselConfig::mobile())?;
    carousel.on_window_resized(Size::new(390.0, 844.0));
    carousel.on_viewport_resized(Size::new(390.0, 600.0));
    log::info!(
        "breakpoint {:?}, page step {:.1}, bounds {:?}",
        carousel.breakpoint(),
        carousel.page_step(),
        carousel.bounds()
    );
    carousel.go_right();
    host.settle()?;
    log::info!("after one page: {:.1}", carousel.offset());

    carousel.on_window_resized(Size::new(1024.0, 768.0));
    carousel.on_viewport_resized(Size::new(1024.0, 600.0));
    log::info!(
        "rotated to {:?}: bounds {:?}, offset {:.1}",
        carousel.breakpoint(),
        carousel.bounds(),
        carousel.offset()
    );
    mount.unmount();
    Ok(())
}

pub fn menu(host: &Host) -> anyhow::Result<()> {
    log::info!("--- menu and faq ---");
    let menu = MenuController::new(host.runtime().handle(), MenuConfig::default());
    let _events = menu.subscribe(|event: &MenuEvent| log::info!("menu: {event:?}"));

    menu.on_trigger_enter(MenuKey::Products);
    menu.on_trigger_leave();
    host.wait(100);
    menu.on_trigger_enter(MenuKey::Learn);
    menu.on_trigger_leave();
    host.wait(400);
    ensure!(!menu.is_open(MenuKey::Learn), "menu stayed open");

    let faq = FaqAccordion::new(
        vec!["what".into(), "fees".into(), "wallets".into()],
        Some("fees"),
    )?;
    log::info!("faq opens on {:?}", faq.open_id());
    faq.toggle("wallets");
    faq.toggle("wallets");
    log::info!("faq after double toggle: {:?}", faq.open_id());
    Ok(())
}

pub fn typewriter(host: &Host) -> anyhow::Result<()> {
    log::info!("--- typewriter ---");
    let writer = Typewriter::new(
        host.runtime().handle(),
        vec!["Build on Urano".into(), "Launch tokens".into()],
        TypewriterConfig::default(),
    );
    let _progress = writer.state().subscribe(|snapshot| {
        if snapshot.phase == TypewriterPhase::Pausing {
            log::info!("typed `{}`", snapshot.text);
        }
    });
    writer.start();
    host.wait(2_500);
    writer.stop();
    Ok(())
}

pub fn copy(host: &Host) -> anyhow::Result<()> {
    log::info!("--- copy ---");
    let feedback = CopyFeedback::new(host.runtime().handle());
    let mut clipboard = clipboard();
    feedback.copy(clipboard.as_mut(), "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984")?;
    log::info!("copied: {}", feedback.is_copied());
    host.wait(2_100);
    log::info!("copied after 2.1s: {}", feedback.is_copied());
    Ok(())
}

#[cfg(feature = "clipboard")]
fn clipboard() -> Box<dyn Clipboard> {
    match urano_widgets::SystemClipboard::new() {
        Ok(system) => Box::new(system),
        Err(err) => {
            log::warn!("{err}; falling back to an in-memory clipboard");
            Box::new(MemoryClipboard::new())
        }
    }
}

#[cfg(not(feature = "clipboard"))]
fn clipboard() -> Box<dyn Clipboard> {
    Box::new(MemoryClipboard::new())
}
