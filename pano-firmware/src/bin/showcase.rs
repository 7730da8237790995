//! Pano showcase variant
//!
//! Standalone demo: rotates canned strings, a scrolling banner and a run
//! time clock on a timer. No register link.
//!
//! Pins (RP2040):
//! - UART1 TX/RX on GPIO4/GPIO5 (panel link)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Config as UartConfig, InterruptHandler as UartInterruptHandler, Uart};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use pano_core::diagnostics::StatusReporter;
use pano_core::ShowcaseController;
use pano_display::present;
use pano_firmware::panel_link::LinkPanel;
use pano_firmware::{config, now};

bind_interrupts!(struct Irqs {
    UART1_IRQ => UartInterruptHandler<UART1>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Pano showcase firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    let panel_uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config.panel.link_baud_rate;
        cfg
    };
    let panel_uart = Uart::new(
        p.UART1,
        p.PIN_4,
        p.PIN_5,
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        panel_uart_config,
    );
    let (mut panel_tx, _panel_rx) = panel_uart.split();
    let mut panel = LinkPanel::new(config.panel.link_address, config.panel.geometry());
    info!("Panel link initialized");

    info!("Playlist:");
    for entry in config.showcase.playlist.iter() {
        info!("- {}", entry.as_str());
    }

    // Boot splash; the dwell clock starts once it has been shown
    let splash = ShowcaseController::new(&config.panel, &config.showcase, now()).splash();
    if let Err(e) = present(&mut panel, &splash) {
        warn!("Splash rejected: {:?}", e);
    }
    let _ = panel.flush(&mut panel_tx).await;
    Timer::after_millis(u64::from(config.showcase.splash_ms)).await;

    let mut controller = ShowcaseController::new(&config.panel, &config.showcase, now());
    let mut status = StatusReporter::new(config.status.interval_ms, now());

    info!("Showcase running");

    loop {
        let timestamp = now();

        let list = controller.tick(timestamp);
        if !list.is_empty() {
            if let Err(e) = present(&mut panel, &list) {
                warn!("Render failed: {:?}", e);
            }
            let _ = panel.flush(&mut panel_tx).await;
        }

        if let Some(report) = status.poll(timestamp, || controller.status(timestamp)) {
            info!("Mode: {} | Text: {}", report.mode, report.text.as_str());
        }

        Timer::after_millis(u64::from(config.panel.tick_ms)).await;
    }
}
