//! Pano bus variant
//!
//! Display mode, scroll interval, price and time come from four holding
//! registers written by a bus master over RS-485. The main loop applies
//! queued register requests, ticks the controller and forwards the render
//! commands to the panel module.
//!
//! Pins (RP2040):
//! - UART0 TX/RX on GPIO0/GPIO1, RS-485 DE/RE on GPIO2 (register link)
//! - UART1 TX/RX on GPIO4/GPIO5 (panel link)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{
    BufferedInterruptHandler, Config as UartConfig, InterruptHandler as UartInterruptHandler,
    Uart,
};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pano_core::diagnostics::StatusReporter;
use pano_core::registers::RegisterBank;
use pano_core::{BusController, RenderList};
use pano_display::present;
use pano_firmware::channels::{BUS_REPLIES, BUS_REQUESTS};
use pano_firmware::panel_link::LinkPanel;
use pano_firmware::{config, now, tasks};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => UartInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pano bus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let unit_address = config.bus.unit_address;

    // Register link: buffered UART0 behind an RS-485 transceiver
    let bus_uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config.bus.baud_rate;
        cfg
    };
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, bus_uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (bus_tx, bus_rx) = uart.split();
    let direction = Output::new(p.PIN_2, Level::Low);
    info!("Register link initialized, {} baud", config.bus.baud_rate);

    // Panel link: DMA UART1 to the panel module
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

    spawner.spawn(tasks::bus_rx_task(bus_rx, unit_address)).unwrap();
    spawner
        .spawn(tasks::bus_tx_task(bus_tx, direction, unit_address))
        .unwrap();

    let mut bank = RegisterBank::new(config.bus.initial_registers);
    let mut controller = BusController::new(&config.panel, &config.bus);
    let mut status = StatusReporter::new(config.status.interval_ms, now());

    let mut boot = RenderList::new();
    boot.brightness(config.panel.brightness).clear();
    if let Err(e) = present(&mut panel, &boot) {
        warn!("Boot frame rejected: {:?}", e);
    }
    let _ = panel.flush(&mut panel_tx).await;

    info!("Bus firmware running");

    loop {
        let timestamp = now();

        while let Ok(transaction) = BUS_REQUESTS.try_receive() {
            let reply = bank.handle(&transaction.request);
            debug!("Reply: {:?}", reply);
            if transaction.respond && BUS_REPLIES.try_send(reply).is_err() {
                warn!("Reply channel full, dropping reply");
            }
        }

        let list = controller.tick(timestamp, &bank.snapshot());
        if !list.is_empty() {
            if let Err(e) = present(&mut panel, &list) {
                warn!("Render failed: {:?}", e);
            }
            let _ = panel.flush(&mut panel_tx).await;
        }

        if let Some(report) = status.poll(timestamp, || controller.status()) {
            info!("Mode: {} | Text: {}", report.mode, report.text.as_str());
        }

        Timer::after_millis(u64::from(config.panel.tick_ms)).await;
    }
}
