//! Pushstart - Push-Button Ignition Controller Firmware
//!
//! Main firmware binary for RP2040-based controller boards. A momentary
//! button steps the vehicle through OFF, ACC, START and RUN by driving
//! three relays; a kill switch or NFC token enables the system and a
//! brake/clutch interlock gates the starter.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use pushstart_core::config::PushstartConfig;
use pushstart_hal_rp2040::{BoardPeripherals, PinBank};

use crate::board::{BoardGate, BootError, ControlIo, Indicator, RelayBank, Switch};

mod board;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pushstart firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    info!(
        "Configuration loaded: gate={}, {} token(s)",
        config.gate.source,
        config.gate.allow_list.len()
    );

    let (mut bank, fixed) = PinBank::from_peripherals(p);

    // Relays first so every coil is released before anything else can fail
    let relays = match board::relays(&mut bank, &config.pins) {
        Ok(relays) => relays,
        Err(e) => {
            error!("Relay setup failed: {}", e);
            loop {
                Timer::after_secs(60).await;
            }
        }
    };

    let io = match bring_up(&mut bank, fixed, &config, relays) {
        Ok(io) => io,
        Err((e, _relays)) => {
            // Keep the bank alive so the coils stay driven released
            error!("Boot failed: {}", e);
            warn!("Relays held released; fix the fault and power cycle");
            loop {
                Timer::after_secs(60).await;
            }
        }
    };

    spawner
        .spawn(tasks::control_task(io, config.control, config.indicator))
        .unwrap();

    info!("Control task spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Build the remaining I/O around an already released relay bank
///
/// On failure the relay bank is handed back so it can be held released.
fn bring_up(
    bank: &mut PinBank,
    fixed: BoardPeripherals,
    config: &PushstartConfig,
    relays: RelayBank,
) -> Result<ControlIo, (BootError, RelayBank)> {
    match inputs_and_outputs(bank, fixed, config) {
        Ok((gate, button, interlock, indicator)) => Ok(ControlIo {
            gate,
            button,
            interlock,
            relays,
            indicator,
        }),
        Err(e) => Err((e, relays)),
    }
}

fn inputs_and_outputs(
    bank: &mut PinBank,
    fixed: BoardPeripherals,
    config: &PushstartConfig,
) -> Result<(BoardGate, Switch, Switch, Indicator), BootError> {
    let (indicator_periph, token_periph) = board::split_board(fixed);

    let button = board::switch(bank, config.pins.button)?;
    let interlock = board::switch(bank, config.pins.interlock)?;
    info!(
        "Button on gpio{}, interlock on gpio{}",
        config.pins.button.pin, config.pins.interlock.pin
    );

    let indicator = board::indicator(indicator_periph)?;
    let gate = board::gate(bank, config.pins.kill_switch, &config.gate, token_periph)?;

    Ok((gate, button, interlock, indicator))
}
