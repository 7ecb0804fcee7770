//! Control task
//!
//! Runs one control cycle per tick: poll the gate, sample the button and
//! interlock, step the run-state machine, drive the relays on a state
//! change and update the indicator.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use pushstart_core::config::{ControlConfig, IndicatorConfig};
use pushstart_core::control::Controller;
use pushstart_core::output::{RelayPattern, RelayUpdate};
use pushstart_core::state::Warning;
use pushstart_core::traits::{IndicatorOutput, RelayDriver};

use crate::board::{ControlIo, EmbassyClock};

/// Control task - owns the controller and all vehicle I/O
#[embassy_executor::task]
pub async fn control_task(mut io: ControlIo, control: ControlConfig, indicator: IndicatorConfig) {
    info!(
        "Control task started ({} ms cycle, {} ms hold)",
        control.cycle_period_ms, control.hold_threshold_ms
    );

    let mut controller = Controller::new(&control, indicator);
    io.relays.apply(controller.boot_pattern());

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(control.cycle_period_ms as u64));

    loop {
        let inputs = controller.sample(&mut io.gate, &mut io.button, &mut io.interlock, &clock);
        if let Some(e) = io.gate.take_reader_error() {
            warn!("Token read failed: {}", e);
        }
        if let Some((token, count)) = io.gate.take_rejected() {
            warn!("Token {:02x} not authorized ({} rejected)", token.as_bytes(), count);
        }

        let report = controller.cycle(inputs);

        if let Some(t) = report.transition {
            info!("State {} -> {}", t.from, t.to);
        }
        if let Some(Warning::UnsafeStart { held_ms }) = report.warning {
            warn!("Start refused after {} ms: interlock not satisfied", held_ms);
        }

        match report.relays {
            RelayUpdate::Hold => {}
            RelayUpdate::Drive(pattern) => io.relays.apply(pattern),
            RelayUpdate::Settle { settle_ms, then } => {
                io.relays.apply(RelayPattern::ALL_OFF);
                io.indicator.set_brightness(0);
                debug!("Relays settling for {} ms", settle_ms);
                Timer::after_millis(settle_ms as u64).await;
                io.relays.apply(then);
                // Don't burst through the ticks missed while settling
                ticker.reset();
            }
        }

        io.indicator.set_brightness(report.brightness);
        trace!("{} brightness={}", report.state, report.brightness);

        ticker.next().await;
    }
}
