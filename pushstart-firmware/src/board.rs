//! Board bring-up
//!
//! Turns the loaded configuration into concrete drivers: relay bank,
//! switch inputs, indicator PWM and the enablement gate.

use defmt::*;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{self, Pwm, PwmOutput};
use embassy_time::Instant;

use pushstart_core::config::{GateConfig, GateSource, PinConfig, PinMap};
use pushstart_core::gate::{EnablementGate, KillSwitchGate, TokenGate, TokenId};
use pushstart_core::state::RunState;
use pushstart_core::traits::Clock;
use pushstart_drivers::nfc::{Pn532, Pn532Error};
use pushstart_drivers::{GpioRelay, GpioRelayBank, PwmIndicator, SwitchInput};
use pushstart_hal::Polarity;
use pushstart_hal_rp2040::{BoardPeripherals, PinBank, PinError, PinSpec, RpInput, RpOutput, RpPwm};

/// PN532 activation retries per poll; keeps one poll inside the read timeout
const PN532_PASSIVE_RETRIES: u8 = 0x01;

/// PWM wrap value for the indicator slice (~1.9 kHz at 125 MHz)
const INDICATOR_PWM_TOP: u16 = 0xFFFF;

pub type Switch = SwitchInput<RpInput>;
pub type RelayBank = GpioRelayBank<RpOutput, RpOutput, RpOutput>;
pub type Indicator = PwmIndicator<RpPwm<PwmOutput<'static>>, RpPwm<PwmOutput<'static>>>;
pub type TokenBus = I2c<'static, I2C0, Blocking>;
pub type TokenReader = Pn532<TokenBus, EmbassyClock>;

/// Fatal bring-up errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// Pin from config could not be taken
    Pins(PinError),
    /// Indicator PWM channels unavailable
    Indicator,
    /// Token reader missing or not responding
    TokenReader(Pn532Error<i2c::Error>),
}

impl From<PinError> for BootError {
    fn from(e: PinError) -> Self {
        BootError::Pins(e)
    }
}

/// Monotonic clock backed by the embassy time driver
#[derive(Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Wraps after ~49 days; consumers use wrapping arithmetic
        Instant::now().as_millis() as u32
    }
}

/// Enablement gate selected by configuration
pub enum BoardGate {
    KillSwitch(KillSwitchGate<Switch>),
    Token(TokenGate<TokenReader>),
}

impl BoardGate {
    /// Reader error from the last evaluation, if any
    pub fn take_reader_error(&mut self) -> Option<Pn532Error<i2c::Error>> {
        match self {
            BoardGate::KillSwitch(_) => None,
            BoardGate::Token(gate) => gate.take_error(),
        }
    }

    /// Newly presented unauthorized token and the running rejection count
    pub fn take_rejected(&mut self) -> Option<(TokenId, u32)> {
        match self {
            BoardGate::KillSwitch(_) => None,
            BoardGate::Token(gate) => {
                let token = gate.take_rejected()?;
                Some((token, gate.rejected_count()))
            }
        }
    }
}

impl EnablementGate for BoardGate {
    fn is_enabled(&mut self, state: RunState) -> bool {
        match self {
            BoardGate::KillSwitch(gate) => gate.is_enabled(state),
            BoardGate::Token(gate) => gate.is_enabled(state),
        }
    }
}

/// Everything the control task drives
pub struct ControlIo {
    pub gate: BoardGate,
    pub button: Switch,
    pub interlock: Switch,
    pub relays: RelayBank,
    pub indicator: Indicator,
}

/// Take the three relay pins; every coil starts released
pub fn relays(bank: &mut PinBank, pins: &PinMap) -> Result<RelayBank, BootError> {
    let relays = GpioRelayBank::new(
        relay(bank, pins.relay_acc)?,
        relay(bank, pins.relay_ign)?,
        relay(bank, pins.relay_start)?,
    );
    info!(
        "Relays on gpio{}/{}/{}",
        pins.relay_acc.pin, pins.relay_ign.pin, pins.relay_start.pin
    );
    Ok(relays)
}

fn relay(bank: &mut PinBank, pin: PinConfig) -> Result<GpioRelay<RpOutput>, BootError> {
    let polarity = Polarity::from_inverted(pin.inverted);
    // Configure at the released level before the driver takes over
    let output = RpOutput::new(bank.take(pin.pin)?, polarity.level_for(false));
    Ok(GpioRelay::new(output, polarity))
}

/// Take a switch input pin
pub fn switch(bank: &mut PinBank, pin: PinConfig) -> Result<Switch, BootError> {
    let spec = PinSpec {
        pin: pin.pin,
        inverted: pin.inverted,
        pull_up: pin.pull_up,
    };
    let input = RpInput::new(bank.take(pin.pin)?, spec);
    Ok(SwitchInput::new(input, Polarity::from_inverted(pin.inverted)))
}

/// Set up PWM slice 7 for the two indicator LEDs
pub fn indicator(periph: IndicatorPeripherals) -> Result<Indicator, BootError> {
    let mut config = pwm::Config::default();
    config.top = INDICATOR_PWM_TOP;
    config.compare_a = 0;
    config.compare_b = 0;

    let pwm = Pwm::new_output_ab(periph.slice, periph.primary, periph.secondary, config);
    let (Some(primary), Some(secondary)) = pwm.split() else {
        return Err(BootError::Indicator);
    };
    Ok(PwmIndicator::new(RpPwm::new(primary), RpPwm::new(secondary)))
}

/// Indicator peripherals split off from [`BoardPeripherals`]
pub struct IndicatorPeripherals {
    slice: embassy_rp::Peri<'static, embassy_rp::peripherals::PWM_SLICE7>,
    primary: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_14>,
    secondary: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_15>,
}

/// Token reader peripherals split off from [`BoardPeripherals`]
pub struct TokenPeripherals {
    i2c: embassy_rp::Peri<'static, I2C0>,
    sda: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_4>,
    scl: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_5>,
}

/// Split the board-fixed peripherals by function
pub fn split_board(board: BoardPeripherals) -> (IndicatorPeripherals, TokenPeripherals) {
    (
        IndicatorPeripherals {
            slice: board.pwm_slice7,
            primary: board.indicator_primary,
            secondary: board.indicator_secondary,
        },
        TokenPeripherals {
            i2c: board.i2c0,
            sda: board.i2c0_sda,
            scl: board.i2c0_scl,
        },
    )
}

/// Build the enablement gate selected in config
///
/// With the token gate the PN532 must answer at boot; a missing reader
/// is fatal rather than a silently locked vehicle.
pub fn gate(
    bank: &mut PinBank,
    kill_switch: PinConfig,
    config: &GateConfig,
    token: TokenPeripherals,
) -> Result<BoardGate, BootError> {
    match config.source {
        GateSource::KillSwitch => {
            info!("Gate: kill switch on gpio{}", kill_switch.pin);
            Ok(BoardGate::KillSwitch(KillSwitchGate::new(switch(
                bank,
                kill_switch,
            )?)))
        }
        GateSource::Token => {
            let bus = I2c::new_blocking(token.i2c, token.scl, token.sda, i2c::Config::default());
            let mut reader = Pn532::new(bus, EmbassyClock);
            let version = reader
                .init(PN532_PASSIVE_RETRIES)
                .map_err(BootError::TokenReader)?;
            info!(
                "Gate: PN532 v{}.{}, {} authorized token(s), {} ms timeout",
                version.version,
                version.revision,
                config.allow_list.len(),
                config.token_timeout_ms
            );
            Ok(BoardGate::Token(TokenGate::new(
                reader,
                config.allow_list.clone(),
                config.token_timeout_ms,
            )))
        }
    }
}
