//! PN532 NFC reader (I2C mode)
//!
//! The PN532 reads ISO 14443-A tags (MIFARE Classic, Ultralight, NTAG).
//! Only the handful of commands needed to detect a tag and read its UID
//! are implemented.
//!
//! # Frame Format
//!
//! Host to PN532 (normal information frame):
//! - Preamble 0x00, start code 0x00 0xFF
//! - LEN (TFI + data), LCS so that LEN + LCS = 0 (mod 256)
//! - TFI 0xD4, command code, parameters
//! - DCS so that TFI + data + DCS = 0 (mod 256)
//! - Postamble 0x00
//!
//! Responses use TFI 0xD5 and command code + 1. Every I2C read starts
//! with a status byte; bit 0 set means a frame is ready.
//!
//! # Timeouts
//!
//! All waits are bounded by a [`Clock`]. When a tag poll runs out of
//! time the pending command is cancelled with an ACK frame so the next
//! poll starts clean.

use embedded_hal::i2c::I2c;
use pushstart_core::gate::TokenId;
use pushstart_core::traits::{Clock, TokenReader};

/// 7-bit I2C address
pub const PN532_ADDR: u8 = 0x24;

/// PN532 command codes
pub mod cmd {
    /// Read IC and firmware version
    pub const GET_FIRMWARE_VERSION: u8 = 0x02;
    /// Configure the security access module (normal mode)
    pub const SAM_CONFIGURATION: u8 = 0x14;
    /// Configure RF parameters
    pub const RF_CONFIGURATION: u8 = 0x32;
    /// Detect passive targets in the field
    pub const IN_LIST_PASSIVE_TARGET: u8 = 0x4A;
}

/// Host to PN532 frame identifier
const TFI_HOST: u8 = 0xD4;
/// PN532 to host frame identifier
const TFI_PN532: u8 = 0xD5;

/// Frame start sequence
const START: [u8; 3] = [0x00, 0x00, 0xFF];
/// ACK frame (also cancels the running command when sent by the host)
pub const ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];
/// NACK frame
pub const NACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00];

/// Status byte flag: frame ready
const STATUS_READY: u8 = 0x01;

/// IC code reported by a genuine PN532
const IC_PN532: u8 = 0x32;

/// Baud rate / modulation for ISO 14443-A at 106 kbps
const BRTY_106_TYPE_A: u8 = 0x00;

/// RFConfiguration item: MaxRetries
const CFG_MAX_RETRIES: u8 = 0x05;

/// Largest frame we build or parse (status + header + data + trailer)
pub const MAX_FRAME_LEN: usize = 64;

/// Wait for ACK and short command responses (ms)
const COMMAND_TIMEOUT_MS: u32 = 100;

/// PN532 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pn532Error<E> {
    /// I2C bus error
    Bus(E),
    /// Reader did not answer in time
    Timeout,
    /// Missing start code, bad length or truncated frame
    InvalidFrame,
    /// LCS or DCS check failed
    ChecksumMismatch,
    /// Reader answered with NACK
    Nack,
    /// Frame was valid but not the expected response
    UnexpectedResponse,
    /// Chip did not report itself as a PN532
    UnsupportedFirmware,
}

/// IC and firmware version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    /// IC code (0x32 for PN532)
    pub ic: u8,
    /// Firmware version
    pub version: u8,
    /// Firmware revision
    pub revision: u8,
    /// Supported protocols bitmap
    pub support: u8,
}

/// Length-checksum and data-checksum helper
///
/// Returns the byte that makes the sum of `data` plus itself zero.
pub fn checksum(data: &[u8]) -> u8 {
    let sum = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

/// Build a host command frame into `out`
///
/// Returns the frame length.
pub fn build_frame<E>(
    command: u8,
    params: &[u8],
    out: &mut [u8; MAX_FRAME_LEN],
) -> Result<usize, Pn532Error<E>> {
    // TFI + command + params
    let len = params.len() + 2;
    let total = len + 7;
    if total > MAX_FRAME_LEN {
        return Err(Pn532Error::InvalidFrame);
    }

    out[..3].copy_from_slice(&START);
    out[3] = len as u8;
    out[4] = checksum(&[len as u8]);
    out[5] = TFI_HOST;
    out[6] = command;
    out[7..7 + params.len()].copy_from_slice(params);
    out[5 + len] = checksum(&out[5..5 + len]);
    out[6 + len] = 0x00;

    Ok(total)
}

/// Locate the frame start within a raw read
fn find_start(raw: &[u8]) -> Option<usize> {
    raw.windows(3).position(|w| w == START)
}

/// Check that `raw` holds an ACK frame
pub fn parse_ack<E>(raw: &[u8]) -> Result<(), Pn532Error<E>> {
    let start = find_start(raw).ok_or(Pn532Error::InvalidFrame)?;
    let frame = &raw[start..];
    if frame.len() < ACK_FRAME.len() {
        return Err(Pn532Error::InvalidFrame);
    }
    match &frame[..ACK_FRAME.len()] {
        f if f == ACK_FRAME => Ok(()),
        f if f == NACK_FRAME => Err(Pn532Error::Nack),
        _ => Err(Pn532Error::UnexpectedResponse),
    }
}

/// Validate a response frame and return its data (after TFI and code)
///
/// `raw` may include leading status and padding bytes.
pub fn parse_response<E>(raw: &[u8], command: u8) -> Result<&[u8], Pn532Error<E>> {
    let (offset, len) = locate_response(raw, command)?;
    Ok(&raw[offset..offset + len])
}

/// Offset and length of the response data within `raw`
fn locate_response<E>(raw: &[u8], command: u8) -> Result<(usize, usize), Pn532Error<E>> {
    let start = find_start(raw).ok_or(Pn532Error::InvalidFrame)?;
    let header = start + START.len();
    let frame = &raw[header..];
    if frame.len() < 2 {
        return Err(Pn532Error::InvalidFrame);
    }

    let len = frame[0];
    let lcs = frame[1];
    if len == 0xFF && lcs == 0x00 {
        return Err(Pn532Error::Nack);
    }
    if len.wrapping_add(lcs) != 0 {
        return Err(Pn532Error::ChecksumMismatch);
    }

    let len = len as usize;
    if len < 2 || frame.len() < 2 + len + 1 {
        return Err(Pn532Error::InvalidFrame);
    }

    let body = &frame[2..2 + len];
    let dcs = frame[2 + len];
    if checksum(body) != dcs {
        return Err(Pn532Error::ChecksumMismatch);
    }

    if body[0] != TFI_PN532 || body[1] != command.wrapping_add(1) {
        return Err(Pn532Error::UnexpectedResponse);
    }

    // Data follows LEN, LCS, TFI and the response code
    Ok((header + 4, len - 2))
}

/// Parse a GetFirmwareVersion response
pub fn parse_firmware_version<E>(data: &[u8]) -> Result<FirmwareVersion, Pn532Error<E>> {
    let [ic, version, revision, support] = data else {
        return Err(Pn532Error::UnexpectedResponse);
    };
    if *ic != IC_PN532 {
        return Err(Pn532Error::UnsupportedFirmware);
    }
    Ok(FirmwareVersion {
        ic: *ic,
        version: *version,
        revision: *revision,
        support: *support,
    })
}

/// Parse an InListPassiveTarget response for a type A target
///
/// Layout: NbTg, Tg, SENS_RES (2), SEL_RES, NFCID length, NFCID, [ATS].
/// Returns `None` when no target was found.
pub fn parse_passive_target<E>(data: &[u8]) -> Result<Option<TokenId>, Pn532Error<E>> {
    let Some((&count, rest)) = data.split_first() else {
        return Err(Pn532Error::UnexpectedResponse);
    };
    if count == 0 {
        return Ok(None);
    }
    if rest.len() < 5 {
        return Err(Pn532Error::InvalidFrame);
    }

    let uid_len = rest[4] as usize;
    let uid = rest
        .get(5..5 + uid_len)
        .ok_or(Pn532Error::InvalidFrame)?;

    TokenId::from_bytes(uid)
        .map(Some)
        .map_err(|_| Pn532Error::UnexpectedResponse)
}

/// PN532 driver
pub struct Pn532<I2C, C> {
    i2c: I2C,
    clock: C,
    buf: [u8; MAX_FRAME_LEN],
}

impl<I2C, C> Pn532<I2C, C>
where
    I2C: I2c,
    C: Clock,
{
    /// Create a new driver; call [`Pn532::init`] before polling
    pub fn new(i2c: I2C, clock: C) -> Self {
        Self {
            i2c,
            clock,
            buf: [0; MAX_FRAME_LEN],
        }
    }

    /// Detect the chip and put it in normal mode
    ///
    /// `passive_retries` bounds how often the chip retries activation
    /// per poll (0xFF = forever).
    pub fn init(&mut self, passive_retries: u8) -> Result<FirmwareVersion, Pn532Error<I2C::Error>> {
        let version = self.firmware_version()?;

        // Normal mode, no timeout, IRQ pin in use
        self.exchange(cmd::SAM_CONFIGURATION, &[0x01, 0x00, 0x01], COMMAND_TIMEOUT_MS)?;

        // MxRtyATR, MxRtyPSL, MxRtyPassiveActivation
        self.exchange(
            cmd::RF_CONFIGURATION,
            &[CFG_MAX_RETRIES, 0xFF, 0x01, passive_retries],
            COMMAND_TIMEOUT_MS,
        )?;

        Ok(version)
    }

    /// Read the IC and firmware version
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion, Pn532Error<I2C::Error>> {
        let (start, len) = self.exchange(cmd::GET_FIRMWARE_VERSION, &[], COMMAND_TIMEOUT_MS)?;
        parse_firmware_version(&self.buf[start..start + len])
    }

    /// Poll for one ISO 14443-A tag
    ///
    /// Returns `Ok(None)` when no tag answered within `timeout_ms`.
    pub fn list_passive_target(
        &mut self,
        timeout_ms: u32,
    ) -> Result<Option<TokenId>, Pn532Error<I2C::Error>> {
        match self.exchange(cmd::IN_LIST_PASSIVE_TARGET, &[0x01, BRTY_106_TYPE_A], timeout_ms) {
            Ok((start, len)) => parse_passive_target(&self.buf[start..start + len]),
            Err(Pn532Error::Timeout) => {
                self.abort()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Cancel the command in progress
    pub fn abort(&mut self) -> Result<(), Pn532Error<I2C::Error>> {
        self.i2c
            .write(PN532_ADDR, &ACK_FRAME)
            .map_err(Pn532Error::Bus)
    }

    /// Send a command, wait for ACK, wait for and validate the response
    ///
    /// The whole exchange shares one `timeout_ms` budget.
    ///
    /// Returns the position and length of the response data in `self.buf`.
    fn exchange(
        &mut self,
        command: u8,
        params: &[u8],
        timeout_ms: u32,
    ) -> Result<(usize, usize), Pn532Error<I2C::Error>> {
        let start = self.clock.now_ms();
        let mut frame = [0u8; MAX_FRAME_LEN];
        let len = build_frame(command, params, &mut frame)?;
        self.i2c
            .write(PN532_ADDR, &frame[..len])
            .map_err(Pn532Error::Bus)?;

        self.wait_ready(start, timeout_ms)?;
        let mut ack = [0u8; ACK_FRAME.len() + 1];
        self.i2c.read(PN532_ADDR, &mut ack).map_err(Pn532Error::Bus)?;
        parse_ack(&ack[1..])?;

        self.wait_ready(start, timeout_ms)?;
        self.buf.fill(0);
        self.i2c
            .read(PN532_ADDR, &mut self.buf)
            .map_err(Pn532Error::Bus)?;

        // Skip the status byte
        let (offset, len) = locate_response(&self.buf[1..], command)?;
        Ok((offset + 1, len))
    }

    /// Poll the status byte until the chip has a frame ready
    fn wait_ready(&mut self, start: u32, timeout_ms: u32) -> Result<(), Pn532Error<I2C::Error>> {
        let mut status = [0u8; 1];
        loop {
            self.i2c
                .read(PN532_ADDR, &mut status)
                .map_err(Pn532Error::Bus)?;
            if status[0] & STATUS_READY != 0 {
                return Ok(());
            }
            if self.clock.now_ms().wrapping_sub(start) >= timeout_ms {
                return Err(Pn532Error::Timeout);
            }
        }
    }
}

impl<I2C, C> TokenReader for Pn532<I2C, C>
where
    I2C: I2c,
    C: Clock,
{
    type Error = Pn532Error<I2C::Error>;

    fn read_token(&mut self, timeout_ms: u32) -> Result<Option<TokenId>, Self::Error> {
        self.list_passive_target(timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::i2c::{ErrorType, Operation};

    type TestError = Pn532Error<Infallible>;

    /// Mock I2C bus: records writes, replays queued reads in order
    struct MockI2c {
        writes: heapless::Vec<heapless::Vec<u8, MAX_FRAME_LEN>, 16>,
        reads: heapless::Deque<heapless::Vec<u8, MAX_FRAME_LEN>, 16>,
    }

    impl MockI2c {
        fn new() -> Self {
            Self {
                writes: heapless::Vec::new(),
                reads: heapless::Deque::new(),
            }
        }

        fn queue(&mut self, bytes: &[u8]) {
            self.reads
                .push_back(heapless::Vec::from_slice(bytes).unwrap())
                .unwrap();
        }

        /// Ready status, ACK, ready status, response
        fn queue_exchange(&mut self, response: &[u8]) {
            self.queue(&[STATUS_READY]);
            let mut ack = [0u8; 7];
            ack[0] = STATUS_READY;
            ack[1..].copy_from_slice(&ACK_FRAME);
            self.queue(&ack);
            self.queue(&[STATUS_READY]);
            let mut resp: heapless::Vec<u8, MAX_FRAME_LEN> = heapless::Vec::new();
            resp.push(STATUS_READY).unwrap();
            resp.extend_from_slice(response).unwrap();
            self.queue(&resp);
        }
    }

    impl ErrorType for MockI2c {
        type Error = Infallible;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            assert_eq!(address, PN532_ADDR);
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.writes
                            .push(heapless::Vec::from_slice(bytes).unwrap())
                            .unwrap();
                    }
                    Operation::Read(buf) => {
                        // Chip not ready when nothing is queued
                        buf.fill(0);
                        if let Some(data) = self.reads.pop_front() {
                            let n = data.len().min(buf.len());
                            buf[..n].copy_from_slice(&data[..n]);
                        }
                    }
                }
            }
            Ok(())
        }
    }

    /// Clock that advances 1 ms per query
    struct StepClock {
        now: Cell<u32>,
    }

    impl StepClock {
        fn new() -> Self {
            Self { now: Cell::new(0) }
        }
    }

    impl Clock for StepClock {
        fn now_ms(&self) -> u32 {
            let t = self.now.get();
            self.now.set(t.wrapping_add(1));
            t
        }
    }

    /// Build a PN532 to host response frame
    fn response(command: u8, data: &[u8]) -> heapless::Vec<u8, MAX_FRAME_LEN> {
        let mut body: heapless::Vec<u8, MAX_FRAME_LEN> = heapless::Vec::new();
        body.push(TFI_PN532).unwrap();
        body.push(command + 1).unwrap();
        body.extend_from_slice(data).unwrap();

        let mut frame: heapless::Vec<u8, MAX_FRAME_LEN> = heapless::Vec::new();
        frame.extend_from_slice(&START).unwrap();
        frame.push(body.len() as u8).unwrap();
        frame.push(checksum(&[body.len() as u8])).unwrap();
        frame.extend_from_slice(&body).unwrap();
        frame.push(checksum(&body)).unwrap();
        frame.push(0x00).unwrap();
        frame
    }

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(&[0x02]), 0xFE);
        assert_eq!(checksum(&[0xD4, 0x02]), 0x2A);
        assert_eq!(checksum(&[]), 0x00);
    }

    #[test]
    fn test_build_firmware_version_frame() {
        let mut out = [0u8; MAX_FRAME_LEN];
        let len = build_frame::<Infallible>(cmd::GET_FIRMWARE_VERSION, &[], &mut out).unwrap();
        assert_eq!(
            &out[..len],
            &[0x00, 0x00, 0xFF, 0x02, 0xFE, 0xD4, 0x02, 0x2A, 0x00]
        );
    }

    #[test]
    fn test_build_frame_with_params() {
        let mut out = [0u8; MAX_FRAME_LEN];
        let len =
            build_frame::<Infallible>(cmd::IN_LIST_PASSIVE_TARGET, &[0x01, 0x00], &mut out).unwrap();
        assert_eq!(len, 11);
        assert_eq!(out[3], 0x04);
        assert_eq!(out[3].wrapping_add(out[4]), 0);
        let dcs_sum = out[5..10].iter().fold(0u8, |a, &b| a.wrapping_add(b));
        assert_eq!(dcs_sum, 0);
    }

    #[test]
    fn test_build_frame_too_long() {
        let mut out = [0u8; MAX_FRAME_LEN];
        let params = [0u8; MAX_FRAME_LEN];
        assert_eq!(
            build_frame::<Infallible>(0x00, &params, &mut out),
            Err(Pn532Error::InvalidFrame)
        );
    }

    #[test]
    fn test_parse_ack_and_nack() {
        assert_eq!(parse_ack::<Infallible>(&ACK_FRAME), Ok(()));
        assert_eq!(parse_ack::<Infallible>(&NACK_FRAME), Err(Pn532Error::Nack));
        assert_eq!(
            parse_ack::<Infallible>(&[0x01, 0x02, 0x03]),
            Err(Pn532Error::InvalidFrame)
        );
    }

    #[test]
    fn test_parse_response_checksums() {
        let frame = response(cmd::GET_FIRMWARE_VERSION, &[0x32, 0x01, 0x06, 0x07]);
        let data = parse_response::<Infallible>(&frame, cmd::GET_FIRMWARE_VERSION).unwrap();
        assert_eq!(data, &[0x32, 0x01, 0x06, 0x07]);

        let mut bad_dcs = frame.clone();
        let dcs_pos = bad_dcs.len() - 2;
        bad_dcs[dcs_pos] ^= 0xFF;
        assert_eq!(
            parse_response::<Infallible>(&bad_dcs, cmd::GET_FIRMWARE_VERSION),
            Err(Pn532Error::ChecksumMismatch)
        );

        let mut bad_lcs = frame.clone();
        bad_lcs[4] ^= 0x01;
        assert_eq!(
            parse_response::<Infallible>(&bad_lcs, cmd::GET_FIRMWARE_VERSION),
            Err(Pn532Error::ChecksumMismatch)
        );
    }

    #[test]
    fn test_parse_response_wrong_command() {
        let frame = response(cmd::SAM_CONFIGURATION, &[]);
        assert_eq!(
            parse_response::<Infallible>(&frame, cmd::GET_FIRMWARE_VERSION),
            Err(Pn532Error::UnexpectedResponse)
        );
    }

    #[test]
    fn test_parse_response_truncated() {
        let frame = response(cmd::GET_FIRMWARE_VERSION, &[0x32, 0x01, 0x06, 0x07]);
        assert_eq!(
            parse_response::<Infallible>(&frame[..8], cmd::GET_FIRMWARE_VERSION),
            Err(Pn532Error::InvalidFrame)
        );
        assert_eq!(
            parse_response::<Infallible>(&[0u8; 8], cmd::GET_FIRMWARE_VERSION),
            Err(Pn532Error::InvalidFrame)
        );
    }

    #[test]
    fn test_parse_firmware_version() {
        let v = parse_firmware_version::<Infallible>(&[0x32, 0x01, 0x06, 0x07]).unwrap();
        assert_eq!(v.version, 1);
        assert_eq!(v.revision, 6);

        let r: Result<_, TestError> = parse_firmware_version(&[0x31, 0x01, 0x06, 0x07]);
        assert_eq!(r, Err(Pn532Error::UnsupportedFirmware));

        let r: Result<_, TestError> = parse_firmware_version(&[0x32, 0x01]);
        assert_eq!(r, Err(Pn532Error::UnexpectedResponse));
    }

    #[test]
    fn test_parse_passive_target() {
        let data = [0x01, 0x01, 0x00, 0x04, 0x08, 0x04, 0xDE, 0xAD, 0xBE, 0xEF];
        let token = parse_passive_target::<Infallible>(&data).unwrap().unwrap();
        assert_eq!(token.as_bytes(), &[0xDE, 0xAD, 0xBE, 0xEF]);

        assert_eq!(parse_passive_target::<Infallible>(&[0x00]), Ok(None));

        // UID length claims more bytes than present
        let short = [0x01, 0x01, 0x00, 0x44, 0x00, 0x07, 0x04, 0x11];
        assert_eq!(
            parse_passive_target::<Infallible>(&short),
            Err(Pn532Error::InvalidFrame)
        );

        // 5-byte UID is not a valid ISO 14443-A size
        let odd = [0x01, 0x01, 0x00, 0x04, 0x08, 0x05, 1, 2, 3, 4, 5];
        assert_eq!(
            parse_passive_target::<Infallible>(&odd),
            Err(Pn532Error::UnexpectedResponse)
        );
    }

    #[test]
    fn test_init_sequence() {
        let mut bus = MockI2c::new();
        bus.queue_exchange(&response(
            cmd::GET_FIRMWARE_VERSION,
            &[0x32, 0x01, 0x06, 0x07],
        ));
        bus.queue_exchange(&response(cmd::SAM_CONFIGURATION, &[]));
        bus.queue_exchange(&response(cmd::RF_CONFIGURATION, &[]));

        let mut pn532 = Pn532::new(bus, StepClock::new());
        let version = pn532.init(0x01).unwrap();
        assert_eq!(version.ic, 0x32);

        let bus = &pn532.i2c;
        assert_eq!(bus.writes.len(), 3);
        assert_eq!(bus.writes[0][6], cmd::GET_FIRMWARE_VERSION);
        assert_eq!(bus.writes[1][6], cmd::SAM_CONFIGURATION);
        assert_eq!(bus.writes[2][6], cmd::RF_CONFIGURATION);
        assert_eq!(&bus.writes[2][7..11], &[CFG_MAX_RETRIES, 0xFF, 0x01, 0x01]);
    }

    #[test]
    fn test_init_not_detected() {
        // Nothing on the bus ever reports ready
        let mut pn532 = Pn532::new(MockI2c::new(), StepClock::new());
        assert_eq!(pn532.init(0x01), Err(Pn532Error::Timeout));
    }

    #[test]
    fn test_read_token_found() {
        let mut bus = MockI2c::new();
        bus.queue_exchange(&response(
            cmd::IN_LIST_PASSIVE_TARGET,
            &[0x01, 0x01, 0x00, 0x44, 0x00, 0x07, 0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66],
        ));

        let mut pn532 = Pn532::new(bus, StepClock::new());
        let token = pn532.read_token(50).unwrap().unwrap();
        assert_eq!(token.as_bytes().len(), 7);
        assert_eq!(token.as_bytes()[0], 0x04);
    }

    #[test]
    fn test_read_token_timeout_aborts() {
        let mut bus = MockI2c::new();
        // ACK arrives but no tag ever answers
        bus.queue(&[STATUS_READY]);
        let mut ack = [0u8; 7];
        ack[0] = STATUS_READY;
        ack[1..].copy_from_slice(&ACK_FRAME);
        bus.queue(&ack);

        let mut pn532 = Pn532::new(bus, StepClock::new());
        assert_eq!(pn532.read_token(50), Ok(None));

        let bus = &pn532.i2c;
        assert_eq!(bus.writes.len(), 2);
        assert_eq!(&bus.writes[1][..], &ACK_FRAME);
    }

    #[test]
    fn test_read_token_nack() {
        let mut bus = MockI2c::new();
        bus.queue(&[STATUS_READY]);
        let mut nack = [0u8; 7];
        nack[0] = STATUS_READY;
        nack[1..].copy_from_slice(&NACK_FRAME);
        bus.queue(&nack);

        let mut pn532 = Pn532::new(bus, StepClock::new());
        assert_eq!(pn532.read_token(50), Err(Pn532Error::Nack));
    }
}
