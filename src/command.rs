// src/command.rs

//! MTK command sentence builders.
//!
//! Every builder produces a complete framed sentence (`$<body>*<cc>\r\n`)
//! with the checksum computed by [`crate::checksum`]. The `Display`
//! implementation for [`Command`] writes the pre-checksum body only;
//! [`Command::to_sentence`] adds the framing.

use core::convert::TryFrom;
use core::fmt::{self, Write};

use super::checksum::{calculate_checksum, encode_checksum_ascii};
use super::error::PmtkError;
use super::frame::{
    SentenceString, CHECKSUM_DELIMITER, MAX_BODY_CHARS, START_DELIMITER, TERMINATOR,
};
use arrayvec::ArrayString;

// ##### Fixed command sentences #####
// Pre-baked with their checksums; tests assert they match what
// `to_sentence` produces.

/// Set sentence output back to the receiver's default set and frequencies.
pub const DEFAULT_SENTENCES: &str = "$PMTK314,-1*04\r\n";

/// Restart using all available data.
pub const HOT_START: &str = "$PMTK101*32\r\n";

/// Restart without ephemeris data.
pub const WARM_START: &str = "$PMTK102*31\r\n";

/// Restart with no initial data.
pub const COLD_START: &str = "$PMTK103*30\r\n";

/// Restart with no initial data and reset to factory defaults.
pub const FULL_COLD_START: &str = "$PMTK104*37\r\n";

/// Put the receiver into standby mode.
pub const STANDBY: &str = "$PMTK161,0*28\r\n";

/// Serial baud rates accepted by MTK receivers (PMTK251).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BaudRate {
    Baud4800,
    Baud9600,
    Baud14400,
    Baud19200,
    Baud38400,
    Baud57600,
    Baud115200,
}

impl BaudRate {
    /// The rate in bits per second, as emitted on the wire.
    pub const fn bps(self) -> u32 {
        match self {
            BaudRate::Baud4800 => 4800,
            BaudRate::Baud9600 => 9600,
            BaudRate::Baud14400 => 14400,
            BaudRate::Baud19200 => 19200,
            BaudRate::Baud38400 => 38400,
            BaudRate::Baud57600 => 57600,
            BaudRate::Baud115200 => 115200,
        }
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = PmtkError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            4800 => Ok(BaudRate::Baud4800),
            9600 => Ok(BaudRate::Baud9600),
            14400 => Ok(BaudRate::Baud14400),
            19200 => Ok(BaudRate::Baud19200),
            38400 => Ok(BaudRate::Baud38400),
            57600 => Ok(BaudRate::Baud57600),
            115200 => Ok(BaudRate::Baud115200),
            other => Err(PmtkError::UnsupportedBaudRate(other)),
        }
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bps())
    }
}

/// Output rate for one NMEA sentence type: emitted as the interval (in
/// position fixes between outputs) when enabled, `0` when disabled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SentenceRate {
    pub enabled: bool,
    pub interval: u8,
}

impl SentenceRate {
    /// Sentence type disabled.
    pub const OFF: SentenceRate = SentenceRate { enabled: false, interval: 0 };

    /// Output once every `interval` position fixes.
    pub const fn every(interval: u8) -> Self {
        SentenceRate { enabled: true, interval }
    }
}

impl fmt::Display for SentenceRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled {
            write!(f, "{}", self.interval)
        } else {
            f.write_str("0")
        }
    }
}

/// Per-sentence-type output configuration for PMTK314.
///
/// The wire format carries twelve reserved zero fields between `gsv` and
/// `mchn`; those are not configurable.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SentenceOutput {
    pub gll: SentenceRate,
    pub rmc: SentenceRate,
    pub vtg: SentenceRate,
    pub gga: SentenceRate,
    pub gsa: SentenceRate,
    pub gsv: SentenceRate,
    pub mchn: SentenceRate,
}

impl Default for SentenceOutput {
    /// GLL/RMC/VTG/GGA/GSA every fix, GSV every third fix, MCHN off.
    fn default() -> Self {
        SentenceOutput {
            gll: SentenceRate::every(1),
            rmc: SentenceRate::every(1),
            vtg: SentenceRate::every(1),
            gga: SentenceRate::every(1),
            gsa: SentenceRate::every(1),
            gsv: SentenceRate::every(3),
            mchn: SentenceRate::OFF,
        }
    }
}

/// Represents an MTK receiver command.
///
/// The `Display` implementation writes the sentence body, i.e. the part
/// covered by the checksum, without framing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Set sentence output to the default set (`PMTK314,-1`).
    SetDefaultSentences,
    /// Restart using all available data (`PMTK101`).
    HotStart,
    /// Restart without ephemeris data (`PMTK102`).
    WarmStart,
    /// Restart with no initial data (`PMTK103`).
    ColdStart,
    /// Factory reset and cold start (`PMTK104`).
    FullColdStart,
    /// Enter standby mode (`PMTK161,0`).
    Standby,
    /// Set the position-fix interval in milliseconds (`PMTK220`).
    SetUpdateInterval { millis: u16 },
    /// Set the serial baud rate (`PMTK251`).
    SetBaudRate(BaudRate),
    /// Set per-sentence-type output rates (`PMTK314`).
    SetSentenceOutput(SentenceOutput),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetDefaultSentences => f.write_str("PMTK314,-1"),
            Command::HotStart => f.write_str("PMTK101"),
            Command::WarmStart => f.write_str("PMTK102"),
            Command::ColdStart => f.write_str("PMTK103"),
            Command::FullColdStart => f.write_str("PMTK104"),
            Command::Standby => f.write_str("PMTK161,0"),
            Command::SetUpdateInterval { millis } => write!(f, "PMTK220,{}", millis),
            Command::SetBaudRate(baud) => write!(f, "PMTK251,{}", baud),
            Command::SetSentenceOutput(out) => write!(
                f,
                "PMTK314,{},{},{},{},{},{},0,0,0,0,0,0,0,0,0,0,0,0,{}",
                out.gll, out.rmc, out.vtg, out.gga, out.gsa, out.gsv, out.mchn
            ),
        }
    }
}

impl Command {
    /// Creates a `SetUpdateInterval` command from a position-fix rate in Hz.
    ///
    /// Rates outside 1-10 Hz (the span MTK receivers accept) are rejected.
    /// The interval is the integer truncation of `1000 / hz`, so fractional
    /// rates work: 3.5 Hz becomes 285 ms.
    pub fn set_update_rate(hz: f32) -> Result<Self, PmtkError> {
        // NaN fails the range check too.
        if !(1.0..=10.0).contains(&hz) {
            return Err(PmtkError::UpdateRateOutOfRange(hz));
        }
        Ok(Command::SetUpdateInterval { millis: (1000.0 / hz) as u16 })
    }

    /// Formats the command as a complete framed sentence:
    /// `$<body>*<cc>\r\n` with a lowercase two-digit checksum.
    pub fn to_sentence(&self) -> Result<SentenceString, PmtkError> {
        let mut body = ArrayString::<MAX_BODY_CHARS>::new();
        write!(body, "{}", self).map_err(|_| PmtkError::BufferOverflow)?;

        let crc = encode_checksum_ascii(calculate_checksum(&body));

        let mut sentence = SentenceString::new();
        write!(
            sentence,
            "{}{}{}{}{}{}",
            START_DELIMITER,
            body.as_str(),
            CHECKSUM_DELIMITER,
            crc[0] as char,
            crc[1] as char,
            TERMINATOR
        )
        .map_err(|_| PmtkError::BufferOverflow)?;
        Ok(sentence)
    }
}

/// Builds a sentence setting the position-fix rate in Hz (PMTK220).
///
/// # Errors
///
/// [`PmtkError::UpdateRateOutOfRange`] for rates outside 1-10 Hz.
pub fn update_nmea_rate(hz: f32) -> Result<SentenceString, PmtkError> {
    Command::set_update_rate(hz)?.to_sentence()
}

/// Builds a sentence setting the serial baud rate (PMTK251).
///
/// # Errors
///
/// [`PmtkError::UnsupportedBaudRate`] unless `baud` is one of 4800, 9600,
/// 14400, 19200, 38400, 57600 or 115200.
pub fn update_baudrate(baud: u32) -> Result<SentenceString, PmtkError> {
    Command::SetBaudRate(BaudRate::try_from(baud)?).to_sentence()
}

/// Builds a sentence setting the output rate of each NMEA sentence type
/// (PMTK314).
///
/// Cannot fail for any representable configuration; the `Result` matches
/// the other builders.
pub fn update_sentences(output: &SentenceOutput) -> Result<SentenceString, PmtkError> {
    Command::SetSentenceOutput(*output).to_sentence()
}
