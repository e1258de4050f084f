// src/error.rs

#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
pub enum PmtkError {
    /// Requested NMEA update rate is outside the receiver-supported 1-10 Hz.
    #[error("update rate {0} Hz outside supported range 1-10 Hz")]
    UpdateRateOutOfRange(f32),

    /// Requested baud rate is not one the receiver accepts.
    #[error("unsupported baud rate: {0}")]
    UnsupportedBaudRate(u32),

    /// Sentence or checksum field does not have the expected shape
    /// (too short, or checksum digits are not hexadecimal).
    #[error("invalid sentence format")]
    InvalidFormat,

    /// Embedded checksum does not match the checksum calculated over the body.
    #[error("checksum mismatch: expected {expected:#04x}, calculated {calculated:#04x}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    /// Formatted command did not fit in a sentence buffer.
    #[error("sentence buffer overflow")]
    BufferOverflow,
}

// No manual Display impl needed - thiserror handles it.
