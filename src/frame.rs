// src/frame.rs

use arrayvec::ArrayString;

/// Marks the start of a sentence; also resets an in-flight receiver candidate.
pub const START_DELIMITER: char = '$';

/// Separates the sentence body from its two-digit checksum.
pub const CHECKSUM_DELIMITER: char = '*';

/// Sentence terminator. Only the `\r` is semantically checked on receive;
/// the `\n` falls outside the printable range and is skipped.
pub const TERMINATOR: &str = "\r\n";

/// Four-character prefix identifying a body as an MTK command sentence.
pub const COMMAND_PREFIX: &str = "PMTK";

/// Maximum number of printable characters a receiver candidate may
/// accumulate before it is abandoned.
pub const MAX_BODY_CHARS: usize = 76;

/// A sentence body as accumulated/reported by the receiver: everything
/// between `$` and `\r\n`, checksum suffix included.
pub type SentenceBody = ArrayString<MAX_BODY_CHARS>;

/// A complete framed sentence: `$` + body + `\r\n`.
pub type SentenceString = ArrayString<{ MAX_BODY_CHARS + 4 }>;
