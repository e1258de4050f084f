// src/receiver.rs

//! Incremental sentence receiver.
//!
//! [`SentenceReceiver`] frames command sentences out of a live character
//! stream, one character per [`SentenceReceiver::update`] call. Garbage,
//! truncated sentences, non-command traffic and checksum failures are
//! dropped silently; the next `$` always starts a fresh candidate, so the
//! receiver cannot lose synchronization. One instance per stream; `update`
//! mutates internal state without locking, so sharing an instance across
//! callers needs external serialization.

use super::checksum::verify_sentence_checksum;
use super::frame::{
    SentenceBody, CHECKSUM_DELIMITER, COMMAND_PREFIX, MAX_BODY_CHARS, START_DELIMITER,
};

// Printable ASCII range accepted into a candidate body.
const PRINTABLE_MIN: u32 = 33;
const PRINTABLE_MAX: u32 = 126;

#[derive(Debug, Clone)]
pub struct SentenceReceiver {
    /// Characters accumulated since the last `$`, checksum suffix included.
    body: SentenceBody,
    /// False once the candidate is abandoned or reported; only a new `$`
    /// reactivates the receiver.
    sentence_active: bool,
    /// First four characters of the body matched [`COMMAND_PREFIX`].
    is_command_sentence: bool,
    /// A `*` has been accumulated into the body.
    checksum_delimiter_seen: bool,
    /// Printable characters seen for this candidate. Equals `body.len()`,
    /// tracked separately to detect the prefix position and the length cap.
    char_count: u8,
}

impl SentenceReceiver {
    pub fn new() -> Self {
        SentenceReceiver {
            body: SentenceBody::new(),
            sentence_active: true,
            is_command_sentence: false,
            checksum_delimiter_seen: false,
            char_count: 0,
        }
    }

    /// Discards any in-progress candidate and starts scanning for a new
    /// sentence. Equivalent to what an incoming `$` does.
    pub fn reset(&mut self) {
        self.body.clear();
        self.sentence_active = true;
        self.is_command_sentence = false;
        self.checksum_delimiter_seen = false;
        self.char_count = 0;
    }

    /// Feeds one character from the stream.
    ///
    /// Returns the accumulated body (everything between `$` and `\r\n`,
    /// checksum suffix included) once a complete, checksum-valid command
    /// sentence terminates; `None` for every other character. A sentence is
    /// reported exactly once, at its terminating `\r`.
    pub fn update(&mut self, c: char) -> Option<SentenceBody> {
        if c == START_DELIMITER {
            // A new sentence always overrides an incomplete one.
            self.reset();
            return None;
        }

        let code = c as u32;
        if (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&code) && self.sentence_active {
            self.char_count += 1;
            if c == CHECKSUM_DELIMITER {
                let _ = self.body.try_push(c);
                self.checksum_delimiter_seen = true;
            } else {
                let _ = self.body.try_push(c);
                if self.char_count as usize == COMMAND_PREFIX.len()
                    && self.body.as_str() == COMMAND_PREFIX
                {
                    self.is_command_sentence = true;
                }
            }
            if self.char_count as usize >= MAX_BODY_CHARS {
                // Oversized candidate: abandon until the next `$`.
                self.sentence_active = false;
            }
            None
        } else if c == '\r' {
            if self.sentence_active
                && self.is_command_sentence
                && self.checksum_delimiter_seen
                && verify_sentence_checksum(&self.body).is_ok()
            {
                self.sentence_active = false;
                Some(self.body)
            } else {
                None
            }
        } else {
            // `\n` and other control characters carry no framing meaning.
            None
        }
    }
}

impl Default for SentenceReceiver {
    fn default() -> Self {
        Self::new()
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;
    use heapless::Vec as HeaplessVec;

    // Feeds a string character by character, collecting every reported
    // sentence.
    fn feed_str(receiver: &mut SentenceReceiver, stream: &str) -> HeaplessVec<SentenceBody, 4> {
        let mut reported = HeaplessVec::new();
        for c in stream.chars() {
            if let Some(sentence) = receiver.update(c) {
                reported.push(sentence).unwrap();
            }
        }
        reported
    }

    #[test]
    fn test_end_to_end_sentence() {
        let mut receiver = SentenceReceiver::new();
        let reported = feed_str(
            &mut receiver,
            "$PMTK514,0,1,1,1,1,5,0,0,0,0,0,0,0,0,0,0,0,0,0*2B\r\n",
        );
        assert_eq!(reported.len(), 1);
        assert_eq!(
            reported[0].as_str(),
            "PMTK514,0,1,1,1,1,5,0,0,0,0,0,0,0,0,0,0,0,0,0*2B"
        );
    }

    #[test]
    fn test_resync_after_garbage() {
        let mut receiver = SentenceReceiver::new();
        let reported = feed_str(&mut receiver, "garbage$PMTK001,604,3*32\r\n");
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].as_str(), "PMTK001,604,3*32");
    }

    #[test]
    fn test_corrupted_checksum_dropped() {
        let mut receiver = SentenceReceiver::new();
        let reported = feed_str(&mut receiver, "$PMTK001,604,3*33\r\n");
        assert!(reported.is_empty());
    }

    #[test]
    fn test_new_start_overrides_incomplete_sentence() {
        let mut receiver = SentenceReceiver::new();
        let reported = feed_str(&mut receiver, "$PMTK001,60$PMTK001,604,3*32\r\n");
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].as_str(), "PMTK001,604,3*32");
    }

    #[test]
    fn test_non_command_sentence_ignored() {
        let mut receiver = SentenceReceiver::new();
        // Valid NMEA traffic from the receiver itself is not a command
        // sentence; the prefix check drops it.
        let reported = feed_str(&mut receiver, "$GPGLL,2447.0,N,12100.5,E*6c\r\n");
        assert!(reported.is_empty());
    }

    #[test]
    fn test_missing_checksum_delimiter_dropped() {
        let mut receiver = SentenceReceiver::new();
        let reported = feed_str(&mut receiver, "$PMTK001,604,332\r\n");
        assert!(reported.is_empty());
    }

    #[test]
    fn test_reported_at_most_once() {
        let mut receiver = SentenceReceiver::new();
        let reported = feed_str(&mut receiver, "$PMTK001,604,3*32\r\r\n\r");
        assert_eq!(reported.len(), 1);
    }

    #[test]
    fn test_two_sentences_in_one_stream() {
        let mut receiver = SentenceReceiver::new();
        let reported =
            feed_str(&mut receiver, "$PMTK001,604,3*32\r\nnoise$PMTK001,604,3*32\r\n");
        assert_eq!(reported.len(), 2);
    }

    #[test]
    fn test_oversized_candidate_abandoned() {
        let mut receiver = SentenceReceiver::new();

        // 8 + 70 printable characters blow the 76-character cap before the
        // checksum arrives; nothing may be reported even though the tail
        // looks well-formed.
        let mut stream = heapless::String::<128>::new();
        stream.push('$').unwrap();
        stream.push_str("PMTK001,").unwrap();
        for _ in 0..70 {
            stream.push('6').unwrap();
        }
        stream.push_str("*32\r\n").unwrap();

        let reported = feed_str(&mut receiver, &stream);
        assert!(reported.is_empty());

        // A fresh `$` resets the abandoned candidate.
        let reported = feed_str(&mut receiver, "$PMTK001,604,3*32\r\n");
        assert_eq!(reported.len(), 1);
    }

    #[test]
    fn test_builder_output_round_trips() {
        let mut receiver = SentenceReceiver::new();

        let sentences = [
            command::update_baudrate(57600).unwrap(),
            command::update_nmea_rate(5.0).unwrap(),
            command::update_sentences(&command::SentenceOutput::default()).unwrap(),
        ];
        for sentence in &sentences {
            let reported = feed_str(&mut receiver, sentence);
            assert_eq!(reported.len(), 1);
            // Reported body is the sentence minus `$` and `\r\n`.
            assert_eq!(reported[0].as_str(), &sentence[1..sentence.len() - 2]);
        }
    }

    #[test]
    fn test_fixed_commands_round_trip() {
        let mut receiver = SentenceReceiver::new();
        for sentence in [
            command::DEFAULT_SENTENCES,
            command::HOT_START,
            command::WARM_START,
            command::COLD_START,
            command::FULL_COLD_START,
            command::STANDBY,
        ] {
            let reported = feed_str(&mut receiver, sentence);
            assert_eq!(reported.len(), 1);
            assert_eq!(reported[0].as_str(), &sentence[1..sentence.len() - 2]);
        }
    }

    #[test]
    fn test_reset_discards_candidate() {
        let mut receiver = SentenceReceiver::new();
        feed_str(&mut receiver, "$PMTK001,604,3*3");
        receiver.reset();
        // The rest of the sentence no longer completes anything.
        let reported = feed_str(&mut receiver, "2\r\n");
        assert!(reported.is_empty());
    }

    #[test]
    fn test_control_characters_ignored_mid_sentence() {
        let mut receiver = SentenceReceiver::new();
        // Stray NUL and tab inside the frame are skipped without breaking
        // the candidate.
        let reported = feed_str(&mut receiver, "$PMTK001\u{0},604,3\t*32\r\n");
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].as_str(), "PMTK001,604,3*32");
    }
}
