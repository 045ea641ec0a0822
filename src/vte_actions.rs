use crate::vte_actions::VteAction::{CarriageReturn, LineFeed, Tab, Text};
use vte::{Parser, Perform};

/// The semantic actions that can be taken as a result of bytes written by the hosted program.
///
/// Only the plain-text subset is modelled. Escape sequences and the remaining control bytes
/// are consumed by the parser and never surface as actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VteAction {
    Text(char),
    Tab,
    LineFeed,
    CarriageReturn,
}

/// A wrapper over [Parser] and [Perform] which takes bytes in and exposes the semantic
/// actions they produce.
///
/// Bytes are decoded as UTF-8 before they reach the parser. A code point split across two
/// calls to [VteActionParser::parse_bytes] is reported once, by the call that completes it.
/// Invalid bytes, including stray C1 bytes, are reported as `Text('\u{FFFD}')`. Every LF is
/// reported and resets the parser, so an unterminated escape or string sequence ends at the
/// end of its line.
pub struct VteActionParser {
    parser: Parser,
    // Incomplete UTF-8 sequence left over from the previous call.
    tail: Vec<u8>,
}

impl VteActionParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            tail: Vec::new(),
        }
    }

    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Vec<VteAction> {
        let text = self.decode_lossy(bytes);
        let mut performer = Performer::new();
        for byte in text.bytes() {
            if byte == b'\n' {
                performer.actions.push(LineFeed);
                self.parser = Parser::new();
            } else {
                self.parser.advance(&mut performer, byte)
            }
        }
        performer.actions
    }

    fn decode_lossy(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.tail);
        input.extend_from_slice(bytes);

        let mut text = String::with_capacity(input.len());
        let mut rest = &input[..];
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            text.push('\u{FFFD}');
                            rest = &after[len..];
                        }
                        None => {
                            self.tail = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        text
    }
}

impl Default for VteActionParser {
    fn default() -> Self {
        Self::new()
    }
}

// Private struct to hide this implementation detail
struct Performer {
    actions: Vec<VteAction>,
}

impl Performer {
    fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl Perform for Performer {
    fn print(&mut self, c: char) {
        self.actions.push(Text(c))
    }

    fn execute(&mut self, byte: u8) {
        let action = match byte {
            9 => Tab,
            13 => CarriageReturn,
            _ => return,
        };
        self.actions.push(action);
    }
}
