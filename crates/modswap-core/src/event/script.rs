// Modswap Replay Script
// Line-based description of host events for the CLI and tests
//
//   toggle [press|release]
//   mods <press|release> <mask>
//   key <press|release> <keycode> [explicit <mask>] [implicit <mask>]
//
// Masks take any form `Mods` parses (`0x09`, `LCtrl+LGui`, `none`).
// `#` starts a comment.

use crate::event::HostEvent;
use crate::input::{KeycodeEvent, ModifierEvent};
use crate::modifier::ModifierError;
use crate::{Action, Mods};

/// Result type for script parsing
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors that can occur while parsing a script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: missing {what}")]
    Missing { line: usize, what: &'static str },

    #[error("line {line}: invalid state '{value}', expected press or release")]
    InvalidState { line: usize, value: String },

    #[error("line {line}: invalid modifier mask '{value}': {source}")]
    InvalidMask {
        line: usize,
        value: String,
        #[source]
        source: ModifierError,
    },

    #[error("line {line}: invalid keycode '{value}'")]
    InvalidKeycode { line: usize, value: String },

    #[error("line {line}: unexpected '{token}'")]
    Unexpected { line: usize, token: String },
}

/// Parse a whole script into events
pub fn parse_script(input: &str) -> ScriptResult<Vec<HostEvent>> {
    let mut events = Vec::new();
    for (i, raw) in input.lines().enumerate() {
        if let Some(event) = parse_line(i + 1, raw)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parse one line; blank and comment-only lines yield `None`
pub fn parse_line(line: usize, raw: &str) -> ScriptResult<Option<HostEvent>> {
    let content = raw.split('#').next().unwrap_or("");
    let mut tokens = content.split_whitespace();
    let Some(command) = tokens.next() else {
        return Ok(None);
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "toggle" => {
            let action = match tokens.next() {
                Some(value) => parse_action(line, value)?,
                None => Action::Press,
            };
            HostEvent::Binding(action)
        }
        "mods" => {
            let action = parse_action(line, require(line, tokens.next(), "state")?)?;
            let mask = parse_mask(line, require(line, tokens.next(), "modifier mask")?)?;
            HostEvent::Modifiers(ModifierEvent::new(mask, action))
        }
        "key" => {
            let action = parse_action(line, require(line, tokens.next(), "state")?)?;
            let keycode = parse_keycode(line, require(line, tokens.next(), "keycode")?)?;
            let mut ev = KeycodeEvent::new(keycode, action);
            while let Some(field) = tokens.next() {
                match field.to_ascii_lowercase().as_str() {
                    "explicit" => {
                        let value = require(line, tokens.next(), "explicit mask")?;
                        ev.explicit_modifiers = parse_mask(line, value)?;
                    }
                    "implicit" => {
                        let value = require(line, tokens.next(), "implicit mask")?;
                        ev.implicit_modifiers = parse_mask(line, value)?;
                    }
                    _ => {
                        return Err(ScriptError::Unexpected {
                            line,
                            token: field.to_string(),
                        })
                    }
                }
            }
            HostEvent::Keycode(ev)
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.to_string(),
            })
        }
    };

    if let Some(extra) = tokens.next() {
        return Err(ScriptError::Unexpected {
            line,
            token: extra.to_string(),
        });
    }
    Ok(Some(event))
}

fn require<'a>(line: usize, token: Option<&'a str>, what: &'static str) -> ScriptResult<&'a str> {
    token.ok_or(ScriptError::Missing { line, what })
}

fn parse_action(line: usize, value: &str) -> ScriptResult<Action> {
    match value.to_ascii_lowercase().as_str() {
        "press" | "pressed" | "down" | "1" => Ok(Action::Press),
        "release" | "released" | "up" | "0" => Ok(Action::Release),
        _ => Err(ScriptError::InvalidState {
            line,
            value: value.to_string(),
        }),
    }
}

fn parse_mask(line: usize, value: &str) -> ScriptResult<Mods> {
    value
        .parse::<Mods>()
        .map_err(|source| ScriptError::InvalidMask {
            line,
            value: value.to_string(),
            source,
        })
}

fn parse_keycode(line: usize, value: &str) -> ScriptResult<u16> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| ScriptError::InvalidKeycode {
        line,
        value: value.to_string(),
    })
}
