//! Program Loader.
//!
//! This module reads the interpretable text format the LDmicro compiler writes. It performs:
//! 1. **Header check:** The first line must carry the `$$LDcode` marker.
//! 2. **Code loading:** One 20-hex-character record per line up to `$$bits`, decoded
//!    and typed as it is read.
//! 3. **Symbol loading:** `name,address` lines, relay bank first, integer bank after
//!    `$$int16s`, plus the optional `$$cycle N us` directive.
//! 4. **Validation:** Bank addresses, jump targets, end marker, and cycle period, all
//!    checked before an image is returned. Loading is all-or-nothing.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::common::constants::{BITS_MARKER, CYCLE_MARKER, HEADER_MARKER, INT16S_MARKER};
use crate::common::{Bank, LoadError};
use crate::config::Config;
use crate::core::Program;
use crate::isa::decode::{DecodeError, decode_line};
use crate::sim::image::ProgramImage;
use crate::sim::symbols::SymbolTable;

/// Attaches a line number to a record decoding failure.
fn record_error(line: usize, err: DecodeError) -> LoadError {
    match err {
        DecodeError::BadHexDigit(ch) => LoadError::BadHexDigit { line, ch },
        DecodeError::RecordLength(len) => LoadError::RecordLength {
            line,
            len,
            expected: crate::common::constants::RECORD_HEX_CHARS,
        },
        DecodeError::UnknownOpcode(opcode) => LoadError::UnknownOpcode { line, opcode },
        DecodeError::UnsupportedOpcode(opcode, name) => LoadError::UnsupportedOpcode {
            line,
            opcode,
            name,
        },
    }
}

/// Parses the value of a `$$cycle` directive: `<microseconds>` with an optional `us` unit.
fn parse_cycle(line: usize, text: &str) -> Result<u64, LoadError> {
    let malformed = || LoadError::MalformedCycle {
        line,
        text: text.to_string(),
    };
    let value = text
        .strip_prefix(CYCLE_MARKER)
        .ok_or_else(malformed)?
        .trim();
    let value = value.strip_suffix("us").unwrap_or(value).trim();
    value.parse::<u64>().map_err(|_| malformed())
}

/// Reads a program file from disk and loads it.
///
/// # Arguments
///
/// * `path` - Path to the `.int` program file.
/// * `config` - Supplies bank capacities, program store size, and the expected cycle period.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be read, otherwise any error of [`load_str`].
pub fn load_file(path: impl AsRef<Path>, config: &Config) -> Result<ProgramImage, LoadError> {
    let path = path.as_ref();
    info!("loading program {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&text, config)
}

/// Loads a program from its text form.
///
/// # Arguments
///
/// * `text` - Full contents of a program file.
/// * `config` - Supplies bank capacities, program store size, and the expected cycle period.
///
/// # Returns
///
/// A fully validated [`ProgramImage`]. The cycle period of the image is the
/// configured one; a file declaring a different period is rejected.
///
/// # Errors
///
/// The first structural problem found, as a [`LoadError`] naming its line.
pub fn load_str(text: &str, config: &Config) -> Result<ProgramImage, LoadError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (_, header) = lines.next().ok_or(LoadError::Empty)?;
    if !header.contains(HEADER_MARKER) {
        return Err(LoadError::MissingHeader {
            text: header.to_string(),
        });
    }

    debug!("loading code");
    let max_ops = config.memory.max_ops;
    let mut code = Vec::new();
    let mut last_line = 1;
    loop {
        let Some((line, record)) = lines.next() else {
            return Err(LoadError::MissingSymbolSection {
                line: last_line + 1,
            });
        };
        last_line = line;
        if record.contains(BITS_MARKER) {
            break;
        }
        if code.len() == max_ops {
            return Err(LoadError::ProgramTooLarge { line, max: max_ops });
        }
        code.push(decode_line(record).map_err(|e| record_error(line, e))?);
    }

    debug!("loading symbols");
    let mut symbols = SymbolTable::new();
    let mut declared_cycle_us = None;
    let mut bank = Bank::Relay;
    for (line, entry) in lines {
        if entry.is_empty() {
            continue;
        }
        if entry.starts_with(CYCLE_MARKER) {
            if declared_cycle_us.is_some() {
                return Err(LoadError::MalformedCycle {
                    line,
                    text: entry.to_string(),
                });
            }
            declared_cycle_us = Some(parse_cycle(line, entry)?);
            continue;
        }
        if entry == INT16S_MARKER {
            bank = Bank::Integer;
            continue;
        }

        let malformed = || LoadError::MalformedSymbol {
            line,
            text: entry.to_string(),
        };
        // Fields past the address are ignored.
        let (name, rest) = entry.split_once(',').ok_or_else(malformed)?;
        let addr = rest.split_once(',').map_or(rest, |(addr, _)| addr);
        let name = name.trim();
        if name.is_empty() || name.starts_with("$$") {
            return Err(malformed());
        }
        let addr: u32 = addr.trim().parse().map_err(|_| malformed())?;
        let capacity = match bank {
            Bank::Relay => config.memory.relay_capacity,
            Bank::Integer => config.memory.integer_capacity,
        };
        if addr as usize >= capacity {
            return Err(LoadError::AddressOutOfRange {
                line,
                bank,
                addr,
                capacity,
            });
        }
        debug!("symbol: {name}, {bank} addr: {addr}");
        // Bounded by the bank capacity check above.
        symbols.push(name, bank, addr as u16);
    }

    let expected_us = config.general.cycle_period_us;
    if let Some(declared_us) = declared_cycle_us
        && declared_us != expected_us
    {
        return Err(LoadError::CycleMismatch {
            declared_us,
            expected_us,
        });
    }

    let program = Program::new(code, &config.memory)?;
    info!(
        instructions = program.len(),
        symbols = symbols.len(),
        cycle_us = expected_us,
        "program loaded"
    );
    Ok(ProgramImage::new(
        program,
        symbols,
        expected_us,
        declared_cycle_us,
    ))
}
