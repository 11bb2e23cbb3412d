use crate::state::{Sample, State};
use crate::terminal::Redraw;
use adc_uart::ascii;
use adc_uart::config::adc::{FULL_SCALE, VREF};
use std::fmt;
use std::num::ParseFloatError;

pub fn handle_line(state: &mut State, line: &str) -> Redraw {
    let line = line.trim_end_matches('\n');
    let line = line.trim_end_matches('\r');

    if line.is_empty() {
        return Redraw::No;
    }

    match parse_report(line) {
        Ok(sample) => {
            state.push_sample(sample);
            Redraw::Yes
        }
        Err(e) => {
            state.push_log(line);
            match e {
                ParseError::NotAReport => {}
                e => state.push_log(&format!("Error: {}", e)),
            }
            Redraw::Yes
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ParseError {
    NotAReport,
    InvalidCodes,
    InvalidFloat(ParseFloatError),
    /// The printed voltage is not the one the sample corresponds to.
    Mismatch { raw: i32, volts: f64 },
}

impl From<ParseFloatError> for ParseError {
    fn from(e: ParseFloatError) -> Self {
        Self::InvalidFloat(e)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAReport => write!(f, "not a report line"),
            Self::InvalidCodes => write!(f, "invalid ASCII codes"),
            Self::InvalidFloat(e) => write!(f, "invalid voltage: {}", e),
            Self::Mismatch { raw, volts } => {
                write!(f, "sample {} does not match voltage {:.2}", raw, volts)
            }
        }
    }
}

/// Parse `ASCII Code: <codes>, Voltage: <volts> V`, without the line terminator.
pub fn parse_report(line: &str) -> Result<Sample, ParseError> {
    let rest = line
        .strip_prefix("ASCII Code: ")
        .ok_or(ParseError::NotAReport)?;
    let (codes, rest) = rest
        .split_once(", Voltage: ")
        .ok_or(ParseError::NotAReport)?;
    let volts = rest.strip_suffix(" V").ok_or(ParseError::NotAReport)?;

    let raw = ascii::decode(codes).ok_or(ParseError::InvalidCodes)?;
    let volts: f64 = volts.parse()?;

    // the firmware computes in single precision
    #[allow(clippy::cast_precision_loss)]
    let expected = raw as f32 * (VREF / FULL_SCALE);
    if format!("{:.2}", expected) != format!("{:.2}", volts) {
        return Err(ParseError::Mismatch { raw, volts });
    }

    Ok(Sample { raw, volts })
}
