use crate::prelude::*;
use std::fmt;

use nom::{
    IResult, Parser,
    bytes::complete::tag_no_case,
    character::complete::space1,
    combinator::{all_consuming, opt},
    sequence::preceded,
};

#[derive(Debug, Clone)]
/// Represents an independent voltage source in a circuit.
///
/// Voltage sources are Group 2 elements. The DC value drives operating
/// point and DC sweep analyses; the AC magnitude and phase (degrees) drive
/// AC small-signal analysis.
pub struct VoltageSource {
    /// Name of the source.
    pub name: String,
    /// Positive node of the source.
    pub plus: String,
    /// Negative node of the source.
    pub minus: String,
    /// DC value in Volts.
    pub dc_value: f64,
    /// AC magnitude in Volts.
    pub ac_magnitude: f64,
    /// AC phase in degrees.
    pub ac_phase: f64,
}

impl Identifiable for VoltageSource {
    fn identifier(&self) -> String {
        format!("V{}", self.name)
    }
}

impl fmt::Display for VoltageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V{} {} {} {}",
            self.name, self.plus, self.minus, self.dc_value,
        )
    }
}

/// Parses the trailing `AC <mag> <phase>` clause of a source line.
pub(super) fn parse_ac_spec(input: &str) -> IResult<&str, (f64, f64)> {
    let (input, _) = preceded(space1, tag_no_case("AC")).parse(input)?;
    let (input, magnitude) = preceded(space1, value_parser).parse(input)?;
    let (input, phase) = preceded(space1, value_parser).parse(input)?;
    Ok((input, (magnitude, phase)))
}

pub fn parse_voltage_source(input: &str) -> IResult<&str, VoltageSource> {
    let (input, _) = tag_no_case("V").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    // The DC value may be omitted on AC-only sources such as `V1 1 0 AC 1 0`.
    let (input, dc_value) = opt(preceded(space1, value_parser)).parse(input)?;
    let (input, ac_spec) = opt(parse_ac_spec).parse(input)?;

    let (ac_magnitude, ac_phase) = ac_spec.unwrap_or((0.0, 0.0));

    let voltage_source = VoltageSource {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        dc_value: dc_value.unwrap_or(0.0),
        ac_magnitude,
        ac_phase,
    };

    Ok((input, voltage_source))
}

impl FromStr for VoltageSource {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, voltage_source) = all_consuming(parse_voltage_source)
            .parse(s.trim())
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        Ok(voltage_source)
    }
}
