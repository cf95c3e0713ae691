use crate::prelude::*;
use std::fmt;

use nom::{
    IResult, Parser,
    bytes::complete::tag_no_case,
    character::complete::space1,
    combinator::all_consuming,
    sequence::preceded,
};

#[derive(Debug, Clone)]
/// Represents a capacitor in a circuit.
///
/// At DC a capacitor is an open circuit and contributes nothing to the
/// system; it only stamps in AC analysis.
pub struct Capacitor {
    /// Name of the capacitor.
    pub name: String,
    /// Value of the capacitor in Farads.
    pub value: f64,
    /// Positive node of the capacitor.
    pub plus: String,
    /// Negative node of the capacitor.
    pub minus: String,
}

impl Identifiable for Capacitor {
    fn identifier(&self) -> String {
        format!("C{}", self.name)
    }
}

impl fmt::Display for Capacitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C{} {} {} {}",
            self.name, self.plus, self.minus, self.value,
        )
    }
}

pub fn parse_capacitor(input: &str) -> IResult<&str, Capacitor> {
    let (input, _) = tag_no_case("C").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, value) = preceded(space1, value_parser).parse(input)?;

    let capacitor = Capacitor {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        value,
    };

    Ok((input, capacitor))
}

impl FromStr for Capacitor {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, capacitor) = all_consuming(parse_capacitor)
            .parse(s.trim())
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        if capacitor.value <= 0.0 {
            return Err(Error::InvalidFloatValue(format!(
                "Capacitor value must be positive: '{s}'"
            )));
        }

        Ok(capacitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capacitor() {
        let capacitor = "C1 2 0 1u".parse::<Capacitor>().unwrap();

        assert_eq!(capacitor.name, "1");
        assert_eq!(capacitor.plus, "2");
        assert_eq!(capacitor.minus, "0");
        assert!((capacitor.value - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_parse_scientific() {
        let capacitor = "c2 out 0 4.7e-9".parse::<Capacitor>().unwrap();
        assert!((capacitor.value - 4.7e-9).abs() < 1e-20);
    }

    #[test]
    fn test_invalid_capacitor_format() {
        assert!("C1 1 0".parse::<Capacitor>().is_err());
    }

    #[test]
    fn test_error_on_negative_value() {
        assert!("C1 1 0 -1u".parse::<Capacitor>().is_err());
    }
}
