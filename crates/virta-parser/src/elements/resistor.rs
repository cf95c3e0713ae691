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
/// Represents a resistor in a circuit.
pub struct Resistor {
    /// Name of the resistor.
    pub name: String,
    /// Value of the resistor in Ohms.
    pub value: f64,
    /// Positive node of the resistor.
    pub plus: String,
    /// Negative node of the resistor.
    pub minus: String,
}

impl Identifiable for Resistor {
    fn identifier(&self) -> String {
        format!("R{}", self.name)
    }
}

impl fmt::Display for Resistor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{} {} {} {}",
            self.name, self.plus, self.minus, self.value,
        )
    }
}

pub fn parse_resistor(input: &str) -> IResult<&str, Resistor> {
    let (input, _) = tag_no_case("R").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, value) = preceded(space1, value_parser).parse(input)?;

    let resistor = Resistor {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        value,
    };

    Ok((input, resistor))
}

impl FromStr for Resistor {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, resistor) = all_consuming(parse_resistor)
            .parse(s.trim())
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        if resistor.value <= 0.0 {
            return Err(Error::InvalidFloatValue(format!(
                "Resistor value must be positive: '{s}'"
            )));
        }

        Ok(resistor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resistor() {
        let resistor = "R1 1 0 1000".parse::<Resistor>().unwrap();

        assert_eq!(resistor.name, "1");
        assert_eq!(resistor.plus, "1");
        assert_eq!(resistor.minus, "0");
        assert_eq!(resistor.value, 1000.0);
    }

    #[test]
    fn test_parse_lowercase_and_suffix() {
        let resistor = "r5 in out 1.5k".parse::<Resistor>().unwrap();
        assert_eq!(resistor.name, "5");
        assert_eq!(resistor.plus, "in");
        assert_eq!(resistor.minus, "out");
        assert!((resistor.value - 1500.0).abs() < 1e-12);
    }

    #[test]
    fn test_identifier() {
        let resistor = "Rload 2 0 50".parse::<Resistor>().unwrap();
        assert_eq!(resistor.identifier(), "Rload");
    }

    #[test]
    fn test_invalid_resistor_format() {
        assert!("R1 1 0".parse::<Resistor>().is_err());
    }

    #[test]
    fn test_invalid_prefix() {
        assert!("C1 1 0 1000".parse::<Resistor>().is_err());
    }

    #[test]
    fn test_error_on_zero_value() {
        assert!("R1 1 0 0".parse::<Resistor>().is_err());
    }

    #[test]
    fn test_invalid_resistor_value() {
        assert!("R1 1 0 abc".parse::<Resistor>().is_err());
    }
}
