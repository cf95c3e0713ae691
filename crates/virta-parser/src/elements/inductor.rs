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
/// Represents an inductor in a circuit.
///
/// Inductors are Group 2 elements: the MNA system carries their branch
/// current as an extra unknown, which is what makes the DC short-circuit
/// behavior (v+ = v-) expressible.
pub struct Inductor {
    /// Name of the inductor.
    pub name: String,
    /// Value of the inductor in Henries.
    pub value: f64,
    /// Positive node of the inductor.
    pub plus: String,
    /// Negative node of the inductor.
    pub minus: String,
}

impl Identifiable for Inductor {
    fn identifier(&self) -> String {
        format!("L{}", self.name)
    }
}

impl fmt::Display for Inductor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L{} {} {} {}",
            self.name, self.plus, self.minus, self.value,
        )
    }
}

pub fn parse_inductor(input: &str) -> IResult<&str, Inductor> {
    let (input, _) = tag_no_case("L").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, value) = preceded(space1, value_parser).parse(input)?;

    let inductor = Inductor {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        value,
    };

    Ok((input, inductor))
}

impl FromStr for Inductor {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, inductor) = all_consuming(parse_inductor)
            .parse(s.trim())
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        if inductor.value <= 0.0 {
            return Err(Error::InvalidFloatValue(format!(
                "Inductor value must be positive: '{s}'"
            )));
        }

        Ok(inductor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inductor() {
        let inductor = "L1 1 0 0.001".parse::<Inductor>().unwrap();

        assert_eq!(inductor.name, "1");
        assert_eq!(inductor.plus, "1");
        assert_eq!(inductor.minus, "0");
        assert_eq!(inductor.value, 0.001);
    }

    #[test]
    fn test_parse_lowercase_and_suffix() {
        let inductor = "l2 vcc out 1m".parse::<Inductor>().unwrap();
        assert_eq!(inductor.name, "2");
        assert!((inductor.value - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_inductor_format() {
        assert!("L1 1 0".parse::<Inductor>().is_err());
    }

    #[test]
    fn test_invalid_inductor_value() {
        assert!("L1 1 0 abc".parse::<Inductor>().is_err());
    }
}
