use crate::prelude::*;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{digit1, space1},
    combinator::{all_consuming, map, map_res},
    multi::many1,
    sequence::{delimited, preceded},
};

/// Default convergence threshold for the iterative solvers.
pub const DEFAULT_ITOL: f64 = 1e-3;

/// Solver options collected from `.OPTIONS` directives.
///
/// The three booleans select the solver family; `Method` in the solver
/// crate collapses them into a single selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// The system is symmetric positive-definite: Cholesky or CG.
    pub spd: bool,
    /// Use an iterative Krylov solver instead of a direct factorization.
    pub iter: bool,
    /// Use compressed-column storage and the sparse solver variants.
    pub sparse: bool,
    /// Convergence threshold for the iterative solvers.
    pub itol: f64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            spd: false,
            iter: false,
            sparse: false,
            itol: DEFAULT_ITOL,
        }
    }
}

/// A `.DC <source> <start> <end> <step>` sweep specification.
#[derive(Debug, Clone, PartialEq)]
pub struct DcAnalysis {
    /// Identifier of the swept source, e.g. `V1` or `I3`.
    pub source: String,
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl DcAnalysis {
    /// Number of evaluations, endpoints inclusive. The small epsilon keeps
    /// a quotient like (1 - 0)/0.1 = 9.9999998 from losing its endpoint.
    pub fn num_steps(&self) -> usize {
        (((self.stop - self.start) / self.step) + 1e-9).floor() as usize + 1
    }

    /// The sweep value at step `k`, computed from the start value so the
    /// sweep does not accumulate floating-point drift.
    pub fn value_at(&self, k: usize) -> f64 {
        self.start + k as f64 * self.step
    }
}

/// Scale of an AC frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepScale {
    Lin,
    Log,
}

impl std::fmt::Display for SweepScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepScale::Lin => write!(f, "LIN"),
            SweepScale::Log => write!(f, "LOG"),
        }
    }
}

/// An `.AC <LIN|LOG> <points> <f_start> <f_end>` sweep specification.
#[derive(Debug, Clone, PartialEq)]
pub struct AcAnalysis {
    pub scale: SweepScale,
    pub points: usize,
    pub start_freq: f64,
    pub stop_freq: f64,
}

impl AcAnalysis {
    /// Generates the sweep frequencies, endpoints inclusive.
    pub fn frequencies(&self) -> Vec<f64> {
        if self.points < 2 {
            return vec![self.start_freq];
        }

        let n = self.points;
        match self.scale {
            SweepScale::Lin => {
                let step = (self.stop_freq - self.start_freq) / (n - 1) as f64;
                (0..n).map(|k| self.start_freq + k as f64 * step).collect()
            }
            SweepScale::Log => {
                let start = self.start_freq.log10();
                let step = (self.stop_freq.log10() - start) / (n - 1) as f64;
                (0..n).map(|k| 10f64.powf(start + k as f64 * step)).collect()
            }
        }
    }
}

/// A parsed dot-directive line.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Options(Options),
    Dc(DcAnalysis),
    Ac(AcAnalysis),
    /// Nodes requested by a `.PLOT` or `.PRINT` line.
    Plot(Vec<String>),
    /// `.END`, accepted and ignored.
    End,
}

enum OptionToken {
    Spd,
    Iter,
    Sparse,
    Itol(f64),
}

fn parse_option_token(input: &str) -> IResult<&str, OptionToken> {
    alt((
        map(tag_no_case("SPD"), |_| OptionToken::Spd),
        map(tag_no_case("SPARSE"), |_| OptionToken::Sparse),
        map(tag_no_case("ITER"), |_| OptionToken::Iter),
        map(
            preceded(tag_no_case("ITOL="), value_parser),
            OptionToken::Itol,
        ),
    ))
    .parse(input)
}

fn parse_options(input: &str) -> IResult<&str, Options> {
    let (input, _) = tag_no_case(".OPTIONS").parse(input)?;
    let (input, tokens) = many1(preceded(space1, parse_option_token)).parse(input)?;

    let mut options = Options::default();
    for token in tokens {
        match token {
            OptionToken::Spd => options.spd = true,
            OptionToken::Iter => options.iter = true,
            OptionToken::Sparse => options.sparse = true,
            OptionToken::Itol(itol) => options.itol = itol,
        }
    }

    Ok((input, options))
}

fn parse_dc(input: &str) -> IResult<&str, DcAnalysis> {
    let (input, _) = tag_no_case(".DC").parse(input)?;
    let (input, source) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, start) = preceded(space1, value_parser).parse(input)?;
    let (input, stop) = preceded(space1, value_parser).parse(input)?;
    let (input, step) = preceded(space1, value_parser).parse(input)?;

    Ok((
        input,
        DcAnalysis {
            source: source.to_string(),
            start,
            stop,
            step,
        },
    ))
}

fn parse_sweep_scale(input: &str) -> IResult<&str, SweepScale> {
    alt((
        map(tag_no_case("LIN"), |_| SweepScale::Lin),
        map(tag_no_case("LOG"), |_| SweepScale::Log),
    ))
    .parse(input)
}

fn parse_ac(input: &str) -> IResult<&str, AcAnalysis> {
    let (input, _) = tag_no_case(".AC").parse(input)?;
    let (input, scale) = preceded(space1, parse_sweep_scale).parse(input)?;
    let (input, points) =
        preceded(space1, map_res(digit1, str::parse::<usize>)).parse(input)?;
    let (input, start_freq) = preceded(space1, value_parser).parse(input)?;
    let (input, stop_freq) = preceded(space1, value_parser).parse(input)?;

    Ok((
        input,
        AcAnalysis {
            scale,
            points,
            start_freq,
            stop_freq,
        },
    ))
}

/// Parses a single `V(<node>)` probe.
fn parse_probe(input: &str) -> IResult<&str, String> {
    map(
        delimited(tag_no_case("V("), alphanumeric_or_underscore1, tag(")")),
        str::to_string,
    )
    .parse(input)
}

fn parse_plot(input: &str) -> IResult<&str, Vec<String>> {
    let (input, _) = alt((tag_no_case(".PLOT"), tag_no_case(".PRINT"))).parse(input)?;
    many1(preceded(space1, parse_probe)).parse(input)
}

/// Parses one dot-directive line.
pub fn parse_directive(line: &str) -> Result<Directive> {
    let line = line.trim();

    let result = all_consuming(alt((
        map(parse_options, Directive::Options),
        map(parse_dc, Directive::Dc),
        map(parse_ac, Directive::Ac),
        map(parse_plot, Directive::Plot),
        map(tag_no_case(".END"), |_| Directive::End),
    )))
    .parse(line);

    let (_, directive) = result.map_err(|_| Error::UnknownDirective(line.to_string()))?;

    if let Directive::Ac(ac) = &directive {
        if ac.points < 2 {
            return Err(Error::InvalidFormat(format!(
                "AC sweep needs at least 2 points: '{line}'"
            )));
        }
        if ac.scale == SweepScale::Log && ac.start_freq <= 0.0 {
            return Err(Error::InvalidFormat(format!(
                "LOG sweep start frequency must be positive: '{line}'"
            )));
        }
    }
    if let Directive::Dc(dc) = &directive {
        if dc.step == 0.0 {
            return Err(Error::InvalidFormat(format!(
                "DC sweep step must be non-zero: '{line}'"
            )));
        }
    }

    Ok(directive)
}
