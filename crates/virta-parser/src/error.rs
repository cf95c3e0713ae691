use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Error indicating that the format of the input string is invalid.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Error indicating that a numeric value in the input string is invalid.
    #[error("Invalid float value: {0}")]
    InvalidFloatValue(String),

    /// Error indicating that an unknown element was encountered.
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// Error indicating that an unknown directive was encountered.
    #[error("Unknown directive: {0}")]
    UnknownDirective(String),

    /// Error indicating that the netlist contains no elements.
    #[error("The netlist is empty")]
    EmptyNetlist,

    /// Error indicating that a plot directive names a node that does not
    /// appear in the circuit.
    #[error("Plotted node not present in the circuit: {0}")]
    UnknownPlotNode(String),

    /// Error indicating a parsing failure on a specific line of the netlist.
    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("IO error reading file: {0}")]
    Io(#[from] std::io::Error),
}
