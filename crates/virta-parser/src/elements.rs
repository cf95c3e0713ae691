use std::fmt;

pub mod capacitor;
pub mod current_source;
pub mod inductor;
pub mod resistor;
pub mod voltage_source;

pub use capacitor::Capacitor;
pub use current_source::CurrentSource;
pub use inductor::Inductor;
pub use resistor::Resistor;
pub use voltage_source::VoltageSource;

/// Represents any component that can appear in a circuit.
#[derive(Debug, Clone)]
pub enum Element {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    VoltageSource(VoltageSource),
    CurrentSource(CurrentSource),
}

/// A macro to forward a method call to the correct inner element struct.
macro_rules! dispatch {
    ($self:expr, $method:ident($($args:expr),*)) => {
        match $self {
            Element::Resistor(e) => e.$method($($args),*),
            Element::Capacitor(e) => e.$method($($args),*),
            Element::Inductor(e) => e.$method($($args),*),
            Element::VoltageSource(e) => e.$method($($args),*),
            Element::CurrentSource(e) => e.$method($($args),*),
        }
    };
}

impl From<Resistor> for Element {
    fn from(item: Resistor) -> Self {
        Element::Resistor(item)
    }
}
impl From<Capacitor> for Element {
    fn from(item: Capacitor) -> Self {
        Element::Capacitor(item)
    }
}
impl From<Inductor> for Element {
    fn from(item: Inductor) -> Self {
        Element::Inductor(item)
    }
}
impl From<VoltageSource> for Element {
    fn from(item: VoltageSource) -> Self {
        Element::VoltageSource(item)
    }
}
impl From<CurrentSource> for Element {
    fn from(item: CurrentSource) -> Self {
        Element::CurrentSource(item)
    }
}

impl Element {
    /// Retrieves the nodes the element connects to.
    pub fn nodes(&self) -> Vec<&str> {
        match self {
            Element::Resistor(r) => vec![&r.plus, &r.minus],
            Element::Capacitor(c) => vec![&c.plus, &c.minus],
            Element::Inductor(l) => vec![&l.plus, &l.minus],
            Element::VoltageSource(v) => vec![&v.plus, &v.minus],
            Element::CurrentSource(i) => vec![&i.plus, &i.minus],
        }
    }

    /// Determines if the element carries a dedicated branch current
    /// (Group 2) in MNA. Voltage sources and inductors do.
    pub fn is_g2(&self) -> bool {
        matches!(self, Element::VoltageSource(_) | Element::Inductor(_))
    }
}

/// A trait for elements that have a unique string identifier.
pub trait Identifiable {
    fn identifier(&self) -> String;
}

impl Identifiable for Element {
    fn identifier(&self) -> String {
        dispatch!(self, identifier())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Resistor(e) => write!(f, "{e}"),
            Element::Capacitor(e) => write!(f, "{e}"),
            Element::Inductor(e) => write!(f, "{e}"),
            Element::VoltageSource(e) => write!(f, "{e}"),
            Element::CurrentSource(e) => write!(f, "{e}"),
        }
    }
}
