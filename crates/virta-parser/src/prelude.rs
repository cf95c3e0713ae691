pub use crate::error::Error;
pub type Result<T> = core::result::Result<T, Error>;

pub use crate::elements::Element;
pub use crate::elements::Identifiable;
pub use crate::utils::parse_value;
pub use crate::utils::{alphanumeric_or_underscore1, value_parser};
pub use std::collections::HashMap;
pub use std::str::FromStr;
