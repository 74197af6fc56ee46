use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
	ParticleIndex { index: usize, len: usize },
	SelfLoop(usize),
	NonPositive { what: &'static str, value: f32 },
	Negative { what: &'static str, value: f32 },
	StateShape { expected: usize, found: usize },
	InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ParticleIndex { index, len } => write!(
				f,
				"particle index {} out of range ({} particles)",
				index, len
			),
			Self::SelfLoop(index) => {
				write!(f, "spring connects particle {} to itself", index)
			}
			Self::NonPositive { what, value } => {
				write!(f, "{} must be positive, got {}", what, value)
			}
			Self::Negative { what, value } => {
				write!(f, "{} must not be negative, got {}", what, value)
			}
			Self::StateShape { expected, found } => write!(
				f,
				"state has {} particles, expected {}",
				found, expected
			),
			Self::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

pub(crate) fn positive(what: &'static str, value: f32) -> Result<f32> {
	// also rejects NaN
	if value > 0.0 {
		Ok(value)
	} else {
		Err(Error::NonPositive { what, value })
	}
}

pub(crate) fn non_negative(what: &'static str, value: f32) -> Result<f32> {
	if value >= 0.0 {
		Ok(value)
	} else {
		Err(Error::Negative { what, value })
	}
}
