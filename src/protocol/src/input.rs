use std::collections::HashSet;

// keys are lowercase ascii bytes, space is b' '
pub const KEY_WIND: u8 = b'w';

/// Polled key state, read once per simulation update.
pub trait InputState {
	fn is_pressed(&self, key: u8) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputState for NoInput {
	fn is_pressed(&self, _key: u8) -> bool {
		false
	}
}

impl InputState for HashSet<u8> {
	fn is_pressed(&self, key: u8) -> bool {
		self.contains(&key)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_key_set() {
		let mut keys = HashSet::new();
		assert!(!keys.is_pressed(KEY_WIND));
		keys.insert(KEY_WIND);
		assert!(keys.is_pressed(KEY_WIND));
		assert!(!keys.is_pressed(b' '));
		assert!(!NoInput.is_pressed(KEY_WIND));
	}
}
