//! Engine key event and its 16-bit transport word.

/// One key transition as the engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub pressed: bool,
    /// Engine key code (already translated).
    pub key: u8,
}

impl KeyEvent {
    /// Event for `key` going down (`pressed`) or up.
    pub const fn new(pressed: bool, key: u8) -> Self {
        Self { pressed, key }
    }

    /// Key-down event.
    pub const fn press(key: u8) -> Self {
        Self::new(true, key)
    }

    /// Key-up event.
    pub const fn release(key: u8) -> Self {
        Self::new(false, key)
    }

    /// `pressed` in the high byte, key in the low byte.
    #[inline]
    pub const fn pack(self) -> u16 {
        ((self.pressed as u16) << 8) | self.key as u16
    }

    /// Inverse of [`KeyEvent::pack`].
    #[inline]
    pub const fn unpack(word: u16) -> Self {
        Self {
            pressed: (word >> 8) != 0,
            key: (word & 0xff) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(KeyEvent::press(27).pack(), 0x011b);
        assert_eq!(KeyEvent::release(0xad).pack(), 0x00ad);
    }

    #[test]
    fn test_unpack() {
        assert_eq!(KeyEvent::unpack(0x01a3), KeyEvent::press(0xa3));
        assert_eq!(KeyEvent::unpack(0x0020), KeyEvent::release(b' '));
    }

    #[test]
    fn test_zero_word_is_release_of_key_zero() {
        assert_eq!(KeyEvent::unpack(0), KeyEvent::default());
    }
}
