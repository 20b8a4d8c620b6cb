//! Key translation from the compositor's key space to the engine's.
//!
//! The table is a partial override over the identity: unmapped codes pass
//! through truncated to 8 bits. The rest of the adapter never hard-codes
//! compositor key numbers.

/// Compositor (native) key codes.
pub mod native {
    pub const ESCAPE: u32 = 27;
    pub const ENTER: u32 = b'\n' as u32;
    pub const SPACE: u32 = b' ' as u32;
    pub const ARROW_UP: u32 = 257;
    pub const ARROW_DOWN: u32 = 258;
    pub const ARROW_RIGHT: u32 = 259;
    pub const ARROW_LEFT: u32 = 260;
    pub const LEFT_CTRL: u32 = 1001;
    pub const LEFT_SHIFT: u32 = 1002;
    pub const LEFT_ALT: u32 = 1003;
    pub const RIGHT_CTRL: u32 = 1011;
    pub const A: u32 = b'a' as u32;
    pub const D: u32 = b'd' as u32;
    pub const S: u32 = b's' as u32;
    pub const W: u32 = b'w' as u32;
}

/// Engine (doom) key codes.
pub mod doom {
    pub const RIGHTARROW: u8 = 0xae;
    pub const LEFTARROW: u8 = 0xac;
    pub const UPARROW: u8 = 0xad;
    pub const DOWNARROW: u8 = 0xaf;
    pub const STRAFE_L: u8 = 0xa0;
    pub const STRAFE_R: u8 = 0xa1;
    pub const USE: u8 = 0xa2;
    pub const FIRE: u8 = 0xa3;
    pub const ESCAPE: u8 = 27;
    pub const ENTER: u8 = 13;
    pub const TAB: u8 = 9;
    pub const RSHIFT: u8 = 0x80 + 0x36;
    pub const RALT: u8 = 0x80 + 0x38;
}

/// Map a native key code to an engine key code.
///
/// W/S drive forward/back and A/D strafe. Both control keys fire.
pub fn translate(code: u32) -> u8 {
    match code {
        native::ESCAPE => doom::ESCAPE,
        native::ARROW_UP => doom::UPARROW,
        native::ARROW_DOWN => doom::DOWNARROW,
        native::ARROW_LEFT => doom::LEFTARROW,
        native::ARROW_RIGHT => doom::RIGHTARROW,
        native::SPACE => doom::USE,
        native::LEFT_CTRL | native::RIGHT_CTRL => doom::FIRE,
        native::A => doom::STRAFE_L,
        native::D => doom::STRAFE_R,
        native::W => doom::UPARROW,
        native::S => doom::DOWNARROW,
        native::ENTER => doom::ENTER,
        native::LEFT_SHIFT => doom::RSHIFT,
        native::LEFT_ALT => doom::RALT,
        other => other as u8,
    }
}
