//! Keyboard modifiers held during a gesture

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held while a control was activated
    ///
    /// Alt and Shift pick the capture mode; Ctrl picks the dispatch path
    /// of the plain capture command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const ALT = 1 << 0;
        const SHIFT = 1 << 1;
        const CTRL = 1 << 2;
    }
}

impl Modifiers {
    /// Build from individual key states, as reported by a mouse event
    pub fn from_keys(alt: bool, shift: bool, ctrl: bool) -> Self {
        let mut modifiers = Self::empty();
        modifiers.set(Self::ALT, alt);
        modifiers.set(Self::SHIFT, shift);
        modifiers.set(Self::CTRL, ctrl);
        modifiers
    }

    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keys() {
        let modifiers = Modifiers::from_keys(true, false, true);
        assert!(modifiers.alt());
        assert!(!modifiers.shift());
        assert!(modifiers.ctrl());
        assert_eq!(modifiers, Modifiers::ALT | Modifiers::CTRL);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Modifiers::default().is_empty());
        assert_eq!(Modifiers::from_keys(false, false, false), Modifiers::empty());
    }
}
