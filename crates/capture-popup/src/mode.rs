//! Capture mode resolution
//!
//! Alt forces a bookmark. Shift flips between source and whole-tab
//! capture: it asks for a source capture, unless the command already
//! declared one, in which case it asks for the whole tab. Without either
//! key the declared mode stands, including "unset".

use crate::modifiers::Modifiers;
use capture_host::CaptureMode;

/// Effective capture mode for a declared mode under the held modifiers
///
/// Ctrl is not considered here; it selects a dispatch path instead.
pub fn resolve_mode(declared: Option<CaptureMode>, modifiers: Modifiers) -> Option<CaptureMode> {
    match (declared, modifiers.shift(), modifiers.alt()) {
        (_, _, true) => Some(CaptureMode::Bookmark),
        (Some(CaptureMode::Source), true, false) => Some(CaptureMode::Tab),
        (_, true, false) => Some(CaptureMode::Source),
        (declared, false, false) => declared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLARED: [Option<CaptureMode>; 4] = [
        None,
        Some(CaptureMode::Source),
        Some(CaptureMode::Bookmark),
        Some(CaptureMode::Tab),
    ];

    fn all_modifiers() -> Vec<Modifiers> {
        let mut all = Vec::new();
        for alt in [false, true] {
            for shift in [false, true] {
                for ctrl in [false, true] {
                    all.push(Modifiers::from_keys(alt, shift, ctrl));
                }
            }
        }
        all
    }

    #[test]
    fn test_alt_always_bookmarks() {
        for declared in DECLARED {
            for modifiers in all_modifiers().into_iter().filter(|m| m.alt()) {
                assert_eq!(
                    resolve_mode(declared, modifiers),
                    Some(CaptureMode::Bookmark),
                    "declared {:?} with {:?}",
                    declared,
                    modifiers
                );
            }
        }
    }

    #[test]
    fn test_shift_toggles_source_and_tab() {
        for ctrl in [false, true] {
            let modifiers = Modifiers::from_keys(false, true, ctrl);
            assert_eq!(
                resolve_mode(Some(CaptureMode::Source), modifiers),
                Some(CaptureMode::Tab)
            );
            assert_eq!(resolve_mode(None, modifiers), Some(CaptureMode::Source));
            assert_eq!(
                resolve_mode(Some(CaptureMode::Bookmark), modifiers),
                Some(CaptureMode::Source)
            );
            assert_eq!(
                resolve_mode(Some(CaptureMode::Tab), modifiers),
                Some(CaptureMode::Source)
            );
        }
    }

    #[test]
    fn test_no_mode_keys_keep_declared() {
        for declared in DECLARED {
            assert_eq!(resolve_mode(declared, Modifiers::empty()), declared);
            assert_eq!(resolve_mode(declared, Modifiers::CTRL), declared);
        }
    }

    #[test]
    fn test_total_over_every_combination() {
        for declared in DECLARED {
            for modifiers in all_modifiers() {
                let expected = if modifiers.alt() {
                    Some(CaptureMode::Bookmark)
                } else if modifiers.shift() {
                    if declared == Some(CaptureMode::Source) {
                        Some(CaptureMode::Tab)
                    } else {
                        Some(CaptureMode::Source)
                    }
                } else {
                    declared
                };
                assert_eq!(resolve_mode(declared, modifiers), expected);
            }
        }
    }
}
