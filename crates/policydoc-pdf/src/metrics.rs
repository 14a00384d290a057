//! Base-14 Helvetica metrics
//!
//! Glyph advance widths from the Adobe AFM files, in thousandths of an em,
//! indexed by WinAnsi byte. Layout uses them for wrapping, justification
//! and right alignment.

use crate::text::win_ansi_byte;

/// Helvetica widths for bytes 0x20..=0x7E
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Helvetica-Bold widths for bytes 0x20..=0x7E
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Font face used by the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

impl Font {
    /// Resource name in the page resource dictionary
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// PostScript name of the base-14 font
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Advance width of a WinAnsi byte in thousandths of an em
    pub fn byte_width(self, byte: u8) -> u16 {
        let bold = self == Font::Bold;
        match byte {
            0x20..=0x7E => {
                let idx = (byte - 0x20) as usize;
                if bold {
                    HELVETICA_BOLD_ASCII[idx]
                } else {
                    HELVETICA_ASCII[idx]
                }
            }
            0x85 | 0x89 | 0x97 => 1000,
            0x95 => 350,
            0x91 | 0x92 | 0x82 => {
                if bold {
                    278
                } else {
                    222
                }
            }
            0x93 | 0x94 | 0x84 => {
                if bold {
                    500
                } else {
                    333
                }
            }
            0x8B | 0x9B | 0x88 | 0x98 => 333,
            0x99 => 1000,
            0xA0 => 278,
            _ => {
                if bold {
                    611
                } else {
                    556
                }
            }
        }
    }

    /// Width of one character at `size` points
    pub fn char_width(self, ch: char, size: f32) -> f32 {
        let byte = win_ansi_byte(ch).unwrap_or(b'?');
        self.byte_width(byte) as f32 * size / 1000.0
    }

    /// Width of a string at `size` points
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .filter(|ch| win_ansi_byte(*ch).is_some() || !ch.is_control())
            .map(|ch| self.byte_width(win_ansi_byte(ch).unwrap_or(b'?')) as u32)
            .sum();
        units as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(Font::Regular.byte_width(b' '), 278);
        assert_eq!(Font::Regular.byte_width(b'A'), 667);
        assert_eq!(Font::Regular.byte_width(b'i'), 222);
        assert_eq!(Font::Bold.byte_width(b'A'), 722);
        assert_eq!(Font::Bold.byte_width(b'i'), 278);
        assert_eq!(Font::Regular.byte_width(0x95), 350);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w10 = Font::Regular.text_width("Policy", 10.0);
        let w20 = Font::Regular.text_width("Policy", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 0.001);
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "Access Control Procedures";
        assert!(Font::Bold.text_width(text, 10.0) > Font::Regular.text_width(text, 10.0));
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(Font::Regular.resource_name(), "F1");
        assert_eq!(Font::Bold.base_font(), "Helvetica-Bold");
    }
}
