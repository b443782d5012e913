//! Fixed color palettes for the rendered symbol.

use image::Rgba;

/// Foreground (module) colors offered in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillColor {
    Black,
    Blue,
    Red,
    Green,
    Purple,
    Brown,
}

impl FillColor {
    /// All selectable fill colors, in display order.
    pub const ALL: [FillColor; 6] = [
        FillColor::Black,
        FillColor::Blue,
        FillColor::Red,
        FillColor::Green,
        FillColor::Purple,
        FillColor::Brown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FillColor::Black => "Black",
            FillColor::Blue => "Blue",
            FillColor::Red => "Red",
            FillColor::Green => "Green",
            FillColor::Purple => "Purple",
            FillColor::Brown => "Brown",
        }
    }

    pub fn rgba(&self) -> Rgba<u8> {
        match self {
            FillColor::Black => Rgba([0, 0, 0, 255]),
            FillColor::Blue => Rgba([0, 0, 255, 255]),
            FillColor::Red => Rgba([255, 0, 0, 255]),
            FillColor::Green => Rgba([0, 128, 0, 255]),
            FillColor::Purple => Rgba([128, 0, 128, 255]),
            FillColor::Brown => Rgba([165, 42, 42, 255]),
        }
    }
}

impl Default for FillColor {
    fn default() -> Self {
        FillColor::Black
    }
}

impl std::fmt::Display for FillColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Background colors offered in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackColor {
    White,
    LightGray,
    Yellow,
    LightBlue,
    Pink,
}

impl BackColor {
    /// All selectable background colors, in display order.
    pub const ALL: [BackColor; 5] = [
        BackColor::White,
        BackColor::LightGray,
        BackColor::Yellow,
        BackColor::LightBlue,
        BackColor::Pink,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BackColor::White => "White",
            BackColor::LightGray => "Light Gray",
            BackColor::Yellow => "Yellow",
            BackColor::LightBlue => "Light Blue",
            BackColor::Pink => "Pink",
        }
    }

    pub fn rgba(&self) -> Rgba<u8> {
        match self {
            BackColor::White => Rgba([255, 255, 255, 255]),
            BackColor::LightGray => Rgba([211, 211, 211, 255]),
            BackColor::Yellow => Rgba([255, 255, 0, 255]),
            BackColor::LightBlue => Rgba([173, 216, 230, 255]),
            BackColor::Pink => Rgba([255, 192, 203, 255]),
        }
    }
}

impl Default for BackColor {
    fn default() -> Self {
        BackColor::White
    }
}

impl std::fmt::Display for BackColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(FillColor::default(), FillColor::Black);
        assert_eq!(BackColor::default(), BackColor::White);
    }

    #[test]
    fn test_rgba_values() {
        assert_eq!(FillColor::Black.rgba(), Rgba([0, 0, 0, 255]));
        assert_eq!(BackColor::White.rgba(), Rgba([255, 255, 255, 255]));
        assert_eq!(BackColor::LightGray.rgba(), Rgba([211, 211, 211, 255]));
    }

    #[test]
    fn test_labels_unique() {
        let mut labels: Vec<&str> = FillColor::ALL.iter().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), FillColor::ALL.len());
    }
}
