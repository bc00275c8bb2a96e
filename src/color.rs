use serde::{Deserialize, Serialize};

/// An LED colour, 8 bits per channel
///
/// Serialized as a `[r, g, b]` array so config files can write
/// `snake_color = [0, 128, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const OFF: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);

    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(value: Rgb) -> Self {
        ratatui::style::Color::Rgb(value.0, value.1, value.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_array_form() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: Rgb,
        }

        let parsed: Wrapper = toml::from_str("color = [0, 128, 0]").unwrap();
        assert_eq!(parsed.color, Rgb::GREEN);
    }

    #[test]
    fn test_off() {
        assert!(Rgb::default().is_off());
        assert!(!Rgb::RED.is_off());
    }
}
