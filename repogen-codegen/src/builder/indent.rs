//! Indentation units.

/// One level of indentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indent {
    /// `gofmt` style
    #[default]
    Tab,
    /// A run of spaces, capped at eight
    Spaces(u8),
}

const SPACES: &str = "        ";

impl Indent {
    pub const GO: Self = Self::Tab;

    /// Text written once per level.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Tab => "\t",
            Self::Spaces(n) => &SPACES[..usize::from(*n).min(SPACES.len())],
        }
    }
}
