//! Tint tables: the colours a quad's tint index selects from.

/// Colour applied to untinted quads and to indices the table does not cover.
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// An ordered list of `0xRRGGBB` colours indexed by a quad's tint index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TintTable {
    colours: Vec<u32>,
}

impl TintTable {
    /// A table with no entries: every quad resolves to white.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(colours: Vec<u32>) -> Self {
        Self { colours }
    }

    /// The single-entry table a dyed turtle body uses, empty when undyed.
    pub fn from_colour(colour: Option<u32>) -> Self {
        Self {
            colours: colour.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Resolve a tint index to linear RGBA.
    ///
    /// `-1`, any other negative index, and indices past the end are white.
    pub fn resolve(&self, tint_index: i32) -> [f32; 4] {
        usize::try_from(tint_index)
            .ok()
            .and_then(|slot| self.colours.get(slot))
            .map(|&colour| unpack_rgb(colour))
            .unwrap_or(WHITE)
    }
}

/// Unpack `0xRRGGBB` into RGBA with full alpha.
pub fn unpack_rgb(colour: u32) -> [f32; 4] {
    let channel = |shift: u32| ((colour >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}
