use std::{borrow::Borrow, fmt, sync::Arc};

/// Width of a block-level geoid (state + county + tract + block).
pub const GEOID_WIDTH: usize = 15;

/// Geographic identifier shared by the geo header and polygon attributes.
/// Keep the original text (with leading zeros and padding) but avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeoId(Arc<str>); // e.g., "360610001001000"

impl GeoId {
    /// Wrap an identifier exactly as given.
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    /// Right-pad an identifier with spaces to the full geoid width.
    /// Identifiers that are already at least that long are kept unchanged.
    pub fn padded(id: &str) -> Self {
        Self(Arc::from(format!("{id:<width$}", width = GEOID_WIDTH)))
    }

    /// Build a geoid from its header components.
    pub fn from_parts(state_county: &str, census_tract: &str, block: &str) -> Self {
        Self(Arc::from(format!("{state_county}{census_tract}{block}")))
    }

    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Block-granularity records have a non-blank leading character;
    /// aggregate summary levels leave the state/county prefix blank.
    pub fn is_block_level(&self) -> bool {
        self.0.chars().next().is_some_and(|c| c != ' ')
    }

    /// Returns the 2-character state prefix, or the full id when shorter.
    pub fn state(&self) -> &str { self.prefix(2) }

    /// Returns the 5-character state + county prefix, or the full id when shorter.
    pub fn county(&self) -> &str { self.prefix(5) }

    /// First `n` characters. Lossily decoded header bytes may be multi-byte.
    fn prefix(&self, n: usize) -> &str {
        match self.0.char_indices().nth(n) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for GeoId {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for GeoId {
    fn from(id: &str) -> Self { Self::new(id) }
}
