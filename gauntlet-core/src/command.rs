//! Algorithm selection.
//!
//! Maps each [`Command`] to the embed flags passed to the graph library and
//! the display name used in reports and derived filenames.

use std::{fmt, ops::BitOr};

/// Flags passed to [`crate::GraphLibrary::embed`].
///
/// The values match the bit layout of the embedding library so they can be
/// forwarded without translation. [`EmbedFlags::NONE`] means "do not embed".
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct EmbedFlags(u32);

impl EmbedFlags {
    /// No embedding is requested.
    pub const NONE: Self = Self(0);
    /// Planar embedding.
    pub const PLANAR: Self = Self(1);
    /// Outerplanar embedding.
    pub const OUTERPLANAR: Self = Self(2);
    /// Planar embedding followed by a visibility drawing.
    pub const DRAW_PLANAR: Self = Self(4 | 1);
    /// Search for a subgraph homeomorphic to K2,3.
    pub const SEARCH_K23: Self = Self(16 | 2);
    /// Search for a subgraph homeomorphic to K4.
    pub const SEARCH_K4: Self = Self(32 | 2);
    /// Search for a subgraph homeomorphic to K3,3.
    pub const SEARCH_K33: Self = Self(64 | 1);

    /// Builds flags from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` when no flag is set.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` for exactly planar or exactly outerplanar embedding,
    /// the two modes that classify obstructions.
    #[must_use]
    pub const fn classifies_minors(self) -> bool {
        self.0 == Self::PLANAR.0 || self.0 == Self::OUTERPLANAR.0
    }
}

impl BitOr for EmbedFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The algorithm family exercised by a run.
///
/// # Examples
/// ```
/// use gauntlet_core::Command;
///
/// let command = Command::from_key('p').expect("p selects planar embedding");
/// assert_eq!(command, Command::PlanarEmbed);
/// assert_eq!(command.algorithm().name(), "PlanarEmbed");
/// assert!(Command::from_key('x').is_none());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Command {
    /// Planar embedding (`p`).
    PlanarEmbed,
    /// Outerplanar embedding (`o`).
    Outerplanar,
    /// Planar embedding and drawing (`d`).
    DrawPlanar,
    /// K2,3 homeomorph search (`2`).
    SearchK23,
    /// K3,3 homeomorph search (`3`).
    SearchK33,
    /// K4 homeomorph search (`4`).
    SearchK4,
    /// Vertex colouring (`c`).
    ColorVertices,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Self; 7] = [
        Self::PlanarEmbed,
        Self::DrawPlanar,
        Self::Outerplanar,
        Self::SearchK23,
        Self::SearchK33,
        Self::SearchK4,
        Self::ColorVertices,
    ];

    /// Resolves a one-character command key.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'p' => Some(Self::PlanarEmbed),
            'd' => Some(Self::DrawPlanar),
            'o' => Some(Self::Outerplanar),
            '2' => Some(Self::SearchK23),
            '3' => Some(Self::SearchK33),
            '4' => Some(Self::SearchK4),
            'c' => Some(Self::ColorVertices),
            _ => None,
        }
    }

    /// Returns the one-character key for this command.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::PlanarEmbed => 'p',
            Self::DrawPlanar => 'd',
            Self::Outerplanar => 'o',
            Self::SearchK23 => '2',
            Self::SearchK33 => '3',
            Self::SearchK4 => '4',
            Self::ColorVertices => 'c',
        }
    }

    /// Returns the embed flags and display name for this command.
    #[must_use]
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::PlanarEmbed => Algorithm::new(EmbedFlags::PLANAR, "PlanarEmbed"),
            Self::DrawPlanar => Algorithm::new(EmbedFlags::DRAW_PLANAR, "DrawPlanar"),
            Self::Outerplanar => Algorithm::new(EmbedFlags::OUTERPLANAR, "OuterplanarEmbed"),
            Self::SearchK23 => Algorithm::new(EmbedFlags::SEARCH_K23, "K23Search"),
            Self::SearchK33 => Algorithm::new(EmbedFlags::SEARCH_K33, "K33Search"),
            Self::SearchK4 => Algorithm::new(EmbedFlags::SEARCH_K4, "K4Search"),
            Self::ColorVertices => Algorithm::new(EmbedFlags::NONE, "ColorVertices"),
        }
    }

    /// Returns `true` for commands served by [`crate::GraphLibrary::embed`].
    #[must_use]
    pub const fn is_embedding(self) -> bool {
        !matches!(self, Self::ColorVertices)
    }

    /// Returns `true` for the homeomorph searches, whose success means "no
    /// subgraph found".
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::SearchK23 | Self::SearchK33 | Self::SearchK4)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.algorithm().name())
    }
}

/// Embed flags and display name selected for a command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Algorithm {
    flags: EmbedFlags,
    name: &'static str,
}

impl Algorithm {
    /// Placeholder selected for unrecognised command keys.
    pub const UNSUPPORTED: Self = Self::new(EmbedFlags::NONE, "UnsupportedAlgorithm");

    const fn new(flags: EmbedFlags, name: &'static str) -> Self {
        Self { flags, name }
    }

    /// Selects the algorithm for a raw command key, falling back to
    /// [`Algorithm::UNSUPPORTED`].
    ///
    /// # Examples
    /// ```
    /// use gauntlet_core::{Algorithm, EmbedFlags};
    ///
    /// assert_eq!(Algorithm::for_key('o').flags(), EmbedFlags::OUTERPLANAR);
    /// let unknown = Algorithm::for_key('z');
    /// assert_eq!(unknown.name(), "UnsupportedAlgorithm");
    /// assert!(unknown.flags().is_none());
    /// ```
    #[must_use]
    pub fn for_key(key: char) -> Self {
        Command::from_key(key).map_or(Self::UNSUPPORTED, Command::algorithm)
    }

    /// Flags forwarded to the embedding library.
    #[must_use]
    pub const fn flags(self) -> EmbedFlags {
        self.flags
    }

    /// Human-readable algorithm name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}
