//! Obstruction classification.
//!
//! A non-embeddable result carries a bitmask of the minor patterns the
//! isolator observed. Patterns are not mutually exclusive, so the harness
//! reduces each mask to a single bucket by priority: the first matching
//! category among A..E, and independently the first matching refinement
//! among E1..E4.

use std::{fmt, ops::BitOr};

/// Bitmask of obstruction minor patterns reported by the graph library.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct MinorType(u32);

impl MinorType {
    /// No minor pattern recorded.
    pub const EMPTY: Self = Self(0);
    /// Minor A.
    pub const A: Self = Self(1);
    /// Minor B.
    pub const B: Self = Self(2);
    /// Minor C.
    pub const C: Self = Self(4);
    /// Minor D.
    pub const D: Self = Self(8);
    /// Minor E.
    pub const E: Self = Self(16);
    /// Minor E1.
    pub const E1: Self = Self(32);
    /// Minor E2.
    pub const E2: Self = Self(64);
    /// Minor E3.
    pub const E3: Self = Self(128);
    /// Minor E4.
    pub const E4: Self = Self(256);

    /// Builds a mask from raw bits. Unknown bits are preserved and ignored by
    /// [`classify`].
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` when every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// Returns `true` when no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MinorType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One of the nine statistical buckets for obstruction minors.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ObstructionCategory {
    /// Minor A.
    A,
    /// Minor B.
    B,
    /// Minor C.
    C,
    /// Minor D.
    D,
    /// Minor E.
    E,
    /// Refinement E1 of minor E.
    E1,
    /// Refinement E2 of minor E.
    E2,
    /// Refinement E3 of minor E.
    E3,
    /// Refinement E4 of minor E.
    E4,
}

impl ObstructionCategory {
    /// Number of buckets.
    pub const COUNT: usize = 9;

    /// Every bucket in counter order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::E1,
        Self::E2,
        Self::E3,
        Self::E4,
    ];

    /// Primary categories in priority order.
    pub const PRIMARY: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// E refinements in priority order.
    pub const REFINED: [Self; 4] = [Self::E1, Self::E2, Self::E3, Self::E4];

    /// Position of this bucket in a statistics array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The minor-type bit that selects this bucket.
    #[must_use]
    pub const fn minor_type(self) -> MinorType {
        match self {
            Self::A => MinorType::A,
            Self::B => MinorType::B,
            Self::C => MinorType::C,
            Self::D => MinorType::D,
            Self::E => MinorType::E,
            Self::E1 => MinorType::E1,
            Self::E2 => MinorType::E2,
            Self::E3 => MinorType::E3,
            Self::E4 => MinorType::E4,
        }
    }

    /// Report label, e.g. `A` or `E3`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::E1 => "E1",
            Self::E2 => "E2",
            Self::E3 => "E3",
            Self::E4 => "E4",
        }
    }
}

impl fmt::Display for ObstructionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of [`classify`]: one primary bucket and, independently, one E
/// refinement.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Classification {
    /// First matching category among A..E.
    pub primary: Option<ObstructionCategory>,
    /// First matching refinement among E1..E4.
    pub refined: Option<ObstructionCategory>,
}

/// Reduces a minor-type mask to its statistical buckets.
///
/// # Examples
/// ```
/// use gauntlet_core::{MinorType, ObstructionCategory, classify};
///
/// let both = classify(MinorType::B | MinorType::A | MinorType::E2);
/// assert_eq!(both.primary, Some(ObstructionCategory::A));
/// assert_eq!(both.refined, Some(ObstructionCategory::E2));
///
/// let none = classify(MinorType::EMPTY);
/// assert!(none.primary.is_none() && none.refined.is_none());
/// ```
#[must_use]
pub fn classify(mask: MinorType) -> Classification {
    Classification {
        primary: first_match(mask, &ObstructionCategory::PRIMARY),
        refined: first_match(mask, &ObstructionCategory::REFINED),
    }
}

fn first_match(
    mask: MinorType,
    priority: &[ObstructionCategory],
) -> Option<ObstructionCategory> {
    priority
        .iter()
        .copied()
        .find(|category| mask.contains(category.minor_type()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::a_over_b(MinorType::A | MinorType::B, Some(ObstructionCategory::A))]
    #[case::b_over_e(MinorType::B | MinorType::E, Some(ObstructionCategory::B))]
    #[case::c_over_d(MinorType::D | MinorType::C, Some(ObstructionCategory::C))]
    #[case::e_alone(MinorType::E | MinorType::E4, Some(ObstructionCategory::E))]
    #[case::refinement_only(MinorType::E3, None)]
    fn primary_category_follows_priority(
        #[case] mask: MinorType,
        #[case] expected: Option<ObstructionCategory>,
    ) {
        assert_eq!(classify(mask).primary, expected);
    }

    #[rstest]
    #[case(MinorType::E1 | MinorType::E4, Some(ObstructionCategory::E1))]
    #[case(MinorType::E4 | MinorType::E2, Some(ObstructionCategory::E2))]
    #[case(MinorType::E3 | MinorType::E4, Some(ObstructionCategory::E3))]
    #[case(MinorType::E4, Some(ObstructionCategory::E4))]
    #[case(MinorType::A, None)]
    fn refinement_follows_priority(
        #[case] mask: MinorType,
        #[case] expected: Option<ObstructionCategory>,
    ) {
        assert_eq!(classify(mask).refined, expected);
    }

    #[test]
    fn refinement_is_independent_of_primary() {
        let result = classify(MinorType::A | MinorType::E1);
        assert_eq!(result.primary, Some(ObstructionCategory::A));
        assert_eq!(result.refined, Some(ObstructionCategory::E1));
    }

    #[test]
    fn unknown_bits_are_ignored() {
        assert_eq!(classify(MinorType::from_bits(1 << 12)), Classification::default());
    }

    #[test]
    fn indices_follow_counter_order() {
        for (position, category) in ObstructionCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(bits in any::<u32>()) {
            let mask = MinorType::from_bits(bits);
            prop_assert_eq!(classify(mask), classify(mask));
        }

        #[test]
        fn primary_is_highest_priority_set_bit(bits in 0_u32..512) {
            let mask = MinorType::from_bits(bits);
            let expected = ObstructionCategory::PRIMARY
                .into_iter()
                .find(|category| bits & category.minor_type().bits() != 0);
            prop_assert_eq!(classify(mask).primary, expected);
        }
    }
}
