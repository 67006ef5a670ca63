//! String selectors for query variants
//!
//! Query variants (`PoiKind`, `CoordKind`, `SnapTarget`, `OrderKind`) are
//! closed enums. Text parsing is strict through [`std::str::FromStr`];
//! [`Selector::parse_lenient`] keeps the permissive behaviour older callers
//! rely on, where an unknown name silently selects the default variant.

use streamnet_core::{Error, Result};
use tracing::warn;

/// A closed set of named query variants
pub trait Selector: Sized + Copy + PartialEq + Default + 'static {
    /// Selector family, used in error messages
    const KIND: &'static str;

    /// Accepted names (case-insensitive) and the variant each selects.
    /// The first name listed for a variant is its canonical name.
    const NAMES: &'static [(&'static str, Self)];

    /// Strict parse, `Error::InvalidSelector` for unknown names
    fn parse(value: &str) -> Result<Self> {
        let wanted = value.trim();
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|&(_, variant)| variant)
            .ok_or_else(|| Error::InvalidSelector {
                kind: Self::KIND,
                value: value.to_string(),
            })
    }

    /// Permissive parse: unknown names fall back to the default variant
    fn parse_lenient(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|_| {
            let fallback = Self::default();
            warn!(
                "unknown {} selector {:?}, using {}",
                Self::KIND,
                value,
                fallback.name()
            );
            fallback
        })
    }

    /// Canonical name of this variant
    fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|&&(_, variant)| variant == self)
            .map(|&(name, _)| name)
            .unwrap_or("unknown")
    }
}

/// Implements `FromStr` and `Display` for a [`Selector`] enum.
macro_rules! impl_selector_traits {
    ($t:ty) => {
        impl std::str::FromStr for $t {
            type Err = streamnet_core::Error;

            fn from_str(s: &str) -> streamnet_core::Result<Self> {
                <$t as $crate::selector::Selector>::parse(s)
            }
        }

        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::selector::Selector::name(*self))
            }
        }
    };
}

pub(crate) use impl_selector_traits;
