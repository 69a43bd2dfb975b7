//! The closed set of valid country/aggregate codes.
//!
//! The Eurostat `geo` dimension mixes real countries (PT, FR, ...) with
//! statistical aggregates (EU27_2020, EA19, ...). [`Region`] enumerates every
//! code that appears in the dataset; anything else fails at construction via
//! [`Region::from_code`]. [`Region::actual_countries`] filters out the fixed
//! aggregate list.

use std::fmt;
use std::str::FromStr;

use crate::error::{PipelineError, PipelineResult};

macro_rules! regions {
    ($($code:ident),+ $(,)?) => {
        /// A country or statistical-aggregate code from the closed enumeration.
        ///
        /// Variant names mirror the Eurostat codes exactly.
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Region {
            $($code),+
        }

        impl Region {
            /// Every valid code, in declaration order.
            pub const ALL: &'static [Region] = &[$(Region::$code),+];

            /// The canonical code string (e.g. `"PT"`, `"EU27_2020"`).
            pub fn code(self) -> &'static str {
                match self {
                    $(Region::$code => stringify!($code)),+
                }
            }

            /// Parse a code, failing with [`PipelineError::InvalidRegion`] for
            /// anything outside the closed set. Codes are case-sensitive.
            pub fn from_code(code: &str) -> PipelineResult<Region> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|region| region.code() == code)
                    .ok_or_else(|| PipelineError::InvalidRegion {
                        code: code.to_string(),
                    })
            }
        }
    };
}

regions!(
    AL, AM, AT, AZ, BE, BG, BY, CH, CY, CZ, DE, DE_TOT, DK, EA18, EA19, EE,
    EEA30_2007, EEA31, EFTA, EL, ES, EU27_2007, EU27_2020, EU28, FI, FR, FX, GE,
    HR, HU, IE, IS, IT, LI, LT, LU, LV, MD, ME, MK, MT, NL, NO, PL, PT, RO, RS,
    RU, SE, SI, SK, SM, TR, UA, UK, XK,
);

impl Region {
    /// Aggregate codes that are not real countries.
    const AGGREGATES: &'static [Region] = &[
        Region::DE_TOT,
        Region::EA18,
        Region::EA19,
        Region::EEA30_2007,
        Region::EEA31,
        Region::EFTA,
        Region::EU27_2007,
        Region::EU27_2020,
        Region::EU28,
    ];

    /// True for EU-wide/statistical aggregates, false for real countries.
    pub fn is_aggregate(self) -> bool {
        Self::AGGREGATES.contains(&self)
    }

    /// Every valid code minus the aggregate list, in declaration order.
    pub fn actual_countries() -> impl Iterator<Item = Region> {
        Self::ALL.iter().copied().filter(|r| !r.is_aggregate())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_accepts_members() {
        assert_eq!(Region::from_code("PT").unwrap(), Region::PT);
        assert_eq!(Region::from_code("EU27_2020").unwrap(), Region::EU27_2020);
        assert_eq!("FR".parse::<Region>().unwrap(), Region::FR);
    }

    #[test]
    fn from_code_rejects_unknown_and_is_case_sensitive() {
        for bad in ["XX", "pt", " PT", "PT ", ""] {
            let err = Region::from_code(bad).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidRegion { .. }), "{bad}");
        }
    }

    #[test]
    fn code_round_trips_and_displays() {
        for region in Region::ALL {
            assert_eq!(Region::from_code(region.code()).unwrap(), *region);
        }
        assert_eq!(Region::DE_TOT.to_string(), "DE_TOT");
    }

    #[test]
    fn actual_countries_excludes_every_aggregate() {
        let countries: Vec<Region> = Region::actual_countries().collect();
        for aggregate in Region::AGGREGATES {
            assert!(!countries.contains(aggregate), "{aggregate}");
        }
        for expected in [Region::PT, Region::FR, Region::ES] {
            assert!(countries.contains(&expected), "{expected}");
        }
        assert_eq!(countries.len(), Region::ALL.len() - Region::AGGREGATES.len());
    }
}
