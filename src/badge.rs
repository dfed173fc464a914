//! Status, priority and tier badges.
//!
//! The backend sends these as short Spanish codes (`"activo"`, `"alta"`,
//! `"premium"`). Each concept is an enum with an exhaustive label and tone
//! table, so adding a variant without a badge is a compile error rather than
//! a blank cell. Variants convert into [`FieldValue`] codes, which lets them
//! be used directly as filter values.
//!
//! ```
//! use cuentas_listview::badge::{Badge, Priority, Tone};
//!
//! let p: Priority = "urgente".parse().unwrap();
//! assert_eq!(p, Priority::Urgent);
//! assert_eq!(p.label(), "Urgente");
//! assert_eq!(p.tone(), Tone::Danger);
//! ```

use crate::entity::FieldValue;
use crate::error::ParseCodeError;
use lipgloss_extras::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Positive state (active, low priority).
    Success,
    /// Needs attention soon.
    Warning,
    /// Needs attention now.
    Danger,
    /// Informational.
    Info,
    /// No particular meaning.
    Neutral,
}

impl Tone {
    /// Foreground color for light and dark terminals.
    pub fn color(self) -> AdaptiveColor {
        match self {
            Self::Success => AdaptiveColor {
                Light: "#059669",
                Dark: "#10B981",
            },
            Self::Warning => AdaptiveColor {
                Light: "#B45309",
                Dark: "#F59E0B",
            },
            Self::Danger => AdaptiveColor {
                Light: "#B91C1C",
                Dark: "#EF4444",
            },
            Self::Info => AdaptiveColor {
                Light: "#1D4ED8",
                Dark: "#60A5FA",
            },
            Self::Neutral => AdaptiveColor {
                Light: "#6B7280",
                Dark: "#9CA3AF",
            },
        }
    }
}

/// A value shown as a colored badge.
pub trait Badge {
    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Color family.
    fn tone(&self) -> Tone;
}

/// Renders a badge as bold, colored text.
pub fn render_badge<B: Badge + ?Sized>(badge: &B) -> String {
    Style::new()
        .foreground(badge.tone().color())
        .bold(true)
        .render(badge.label())
}

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Backend code.
            pub fn code(self) -> &'static str {
                match self {
                    $( Self::$variant => $code, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseCodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let code = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.code() == code)
                    .ok_or_else(|| ParseCodeError {
                        kind: $kind,
                        code: s.to_string(),
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseCodeError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.code().to_string()
            }
        }

        impl From<$name> for FieldValue {
            fn from(value: $name) -> Self {
                FieldValue::Text(value.code().to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

code_enum! {
    /// Lifecycle state of a building, tower or unit.
    EntityStatus, "status" {
        /// In operation.
        Active => "activo",
        /// Disabled.
        Inactive => "inactivo",
        /// Temporarily under maintenance.
        Maintenance => "mantenimiento",
        /// Not yet delivered.
        UnderConstruction => "construccion",
    }
}

impl Badge for EntityStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Active => "Activo",
            Self::Inactive => "Inactivo",
            Self::Maintenance => "Mantenimiento",
            Self::UnderConstruction => "En construcción",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Active => Tone::Success,
            Self::Inactive => Tone::Neutral,
            Self::Maintenance => Tone::Warning,
            Self::UnderConstruction => Tone::Info,
        }
    }
}

code_enum! {
    /// Ticket priority.
    Priority, "priority" {
        /// Can wait.
        Low => "baja",
        /// Normal queue.
        Medium => "media",
        /// Next in line.
        High => "alta",
        /// Drop everything.
        Urgent => "urgente",
    }
}

impl Badge for Priority {
    fn label(&self) -> &'static str {
        match self {
            Self::Low => "Baja",
            Self::Medium => "Media",
            Self::High => "Alta",
            Self::Urgent => "Urgente",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Low => Tone::Success,
            Self::Medium => Tone::Info,
            Self::High => Tone::Warning,
            Self::Urgent => Tone::Danger,
        }
    }
}

code_enum! {
    /// Membership plan of a community.
    MembershipTier, "membership tier" {
        /// Entry plan.
        Basic => "basica",
        /// Default plan.
        Standard => "estandar",
        /// Extended plan.
        Premium => "premium",
        /// Multi-building plan.
        Enterprise => "empresarial",
    }
}

impl Badge for MembershipTier {
    fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Básica",
            Self::Standard => "Estándar",
            Self::Premium => "Premium",
            Self::Enterprise => "Empresarial",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Basic => Tone::Neutral,
            Self::Standard => Tone::Info,
            Self::Premium => Tone::Success,
            Self::Enterprise => Tone::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Record;
    use crate::filter::FilterCriteria;

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for status in EntityStatus::ALL {
            assert_eq!(status.code().parse::<EntityStatus>().unwrap(), *status);
        }
        for priority in Priority::ALL {
            assert_eq!(priority.code().parse::<Priority>().unwrap(), *priority);
        }
        for tier in MembershipTier::ALL {
            assert_eq!(tier.code().parse::<MembershipTier>().unwrap(), *tier);
        }
    }

    #[test]
    fn test_parsing_ignores_case_and_whitespace() {
        assert_eq!(" Premium ".parse::<MembershipTier>().unwrap(), MembershipTier::Premium);
    }

    #[test]
    fn test_unknown_code_names_the_kind() {
        let err = "critica".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "unknown priority code \"critica\"");
    }

    #[test]
    fn test_serde_uses_codes() {
        let status: EntityStatus = serde_json::from_str("\"mantenimiento\"").unwrap();
        assert_eq!(status, EntityStatus::Maintenance);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"mantenimiento\"");
        assert!(serde_json::from_str::<EntityStatus>("\"demolido\"").is_err());
    }

    #[test]
    fn test_variants_work_as_filter_values() {
        let mut criteria = FilterCriteria::new();
        criteria.set("estado", FieldValue::from(EntityStatus::Active).into());

        let activo = Record::new(1).with_field("estado", "activo");
        let inactivo = Record::new(2).with_field("estado", "inactivo");
        assert!(criteria.matches(&activo));
        assert!(!criteria.matches(&inactivo));
    }

    #[test]
    fn test_rendered_badge_keeps_label_text() {
        let rendered = render_badge(&Priority::High);
        assert_eq!(strip_ansi_escapes::strip_str(&rendered), "Alta");
        assert_eq!(Priority::High.to_string(), "Alta");
    }
}
