//! Product categories and the fixed build slots.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use rigforge_core::DomainError;

/// Catalog category.
///
/// Only the first eight variants are build slots; the rest are sold as
/// standalone items and never take part in compatibility filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cpu,
    Motherboard,
    Ram,
    Storage,
    Gpu,
    Case,
    Psu,
    Cooling,
    Laptop,
    Monitor,
    Printer,
    Networking,
    Accessory,
    Peripheral,
    Software,
}

/// The build slots, in wizard step order.
pub const BUILD_SLOTS: [Category; 8] = [
    Category::Cpu,
    Category::Motherboard,
    Category::Ram,
    Category::Storage,
    Category::Gpu,
    Category::Case,
    Category::Psu,
    Category::Cooling,
];

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Storage,
        Category::Gpu,
        Category::Case,
        Category::Psu,
        Category::Cooling,
        Category::Laptop,
        Category::Monitor,
        Category::Printer,
        Category::Networking,
        Category::Accessory,
        Category::Peripheral,
        Category::Software,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Ram => "ram",
            Category::Storage => "storage",
            Category::Gpu => "gpu",
            Category::Case => "case",
            Category::Psu => "psu",
            Category::Cooling => "cooling",
            Category::Laptop => "laptop",
            Category::Monitor => "monitor",
            Category::Printer => "printer",
            Category::Networking => "networking",
            Category::Accessory => "accessory",
            Category::Peripheral => "peripheral",
            Category::Software => "software",
        }
    }

    /// Position of this category in the build wizard, if it is a slot.
    pub fn slot_index(self) -> Option<usize> {
        BUILD_SLOTS.iter().position(|c| *c == self)
    }

    pub fn is_build_slot(self) -> bool {
        self.slot_index().is_some()
    }

    /// Human-readable step label used by the builder wizard.
    pub fn label(self) -> &'static str {
        match self {
            Category::Cpu => "Processor",
            Category::Motherboard => "Motherboard",
            Category::Ram => "Memory",
            Category::Storage => "Storage",
            Category::Gpu => "Graphics Card",
            Category::Case => "Case",
            Category::Psu => "Power Supply",
            Category::Cooling => "Cooling",
            Category::Laptop => "Laptop",
            Category::Monitor => "Monitor",
            Category::Printer => "Printer",
            Category::Networking => "Networking",
            Category::Accessory => "Accessory",
            Category::Peripheral => "Peripheral",
            Category::Software => "Software",
        }
    }

    /// Reject categories that cannot be filtered as a build slot.
    pub fn ensure_build_slot(self) -> Result<Self, DomainError> {
        if self.is_build_slot() {
            Ok(self)
        } else {
            Err(DomainError::invalid_category(format!(
                "{} is not a build slot",
                self.as_str()
            )))
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| DomainError::invalid_category(format!("unknown category '{s}'")))
    }
}
