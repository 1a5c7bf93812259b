use serde::{Deserialize, Serialize};

/// Coarse geographic zones of Colombia, in label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Andina,
    Caribe,
    #[serde(rename = "Pacífico")]
    Pacifico,
    Sur,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Andina => "Andina",
            Region::Caribe => "Caribe",
            Region::Pacifico => "Pacífico",
            Region::Sur => "Sur",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
