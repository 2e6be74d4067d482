use core::fmt::{Display, Formatter, Result as FmtResult};

/// Consensus protocol generations, in activation order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Phase {
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
    Electra,
}

impl Phase {
    pub const ORDERED: [Self; 6] = [
        Self::Phase0,
        Self::Altair,
        Self::Bellatrix,
        Self::Capella,
        Self::Deneb,
        Self::Electra,
    ];

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        let position = Self::ORDERED.iter().position(|phase| *phase == self)?;
        position.checked_sub(1).map(|index| Self::ORDERED[index])
    }
}

impl Display for Phase {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        let name = match self {
            Self::Phase0 => "phase0",
            Self::Altair => "altair",
            Self::Bellatrix => "bellatrix",
            Self::Capella => "capella",
            Self::Deneb => "deneb",
            Self::Electra => "electra",
        };

        formatter.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_know_their_predecessors() {
        assert_eq!(Phase::Phase0.previous(), None);
        assert_eq!(Phase::Altair.previous(), Some(Phase::Phase0));
        assert_eq!(Phase::Electra.previous(), Some(Phase::Deneb));
    }
}
