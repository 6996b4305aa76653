use std::fmt::{self, Display};

///
/// The relative within-sample abundance of one reference sequence.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Molecule {
    sequence_id: String,
    relative_abundance: u64,
}

impl Molecule {
    pub fn new(sequence_id: impl Into<String>, relative_abundance: u64) -> Self {
        Molecule {
            sequence_id: sequence_id.into(),
            relative_abundance,
        }
    }

    pub fn sequence_id(&self) -> &str {
        &self.sequence_id
    }

    pub fn relative_abundance(&self) -> u64 {
        self.relative_abundance
    }
}

impl Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.sequence_id, self.relative_abundance)
    }
}
