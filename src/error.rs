//! src/error.rs
//!
//! Foutentaxonomie van de crate. Alleen het inlezen van grafen en configuratie
//! is fataal voor de aanroeper; de overige varianten worden binnen een
//! zoekepisode opgevangen en leiden tot "geef de beste tot nu toe terug".

use thiserror::Error;

/// Resultaat-alias voor alle fallible operaties van de crate.
pub type VcResult<T> = Result<T, VcError>;

#[derive(Debug, Error)]
pub enum VcError {
    /// Ongeldige invoergraaf (knoop buiten bereik, ontbrekende header, ...).
    #[error("ongeldige graaf: {0}")]
    InvalidGraph(String),

    /// Een selectie werd gevraagd uit een lege kandidatenverzameling.
    #[error("lege kandidatenverzameling")]
    EmptyCandidateSet,

    /// Een GRASP- of ACO-constructie haalde haar eigen tijdslimiet niet.
    #[error("constructie mislukt: {0}")]
    ConstructionFailure(String),

    /// Een parameter ligt buiten zijn domein.
    #[error("ongeldige configuratie: {0}")]
    Config(String),

    #[error("I/O-fout: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML-fout: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
