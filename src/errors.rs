use schema::Id;
use std::fmt;

/// Main error type for the team generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamGenError {
    /// Error related to species data lookup or processing
    SpeciesData(SpeciesDataError),
    /// Error related to the curated factory set tables
    FactoryData(FactoryDataError),
    /// Error loading static data tables from disk
    DataLoad(DataLoadError),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesDataError {
    /// The specified species was not found in the registry
    SpeciesNotFound(Id),
    /// The species has neither a curated move list nor a learnset
    UnusableMovePool(Id),
}

/// Errors related to the curated factory set tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryDataError {
    /// The requested tier has no set table
    UnknownTier(Id),
    /// The tier exists but holds no sets for the species
    NoSetsForSpecies { tier: Id, species: Id },
    /// Set table data is malformed or incomplete
    MalformedData(String),
}

/// Errors raised while loading static tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLoadError {
    /// Underlying I/O failure, stringified
    Io(String),
    /// RON or JSON parse failure, stringified
    Parse(String),
}

impl fmt::Display for TeamGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamGenError::SpeciesData(err) => write!(f, "Species data error: {}", err),
            TeamGenError::FactoryData(err) => write!(f, "Factory data error: {}", err),
            TeamGenError::DataLoad(err) => write!(f, "Data load error: {}", err),
        }
    }
}

impl fmt::Display for SpeciesDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesDataError::SpeciesNotFound(species) => {
                write!(f, "Species not found: {}", species)
            }
            SpeciesDataError::UnusableMovePool(species) => {
                write!(f, "Species incompatible with random battles: {}", species)
            }
        }
    }
}

impl fmt::Display for FactoryDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryDataError::UnknownTier(tier) => write!(f, "Unknown factory tier: {}", tier),
            FactoryDataError::NoSetsForSpecies { tier, species } => {
                write!(f, "No {} factory sets for species: {}", tier, species)
            }
            FactoryDataError::MalformedData(details) => {
                write!(f, "Malformed factory set data: {}", details)
            }
        }
    }
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLoadError::Io(details) => write!(f, "I/O error: {}", details),
            DataLoadError::Parse(details) => write!(f, "Parse error: {}", details),
        }
    }
}

impl std::error::Error for TeamGenError {}
impl std::error::Error for SpeciesDataError {}
impl std::error::Error for FactoryDataError {}
impl std::error::Error for DataLoadError {}

impl From<SpeciesDataError> for TeamGenError {
    fn from(err: SpeciesDataError) -> Self {
        TeamGenError::SpeciesData(err)
    }
}

impl From<FactoryDataError> for TeamGenError {
    fn from(err: FactoryDataError) -> Self {
        TeamGenError::FactoryData(err)
    }
}

impl From<DataLoadError> for TeamGenError {
    fn from(err: DataLoadError) -> Self {
        TeamGenError::DataLoad(err)
    }
}

/// Type alias for Results using TeamGenError
pub type TeamGenResult<T> = Result<T, TeamGenError>;
