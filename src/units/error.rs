use thiserror::Error;

/// Why a raw attribute string produced no canonical value.
///
/// None of these are failures of the caller: each one means "keep the raw
/// text only".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("no numeric literal found in '{0}'")]
    NoNumber(String),
    #[error("no conversion rule for variable '{0}'")]
    UnknownVariable(String),
    #[error("no recognized unit for '{variable}' in '{raw}'")]
    UnrecognizedUnit { variable: String, raw: String },
}
