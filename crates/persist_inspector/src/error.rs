use crate::EntryId;
use persist_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("no preference entry '{id}'")]
    UnknownEntry { id: EntryId },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
