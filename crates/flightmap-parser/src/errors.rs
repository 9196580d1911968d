use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("mismatch between headers ({header}) and record fields ({record})")]
    FieldCountMismatch { header: usize, record: usize },
}
