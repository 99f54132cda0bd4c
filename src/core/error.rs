use thiserror::Error;

/// Load-time failures while ingesting definition records. None of these are recoverable.
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Duplicate definition id: {0}")]
    DuplicateId(String),

    #[error("{referenced_by} references unknown skill {id}")]
    UnknownSkill { referenced_by: String, id: String },

    #[error("{referenced_by} references unknown item {id}")]
    UnknownItem { referenced_by: String, id: String },

    #[error("{referenced_by} references unknown slot {id}")]
    UnknownSlot { referenced_by: String, id: String },

    #[error("{referenced_by} references {id}, which is not a chest")]
    NotAChest { referenced_by: String, id: String },

    #[error("Item {0} is not equipment")]
    NotEquipment(String),

    #[error("Invalid loot entry in chest {chest_id}: {reason}")]
    InvalidLootEntry { chest_id: String, reason: String },

    #[error("Invalid chest {chest_id}: {reason}")]
    InvalidChest { chest_id: String, reason: String },

    #[error("Invalid action target {id}: {reason}")]
    InvalidActionTarget { id: String, reason: String },

    #[error("Invalid level table: {0}")]
    InvalidLevelTable(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ledger faults. The ledger has already clamped to zero when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Insufficient quantity of {item_id}: requested {requested}, available {available}")]
    InsufficientQuantity {
        item_id: String,
        requested: u64,
        available: u64,
    },
}

/// Errors surfaced by the engine's public mutation API.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown action target: {0}")]
    UnknownActionTarget(String),

    #[error("Queue amount must be positive")]
    ZeroAmount,

    #[error("Queue index {index} out of range (len {len})")]
    QueueIndexOutOfRange { index: usize, len: usize },

    #[error("Not enough {chest_id} to open: requested {requested}, held {held}")]
    NotEnoughChests {
        chest_id: String,
        requested: u64,
        held: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
