//! Payment status enum mapping to the `payment_statuses` lookup table.
//!
//! Variant discriminants match the seed data order (1-based) in the
//! corresponding migration.

/// The lookup-table id type. Status tables use SMALLSERIAL keys.
pub type StatusId = i16;

/// Local payment lifecycle status.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending = 1,
    Completed = 2,
    Failed = 3,
}

impl PaymentStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a database status ID back to the enum.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Completed),
            3 => Some(Self::Failed),
            _ => None,
        }
    }

    /// Seeded name in the `payment_statuses` table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Terminal statuses never change again; replayed callbacks for them are
    /// acknowledged without any effect.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl From<PaymentStatus> for StatusId {
    fn from(value: PaymentStatus) -> Self {
        value as StatusId
    }
}
