pub mod bounds;
pub mod types;

pub use bounds::{ClampNote, FieldBounds, NumericField};
pub use types::{
    AccountType, AgeGroup, BankName, EmploymentStatus, RawInputRecord, UnknownCategory,
};
