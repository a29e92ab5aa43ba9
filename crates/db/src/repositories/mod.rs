//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod bank_account;
pub mod category;
pub mod customer;
pub mod dashboard;
pub mod fixed_account;
pub mod investment;
pub mod notification;
pub mod obligation;
pub mod supplier;
pub mod transaction;
pub mod user;

pub use bank_account::{BankAccountError, BankAccountRepository, CreateBankAccountInput};
pub use category::{CategoryError, CategoryRepository};
pub use customer::CustomerRepository;
pub use dashboard::{AdminOverview, DashboardRepository, DashboardSummary};
pub use fixed_account::{
    CreateFixedAccountInput, FixedAccountRepoError, FixedAccountRepository, FixedAccountWithRefs,
    OverdueCheckReport, PayOccurrencesInput, UpdateFixedAccountInput,
};
pub use investment::{CreateInvestmentInput, InvestmentRepository};
pub use notification::NotificationRepository;
pub use obligation::{CreateObligationInput, ObligationError, ObligationRepository};
pub use supplier::SupplierRepository;
pub use transaction::{CreateTransactionInput, TransactionError, TransactionRepository};
pub use user::UserRepository;
