//! Thin domain callers of [`ApiClient`]. Each handle borrows the client, so
//! every call goes through the same refresh and normalization path.

mod accounts;
mod budgets;
mod categories;
mod export;
mod goals;
mod recovery;
mod transactions;
mod user;

pub use accounts::Accounts;
pub use budgets::Budgets;
pub use categories::Categories;
pub use export::Export;
pub use goals::Goals;
pub use recovery::Recovery;
pub use transactions::{RecurringTransactions, Transactions};
pub use user::User;

use crate::ApiClient;

impl ApiClient {
    pub fn accounts(&self) -> Accounts<'_> {
        Accounts { client: self }
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories { client: self }
    }

    pub fn transactions(&self) -> Transactions<'_> {
        Transactions { client: self }
    }

    pub fn recurring(&self) -> RecurringTransactions<'_> {
        RecurringTransactions { client: self }
    }

    pub fn budgets(&self) -> Budgets<'_> {
        Budgets { client: self }
    }

    pub fn goals(&self) -> Goals<'_> {
        Goals { client: self }
    }

    pub fn export(&self) -> Export<'_> {
        Export { client: self }
    }

    pub fn user(&self) -> User<'_> {
        User { client: self }
    }

    pub fn recovery(&self) -> Recovery<'_> {
        Recovery { client: self }
    }
}
