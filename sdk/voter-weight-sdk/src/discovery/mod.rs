//! Discovery of the wallet's voting assets.

pub mod collection;
pub mod oracle;

pub use collection::discover_holdings;
pub use oracle::discover_oracles;
