// Football data collaborators: the player catalog, the Sleeper payload
// adapter, and the sources that fetch league snapshots.

pub mod catalog;
pub mod sleeper;
pub mod source;
