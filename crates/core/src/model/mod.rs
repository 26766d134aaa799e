pub mod lane_table;
pub mod layout;
pub mod session;
pub mod summary;
pub mod view;

pub use lane_table::LaneTable;
pub use layout::{GraphLayout, LaneRow};
pub use session::{GraphSession, LoadOutcome, LoadTicket};
pub use summary::{GraphSummary, HistoryStatus};
pub use view::{EMPTY_PLACEHOLDER, GraphView};
