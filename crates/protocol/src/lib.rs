pub mod commands;
pub mod graph;
pub mod host;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use graph::{CommitRecord, Decorations, GraphDocument, GraphEdge};
pub use host::{HistoryLimit, HostMessage};
pub use shared_str::SharedStr;
pub use theme::ThemeToken;
pub use types::{Point, Viewport};
