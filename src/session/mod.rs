//! Session model, JSONL parsing, and session listings

pub mod index;
pub mod parser;
pub mod types;

pub use index::{sort_newest_first, SessionFilter, SessionIndex};
pub use parser::{parse_session, read_session, LineOutcome, LogRecord, RecordReader, SessionSource};
pub use types::{
    ContentBlock, Message, Role, Session, SessionIndexEntry, SessionMetadata, ThinkingBlock,
    ToolCall,
};
