//! Attribute keys and markers with special meaning to the engine.

/// Attribute carrying a named annotation span. Spans must stay contiguous
/// through `compose`/`transform` or they are cleared.
pub const DETECTION_ID: &str = "detectionId";

/// Stand-in character for an embed when flattening a document for `diff`.
pub const EMBED_PLACEHOLDER: char = '\0';

/// Default line terminator for [`Delta::each_line`](crate::Delta::each_line).
pub const NEWLINE: char = '\n';
